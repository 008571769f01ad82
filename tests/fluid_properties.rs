use dyeflow_engine::systems::advection::advect;
use dyeflow_engine::systems::boundary::{border_is_closed, enforce_boundary};
use dyeflow_engine::systems::diffusion::{diffuse_field, DiffuseParams};
use dyeflow_engine::systems::ping_pong::Role;
use dyeflow_engine::systems::projection::{
    divergence_at, divergence_peak, divergence_residual, project, ProjectParams,
};
use dyeflow_engine::{
    Dispatcher, Field, FieldId, FieldStore, FluidConfig, FluidCore, PingPongPolicy, Quantity,
};
use glam::Vec4;

fn swirl_with_source(n: u32) -> Field {
    let mut field = Field::zeroed(n).unwrap();
    let c = n as f32 / 2.0;
    let sigma = (n * n) as f32 / 32.0;
    for y in 1..n - 1 {
        for x in 1..n - 1 {
            let dx = x as f32 - c;
            let dy = y as f32 - c;
            let g = (-(dx * dx + dy * dy) / sigma).exp();
            // Outward (divergent) part plus a rotational part.
            field.set(x, y, Vec4::new((dx - dy) * 0.05 * g, (dy + dx) * 0.05 * g, 0.0, 0.0));
        }
    }
    field
}

fn projected_swirl(iterations: u32) -> Field {
    let n = 32;
    let d = Dispatcher::new(n).unwrap();
    let mut store = FieldStore::new(n).unwrap();
    *store.field_mut(FieldId::Velocity) = swirl_with_source(n);
    project(&d, &mut store, Quantity::Velocity, ProjectParams {
        iterations,
        policy: PingPongPolicy::Normalize,
    });
    store.field(FieldId::Velocity).clone()
}

fn residual_after(iterations: u32) -> f32 {
    divergence_residual(&projected_swirl(iterations))
}

#[test]
fn buffer_shapes_survive_many_ticks() {
    let mut core = FluidCore::new(FluidConfig {
        jacobi_iterations: 10,
        ..FluidConfig::with_resolution(32)
    })
    .unwrap();
    for i in 0..10 {
        core.set_pointer(0.3 + 0.04 * i as f32, 0.5);
        core.tick();
    }
    for id in FieldId::ALL {
        let field = core.fields().field(id);
        assert_eq!(field.resolution(), 32, "{}", id.name());
        assert_eq!(field.len(), 32 * 32, "{}", id.name());
    }
    assert_eq!(core.resolution(), 32);
}

#[test]
fn boundary_closes_a_noisy_buffer() {
    let d = Dispatcher::new(48).unwrap();
    let mut field = Field::zeroed(48).unwrap();
    for (i, c) in field.cells_mut().iter_mut().enumerate() {
        let v = ((i * 7919) % 101) as f32 / 50.0 - 1.0;
        *c = Vec4::new(v, v * 0.5, -v, 1.0);
    }
    enforce_boundary(&d, &mut field);
    assert!(border_is_closed(&field));
    assert_ne!(field.at(1, 1), Vec4::ZERO);
}

#[test]
fn projection_reduces_divergence_more_with_more_iterations() {
    let r0 = residual_after(0);
    let r10 = residual_after(10);
    let r100 = residual_after(100);
    assert!(r10 < r0, "10 rounds: {} vs {}", r10, r0);
    assert!(r100 < r10, "100 rounds: {} vs {}", r100, r10);

    let peaks: Vec<f32> = [0, 10, 100].iter().map(|&i| divergence_peak(&projected_swirl(i))).collect();
    assert!(peaks[0] > peaks[1] && peaks[1] > peaks[2], "peaks {:?}", peaks);
}

#[test]
fn projection_shrinks_divergence_wherever_it_was_strong() {
    let before = swirl_with_source(32);
    let after = projected_swirl(100);
    let peak = divergence_peak(&before);
    for y in 1..31 {
        for x in 1..31 {
            let b = divergence_at(&before, x, y);
            if b >= 0.1 * peak {
                let a = divergence_at(&after, x, y);
                assert!(a < b, "cell ({}, {}): {} -> {}", x, y, b, a);
            }
        }
    }
}

#[test]
fn odd_jacobi_counts_follow_the_ping_pong_policy() {
    let d = Dispatcher::new(16).unwrap();
    let seed = || {
        let mut f = Field::zeroed(16).unwrap();
        f.set(8, 8, Vec4::splat(1.0));
        f
    };
    let params = |iterations, policy| DiffuseParams { viscosity: 0.1, time_step: 1.0, iterations, policy };

    let (mut field, mut temp) = (seed(), Field::zeroed(16).unwrap());
    assert_eq!(diffuse_field(&d, &mut field, &mut temp, params(4, PingPongPolicy::SourceParity)), Role::Primary);

    let (mut field, mut temp) = (seed(), Field::zeroed(16).unwrap());
    assert_eq!(diffuse_field(&d, &mut field, &mut temp, params(5, PingPongPolicy::SourceParity)), Role::Scratch);
    let in_temp = temp.clone();

    let (mut field, mut temp) = (seed(), Field::zeroed(16).unwrap());
    assert_eq!(diffuse_field(&d, &mut field, &mut temp, params(5, PingPongPolicy::Normalize)), Role::Primary);
    assert_eq!(field, in_temp);
}

#[test]
fn advection_decays_by_dissipation_power() {
    let d = Dispatcher::new(16).unwrap();
    let mut store = FieldStore::new(16).unwrap();
    store.field_mut(FieldId::Dye).fill(Vec4::new(1.0, 0.5, 0.25, 1.0));
    for _ in 0..10 {
        advect(&d, &mut store, Quantity::Dye, 0.99, 1.0);
    }
    let k = 0.99f32.powi(10);
    let c = store.dye().at(7, 7);
    assert!((c.x - k).abs() < 1e-5);
    assert!((c.y - 0.5 * k).abs() < 1e-5);
}

#[test]
fn end_to_end_unit_force_at_centre() {
    let mut core = FluidCore::new(FluidConfig::with_resolution(64)).unwrap();
    // Prime the pointer history one cell to the left of the centre.
    core.set_pointer(31.0 / 64.0, 0.5);
    core.tick();
    assert_eq!(core.fields().velocity().max_abs(), 0.0);

    core.set_pointer(0.5, 0.5);
    core.tick();

    let v = core.fields().velocity().at(32, 32);
    assert!(v.x > 0.0, "velocity at (32, 32): {:?}", v);
    assert!(border_is_closed(core.fields().velocity()));
}

#[test]
fn still_pointer_and_clear_dye_is_a_no_op() {
    let mut core = FluidCore::new(FluidConfig {
        dye_colour: [0.0; 4],
        jacobi_iterations: 10,
        ..FluidConfig::with_resolution(32)
    })
    .unwrap();
    core.set_pointer(0.4, 0.6);
    for _ in 0..3 {
        core.tick();
    }
    for id in FieldId::ALL {
        assert_eq!(core.fields().field(id).max_abs(), 0.0, "{}", id.name());
    }
}
