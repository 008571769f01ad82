//! Kernel Dispatcher - logical thread domains onto execution groups
//!
//! Each kernel has a native group size (threads per group on each axis),
//! looked up once when the dispatcher is built. A dispatch launches
//! `threads / group` groups per axis (truncating division) and runs the
//! kernel body once per covered thread.
//!
//! Truncation silently drops the tail of a domain that is not an exact
//! multiple of the group size, so `Dispatcher::new` refuses any resolution
//! where that could happen.
//!
//! With the `parallel` feature, bands of group rows run on the rayon pool.
//! Every thread writes only its own output element.

use std::sync::atomic::{AtomicU64, Ordering};

use glam::UVec3;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::domain::error::SimError;

/// Every kernel the solver launches.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KernelId {
    CopyTemp,
    ClearBuffer,
    Advection,
    Divergence,
    JacobiPressure,
    JacobiDiffusion,
    AddInk,
    RemoveDivergence,
    AddForceMouse,
    Boundary,
    BufferToTexture,
}

impl KernelId {
    pub const COUNT: usize = 11;

    pub const ALL: [KernelId; KernelId::COUNT] = [
        KernelId::CopyTemp,
        KernelId::ClearBuffer,
        KernelId::Advection,
        KernelId::Divergence,
        KernelId::JacobiPressure,
        KernelId::JacobiDiffusion,
        KernelId::AddInk,
        KernelId::RemoveDivergence,
        KernelId::AddForceMouse,
        KernelId::Boundary,
        KernelId::BufferToTexture,
    ];

    pub fn name(self) -> &'static str {
        match self {
            KernelId::CopyTemp => "copy_temp",
            KernelId::ClearBuffer => "clear_buffer",
            KernelId::Advection => "advection",
            KernelId::Divergence => "divergence",
            KernelId::JacobiPressure => "jacobi_pressure",
            KernelId::JacobiDiffusion => "jacobi_diffusion",
            KernelId::AddInk => "add_ink",
            KernelId::RemoveDivergence => "remove_divergence",
            KernelId::AddForceMouse => "add_force_mouse",
            KernelId::Boundary => "boundary",
            KernelId::BufferToTexture => "buffer_to_texture",
        }
    }

    pub fn from_name(name: &str) -> Option<KernelId> {
        KernelId::ALL.iter().copied().find(|k| k.name() == name)
    }

    /// Native execution-group size of the kernel.
    pub fn native_group_size(self) -> UVec3 {
        match self {
            KernelId::CopyTemp | KernelId::ClearBuffer => UVec3::new(256, 1, 1),
            KernelId::Boundary => UVec3::new(64, 1, 1),
            _ => UVec3::new(16, 16, 1),
        }
    }

    /// Logical thread domain the kernel is launched over on an N×N grid.
    /// `None` when the thread count does not fit in a `u32`.
    pub fn domain(self, resolution: u32) -> Option<UVec3> {
        match self {
            KernelId::CopyTemp | KernelId::ClearBuffer => {
                resolution.checked_mul(resolution).map(|cells| UVec3::new(cells, 1, 1))
            }
            KernelId::Boundary => resolution.checked_mul(4).map(|ring| UVec3::new(ring, 1, 1)),
            _ => Some(UVec3::new(resolution, resolution, 1)),
        }
    }

    #[inline]
    fn slot(self) -> usize {
        self as usize
    }
}

/// Groups to launch for a thread count: integer truncation, not rounded up.
#[inline]
pub fn group_count(threads: UVec3, group_size: UVec3) -> UVec3 {
    threads / group_size
}

pub struct Dispatcher {
    resolution: u32,
    group_sizes: [UVec3; KernelId::COUNT],
    dispatches: AtomicU64,
}

impl Dispatcher {
    /// Build the kernel table for an N×N grid.
    ///
    /// Fails when N is zero or when any kernel's domain is not an exact
    /// multiple of its group size.
    pub fn new(resolution: u32) -> Result<Self, SimError> {
        if resolution == 0 {
            return Err(SimError::Misconfigured("resolution must be non-zero".to_string()));
        }

        let mut group_sizes = [UVec3::ONE; KernelId::COUNT];
        for kernel in KernelId::ALL {
            group_sizes[kernel.slot()] = kernel.native_group_size();
        }

        let dispatcher = Self {
            resolution,
            group_sizes,
            dispatches: AtomicU64::new(0),
        };
        dispatcher.validate()?;
        Ok(dispatcher)
    }

    fn validate(&self) -> Result<(), SimError> {
        for kernel in KernelId::ALL {
            let domain = kernel.domain(self.resolution).ok_or_else(|| {
                SimError::Misconfigured(format!(
                    "resolution {} overflows the thread domain of kernel '{}'",
                    self.resolution,
                    kernel.name()
                ))
            })?;
            let group = self.group_size(kernel);
            if (domain % group).cmpne(UVec3::ZERO).any() {
                return Err(SimError::Misconfigured(format!(
                    "resolution {} is not a multiple of kernel '{}' group size {:?} (domain {:?})",
                    self.resolution,
                    kernel.name(),
                    group.to_array(),
                    domain.to_array()
                )));
            }
        }
        Ok(())
    }

    #[inline]
    pub fn resolution(&self) -> u32 { self.resolution }

    #[inline]
    pub fn group_size(&self, kernel: KernelId) -> UVec3 {
        self.group_sizes[kernel.slot()]
    }

    pub fn groups(&self, kernel: KernelId) -> UVec3 {
        // Domains were checked in `new`.
        let domain = kernel.domain(self.resolution).unwrap_or(UVec3::ZERO);
        group_count(domain, self.group_size(kernel))
    }

    /// Total dispatches issued so far.
    pub fn dispatch_count(&self) -> u64 {
        self.dispatches.load(Ordering::Relaxed)
    }

    #[inline]
    fn record(&self) {
        self.dispatches.fetch_add(1, Ordering::Relaxed);
    }

    /// One thread per grid cell. `body(x, y, out)` writes the cell's output.
    pub fn dispatch_grid<T, F>(&self, kernel: KernelId, out: &mut [T], body: F)
    where
        T: Send,
        F: Fn(u32, u32, &mut T) + Sync + Send,
    {
        let n = self.resolution as usize;
        assert_eq!(
            out.len(),
            n * n,
            "dispatch_grid({}): output has {} elements, expected {}",
            kernel.name(),
            out.len(),
            n * n
        );

        let group = self.group_size(kernel);
        let groups = self.groups(kernel);
        let band_rows = group.y as usize;
        let covered_x = ((groups.x * group.x) as usize).min(n);

        let run_band = |(band, cells): (usize, &mut [T])| {
            for (row, line) in cells.chunks_mut(n).enumerate() {
                let y = (band * band_rows + row) as u32;
                for (x, cell) in line[..covered_x].iter_mut().enumerate() {
                    body(x as u32, y, cell);
                }
            }
        };

        #[cfg(feature = "parallel")]
        {
            out.par_chunks_mut(n * band_rows)
                .take(groups.y as usize)
                .enumerate()
                .for_each(run_band);
        }
        #[cfg(not(feature = "parallel"))]
        {
            out.chunks_mut(n * band_rows)
                .take(groups.y as usize)
                .enumerate()
                .for_each(run_band);
        }

        self.record();
    }

    /// One thread per buffer element, in index order.
    pub fn dispatch_linear<T, F>(&self, kernel: KernelId, out: &mut [T], body: F)
    where
        T: Send,
        F: Fn(usize, &mut T) + Sync + Send,
    {
        let group = self.group_size(kernel).x as usize;
        let groups = (out.len() / group).min(self.groups(kernel).x as usize);

        let run_group = |(g, cells): (usize, &mut [T])| {
            for (i, cell) in cells.iter_mut().enumerate() {
                body(g * group + i, cell);
            }
        };

        #[cfg(feature = "parallel")]
        {
            out.par_chunks_mut(group).take(groups).enumerate().for_each(run_group);
        }
        #[cfg(not(feature = "parallel"))]
        {
            out.chunks_mut(group).take(groups).enumerate().for_each(run_group);
        }

        self.record();
    }

    /// One thread per border cell: `4·N` threads, edge by edge (bottom, top,
    /// left, right). Corners are visited once per adjacent edge.
    ///
    /// Border cells are scattered across the buffer, so this runs serially.
    pub fn dispatch_border<T, F>(&self, kernel: KernelId, out: &mut [T], mut body: F)
    where
        F: FnMut(u32, u32, &mut T),
    {
        let n = self.resolution;
        let threads = self.groups(kernel).x * self.group_size(kernel).x;

        for t in 0..threads.min(4 * n) {
            let i = t % n;
            let (x, y) = match t / n {
                0 => (i, 0),
                1 => (i, n - 1),
                2 => (0, i),
                _ => (n - 1, i),
            };
            let idx = (y as usize) * (n as usize) + (x as usize);
            body(x, y, &mut out[idx]);
        }

        self.record();
    }
}
