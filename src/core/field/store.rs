use super::*;

/// The five shared simulation buffers.
///
/// Allocated together, same shape for the whole run, released together.
pub struct FieldStore {
    resolution: u32,
    pub(crate) velocity: Field,
    pub(crate) divergence: Field,
    pub(crate) pressure: Field,
    pub(crate) temp: Field,
    pub(crate) dye: Field,
}

/// Mutable views needed by one projection pass.
pub struct ProjectionViews<'a> {
    pub field: &'a mut Field,
    pub divergence: &'a mut Field,
    pub pressure: &'a mut Field,
    pub temp: &'a mut Field,
}

impl FieldStore {
    /// Allocate all five buffers. If any allocation fails the ones already
    /// made are dropped and nothing partially initialized escapes.
    pub fn new(resolution: u32) -> Result<Self, SimError> {
        let alloc = |id: FieldId| Field::zeroed(resolution).map_err(|e| e.for_field(id.name()));
        Ok(Self {
            resolution,
            velocity: alloc(FieldId::Velocity)?,
            divergence: alloc(FieldId::Divergence)?,
            pressure: alloc(FieldId::Pressure)?,
            temp: alloc(FieldId::Temp)?,
            dye: alloc(FieldId::Dye)?,
        })
    }

    #[inline]
    pub fn resolution(&self) -> u32 { self.resolution }

    pub fn field(&self, id: FieldId) -> &Field {
        match id {
            FieldId::Velocity => &self.velocity,
            FieldId::Divergence => &self.divergence,
            FieldId::Pressure => &self.pressure,
            FieldId::Temp => &self.temp,
            FieldId::Dye => &self.dye,
        }
    }

    pub fn field_mut(&mut self, id: FieldId) -> &mut Field {
        match id {
            FieldId::Velocity => &mut self.velocity,
            FieldId::Divergence => &mut self.divergence,
            FieldId::Pressure => &mut self.pressure,
            FieldId::Temp => &mut self.temp,
            FieldId::Dye => &mut self.dye,
        }
    }

    pub fn velocity(&self) -> &Field { &self.velocity }

    pub fn dye(&self) -> &Field { &self.dye }

    /// Zero every buffer (keeps allocations).
    pub fn clear(&mut self) {
        for id in FieldId::ALL {
            self.field_mut(id).fill(Vec4::ZERO);
        }
    }

    pub fn memory_bytes(&self) -> usize {
        FieldId::ALL.iter().map(|id| self.field(*id).size_bytes()).sum()
    }

    /// Advection inputs: (source, velocity, temp).
    /// Source and velocity may be the same buffer; both are read-only here.
    pub(crate) fn advection_views(&mut self, quantity: Quantity) -> (&Field, &Field, &mut Field) {
        let FieldStore { velocity, dye, temp, .. } = self;
        let velocity: &Field = velocity;
        let source: &Field = match quantity {
            Quantity::Velocity => velocity,
            Quantity::Dye => dye,
        };
        (source, velocity, temp)
    }

    /// (target, temp) pair for ping-pong loops and copy-backs.
    pub(crate) fn with_temp(&mut self, quantity: Quantity) -> (&mut Field, &mut Field) {
        let FieldStore { velocity, dye, temp, .. } = self;
        let target = match quantity {
            Quantity::Velocity => velocity,
            Quantity::Dye => dye,
        };
        (target, temp)
    }

    pub(crate) fn projection_views(&mut self, quantity: Quantity) -> ProjectionViews<'_> {
        let FieldStore { velocity, divergence, pressure, temp, dye, .. } = self;
        let field = match quantity {
            Quantity::Velocity => velocity,
            Quantity::Dye => dye,
        };
        ProjectionViews { field, divergence, pressure, temp }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_allocates_five_identical_buffers() {
        let store = FieldStore::new(32).unwrap();
        for id in FieldId::ALL {
            let field = store.field(id);
            assert_eq!(field.resolution(), 32, "{} resolution", id.name());
            assert_eq!(field.len(), 32 * 32, "{} length", id.name());
        }
        assert_eq!(store.memory_bytes(), 5 * 32 * 32 * CELL_STRIDE);
    }

    #[test]
    fn clear_zeroes_every_buffer() {
        let mut store = FieldStore::new(16).unwrap();
        for id in FieldId::ALL {
            store.field_mut(id).fill(Vec4::ONE);
        }
        store.clear();
        for id in FieldId::ALL {
            assert_eq!(store.field(id).max_abs(), 0.0);
        }
    }

    #[test]
    fn views_point_at_the_requested_quantity() {
        let mut store = FieldStore::new(16).unwrap();
        store.dye.fill(Vec4::splat(2.0));
        store.velocity.fill(Vec4::splat(1.0));

        let (source, velocity, _temp) = store.advection_views(Quantity::Dye);
        assert_eq!(source.at(3, 3), Vec4::splat(2.0));
        assert_eq!(velocity.at(3, 3), Vec4::splat(1.0));

        let views = store.projection_views(Quantity::Velocity);
        assert_eq!(views.field.at(0, 0), Vec4::splat(1.0));
    }
}
