use glam::Vec2;

/// Default host pointer position: centre of the domain.
pub const POINTER_CENTRE: Vec2 = Vec2::new(0.5, 0.5);

/// Map a normalized pointer position onto grid coordinates: clamp each
/// component to [0, 1], then scale by the resolution.
#[inline]
pub fn pointer_to_grid(normalized: Vec2, resolution: u32) -> Vec2 {
    normalized.clamp(Vec2::ZERO, Vec2::ONE) * resolution as f32
}

/// Pointer positions (grid coordinates) for the current and previous tick.
///
/// Before the first tick there is no previous position, so the first
/// displacement is zero rather than a jump from the origin.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MouseState {
    previous: Option<Vec2>,
    current: Option<Vec2>,
}

impl MouseState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shift current into previous and record the latest position.
    pub fn advance(&mut self, latest: Vec2) {
        self.previous = self.current;
        self.current = Some(latest);
    }

    pub fn previous(&self) -> Option<Vec2> { self.previous }

    pub fn current(&self) -> Option<Vec2> { self.current }

    /// current − previous, or zero until two positions are known.
    pub fn displacement(&self) -> Vec2 {
        match (self.previous, self.current) {
            (Some(prev), Some(cur)) => cur - prev,
            _ => Vec2::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_is_clamped_then_scaled() {
        assert_eq!(pointer_to_grid(Vec2::new(0.5, 0.25), 64), Vec2::new(32.0, 16.0));
        assert_eq!(pointer_to_grid(Vec2::new(-0.3, 1.7), 64), Vec2::new(0.0, 64.0));
    }

    #[test]
    fn first_advance_has_no_displacement() {
        let mut mouse = MouseState::new();
        assert_eq!(mouse.displacement(), Vec2::ZERO);

        mouse.advance(Vec2::new(40.0, 10.0));
        assert_eq!(mouse.previous(), None);
        assert_eq!(mouse.displacement(), Vec2::ZERO);

        mouse.advance(Vec2::new(42.0, 9.0));
        assert_eq!(mouse.previous(), Some(Vec2::new(40.0, 10.0)));
        assert_eq!(mouse.displacement(), Vec2::new(2.0, -1.0));
    }
}
