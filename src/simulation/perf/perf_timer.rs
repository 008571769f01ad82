//! Stage timing: the JS clock on wasm (no `Instant` there), `Instant` natively.

#[derive(Clone, Copy)]
pub(crate) struct PerfTimer {
    #[cfg(target_arch = "wasm32")]
    start_ms: f64,
    #[cfg(not(target_arch = "wasm32"))]
    start: std::time::Instant,
}

impl PerfTimer {
    #[cfg(target_arch = "wasm32")]
    pub(crate) fn start() -> Self {
        PerfTimer { start_ms: js_sys::Date::now() }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub(crate) fn start() -> Self {
        PerfTimer { start: std::time::Instant::now() }
    }

    #[cfg(target_arch = "wasm32")]
    pub(crate) fn elapsed_ms(&self) -> f64 {
        js_sys::Date::now() - self.start_ms
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub(crate) fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }

    /// Add the elapsed time onto a stats slot.
    pub(crate) fn add_to(self, slot: &mut f64) {
        *slot += self.elapsed_ms();
    }
}

/// Start a timer only when perf metrics are on.
#[inline]
pub(crate) fn start_if(enabled: bool) -> Option<PerfTimer> {
    enabled.then(PerfTimer::start)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_timer_is_never_started() {
        assert!(start_if(false).is_none());
        let mut slot = 1.0;
        start_if(true).unwrap().add_to(&mut slot);
        assert!(slot >= 1.0);
    }
}
