use log::debug;
use std::time::Duration;

/// Timing and workload figures for the most recent world step.
#[derive(Debug, Default, Clone, Copy)]
pub struct StepProfile {
    pub integration_time: Duration,
    pub collision_time: Duration,
    pub total_time: Duration,

    pub body_count: usize,
    pub contact_count: usize,
    pub resolved_count: usize,
}

impl StepProfile {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Emits the profile at debug level.
    pub fn report(&self) {
        let total_us = self.total_time.as_micros() as f64;
        if total_us < 1.0 {
            return;
        }
        let share = |part: Duration| part.as_micros() as f64 / total_us * 100.0;

        debug!(
            "step: {} bodies, {} contacts ({} resolved), {:.3} ms total, integration {:.1}%, collision {:.1}%",
            self.body_count,
            self.contact_count,
            self.resolved_count,
            self.total_time.as_secs_f64() * 1000.0,
            share(self.integration_time),
            share(self.collision_time),
        );
    }
}
