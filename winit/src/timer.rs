use std::time::Duration;

use digital_twin_model::{Scheduler, Tick};

/// Arms repeating callbacks as Slint timers on the UI event loop.
///
/// Slint stops a timer when it is dropped, so the timer itself is the handle.
#[derive(Clone, Copy, Debug, Default)]
pub struct SlintScheduler;

impl Scheduler for SlintScheduler {
    type Handle = slint::Timer;

    fn schedule_repeating(&self, period: Duration, mut tick: Tick) -> slint::Timer {
        let timer = slint::Timer::default();
        timer.start(slint::TimerMode::Repeated, period, move || tick());

        timer
    }
}
