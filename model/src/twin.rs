use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

use crate::reading::{Reading, TemperatureStatus};
use crate::scheduler::Scheduler;
use crate::source::ReadingSourcePointer;

/// Interval between automatic refreshes while monitoring.
pub const REFRESH_PERIOD: Duration = Duration::from_secs(5);

/// Called with the new state after every change.
pub type Observer = Rc<dyn Fn(&TwinSnapshot)>;

/// Whether the machine is being monitored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MachineStatus {
    Online,
    Standby,
}

impl MachineStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Online => "ONLINE",
            Self::Standby => "STANDBY",
        }
    }
}

/// The state of a twin at one point in time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TwinSnapshot {
    pub reading: Option<Reading>,
    pub monitoring: bool,
}

impl TwinSnapshot {
    pub fn status(&self) -> Option<TemperatureStatus> {
        self.reading.map(Reading::status)
    }

    pub fn machine_status(&self) -> MachineStatus {
        if self.monitoring {
            MachineStatus::Online
        } else {
            MachineStatus::Standby
        }
    }
}

enum Phase<H> {
    Idle,
    /// Holds the armed refresh schedule; leaving this phase cancels it.
    Monitoring(H),
}

struct TwinState<H> {
    reading: Option<Reading>,
    phase: Phase<H>,
    source: ReadingSourcePointer,
    observer: Option<Observer>,
}

impl<H> TwinState<H> {
    fn is_monitoring(&self) -> bool {
        matches!(self.phase, Phase::Monitoring(_))
    }

    fn snapshot(&self) -> TwinSnapshot {
        TwinSnapshot {
            reading: self.reading,
            monitoring: self.is_monitoring(),
        }
    }

    fn regenerate(&mut self) {
        let reading = self.source.next_reading();
        log::debug!("New reading: {reading} ({})", reading.status());

        self.reading = Some(reading);
    }
}

/// The simulated temperature display of one machine.
///
/// The twin is either idle or monitoring. Entering the monitoring state produces a reading right
/// away and arms a refresh every [`REFRESH_PERIOD`] on the given scheduler. Stopping, or dropping
/// the twin, releases that schedule so no refresh runs afterwards.
///
/// State changes are reported to the observer set with [`DigitalTwin::set_observer`]. The observer
/// must not hold a strong reference to the twin.
pub struct DigitalTwin<S: Scheduler> {
    state: Rc<RefCell<TwinState<S::Handle>>>,
    scheduler: S,
}

impl<S: Scheduler> DigitalTwin<S> {
    /// Creates an idle twin without a reading.
    pub fn new(scheduler: S, source: ReadingSourcePointer) -> Self {
        Self {
            state: Rc::new(RefCell::new(TwinState {
                reading: None,
                phase: Phase::Idle,
                source,
                observer: None,
            })),
            scheduler,
        }
    }

    pub fn snapshot(&self) -> TwinSnapshot {
        self.state.borrow().snapshot()
    }

    pub fn reading(&self) -> Option<Reading> {
        self.state.borrow().reading
    }

    pub fn is_monitoring(&self) -> bool {
        self.state.borrow().is_monitoring()
    }

    pub fn set_observer(&self, observer: impl Fn(&TwinSnapshot) + 'static) {
        self.state.borrow_mut().observer = Some(Rc::new(observer));
    }

    /// Shows a fresh reading and starts refreshing it periodically.
    ///
    /// Starting an already monitoring twin restarts the period.
    pub fn start(&self) {
        let state = Rc::downgrade(&self.state);
        let handle = self
            .scheduler
            .schedule_repeating(REFRESH_PERIOD, Box::new(move || refresh(&state)));

        let previous = {
            let mut state = self.state.borrow_mut();
            state.regenerate();
            std::mem::replace(&mut state.phase, Phase::Monitoring(handle))
        };

        if let Phase::Monitoring(previous) = previous {
            log::info!("Restarting temperature monitoring");
            drop(previous);
        } else {
            log::info!("Temperature monitoring started");
        }

        self.notify();
    }

    /// Stops refreshing. The last reading stays.
    pub fn stop(&self) {
        let previous = std::mem::replace(&mut self.state.borrow_mut().phase, Phase::Idle);

        match previous {
            Phase::Idle => {}
            Phase::Monitoring(handle) => {
                drop(handle);
                log::info!("Temperature monitoring stopped");
                self.notify();
            }
        }
    }

    /// Starts when idle, stops when monitoring.
    pub fn toggle(&self) {
        if self.is_monitoring() {
            self.stop();
        } else {
            self.start();
        }
    }

    fn notify(&self) {
        notify(&self.state);
    }
}

impl<S: Scheduler> Drop for DigitalTwin<S> {
    fn drop(&mut self) {
        let previous = std::mem::replace(&mut self.state.borrow_mut().phase, Phase::Idle);

        if let Phase::Monitoring(handle) = previous {
            drop(handle);
            log::info!("Digital twin dropped while monitoring, refresh cancelled");
        }
    }
}

fn refresh<H>(state: &Weak<RefCell<TwinState<H>>>) {
    let Some(state) = state.upgrade() else {
        return;
    };

    {
        let mut state = state.borrow_mut();
        if !state.is_monitoring() {
            return;
        }
        state.regenerate();
    }

    notify(&state);
}

fn notify<H>(state: &RefCell<TwinState<H>>) {
    let (snapshot, observer) = {
        let state = state.borrow();
        (state.snapshot(), state.observer.clone())
    };

    if let Some(observer) = observer {
        observer(&snapshot);
    }
}
