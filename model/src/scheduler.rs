use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

/// Callback run on every firing of a repeating schedule.
pub type Tick = Box<dyn FnMut()>;

/// Arms repeating callbacks on the event loop.
pub trait Scheduler {
    /// Keeps the schedule armed. Dropping it cancels every future firing.
    type Handle: 'static;

    /// Runs `tick` every `period`, the first time one `period` from now.
    fn schedule_repeating(&self, period: Duration, tick: Tick) -> Self::Handle;
}

/// A scheduler driven by a mock clock that only moves when [`ManualScheduler::advance`] is called.
///
/// Clones share the same clock.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    clock: Rc<RefCell<ManualClock>>,
}

#[derive(Default)]
struct ManualClock {
    now: Duration,
    next_id: u64,
    entries: Vec<Entry>,
}

struct Entry {
    id: u64,
    period: Duration,
    next_due: Duration,
    // `None` while the tick is running.
    tick: Option<Tick>,
}

/// Handle of a schedule armed on a [`ManualScheduler`].
pub struct ManualHandle {
    id: u64,
    clock: Weak<RefCell<ManualClock>>,
}

impl Drop for ManualHandle {
    fn drop(&mut self) {
        if let Some(clock) = self.clock.upgrade() {
            clock.borrow_mut().entries.retain(|entry| entry.id != self.id);
        }
    }
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mock time elapsed since the scheduler was created.
    pub fn now(&self) -> Duration {
        self.clock.borrow().now
    }

    /// Number of schedules that are still armed.
    pub fn active(&self) -> usize {
        self.clock.borrow().entries.len()
    }

    /// Moves the clock forward by `by`, running every tick that falls due on the way in time order.
    pub fn advance(&self, by: Duration) {
        let target = self.clock.borrow().now + by;

        while let Some(id) = self.next_due(target) {
            let tick = {
                let mut clock = self.clock.borrow_mut();
                let ManualClock { now, entries, .. } = &mut *clock;

                let Some(entry) = entries.iter_mut().find(|entry| entry.id == id) else {
                    continue;
                };
                *now = entry.next_due;
                entry.next_due += entry.period;
                entry.tick.take()
            };

            let Some(mut tick) = tick else {
                continue;
            };
            tick();

            // The schedule may have been cancelled by its own tick.
            if let Some(entry) = self
                .clock
                .borrow_mut()
                .entries
                .iter_mut()
                .find(|entry| entry.id == id)
            {
                entry.tick = Some(tick);
            }
        }

        self.clock.borrow_mut().now = target;
    }

    fn next_due(&self, target: Duration) -> Option<u64> {
        self.clock
            .borrow()
            .entries
            .iter()
            .filter(|entry| entry.tick.is_some() && entry.next_due <= target)
            .min_by_key(|entry| (entry.next_due, entry.id))
            .map(|entry| entry.id)
    }
}

impl Scheduler for ManualScheduler {
    type Handle = ManualHandle;

    /// # Panics
    ///
    /// If `period` is zero, since the clock could then never move past the first firing.
    fn schedule_repeating(&self, period: Duration, tick: Tick) -> ManualHandle {
        assert!(!period.is_zero(), "a repeating schedule needs a non-zero period");

        let mut clock = self.clock.borrow_mut();
        let id = clock.next_id;
        clock.next_id += 1;

        let next_due = clock.now + period;
        clock.entries.push(Entry {
            id,
            period,
            next_due,
            tick: Some(tick),
        });

        ManualHandle {
            id,
            clock: Rc::downgrade(&self.clock),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn counter(scheduler: &ManualScheduler, period: Duration) -> (Rc<Cell<u32>>, ManualHandle) {
        let count = Rc::new(Cell::new(0));
        let handle = scheduler.schedule_repeating(period, {
            let count = count.clone();
            Box::new(move || count.set(count.get() + 1))
        });

        (count, handle)
    }

    #[test]
    fn test_fires_once_per_period() {
        let scheduler = ManualScheduler::new();
        let (count, _handle) = counter(&scheduler, Duration::from_secs(5));

        scheduler.advance(Duration::from_millis(4999));
        assert_eq!(count.get(), 0);

        scheduler.advance(Duration::from_millis(1));
        assert_eq!(count.get(), 1);

        scheduler.advance(Duration::from_secs(10));
        assert_eq!(count.get(), 3);
        assert_eq!(scheduler.now(), Duration::from_secs(15));
    }

    #[test]
    fn test_dropping_handle_cancels() {
        let scheduler = ManualScheduler::new();
        let (count, handle) = counter(&scheduler, Duration::from_secs(1));

        scheduler.advance(Duration::from_secs(2));
        assert_eq!(count.get(), 2);
        assert_eq!(scheduler.active(), 1);

        drop(handle);
        assert_eq!(scheduler.active(), 0);

        scheduler.advance(Duration::from_secs(10));
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn test_ticks_run_in_time_order() {
        let scheduler = ManualScheduler::new();
        let order = Rc::new(RefCell::new(Vec::new()));

        let _handles: Vec<_> = [(3, 'a'), (2, 'b')]
            .into_iter()
            .map(|(secs, name)| {
                let order = order.clone();
                scheduler.schedule_repeating(
                    Duration::from_secs(secs),
                    Box::new(move || order.borrow_mut().push(name)),
                )
            })
            .collect();

        scheduler.advance(Duration::from_secs(6));
        assert_eq!(*order.borrow(), vec!['b', 'a', 'b', 'a', 'b']);
    }

    #[test]
    #[should_panic(expected = "non-zero period")]
    fn test_zero_period_panics() {
        let scheduler = ManualScheduler::new();
        let _handle = scheduler.schedule_repeating(Duration::ZERO, Box::new(|| {}));
    }

    #[test]
    fn test_tick_can_cancel_itself() {
        let scheduler = ManualScheduler::new();
        let slot: Rc<RefCell<Option<ManualHandle>>> = Rc::default();
        let count = Rc::new(Cell::new(0));

        let handle = scheduler.schedule_repeating(Duration::from_secs(1), {
            let slot = slot.clone();
            let count = count.clone();
            Box::new(move || {
                count.set(count.get() + 1);
                slot.borrow_mut().take();
            })
        });
        *slot.borrow_mut() = Some(handle);

        scheduler.advance(Duration::from_secs(5));
        assert_eq!(count.get(), 1);
        assert_eq!(scheduler.active(), 0);
    }
}
