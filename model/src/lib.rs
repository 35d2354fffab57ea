//! Domain model of the digital twin temperature card.
//!
//! Nothing in here knows about the UI toolkit: the card is driven through [`DigitalTwin`], which
//! arms its periodic refresh on any [`Scheduler`] and reports every change as a [`TwinSnapshot`].

mod config;
mod reading;
mod scheduler;
mod source;
mod twin;

pub use config::{ConfigError, TwinConfig, CONFIG_ENV_VAR};
pub use reading::{classify, OutOfRange, Reading, TemperatureStatus};
pub use scheduler::{ManualHandle, ManualScheduler, Scheduler, Tick};
pub use source::{RandomReadingSource, ReadingSource, ReadingSourcePointer};
pub use twin::{DigitalTwin, MachineStatus, Observer, TwinSnapshot, REFRESH_PERIOD};
