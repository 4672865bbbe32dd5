//! `timerec` - bounded recording-timer scheduler
//!
//! This library provides a fixed-capacity, gap-free store of recording
//! timers, a polling software watchdog, and the operator session that drives
//! both from a digit-only console menu.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod clock;
pub mod config;
pub mod console;
pub mod error;
pub mod format;
pub mod logging;
pub mod record;
pub mod session;
pub mod store;
pub mod watchdog;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::Config;
pub use console::Console;
pub use error::{Error, Result};
pub use format::format_record;
pub use logging::init_logging;
pub use record::{Record, TimeOfDay};
pub use session::Session;
pub use store::RecordStore;
pub use watchdog::{Watchdog, WatchdogStatus};
