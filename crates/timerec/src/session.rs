//! Interactive operator session.
//!
//! A [`Session`] owns the record store and the watchdog and drives both from
//! a menu loop over a [`Console`]. Each iteration reads one selection, lets
//! the watchdog observe how long the operator took, kicks it, and then
//! dispatches the selection.

use std::io::{BufRead, Write};

use tracing::{info, warn};

use crate::clock::Clock;
use crate::console::Console;
use crate::error::{Error, Result};
use crate::format::LIST_HEADER;
use crate::record::{Record, TimeOfDay};
use crate::store::RecordStore;
use crate::watchdog::{Watchdog, WatchdogStatus};

const MENU: &str = "\
**************************************************
*                  Timer Menu                    *
*                                                *
* 1) Add a timer                                 *
* 2) Remove a timer                              *
* 3) List all timers                             *
* 4) Show time                                   *
* 5) Watchdog status                             *
*                                                *
* 9) Exit                                        *
**************************************************

Enter selection, when done press <enter> > ";

const NOT_ADDED: &str = "\nError ... timer not added!\n";

/// A menu selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    /// Prompt for and add a timer.
    Add,
    /// Prompt for a record number and remove it.
    Remove,
    /// List all timers.
    List,
    /// Show the current date and time.
    ShowTime,
    /// Show the watchdog state.
    WatchdogStatus,
    /// Leave the session.
    Exit,
    /// Anything else.
    Invalid(u32),
}

impl From<u32> for MenuAction {
    fn from(choice: u32) -> Self {
        match choice {
            1 => Self::Add,
            2 => Self::Remove,
            3 => Self::List,
            4 => Self::ShowTime,
            5 => Self::WatchdogStatus,
            9 => Self::Exit,
            other => Self::Invalid(other),
        }
    }
}

/// Raw operator answers for a new timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerEntry {
    /// Start hour as entered.
    pub start_hour: u32,
    /// Start minute as entered.
    pub start_minute: u32,
    /// End hour as entered.
    pub end_hour: u32,
    /// End minute as entered.
    pub end_minute: u32,
    /// Channel as entered.
    pub channel: u32,
}

impl TimerEntry {
    /// Validate the answers into a record.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTime`] if either time is out of range.
    pub fn into_record(self) -> Result<Record> {
        let start = TimeOfDay::new(self.start_hour, self.start_minute)?;
        let end = TimeOfDay::new(self.end_hour, self.end_minute)?;
        Ok(Record::new(start, end, self.channel))
    }
}

/// Map an operator-facing 1-based record number to a store index.
///
/// Record number 0 has no index.
#[must_use]
pub fn record_index(number: u32) -> Option<usize> {
    usize::try_from(number).ok()?.checked_sub(1)
}

/// Menu-driven session over a store and a watchdog.
#[derive(Debug)]
pub struct Session<R, W, C: Clock> {
    console: Console<R, W>,
    store: RecordStore,
    watchdog: Watchdog<C>,
}

impl<R: BufRead, W: Write, C: Clock> Session<R, W, C> {
    /// Create a session. The watchdog is used in whatever state it is
    /// handed over in.
    pub fn new(console: Console<R, W>, store: RecordStore, watchdog: Watchdog<C>) -> Self {
        Self {
            console,
            store,
            watchdog,
        }
    }

    /// Run the menu loop until the operator exits or input ends, then tear
    /// down the store and the watchdog.
    ///
    /// # Errors
    ///
    /// Returns an error if the console fails.
    pub fn run(&mut self) -> Result<()> {
        info!(
            capacity = self.store.capacity(),
            watchdog = %self.watchdog.status(),
            "Session started"
        );

        while self.step()? {}

        self.console.print("\nGoodbye\n\n")?;
        self.shutdown();
        Ok(())
    }

    /// Show the menu, read one selection and act on it.
    ///
    /// Returns `false` when the session should end.
    ///
    /// # Errors
    ///
    /// Returns an error if the console fails.
    pub fn step(&mut self) -> Result<bool> {
        self.console.print(MENU)?;
        let Some(choice) = self.console.read_number()? else {
            return Ok(false);
        };

        self.supervise()?;

        match MenuAction::from(choice) {
            MenuAction::Add => self.add_timer()?,
            MenuAction::Remove => self.remove_timer()?,
            MenuAction::List => self.list_timers()?,
            MenuAction::ShowTime => self.show_time()?,
            MenuAction::WatchdogStatus => self.show_watchdog()?,
            MenuAction::Exit => return Ok(false),
            MenuAction::Invalid(choice) => {
                warn!(choice, "Invalid menu selection");
                self.console.print("\nInvalid Action ... try again!\n")?;
            }
        }
        Ok(true)
    }

    /// Clear every timer and disable the watchdog.
    pub fn shutdown(&mut self) {
        self.store.clear_all();
        self.watchdog.disable();
        info!("Session ended");
    }

    /// The record store.
    #[must_use]
    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// The watchdog.
    #[must_use]
    pub fn watchdog(&self) -> &Watchdog<C> {
        &self.watchdog
    }

    /// Consume the session, returning the console.
    pub fn into_console(self) -> Console<R, W> {
        self.console
    }

    fn supervise(&mut self) -> Result<()> {
        if self.watchdog.check() {
            self.console.print(&format!(
                "\n*** Watchdog expired: no activity for {}s ***\n",
                self.watchdog.timeout().as_secs()
            ))?;
        }
        self.watchdog.kick();
        Ok(())
    }

    fn prompt(&mut self, text: &str) -> Result<Option<u32>> {
        self.console.print(text)?;
        self.console.read_number()
    }

    fn query_entry(&mut self) -> Result<Option<TimerEntry>> {
        let Some(start_hour) = self.prompt("Please enter the start hour [0-23] > ")? else {
            return Ok(None);
        };
        let Some(start_minute) = self.prompt("Please enter the start minute [0-59] > ")? else {
            return Ok(None);
        };
        let Some(end_hour) = self.prompt("\nPlease enter the end hour [0-23] > ")? else {
            return Ok(None);
        };
        let Some(end_minute) = self.prompt("\nPlease enter the end minute [0-59] > ")? else {
            return Ok(None);
        };
        let Some(channel) = self.prompt("\nPlease enter the channel to record > ")? else {
            return Ok(None);
        };

        Ok(Some(TimerEntry {
            start_hour,
            start_minute,
            end_hour,
            end_minute,
            channel,
        }))
    }

    fn add_timer(&mut self) -> Result<()> {
        let Some(entry) = self.query_entry()? else {
            return self.console.print(NOT_ADDED);
        };

        match entry.into_record().and_then(|record| self.store.add(record)) {
            Ok(index) => {
                info!(record_number = index + 1, "Timer added");
                self.console.print("\nTimer added!\n")
            }
            Err(Error::CapacityExceeded { .. }) => self
                .console
                .print("\nAll timers used ... timer not added\n"),
            Err(err) if err.is_recoverable() => {
                warn!(%err, "Timer rejected");
                self.console.print(NOT_ADDED)
            }
            Err(err) => Err(err),
        }
    }

    fn remove_timer(&mut self) -> Result<()> {
        let Some(number) = self.prompt("Which timer should I nuke? > ")? else {
            return Ok(());
        };

        let removed = match record_index(number) {
            Some(index) => self.store.delete(index).is_ok(),
            None => {
                warn!(number, "Record numbers start at 1");
                false
            }
        };

        if removed {
            info!(record_number = number, "Timer removed");
            self.console.print("\nTimer removed!\n")
        } else {
            self.console.print("\nNo such timer\n")
        }
    }

    fn list_timers(&mut self) -> Result<()> {
        let mut listing = String::from("\n\nCurrent Set Timers\n");
        listing.push_str(LIST_HEADER);
        for line in (0..self.store.count()).filter_map(|i| self.store.format(i)) {
            listing.push_str(&line);
        }
        listing.push_str("\n\n");
        self.console.print(&listing)
    }

    fn show_time(&mut self) -> Result<()> {
        let now = self.watchdog.clock().wall_time();
        self.console.print(&format!(
            "\n\nCurrent Time and Date is {}\n\n",
            now.format("%a %b %e %H:%M:%S %Y")
        ))
    }

    fn show_watchdog(&mut self) -> Result<()> {
        let text = match self.watchdog.status() {
            WatchdogStatus::Armed => format!(
                "\nWatchdog armed, {:.1}s remaining\n",
                self.watchdog.time_remaining().as_secs_f64()
            ),
            status => format!("\nWatchdog {status}\n"),
        };
        self.console.print(&text)
    }
}
