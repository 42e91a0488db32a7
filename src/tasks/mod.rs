//! Embassy tasks - one per tick source, plus the die temperature monitor.
//!
//! Every task borrows the shared [`SystemState`] for a single
//! constant-time step and releases it before awaiting or touching
//! hardware.

pub mod clock;
pub mod die_temp;
pub mod sensor;
pub mod ui;

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use thermoclock::SystemState;

static SYSTEM: Mutex<CriticalSectionRawMutex, RefCell<SystemState>> =
    Mutex::new(RefCell::new(SystemState::new()));

/// Run `f` with exclusive access to the system state.
pub fn with_state<R>(f: impl FnOnce(&mut SystemState) -> R) -> R {
    SYSTEM.lock(|cell| f(&mut cell.borrow_mut()))
}
