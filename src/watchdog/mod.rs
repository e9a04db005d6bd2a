pub mod inactivity;
pub mod navigator;

pub use inactivity::{spawn_watchdog, WatchdogEvent, WatchdogHandle, WatchdogPhase, WatchdogStatus};
pub use navigator::{KioskNavigator, Navigator, HOME_ROUTE};
