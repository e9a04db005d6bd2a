//! Idle timeout with an "are you still there?" countdown.
//!
//! One task owns both timers. The idle deadline is armed while the kiosk is
//! enabled and off the home/admin routes; when it fires a countdown starts,
//! ticking once per second. Reaching zero closes every overlay and sends the
//! kiosk back home.

use std::future::pending;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, sleep_until, Instant, Interval};
use tracing::{debug, info, warn};

use crate::model::settings::Settings;
use crate::watchdog::navigator::{is_suspended_route, Navigator, HOME_ROUTE};

const EVENT_BUFFER: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchdogEvent {
    Interaction,
    RouteChanged,
}

#[derive(Debug)]
enum Command {
    Event(WatchdogEvent),
    Shutdown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WatchdogPhase {
    Idle,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchdogStatus {
    pub phase: WatchdogPhase,
    /// Seconds left before the kiosk resets; only set while warning.
    pub countdown: Option<u32>,
    pub enabled: bool,
    pub suspended: bool,
}

/// Cloneable control surface for the watchdog task.
#[derive(Clone)]
pub struct WatchdogHandle {
    commands: mpsc::Sender<Command>,
    status: watch::Receiver<WatchdogStatus>,
}

impl WatchdogHandle {
    async fn send(&self, command: Command) -> bool {
        self.commands.send(command).await.is_ok()
    }

    /// Any touch on the screen. Returns false once the task has stopped.
    pub async fn interact(&self) -> bool {
        self.send(Command::Event(WatchdogEvent::Interaction)).await
    }

    pub async fn route_changed(&self) -> bool {
        self.send(Command::Event(WatchdogEvent::RouteChanged)).await
    }

    pub async fn shutdown(&self) {
        let _ = self.send(Command::Shutdown).await;
    }

    pub fn status(&self) -> WatchdogStatus {
        self.status.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<WatchdogStatus> {
        self.status.clone()
    }
}

struct Watchdog {
    navigator: Arc<dyn Navigator>,
    settings: Settings,
    warning_seconds: u32,
    phase: WatchdogPhase,
    countdown: u32,
    idle_deadline: Option<Instant>,
    ticker: Option<Interval>,
    status: watch::Sender<WatchdogStatus>,
}

impl Watchdog {
    fn suspended(&self) -> bool {
        is_suspended_route(&self.navigator.current_path())
    }

    fn snapshot(&self) -> WatchdogStatus {
        WatchdogStatus {
            phase: self.phase,
            countdown: match self.phase {
                WatchdogPhase::Warning => Some(self.countdown),
                WatchdogPhase::Idle => None,
            },
            enabled: self.settings.timeout_enabled,
            suspended: self.suspended(),
        }
    }

    fn publish(&self) {
        let next = self.snapshot();
        self.status.send_if_modified(|current| {
            if *current == next {
                false
            } else {
                *current = next;
                true
            }
        });
    }

    /// Drops both timers and, when allowed, arms a fresh idle deadline.
    fn rearm(&mut self) {
        self.phase = WatchdogPhase::Idle;
        self.ticker = None;
        self.idle_deadline = if self.settings.timeout_enabled && !self.suspended() {
            Instant::now().checked_add(self.settings.idle_timeout())
        } else {
            None
        };
    }

    fn on_event(&mut self, event: WatchdogEvent) {
        if self.phase == WatchdogPhase::Warning {
            info!(?event, remaining = self.countdown, "Shopper is still here, warning dismissed");
        }
        self.rearm();
    }

    fn on_settings(&mut self, settings: Settings) {
        let was_enabled = self.settings.timeout_enabled;
        let timeout_changed = settings.timeout_seconds != self.settings.timeout_seconds;
        self.settings = settings;

        if !self.settings.timeout_enabled {
            if self.phase == WatchdogPhase::Warning {
                info!("Inactivity timeout disabled, warning cancelled");
            }
            self.rearm();
        } else if self.phase == WatchdogPhase::Idle && (!was_enabled || timeout_changed) {
            debug!(timeout = self.settings.timeout_seconds, "Idle timer re-armed with new settings");
            self.rearm();
        }
    }

    fn on_deadline(&mut self) {
        self.idle_deadline = None;
        if !self.settings.timeout_enabled || self.suspended() {
            return;
        }
        info!(seconds = self.warning_seconds, "Kiosk idle, starting countdown");
        self.phase = WatchdogPhase::Warning;
        self.countdown = self.warning_seconds;
        let period = Duration::from_secs(1);
        self.ticker = Some(interval_at(Instant::now() + period, period));
    }

    fn on_tick(&mut self) {
        self.countdown = self.countdown.saturating_sub(1);
        if self.countdown > 0 {
            return;
        }
        info!("Countdown elapsed, returning kiosk to home");
        self.ticker = None;
        self.navigator.dismiss_all();
        self.navigator.replace(HOME_ROUTE);
        self.rearm();
    }

    async fn run(mut self, mut commands: mpsc::Receiver<Command>, mut settings: watch::Receiver<Settings>) {
        let mut settings_open = true;
        self.rearm();
        self.publish();

        loop {
            let deadline = self.idle_deadline;
            tokio::select! {
                command = commands.recv() => match command {
                    Some(Command::Event(event)) => self.on_event(event),
                    Some(Command::Shutdown) | None => break,
                },
                changed = settings.changed(), if settings_open => match changed {
                    Ok(()) => {
                        let next = settings.borrow_and_update().clone();
                        self.on_settings(next);
                    }
                    Err(_) => {
                        warn!("Settings channel closed, keeping last known settings");
                        settings_open = false;
                    }
                },
                _ = sleep_opt(deadline) => self.on_deadline(),
                _ = tick_opt(&mut self.ticker) => self.on_tick(),
            }
            self.publish();
        }
        info!("Inactivity watchdog stopped");
    }
}

async fn sleep_opt(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => pending().await,
    }
}

async fn tick_opt(ticker: &mut Option<Interval>) {
    match ticker {
        Some(ticker) => {
            ticker.tick().await;
        }
        None => pending().await,
    }
}

/// Starts the watchdog on the current runtime.
///
/// `warning_seconds` is the countdown length. The task ends on
/// [`WatchdogHandle::shutdown`] or once every handle is dropped.
pub fn spawn_watchdog(
    navigator: Arc<dyn Navigator>,
    settings: watch::Receiver<Settings>,
    warning_seconds: u32,
) -> (WatchdogHandle, JoinHandle<()>) {
    let (command_tx, command_rx) = mpsc::channel(EVENT_BUFFER);
    let initial = settings.borrow().clone();
    let (status_tx, status_rx) = watch::channel(WatchdogStatus {
        phase: WatchdogPhase::Idle,
        countdown: None,
        enabled: initial.timeout_enabled,
        suspended: is_suspended_route(&navigator.current_path()),
    });

    let watchdog = Watchdog {
        navigator,
        settings: initial,
        warning_seconds: warning_seconds.max(1),
        phase: WatchdogPhase::Idle,
        countdown: 0,
        idle_deadline: None,
        ticker: None,
        status: status_tx,
    };
    let task = tokio::spawn(watchdog.run(command_rx, settings));
    (WatchdogHandle { commands: command_tx, status: status_rx }, task)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::watchdog::navigator::KioskNavigator;

    fn enabled(timeout_seconds: u64) -> Settings {
        Settings { timeout_enabled: true, timeout_seconds, ..Settings::default() }
    }

    async fn advance(secs: f64) {
        tokio::time::sleep(Duration::from_secs_f64(secs)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_warning_then_reset_home() {
        let nav = Arc::new(KioskNavigator::new());
        nav.push("/catalog");
        nav.push("/fragrance/abc");
        nav.open_overlay();
        let (_tx, rx) = watch::channel(enabled(5));
        let (handle, _task) = spawn_watchdog(nav.clone(), rx, 10);

        advance(5.5).await;
        let status = handle.status();
        assert_eq!(status.phase, WatchdogPhase::Warning);
        assert_eq!(status.countdown, Some(10));

        advance(3.0).await;
        assert_eq!(handle.status().countdown, Some(7));

        advance(7.0).await;
        assert_eq!(handle.status().phase, WatchdogPhase::Idle);
        assert_eq!(nav.current_path(), "/");
        assert_eq!(nav.overlay_count(), 0);
        assert!(handle.status().suspended);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_timer_on_home() {
        let nav = Arc::new(KioskNavigator::new());
        let (_tx, rx) = watch::channel(enabled(2));
        let (handle, _task) = spawn_watchdog(nav, rx, 10);
        advance(30.0).await;
        assert_eq!(handle.status().phase, WatchdogPhase::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_oversized_timeout_is_capped() {
        let nav = Arc::new(KioskNavigator::new());
        let (_tx, rx) = watch::channel(enabled(u64::MAX / 2));
        let (handle, _task) = spawn_watchdog(nav.clone(), rx, 10);
        nav.push("/catalog");
        assert!(handle.route_changed().await);

        advance(3_600.0).await;
        assert_eq!(handle.status().phase, WatchdogPhase::Idle);
        assert!(handle.interact().await);

        advance(86_400.5).await;
        assert_eq!(handle.status().phase, WatchdogPhase::Warning);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_stops_task() {
        let nav = Arc::new(KioskNavigator::new());
        let (_tx, rx) = watch::channel(enabled(2));
        let (handle, task) = spawn_watchdog(nav, rx, 10);
        handle.shutdown().await;
        task.await.unwrap();
        assert!(!handle.interact().await);
    }
}
