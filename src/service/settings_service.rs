use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument, warn};

use crate::model::settings::{Settings, SettingsUpdate, MAX_TIMEOUT_SECONDS};
use crate::repository::settings_repo::SettingsRepository;
use crate::util::error::ServiceError;

#[async_trait]
pub trait SettingsService: Send + Sync {
    /// Reads the settings document; an absent document yields the defaults.
    async fn fetch(&self) -> Result<Settings, ServiceError>;
    /// Like `fetch`, falling back to the defaults when the store fails.
    async fn get(&self) -> Settings;
    async fn update(&self, update: SettingsUpdate) -> Result<Settings, ServiceError>;
    /// Re-reads the store and publishes a change. False when the read failed.
    async fn refresh(&self) -> bool;
    /// Fails closed: a store error never unlocks.
    async fn verify_pin(&self, pin: &str) -> Result<(), ServiceError>;
}

pub struct SettingsServiceImpl {
    pub settings_repo: Arc<dyn SettingsRepository>,
    current: watch::Sender<Settings>,
}

impl SettingsServiceImpl {
    pub fn new(settings_repo: Arc<dyn SettingsRepository>) -> Self {
        let (current, _) = watch::channel(Settings::watchdog_fallback());
        Self { settings_repo, current }
    }

    /// Receives every settings change; starts at the watchdog fallback
    /// until the first successful read.
    pub fn subscribe(&self) -> watch::Receiver<Settings> {
        self.current.subscribe()
    }

    fn publish(&self, settings: Settings) {
        self.current.send_if_modified(|current| {
            if *current == settings {
                false
            } else {
                debug!("Settings changed, notifying watchers");
                *current = settings;
                true
            }
        });
    }

    /// Polls the store every `period` so edits made outside the dashboard
    /// still reach the watchers.
    pub fn spawn_refresh(self: Arc<Self>, period: Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            loop {
                ticker.tick().await;
                self.refresh().await;
            }
        })
    }
}

#[async_trait]
impl SettingsService for SettingsServiceImpl {
    async fn fetch(&self) -> Result<Settings, ServiceError> {
        Ok(self.settings_repo.get().await?.unwrap_or_default())
    }

    async fn get(&self) -> Settings {
        match self.fetch().await {
            Ok(settings) => settings,
            Err(e) => {
                error!("Failed to read settings, using defaults: {e}");
                Settings::default()
            }
        }
    }

    #[instrument(skip(self, update))]
    async fn update(&self, update: SettingsUpdate) -> Result<Settings, ServiceError> {
        match update.timeout_seconds {
            Some(0) => return Err(ServiceError::InvalidInput("Timeout must be at least one second".to_string())),
            Some(secs) if secs > MAX_TIMEOUT_SECONDS => {
                return Err(ServiceError::InvalidInput(format!("Timeout cannot exceed {} seconds", MAX_TIMEOUT_SECONDS)))
            }
            _ => {}
        }
        if matches!(update.admin_pin.as_deref(), Some(pin) if pin.trim().is_empty()) {
            return Err(ServiceError::InvalidInput("PIN cannot be empty".to_string()));
        }
        self.settings_repo.merge(&update).await?;
        let settings = match self.fetch().await {
            Ok(settings) => settings,
            Err(e) => {
                warn!("Settings saved but re-read failed: {e}");
                let mut settings = self.current.borrow().clone();
                settings.apply(&update);
                settings
            }
        };
        info!("Settings updated");
        self.publish(settings.clone());
        Ok(settings)
    }

    async fn refresh(&self) -> bool {
        match self.fetch().await {
            Ok(settings) => {
                self.publish(settings);
                true
            }
            Err(e) => {
                warn!("Settings refresh failed, keeping previous values: {e}");
                false
            }
        }
    }

    async fn verify_pin(&self, pin: &str) -> Result<(), ServiceError> {
        let settings = self.fetch().await.map_err(|e| {
            error!("Cannot verify PIN, settings unavailable: {e}");
            ServiceError::InternalError("Settings are unavailable, try again".to_string())
        })?;
        if !settings.pin_enabled || settings.admin_pin == pin {
            return Ok(());
        }
        warn!("Admin unlock rejected");
        Err(ServiceError::Unauthorized("Incorrect PIN".to_string()))
    }
}
