use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use tracing::{debug, error, info, warn};

use crate::config::ConfigError;

/// Tunables for the kiosk behaviour that are not stored in the settings document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KioskConfig {
    /// Length of the "are you still there?" countdown, in seconds
    pub warning_seconds: u32,
    /// How often the settings document is re-read from the store
    pub settings_poll_secs: u64,
    /// Number of quiz recommendations returned
    pub recommendation_limit: usize,
    /// Days a welcome coupon stays valid
    pub coupon_validity_days: i64,
    /// Discount label printed on welcome coupons
    pub coupon_discount: String,
}

fn read_var<T: FromStr>(name: &str, default: T) -> Result<T, ConfigError>
where
    T: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw.trim().parse::<T>().map_err(|_| {
            error!("Invalid {} value: {}", name, raw);
            ConfigError::InvalidValue(format!("Invalid {} value", name))
        }),
        Err(_) => {
            debug!("{} not set, using default: {}", name, default);
            Ok(default)
        }
    }
}

impl KioskConfig {
    /// Load kiosk tunables from environment variables
    ///
    /// - KIOSK_WARNING_SECONDS (defaults to 10)
    /// - KIOSK_SETTINGS_POLL_SECS (defaults to 10)
    /// - KIOSK_RECOMMENDATION_LIMIT (defaults to 3)
    /// - KIOSK_COUPON_VALIDITY_DAYS (defaults to 30)
    /// - KIOSK_COUPON_DISCOUNT (defaults to "10% OFF")
    pub fn from_env() -> Result<Self, ConfigError> {
        info!("Loading kiosk configuration from environment variables");
        let defaults = KioskConfig::default();

        let coupon_discount = env::var("KIOSK_COUPON_DISCOUNT").unwrap_or_else(|_| {
            warn!("KIOSK_COUPON_DISCOUNT not set, using default: {}", defaults.coupon_discount);
            defaults.coupon_discount.clone()
        });

        let config = KioskConfig {
            warning_seconds: read_var("KIOSK_WARNING_SECONDS", defaults.warning_seconds)?,
            settings_poll_secs: read_var("KIOSK_SETTINGS_POLL_SECS", defaults.settings_poll_secs)?,
            recommendation_limit: read_var("KIOSK_RECOMMENDATION_LIMIT", defaults.recommendation_limit)?,
            coupon_validity_days: read_var("KIOSK_COUPON_VALIDITY_DAYS", defaults.coupon_validity_days)?,
            coupon_discount,
        };

        config.validate()?;
        info!("Kiosk configuration loaded successfully");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.warning_seconds == 0 {
            return Err(ConfigError::ValidationError("Warning countdown must be at least 1 second".to_string()));
        }
        if self.settings_poll_secs == 0 {
            return Err(ConfigError::ValidationError("Settings poll interval must be greater than 0".to_string()));
        }
        if self.recommendation_limit == 0 {
            return Err(ConfigError::ValidationError("Recommendation limit must be greater than 0".to_string()));
        }
        if self.coupon_validity_days <= 0 {
            return Err(ConfigError::ValidationError("Coupon validity must be at least one day".to_string()));
        }
        if self.coupon_discount.trim().is_empty() {
            return Err(ConfigError::ValidationError("Coupon discount label cannot be empty".to_string()));
        }
        Ok(())
    }
}

impl Default for KioskConfig {
    fn default() -> Self {
        KioskConfig {
            warning_seconds: 10,
            settings_poll_secs: 10,
            recommendation_limit: 3,
            coupon_validity_days: 30,
            coupon_discount: "10% OFF".to_string(),
        }
    }
}
