//! Back-office settings, read from the environment.

use thiserror::Error;

pub const ENV_PAGE_SIZE: &str = "MAISON_PAGE_SIZE";
pub const ENV_MAX_PAGE_SIZE: &str = "MAISON_MAX_PAGE_SIZE";
pub const ENV_LOW_STOCK: &str = "MAISON_LOW_STOCK";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SettingsError {
    #[error("{var} must be a non-negative integer, got {value:?}")]
    NotANumber { var: &'static str, value: String },

    #[error("{var} must be at least 1")]
    Zero { var: &'static str },

    #[error("default page size {default} exceeds maximum {max}")]
    PageSizeAboveMax { default: usize, max: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdminSettings {
    pub default_page_size: usize,
    pub max_page_size: usize,
    /// Variants at or below this stock show up on the dashboard.
    pub low_stock_threshold: i64,
}

impl Default for AdminSettings {
    fn default() -> Self {
        Self {
            default_page_size: 20,
            max_page_size: 100,
            low_stock_threshold: 5,
        }
    }
}

fn parse_var(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<u64>, SettingsError> {
    match lookup(var) {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|_| SettingsError::NotANumber { var, value: raw }),
    }
}

impl AdminSettings {
    /// Read settings from process environment variables; unset variables keep
    /// their defaults.
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SettingsError> {
        let mut settings = Self::default();

        if let Some(v) = parse_var(&lookup, ENV_PAGE_SIZE)? {
            if v == 0 {
                return Err(SettingsError::Zero { var: ENV_PAGE_SIZE });
            }
            settings.default_page_size = v as usize;
        }
        if let Some(v) = parse_var(&lookup, ENV_MAX_PAGE_SIZE)? {
            if v == 0 {
                return Err(SettingsError::Zero { var: ENV_MAX_PAGE_SIZE });
            }
            settings.max_page_size = v as usize;
        }
        if let Some(v) = parse_var(&lookup, ENV_LOW_STOCK)? {
            settings.low_stock_threshold = i64::try_from(v).unwrap_or(i64::MAX);
        }

        if settings.default_page_size > settings.max_page_size {
            return Err(SettingsError::PageSizeAboveMax {
                default: settings.default_page_size,
                max: settings.max_page_size,
            });
        }
        Ok(settings)
    }

    /// Page size to use for a request; 0 selects the default.
    pub fn clamp_page_size(&self, requested: usize) -> usize {
        if requested == 0 {
            self.default_page_size.max(1)
        } else {
            requested.min(self.max_page_size).max(1)
        }
    }
}
