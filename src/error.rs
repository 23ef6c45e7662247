use thiserror::Error;

use crate::types::{Device, DispChange, ParseResolutionError};

/// Error type for display enumeration and the settings transaction
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("No monitors were found")]
    NoMonitorsFound,
    #[error("Invalid monitor index: {0} (monitors are 1-indexed)")]
    InvalidMonitorIndex(usize),
    #[error("Failed to enumerate display devices: {0}")]
    EnumerationFailed(String),
    #[error("Failed to retrieve current settings for {device}: {reason}")]
    ModeQueryFailed { device: Device, reason: String },
    #[error("Invalid resolution format. Use WIDTHxHEIGHT (e.g., 1920x1080)")]
    InvalidResolutionFormat(#[from] ParseResolutionError),
    #[error("Failed to change settings for {device}: {code}")]
    ApplyFailed { device: Device, code: DispChange },
}

pub type Result<T = ()> = std::result::Result<T, SettingsError>;
