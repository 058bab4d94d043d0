//! Shared error types and utilities for the pahadi project.
#[cfg(not(target_arch = "wasm32"))]
pub use color_eyre::Report;

#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("Failed to install color_eyre")]
    ColorEyre(#[from] color_eyre::Report),
    #[error("Failed to install tracing-subscriber")]
    TracingSubscriber(#[from] Box<dyn std::error::Error + Send + Sync>),
}

#[cfg(target_arch = "wasm32")]
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("Failed to install tracing-subscriber")]
    TracingSubscriber(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// Failures of the durable client-side storage behind the session store.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Failed to read {key} from storage: {reason}")]
    Read { key: String, reason: String },
    #[error("Failed to write {key} to storage: {reason}")]
    Write { key: String, reason: String },
    #[error("Persisted session is malformed: {0}")]
    Malformed(String),
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Malformed(err.to_string())
    }
}

/// Input rejected before it is sent to the backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please enter a valid 10-digit phone number")]
    InvalidPhone,
    #[error("Please enter a valid 6-digit OTP")]
    InvalidOtp,
    #[error("Session token is empty")]
    EmptyToken,
}
