//! Context providers for shared application state and services.

pub mod api;
pub mod session;
pub mod toast;

pub use session::{SessionProvider, use_session};
pub use toast::{Toast, ToastProvider, use_toast};
