//! Page components for different routes in the application.

pub mod chat;
pub mod complete_profile;
pub mod login;
pub mod notifications;
pub mod profile;
pub mod profiles;
pub mod signup;

pub use chat::*;
pub use complete_profile::*;
pub use login::*;
pub use notifications::*;
pub use profile::*;
pub use profiles::*;
pub use signup::*;
