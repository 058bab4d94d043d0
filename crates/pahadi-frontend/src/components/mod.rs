//! Reusable UI components for the PahadiMatch frontend.

pub mod layout;
pub mod otp_form;
pub mod profile_card;
pub mod spinner;

pub use layout::*;
pub use otp_form::*;
pub use profile_card::*;
pub use spinner::*;
