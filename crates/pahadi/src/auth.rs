//! Phone OTP sign-in: validated inputs and the wire types of the two-step flow.

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

use crate::data::User;
use crate::errors::ValidationError;
use crate::session::AuthToken;

pub const PHONE_DIGITS: usize = 10;
pub const OTP_DIGITS: usize = 6;

fn exact_digits(input: &str, len: usize) -> Option<&str> {
    let trimmed = input.trim();
    (trimmed.len() == len && trimmed.bytes().all(|b| b.is_ascii_digit())).then_some(trimmed)
}

/// A 10-digit mobile number. The backend expects it as a JSON number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phone(String);

impl Phone {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        exact_digits(input, PHONE_DIGITS)
            .map(|digits| Self(digits.to_string()))
            .ok_or(ValidationError::InvalidPhone)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for Phone {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let number: u64 = self.0.parse().map_err(serde::ser::Error::custom)?;
        serializer.serialize_u64(number)
    }
}

/// A 6-digit one-time password, sent as a JSON number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Otp(String);

impl Otp {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        exact_digits(input, OTP_DIGITS)
            .map(|digits| Self(digits.to_string()))
            .ok_or(ValidationError::InvalidOtp)
    }
}

impl Serialize for Otp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let number: u32 = self.0.parse().map_err(serde::ser::Error::custom)?;
        serializer.serialize_u32(number)
    }
}

/// Body of both `request-otp` and `verify-otp`.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct OtpRequest {
    pub phone: Phone,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub otp: Option<Otp>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct OtpResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct AuthResponse {
    pub token: AuthToken,
    pub user: User,
}

/// Where a freshly signed-in user goes next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Landing {
    Profiles,
    CompleteProfile,
}

impl Landing {
    pub fn for_user(user: &User) -> Self {
        if user.profile_complete {
            Landing::Profiles
        } else {
            Landing::CompleteProfile
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Landing::Profiles => "/profiles",
            Landing::CompleteProfile => "/complete-profile",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_phone_validation() {
        assert_eq!(Phone::parse("9876543210").unwrap().as_str(), "9876543210");
        assert_eq!(Phone::parse(" 9876543210\n").unwrap().as_str(), "9876543210");
        assert_eq!(Phone::parse("987654321"), Err(ValidationError::InvalidPhone));
        assert_eq!(Phone::parse("98765432101"), Err(ValidationError::InvalidPhone));
        assert_eq!(Phone::parse("98765-4321"), Err(ValidationError::InvalidPhone));
        assert_eq!(Phone::parse(""), Err(ValidationError::InvalidPhone));
        assert_eq!(Phone::parse("९८७६५४३२१०"), Err(ValidationError::InvalidPhone));
    }

    #[test]
    fn test_otp_validation() {
        assert!(Otp::parse("123456").is_ok());
        assert_eq!(Otp::parse("12345"), Err(ValidationError::InvalidOtp));
        assert_eq!(Otp::parse("1234567"), Err(ValidationError::InvalidOtp));
        assert_eq!(Otp::parse("12a456"), Err(ValidationError::InvalidOtp));
    }

    #[test]
    fn test_otp_request_wire_format() {
        let request = OtpRequest {
            phone: Phone::parse("9876543210").unwrap(),
            otp: None,
        };
        assert_eq!(serde_json::to_value(&request).unwrap(), json!({ "phone": 9876543210u64 }));

        let request = OtpRequest {
            otp: Some(Otp::parse("424242").unwrap()),
            ..request
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "phone": 9876543210u64, "otp": 424242 })
        );
    }

    #[test]
    fn test_landing_follows_profile_completion() {
        let mut user = User::new("u1", "9876543210");
        assert_eq!(Landing::for_user(&user), Landing::CompleteProfile);
        assert_eq!(Landing::for_user(&user).path(), "/complete-profile");

        user.profile_complete = true;
        assert_eq!(Landing::for_user(&user), Landing::Profiles);
        assert_eq!(Landing::for_user(&user).path(), "/profiles");
    }
}
