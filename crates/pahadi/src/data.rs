//! Data structures exchanged between the client and the PahadiMatch backend.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::id::{ProfileId, UserId};

/// The account record the backend returns after OTP verification.
///
/// Only the fields the client acts on are typed. Anything else the backend sends is kept in
/// `extra` and written back out unchanged, so persisting and rehydrating a user never drops
/// backend-defined attributes.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    #[serde(deserialize_with = "string_or_number")]
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub profile_complete: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl User {
    pub fn new(id: impl Into<UserId>, phone: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            phone: phone.into(),
            name: None,
            email: None,
            profile_complete: false,
            extra: Map::new(),
        }
    }

    /// Shallow merge: every field set in the patch overwrites, everything else is kept.
    pub fn apply(&mut self, patch: UserPatch) {
        if let Some(id) = patch.id {
            self.id = id;
        }
        if let Some(phone) = patch.phone {
            self.phone = phone;
        }
        if let Some(name) = patch.name {
            self.name = Some(name);
        }
        if let Some(email) = patch.email {
            self.email = Some(email);
        }
        if let Some(profile_complete) = patch.profile_complete {
            self.profile_complete = profile_complete;
        }
        self.extra.extend(patch.extra);
    }

    /// Name to greet the user with, falling back to the phone number.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.phone)
    }
}

/// A partial [`User`], applied with [`User::apply`].
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_complete: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserPatch {
    pub fn profile_complete() -> Self {
        Self {
            profile_complete: Some(true),
            ..Self::default()
        }
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(u64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text,
        Raw::Number(number) => number.to_string(),
    })
}

// Optional backend flags may arrive as an explicit `null`.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Gender::ALL.into_iter().find(|g| g.as_str() == s)
    }
}

/// Everything the profile creation wizard collects, one block per wizard step.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProfileData {
    // Basic info
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marital_status: Option<String>,

    // Location & background
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub religion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caste: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mother_tongue: Option<String>,

    // Education & career
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub education: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occupation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annual_income: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employed_in: Option<String>,

    // About & preferences
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interests: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub looking_for: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family_values: Option<String>,
}

/// Addresses a single free-form field of [`ProfileData`] so forms can be table driven.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    Name,
    DateOfBirth,
    Gender,
    Height,
    MaritalStatus,
    City,
    State,
    Country,
    Religion,
    Caste,
    MotherTongue,
    Education,
    Occupation,
    AnnualIncome,
    EmployedIn,
    Bio,
    Interests,
    LookingFor,
    FamilyType,
    FamilyValues,
}

impl ProfileData {
    /// The current value of `field` as form text. Interests are comma separated.
    pub fn get(&self, field: ProfileField) -> String {
        if let ProfileField::Gender = field {
            return self.gender.map(|g| g.as_str().to_string()).unwrap_or_default();
        }
        if let ProfileField::Interests = field {
            return self
                .interests
                .as_ref()
                .map(|interests| interests.join(", "))
                .unwrap_or_default();
        }
        self.text_slot(field)
            .and_then(|slot| slot.clone())
            .unwrap_or_default()
    }

    /// Sets `field` from form text. Blank input clears the field.
    pub fn set(&mut self, field: ProfileField, value: &str) {
        let value = value.trim();
        match field {
            ProfileField::Gender => self.gender = Gender::parse(value),
            ProfileField::Interests => {
                let interests: Vec<String> = value
                    .split(',')
                    .map(str::trim)
                    .filter(|interest| !interest.is_empty())
                    .map(str::to_string)
                    .collect();
                self.interests = (!interests.is_empty()).then_some(interests);
            }
            _ => {
                if let Some(slot) = self.text_slot_mut(field) {
                    *slot = (!value.is_empty()).then(|| value.to_string());
                }
            }
        }
    }

    fn text_slot(&self, field: ProfileField) -> Option<&Option<String>> {
        Some(match field {
            ProfileField::Name => &self.name,
            ProfileField::DateOfBirth => &self.date_of_birth,
            ProfileField::Height => &self.height,
            ProfileField::MaritalStatus => &self.marital_status,
            ProfileField::City => &self.city,
            ProfileField::State => &self.state,
            ProfileField::Country => &self.country,
            ProfileField::Religion => &self.religion,
            ProfileField::Caste => &self.caste,
            ProfileField::MotherTongue => &self.mother_tongue,
            ProfileField::Education => &self.education,
            ProfileField::Occupation => &self.occupation,
            ProfileField::AnnualIncome => &self.annual_income,
            ProfileField::EmployedIn => &self.employed_in,
            ProfileField::Bio => &self.bio,
            ProfileField::LookingFor => &self.looking_for,
            ProfileField::FamilyType => &self.family_type,
            ProfileField::FamilyValues => &self.family_values,
            ProfileField::Gender | ProfileField::Interests => return None,
        })
    }

    fn text_slot_mut(&mut self, field: ProfileField) -> Option<&mut Option<String>> {
        Some(match field {
            ProfileField::Name => &mut self.name,
            ProfileField::DateOfBirth => &mut self.date_of_birth,
            ProfileField::Height => &mut self.height,
            ProfileField::MaritalStatus => &mut self.marital_status,
            ProfileField::City => &mut self.city,
            ProfileField::State => &mut self.state,
            ProfileField::Country => &mut self.country,
            ProfileField::Religion => &mut self.religion,
            ProfileField::Caste => &mut self.caste,
            ProfileField::MotherTongue => &mut self.mother_tongue,
            ProfileField::Education => &mut self.education,
            ProfileField::Occupation => &mut self.occupation,
            ProfileField::AnnualIncome => &mut self.annual_income,
            ProfileField::EmployedIn => &mut self.employed_in,
            ProfileField::Bio => &mut self.bio,
            ProfileField::LookingFor => &mut self.looking_for,
            ProfileField::FamilyType => &mut self.family_type,
            ProfileField::FamilyValues => &mut self.family_values,
            ProfileField::Gender | ProfileField::Interests => return None,
        })
    }
}

/// A member profile as listed on the discover page.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: ProfileId,
    #[serde(deserialize_with = "string_or_number")]
    pub phone: String,
    #[serde(flatten)]
    pub data: ProfileData,
    #[serde(default)]
    pub photos: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub verified: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub premium: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Profile {
    pub fn display_name(&self) -> &str {
        self.data.name.as_deref().unwrap_or("PahadiMatch member")
    }

    /// "City, State" with whichever parts are known.
    pub fn location(&self) -> Option<String> {
        let parts: Vec<&str> = [&self.data.city, &self.data.state]
            .into_iter()
            .filter_map(|part| part.as_deref())
            .collect();
        (!parts.is_empty()).then(|| parts.join(", "))
    }
}

/// One page of `GET /profile/list`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ProfileList {
    #[serde(default)]
    pub profiles: Vec<Profile>,
    #[serde(default)]
    pub total: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_keeps_unknown_fields() {
        let raw = json!({
            "id": "u1",
            "phone": "9876543210",
            "profileComplete": true,
            "city": "Dehradun",
            "tier": { "premium": false }
        });

        let user: User = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(user.id.as_str(), "u1");
        assert!(user.profile_complete);
        assert_eq!(user.extra["city"], json!("Dehradun"));

        assert_eq!(serde_json::to_value(&user).unwrap(), raw);
    }

    #[test]
    fn test_user_phone_accepts_number() {
        let user: User = serde_json::from_value(json!({ "id": "u1", "phone": 9876543210u64 })).unwrap();
        assert_eq!(user.phone, "9876543210");
        assert!(!user.profile_complete);
    }

    #[test]
    fn test_null_flags_read_as_false() {
        let user: User = serde_json::from_value(json!({
            "id": "u1",
            "phone": "9876543210",
            "profileComplete": null
        }))
        .unwrap();
        assert!(!user.profile_complete);

        let profile: Profile = serde_json::from_value(json!({
            "id": "p1",
            "phone": "9000000001",
            "verified": null,
            "premium": null
        }))
        .unwrap();
        assert!(!profile.verified);
        assert!(!profile.premium);
    }

    #[test]
    fn test_apply_is_shallow_merge() {
        let mut user = User::new("u1", "9876543210");
        user.name = Some("Asha".to_string());
        user.extra.insert("city".to_string(), json!("Shimla"));

        let mut patch = UserPatch::profile_complete();
        patch.extra.insert("religion".to_string(), json!("Hindu"));
        user.apply(patch);

        assert!(user.profile_complete);
        assert_eq!(user.name.as_deref(), Some("Asha"));
        assert_eq!(user.phone, "9876543210");
        assert_eq!(user.extra["city"], json!("Shimla"));
        assert_eq!(user.extra["religion"], json!("Hindu"));
    }

    #[test]
    fn test_profile_field_set_and_get() {
        let mut data = ProfileData::default();
        data.set(ProfileField::Name, "  Asha Rawat ");
        data.set(ProfileField::Gender, "female");
        data.set(ProfileField::Interests, "trekking, , music ,folk dance");

        assert_eq!(data.name.as_deref(), Some("Asha Rawat"));
        assert_eq!(data.gender, Some(Gender::Female));
        assert_eq!(data.get(ProfileField::Interests), "trekking, music, folk dance");

        data.set(ProfileField::Name, "   ");
        data.set(ProfileField::Gender, "unknown");
        assert_eq!(data.name, None);
        assert_eq!(data.gender, None);
        assert_eq!(data.get(ProfileField::Name), "");
    }

    #[test]
    fn test_profile_data_wire_names() {
        let mut data = ProfileData::default();
        data.set(ProfileField::DateOfBirth, "1996-04-12");
        data.set(ProfileField::MotherTongue, "Garhwali");

        assert_eq!(
            serde_json::to_value(&data).unwrap(),
            json!({ "dateOfBirth": "1996-04-12", "motherTongue": "Garhwali" })
        );
    }

    #[test]
    fn test_profile_flattens_data() {
        let profile: Profile = serde_json::from_value(json!({
            "id": "p1",
            "phone": "9000000001",
            "name": "Kiran",
            "city": "Nainital",
            "state": "Uttarakhand",
            "verified": true
        }))
        .unwrap();

        assert_eq!(profile.display_name(), "Kiran");
        assert_eq!(profile.location().as_deref(), Some("Nainital, Uttarakhand"));
        assert!(profile.verified);
        assert!(profile.photos.is_empty());
    }
}
