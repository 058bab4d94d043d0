use std::rc::Rc;

use crate::api::{ApiClient, ApiError, HttpApiClient};
use crate::auth::{AuthResponse, Otp, OtpRequest, OtpResponse, Phone};
use crate::data::{Profile, ProfileData, ProfileList, User, UserPatch};
use crate::log::{info, warn};
use crate::session::SessionStore;

/// The PahadiMatch backend, one method per endpoint the client uses.
pub struct Api {
    client: HttpApiClient,
    session: Rc<SessionStore>,
}

impl Api {
    pub fn new(client: HttpApiClient, session: Rc<SessionStore>) -> Self {
        Api { client, session }
    }

    pub fn session(&self) -> &Rc<SessionStore> {
        &self.session
    }

    /// Step one of sign-in. Validation failures never reach the network.
    pub async fn request_otp(&self, phone: &str) -> Result<OtpResponse, ApiError> {
        let request = OtpRequest {
            phone: Phone::parse(phone)?,
            otp: None,
        };
        self.client.post("/auth/phone/request-otp", &request).await
    }

    /// Step two of sign-in. On success the returned user and token become the session.
    pub async fn verify_otp(&self, phone: &str, otp: &str) -> Result<User, ApiError> {
        let request = OtpRequest {
            phone: Phone::parse(phone)?,
            otp: Some(Otp::parse(otp)?),
        };
        let AuthResponse { token, user } = self
            .client
            .post("/auth/phone/verify-otp", &request)
            .await?;

        self.session.set_session(user.clone(), token);
        Ok(user)
    }

    /// Ends the session locally no matter what the backend says.
    pub async fn logout(&self) {
        if let Err(err) = self
            .client
            .post_empty::<serde_json::Value>("/auth/logout")
            .await
        {
            warn!("Logout request failed, signing out locally: {err}");
        }
        self.session.clear_session();
    }

    pub async fn current_user(&self) -> Result<User, ApiError> {
        self.client.get("/auth/me").await
    }

    /// Saves the wizard and marks the current user's profile as complete.
    pub async fn save_profile(&self, data: &ProfileData) -> Result<(), ApiError> {
        self.client
            .patch::<serde_json::Value, _>("/profile/create", data)
            .await?;

        info!("Profile saved");
        self.session.patch_user(UserPatch::profile_complete());
        Ok(())
    }

    /// One page of candidate profiles. Pages start at 1.
    pub async fn list_profiles(&self, page: u32) -> Result<ProfileList, ApiError> {
        let page = page.max(1);
        self.client
            .get(&format!("/profile/list?page={page}"))
            .await
    }

    pub async fn my_profile(&self) -> Result<Profile, ApiError> {
        self.client.get("/profile/me").await
    }
}
