//! Login, registration and the current-user check.

use masjid_records::{AuthResponse, LoginRequest, RegisterRequest, UserInfo};
use tracing::{error, info};

use crate::client::{ApiClient, ApiError};

#[derive(Clone, Debug)]
pub struct AuthApi {
    api: ApiClient,
}

impl AuthApi {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// `POST /auth/login`; stores the issued token and user in the session.
    pub async fn login(&self, username: &str, password: &str) -> Result<UserInfo, ApiError> {
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let response: AuthResponse = self.api.post("auth/login", &request).await?;
        self.remember(&response)?;
        info!(username = %response.user.username, role = response.user.role.as_str(), "Logged in");
        Ok(response.user)
    }

    /// `POST /auth/register`; a successful registration also signs in.
    pub async fn register(
        &self,
        username: &str,
        password: &str,
        name: &str,
    ) -> Result<UserInfo, ApiError> {
        let request = RegisterRequest {
            username: username.to_string(),
            password: password.to_string(),
            name: name.to_string(),
        };
        let response: AuthResponse = self.api.post("auth/register", &request).await?;
        self.remember(&response)?;
        info!(username = %response.user.username, "Registered");
        Ok(response.user)
    }

    /// `GET /auth/me`; refreshes the cached user descriptor.
    pub async fn me(&self) -> Result<UserInfo, ApiError> {
        let user: UserInfo = self.api.get("auth/me").await?;
        if let Err(e) = self.api.session().update_user(&user) {
            error!("Failed to cache current user: {}", e);
        }
        Ok(user)
    }

    /// Forget the credential locally. The backend keeps no session to end.
    pub fn logout(&self) {
        self.api.session().evict();
        info!("Logged out");
    }

    fn remember(&self, response: &AuthResponse) -> Result<(), ApiError> {
        self.api
            .session()
            .store(&response.access_token, &response.user)
            .map_err(|e| {
                error!("Failed to persist session: {}", e);
                ApiError::from(e)
            })
    }
}
