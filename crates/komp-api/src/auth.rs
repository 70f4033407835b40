//! Authentication endpoints.
//!
//! Login and signup go out without a bearer header. A successful login
//! persists the returned token and identity to the session store; signup
//! does not log the new user in.

use komp_core::session::{AuthUser, Session};

use crate::client::{ApiClient, ApiError};
use crate::types::{AuthResponse, LoginRequest, RegisterRequest};

impl ApiClient {
    /// `POST /users/login`. Persists the session on success.
    pub async fn login(&self, username: &str, password: &str) -> Result<AuthResponse, ApiError> {
        let body = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let resp: AuthResponse = self.post_public("/users/login", &body).await?;

        let session = Session {
            token: resp.token.clone(),
            user: AuthUser {
                id: resp.id,
                username: resp.username.clone(),
                email: resp.email.clone(),
                role: resp.role.clone(),
            },
        };
        self.session()
            .save(&session)
            .map_err(|e| ApiError::Config(format!("failed to persist session: {e}")))?;

        Ok(resp)
    }

    /// `POST /users/signup`.
    pub async fn signup(
        &self,
        username: &str,
        password: &str,
        email: &str,
    ) -> Result<(), ApiError> {
        let body = RegisterRequest {
            username: username.to_string(),
            password: password.to_string(),
            email: email.to_string(),
        };
        // The signup response body varies by backend version; only the
        // status matters here.
        let _: serde_json::Value = self.post_public("/users/signup", &body).await?;
        Ok(())
    }

    /// Drop the stored session. Purely local; the backend keeps no
    /// server-side session state for bearer tokens.
    pub fn logout(&self) -> Result<(), ApiError> {
        self.session()
            .clear()
            .map_err(|e| ApiError::Config(format!("failed to clear session: {e}")))
    }
}
