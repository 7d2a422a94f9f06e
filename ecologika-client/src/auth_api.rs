//! Auth provider endpoints
//!
//! Wraps the platform's auth API: password sign-in, sign-up with a
//! profile seed, sign-out, session introspection and password recovery.
//! Successful sign-in installs the bearer token on the shared transport.

use crate::{ClientResult, HttpClient};
use shared::auth::{
    PasswordResetRequest, PasswordUpdateRequest, Session, SignInRequest, SignUpRequest,
};
use shared::models::profile::ProfileSeed;

/// Auth API handle
#[derive(Debug, Clone)]
pub struct AuthApi {
    http: HttpClient,
}

impl AuthApi {
    pub(crate) fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// Sign in with email and password
    pub async fn sign_in(&self, email: &str, password: &str) -> ClientResult<Session> {
        let request = SignInRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        let session: Session = self
            .http
            .post("auth/v1/token?grant_type=password", &request)
            .await?;

        self.http.set_token(session.access_token.clone());
        tracing::debug!(user_id = %session.user.id, "signed in");
        Ok(session)
    }

    /// Sign up a new identity, seeding its profile via user metadata
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        seed: ProfileSeed,
    ) -> ClientResult<Session> {
        let request = SignUpRequest {
            email: email.to_string(),
            password: password.to_string(),
            data: seed,
        };

        let session: Session = self.http.post("auth/v1/signup", &request).await?;

        self.http.set_token(session.access_token.clone());
        tracing::debug!(user_id = %session.user.id, "signed up");
        Ok(session)
    }

    /// Sign out, invalidating the current session token
    pub async fn sign_out(&self) -> ClientResult<()> {
        let result = self
            .http
            .post_no_content("auth/v1/logout", &serde_json::json!({}))
            .await;

        // The local token is dropped even if the remote call failed;
        // a dead token must not keep authenticating requests.
        self.http.clear_token();
        result
    }

    /// Fetch the identity behind the current token
    pub async fn current_user(&self) -> ClientResult<shared::auth::AuthUser> {
        self.http.get("auth/v1/user").await
    }

    /// Update the current identity's password
    pub async fn update_password(&self, new_password: &str) -> ClientResult<()> {
        let request = PasswordUpdateRequest {
            password: new_password.to_string(),
        };
        let _: shared::auth::AuthUser = self.http.put("auth/v1/user", &request).await?;
        Ok(())
    }

    /// Request a password reset email
    pub async fn request_password_reset(&self, email: &str) -> ClientResult<()> {
        let request = PasswordResetRequest {
            email: email.to_string(),
        };
        self.http.post_no_content("auth/v1/recover", &request).await
    }
}
