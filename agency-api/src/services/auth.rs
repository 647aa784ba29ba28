use super::ApiClient;
use crate::error::ApiError;
use crate::gateway::Operation;
use crate::models::{Credentials, LoginResult, SignupResult, User};
use serde_json::json;

pub const MIN_PASSWORD_LEN: usize = 6;

pub struct AuthApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AuthApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Exchange credentials for a token and start a session with it.
    pub async fn login(&self, username: &str, password: &str) -> Result<User, ApiError> {
        let body = serde_json::to_value(Credentials {
            username: username.to_string(),
            password: password.to_string(),
        })?;
        let result: LoginResult = self
            .client
            .execute(Operation::Login, Some(body))
            .await?
            .into_data()?;

        self.client
            .session()
            .login(&result.token, &result.user)
            .await
            .map_err(|e| {
                ApiError::unexpected_with(
                    "Failed to persist session",
                    json!({ "cause": e.to_string() }),
                )
            })?;

        Ok(result.user)
    }

    /// Create an account. The form is checked locally before anything is
    /// sent, and no session is started.
    pub async fn signup(
        &self,
        username: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<SignupResult, ApiError> {
        validate_signup(username, password, confirm_password)?;

        let body = serde_json::to_value(Credentials {
            username: username.to_string(),
            password: password.to_string(),
        })?;
        let result: SignupResult = self
            .client
            .execute(Operation::Signup, Some(body))
            .await?
            .into_data()?;

        tracing::info!(username = username, "Account created");
        Ok(result)
    }

    pub async fn logout(&self) -> Result<(), ApiError> {
        self.client.session().logout().await.map_err(|e| {
            ApiError::unexpected_with("Failed to clear session", json!({ "cause": e.to_string() }))
        })
    }

    pub async fn current_user(&self) -> Option<User> {
        self.client.session().restore().await
    }
}

fn validate_signup(username: &str, password: &str, confirm_password: &str) -> Result<(), ApiError> {
    let problem = if username.trim().is_empty() || password.is_empty() || confirm_password.is_empty()
    {
        Some("All fields are required")
    } else if password != confirm_password {
        Some("Passwords do not match")
    } else if password.chars().count() < MIN_PASSWORD_LEN {
        Some("Password must be at least 6 characters")
    } else {
        None
    };

    match problem {
        Some(message) => Err(ApiError::http(400, message, json!({ "message": message }))),
        None => Ok(()),
    }
}
