//! Login and profile endpoints.

use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::api::client::ApiClient;
use crate::api::envelope::decode_item;
use crate::api::error::ApiError;
use crate::domain::AdminProfile;
use crate::session::SecureString;

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginData {
    #[serde(alias = "accessToken")]
    token: String,
    #[serde(alias = "user")]
    admin: AdminProfile,
}

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct Login {
    pub token: SecureString,
    pub profile: AdminProfile,
}

#[derive(Clone)]
pub struct AuthApi {
    client: ApiClient,
}

impl AuthApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// `POST /auth/login`. On success the token is installed on the client.
    pub async fn login(&self, email: &str, password: &str) -> Result<Login, ApiError> {
        let body = self
            .client
            .send(
                Method::POST,
                &["auth", "login"],
                Some(&Credentials { email, password }),
            )
            .await?;
        let data: LoginData = decode_item(body).map_err(|message| ApiError::Decode {
            url: "auth/login".to_string(),
            message,
        })?;
        let token = SecureString::new(data.token);
        self.client.set_token(Some(token.clone()));
        tracing::info!(email = %data.admin.email, "logged in");
        Ok(Login {
            token,
            profile: data.admin,
        })
    }

    /// `GET /auth/profile` for the current token.
    pub async fn profile(&self) -> Result<AdminProfile, ApiError> {
        if !self.client.has_token() {
            return Err(ApiError::Unauthorized {
                message: "no session token".to_string(),
            });
        }
        let body = self.client.get(&["auth", "profile"], &[]).await?;
        decode_item(body).map_err(|message| ApiError::Decode {
            url: "auth/profile".to_string(),
            message,
        })
    }
}
