use reqwest::Client;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::IdentityConfig;
use crate::error::{AppError, Result};

/// Issuer recorded in the metadata of accounts created via GitHub OAuth
const GITHUB_ISSUER: &str = "https://api.github.com";

/// Client for the hosted identity provider's auth API.
///
/// The provider owns all account state. This service only reads user
/// records through the admin endpoint and forwards credential or OAuth
/// sign-in requests.
#[derive(Clone)]
pub struct IdentityClient {
    base_url: String,
    anon_key: String,
    service_role_key: String,
    oauth_redirect_uri: String,
    http_client: Client,
}

/// A user record as returned by the provider's admin lookup
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityUser {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: UserMetadata,
}

/// Free-form profile metadata the provider attaches to a user
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserMetadata {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub iss: Option<String>,
}

/// Tokens issued after a successful credential sign-in
#[derive(Debug, Clone, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub token_type: Option<String>,
}

#[derive(Debug, Serialize)]
struct CredentialsRequest<'a> {
    email: &'a str,
    password: &'a str,
}

impl IdentityUser {
    /// Whether this account was created through the GitHub OAuth flow
    pub fn has_github(&self) -> bool {
        self.user_metadata.iss.as_deref() == Some(GITHUB_ISSUER)
    }
}

impl IdentityClient {
    pub fn new(config: &IdentityConfig) -> Self {
        IdentityClient {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            anon_key: config.anon_key.clone(),
            service_role_key: config.service_role_key.clone(),
            oauth_redirect_uri: config.oauth_redirect_uri.clone(),
            http_client: Client::new(),
        }
    }

    /// Look up a user record by id via the privileged admin endpoint
    pub async fn get_user_by_id(&self, user_id: Uuid) -> Result<IdentityUser> {
        let url = format!("{}/admin/users/{}", self.base_url, user_id);
        let response = self
            .http_client
            .get(&url)
            .bearer_auth(&self.service_role_key)
            .header("apikey", &self.anon_key)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::Identity(format!(
                "user lookup for {} failed with status {}",
                user_id,
                response.status()
            )));
        }

        let user = response.json::<IdentityUser>().await?;
        Ok(user)
    }

    /// Exchange email/password credentials for a session
    pub async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session> {
        let url = format!("{}/token?grant_type=password", self.base_url);
        let response = self
            .http_client
            .post(&url)
            .header("apikey", &self.anon_key)
            .json(&CredentialsRequest { email, password })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::Authentication(format!(
                "sign-in rejected with status {}",
                response.status()
            )));
        }

        let session = response.json::<Session>().await?;
        Ok(session)
    }

    /// Register a new account with the provider
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<()> {
        let url = format!("{}/signup", self.base_url);
        let response = self
            .http_client
            .post(&url)
            .header("apikey", &self.anon_key)
            .json(&CredentialsRequest { email, password })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::Authentication(format!(
                "signup rejected with status {}",
                response.status()
            )));
        }

        Ok(())
    }

    /// Build the OAuth authorize URL the browser is redirected to
    pub fn authorize_url(&self, provider: &str) -> String {
        format!(
            "{}/authorize?provider={}&redirect_to={}",
            self.base_url,
            provider,
            urlencoding::encode(&self.oauth_redirect_uri)
        )
    }
}
