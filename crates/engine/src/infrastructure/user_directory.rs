//! User directory adapters.
//!
//! Tutors and students are owned by the external auth service; the engine only
//! needs their contact data to address notifications.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tutorbook_domain::{EmailAddress, UserId, UserInfo, UserRole};

use crate::infrastructure::ports::{DirectoryError, UserDirectory};

/// Looks users up via `GET {base_url}/auth/profile/{id}`.
#[derive(Clone)]
pub struct HttpUserDirectory {
    client: Client,
    base_url: String,
    bearer_token: Option<String>,
}

impl HttpUserDirectory {
    pub fn new(base_url: &str, timeout_secs: u64) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            bearer_token: None,
        }
    }

    /// Send `Authorization: Bearer <token>` with every lookup.
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }
}

#[async_trait]
impl UserDirectory for HttpUserDirectory {
    async fn get_user(&self, id: UserId) -> Result<UserInfo, DirectoryError> {
        let mut request = self
            .client
            .get(format!("{}/auth/profile/{}", self.base_url, id));
        if let Some(token) = &self.bearer_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| DirectoryError::RequestFailed(e.to_string()))?;

        match response.status() {
            StatusCode::NOT_FOUND => return Err(DirectoryError::NotFound(id.to_string())),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(DirectoryError::RequestFailed(format!(
                    "auth service refused the lookup ({})",
                    response.status()
                )))
            }
            status if !status.is_success() => {
                return Err(DirectoryError::RequestFailed(format!(
                    "auth service returned {status}"
                )))
            }
            _ => {}
        }

        let body: ProfileResponse = response
            .json()
            .await
            .map_err(|e| DirectoryError::InvalidProfile(e.to_string()))?;

        body.into_user_info()
    }
}

// =============================================================================
// Auth service response
// =============================================================================

#[derive(Debug, Deserialize)]
struct ProfileResponse {
    status: String,
    #[serde(default)]
    message: String,
    data: Option<ProfileData>,
}

#[derive(Debug, Deserialize)]
struct ProfileData {
    user: Profile,
}

#[derive(Debug, Deserialize)]
struct Profile {
    id: String,
    #[serde(rename = "correo")]
    contact_email: Option<String>,
    email: Option<String>,
    #[serde(rename = "nombre")]
    name: Option<String>,
    #[serde(rename = "tipo_usuario")]
    role: Option<String>,
    #[serde(rename = "userType")]
    user_type: Option<String>,
}

impl ProfileResponse {
    fn into_user_info(self) -> Result<UserInfo, DirectoryError> {
        if self.status != "success" {
            return Err(DirectoryError::InvalidProfile(self.message));
        }
        let profile = self
            .data
            .map(|d| d.user)
            .ok_or_else(|| DirectoryError::InvalidProfile("missing user data".into()))?;

        let invalid = |e: tutorbook_domain::DomainError| DirectoryError::InvalidProfile(e.to_string());

        let raw_email = profile
            .contact_email
            .or(profile.email)
            .ok_or_else(|| DirectoryError::InvalidProfile("missing email".into()))?;
        let email = EmailAddress::new(raw_email).map_err(invalid)?;
        let role: UserRole = profile
            .role
            .or(profile.user_type)
            .ok_or_else(|| DirectoryError::InvalidProfile("missing user type".into()))?
            .parse()
            .map_err(invalid)?;
        let name = profile
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| name_from_email(&email));

        UserInfo::new(UserId::parse(profile.id).map_err(invalid)?, email, name, role)
            .map_err(invalid)
    }
}

/// "ana.maria-lopez@x.com" -> "Ana Maria Lopez"
fn name_from_email(email: &EmailAddress) -> String {
    email
        .local_part()
        .split(['.', '_', '-'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Fixed set of users, for tests and local development.
#[derive(Debug, Clone, Default)]
pub struct StaticUserDirectory {
    users: HashMap<UserId, UserInfo>,
}

impl StaticUserDirectory {
    pub fn new(users: impl IntoIterator<Item = UserInfo>) -> Self {
        Self {
            users: users
                .into_iter()
                .map(|user| (user.id().clone(), user))
                .collect(),
        }
    }
}

#[async_trait]
impl UserDirectory for StaticUserDirectory {
    async fn get_user(&self, id: UserId) -> Result<UserInfo, DirectoryError> {
        self.users
            .get(&id)
            .cloned()
            .ok_or_else(|| DirectoryError::NotFound(id.to_string()))
    }
}
