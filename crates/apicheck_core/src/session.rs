//! Login and the authenticated session it produces.

use crate::client::{ApiClient, ApiPath, Method};
use crate::config::Credentials;
use crate::error::{ApiCheckError, Result};
use crate::resources::lookup;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};

/// Path of the login endpoint.
pub const LOGIN_PATH: &str = "/api/auth/login";

/// Profile of the logged-in user as returned by the login endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// User id, when the backend includes it.
    #[serde(default)]
    pub id: Option<String>,
    /// Login email.
    #[serde(default)]
    pub email: String,
    /// Role name (e.g. `tenant_admin`).
    #[serde(default)]
    pub role: Option<String>,
    /// Tenant the user belongs to; absent for system-level accounts.
    #[serde(default)]
    pub tenant_id: Option<String>,
}

/// Authenticated session handle.
///
/// Produced only by [`login`] and passed explicitly to every test case
/// that needs a bearer token.
#[derive(Debug, Clone)]
pub struct Session {
    token: String,
    user: UserProfile,
}

impl Session {
    /// Creates a session from an already obtained token.
    pub fn new(token: String, user: UserProfile) -> Self {
        Self { token, user }
    }

    /// Bearer token sent in the Authorization header.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Cached user profile.
    pub fn user(&self) -> &UserProfile {
        &self.user
    }

    /// Tenant id used to scope list queries and writes.
    pub fn tenant_id(&self) -> Option<&str> {
        self.user.tenant_id.as_deref()
    }
}

/// Logs in with `credentials` and returns the resulting session.
///
/// Fails when the call fails, when the body carries no non-empty
/// `access_token`, or when the `user` object cannot be decoded.
pub fn login(client: &ApiClient, credentials: &Credentials) -> Result<Session> {
    info!("=== 로그인 시도 ===");

    let payload = json!({
        "email": credentials.email,
        "password": credentials.password,
    });

    let response = client
        .request(None, Method::Post, &ApiPath::from(LOGIN_PATH), Some(&payload), 200)
        .map_err(|err| {
            error!("로그인 실패: {}", err.message);
            ApiCheckError::from(err)
        })?;

    let token = match lookup(&response.body, "access_token").and_then(|v| v.as_str()) {
        Some(token) if !token.is_empty() => token.to_string(),
        _ => {
            error!("로그인 응답에 access_token이 없습니다");
            return Err(ApiCheckError::LoginFailed(
                "response has no access_token".to_string(),
            ));
        }
    };

    let user: UserProfile = match lookup(&response.body, "user") {
        Some(value) => serde_json::from_value(value.clone()).map_err(|e| {
            error!("사용자 정보 파싱 실패: {}", e);
            ApiCheckError::LoginFailed(format!("malformed user object: {e}"))
        })?,
        None => UserProfile {
            id: None,
            email: credentials.email.clone(),
            role: None,
            tenant_id: None,
        },
    };

    info!("로그인 성공: {}", user.email);
    info!("역할: {}", user.role.as_deref().unwrap_or("Unknown"));
    info!("테넌트 ID: {}", user.tenant_id.as_deref().unwrap_or("None"));

    Ok(Session::new(token, user))
}
