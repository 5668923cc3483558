use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

pub const MAX_USERNAME_CHARS: usize = 10;

/// Stored account record. Field order matches the on-disk document.
///
/// Older stores may hold balances written as floats or strings, records
/// without a password, or extra keys. Those values are kept verbatim so a
/// rewrite of the store never loses them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, deserialize_with = "raw_value", skip_serializing_if = "Option::is_none")]
    cans: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl User {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            password: Some(password.to_string()),
            cans: Some(Value::from(0u64)),
            extra: Map::new(),
        }
    }

    /// Balance as a non-negative integer; 0 when absent or unreadable.
    pub fn cans(&self) -> u64 {
        let cans = match &self.cans {
            Some(Value::Number(n)) => n.as_u64().or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f <= u64::MAX as f64)
                    .map(|f| f as u64)
            }),
            Some(Value::String(s)) => s.trim().parse().ok(),
            _ => None,
        };
        cans.unwrap_or(0)
    }

    pub fn set_cans(&mut self, cans: u64) {
        self.cans = Some(Value::from(cans));
    }

    pub fn password_matches(&self, password: &str) -> bool {
        self.password.as_deref() == Some(password)
    }
}

// Keeps an explicit `null` as `Some(Null)` so it is written back unchanged.
fn raw_value<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct CredentialsRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct GetCansRequest {
    pub username: Option<String>,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct UpdateCansRequest {
    pub username: Option<String>,
    pub cans: Option<u64>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct RegisterResponse {
    pub success: bool,
    pub username: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct CansResponse {
    pub success: bool,
    pub cans: u64,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct LoginResponse {
    pub success: bool,
    pub username: String,
    pub cans: u64,
}
