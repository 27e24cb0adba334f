//! Shared API request/response types
//!
//! Wire types for the lookup and admin endpoints. Lookup status strings stay
//! compatible with the original service (`"Found"`, `"Not Found"`,
//! `"error"`), so existing clients keep working.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use uuid::Uuid;

// ========================================
// Bin Codes
// ========================================

/// Opaque bin identifier associated with a site.
///
/// Clients may send a JSON string or a bare number; both normalize to the
/// string form for storage and comparison.
///
/// # Examples
///
/// ```
/// use binvault_common::api::BinCode;
///
/// let from_str: BinCode = serde_json::from_str("\"4521\"").unwrap();
/// let from_num: BinCode = serde_json::from_str("4521").unwrap();
/// assert_eq!(from_str, from_num);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BinCode(pub String);

impl BinCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BinCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for BinCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::String(s) => Ok(BinCode(s)),
            Value::Number(n) => Ok(BinCode(n.to_string())),
            other => Err(serde::de::Error::custom(format!(
                "bin must be a string or number, got {other}"
            ))),
        }
    }
}

// ========================================
// Lookup Types
// ========================================

/// Response for GET /lookup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupResponse {
    pub status: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub site: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bins: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
}

impl LookupResponse {
    pub fn found(site: String, bins: Vec<String>) -> Self {
        Self {
            status: "Found".to_string(),
            site: Some(site),
            bins: Some(bins),
            msg: None,
        }
    }

    pub fn not_found() -> Self {
        Self {
            status: "Not Found".to_string(),
            site: None,
            bins: None,
            msg: None,
        }
    }

    pub fn empty_query() -> Self {
        Self {
            status: "error".to_string(),
            site: None,
            bins: None,
            msg: Some("Empty query".to_string()),
        }
    }
}

// ========================================
// Admin Types
// ========================================

/// Request body for POST /admin/login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response for POST /admin/login
///
/// On success carries the opaque session token the client presents as
/// `Authorization: Bearer <token>` on subsequent requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<Uuid>,
}

/// Request body for POST /admin/add
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddRequest {
    pub site: String,
    pub bin: BinCode,
}

/// Request body for POST /admin/remove
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoveRequest {
    pub site: String,
}

/// Response for mutating admin endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MutationResponse {
    pub success: bool,
}

/// Response for GET /admin/stats
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsResponse {
    /// Number of stored records
    pub count: usize,
    /// Lookup requests recorded today
    pub reqs: usize,
    /// Size of the record store file in bytes
    pub db_size: u64,
}

// ========================================
// Error Types
// ========================================

/// Structured error body returned for denied or failed requests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
