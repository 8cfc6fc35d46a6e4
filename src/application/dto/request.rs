//! Request DTOs
//!
//! Data structures for API request bodies sent to the backend.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Admin login request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Create or update a mother account
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct MotherInput {
    #[validate(email(message = "Invalid email format"))]
    pub name: String,

    #[validate(range(min = 1, max = 500, message = "Seat limit must be 1-500"))]
    pub seat_limit: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 500, message = "Notes must be at most 500 characters"))]
    pub notes: Option<String>,
}

/// Bulk import of mother accounts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MotherImportRequest {
    pub items: Vec<MotherInput>,
}

/// Generate a batch of redemption codes
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GenerateCodesRequest {
    #[validate(range(min = 1, max = 10000, message = "Count must be 1-10000"))]
    pub count: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 16, message = "Prefix must be at most 16 characters"))]
    pub prefix: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_in_days: Option<u32>,
}

/// Apply one action to many rows
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct BatchRequest {
    /// Table the ids belong to, e.g. "mothers", "users", "codes"
    pub resource: String,

    pub action: String,

    #[validate(length(min = 1, message = "Select at least one row"))]
    pub ids: Vec<i64>,
}

/// Public redeem request
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct RedeemRequest {
    #[validate(length(min = 1, max = 64, message = "Code is required"))]
    pub code: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}
