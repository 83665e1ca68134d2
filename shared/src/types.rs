//! API request and response types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

/// Registration request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Session token response returned by a successful login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionToken {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// Password reset request (starts the emailed-token flow)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

/// New password supplied together with an emailed reset token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetPasswordRequest {
    pub password: String,
}

/// Request to (re-)send the confirmation link for an email address
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendConfirmationRequest {
    pub email: String,
}

/// Public view of an account; never carries the password hash
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub is_email_confirmed: bool,
    pub created_at: DateTime<Utc>,
}

/// Generic acknowledgement body for operations with no data to return
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_roundtrip() {
        let json = r#"{"username":"alice","email":"a@x.com","password":"Secret1!"}"#;
        let req: RegisterRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.username, "alice");
        assert_eq!(req.email, "a@x.com");
    }

    #[test]
    fn test_error_detail_skips_absent_field() {
        let detail = ErrorDetail {
            code: "NOT_FOUND".to_string(),
            message: "No account with that email".to_string(),
            field: None,
        };
        let json = serde_json::to_string(&detail).unwrap();
        assert!(!json.contains("field"));
    }
}
