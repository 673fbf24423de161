use serde::{Deserialize, Serialize};

/// Envelope returned by every auth endpoint.
///
/// `result` carries the payload on success and a short error message otherwise.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub result: T,
}

impl<T> ApiResponse<T> {
    pub fn new(success: bool, result: T) -> Self {
        Self { success, result }
    }

    pub fn ok(result: T) -> Self {
        Self::new(true, result)
    }
}

impl ApiResponse<String> {
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(false, message.into())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NonceResponse {
    pub nonce: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoginResponse {
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_shape() {
        let ok = ApiResponse::ok(LoginResponse {
            token: "abc".to_string(),
        });
        assert_eq!(
            serde_json::to_value(&ok).unwrap(),
            json!({ "success": true, "result": { "token": "abc" } })
        );

        let err = ApiResponse::error("invalid nonce");
        assert_eq!(
            serde_json::to_value(&err).unwrap(),
            json!({ "success": false, "result": "invalid nonce" })
        );
    }

    #[test]
    fn test_login_request_uses_camel_case_signed_nonce() {
        let request: crate::requests::LoginRequest =
            serde_json::from_value(json!({ "address": "a", "signedNonce": "b" })).unwrap();
        assert_eq!(request.signed_nonce, "b");
    }
}
