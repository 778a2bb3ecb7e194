use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Success envelope: `{success: true, data?, message?}`. Failures are
/// rendered by `AppError`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }
}

/// Handler for a route that exists but does nothing yet.
pub fn pending(
    what: &'static str,
) -> impl Fn() -> std::future::Ready<Json<Value>> + Clone + Send + Sync + 'static {
    move || std::future::ready(Json(json!({ "message": format!("{} - to be implemented", what) })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope_shape() {
        let body = serde_json::to_value(ApiResponse::ok(json!({"roll_number": "2024CSE001"}))).unwrap();
        assert_eq!(body, json!({"success": true, "data": {"roll_number": "2024CSE001"}}));

        let body = serde_json::to_value(ApiResponse::ok(1)).unwrap();
        assert!(body.get("message").is_none());
    }

    #[tokio::test]
    async fn test_pending_message() {
        let Json(body) = pending("Mark attendance")().await;
        assert_eq!(body, json!({"message": "Mark attendance - to be implemented"}));
    }
}
