//! Permission lookup for the authenticated user.

use axum::{extract::State, Json};

use crate::billing::client::METHOD_GET_PERMISSIONS_FOR_USER;
use crate::billing::{CallMeta, GetPermissionsForUserRequest, Outcome, Permission};
use crate::errors;
use crate::http::response::HttpError;
use crate::http::server::AppState;
use crate::identity::AuthUser;

const ROUTER: &str = "PermissionsRoute";

/// `GET /auth/api/v1/permissions`
pub async fn get_permissions(
    State(state): State<AppState>,
    meta: CallMeta,
    user: AuthUser,
) -> Result<Json<Vec<Permission>>, HttpError> {
    let req = GetPermissionsForUserRequest {
        user_id: user.id,
        merchant_id: user.merchant_id,
    };

    let result = state.billing.get_permissions_for_user(&meta, req).await;
    let permissions = Outcome::from_status_reply(METHOD_GET_PERMISSIONS_FOR_USER, result)
        .into_http(ROUTER, METHOD_GET_PERMISSIONS_FOR_USER, errors::internal)?;

    Ok(Json(permissions))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::json;

    use crate::billing::{GetPermissionsForUserResponse, Permission, ResponseErrorMessage};
    use crate::config::GatewayConfig;
    use crate::handlers::testing::{json, router, router_with, send, MockBilling};
    use crate::handlers::PERMISSIONS_PATH;
    use crate::http::X_REQUEST_ID;
    use crate::identity::{X_AUTH_MERCHANT_ID, X_AUTH_USER_ID};

    fn authed() -> Request<Body> {
        Request::builder()
            .uri(PERMISSIONS_PATH)
            .header(X_AUTH_USER_ID, "1")
            .header(X_AUTH_MERCHANT_ID, "2")
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_permissions_success() {
        let mock = Arc::new(MockBilling {
            permissions: Some(GetPermissionsForUserResponse {
                status: 200,
                message: None,
                permissions: vec![
                    Permission {
                        access: "read".to_string(),
                        name: "get_something".to_string(),
                    },
                    Permission {
                        access: "write".to_string(),
                        name: "set_something".to_string(),
                    },
                ],
            }),
            ..Default::default()
        });

        let (status, body) = send(router(mock.clone()), authed()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json(&body),
            json!([
                {"access": "read", "name": "get_something"},
                {"access": "write", "name": "set_something"}
            ])
        );

        let seen = mock.seen();
        assert_eq!(seen.permissions[0].user_id, "1");
        assert_eq!(seen.permissions[0].merchant_id, "2");
    }

    #[tokio::test]
    async fn test_permissions_transport_error() {
        let mock = Arc::new(MockBilling::default());

        let (status, body) = send(router(mock), authed()).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json(&body), json!({"code": "ma000003", "message": "internal error"}));
    }

    #[tokio::test]
    async fn test_permissions_domain_error() {
        let mock = Arc::new(MockBilling {
            permissions: Some(GetPermissionsForUserResponse {
                status: 400,
                message: Some(ResponseErrorMessage::new("sasd", "asd")),
                permissions: Vec::new(),
            }),
            ..Default::default()
        });

        let (status, body) = send(router(mock), authed()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json(&body), json!({"code": "sasd", "message": "asd"}));
    }

    #[tokio::test]
    async fn test_permissions_require_identity() {
        let mock = Arc::new(MockBilling::default());
        let req = Request::builder()
            .uri(PERMISSIONS_PATH)
            .body(Body::empty())
            .unwrap();

        let (status, body) = send(router(mock.clone()), req).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json(&body)["code"], "ma000004");
        assert!(mock.seen().permissions.is_empty());
    }

    #[tokio::test]
    async fn test_disabled_auth_passes_empty_identity() {
        let mock = Arc::new(MockBilling {
            permissions: Some(GetPermissionsForUserResponse {
                status: 200,
                ..Default::default()
            }),
            ..Default::default()
        });
        let mut config = GatewayConfig::default();
        config.handlers.disable_auth_middleware = true;
        let req = Request::builder()
            .uri(PERMISSIONS_PATH)
            .body(Body::empty())
            .unwrap();

        let (status, body) = send(router_with(mock.clone(), config), req).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json(&body), json!([]));
        assert_eq!(mock.seen().permissions[0].user_id, "");
    }

    #[tokio::test]
    async fn test_request_id_reaches_billing() {
        let mock = Arc::new(MockBilling::default());
        let mut req = authed();
        req.headers_mut()
            .insert(X_REQUEST_ID, "trace-me".parse().unwrap());

        let (_, _) = send(router(mock.clone()), req).await;

        assert_eq!(mock.seen().meta[0].request_id.as_deref(), Some("trace-me"));
    }

    #[tokio::test]
    async fn test_request_id_generated_when_absent() {
        let mock = Arc::new(MockBilling::default());

        let (_, _) = send(router(mock.clone()), authed()).await;

        let id = mock.seen().meta[0].request_id.clone().unwrap();
        assert_eq!(id.len(), 36);
    }
}
