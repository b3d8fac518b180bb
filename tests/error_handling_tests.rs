//! Error handling tests: local failures, remote rejections and transport
//! failures as seen through the public gateway API

use http::StatusCode;
use mockito::{Server, ServerGuard};
use serde_json::json;
use stripe_gateway::{
    error::translate, types::*, ErrorKind, GatewayConfig, GatewayError, StripeGateway,
};

fn gateway_for(server: &ServerGuard) -> StripeGateway {
    StripeGateway::with_config(
        GatewayConfig::new("sk_test").with_base_url(format!("{}/v1/", server.url())),
    )
    .unwrap()
}

#[test]
fn test_validation_error_message() {
    let error = GatewayError::validation("amount must be positive");

    let error_msg = error.to_string();
    assert!(
        error_msg.contains("Invalid request"),
        "Error message MUST contain 'Invalid request' - actual: {}",
        error_msg
    );
    assert!(
        error_msg.contains("amount must be positive"),
        "Error message MUST contain the specific reason - actual: {}",
        error_msg
    );
    assert!(error.is_local());
    assert!(error.status().is_none());
}

#[test]
fn test_missing_path_parameter_message() {
    let error = GatewayError::missing_path_parameter("id", "charges/{id}/refund");

    let error_msg = error.to_string();
    assert!(
        error_msg.contains("'id'") && error_msg.contains("charges/{id}/refund"),
        "Error message MUST name the parameter and the route - actual: {}",
        error_msg
    );
    assert!(error.is_local());
}

#[test]
fn test_api_error_display() {
    let error = translate(
        StatusCode::BAD_REQUEST,
        r#"{"error":{"type":"invalid_request_error","message":"Missing required param: amount","param":"amount"}}"#,
    );

    let error_msg = error.to_string();
    assert!(
        error_msg.contains("400") && error_msg.contains("invalid_request_error"),
        "Error message MUST carry status and kind - actual: {}",
        error_msg
    );
    assert!(
        error_msg.contains("[param: amount]"),
        "Error message MUST name the offending param - actual: {}",
        error_msg
    );
    assert!(!error.is_local());
    assert!(!error.is_transport());
}

#[test]
fn test_every_error_kind_is_recognised() {
    let kinds = [
        ("api_error", ErrorKind::ApiError),
        ("api_connection_error", ErrorKind::ApiConnectionError),
        ("authentication_error", ErrorKind::AuthenticationError),
        ("card_error", ErrorKind::CardError),
        ("idempotency_error", ErrorKind::IdempotencyError),
        ("invalid_request_error", ErrorKind::InvalidRequestError),
        ("rate_limit_error", ErrorKind::RateLimitError),
        ("something_new", ErrorKind::Unknown),
    ];

    for (wire, kind) in kinds {
        let body = json!({"error": {"type": wire, "message": "m"}}).to_string();
        let error = translate(StatusCode::BAD_REQUEST, &body);
        assert_eq!(error.api_error().unwrap().kind, kind, "kind for {}", wire);
    }
}

#[tokio::test]
async fn test_authentication_failure() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("GET", "/v1/customers/cus_1")
        .with_status(401)
        .with_body(
            json!({
                "error": {
                    "type": "invalid_request_error",
                    "message": "Invalid API Key provided: sk_test"
                }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let gateway = gateway_for(&server);
    let err = gateway
        .get(&GetCustomer { id: "cus_1".into() })
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
    assert!(!err.is_not_found());
}

#[tokio::test]
async fn test_unparseable_server_error() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("GET", "/v1/invoices/upcoming")
        .with_status(502)
        .with_header("content-type", "text/html")
        .with_body("<html>Bad Gateway</html>")
        .create_async()
        .await;

    let gateway = gateway_for(&server);
    let err = gateway
        .get(&GetUpcomingInvoice {
            customer: "cus_1".into(),
            subscription: None,
        })
        .await
        .unwrap_err();

    let api = err.api_error().unwrap();
    assert_eq!(api.status, StatusCode::BAD_GATEWAY);
    assert_eq!(api.kind, ErrorKind::Unknown);
    assert!(api.message.contains("502"));
    assert!(api.message.contains("Bad Gateway"));
}

#[tokio::test]
async fn test_empty_error_body() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("DELETE", "/v1/coupons/SPRING")
        .with_status(500)
        .create_async()
        .await;

    let gateway = gateway_for(&server);
    let err = gateway
        .delete(&DeleteCoupon {
            id: "SPRING".into(),
        })
        .await
        .unwrap_err();

    let api = err.api_error().unwrap();
    assert_eq!(api.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(api.message, "HTTP 500 Internal Server Error");
}

#[tokio::test]
async fn test_success_with_wrong_shape_is_decode_error() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("GET", "/v1/plans/gold")
        .with_status(200)
        .with_body(r#"{"id": "gold", "amount": "lots"}"#)
        .create_async()
        .await;

    let gateway = gateway_for(&server);
    let err = gateway
        .get(&GetPlan { id: "gold".into() })
        .await
        .unwrap_err();

    match err {
        GatewayError::Decode { status, .. } => assert_eq!(status, StatusCode::OK),
        other => panic!("expected decode error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unreachable_host_is_transport_error() {
    let gateway = StripeGateway::with_config(
        GatewayConfig::new("sk_test").with_base_url("http://127.0.0.1:1/v1/"),
    )
    .unwrap();

    let err = gateway
        .get(&GetCharge { id: "ch_1".into() })
        .await
        .unwrap_err();

    assert!(err.is_transport());
    assert!(err.status().is_none());
    assert!(err.api_error().is_none());
}

#[tokio::test]
async fn test_missing_identifier_never_reaches_the_network() {
    let gateway = StripeGateway::with_config(
        GatewayConfig::new("sk_test").with_base_url("http://127.0.0.1:1/v1/"),
    )
    .unwrap();

    let err = gateway
        .post(&RefundCharge::default())
        .await
        .unwrap_err();

    assert!(matches!(err, GatewayError::MissingPathParameter { .. }));
}
