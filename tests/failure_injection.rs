//! Failure injection tests: the billing endpoint misbehaves.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use billing_gateway_sdk::{GatewayClient, Identity, ZipQuery};
use serde_json::json;

mod common;

fn zip_query() -> ZipQuery {
    ZipQuery {
        country: "US".to_string(),
        zip: "98".to_string(),
        ..Default::default()
    }
}

fn unknown_error() -> serde_json::Value {
    json!({"code": "ma000001", "message": "unknown error. try request later"})
}

#[tokio::test]
async fn test_saved_card_backend_down() {
    let billing = common::unreachable_url().await;
    let (gateway, shutdown) = common::start_gateway(common::gateway_config(&billing)).await;

    let res = GatewayClient::new(&gateway)
        .remove_saved_card("ffffffffffffffffffffffff", Some("customer-token"))
        .await
        .unwrap();

    assert_eq!(res.status, 500);
    assert_eq!(res.json::<serde_json::Value>().unwrap(), unknown_error());
    shutdown.trigger();
}

#[tokio::test]
async fn test_zip_backend_unavailable() {
    let billing = common::start_programmable_billing(|_, _| async {
        (503, "Service Unavailable".to_string())
    })
    .await;
    let (gateway, _shutdown) = common::start_gateway(common::gateway_config(&billing)).await;

    let res = GatewayClient::new(&gateway).find_zip_code(&zip_query()).await.unwrap();

    assert_eq!(res.status, 500);
    assert_eq!(res.json::<serde_json::Value>().unwrap(), unknown_error());
}

#[tokio::test]
async fn test_permissions_backend_garbage() {
    let billing = common::start_programmable_billing(|_, _| async {
        (200, "<html>not json</html>".to_string())
    })
    .await;
    let (gateway, _shutdown) = common::start_gateway(common::gateway_config(&billing)).await;

    let res = GatewayClient::new(&gateway)
        .get_permissions(&Identity {
            user_id: "1".to_string(),
            merchant_id: "2".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(res.status, 500);
    assert_eq!(
        res.json::<serde_json::Value>().unwrap(),
        json!({"code": "ma000003", "message": "internal error"})
    );
}

#[tokio::test]
async fn test_slow_backend_times_out() {
    let billing = common::start_programmable_billing(|_, _| async {
        tokio::time::sleep(Duration::from_secs(3)).await;
        (200, json!({"count": 0, "items": []}).to_string())
    })
    .await;
    let (gateway, _shutdown) = common::start_gateway(common::gateway_config(&billing)).await;

    let res = GatewayClient::new(&gateway).find_zip_code(&zip_query()).await.unwrap();

    assert_eq!(res.status, 500);
    assert_eq!(res.json::<serde_json::Value>().unwrap(), unknown_error());
}

#[tokio::test]
async fn test_slow_backend_within_client_timeout_succeeds() {
    let billing = common::start_programmable_billing(|_, _| async {
        tokio::time::sleep(Duration::from_secs(2)).await;
        (200, json!({"count": 0, "items": []}).to_string())
    })
    .await;
    let mut config = common::gateway_config(&billing);
    config.billing.request_timeout_secs = 5;
    let (gateway, _shutdown) = common::start_gateway(config).await;

    let res = GatewayClient::new(&gateway).find_zip_code(&zip_query()).await.unwrap();

    assert_eq!(res.status, 200);
    assert_eq!(
        res.json::<serde_json::Value>().unwrap(),
        json!({"count": 0, "items": []})
    );
}

#[tokio::test]
async fn test_invalid_request_never_reaches_backend() {
    let calls = Arc::new(AtomicU32::new(0));
    let counter = calls.clone();
    let billing = common::start_programmable_billing(move |_, _| {
        counter.fetch_add(1, Ordering::SeqCst);
        async { (200, json!({"count": 0, "items": []}).to_string()) }
    })
    .await;
    let (gateway, _shutdown) = common::start_gateway(common::gateway_config(&billing)).await;

    let res = GatewayClient::new(&gateway)
        .find_zip_code(&ZipQuery {
            zip: "98".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(res.status, 400);
    assert!(res.body.contains("'Country'"));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}
