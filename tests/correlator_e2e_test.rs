use std::time::Duration;

use rendez::driver::HttpDriver;
use rendez::schema::ApiEnvelope;
use rendez::{Correlator, Page, RendezError, StatusMatcher, UrlMatcher};
use serde::Deserialize;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Debug, Default, Deserialize)]
struct LabTestOffer {
    name: String,
    price: String,
}

/// Navigation to the diagnostics screen provokes a /lab-test call; the
/// capture resolves with that call's body and the displayed price can be
/// reconciled against the API value.
#[tokio::test]
async fn test_capture_lab_test_listing() {
    rendez::logger::init_logger();
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/lab-test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "success",
            "data": {"name": "Complete Blood Count", "price": "1,299"}
        })))
        .mount(&mock_server)
        .await;

    let page = Page::new();
    let driver = HttpDriver::new(&page);
    let correlator = Correlator::new(&page);

    let url = format!("{}/api/v2/lab-test?city=2", mock_server.uri());
    let captured = correlator
        .expect(UrlMatcher::contains("/lab-test").unwrap())
        .within(Duration::from_secs(5))
        .trigger(|| async { driver.get(&url).await })
        .await
        .unwrap();

    assert_eq!(captured.status.code(), 200);

    let envelope: ApiEnvelope<LabTestOffer> = captured.decode().unwrap();
    assert!(envelope.is_success());

    let offer = envelope.data.unwrap();
    assert_eq!(offer.name, "Complete Blood Count");

    // what the UI would render for this offer
    let displayed_price = format!("₹ {}", offer.price);
    assert_eq!(displayed_price, "₹ 1,299");
    assert_eq!(captured.field_str("data.price"), Some("1,299"));
}

/// A 500 answer never satisfies the default status matcher, so the capture
/// must end in a timeout rather than returning the error response.
#[tokio::test]
async fn test_server_error_leads_to_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/lab-test"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&mock_server)
        .await;

    let page = Page::new();
    let driver = HttpDriver::new(&page);
    let correlator = Correlator::with_timeout(&page, Duration::from_millis(300));

    let url = format!("{}/api/v2/lab-test", mock_server.uri());
    let err = correlator
        .expect(UrlMatcher::contains("/lab-test").unwrap())
        .status(StatusMatcher::ok())
        .trigger(|| async { driver.get(&url).await })
        .await
        .unwrap_err();

    match err {
        RendezError::Timeout {
            matcher,
            responses_seen,
            ..
        } => {
            assert!(matcher.contains("/lab-test"));
            // the 500 was observed but did not match
            assert_eq!(responses_seen, 1);
        }
        other => panic!("expected Timeout, got {:?}", other),
    }
}

/// Empty body: the capture itself succeeds, decoding degrades to None.
#[tokio::test]
async fn test_empty_body_is_soft_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/action-plan"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let page = Page::new();
    let driver = HttpDriver::new(&page);
    let correlator = Correlator::with_timeout(&page, Duration::from_secs(5));

    let url = format!("{}/api/v2/action-plan", mock_server.uri());
    let captured = correlator
        .expect(UrlMatcher::contains("/action-plan").unwrap())
        .trigger(|| async { driver.get(&url).await })
        .await
        .unwrap();

    assert_eq!(captured.status.code(), 200);
    assert!(captured.raw_body.is_empty());
    assert!(captured.parsed.is_none());
    assert!(captured.decode::<serde_json::Value>().is_none());
}

/// The response arrives while the trigger action is still running (the
/// driver awaits the full round-trip before returning); arming beforehand
/// means the buffered event is still captured once the wait begins.
#[tokio::test]
async fn test_response_before_wait_begins_is_captured() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "success",
            "data": [{"order_id": "ORD-1001", "state": "shipped"}]
        })))
        .mount(&mock_server)
        .await;

    let page = Page::new();
    let driver = HttpDriver::new(&page);
    let correlator = Correlator::with_timeout(&page, Duration::from_secs(5));

    let url = format!("{}/api/v2/orders", mock_server.uri());
    let captured = correlator
        .expect(UrlMatcher::contains("/orders").unwrap())
        .trigger(|| async { driver.get(&url).await })
        .await
        .unwrap();

    assert_eq!(
        captured.field_str("data.0.order_id"),
        None,
        "array indices are not part of dot paths"
    );
    assert_eq!(captured.field("data").map(|v| v.is_array()), Some(true));
}

/// Two sequential captures on one page each see only their own response.
#[tokio::test]
async fn test_sequential_captures_are_isolated() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/profile"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "success",
            "data": {"name": "Asha"}
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v2/vitals"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "success",
            "data": {"heart_rate": 72}
        })))
        .mount(&mock_server)
        .await;

    let page = Page::new();
    let driver = HttpDriver::new(&page);
    let correlator = Correlator::with_timeout(&page, Duration::from_secs(5));

    let profile_url = format!("{}/api/v2/profile", mock_server.uri());
    let profile = correlator
        .expect(UrlMatcher::contains("/profile").unwrap())
        .trigger(|| async { driver.get(&profile_url).await })
        .await
        .unwrap();

    let vitals_url = format!("{}/api/v2/vitals", mock_server.uri());
    let vitals = correlator
        .expect(UrlMatcher::contains("/vitals").unwrap())
        .trigger(|| async { driver.get(&vitals_url).await })
        .await
        .unwrap();

    assert_eq!(profile.field_str("data.name"), Some("Asha"));
    assert_eq!(
        vitals.field("data.heart_rate").and_then(|v| v.as_i64()),
        Some(72)
    );
}

/// A regex matcher can pin the capture to one resource id.
#[tokio::test]
async fn test_pattern_matcher_end_to_end() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/orders/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "success",
            "data": {"order_id": 42}
        })))
        .mount(&mock_server)
        .await;

    let page = Page::new();
    let driver = HttpDriver::new(&page);
    let correlator = Correlator::with_timeout(&page, Duration::from_secs(5));

    let url = format!("{}/api/v2/orders/42", mock_server.uri());
    let captured = correlator
        .expect(UrlMatcher::pattern(r"/orders/\d+$").unwrap())
        .trigger(|| async { driver.get(&url).await })
        .await
        .unwrap();

    assert_eq!(
        captured.field("data.order_id").and_then(|v| v.as_i64()),
        Some(42)
    );
}

/// A trigger action whose own request fails surfaces as TriggerFailed,
/// not as a capture timeout.
#[tokio::test]
async fn test_unreachable_server_fails_the_trigger() {
    let page = Page::new();
    let driver = HttpDriver::new(&page);
    let correlator = Correlator::with_timeout(&page, Duration::from_millis(300));

    // nothing listens on this port
    let err = correlator
        .expect(UrlMatcher::contains("/api").unwrap())
        .trigger(|| async { driver.get("http://127.0.0.1:1/api/ping").await })
        .await
        .unwrap_err();

    assert!(matches!(err, RendezError::TriggerFailed(_)));
}
