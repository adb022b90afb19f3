mod common;

use std::sync::atomic::Ordering;
use std::time::{Duration, Instant};

use axum::{Router, routing::get};
use axum_test::TestServer;
use geocode_proxy::api::handlers::reverse_handler;
use serde_json::Value;

fn reverse_app(state: geocode_proxy::AppState) -> TestServer {
    let app = Router::new()
        .route("/reverse", get(reverse_handler))
        .with_state(state);
    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_success_echoes_parsed_coordinates() {
    let ctx = common::create_test_state(vec![]);
    let server = reverse_app(ctx.state.clone());

    let response = server
        .get("/reverse")
        .add_query_param("lat", "48.8584")
        .add_query_param("lon", "2.2945")
        .await;
    response.assert_status_ok();

    let json = response.json::<Value>();
    assert_eq!(json["success"], true);
    assert_eq!(json["coordinates"]["lat"], 48.8584);
    assert_eq!(json["coordinates"]["lon"], 2.2945);
    assert_eq!(json["cached"], false);
    assert!(json["result"]["label"].is_string());
}

#[tokio::test]
async fn test_repeat_request_is_served_from_cache() {
    let ctx = common::create_test_state(vec![]);
    let server = reverse_app(ctx.state.clone());

    for expected_cached in [false, true] {
        let response = server
            .get("/reverse")
            .add_query_param("lat", "48.8584")
            .add_query_param("lon", "2.2945")
            .await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["cached"], expected_cached);
    }

    assert_eq!(ctx.geocoder.reverse_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_entry_lives_a_full_day() {
    let ctx = common::create_test_state(vec![]);
    let server = reverse_app(ctx.state.clone());

    server
        .get("/reverse")
        .add_query_param("lat", "48.8584")
        .add_query_param("lon", "2.2945")
        .await
        .assert_status_ok();

    // Raw parameter text in the key; 24h TTL, not the 1h of forward routes.
    let key = "reverse:48.8584:2.2945:default";
    let now = Instant::now();
    assert!(
        ctx.cache
            .get_at(key, now + Duration::from_secs(86399))
            .is_some()
    );
    assert!(
        ctx.cache
            .get_at(key, now + Duration::from_secs(86401))
            .is_none()
    );
}

#[tokio::test]
async fn test_zoom_is_part_of_the_key() {
    let ctx = common::create_test_state(vec![]);
    let server = reverse_app(ctx.state.clone());

    server
        .get("/reverse")
        .add_query_param("lat", "48.8584")
        .add_query_param("lon", "2.2945")
        .add_query_param("zoom", "10")
        .await
        .assert_status_ok();

    let now = Instant::now();
    assert!(ctx.cache.get_at("reverse:48.8584:2.2945:10", now).is_some());
    assert!(
        ctx.cache
            .get_at("reverse:48.8584:2.2945:default", now)
            .is_none()
    );
}

#[tokio::test]
async fn test_missing_coordinates_are_400() {
    let ctx = common::create_test_state(vec![]);
    let server = reverse_app(ctx.state.clone());

    let response = server.get("/reverse").add_query_param("lat", "48.8584").await;
    response.assert_status_bad_request();

    let json = response.json::<Value>();
    assert_eq!(json["error"], "Missing required parameters: lat and lon");
    assert_eq!(json["example"], "/reverse?lat=48.8584&lon=2.2945");

    assert_eq!(ctx.geocoder.reverse_calls.load(Ordering::SeqCst), 0);
    assert_eq!(ctx.cache.len(), 0);
}

#[tokio::test]
async fn test_non_numeric_coordinates_are_400() {
    let ctx = common::create_test_state(vec![]);
    let server = reverse_app(ctx.state.clone());

    let response = server
        .get("/reverse")
        .add_query_param("lat", "north")
        .add_query_param("lon", "2.2945")
        .await;
    response.assert_status_bad_request();

    let json = response.json::<Value>();
    assert_eq!(json["error"], "Invalid parameter: lat must be a number");
    assert_eq!(ctx.geocoder.reverse_calls.load(Ordering::SeqCst), 0);
}
