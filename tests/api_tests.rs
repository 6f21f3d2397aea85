use std::sync::Arc;

use axum_test::TestServer;
use serde_json::Value;

use safehaven::api::{self, AppState};
use safehaven::services::{AlertSettings, BroadcastNotificationSink, ManualTimerSource};
use safehaven::{create_router, Config};

fn create_test_app() -> (TestServer, ManualTimerSource) {
    let timers = ManualTimerSource::new();
    let state = AppState::with_parts(
        AlertSettings::default(),
        Arc::new(timers.clone()),
        BroadcastNotificationSink::new(16, 16),
    )
    .unwrap();

    let server = TestServer::new(api::routes().with_state(state)).unwrap();
    (server, timers)
}

#[tokio::test]
async fn test_health_check() {
    let (server, _) = create_test_app();

    let response = server.get("/api/health").await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.text(), "OK");
}

#[tokio::test]
async fn test_sos_starts_idle() {
    let (server, _) = create_test_app();

    let response = server.get("/api/sos").await;

    assert_eq!(response.status_code(), 200);
    let json: Value = response.json();
    assert_eq!(json["phase"], "idle");
    assert_eq!(json["label"], "SOS");
    assert_eq!(json["isActive"], false);
    assert_eq!(json["remainingSeconds"], 0);
}

#[tokio::test]
async fn test_sos_trigger_countdown_and_activation() {
    let (server, timers) = create_test_app();

    let response = server.post("/api/sos/trigger").await;
    assert_eq!(response.status_code(), 200);
    let json: Value = response.json();
    assert_eq!(json["phase"], "countingDown");
    assert_eq!(json["label"], "3");

    timers.fire_times(3);

    let json: Value = server.get("/api/sos").await.json();
    assert_eq!(json["phase"], "active");
    assert_eq!(json["isActive"], true);

    let notifications: Value = server.get("/api/notifications").await.json();
    assert_eq!(notifications[0]["title"], "SOS Activated");
    assert_eq!(notifications[0]["kind"], "sosActivated");

    // Second press deactivates
    let json: Value = server.post("/api/sos/trigger").await.json();
    assert_eq!(json["phase"], "idle");

    let notifications: Value = server.get("/api/notifications").await.json();
    assert_eq!(notifications[0]["title"], "SOS Deactivated");
    assert_eq!(notifications.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_sos_cancel_during_countdown() {
    let (server, timers) = create_test_app();

    server.post("/api/sos/trigger").await;
    timers.fire();

    let json: Value = server.post("/api/sos/trigger").await.json();
    assert_eq!(json["phase"], "idle");

    timers.fire_times(3);
    let json: Value = server.get("/api/sos").await.json();
    assert_eq!(json["phase"], "idle");

    let notifications: Value = server.get("/api/notifications").await.json();
    let titles: Vec<&str> = notifications
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|n| n["title"].as_str())
        .collect();
    assert_eq!(titles, vec!["SOS Deactivated"]);
}

#[tokio::test]
async fn test_check_in_flow() {
    let (server, _) = create_test_app();

    let history: Value = server.get("/api/check-ins").await.json();
    assert_eq!(history.as_array().unwrap().len(), 3);

    let response = server.post("/api/check-ins").await;
    assert_eq!(response.status_code(), 201);
    let check_in: Value = response.json();
    assert_eq!(check_in["status"], "completed");
    assert_eq!(check_in["location"], "Current Location");

    let history: Value = server.get("/api/check-ins").await.json();
    assert_eq!(history.as_array().unwrap().len(), 4);
    assert_eq!(history[0]["id"], check_in["id"]);

    let schedule: Value = server.post("/api/check-ins/schedule").await.json();
    assert_eq!(schedule["isActive"], false);
    assert_eq!(schedule["nextCheckIn"], "2:00 PM");
}

#[tokio::test]
async fn test_contacts_endpoints() {
    let (server, _) = create_test_app();

    let contacts: Value = server.get("/api/contacts").await.json();
    assert_eq!(contacts.as_array().unwrap().len(), 3);

    let response = server.post("/api/contacts/1/call").await;
    assert_eq!(response.status_code(), 200);
    let contact: Value = response.json();
    assert_eq!(contact["name"], "Mom");
    assert_eq!(contact["isPrimary"], true);

    let response = server.delete("/api/contacts/1").await;
    assert_eq!(response.status_code(), 200);

    let response = server.get("/api/contacts/1").await;
    assert_eq!(response.status_code(), 404);
    let error: Value = response.json();
    assert_eq!(error["error"], "NotFound");

    let response = server.delete("/api/contacts/missing").await;
    assert_eq!(response.status_code(), 404);

    let contacts: Value = server.get("/api/contacts").await.json();
    assert_eq!(contacts.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_location_sharing_toggle() {
    let (server, _) = create_test_app();

    let status: Value = server.get("/api/location").await.json();
    assert_eq!(status["isSharing"], false);
    assert_eq!(status["isOnline"], true);

    let status: Value = server.post("/api/location/sharing").await.json();
    assert_eq!(status["isSharing"], true);

    let status: Value = server.post("/api/location/sharing").await.json();
    assert_eq!(status["isSharing"], false);

    let notifications: Value = server.get("/api/notifications").await.json();
    assert_eq!(notifications.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_profile_notifications_toggle() {
    let (server, _) = create_test_app();

    let profile: Value = server.get("/api/profile").await.json();
    assert_eq!(profile["name"], "Sarah Johnson");
    assert_eq!(profile["notificationsEnabled"], true);

    let profile: Value = server.post("/api/profile/notifications").await.json();
    assert_eq!(profile["notificationsEnabled"], false);
}

#[tokio::test]
async fn test_resources_by_category() {
    let (server, _) = create_test_app();

    let all: Value = server.get("/api/resources").await.json();
    assert_eq!(all.as_array().unwrap().len(), 6);

    let mental_health: Value = server
        .get("/api/resources")
        .add_query_param("category", "mental-health")
        .await
        .json();
    assert_eq!(mental_health.as_array().unwrap().len(), 3);

    let response = server
        .get("/api/resources")
        .add_query_param("category", "weather")
        .await;
    assert_eq!(response.status_code(), 400);

    let sections: Value = server.get("/api/resources/sections").await.json();
    assert_eq!(sections[0]["category"], "emergency");
    assert_eq!(sections.as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_resource_actions() {
    let (server, _) = create_test_app();

    let response = server.post("/api/resources/1/call").await;
    assert_eq!(response.status_code(), 200);

    let response = server.post("/api/resources/1/website").await;
    assert_eq!(response.status_code(), 400);

    let response = server.post("/api/resources/2/website").await;
    assert_eq!(response.status_code(), 200);

    let response = server.post("/api/resources/99/call").await;
    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn test_full_router_with_cors() {
    let config = Config {
        cors_origins: vec!["https://app.example".to_string()],
        ..Config::default()
    };
    let state = AppState::with_parts(
        config.alert_settings(),
        Arc::new(ManualTimerSource::new()),
        BroadcastNotificationSink::new(4, 4),
    )
    .unwrap();

    let server = TestServer::new(create_router(state, &config).unwrap()).unwrap();

    let response = server.get("/api/health").await;
    assert_eq!(response.status_code(), 200);
}
