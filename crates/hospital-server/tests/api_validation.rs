//! Malformed requests fail with 400 before any procedure is called.

mod common;

use common::TestServer;
use hospital_server::{AppConfig, NumericPolicy};
use serde_json::{Value, json};

async fn post(server: &TestServer, path: &str, body: &Value) -> (u16, Value) {
    let resp = reqwest::Client::new()
        .post(server.url(path))
        .json(body)
        .send()
        .await
        .unwrap();
    let status = resp.status().as_u16();
    (status, resp.json().await.unwrap())
}

#[tokio::test]
async fn each_missing_required_field_is_named() {
    let server = TestServer::start().await;

    let cases: Vec<(&str, Value)> = vec![
        (
            "/api/patients",
            json!({"name": "A", "email": "a@x.com", "gender": "F", "birthday": "2000-01-01"}),
        ),
        ("/api/patients/admit", json!({"patient_id": 1, "room_id": 2})),
        (
            "/api/appointments",
            json!({"email": "p@x.com", "doctor_id": 5, "appointment_date": "2024-06-01", "appointment_start_time": "09:00"}),
        ),
        (
            "/api/checkups",
            json!({"checkup_date": "2024-06-02", "checkup_type": "blood panel"}),
        ),
        ("/api/prescriptions", json!({"medication": "aspirin"})),
    ];

    for (path, full) in cases {
        for field in full.as_object().unwrap().keys() {
            let mut body = full.clone();
            body.as_object_mut().unwrap().remove(field);
            let (status, err) = post(&server, path, &body).await;
            assert_eq!(status, 400, "{path} without {field}");
            assert_eq!(err["kind"], "validation");
            assert_eq!(err["message"], format!("Missing required field: {field}"));
        }
    }

    assert!(server.store.calls().is_empty());
    server.stop().await;
}

#[tokio::test]
async fn discharge_and_update_require_their_body_fields() {
    let server = TestServer::start().await;

    let (status, err) = post(&server, "/api/patients/3/discharge", &json!({})).await;
    assert_eq!(status, 400);
    assert_eq!(err["message"], "Missing required field: patient_id");

    let resp = reqwest::Client::new()
        .put(server.url("/api/checkups/3"))
        .json(&json!({"checkup_type": "x"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 400);
    let err: Value = resp.json().await.unwrap();
    assert_eq!(err["message"], "Missing required field: result");

    assert!(server.store.calls().is_empty());
    server.stop().await;
}

#[tokio::test]
async fn wrong_types_and_bad_bodies_are_rejected() {
    let server = TestServer::start().await;
    let client = reqwest::Client::new();

    let (status, err) = post(
        &server,
        "/api/prescriptions",
        &json!({"medication": "aspirin", "record_id": "seven"}),
    )
    .await;
    assert_eq!(status, 400);
    assert_eq!(err["kind"], "validation");
    assert!(err["message"].as_str().unwrap().contains("record_id"));

    let resp = client
        .post(server.url("/api/appointments"))
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 400);
    let err: Value = resp.json().await.unwrap();
    assert_eq!(err["kind"], "deserialization");

    let (status, err) = post(&server, "/api/patients/admit", &json!([1, 2])).await;
    assert_eq!(status, 400);
    assert_eq!(err["kind"], "deserialization");

    let resp = client
        .get(server.url("/api/doctors/seven/appointments"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 400);
    let err: Value = resp.json().await.unwrap();
    assert!(err["message"].as_str().unwrap().contains("id"));

    assert!(server.store.calls().is_empty());
    server.stop().await;
}

#[tokio::test]
async fn reject_policy_refuses_fractional_ids() {
    let mut cfg = AppConfig::default();
    cfg.mapping.fractional_numbers = NumericPolicy::Reject;
    let server = TestServer::start_with(cfg).await;

    let (status, err) = post(
        &server,
        "/api/patients/admit",
        &json!({"patient_id": 3.7, "room_id": 1}),
    )
    .await;
    assert_eq!(status, 400);
    assert!(err["message"].as_str().unwrap().contains("patient_id"));
    assert!(server.store.calls().is_empty());

    server.stop().await;
}

#[tokio::test]
async fn ids_wider_than_sql_integer_are_rejected() {
    let server = TestServer::start().await;
    let client = reqwest::Client::new();

    let (status, err) = post(
        &server,
        "/api/patients/admit",
        &json!({"patient_id": 3_000_000_000i64, "room_id": 1}),
    )
    .await;
    assert_eq!(status, 400);
    assert_eq!(err["kind"], "validation");
    assert_eq!(
        err["message"],
        "Invalid value for field patient_id: number out of range"
    );

    let resp = client
        .get(server.url("/api/doctors/3000000000/appointments"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 400);
    let err: Value = resp.json().await.unwrap();
    assert_eq!(err["message"], "Invalid value for field id: number out of range");

    assert!(server.store.calls().is_empty());
    server.stop().await;
}

#[tokio::test]
async fn checkup_update_requires_integer_path_id() {
    let server = TestServer::start().await;

    let resp = reqwest::Client::new()
        .put(server.url("/api/checkups/abc"))
        .json(&json!({"result": "normal"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 400);
    let err: Value = resp.json().await.unwrap();
    assert_eq!(err["kind"], "validation");
    assert_eq!(
        err["message"],
        "Invalid value for field id: expected an integer, got 'abc'"
    );

    assert!(server.store.calls().is_empty());
    server.stop().await;
}
