mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use crm_backend::entities::{account, prelude::Account};
use crm_backend::{build_router, AppState};
use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use rust_decimal_macros::dec;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use crate::common::setup_test_db;

async fn build_test_router() -> Router {
    let db = setup_test_db().await.expect("Failed to connect to test DB");
    build_router(AppState { db })
}

/// Tests run against a shared database, so each one works with its own
/// dealer/account namespace derived from a fresh uuid.
fn base_payload(suffix: &str) -> Value {
    json!({
        "account_name": format!("Acme-{suffix}"),
        "dealer_id": format!("D1-{suffix}"),
        "dealer_code": format!("DC1-{suffix}"),
        "opportunity_owner": "Alice",
        "opportunity_name": "Deal1",
        "probability": 55,
        "amount": "100.50"
    })
}

async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn as_decimal(value: &Value) -> Decimal {
    value.as_str().unwrap().parse().unwrap()
}

#[tokio::test]
async fn welcome_endpoint_reports_success() {
    let app = build_test_router().await;

    let (status, body) = get_json(&app, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "Success");
    assert!(body["message"].as_str().unwrap().contains("CRM"));
}

#[tokio::test]
async fn new_customer_derives_stage_and_conversions() {
    let app = build_test_router().await;
    let suffix = Uuid::new_v4().to_string();

    let (status, body) = post_json(&app, "/new_customer", base_payload(&suffix)).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Customer created successfully");

    let details = &body["customer_details"];
    assert_eq!(details["stage"], "Needs Analysis");
    assert_eq!(details["probability"], 55);
    assert_eq!(details["account_name"], format!("Acme-{suffix}"));
    assert_eq!(details["dealer_id"], format!("D1-{suffix}"));
    assert_eq!(details["opportunity_owner"], "Alice");
    assert!(details["opportunity_id"].as_str().is_some());
    assert!(details["created_date"].as_str().is_some());

    // 100.50 INR at the fixed rates, rounded to 2 dp
    let conversions = &details["currency_conversions"];
    assert_eq!(as_decimal(&conversions["usd"]), dec!(8542.50));
    assert_eq!(as_decimal(&conversions["aus"]), dec!(6030.00));
    assert_eq!(as_decimal(&conversions["cad"]), dec!(7035.00));

    let words = details["amount_in_words"].as_str().unwrap();
    assert!(words.contains("rupee"));
}

#[tokio::test]
async fn new_customer_without_amount_leaves_conversions_absent() {
    let app = build_test_router().await;
    let suffix = Uuid::new_v4().to_string();

    let mut payload = base_payload(&suffix);
    payload.as_object_mut().unwrap().remove("amount");

    let (status, body) = post_json(&app, "/new_customer", payload).await;

    assert_eq!(status, StatusCode::CREATED);
    let details = &body["customer_details"];
    assert!(details["amount"].is_null());
    assert!(details["currency_conversions"]["usd"].is_null());
    assert!(details["currency_conversions"]["aus"].is_null());
    assert!(details["currency_conversions"]["cad"].is_null());
    assert_eq!(details["amount_in_words"], "Zero");
}

#[tokio::test]
async fn new_customer_requires_account_name() {
    let app = build_test_router().await;
    let suffix = Uuid::new_v4().to_string();

    let mut payload = base_payload(&suffix);
    payload.as_object_mut().unwrap().remove("account_name");

    let (status, body) = post_json(&app, "/new_customer", payload).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "account_name is required");
}

#[tokio::test]
async fn new_customer_requires_dealer_fields() {
    let app = build_test_router().await;
    let suffix = Uuid::new_v4().to_string();

    let mut payload = base_payload(&suffix);
    payload.as_object_mut().unwrap().remove("dealer_code");

    let (status, body) = post_json(&app, "/new_customer", payload).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "dealer_id, dealer_code, and opportunity_owner are required"
    );
}

#[tokio::test]
async fn new_customer_rejects_gap_probability() {
    let app = build_test_router().await;
    let suffix = Uuid::new_v4().to_string();

    let mut payload = base_payload(&suffix);
    payload["probability"] = json!(5);

    let (status, body) = post_json(&app, "/new_customer", payload).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("Invalid probability"));
}

#[tokio::test]
async fn new_customer_rejects_malformed_close_date() {
    let app = build_test_router().await;
    let suffix = Uuid::new_v4().to_string();

    let mut payload = base_payload(&suffix);
    payload["close_date"] = json!("31-12-2026");

    let (status, body) = post_json(&app, "/new_customer", payload).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("Invalid date format for close_date"));
}

#[tokio::test]
async fn new_customer_accepts_well_formed_close_date() {
    let app = build_test_router().await;
    let suffix = Uuid::new_v4().to_string();

    let mut payload = base_payload(&suffix);
    payload["close_date"] = json!("2026-12-31 17:30:00");

    let (status, body) = post_json(&app, "/new_customer", payload).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        body["customer_details"]["close_date"],
        "2026-12-31 17:30:00"
    );
}

#[tokio::test]
async fn new_customer_defaults_stage_without_probability() {
    let app = build_test_router().await;
    let suffix = Uuid::new_v4().to_string();

    let mut payload = base_payload(&suffix);
    payload.as_object_mut().unwrap().remove("probability");

    let (status, body) = post_json(&app, "/new_customer", payload).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["customer_details"]["stage"], "Unknown");
    assert!(body["customer_details"]["probability"].is_null());
}

#[tokio::test]
async fn new_customer_uses_caller_stage_without_probability() {
    let app = build_test_router().await;
    let suffix = Uuid::new_v4().to_string();

    let mut payload = base_payload(&suffix);
    payload.as_object_mut().unwrap().remove("probability");
    payload["stage"] = json!("Custom");

    let (status, body) = post_json(&app, "/new_customer", payload).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["customer_details"]["stage"], "Custom");
    assert!(body["customer_details"]["probability"].is_null());
}

#[tokio::test]
async fn new_customer_rejects_non_integer_probability() {
    let app = build_test_router().await;
    let suffix = Uuid::new_v4().to_string();

    // A type-malformed body must still answer JSON, with a 400
    let mut payload = base_payload(&suffix);
    payload["probability"] = json!("55");

    let (status, body) = post_json(&app, "/new_customer", payload).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().is_some());

    let mut payload = base_payload(&suffix);
    payload["probability"] = json!(5.5);

    let (status, body) = post_json(&app, "/new_customer", payload).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().is_some());
}

#[tokio::test]
async fn dealer_id_collision_fails_and_rolls_back() {
    let app = build_test_router().await;
    let suffix = Uuid::new_v4().to_string();

    let (status, _) = post_json(&app, "/new_customer", base_payload(&suffix)).await;
    assert_eq!(status, StatusCode::CREATED);

    // Same dealer_id under different credentials: the triple lookup misses,
    // the insert hits the primary key, and the re-fetch cannot reconcile.
    let payload = json!({
        "account_name": format!("Rollback-{suffix}"),
        "dealer_id": format!("D1-{suffix}"),
        "dealer_code": format!("DC2-{suffix}"),
        "opportunity_owner": "Bob",
        "opportunity_name": "Deal2"
    });

    let (status, body) = post_json(&app, "/new_customer", payload).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Internal server error");

    // The account created earlier in the same intake must be rolled back
    let db = setup_test_db().await.expect("Failed to connect to test DB");
    let orphan = Account::find()
        .filter(account::Column::AccountName.eq(format!("Rollback-{suffix}")))
        .one(&db)
        .await
        .unwrap();
    assert!(orphan.is_none(), "account write should roll back with the failed intake");
}

#[tokio::test]
async fn repeated_intake_reuses_the_account() {
    let app = build_test_router().await;
    let suffix = Uuid::new_v4().to_string();

    let (status, first) = post_json(&app, "/new_customer", base_payload(&suffix)).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, second) = post_json(&app, "/new_customer", base_payload(&suffix)).await;
    assert_eq!(status, StatusCode::CREATED);

    // Same account_name resolves to the same account row, not a duplicate
    assert_eq!(
        first["customer_details"]["account_id"],
        second["customer_details"]["account_id"]
    );
    assert_ne!(
        first["customer_details"]["opportunity_id"],
        second["customer_details"]["opportunity_id"]
    );
}

#[tokio::test]
async fn get_customers_returns_created_opportunity() {
    let app = build_test_router().await;
    let suffix = Uuid::new_v4().to_string();

    let (status, created) = post_json(&app, "/new_customer", base_payload(&suffix)).await;
    assert_eq!(status, StatusCode::CREATED);
    let opportunity_id = created["customer_details"]["opportunity_id"]
        .as_str()
        .unwrap()
        .to_string();

    let uri = format!(
        "/get-customers?dealer_id=D1-{suffix}&dealer_code=DC1-{suffix}&opportunity_owner=Alice"
    );
    let (status, body) = get_json(&app, &uri).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Customers fetched successfully");

    let customers = body["customers"].as_array().unwrap();
    assert_eq!(customers.len(), 1);
    assert_eq!(customers[0]["opportunity_id"], opportunity_id);
    assert_eq!(customers[0]["account_name"], format!("Acme-{suffix}"));
}

#[tokio::test]
async fn get_customers_rejects_unknown_dealer() {
    let app = build_test_router().await;
    let suffix = Uuid::new_v4().to_string();

    let uri = format!(
        "/get-customers?dealer_id=D1-{suffix}&dealer_code=DC1-{suffix}&opportunity_owner=Alice"
    );
    let (status, body) = get_json(&app, &uri).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid dealer information");
}

#[tokio::test]
async fn get_customers_rejects_wrong_owner() {
    let app = build_test_router().await;
    let suffix = Uuid::new_v4().to_string();

    let (status, _) = post_json(&app, "/new_customer", base_payload(&suffix)).await;
    assert_eq!(status, StatusCode::CREATED);

    // The gate matches the full credential triple, owner included
    let uri = format!(
        "/get-customers?dealer_id=D1-{suffix}&dealer_code=DC1-{suffix}&opportunity_owner=Mallory"
    );
    let (status, body) = get_json(&app, &uri).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid dealer information");
}

#[tokio::test]
async fn get_customers_filters_by_opportunity_name() {
    let app = build_test_router().await;
    let suffix = Uuid::new_v4().to_string();

    let (status, _) = post_json(&app, "/new_customer", base_payload(&suffix)).await;
    assert_eq!(status, StatusCode::CREATED);

    let uri = format!(
        "/get-customers?dealer_id=D1-{suffix}&dealer_code=DC1-{suffix}&opportunity_owner=Alice&opportunity_name=SomethingElse"
    );
    let (status, body) = get_json(&app, &uri).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body["message"],
        "No customers found for the given dealer code"
    );
}

#[tokio::test]
async fn single_customer_round_trip() {
    let app = build_test_router().await;
    let suffix = Uuid::new_v4().to_string();

    let (status, created) = post_json(&app, "/new_customer", base_payload(&suffix)).await;
    assert_eq!(status, StatusCode::CREATED);
    let opportunity_id = created["customer_details"]["opportunity_id"]
        .as_str()
        .unwrap()
        .to_string();

    let uri = format!(
        "/single-customer?dealer_id=D1-{suffix}&dealer_code=DC1-{suffix}&opportunity_owner=Alice&opportunity_id={opportunity_id}"
    );
    let (status, body) = get_json(&app, &uri).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Customer found");
    assert_eq!(body["customer"]["opportunity_id"], opportunity_id);
    assert_eq!(body["customer"]["stage"], "Needs Analysis");
}

#[tokio::test]
async fn single_customer_unknown_id_is_not_found() {
    let app = build_test_router().await;
    let suffix = Uuid::new_v4().to_string();

    let (status, _) = post_json(&app, "/new_customer", base_payload(&suffix)).await;
    assert_eq!(status, StatusCode::CREATED);

    let unknown = Uuid::new_v4();
    let uri = format!(
        "/single-customer?dealer_id=D1-{suffix}&dealer_code=DC1-{suffix}&opportunity_owner=Alice&opportunity_id={unknown}"
    );
    let (status, body) = get_json(&app, &uri).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Customer not found");
}
