//! Route-level tests: role gates, self-protection, entry validation
//! Run: cargo test --test http_api

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use hourbank_server::api;
use hourbank_server::auth::{JwtConfig, JwtService};
use hourbank_server::core::{Config, ServerState};
use hourbank_server::db::DbService;
use hourbank_server::db::models::{EmployeeCreate, Role};
use hourbank_server::db::repository::EmployeeRepository;

const TEST_SECRET: &str = "route-test-secret-with-32-bytes-min!!";

async fn test_app() -> (tempfile::TempDir, ServerState, Router) {
    let tmp = tempfile::tempdir().unwrap();
    let db = DbService::new(tmp.path()).await.unwrap();

    let jwt = JwtConfig {
        secret: TEST_SECRET.to_string(),
        expiration_minutes: 60,
        issuer: "hourbank-server".to_string(),
        audience: "hourbank-clients".to_string(),
    };
    let config = Config {
        work_dir: tmp.path().display().to_string(),
        http_port: 0,
        jwt: jwt.clone(),
        environment: "test".to_string(),
        super_admin_email: "ti@arcaplast.com.br".to_string(),
        super_admin_password: "irrelevante".to_string(),
        default_company: "Arca Plast".to_string(),
    };

    let state = ServerState::new(config, db.db, JwtService::with_config(jwt));
    let app = api::build_app(&state).with_state(state.clone());
    (tmp, state, app)
}

async fn seed(state: &ServerState, name: &str, role: Role) -> (String, String) {
    let repo = EmployeeRepository::new(state.db.clone());
    let employee = repo
        .create(EmployeeCreate {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            password: "senha-123".to_string(),
            role,
            team: "Geral".to_string(),
            company: "Arca Plast".to_string(),
        })
        .await
        .unwrap();
    let id = employee.id.unwrap().to_string();
    let token = state
        .jwt_service()
        .generate_token(&id, &employee.username, role)
        .unwrap();
    (id, token)
}

fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let body = match body {
        Some(v) => Body::from(v.to_string()),
        None => Body::empty(),
    };
    builder.body(body).unwrap()
}

async fn read_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn api_routes_require_a_token() {
    let (_tmp, _state, app) = test_app().await;

    let response = app
        .clone()
        .oneshot(request("GET", "/api/records", None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Health stays public
    let response = app
        .oneshot(request("GET", "/api/health", None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn leaders_are_refused_on_admin_routes() {
    let (_tmp, state, app) = test_app().await;
    let (worker_id, _) = seed(&state, "Joana", Role::Employee).await;
    let (_, leader_token) = seed(&state, "Helena", Role::Leader).await;

    let batch_body = json!({
        "employee_ids": [worker_id],
        "date": "2026-05-04",
        "occurrence_type": "BH Positivo (Crédito)",
        "hours": 2,
        "minutes": 0,
        "reason": "mutirão"
    });
    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/batches",
            Some(&leader_token),
            Some(batch_body),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .oneshot(request(
            "POST",
            "/api/employees",
            Some(&leader_token),
            Some(json!({
                "name": "Novo",
                "email": "novo@example.com",
                "password": "senha-123",
                "role": "EMPLOYEE",
                "team": "Geral",
                "company": "Arca Plast"
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn admins_cannot_lock_themselves_out() {
    let (_tmp, state, app) = test_app().await;
    let (admin_id, admin_token) = seed(&state, "Rita", Role::Admin).await;
    let (other_id, _) = seed(&state, "Otavio", Role::Employee).await;

    // Changing your own role is refused
    let response = app
        .clone()
        .oneshot(request(
            "PUT",
            &format!("/api/employees/{}", admin_id),
            Some(&admin_token),
            Some(json!({ "role": "EMPLOYEE" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    // Deleting your own account is refused
    let response = app
        .clone()
        .oneshot(request(
            "DELETE",
            &format!("/api/employees/{}", admin_id),
            Some(&admin_token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    // Someone else's role is fair game
    let response = app
        .oneshot(request(
            "PUT",
            &format!("/api/employees/{}", other_id),
            Some(&admin_token),
            Some(json!({ "role": "LEADER" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["role"], "LEADER");
}

#[tokio::test]
async fn batch_update_cannot_zero_a_credit_batch() {
    let (_tmp, state, app) = test_app().await;
    let (_, admin_token) = seed(&state, "Rita", Role::Admin).await;
    let (worker_a, _) = seed(&state, "Ana", Role::Employee).await;
    let (worker_b, _) = seed(&state, "Bruno", Role::Employee).await;

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/batches",
            Some(&admin_token),
            Some(json!({
                "employee_ids": [worker_a, worker_b],
                "date": "2026-05-04",
                "occurrence_type": "BH Positivo (Crédito)",
                "hours": 2,
                "minutes": 0,
                "reason": "mutirão"
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["data"]["targeted"], 2);
    assert_eq!(body["data"]["affected"], 2);
    let batch_id = body["data"]["batch_id"].as_str().unwrap().to_string();

    // Zeroing the duration while the batch stays CREDIT must not reach
    // the store
    let response = app
        .clone()
        .oneshot(request(
            "PUT",
            &format!("/api/batches/{}", batch_id),
            Some(&admin_token),
            Some(json!({ "hours": 0, "minutes": 0 })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // The same update is fine once the batch becomes informational
    let response = app
        .oneshot(request(
            "PUT",
            &format!("/api/batches/{}", batch_id),
            Some(&admin_token),
            Some(json!({
                "hours": 0,
                "minutes": 0,
                "occurrence_type": "Ajuste de Ponto (Manual)"
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn regularization_range_entry_is_accepted_and_zeroed() {
    let (_tmp, state, app) = test_app().await;
    let (worker_id, _) = seed(&state, "Joana", Role::Employee).await;
    let (_, leader_token) = seed(&state, "Helena", Role::Leader).await;

    let response = app
        .oneshot(request(
            "POST",
            "/api/records",
            Some(&leader_token),
            Some(json!({
                "flow": "self_service",
                "employee_id": worker_id,
                "date": "2026-05-04",
                "occurrence_type": "Ausência de Batida",
                "reason": "esqueceu de bater na entrada",
                "start_time": "08:00",
                "end_time": "12:00",
                "hours": 4,
                "minutes": 0
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["hours"], 0);
    assert_eq!(body["minutes"], 0);
    assert_eq!(body["kind"], "NEUTRAL");
    assert_eq!(body["origin"], "adjustment");
    assert_eq!(body["punch_time"], "08:00");
}
