//! Integration tests for the HTTP client against an in-process axum server.
//!
//! The server records every request it sees (method, path, authorization
//! header, JSON body) so tests can assert on exactly what went over the wire.

use std::sync::{Arc, Mutex};

use axum::Json;
use axum::Router;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use packed_client::HttpPackingApi;
use packed_core::{
    ApiError, AuthContext, Climate, Item, PackingListApi, SuggestionSource, TripContext,
    WeatherReading,
};
use packed_planner::{
    ActionOutcome, PackingSession, PoolKind, SubmissionOutcome, SubmissionPolicy,
    SubmissionService,
};
use serde_json::{Value, json};

// ── Mock backend ─────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
struct Recorded {
    method: Method,
    path: String,
    authorization: Option<String>,
    body: Value,
}

#[derive(Clone)]
struct Backend {
    requests: Arc<Mutex<Vec<Recorded>>>,
    create_status: StatusCode,
    items_status: StatusCode,
}

impl Backend {
    fn new() -> Self {
        Self {
            requests: Arc::new(Mutex::new(Vec::new())),
            create_status: StatusCode::OK,
            items_status: StatusCode::OK,
        }
    }

    fn failing_create(mut self, status: StatusCode) -> Self {
        self.create_status = status;
        self
    }

    fn failing_items(mut self, status: StatusCode) -> Self {
        self.items_status = status;
        self
    }

    fn record(&self, method: Method, uri: &Uri, headers: &HeaderMap, body: Value) {
        self.requests.lock().unwrap().push(Recorded {
            method,
            path: uri.path().to_string(),
            authorization: headers
                .get("authorization")
                .and_then(|v| v.to_str().ok())
                .map(str::to_string),
            body,
        });
    }

    fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }
}

async fn suggestions(
    State(backend): State<Backend>,
    Path(condition): Path<String>,
    uri: Uri,
    headers: HeaderMap,
) -> Json<Value> {
    backend.record(Method::GET, &uri, &headers, Value::Null);
    let conditional = match condition.as_str() {
        "hot" => json!([{"id": 20, "name": "Sunscreen"}, {"id": 21, "name": "Sandals"}]),
        _ => json!([{"id": 30, "name": "Gloves"}]),
    };
    Json(json!({
        "general_items": [{"id": 1, "name": "Toothbrush"}, {"id": 2, "name": "Passport"}],
        "conditional_items": conditional,
        "user_favorite_items": [{"id": 40, "name": "Kindle"}]
    }))
}

async fn create_list(
    State(backend): State<Backend>,
    uri: Uri,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    backend.record(Method::POST, &uri, &headers, body.clone());
    if backend.create_status != StatusCode::OK {
        return (
            backend.create_status,
            Json(json!({"message": "Failed to create packing list"})),
        )
            .into_response();
    }
    Json(json!({"id": 314, "title": body["title"]})).into_response()
}

async fn list_lists(State(backend): State<Backend>, uri: Uri, headers: HeaderMap) -> Json<Value> {
    backend.record(Method::GET, &uri, &headers, Value::Null);
    Json(json!({"packing_lists": [
        {"id": 1, "title": "Packing list for Paris, France", "departure_date": "2024-06-01",
         "return_date": "2024-06-10", "created": "2024-05-20"}
    ]}))
}

async fn attach_items(
    State(backend): State<Backend>,
    Path(id): Path<i64>,
    uri: Uri,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    backend.record(Method::POST, &uri, &headers, body.clone());
    if backend.items_status != StatusCode::OK {
        return (backend.items_status, "items rejected").into_response();
    }
    let items: Vec<Value> = body["items"]
        .as_array()
        .cloned()
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .map(|(n, item)| {
            json!({
                "id": n as i64 + 1,
                "item_name": {"name": item["name"]},
                "quantity": item["quantity"],
                "packing_list": id
            })
        })
        .collect();
    Json(json!({ "items": items })).into_response()
}

async fn saved_items(
    State(backend): State<Backend>,
    uri: Uri,
    headers: HeaderMap,
) -> Json<Value> {
    backend.record(Method::GET, &uri, &headers, Value::Null);
    Json(json!({"items": [{"id": 1, "item_name": "Passport", "quantity": 1, "packed": true}]}))
}

async fn delete_list(State(backend): State<Backend>, uri: Uri, headers: HeaderMap) -> Json<Value> {
    backend.record(Method::DELETE, &uri, &headers, Value::Null);
    Json(json!({"deleted": true}))
}

/// Start the mock backend and return the API base URL.
async fn serve(backend: Backend) -> String {
    let app = Router::new()
        .route("/api/items/conditional/{condition}/", get(suggestions))
        .route("/api/packing_lists/", post(create_list).get(list_lists))
        .route("/api/packing_lists/{id}/", delete(delete_list))
        .route(
            "/api/packing_lists/{id}/items/",
            post(attach_items).get(saved_items),
        )
        .with_state(backend);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/api")
}

fn paris() -> TripContext {
    TripContext::new(
        "Paris",
        "France",
        "2024-06-01".parse().unwrap(),
        "2024-06-10".parse().unwrap(),
    )
    .unwrap()
}

// ── Tests ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn suggestions_sent_with_bearer_token() {
    let backend = Backend::new();
    let api = HttpPackingApi::new(serve(backend.clone()).await, AuthContext::bearer("abc")).unwrap();

    let response = api.fetch_suggestions(Climate::Hot).await.unwrap();

    assert_eq!(response.general_items.len(), 2);
    assert_eq!(response.conditional_items[0].name, "Sunscreen");
    assert_eq!(response.user_favorite_items[0].name, "Kindle");

    let requests = backend.requests();
    assert_eq!(requests[0].path, "/api/items/conditional/hot/");
    assert_eq!(requests[0].authorization.as_deref(), Some("Bearer abc"));
}

#[tokio::test]
async fn anonymous_suggestions_omit_header() {
    let backend = Backend::new();
    let api = HttpPackingApi::new(serve(backend.clone()).await, AuthContext::anonymous()).unwrap();

    api.fetch_suggestions(Climate::Cold).await.unwrap();

    let requests = backend.requests();
    assert_eq!(requests[0].path, "/api/items/conditional/cold/");
    assert!(requests[0].authorization.is_none());
}

#[tokio::test]
async fn full_session_submission_over_http() {
    let backend = Backend::new();
    let api = Arc::new(HttpPackingApi::new(serve(backend.clone()).await, AuthContext::anonymous()).unwrap());

    let mut session = PackingSession::new(paris());
    session
        .refresh_suggestions(api.as_ref(), &[WeatherReading { temperature: 82.0 }])
        .await
        .unwrap();
    session.add_custom("passport");
    assert_eq!(
        session.promote(PoolKind::Conditional, packed_core::ItemId(20)),
        ActionOutcome::Applied
    );
    session.set_quantity("Sunscreen", 2).unwrap();

    let service = SubmissionService::new(api.clone(), 1);
    let outcome = session.submit(&service).await.unwrap();

    match &outcome {
        SubmissionOutcome::Complete { list_id, items } => {
            assert_eq!(*list_id, 314);
            assert_eq!(items.len(), 2);
            assert_eq!(items[1].name.as_deref(), Some("Sunscreen"));
        }
        other => panic!("Expected Complete, got {other:?}"),
    }

    let requests = backend.requests();
    assert_eq!(requests.len(), 3);
    assert_eq!(requests[1].path, "/api/packing_lists/");
    assert_eq!(
        requests[1].body,
        json!({
            "title": "Packing list for Paris, France",
            "departure_date": "2024-06-01",
            "return_date": "2024-06-10",
            "destination_city": "Paris",
            "destination_country": "France",
            "owner": 1
        })
    );
    assert_eq!(requests[2].path, "/api/packing_lists/314/items/");
    assert_eq!(
        requests[2].body,
        json!({"items": [
            {"id": 2, "name": "passport", "quantity": 1, "suggested": true},
            {"id": 20, "name": "Sunscreen", "quantity": 2, "suggested": true}
        ]})
    );
}

#[tokio::test]
async fn empty_list_sends_nothing() {
    let backend = Backend::new();
    let api = Arc::new(HttpPackingApi::new(serve(backend.clone()).await, AuthContext::anonymous()).unwrap());

    let session = PackingSession::new(paris());
    let outcome = session
        .submit(&SubmissionService::new(api, 1))
        .await
        .unwrap();

    assert_eq!(outcome, SubmissionOutcome::Skipped);
    assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn create_failure_surfaces_status_and_skips_items() {
    let backend = Backend::new().failing_create(StatusCode::BAD_REQUEST);
    let api = Arc::new(HttpPackingApi::new(serve(backend.clone()).await, AuthContext::anonymous()).unwrap());

    let mut session = PackingSession::new(paris());
    session.add_custom("Passport");
    let err = session
        .submit(&SubmissionService::new(api, 1))
        .await
        .unwrap_err();

    match err {
        packed_core::SubmissionError::CreateFailed(ApiError::Status { status_code, message }) => {
            assert_eq!(status_code, 400);
            assert!(message.contains("Failed to create packing list"));
        }
        other => panic!("Expected CreateFailed(Status), got {other:?}"),
    }
    assert_eq!(backend.requests().len(), 1);
}

#[tokio::test]
async fn items_failure_is_partial_and_optionally_rolled_back() {
    let backend = Backend::new().failing_items(StatusCode::INTERNAL_SERVER_ERROR);
    let api = Arc::new(HttpPackingApi::new(serve(backend.clone()).await, AuthContext::anonymous()).unwrap());

    let mut session = PackingSession::new(paris());
    session.add_custom("Passport");

    let plain = session
        .submit(&SubmissionService::new(api.clone(), 1))
        .await
        .unwrap();
    assert!(matches!(
        plain,
        SubmissionOutcome::Partial { list_id: 314, rolled_back: false, .. }
    ));
    assert_eq!(backend.requests().len(), 2);

    let service = SubmissionService::new(api, 1).with_policy(SubmissionPolicy {
        rollback_orphaned_lists: true,
    });
    let rolled = session.submit(&service).await.unwrap();
    assert!(matches!(
        rolled,
        SubmissionOutcome::Partial { rolled_back: true, .. }
    ));

    let requests = backend.requests();
    let last = requests.last().unwrap();
    assert_eq!(last.method, Method::DELETE);
    assert_eq!(last.path, "/api/packing_lists/314/");
}

#[tokio::test]
async fn saved_lists_and_items() {
    let backend = Backend::new();
    let api = HttpPackingApi::new(serve(backend.clone()).await, AuthContext::bearer("t")).unwrap();

    let lists = api.list_packing_lists().await.unwrap();
    assert_eq!(lists.len(), 1);
    assert_eq!(lists[0].title, "Packing list for Paris, France");

    let items = api.list_items(1).await.unwrap();
    assert_eq!(items[0].name.as_deref(), Some("Passport"));
    assert!(items[0].packed);
}

#[tokio::test]
async fn unreachable_server_is_network_error() {
    let api = HttpPackingApi::new("http://127.0.0.1:1/api", AuthContext::anonymous()).unwrap();
    let err = api.fetch_suggestions(Climate::Moderate).await.unwrap_err();
    assert!(matches!(err, ApiError::Network(_)));
    let err = api
        .attach_items(1, &packed_core::ItemsPayload { items: vec![Item::custom("Hat")] })
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Network(_)));
}
