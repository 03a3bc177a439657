//! In-process stand-in for the remote notes service.

#![allow(dead_code)]

use std::sync::{Arc, Mutex, MutexGuard};

use axum::extract::{Path, State};
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use notes_frontend::{ApiClient, App, Route, SessionStore};

pub const TOKEN: &str = "abc";

#[derive(Default)]
pub struct Remote {
    pub users: Vec<Value>,
    pub notes: Vec<Value>,
    pub next_id: u64,
    /// Authorization header of every note request, in order.
    pub auth_headers: Vec<Option<String>>,
    /// Content-Type header of every request, in order.
    pub content_types: Vec<Option<String>>,
    pub fail_writes: bool,
    pub login_plain_text: bool,
}

type Shared = Arc<Mutex<Remote>>;

pub struct MockRemote {
    pub base_url: String,
    state: Shared,
}

impl MockRemote {
    pub async fn start() -> Self {
        let state: Shared = Arc::new(Mutex::new(Remote::default()));
        let router = Router::new()
            .route("/user/register", post(register))
            .route("/user/login", post(login))
            .route("/note", get(list_notes))
            .route("/note/create", post(create_note))
            .route("/note/delete-note/:id", delete(delete_note))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
        }
    }

    pub fn remote(&self) -> MutexGuard<'_, Remote> {
        self.state.lock().unwrap()
    }

    pub fn add_user(&self, email: &str, password: &str) {
        self.remote()
            .users
            .push(json!({ "email": email, "password": password }));
    }

    pub fn seed_note(&self, id: &str, title: &str) {
        self.remote().notes.push(json!({
            "_id": id,
            "title": title,
            "content": format!("{} content", title),
            "status": false,
            "userID": "u1",
        }));
    }

    pub fn note_ids(&self) -> Vec<String> {
        self.remote()
            .notes
            .iter()
            .filter_map(|n| n["_id"].as_str().map(str::to_string))
            .collect()
    }

    pub fn client(&self, session: SessionStore) -> ApiClient {
        ApiClient::new(&self.base_url, session)
    }

    pub fn app(&self, session: SessionStore, start: Route) -> App {
        App::new(self.client(session), start)
    }
}

/// Base URL of a port nobody listens on.
pub async fn dead_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

fn header(headers: &HeaderMap, name: axum::http::HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

fn authorized(remote: &mut Remote, headers: &HeaderMap) -> bool {
    let auth = header(headers, AUTHORIZATION);
    let ok = auth.as_deref() == Some(&format!("Bearer {}", TOKEN)[..]);
    remote.auth_headers.push(auth);
    ok
}

fn please_login() -> (StatusCode, Json<Value>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "msg": "Please login first" })),
    )
}

async fn register(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let mut remote = state.lock().unwrap();
    remote.content_types.push(header(&headers, CONTENT_TYPE));
    if remote.fail_writes {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "msg": "registration failed" })),
        );
    }
    remote.users.push(body);
    (StatusCode::OK, Json(json!({ "msg": "Registered successfully" })))
}

async fn login(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> axum::response::Response {
    use axum::response::IntoResponse;

    let mut remote = state.lock().unwrap();
    remote.content_types.push(header(&headers, CONTENT_TYPE));
    if remote.login_plain_text {
        return (StatusCode::BAD_GATEWAY, "upstream down").into_response();
    }
    let known = remote
        .users
        .iter()
        .any(|u| u["email"] == body["email"] && u["password"] == body["password"]);
    if known {
        Json(json!({ "token": TOKEN })).into_response()
    } else {
        Json(json!({})).into_response()
    }
}

async fn list_notes(State(state): State<Shared>, headers: HeaderMap) -> (StatusCode, Json<Value>) {
    let mut remote = state.lock().unwrap();
    remote.content_types.push(header(&headers, CONTENT_TYPE));
    if !authorized(&mut remote, &headers) {
        return please_login();
    }
    (StatusCode::OK, Json(json!({ "notes": remote.notes })))
}

async fn create_note(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let mut remote = state.lock().unwrap();
    remote.content_types.push(header(&headers, CONTENT_TYPE));
    if !authorized(&mut remote, &headers) {
        return please_login();
    }
    if remote.fail_writes {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "msg": "could not save" })),
        );
    }
    remote.next_id += 1;
    let id = format!("created-{}", remote.next_id);
    remote.notes.push(json!({
        "_id": id,
        "title": body["title"],
        "content": body["content"],
        "status": body["status"],
    }));
    (StatusCode::OK, Json(json!({ "msg": "Note created" })))
}

async fn delete_note(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> (StatusCode, Json<Value>) {
    let mut remote = state.lock().unwrap();
    remote.content_types.push(header(&headers, CONTENT_TYPE));
    if !authorized(&mut remote, &headers) {
        return please_login();
    }
    let before = remote.notes.len();
    remote.notes.retain(|n| n["_id"].as_str() != Some(id.as_str()));
    if remote.notes.len() == before {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "msg": "Note not found" })),
        );
    }
    (StatusCode::OK, Json(json!({ "msg": "Note deleted" })))
}
