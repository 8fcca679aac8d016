// In-process stand-in for the dashboard REST API: in-memory vectors, minted
// ids, and a one-shot failure latch for exercising error paths.

use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use chrono::Utc;
use serde_json::json;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use classboard::models::{Announcement, AnnouncementDraft, Envelope, Quiz, QuizDraft};
use classboard::{ApiClient, Config};

#[derive(Clone, Default)]
pub struct Backend {
    pub announcements: Arc<Mutex<Vec<Announcement>>>,
    pub quizzes: Arc<Mutex<Vec<Quiz>>>,
    pub logged_in: Arc<Mutex<bool>>,
    // Some(Some(msg)) fails the next request with a structured message,
    // Some(None) with a bare 500.
    fail_next: Arc<Mutex<Option<Option<String>>>>,
}

impl Backend {
    pub fn fail_next_with(&self, message: &str) {
        *self.fail_next.lock().unwrap() = Some(Some(message.to_string()));
    }

    pub fn fail_next_silently(&self) {
        *self.fail_next.lock().unwrap() = Some(None);
    }

    fn forced_failure(&self) -> Option<Response> {
        self.fail_next.lock().unwrap().take().map(|message| match message {
            Some(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "message": message })),
            )
                .into_response(),
            None => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        })
    }
}

pub fn seed_announcement(backend: &Backend, title: &str) -> Announcement {
    let item = Announcement {
        id: Uuid::new_v4().to_string(),
        title: title.to_string(),
        author: "Dean's office".to_string(),
        course: "GEN100".to_string(),
        content: "Details are posted on the department board.".to_string(),
        created_at: Utc::now(),
    };
    backend.announcements.lock().unwrap().push(item.clone());
    item
}

pub fn seed_quiz(backend: &Backend, title: &str, due: &str) -> Quiz {
    let item = Quiz {
        id: Uuid::new_v4().to_string(),
        title: title.to_string(),
        course: "Math101".to_string(),
        topic: "Linear Equations".to_string(),
        due_date: due.parse().expect("rfc3339 due date"),
        contact: "prof@x.edu".to_string(),
    };
    backend.quizzes.lock().unwrap().push(item.clone());
    item
}

/// Bind on an ephemeral port, serve the fixture, return the base URL.
pub async fn spawn(backend: Backend) -> String {
    let app = router(backend);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind fixture listener");
    let addr = listener.local_addr().expect("fixture addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve fixture");
    });
    format!("http://{addr}")
}

pub async fn client(backend: Backend) -> ApiClient {
    let base = spawn(backend).await;
    ApiClient::new(&Config::new(base)).expect("build client")
}

fn router(backend: Backend) -> Router {
    Router::new()
        .route("/announcements", get(list_announcements).post(create_announcement))
        .route(
            "/announcements/:id",
            put(update_announcement).delete(delete_announcement),
        )
        .route("/quizzes", get(list_quizzes).post(create_quiz))
        .route("/quizzes/:id", put(update_quiz).delete(delete_quiz))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .layer(TraceLayer::new_for_http())
        .with_state(backend)
}

async fn list_announcements(State(backend): State<Backend>) -> Response {
    if let Some(resp) = backend.forced_failure() {
        return resp;
    }
    let items = backend.announcements.lock().unwrap().clone();
    Json(Envelope {
        success: true,
        data: items,
    })
    .into_response()
}

async fn create_announcement(
    State(backend): State<Backend>,
    Json(draft): Json<AnnouncementDraft>,
) -> Response {
    if let Some(resp) = backend.forced_failure() {
        return resp;
    }
    let created = Announcement {
        id: Uuid::new_v4().to_string(),
        title: draft.title,
        author: draft.author,
        course: draft.course,
        content: draft.content,
        created_at: Utc::now(),
    };
    backend.announcements.lock().unwrap().push(created.clone());
    Json(created).into_response()
}

async fn update_announcement(
    State(backend): State<Backend>,
    Path(id): Path<String>,
    Json(draft): Json<AnnouncementDraft>,
) -> Response {
    if let Some(resp) = backend.forced_failure() {
        return resp;
    }
    let mut items = backend.announcements.lock().unwrap();
    match items.iter_mut().find(|item| item.id == id) {
        Some(slot) => {
            slot.title = draft.title;
            slot.author = draft.author;
            slot.course = draft.course;
            slot.content = draft.content;
            Json(slot.clone()).into_response()
        }
        None => not_found("announcement not found"),
    }
}

async fn delete_announcement(State(backend): State<Backend>, Path(id): Path<String>) -> Response {
    if let Some(resp) = backend.forced_failure() {
        return resp;
    }
    let mut items = backend.announcements.lock().unwrap();
    let before = items.len();
    items.retain(|item| item.id != id);
    if items.len() == before {
        not_found("announcement not found")
    } else {
        StatusCode::NO_CONTENT.into_response()
    }
}

// Listed ascending by due date, the order the backing store hands out.
async fn list_quizzes(State(backend): State<Backend>) -> Response {
    if let Some(resp) = backend.forced_failure() {
        return resp;
    }
    let mut items = backend.quizzes.lock().unwrap().clone();
    items.sort_by_key(|quiz| quiz.due_date);
    Json(Envelope {
        success: true,
        data: items,
    })
    .into_response()
}

async fn create_quiz(State(backend): State<Backend>, Json(draft): Json<QuizDraft>) -> Response {
    if let Some(resp) = backend.forced_failure() {
        return resp;
    }
    let created = Quiz {
        id: Uuid::new_v4().to_string(),
        title: draft.title,
        course: draft.course,
        topic: draft.topic,
        due_date: draft.due_date,
        contact: draft.contact,
    };
    backend.quizzes.lock().unwrap().push(created.clone());
    Json(created).into_response()
}

async fn update_quiz(
    State(backend): State<Backend>,
    Path(id): Path<String>,
    Json(draft): Json<QuizDraft>,
) -> Response {
    if let Some(resp) = backend.forced_failure() {
        return resp;
    }
    let mut items = backend.quizzes.lock().unwrap();
    match items.iter_mut().find(|item| item.id == id) {
        Some(slot) => {
            slot.title = draft.title;
            slot.course = draft.course;
            slot.topic = draft.topic;
            slot.due_date = draft.due_date;
            slot.contact = draft.contact;
            Json(slot.clone()).into_response()
        }
        None => not_found("quiz not found"),
    }
}

async fn delete_quiz(State(backend): State<Backend>, Path(id): Path<String>) -> Response {
    if let Some(resp) = backend.forced_failure() {
        return resp;
    }
    let mut items = backend.quizzes.lock().unwrap();
    let before = items.len();
    items.retain(|item| item.id != id);
    if items.len() == before {
        not_found("quiz not found")
    } else {
        StatusCode::NO_CONTENT.into_response()
    }
}

async fn login(State(backend): State<Backend>) -> Response {
    if let Some(resp) = backend.forced_failure() {
        return resp;
    }
    *backend.logged_in.lock().unwrap() = true;
    Json(json!({ "success": true })).into_response()
}

async fn logout(State(backend): State<Backend>) -> Response {
    if let Some(resp) = backend.forced_failure() {
        return resp;
    }
    *backend.logged_in.lock().unwrap() = false;
    Json(json!({ "success": true })).into_response()
}

fn not_found(message: &str) -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "message": message }))).into_response()
}
