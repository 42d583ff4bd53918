use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::{
    feedback::Feedback,
    types::{display_name, AddOutcome, CreateOutcome, RemoveOutcome, StoreError},
};

use super::{
    models::{
        AddWordRequest, CapabilitiesResponse, CollectionResponse, CollectionsResponse,
        CreateCollectionRequest, HealthResponse, WordsResponse,
    },
    AppState,
};

fn error_status(err: &StoreError) -> StatusCode {
    match err {
        StoreError::EmptyField(_) => StatusCode::BAD_REQUEST,
        StoreError::Unsupported { .. } => StatusCode::NOT_IMPLEMENTED,
        StoreError::RemoteWrite(_) | StoreError::Connection(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn store_error(context: &str, err: StoreError) -> Response {
    let status = error_status(&err);
    if status.is_server_error() {
        log::error!("{} failed: {}", context, err);
    } else {
        log::warn!("{} rejected: {}", context, err);
    }
    (status, Json(Feedback::failed(&err))).into_response()
}

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let uptime_secs = state.started_at.elapsed().map(|d| d.as_secs()).unwrap_or(0);
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok".to_string(),
            uptime_secs,
            backend: state.backend.to_string(),
        }),
    )
}

pub async fn capabilities(State(state): State<AppState>) -> impl IntoResponse {
    Json(CapabilitiesResponse {
        backend: state.backend.to_string(),
        capabilities: state.store.capabilities(),
    })
}

pub async fn list_collections(State(state): State<AppState>) -> Response {
    let mut summaries = match state.store.list_collections() {
        Ok(summaries) => summaries,
        Err(err) => return store_error("list collections", err),
    };
    summaries.sort_by(|a, b| a.name.cmp(&b.name));
    let collections = summaries
        .into_iter()
        .map(|s| CollectionResponse {
            display_name: display_name(&s.name),
            name: s.name,
            word_count: s.word_count,
        })
        .collect();
    Json(CollectionsResponse { collections }).into_response()
}

pub async fn create_collection(
    State(state): State<AppState>,
    Json(req): Json<CreateCollectionRequest>,
) -> Response {
    match state.store.create_collection(&req.name) {
        Ok(outcome) => {
            let status = match outcome {
                CreateOutcome::Created => StatusCode::CREATED,
                CreateOutcome::AlreadyExists => StatusCode::CONFLICT,
            };
            (status, Json(Feedback::created(&req.name, &outcome))).into_response()
        }
        Err(err) => store_error("create collection", err),
    }
}

pub async fn list_words(State(state): State<AppState>, Path(name): Path<String>) -> Response {
    match state.store.list_words(&name) {
        Ok(Some(words)) => Json(WordsResponse {
            collection: name,
            words,
        })
        .into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(Feedback::collection_not_found(&name)),
        )
            .into_response(),
        Err(err) => store_error("list words", err),
    }
}

pub async fn add_word(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(req): Json<AddWordRequest>,
) -> Response {
    match state.store.add_word(&name, &req.word) {
        Ok(outcome) => {
            let status = match outcome {
                AddOutcome::Added => StatusCode::CREATED,
                AddOutcome::DuplicateWord { .. } => StatusCode::CONFLICT,
                AddOutcome::CollectionNotFound => StatusCode::NOT_FOUND,
            };
            (status, Json(Feedback::added(&name, &req.word, &outcome))).into_response()
        }
        Err(err) => store_error("add word", err),
    }
}

pub async fn remove_word(
    State(state): State<AppState>,
    Path((name, word)): Path<(String, String)>,
) -> Response {
    match state.store.remove_word(&name, &word) {
        Ok(outcome) => {
            let status = match outcome {
                RemoveOutcome::Removed { .. } => StatusCode::OK,
                RemoveOutcome::WordNotFound | RemoveOutcome::CollectionNotFound => {
                    StatusCode::NOT_FOUND
                }
            };
            (status, Json(Feedback::removed(&name, &word, &outcome))).into_response()
        }
        Err(err) => store_error("remove word", err),
    }
}

pub async fn not_found() -> impl IntoResponse {
    StatusCode::NOT_FOUND
}
