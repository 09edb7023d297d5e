//! API handlers

use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json},
};
use chrono::Utc;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::AppState;
use crate::error::ApiError;
use crate::export::{anchors, jsonld, to_turtle, ExportMode, SemanticAnchors, WordAnchorDocument};
use crate::poem::{
    clean_word, find_occurrences, locate_number, render::render_poem as render_document, Binding,
    Editor, FieldError, NewPoem, Poem, PoemPatch, RenderedPoem, WordOccurrence,
};

type ApiResult<T> = Result<T, ApiError>;

fn parse_id(raw: &str) -> ApiResult<u32> {
    raw.parse()
        .map_err(|_| ApiError::bad_request("Invalid poem ID", format!("not a poem id: {:?}", raw)))
}

fn parse_body<T: DeserializeOwned>(body: &[u8]) -> ApiResult<T> {
    serde_json::from_slice(body).map_err(|e| ApiError::bad_request("Invalid poem data", e.to_string()))
}

fn query<T>(result: Result<Query<T>, QueryRejection>) -> ApiResult<T> {
    result
        .map(|Query(q)| q)
        .map_err(|e| ApiError::bad_request("Invalid query parameters", e.body_text()))
}

async fn load(state: &AppState, raw_id: &str) -> ApiResult<Poem> {
    let id = parse_id(raw_id)?;
    let store = state.store.read().await;
    store.get(id).cloned().ok_or_else(ApiError::poem_not_found)
}

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    "OK"
}

/// GET /api/poems
pub async fn list_poems(State(state): State<AppState>) -> Json<Vec<Poem>> {
    let store = state.store.read().await;
    Json(store.list())
}

/// GET /api/poems/:id
pub async fn get_poem(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Poem>> {
    Ok(Json(load(&state, &id).await?))
}

/// GET /api/poems/cycle/:step
pub async fn get_poem_by_cycle(
    State(state): State<AppState>,
    Path(step): Path<String>,
) -> ApiResult<Json<Poem>> {
    let step: i32 = step
        .parse()
        .map_err(|_| ApiError::bad_request("Invalid cycle step", format!("not a cycle step: {:?}", step)))?;

    let store = state.store.read().await;
    store
        .get_by_cycle(step)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Poem not found for this cycle".to_string()))
}

/// POST /api/poems
pub async fn create_poem(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<Poem>)> {
    let new_poem: NewPoem = parse_body(&body)?;

    let mut store = state.store.write().await;
    let poem = store.create(new_poem)?;
    Ok((StatusCode::CREATED, Json(poem)))
}

/// PATCH /api/poems/:id
pub async fn update_poem(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<Json<Poem>> {
    let id = parse_id(&id)?;
    let patch: PoemPatch = parse_body(&body)?;
    let touches_cycle = patch.touches_cycle();

    let mut store = state.store.write().await;
    let poem = store.update(id, patch).map_err(|e| {
        debug!(poem_id = id, error = ?e, "Rejected poem update");
        e
    })?;

    if touches_cycle {
        info!(poem_id = id, cycle_step = poem.cycle_step, "Regenerated cycle text");
    }
    Ok(Json(poem))
}

/// GET /api/poems/:id/jsonld
pub async fn poem_jsonld(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let poem = load(&state, &id).await?;
    let doc = jsonld::poem_json_ld(&poem, Utc::now());
    let body = serde_json::to_string_pretty(&doc)
        .map_err(|e| ApiError::internal("Failed to generate JSON-LD", Some(e.to_string())))?;

    Ok(([(header::CONTENT_TYPE, "application/ld+json")], body))
}

#[derive(Debug, Deserialize)]
pub struct RdfQuery {
    #[serde(default)]
    pub mode: ExportMode,
}

/// GET /api/poems/:id/rdf
pub async fn poem_rdf(
    State(state): State<AppState>,
    Path(id): Path<String>,
    params: Result<Query<RdfQuery>, QueryRejection>,
) -> ApiResult<impl IntoResponse> {
    let params = query(params)?;
    let poem = load(&state, &id).await?;

    let triples = state.exporter.export(&poem, params.mode);
    let turtle = to_turtle(&triples).map_err(|e| {
        warn!(poem_id = poem.id, error = %e, "Turtle serialization failed");
        ApiError::internal("Failed to generate RDF", Some(e.to_string()))
    })?;

    debug!(poem_id = poem.id, triples = triples.len(), mode = ?params.mode, "Exported RDF");
    Ok(([(header::CONTENT_TYPE, "text/turtle; charset=utf-8")], turtle))
}

/// GET /api/poems/:id/semantic-anchors
pub async fn poem_semantic_anchors(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<SemanticAnchors>> {
    let poem = load(&state, &id).await?;
    Ok(Json(anchors::semantic_anchors(&poem)))
}

/// GET /api/poems/:id/words
pub async fn poem_words(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<WordAnchorDocument>> {
    let poem = load(&state, &id).await?;
    Ok(Json(state.exporter.word_anchors(&poem)))
}

#[derive(Debug, Deserialize)]
pub struct OccurrenceQuery {
    pub word: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OccurrenceResponse {
    pub word: String,
    pub clean_text: String,
    pub occurrences: Vec<WordOccurrence>,
}

/// GET /api/poems/:id/occurrences?word=
pub async fn poem_occurrences(
    State(state): State<AppState>,
    Path(id): Path<String>,
    params: Result<Query<OccurrenceQuery>, QueryRejection>,
) -> ApiResult<Json<OccurrenceResponse>> {
    let params = query(params)?;
    let poem = load(&state, &id).await?;

    Ok(Json(OccurrenceResponse {
        clean_text: clean_word(&params.word),
        occurrences: find_occurrences(poem.id, &poem.content, &params.word),
        word: params.word,
    }))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderQuery {
    pub edit_stanza: Option<String>,
    pub edit_index: Option<usize>,
    pub draft: Option<String>,
}

fn number_not_found() -> ApiError {
    ApiError::NotFound("Interactive number not found".to_string())
}

/// GET /api/poems/:id/render
pub async fn render_poem(
    State(state): State<AppState>,
    Path(id): Path<String>,
    params: Result<Query<RenderQuery>, QueryRejection>,
) -> ApiResult<Json<RenderedPoem>> {
    let params = query(params)?;
    let poem = load(&state, &id).await?;

    let mut editor = Editor::new();
    match (&params.edit_stanza, params.edit_index) {
        (Some(stanza_id), Some(index)) => {
            editor
                .begin(&poem, stanza_id, index)
                .ok_or_else(number_not_found)?;
            if let Some(draft) = &params.draft {
                editor.set_draft(draft);
            }
        }
        (None, None) => {}
        _ => {
            return Err(ApiError::bad_request(
                "Invalid query parameters",
                "editStanza and editIndex must be given together",
            ))
        }
    }

    Ok(Json(render_document(&poem, &editor)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditRequest {
    pub stanza_id: String,
    pub number_index: usize,
    /// Draft text; JSON numbers are taken by their literal form
    pub value: serde_json::Value,
}

#[derive(Debug, Serialize)]
pub struct EditResponse {
    pub persisted: bool,
    pub poem: Poem,
}

/// Draft text for a number edit.
///
/// A Gödel number must arrive as a string; a JSON number would lose digits.
fn draft_text(value: &serde_json::Value, binding: Option<Binding>) -> ApiResult<String> {
    match value {
        serde_json::Value::String(s) => Ok(s.clone()),
        serde_json::Value::Number(_) if binding == Some(Binding::GodelNumber) => {
            Err(ApiError::invalid(
                "Invalid edit value",
                vec![FieldError::new(
                    Binding::GodelNumber.field_name(),
                    "must be sent as a string of digits",
                )],
            ))
        }
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(ApiError::bad_request(
            "Invalid edit value",
            format!("expected a string or number, got {}", other),
        )),
    }
}

/// POST /api/poems/:id/edits
pub async fn edit_number(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<Json<EditResponse>> {
    let id = parse_id(&id)?;
    let request: EditRequest = parse_body(&body)?;

    let mut store = state.store.write().await;
    let current = store.get(id).cloned().ok_or_else(ApiError::poem_not_found)?;

    let binding = locate_number(&current.content, &request.stanza_id, request.number_index)
        .ok_or_else(number_not_found)?
        .binding;
    let draft = draft_text(&request.value, binding)?;

    let mut editor = Editor::new();
    editor
        .begin(&current, &request.stanza_id, request.number_index)
        .ok_or_else(number_not_found)?;
    editor.set_draft(&draft);

    match editor.commit(&current)? {
        Some(patch) => {
            let poem = store.update(id, patch)?;
            info!(
                poem_id = id,
                stanza_id = %request.stanza_id,
                number_index = request.number_index,
                "Applied interactive edit"
            );
            Ok(Json(EditResponse { persisted: true, poem }))
        }
        None => Ok(Json(EditResponse {
            persisted: false,
            poem: current,
        })),
    }
}
