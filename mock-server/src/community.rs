use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    auth::CurrentUser,
    error::ServerError,
    store::{require, text, Document},
    AppState, Db,
};

#[derive(Debug, Default, Deserialize)]
pub struct TagQuery {
    pub tag: Option<String>,
}

fn with_answer_count(db: &Db, question: &Document) -> Document {
    let id = text(question, "_id");
    let count = db.answers.iter().filter(|a| text(a, "question") == id).count();
    let mut question = question.clone();
    question.insert("answerCount".to_string(), count.into());
    question
}

fn author_id(doc: &Document) -> Option<&str> {
    doc.get("author").and_then(|a| a.get("_id")).and_then(Value::as_str)
}

fn has_tag(question: &Document, tag: &str) -> bool {
    question
        .get("tags")
        .and_then(Value::as_array)
        .is_some_and(|tags| tags.iter().any(|t| t.as_str().is_some_and(|t| t.eq_ignore_ascii_case(tag))))
}

/// Newest first, wrapped in the `{success, count, data}` list envelope.
pub async fn list_questions(State(state): State<AppState>, Query(query): Query<TagQuery>) -> Json<Value> {
    let db = state.db.read().await;
    let tag = query.tag.as_deref().map(str::trim).filter(|t| !t.is_empty());
    let questions: Vec<Document> = db
        .questions
        .iter()
        .rev()
        .filter(|q| tag.map_or(true, |tag| has_tag(q, tag)))
        .map(|q| with_answer_count(&db, q))
        .collect();
    Json(json!({
        "success": true,
        "count": questions.len(),
        "data": questions,
    }))
}

pub async fn get_question(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Document>, ServerError> {
    let db = state.db.read().await;
    db.questions
        .get(&id)
        .map(|q| Json(with_answer_count(&db, q)))
        .ok_or(ServerError::NotFound("Question"))
}

pub async fn create_question(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(mut input): Json<Document>,
) -> Result<(StatusCode, Json<Document>), ServerError> {
    require(&input, &["title", "content"])?;
    if !input.get("tags").is_some_and(Value::is_array) {
        input.insert("tags".to_string(), json!([]));
    }
    input.insert("author".to_string(), user.author());
    let mut db = state.db.write().await;
    let question = db.questions.insert(input);
    Ok((StatusCode::CREATED, Json(with_answer_count(&db, &question))))
}

/// Author or admin only; takes the answers with it.
pub async fn delete_question(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
) -> Result<StatusCode, ServerError> {
    let mut db = state.db.write().await;
    let question = db.questions.get(&id).ok_or(ServerError::NotFound("Question"))?;
    if author_id(question) != Some(user.id.as_str()) && !user.is_admin() {
        return Err(ServerError::Forbidden);
    }
    db.questions.remove(&id);
    db.answers.retain(|a| text(a, "question") != Some(id.as_str()));
    Ok(StatusCode::NO_CONTENT)
}

/// Oldest first.
pub async fn list_answers(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Document>>, ServerError> {
    let db = state.db.read().await;
    db.questions.get(&id).ok_or(ServerError::NotFound("Question"))?;
    Ok(Json(
        db.answers
            .iter()
            .filter(|a| text(a, "question") == Some(id.as_str()))
            .cloned()
            .collect(),
    ))
}

pub async fn create_answer(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
    Json(mut input): Json<Document>,
) -> Result<(StatusCode, Json<Document>), ServerError> {
    require(&input, &["content"])?;
    let mut db = state.db.write().await;
    db.questions.get(&id).ok_or(ServerError::NotFound("Question"))?;
    input.insert("question".to_string(), id.into());
    input.insert("author".to_string(), user.author());
    let answer = db.answers.insert(input);
    Ok((StatusCode::CREATED, Json(answer)))
}
