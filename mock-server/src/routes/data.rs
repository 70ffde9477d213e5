//! `/data`: CRUD over the in-memory users, posts and todos.
//!
//! Reads take the `type` query parameter in plural form (`users`,
//! `posts-by-user`, ...). Mutations take it in singular form (`user`,
//! `post`, `todo`).

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::Json;
use chrono::{SecondsFormat, Utc};
use records_core::{parse_id, parse_user_id, DataQuery, Record, RecordId, RecordKind};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ReadParams {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub id: Option<String>,
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DeleteParams {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateBody {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub data: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateBody {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// A JSON number or a numeric string.
    pub id: Option<Value>,
    pub data: Option<Value>,
}

/// A single record or a list, depending on whether `id` was given.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ReadPayload {
    One(Record),
    Many(Vec<Record>),
}

#[derive(Debug, Serialize)]
pub struct ReadResponse {
    pub data: ReadPayload,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub timestamp: String,
    pub cached: bool,
}

#[derive(Debug, Serialize)]
pub struct MutationResponse {
    pub success: bool,
    pub data: Record,
    pub message: String,
    pub timestamp: String,
}

impl MutationResponse {
    fn new(data: Record, message: String) -> Self {
        Self {
            success: true,
            data,
            message,
            timestamp: now(),
        }
    }
}

pub async fn read_data(
    State(state): State<AppState>,
    params: Result<Query<ReadParams>, QueryRejection>,
) -> Result<Json<ReadResponse>, AppError> {
    let Query(params) = params?;
    let query = match non_empty(params.kind.as_deref()) {
        Some(raw) => raw.parse::<DataQuery>()?,
        None => DataQuery::default(),
    };

    let store = state.db.read().await;
    let data = if query.is_by_user() {
        let raw = non_empty(params.user_id.as_deref()).ok_or_else(|| {
            AppError::invalid(format!("userId parameter is required for {query}"))
        })?;
        let user_id = parse_user_id(Some(raw))?;
        ReadPayload::Many(store.filter_by_user(query.kind(), user_id)?)
    } else if let Some(raw) = non_empty(params.id.as_deref()) {
        let id = parse_id(Some(raw))?;
        ReadPayload::One(store.get(query.kind(), id)?)
    } else {
        ReadPayload::Many(store.list(query.kind()))
    };

    Ok(Json(ReadResponse {
        data,
        kind: query.as_str(),
        timestamp: now(),
        cached: false,
    }))
}

pub async fn create_data(
    State(state): State<AppState>,
    body: Result<Json<CreateBody>, JsonRejection>,
) -> Result<Json<MutationResponse>, AppError> {
    let Json(body) = body?;
    let (Some(raw_kind), Some(data)) = (
        non_empty(body.kind.as_deref()),
        body.data.filter(|d| !d.is_null()),
    ) else {
        return Err(AppError::invalid("Both type and data are required"));
    };
    let kind: RecordKind = raw_kind.parse()?;

    let record = state.db.write().await.create(kind, Some(data))?;
    tracing::info!(kind = %kind, id = record.id(), "record created");

    Ok(Json(MutationResponse::new(
        record,
        format!("{kind} created successfully"),
    )))
}

pub async fn update_data(
    State(state): State<AppState>,
    body: Result<Json<UpdateBody>, JsonRejection>,
) -> Result<Json<MutationResponse>, AppError> {
    let Json(body) = body?;
    let (Some(raw_kind), Some(raw_id), Some(data)) = (
        non_empty(body.kind.as_deref()),
        body.id.filter(is_present),
        body.data.filter(|d| !d.is_null()),
    ) else {
        return Err(AppError::invalid("type, id, and data are required"));
    };
    let kind: RecordKind = raw_kind.parse()?;
    let id = id_from_json(&raw_id)?;

    let record = state.db.write().await.update(kind, id, data)?;
    tracing::info!(kind = %kind, id, "record updated");

    Ok(Json(MutationResponse::new(
        record,
        format!("{kind} updated successfully"),
    )))
}

pub async fn delete_data(
    State(state): State<AppState>,
    params: Result<Query<DeleteParams>, QueryRejection>,
) -> Result<Json<MutationResponse>, AppError> {
    let Query(params) = params?;
    let (Some(raw_kind), Some(raw_id)) = (
        non_empty(params.kind.as_deref()),
        non_empty(params.id.as_deref()),
    ) else {
        return Err(AppError::invalid("Both type and id are required"));
    };
    let kind: RecordKind = raw_kind.parse()?;
    let id = parse_id(Some(raw_id))?;

    let record = state.db.write().await.delete(kind, id)?;
    tracing::info!(kind = %kind, id, "record deleted");

    Ok(Json(MutationResponse::new(
        record,
        format!("{kind} with id {id} deleted successfully"),
    )))
}

fn non_empty(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

/// `null`, `false`, `0` and blank strings count as missing.
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => false,
        Value::Number(n) => n.as_f64() != Some(0.0),
        Value::String(s) => !s.trim().is_empty(),
        _ => true,
    }
}

fn id_from_json(value: &Value) -> Result<RecordId, AppError> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .ok_or_else(|| AppError::invalid("id must be a non-negative integer")),
        Value::String(s) => Ok(parse_id(Some(s.as_str()))?),
        _ => Err(AppError::invalid("id must be a non-negative integer")),
    }
}

/// ISO-8601 UTC with millisecond precision.
pub(crate) fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn id_accepts_number_or_numeric_string() {
        assert_eq!(id_from_json(&json!(4)).unwrap(), 4);
        assert_eq!(id_from_json(&json!("4")).unwrap(), 4);
        assert!(id_from_json(&json!(-4)).is_err());
        assert!(id_from_json(&json!(1.5)).is_err());
        assert!(id_from_json(&json!({"id": 4})).is_err());
    }

    #[test]
    fn blank_values_count_as_missing() {
        assert!(non_empty(Some("  ")).is_none());
        assert!(non_empty(None).is_none());
        assert!(!is_present(&json!(null)));
        assert!(!is_present(&json!("")));
        assert!(!is_present(&json!(0)));
        assert!(!is_present(&json!(false)));
        assert!(is_present(&json!(1)));
        assert!(is_present(&json!("0")));
    }

    #[test]
    fn timestamp_is_utc_with_millis() {
        let ts = now();
        assert!(ts.ends_with('Z'), "{ts}");
        assert_eq!(ts.len(), "2024-01-01T00:00:00.000Z".len());
    }
}
