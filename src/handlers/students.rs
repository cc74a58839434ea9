//! Student CRUD handlers: list (optionally by birthday), create, read, update, delete.

use crate::db::{StudentsRepo, Table};
use crate::error::AppError;
use crate::model::Student;
use crate::response::{success_many, success_one, success_one_ok};
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub birthday: Option<String>,
}

fn parse_id(id_str: &str) -> Result<i32, AppError> {
    id_str
        .parse()
        .map_err(|_| AppError::BadRequest(format!("invalid id '{}'", id_str)))
}

fn parse_date(s: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| AppError::BadRequest(format!("invalid date '{}', expected YYYY-MM-DD", s)))
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let rows = match params.birthday.as_deref() {
        Some(s) => state.students.find_by_birthday(parse_date(s)?).await?,
        None => state.students.find_all().await?,
    };
    Ok(success_many(rows))
}

pub async fn create(
    State(state): State<AppState>,
    Json(student): Json<Student>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let student = student.normalized();
    student.validate()?;
    if !state.students.save(&student).await? {
        return Err(AppError::Conflict(format!("student {} already exists", student.id)));
    }
    tracing::info!(id = student.id, "student created");
    Ok(success_one(student))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let student = state
        .students
        .find_by_primary_key(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("student {}", id)))?;
    Ok(success_one_ok(student))
}

/// The path id wins over any id in the body.
pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    Json(student): Json<Student>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let student = Student {
        id: parse_id(&id_str)?,
        ..student.normalized()
    };
    student.validate()?;
    if !state.students.update(&student).await? {
        return Err(AppError::NotFound(format!("student {}", student.id)));
    }
    Ok(success_one_ok(student))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id_str)?;
    if !state.students.delete(id).await? {
        return Err(AppError::NotFound(format!("student {}", id)));
    }
    tracing::info!(id, "student deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_id_accepts_integers_only() {
        assert_eq!(parse_id("42").unwrap(), 42);
        assert_eq!(parse_id("-1").unwrap(), -1);
        assert!(matches!(parse_id("abc"), Err(AppError::BadRequest(_))));
        assert!(matches!(parse_id("99999999999"), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn parse_date_is_iso() {
        assert_eq!(parse_date("2001-02-03").unwrap(), NaiveDate::from_ymd_opt(2001, 2, 3).unwrap());
        assert!(parse_date("03/02/2001").is_err());
        assert!(parse_date("2001-02-30").is_err());
    }
}
