//! Request extractors with project-specific rejections.

use axum::extract::FromRequest;

use crate::error::AppError;

/// `axum::Json` whose rejection is a 400 `VALIDATION_ERROR` in the standard
/// error body, instead of axum's plain-text 415/422 responses.
///
/// Wrong JSON types (a string where a number is required) and missing
/// required fields are rejected here, before any handler runs.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);
