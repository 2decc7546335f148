//! Request extractors
//!
//! Thin wrappers over axum's `Json` and `Path` whose rejections are
//! [`BackendError`]s, so malformed bodies and ids get the same JSON error
//! shape as every other failure.

use axum::extract::{FromRequest, FromRequestParts};

use crate::backend::error::BackendError;

/// `axum::Json` with a `BackendError` rejection
#[derive(Debug, Clone, Copy, Default, FromRequest)]
#[from_request(via(axum::Json), rejection(BackendError))]
pub struct ApiJson<T>(pub T);

/// `axum::extract::Path` with a `BackendError` rejection
#[derive(Debug, Clone, Copy, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(BackendError))]
pub struct ApiPath<T>(pub T);
