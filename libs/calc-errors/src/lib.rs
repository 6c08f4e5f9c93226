//! Error types shared by the calculator backend and its clients.
//!
//! This crate is pure data with no HTTP framework dependency unless the
//! `axum` feature is enabled. It includes:
//! - the fixed error-code catalog (`ErrorCode`, `ErrDef`)
//! - the wire error body (`ErrorResponse`) and its status-carrying wrapper (`ApiError`)

pub mod catalog;
pub mod response;

pub use catalog::{ErrDef, ErrorCode};
pub use response::{ApiError, ApiResult, ErrorResponse};
