#![forbid(unsafe_code)]

//! Shared helpers for the calculator workspace.

pub mod humantime_serde;
