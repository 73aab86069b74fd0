//! Error types for Relayout operations.
//!
//! This module provides the main error type [`RelayoutError`] which wraps
//! the error conditions that can occur while laying out a diagram.

use std::io;

use thiserror::Error;

use crate::layout::ConvertError;

/// The main error type for Relayout operations.
#[derive(Debug, Error)]
pub enum RelayoutError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Conversion error: {0}")]
    Convert(#[from] ConvertError),

    #[error("Layout error: {0}")]
    Layout(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}
