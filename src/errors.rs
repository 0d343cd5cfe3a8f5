//! Copyright © 2025-2026 Dunimd Team. All Rights Reserved.
//!
//! This file is part of Vista.
//! The Vista project belongs to the Dunimd Team.
//!
//! Licensed under the Apache License, Version 2.0 (the "License");
//! You may not use this file except in compliance with the License.
//! You may obtain a copy of the License at
//!
//!     http://www.apache.org/licenses/LICENSE-2.0
//!
//! Unless required by applicable law or agreed to in writing, software
//! distributed under the License is distributed on an "AS IS" BASIS,
//! WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//! See the License for the specific language governing permissions and
//! limitations under the License.

//! # Vista Error Module
//!
//! This module defines the error types used throughout Vista for consistent
//! error handling and reporting.
//!
//! ## Error Categories
//!
//! - **Construction**: structurally invalid stage parameters (malformed
//!   record id, protected field excluded, non-object filter fragment).
//!   Raised by stage constructors, never deferred to compile time.
//! - **Validation**: schema mismatches discovered by `validate()` (missing
//!   field, wrong declared type). Carries the offending field name.
//! - **Decode**: unknown stage tags or malformed parameter lists seen while
//!   reconstructing stages from their serialized form.
//! - **Compilation**: wraps the first validation failure encountered while
//!   compiling a pipeline, annotated with the failing stage's index.
//!
//! All errors are surfaced synchronously to the caller; none are transient,
//! so nothing is retried. Pipeline compilation is all-or-nothing.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Convenience result type used throughout Vista.
pub type Result<T> = std::result::Result<T, VistaError>;

/// Canonical error enumeration for Vista.
#[derive(Debug, Error, Serialize, Deserialize)]
pub enum VistaError {
    /// Structurally invalid stage parameters, detected at construction.
    #[error("invalid stage parameters: {message}")]
    Construction { message: String },

    /// A stage cannot be legally applied to the target collection.
    #[error("field '{field}' {message}")]
    Validation { field: String, message: String },

    /// A serialized stage could not be reconstructed.
    #[error("cannot decode stage: {message}")]
    Decode { message: String },

    /// Pipeline compilation aborted at the named stage.
    #[error("stage #{index} ('{stage}') failed validation: {source}")]
    Compilation {
        index: usize,
        stage: String,
        #[source]
        source: Box<VistaError>,
    },
}

impl From<serde_json::Error> for VistaError {
    fn from(err: serde_json::Error) -> Self {
        VistaError::Decode {
            message: err.to_string(),
        }
    }
}

impl VistaError {
    /// Helper to construct construction errors.
    pub fn construction(message: impl Into<String>) -> Self {
        VistaError::Construction {
            message: message.into(),
        }
    }

    /// Helper to construct validation errors for a named field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        VistaError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Helper to construct decode errors.
    pub fn decode(message: impl Into<String>) -> Self {
        VistaError::Decode {
            message: message.into(),
        }
    }

    /// Helper that wraps a validation failure with its pipeline position.
    pub fn compilation(index: usize, stage: impl Into<String>, source: VistaError) -> Self {
        VistaError::Compilation {
            index,
            stage: stage.into(),
            source: Box::new(source),
        }
    }
}
