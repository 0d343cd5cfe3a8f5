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

//! # Vista Schema Module
//!
//! Field-type descriptors and the collection seam that stage validation
//! runs against. Collections own their schema; Vista only performs
//! read-only lookups and never caches results across stages.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{Result, VistaError};

/// Record fields that every projection must preserve and that may never be
/// excluded.
pub fn default_record_fields() -> &'static [&'static str] {
    &["filepath", "tags", "metadata"]
}

/// The required path field; filter stages may never target it.
pub const RECORD_PATH_FIELD: &str = "filepath";

/// Per-record stable random scalar in `[0, 1)`, assigned once by the record
/// store at creation time and never recomputed. Randomized ordering keys
/// are derived from it at compile time.
pub const RECORD_RAND_FIELD: &str = "_rand";

/// Declared type of a single record field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldType {
    Boolean,
    Integer,
    Float,
    String,
    List,
    Dict,
    EmbeddedDocument(DocumentType),
}

/// Declared type tag of an embedded-document field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentType {
    Metadata,
    Classification,
    Classifications,
    Detection,
    Detections,
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Boolean => write!(f, "Boolean"),
            FieldType::Integer => write!(f, "Integer"),
            FieldType::Float => write!(f, "Float"),
            FieldType::String => write!(f, "String"),
            FieldType::List => write!(f, "List"),
            FieldType::Dict => write!(f, "Dict"),
            FieldType::EmbeddedDocument(doc) => write!(f, "EmbeddedDocument({doc})"),
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DocumentType::Metadata => "Metadata",
            DocumentType::Classification => "Classification",
            DocumentType::Classifications => "Classifications",
            DocumentType::Detection => "Detection",
            DocumentType::Detections => "Detections",
        };
        write!(f, "{name}")
    }
}

/// Mapping from field name to declared field type.
pub type FieldSchema = BTreeMap<String, FieldType>;

/// Read-only schema seam exposed by a record collection.
///
/// Implementations return the collection's *current* schema on every call;
/// the caller guarantees the schema does not change while a pipeline is
/// being compiled against it.
pub trait Collection {
    /// Returns the current field schema of the collection.
    fn field_schema(&self) -> FieldSchema;
}

/// In-memory [`Collection`] implementation.
///
/// New instances carry the default record fields; additional fields are
/// declared with [`CollectionSchema::with_field`].
#[derive(Clone, Debug, Default)]
pub struct CollectionSchema {
    fields: FieldSchema,
}

impl CollectionSchema {
    /// Creates a schema containing only the default record fields.
    pub fn new() -> Self {
        let mut fields = FieldSchema::new();
        fields.insert(RECORD_PATH_FIELD.to_string(), FieldType::String);
        fields.insert("tags".to_string(), FieldType::List);
        fields.insert(
            "metadata".to_string(),
            FieldType::EmbeddedDocument(DocumentType::Metadata),
        );
        CollectionSchema { fields }
    }

    /// Declares a field with the given type.
    pub fn with_field(mut self, name: impl Into<String>, field_type: FieldType) -> Self {
        self.fields.insert(name.into(), field_type);
        self
    }
}

impl Collection for CollectionSchema {
    fn field_schema(&self) -> FieldSchema {
        self.fields.clone()
    }
}

/// Fails with a validation error naming the first field absent from the
/// collection's schema.
pub(crate) fn validate_fields_exist(collection: &dyn Collection, fields: &[String]) -> Result<()> {
    let schema = collection.field_schema();
    for field in fields {
        if !schema.contains_key(field) {
            return Err(VistaError::validation(field, "does not exist"));
        }
    }
    Ok(())
}

/// Checks that a field exists and is declared as the expected embedded
/// container type. Existence is checked before type.
pub(crate) fn validate_container_type(
    collection: &dyn Collection,
    field: &str,
    expected: DocumentType,
) -> Result<()> {
    let schema = collection.field_schema();
    let found = schema
        .get(field)
        .ok_or_else(|| VistaError::validation(field, "does not exist"))?;

    if *found != FieldType::EmbeddedDocument(expected) {
        return Err(VistaError::validation(
            field,
            format!(
                "must be an instance of {}; found {found}",
                FieldType::EmbeddedDocument(expected)
            ),
        ));
    }

    Ok(())
}
