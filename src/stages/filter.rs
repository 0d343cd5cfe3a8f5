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

//! Field-value and list-element filter stages.
//!
//! [`FilterField`] evaluates its filter once per record, with free fields
//! bound under the target field's absolute path (`"$<field>"`). The list
//! filters evaluate once per element of a nested list sub-field, so free
//! fields bind to the implicit element variable (`"$$this"`) instead.

use serde_json::{json, Map, Value};

use crate::errors::{Result, VistaError};
use crate::expr::StageFilter;
use crate::schema::{
    validate_container_type, validate_fields_exist, Collection, DocumentType, RECORD_PATH_FIELD,
};
use crate::stage::{required_filter, required_str, ParamMap, ViewStage};

/// Replaces the field's value with null wherever the filter is false.
#[derive(Clone, Debug)]
pub struct FilterField {
    field: String,
    filter: StageFilter,
}

impl FilterField {
    pub fn new(field: impl Into<String>, filter: impl Into<StageFilter>) -> Self {
        FilterField {
            field: field.into(),
            filter: filter.into(),
        }
    }

    /// The field to filter.
    pub fn field(&self) -> &str {
        &self.field
    }

    fn mongo_filter(&self) -> Value {
        self.filter.to_ops(Some(&format!("${}", self.field)))
    }

    pub(crate) fn from_params(params: &ParamMap) -> Result<Self> {
        Ok(FilterField::new(
            required_str(params, "field")?,
            required_filter(params, "filter")?,
        ))
    }
}

impl ViewStage for FilterField {
    fn name(&self) -> &'static str {
        "filter_field"
    }

    fn compile(&self) -> Vec<Value> {
        let mut set = Map::new();
        set.insert(
            self.field.clone(),
            json!({
                "$cond": {
                    "if": self.mongo_filter(),
                    "then": format!("${}", self.field),
                    "else": null,
                }
            }),
        );
        vec![json!({ "$addFields": set })]
    }

    fn validate(&self, collection: &dyn Collection) -> Result<()> {
        if self.field == RECORD_PATH_FIELD {
            return Err(VistaError::validation(
                &self.field,
                "is required and cannot be filtered",
            ));
        }

        validate_fields_exist(collection, std::slice::from_ref(&self.field))
    }

    fn params(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("field", json!(self.field)),
            ("filter", self.mongo_filter()),
        ]
    }
}

// Shared compile shape of the two list filters: rewrite the nested list
// sub-field to only the elements passing the element-scoped condition.
fn list_filter_ops(filter_field: &str, cond: Value) -> Vec<Value> {
    let mut set = Map::new();
    set.insert(
        filter_field.to_string(),
        json!({
            "$filter": {
                "input": format!("${filter_field}"),
                "cond": cond,
            }
        }),
    );
    vec![json!({ "$addFields": set })]
}

/// Filters the classification elements in a classifications-container
/// field.
#[derive(Clone, Debug)]
pub struct FilterClassifications {
    field: String,
    filter: StageFilter,
}

impl FilterClassifications {
    pub fn new(field: impl Into<String>, filter: impl Into<StageFilter>) -> Self {
        FilterClassifications {
            field: field.into(),
            filter: filter.into(),
        }
    }

    fn filter_field(&self) -> String {
        format!("{}.classifications", self.field)
    }

    pub(crate) fn from_params(params: &ParamMap) -> Result<Self> {
        Ok(FilterClassifications::new(
            required_str(params, "field")?,
            required_filter(params, "filter")?,
        ))
    }
}

impl ViewStage for FilterClassifications {
    fn name(&self) -> &'static str {
        "filter_classifications"
    }

    fn compile(&self) -> Vec<Value> {
        list_filter_ops(&self.filter_field(), self.filter.to_ops(Some("$$this")))
    }

    fn validate(&self, collection: &dyn Collection) -> Result<()> {
        validate_container_type(collection, &self.field, DocumentType::Classifications)
    }

    fn filtered_list_fields(&self) -> Vec<String> {
        vec![self.filter_field()]
    }

    fn params(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("field", json!(self.field)),
            ("filter", self.filter.to_ops(Some("$$this"))),
        ]
    }
}

/// Filters the detection elements in a detections-container field.
#[derive(Clone, Debug)]
pub struct FilterDetections {
    field: String,
    filter: StageFilter,
}

impl FilterDetections {
    pub fn new(field: impl Into<String>, filter: impl Into<StageFilter>) -> Self {
        FilterDetections {
            field: field.into(),
            filter: filter.into(),
        }
    }

    fn filter_field(&self) -> String {
        format!("{}.detections", self.field)
    }

    pub(crate) fn from_params(params: &ParamMap) -> Result<Self> {
        Ok(FilterDetections::new(
            required_str(params, "field")?,
            required_filter(params, "filter")?,
        ))
    }
}

impl ViewStage for FilterDetections {
    fn name(&self) -> &'static str {
        "filter_detections"
    }

    fn compile(&self) -> Vec<Value> {
        list_filter_ops(&self.filter_field(), self.filter.to_ops(Some("$$this")))
    }

    fn validate(&self, collection: &dyn Collection) -> Result<()> {
        validate_container_type(collection, &self.field, DocumentType::Detections)
    }

    fn filtered_list_fields(&self) -> Vec<String> {
        vec![self.filter_field()]
    }

    fn params(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("field", json!(self.field)),
            ("filter", self.filter.to_ops(Some("$$this"))),
        ]
    }
}
