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

use serde_json::{json, Map, Value};

use crate::errors::{Result, VistaError};
use crate::schema::{default_record_fields, validate_fields_exist, Collection};
use crate::stage::{required_str_list, ParamMap, ViewStage};

/// Drops the named fields from every record in the view.
///
/// Default record fields can never be excluded; requesting one fails at
/// construction.
#[derive(Clone, Debug)]
pub struct ExcludeFields {
    field_names: Vec<String>,
}

impl ExcludeFields {
    pub fn new<I, S>(field_names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let field_names: Vec<String> = field_names.into_iter().map(Into::into).collect();

        let protected: Vec<&String> = field_names
            .iter()
            .filter(|name| default_record_fields().contains(&name.as_str()))
            .collect();
        if !protected.is_empty() {
            return Err(VistaError::construction(format!(
                "cannot exclude default fields: {protected:?}"
            )));
        }

        Ok(ExcludeFields { field_names })
    }

    /// The field names to exclude.
    pub fn field_names(&self) -> &[String] {
        &self.field_names
    }

    pub(crate) fn from_params(params: &ParamMap) -> Result<Self> {
        ExcludeFields::new(required_str_list(params, "field_names")?)
    }
}

impl ViewStage for ExcludeFields {
    fn name(&self) -> &'static str {
        "exclude_fields"
    }

    fn compile(&self) -> Vec<Value> {
        vec![json!({ "$unset": self.field_names })]
    }

    fn validate(&self, collection: &dyn Collection) -> Result<()> {
        validate_fields_exist(collection, &self.field_names)
    }

    fn params(&self) -> Vec<(&'static str, Value)> {
        vec![("field_names", json!(self.field_names))]
    }
}

/// Projects only the named fields from every record in the view.
///
/// The default record fields are always part of the projection: the stored
/// name list is the default set followed by the requested extras, deduped.
#[derive(Clone, Debug)]
pub struct SelectFields {
    field_names: Vec<String>,
}

impl SelectFields {
    pub fn new<I, S>(field_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names: Vec<String> = default_record_fields()
            .iter()
            .map(|name| name.to_string())
            .collect();
        for name in field_names {
            let name = name.into();
            if !names.contains(&name) {
                names.push(name);
            }
        }
        SelectFields { field_names: names }
    }

    /// Projects just the default record fields.
    pub fn defaults() -> Self {
        SelectFields::new(std::iter::empty::<String>())
    }

    /// The field names to project, defaults included.
    pub fn field_names(&self) -> &[String] {
        &self.field_names
    }

    pub(crate) fn from_params(params: &ParamMap) -> Result<Self> {
        Ok(SelectFields::new(required_str_list(params, "field_names")?))
    }
}

impl ViewStage for SelectFields {
    fn name(&self) -> &'static str {
        "select_fields"
    }

    fn compile(&self) -> Vec<Value> {
        let mut projection = Map::new();
        for name in &self.field_names {
            projection.insert(name.clone(), Value::Bool(true));
        }
        vec![json!({ "$project": projection })]
    }

    fn validate(&self, collection: &dyn Collection) -> Result<()> {
        validate_fields_exist(collection, &self.field_names)
    }

    fn params(&self) -> Vec<(&'static str, Value)> {
        vec![("field_names", json!(self.field_names))]
    }
}
