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
use crate::expr::Expression;
use crate::schema::{validate_fields_exist, Collection};
use crate::stage::{required_param, ParamMap, ViewStage};
use crate::stages::{ASCENDING, DESCENDING};

/// What a [`SortBy`] stage orders records by.
#[derive(Clone, Debug)]
pub enum SortKey {
    /// A scalar field, sorted in place.
    Field(String),
    /// A computed value, materialized as a transient field for the sort.
    Expression(Expression),
    /// A pre-built computed-value fragment.
    Fragment(Value),
}

impl From<&str> for SortKey {
    fn from(field: &str) -> Self {
        SortKey::Field(field.to_string())
    }
}

impl From<String> for SortKey {
    fn from(field: String) -> Self {
        SortKey::Field(field)
    }
}

impl From<Expression> for SortKey {
    fn from(expr: Expression) -> Self {
        SortKey::Expression(expr)
    }
}

/// Orders the records in the view by a field or computed value.
#[derive(Clone, Debug)]
pub struct SortBy {
    key: SortKey,
    reverse: bool,
}

impl SortBy {
    pub fn new(key: impl Into<SortKey>, reverse: bool) -> Self {
        SortBy {
            key: key.into(),
            reverse,
        }
    }

    fn mongo_key(&self) -> Value {
        match &self.key {
            SortKey::Field(name) => json!(name),
            SortKey::Expression(expr) => expr.to_ops(None),
            SortKey::Fragment(value) => value.clone(),
        }
    }

    pub(crate) fn from_params(params: &ParamMap) -> Result<Self> {
        let key = match required_param(params, "field_or_expr")? {
            Value::String(name) => SortKey::Field(name.clone()),
            value @ Value::Object(_) => SortKey::Fragment(value.clone()),
            other => {
                return Err(VistaError::decode(format!(
                    "parameter 'field_or_expr' must be a field name or a fragment; found {other}"
                )))
            }
        };

        let reverse = match params.get("reverse") {
            None | Some(Value::Null) => false,
            Some(value) => value.as_bool().ok_or_else(|| {
                VistaError::decode("parameter 'reverse' must be a boolean")
            })?,
        };

        Ok(SortBy { key, reverse })
    }
}

impl ViewStage for SortBy {
    fn name(&self) -> &'static str {
        "sort_by"
    }

    fn compile(&self) -> Vec<Value> {
        let order = if self.reverse { DESCENDING } else { ASCENDING };

        match self.mongo_key() {
            Value::String(field) => {
                let mut sort = Map::new();
                sort.insert(field, json!(order));
                vec![json!({ "$sort": sort })]
            }
            computed => vec![
                json!({ "$addFields": { "_sort_field": computed } }),
                json!({ "$sort": { "_sort_field": order } }),
                json!({ "$unset": "_sort_field" }),
            ],
        }
    }

    fn validate(&self, collection: &dyn Collection) -> Result<()> {
        if let SortKey::Field(name) = &self.key {
            return validate_fields_exist(collection, std::slice::from_ref(name));
        }
        Ok(())
    }

    fn params(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("field_or_expr", self.mongo_key()),
            ("reverse", json!(self.reverse)),
        ]
    }
}
