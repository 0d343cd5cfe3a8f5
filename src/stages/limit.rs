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

use serde_json::{json, Value};

use crate::errors::Result;
use crate::stage::{required_i64, ParamMap, ViewStage};
use crate::stages::match_none;

/// Caps the view at the given number of records.
///
/// A non-positive bound compiles to a match-nothing pipeline rather than a
/// bare limit operation, which backends reject for non-positive values.
#[derive(Clone, Debug)]
pub struct Limit {
    limit: i64,
}

impl Limit {
    pub fn new(limit: i64) -> Self {
        Limit { limit }
    }

    pub(crate) fn from_params(params: &ParamMap) -> Result<Self> {
        Ok(Limit::new(required_i64(params, "limit")?))
    }
}

impl ViewStage for Limit {
    fn name(&self) -> &'static str {
        "limit"
    }

    fn compile(&self) -> Vec<Value> {
        if self.limit <= 0 {
            return vec![match_none()];
        }
        vec![json!({ "$limit": self.limit })]
    }

    fn params(&self) -> Vec<(&'static str, Value)> {
        vec![("limit", json!(self.limit))]
    }
}

/// Omits the given number of records from the head of the view.
///
/// A non-positive offset is a no-op and compiles to no operations.
#[derive(Clone, Debug)]
pub struct Skip {
    skip: i64,
}

impl Skip {
    pub fn new(skip: i64) -> Self {
        Skip { skip }
    }

    pub(crate) fn from_params(params: &ParamMap) -> Result<Self> {
        Ok(Skip::new(required_i64(params, "skip")?))
    }
}

impl ViewStage for Skip {
    fn name(&self) -> &'static str {
        "skip"
    }

    fn compile(&self) -> Vec<Value> {
        if self.skip <= 0 {
            return Vec::new();
        }
        vec![json!({ "$skip": self.skip })]
    }

    fn params(&self) -> Vec<(&'static str, Value)> {
        vec![("skip", json!(self.skip))]
    }
}
