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

use crate::errors::Result;
use crate::expr::StageFilter;
use crate::schema::{validate_fields_exist, Collection};
use crate::stage::{required_filter, required_str, required_str_list, ParamMap, ViewStage};

/// Keeps the records for which the filter evaluates true.
#[derive(Clone, Debug)]
pub struct Match {
    filter: StageFilter,
}

impl Match {
    pub fn new(filter: impl Into<StageFilter>) -> Self {
        Match {
            filter: filter.into(),
        }
    }

    /// The filter in compiled fragment form. Structured expressions bind
    /// free fields at document scope and are wrapped in `$expr`; raw
    /// fragments are used verbatim as the match document.
    fn mongo_filter(&self) -> Value {
        if self.filter.is_expression() {
            json!({ "$expr": self.filter.to_ops(None) })
        } else {
            self.filter.to_ops(None)
        }
    }

    pub(crate) fn from_params(params: &ParamMap) -> Result<Self> {
        Ok(Match::new(required_filter(params, "filter")?))
    }
}

impl ViewStage for Match {
    fn name(&self) -> &'static str {
        "match"
    }

    fn compile(&self) -> Vec<Value> {
        vec![json!({ "$match": self.mongo_filter() })]
    }

    fn params(&self) -> Vec<(&'static str, Value)> {
        vec![("filter", self.mongo_filter())]
    }
}

/// Keeps the records whose tag set contains the given tag.
#[derive(Clone, Debug)]
pub struct MatchTag {
    tag: String,
}

impl MatchTag {
    pub fn new(tag: impl Into<String>) -> Self {
        MatchTag { tag: tag.into() }
    }

    pub(crate) fn from_params(params: &ParamMap) -> Result<Self> {
        Ok(MatchTag::new(required_str(params, "tag")?))
    }
}

impl ViewStage for MatchTag {
    fn name(&self) -> &'static str {
        "match_tag"
    }

    fn compile(&self) -> Vec<Value> {
        vec![json!({ "$match": { "tags": self.tag } })]
    }

    fn params(&self) -> Vec<(&'static str, Value)> {
        vec![("tag", json!(self.tag))]
    }
}

/// Keeps the records whose tag set intersects the given tags.
#[derive(Clone, Debug)]
pub struct MatchTags {
    tags: Vec<String>,
}

impl MatchTags {
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        MatchTags {
            tags: tags.into_iter().map(Into::into).collect(),
        }
    }

    pub(crate) fn from_params(params: &ParamMap) -> Result<Self> {
        Ok(MatchTags::new(required_str_list(params, "tags")?))
    }
}

impl ViewStage for MatchTags {
    fn name(&self) -> &'static str {
        "match_tags"
    }

    fn compile(&self) -> Vec<Value> {
        vec![json!({ "$match": { "tags": { "$in": self.tags } } })]
    }

    fn params(&self) -> Vec<(&'static str, Value)> {
        vec![("tags", json!(self.tags))]
    }
}

/// Keeps the records that have a present, non-null value for the field.
#[derive(Clone, Debug)]
pub struct Exists {
    field: String,
}

impl Exists {
    pub fn new(field: impl Into<String>) -> Self {
        Exists {
            field: field.into(),
        }
    }

    pub(crate) fn from_params(params: &ParamMap) -> Result<Self> {
        Ok(Exists::new(required_str(params, "field")?))
    }
}

impl ViewStage for Exists {
    fn name(&self) -> &'static str {
        "exists"
    }

    fn compile(&self) -> Vec<Value> {
        let mut predicate = Map::new();
        predicate.insert(
            self.field.clone(),
            json!({ "$exists": true, "$ne": null }),
        );
        vec![json!({ "$match": predicate })]
    }

    fn validate(&self, collection: &dyn Collection) -> Result<()> {
        validate_fields_exist(collection, std::slice::from_ref(&self.field))
    }

    fn params(&self) -> Vec<(&'static str, Value)> {
        vec![("field", json!(self.field))]
    }
}
