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

//! # Vista Stage Module
//!
//! The core stage abstraction. A stage is an immutable, self-describing
//! unit of view transformation: it can compile itself to primitive
//! operations, validate itself against a collection's schema, report which
//! nested list fields it filters, and round-trip through a name-tagged
//! serialized form.
//!
//! ## Design
//!
//! Concrete stages are plain structs implementing [`ViewStage`]; the
//! [`Stage`] enumeration closes the variant set and dispatches with a
//! `match`, so adding a variant without wiring it everywhere is a compile
//! error rather than a runtime lookup failure. Constructors perform all
//! structural validation — a stage that constructs successfully always
//! compiles.

use std::fmt;

use serde_json::{json, Map, Value};

use crate::errors::{Result, VistaError};
use crate::registry::StageKind;
use crate::schema::Collection;
use crate::stages::fields::{ExcludeFields, SelectFields};
use crate::stages::filter::{FilterClassifications, FilterDetections, FilterField};
use crate::stages::limit::{Limit, Skip};
use crate::stages::matching::{Exists, Match, MatchTag, MatchTags};
use crate::stages::raw::RawPipeline;
use crate::stages::select::{Exclude, Select};
use crate::stages::shuffle::{Shuffle, Take};
use crate::stages::sort::SortBy;

/// Parameter lookup map used while decoding serialized stages.
pub(crate) type ParamMap = Map<String, Value>;

/// Contract every concrete view stage fulfills.
pub trait ViewStage: fmt::Debug {
    /// The stage's registry tag.
    fn name(&self) -> &'static str;

    /// Compiles the stage to zero or more primitive operations. Pure
    /// function of the stage's parameters; never consults the schema.
    fn compile(&self) -> Vec<Value>;

    /// Validates that the stage can be applied to the given collection.
    ///
    /// The default is "always valid"; variants that reference fields
    /// override this with existence and type checks.
    fn validate(&self, _collection: &dyn Collection) -> Result<()> {
        Ok(())
    }

    /// Nested list field paths whose elements this stage may have pruned.
    fn filtered_list_fields(&self) -> Vec<String> {
        Vec::new()
    }

    /// Ordered `(name, value)` pairs that reconstruct the stage.
    fn params(&self) -> Vec<(&'static str, Value)>;
}

/// Closed set of view stage variants.
#[derive(Clone, Debug)]
pub enum Stage {
    Exclude(Exclude),
    ExcludeFields(ExcludeFields),
    Exists(Exists),
    FilterField(FilterField),
    FilterClassifications(FilterClassifications),
    FilterDetections(FilterDetections),
    Limit(Limit),
    Match(Match),
    MatchTag(MatchTag),
    MatchTags(MatchTags),
    RawPipeline(RawPipeline),
    Select(Select),
    SelectFields(SelectFields),
    Shuffle(Shuffle),
    Skip(Skip),
    SortBy(SortBy),
    Take(Take),
}

impl Stage {
    fn inner(&self) -> &dyn ViewStage {
        match self {
            Stage::Exclude(s) => s,
            Stage::ExcludeFields(s) => s,
            Stage::Exists(s) => s,
            Stage::FilterField(s) => s,
            Stage::FilterClassifications(s) => s,
            Stage::FilterDetections(s) => s,
            Stage::Limit(s) => s,
            Stage::Match(s) => s,
            Stage::MatchTag(s) => s,
            Stage::MatchTags(s) => s,
            Stage::RawPipeline(s) => s,
            Stage::Select(s) => s,
            Stage::SelectFields(s) => s,
            Stage::Shuffle(s) => s,
            Stage::Skip(s) => s,
            Stage::SortBy(s) => s,
            Stage::Take(s) => s,
        }
    }

    /// The stage's registry tag.
    pub fn name(&self) -> &'static str {
        self.inner().name()
    }

    /// Compiles the stage to its primitive operations.
    pub fn compile(&self) -> Vec<Value> {
        self.inner().compile()
    }

    /// Validates the stage against the given collection.
    pub fn validate(&self, collection: &dyn Collection) -> Result<()> {
        self.inner().validate(collection)
    }

    /// Nested list field paths this stage may have pruned.
    pub fn filtered_list_fields(&self) -> Vec<String> {
        self.inner().filtered_list_fields()
    }

    /// Serializes the stage to its name-tagged, parameter-tagged form.
    pub fn to_json(&self) -> Value {
        let params: Vec<Value> = self
            .inner()
            .params()
            .into_iter()
            .map(|(name, value)| json!([name, value]))
            .collect();
        json!({ "stage": self.name(), "params": params })
    }

    /// Reconstructs a stage from its serialized form, dispatching on the
    /// recorded variant tag.
    pub fn from_json(value: &Value) -> Result<Stage> {
        let object = value
            .as_object()
            .ok_or_else(|| VistaError::decode("serialized stage must be an object"))?;

        let tag = object
            .get("stage")
            .and_then(Value::as_str)
            .ok_or_else(|| VistaError::decode("serialized stage missing string 'stage'"))?;

        let kind = StageKind::from_name(tag)
            .ok_or_else(|| VistaError::decode(format!("unknown stage '{tag}'")))?;

        let pairs = object
            .get("params")
            .and_then(Value::as_array)
            .ok_or_else(|| VistaError::decode("serialized stage missing array 'params'"))?;

        let mut params = ParamMap::new();
        for pair in pairs {
            let pair = pair.as_array().filter(|p| p.len() == 2).ok_or_else(|| {
                VistaError::decode("stage parameters must be [name, value] pairs")
            })?;
            let name = pair[0]
                .as_str()
                .ok_or_else(|| VistaError::decode("stage parameter names must be strings"))?;
            params.insert(name.to_string(), pair[1].clone());
        }

        kind.decode(&params)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params = self
            .inner()
            .params()
            .into_iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{}({params})", self.name())
    }
}

macro_rules! stage_from {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for Stage {
                fn from(stage: $variant) -> Self {
                    Stage::$variant(stage)
                }
            }
        )*
    };
}

stage_from!(
    Exclude,
    ExcludeFields,
    Exists,
    FilterField,
    FilterClassifications,
    FilterDetections,
    Limit,
    Match,
    MatchTag,
    MatchTags,
    RawPipeline,
    Select,
    SelectFields,
    Shuffle,
    Skip,
    SortBy,
    Take,
);

/// Fetches a required decode parameter by name.
pub(crate) fn required_param<'a>(params: &'a ParamMap, name: &str) -> Result<&'a Value> {
    params
        .get(name)
        .ok_or_else(|| VistaError::decode(format!("missing parameter '{name}'")))
}

/// Fetches a required string parameter.
pub(crate) fn required_str(params: &ParamMap, name: &str) -> Result<String> {
    required_param(params, name)?
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| VistaError::decode(format!("parameter '{name}' must be a string")))
}

/// Fetches a required integer parameter.
pub(crate) fn required_i64(params: &ParamMap, name: &str) -> Result<i64> {
    required_param(params, name)?
        .as_i64()
        .ok_or_else(|| VistaError::decode(format!("parameter '{name}' must be an integer")))
}

/// Fetches an optional seed parameter; absent and null are equivalent.
pub(crate) fn optional_seed(params: &ParamMap, name: &str) -> Result<Option<u64>> {
    match params.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value.as_u64().map(Some).ok_or_else(|| {
            VistaError::decode(format!("parameter '{name}' must be an unsigned integer"))
        }),
    }
}

/// Fetches a required list-of-strings parameter.
pub(crate) fn required_str_list(params: &ParamMap, name: &str) -> Result<Vec<String>> {
    required_param(params, name)?
        .as_array()
        .map(|items| {
            items
                .iter()
                .map(|item| {
                    item.as_str().map(str::to_string).ok_or_else(|| {
                        VistaError::decode(format!("parameter '{name}' must contain only strings"))
                    })
                })
                .collect::<Result<Vec<_>>>()
        })
        .ok_or_else(|| VistaError::decode(format!("parameter '{name}' must be an array")))?
}

/// Fetches a required object-fragment parameter as a [`crate::expr::StageFilter`].
pub(crate) fn required_filter(params: &ParamMap, name: &str) -> Result<crate::expr::StageFilter> {
    let value = required_param(params, name)?.clone();
    crate::expr::StageFilter::fragment(value)
        .map_err(|err| VistaError::decode(format!("parameter '{name}': {err}")))
}
