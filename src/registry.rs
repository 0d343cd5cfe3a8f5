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

//! # Vista Registry Module
//!
//! The closed catalog of stage variants. [`StageKind`] enumerates every
//! concrete stage; decoding dispatches through an exhaustive `match`, so a
//! variant that exists but is not wired here fails to compile instead of
//! failing a runtime lookup. Hosts discover available stages and their
//! parameter shapes through [`descriptors`].

use strum::{EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

use crate::errors::Result;
use crate::stage::{ParamMap, Stage};
use crate::stages::fields::{ExcludeFields, SelectFields};
use crate::stages::filter::{FilterClassifications, FilterDetections, FilterField};
use crate::stages::limit::{Limit, Skip};
use crate::stages::matching::{Exists, Match, MatchTag, MatchTags};
use crate::stages::raw::RawPipeline;
use crate::stages::select::{Exclude, Select};
use crate::stages::shuffle::{Shuffle, Take};
use crate::stages::sort::SortBy;

/// Closed enumeration of stage variant kinds, keyed by snake_case tag.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, EnumString, IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum StageKind {
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
}

/// Shape of one stage parameter, for discovery by remote builders.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub type_hint: &'static str,
    pub default: Option<&'static str>,
}

const fn param(name: &'static str, type_hint: &'static str) -> ParamSpec {
    ParamSpec {
        name,
        type_hint,
        default: None,
    }
}

const fn param_with_default(
    name: &'static str,
    type_hint: &'static str,
    default: &'static str,
) -> ParamSpec {
    ParamSpec {
        name,
        type_hint,
        default: Some(default),
    }
}

/// One catalog entry: a stage tag and its parameter shapes.
#[derive(Clone, Copy, Debug)]
pub struct StageDescriptor {
    pub name: &'static str,
    pub params: &'static [ParamSpec],
}

impl StageKind {
    /// The kind's serialized tag.
    pub fn name(&self) -> &'static str {
        (*self).into()
    }

    /// Looks up a kind by its serialized tag.
    pub fn from_name(name: &str) -> Option<StageKind> {
        name.parse().ok()
    }

    /// Every stage kind, in catalog order.
    pub fn all() -> Vec<StageKind> {
        StageKind::iter().collect()
    }

    /// The parameter shapes that define this kind.
    pub fn param_specs(&self) -> &'static [ParamSpec] {
        const EXCLUDE_SELECT: &[ParamSpec] = &[param("record_ids", "list<id>")];
        const EXCLUDE_FIELDS: &[ParamSpec] = &[param("field_names", "list<str>")];
        const EXISTS: &[ParamSpec] = &[param("field", "str")];
        const FILTER: &[ParamSpec] = &[param("field", "str"), param("filter", "dict")];
        const LIMIT: &[ParamSpec] = &[param("limit", "int")];
        const MATCH: &[ParamSpec] = &[param("filter", "dict")];
        const MATCH_TAG: &[ParamSpec] = &[param("tag", "str")];
        const MATCH_TAGS: &[ParamSpec] = &[param("tags", "list<str>")];
        const RAW_PIPELINE: &[ParamSpec] = &[param("pipeline", "list<dict>")];
        const SELECT_FIELDS: &[ParamSpec] =
            &[param_with_default("field_names", "list<str>", "[]")];
        const SHUFFLE: &[ParamSpec] = &[param_with_default("seed", "int|null", "null")];
        const SKIP: &[ParamSpec] = &[param("skip", "int")];
        const SORT_BY: &[ParamSpec] = &[
            param("field_or_expr", "str|dict"),
            param_with_default("reverse", "bool", "false"),
        ];
        const TAKE: &[ParamSpec] = &[
            param("size", "int"),
            param_with_default("seed", "int|null", "null"),
        ];
        match self {
            StageKind::Exclude | StageKind::Select => EXCLUDE_SELECT,
            StageKind::ExcludeFields => EXCLUDE_FIELDS,
            StageKind::Exists => EXISTS,
            StageKind::FilterField
            | StageKind::FilterClassifications
            | StageKind::FilterDetections => FILTER,
            StageKind::Limit => LIMIT,
            StageKind::Match => MATCH,
            StageKind::MatchTag => MATCH_TAG,
            StageKind::MatchTags => MATCH_TAGS,
            StageKind::RawPipeline => RAW_PIPELINE,
            StageKind::SelectFields => SELECT_FIELDS,
            StageKind::Shuffle => SHUFFLE,
            StageKind::Skip => SKIP,
            StageKind::SortBy => SORT_BY,
            StageKind::Take => TAKE,
        }
    }

    /// Reconstructs a stage of this kind from decoded parameters.
    pub(crate) fn decode(&self, params: &ParamMap) -> Result<Stage> {
        Ok(match self {
            StageKind::Exclude => Stage::Exclude(Exclude::from_params(params)?),
            StageKind::ExcludeFields => Stage::ExcludeFields(ExcludeFields::from_params(params)?),
            StageKind::Exists => Stage::Exists(Exists::from_params(params)?),
            StageKind::FilterField => Stage::FilterField(FilterField::from_params(params)?),
            StageKind::FilterClassifications => {
                Stage::FilterClassifications(FilterClassifications::from_params(params)?)
            }
            StageKind::FilterDetections => {
                Stage::FilterDetections(FilterDetections::from_params(params)?)
            }
            StageKind::Limit => Stage::Limit(Limit::from_params(params)?),
            StageKind::Match => Stage::Match(Match::from_params(params)?),
            StageKind::MatchTag => Stage::MatchTag(MatchTag::from_params(params)?),
            StageKind::MatchTags => Stage::MatchTags(MatchTags::from_params(params)?),
            StageKind::RawPipeline => Stage::RawPipeline(RawPipeline::from_params(params)?),
            StageKind::Select => Stage::Select(Select::from_params(params)?),
            StageKind::SelectFields => Stage::SelectFields(SelectFields::from_params(params)?),
            StageKind::Shuffle => Stage::Shuffle(Shuffle::from_params(params)?),
            StageKind::Skip => Stage::Skip(Skip::from_params(params)?),
            StageKind::SortBy => Stage::SortBy(SortBy::from_params(params)?),
            StageKind::Take => Stage::Take(Take::from_params(params)?),
        })
    }
}

/// Lists every available stage with its parameter shapes.
pub fn descriptors() -> Vec<StageDescriptor> {
    StageKind::iter()
        .map(|kind| StageDescriptor {
            name: kind.name(),
            params: kind.param_specs(),
        })
        .collect()
}
