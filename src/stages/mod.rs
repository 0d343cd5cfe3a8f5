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

//! # Stages Module
//!
//! Concrete view stage variants, grouped by concern:
//!
//! - **select**: id-based record selection (Select, Exclude)
//! - **fields**: field projection (SelectFields, ExcludeFields)
//! - **matching**: record predicates (Match, MatchTag, MatchTags, Exists)
//! - **filter**: field-value and list-element filtering (FilterField,
//!   FilterClassifications, FilterDetections)
//! - **limit**: head/offset windows (Limit, Skip)
//! - **sort**: ordering by field or computed value (SortBy)
//! - **shuffle**: reproducible randomized ordering (Shuffle, Take)
//! - **raw**: pass-through primitive fragments (RawPipeline)

use serde_json::{json, Value};

pub mod fields;
pub mod filter;
pub mod limit;
pub mod matching;
pub mod raw;
pub mod select;
pub mod shuffle;
pub mod sort;

/// Ascending sort order in the primitive operation language.
pub(crate) const ASCENDING: i64 = 1;

/// Descending sort order in the primitive operation language.
pub(crate) const DESCENDING: i64 = -1;

/// A primitive operation that matches no record; no record id is null.
pub(crate) fn match_none() -> Value {
    json!({ "$match": { "_id": null } })
}
