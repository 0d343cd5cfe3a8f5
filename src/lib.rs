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

//! # Vista
//!
//! Vista is a declarative view-pipeline compiler for document collections.
//! Callers assemble an ordered sequence of logical transformation stages
//! over a collection of structured records, and Vista validates each stage
//! against the collection's current field schema and compiles the sequence
//! into a flattened, ordered list of backend-executable primitive
//! operations. Vista never executes pipelines; the document store's
//! aggregation engine does.
//!
//! ## Module Overview
//!
//! - **stage**: the stage contract and the closed [`Stage`] variant set
//! - **stages**: concrete stage variants (selection, projection, matching,
//!   filtering, windowing, ordering, randomized ordering, raw fragments)
//! - **pipeline**: ordered stage sequences and the compiler
//! - **registry**: the stage catalog for discovery and deserialization
//! - **expr**: the expression tree and filter sum type with scope-prefix
//!   compilation
//! - **schema**: field-type descriptors and the collection validation seam
//! - **random**: fold-multiplier derivation for reproducible shuffling
//! - **errors**: the [`VistaError`] enumeration
//!
//! ## Quick Start
//!
//! ```rust
//! use vista::{CollectionSchema, Expression, Match, Take, ViewPipeline};
//!
//! let collection = CollectionSchema::new()
//!     .with_field("confidence", vista::FieldType::Float);
//!
//! let pipeline = ViewPipeline::new()
//!     .with_stage(Match::new(Expression::field("confidence").gt(0.9)))
//!     .with_stage(Take::new(100, Some(42)));
//!
//! let ops = pipeline.compile(&collection).unwrap();
//! ```
//!
//! ## Error Handling
//!
//! All operations return `Result<T, VistaError>`. Structural defects fail
//! at stage construction, schema mismatches fail at validation, and
//! pipeline compilation is all-or-nothing.

pub mod errors;
pub mod expr;
pub mod pipeline;
pub mod random;
pub mod registry;
pub mod schema;
pub mod stage;
pub mod stages;

pub use errors::{Result, VistaError};
pub use expr::{CompareOp, Expression, StageFilter};
pub use pipeline::ViewPipeline;
pub use registry::{descriptors, ParamSpec, StageDescriptor, StageKind};
pub use schema::{
    default_record_fields, Collection, CollectionSchema, DocumentType, FieldSchema, FieldType,
    RECORD_PATH_FIELD, RECORD_RAND_FIELD,
};
pub use stage::{Stage, ViewStage};
pub use stages::fields::{ExcludeFields, SelectFields};
pub use stages::filter::{FilterClassifications, FilterDetections, FilterField};
pub use stages::limit::{Limit, Skip};
pub use stages::matching::{Exists, Match, MatchTag, MatchTags};
pub use stages::raw::RawPipeline;
pub use stages::select::{Exclude, Select};
pub use stages::shuffle::{Shuffle, Take};
pub use stages::sort::{SortBy, SortKey};
