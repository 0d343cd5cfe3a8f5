//! Copyright © 2025-2026 Dunimd Team. All Rights Reserved.
//!
//! This file is part of Vista.
//! The Vista project belongs to the Dunimd Team.
//!
//! Licensed under the Apache License, Version 2.0 (the "License");
//! you may not use this file except in compliance with the License.
//!
//! You may obtain a copy of the License at
//!
//!     http://www.apache.org/licenses/LICENSE-2.0
//!
//! Unless required by applicable law or agreed to in writing, software
//! distributed under the License is distributed on an "AS IS" BASIS,
//! WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//! See the License for the specific language governing permissions and
//! limitations under the License.

//! # Vista Core Tests - Pipeline
//!
//! Tests for the pipeline compiler: ordered compilation, fail-fast
//! validation with the failing stage's index, and whole-pipeline JSON
//! round-trips.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test pipeline
//! ```

use serde_json::json;
use vista::{
    CollectionSchema, DocumentType, Exists, Expression, FieldType, FilterDetections, Limit, Match,
    MatchTag, Skip, SortBy, ViewPipeline, VistaError,
};

fn collection() -> CollectionSchema {
    CollectionSchema::new()
        .with_field("confidence", FieldType::Float)
        .with_field(
            "preds",
            FieldType::EmbeddedDocument(DocumentType::Detections),
        )
}

#[test]
fn empty_pipeline_is_the_identity() {
    let ops = ViewPipeline::new().compile(&collection()).unwrap();
    assert!(ops.is_empty());
}

#[test]
fn stages_are_compiled_in_sequence_order() {
    let pipeline = ViewPipeline::new()
        .with_stage(MatchTag::new("validated"))
        .with_stage(Skip::new(10))
        .with_stage(Limit::new(3));

    let ops = pipeline.compile(&collection()).unwrap();
    assert_eq!(
        ops,
        vec![
            json!({"$match": {"tags": "validated"}}),
            json!({"$skip": 10}),
            json!({"$limit": 3}),
        ]
    );
}

#[test]
fn compilation_short_circuits_on_the_first_invalid_stage() {
    let pipeline = ViewPipeline::new()
        .with_stage(Limit::new(5))
        .with_stage(Exists::new("missing"))
        .with_stage(MatchTag::new("validated"));

    let err = pipeline.compile(&collection()).unwrap_err();
    match err {
        VistaError::Compilation {
            index,
            stage,
            source,
        } => {
            assert_eq!(index, 1);
            assert_eq!(stage, "exists");
            assert!(matches!(*source, VistaError::Validation { .. }));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn compilation_is_all_or_nothing() {
    let pipeline = ViewPipeline::new()
        .with_stage(Limit::new(5))
        .with_stage(Exists::new("missing"));

    assert!(pipeline.compile(&collection()).is_err());
}

#[test]
fn recompiling_yields_the_same_operations() {
    let pipeline = ViewPipeline::new()
        .with_stage(Match::new(Expression::field("confidence").gt(0.5)))
        .with_stage(SortBy::new("confidence", true))
        .with_stage(Limit::new(10));

    let first = pipeline.compile(&collection()).unwrap();
    let second = pipeline.compile(&collection()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn filtered_list_fields_aggregate_across_stages() {
    let pipeline = ViewPipeline::new()
        .with_stage(Limit::new(5))
        .with_stage(FilterDetections::new(
            "preds",
            Expression::field("confidence").gt(0.5),
        ));

    let fields = pipeline.filtered_list_fields();
    assert_eq!(fields.len(), 1);
    assert!(fields.contains("preds.detections"));
}

#[test]
fn pipelines_round_trip_through_json() {
    let pipeline = ViewPipeline::new()
        .with_stage(Match::new(Expression::field("confidence").gt(0.5)))
        .with_stage(SortBy::new("confidence", false))
        .with_stage(Limit::new(10));

    let restored = ViewPipeline::from_json(&pipeline.to_json()).unwrap();
    assert_eq!(restored.len(), pipeline.len());
    assert_eq!(
        restored.compile(&collection()).unwrap(),
        pipeline.compile(&collection()).unwrap()
    );
}

#[test]
fn validation_error_reporting_is_positional() {
    // Same invalid stage at different positions reports different indices.
    for position in 0..3 {
        let mut pipeline = ViewPipeline::new();
        for index in 0..3 {
            if index == position {
                pipeline.push(Exists::new("missing"));
            } else {
                pipeline.push(Limit::new(1));
            }
        }
        match pipeline.compile(&collection()).unwrap_err() {
            VistaError::Compilation { index, .. } => assert_eq!(index, position),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
