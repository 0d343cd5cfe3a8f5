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

//! # Vista Stage Tests - Filter
//!
//! Tests for the match and filter stages, including the scope-prefix rule:
//! document-level matches bind free fields at document scope, field filters
//! bind under the target field's path, and list-element filters bind to the
//! implicit element variable.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test filter
//! ```

use serde_json::json;
use vista::{
    CollectionSchema, DocumentType, Exists, Expression, FieldType, FilterDetections, FilterField,
    Match, StageFilter, ViewStage, VistaError, RECORD_PATH_FIELD,
};

#[test]
fn match_wraps_expressions_in_expr_at_document_scope() {
    let stage = Match::new(Expression::field("confidence").gt(0.5));
    assert_eq!(
        stage.compile(),
        vec![json!({"$match": {"$expr": {"$gt": ["$confidence", 0.5]}}})]
    );
}

#[test]
fn match_uses_raw_fragments_verbatim() {
    let fragment = json!({"tags": "validated"});
    let stage = Match::new(StageFilter::fragment(fragment.clone()).unwrap());
    assert_eq!(stage.compile(), vec![json!({"$match": fragment})]);
}

#[test]
fn non_object_fragments_are_rejected() {
    let err = StageFilter::fragment(json!(42)).unwrap_err();
    assert!(matches!(err, VistaError::Construction { .. }));
}

#[test]
fn filter_field_binds_free_fields_under_the_field_path() {
    let stage = FilterField::new("predictions", Expression::field("confidence").gte(0.9));
    let ops = stage.compile();
    let cond = &ops[0]["$addFields"]["predictions"]["$cond"];
    assert_eq!(cond["if"], json!({"$gte": ["$predictions.confidence", 0.9]}));
    assert_eq!(cond["then"], json!("$predictions"));
    assert_eq!(cond["else"], json!(null));
}

#[test]
fn list_filter_binds_free_fields_to_the_element_variable() {
    let stage = FilterDetections::new("preds", Expression::field("confidence").gt(0.5));
    let ops = stage.compile();
    let filter = &ops[0]["$addFields"]["preds.detections"]["$filter"];
    assert_eq!(filter["input"], json!("$preds.detections"));
    assert_eq!(filter["cond"], json!({"$gt": ["$$this.confidence", 0.5]}));
}

#[test]
fn list_filter_reports_its_filtered_list_field() {
    let stage = FilterDetections::new("preds", Expression::field("label").eq(json!("cat")));
    assert_eq!(stage.filtered_list_fields(), vec!["preds.detections"]);

    let plain = FilterField::new("preds", Expression::this().ne(json!(null)));
    assert!(plain.filtered_list_fields().is_empty());
}

#[test]
fn list_filter_validates_the_container_type() {
    let collection = CollectionSchema::new()
        .with_field("preds", FieldType::EmbeddedDocument(DocumentType::Detections));
    let stage = FilterDetections::new("preds", Expression::field("confidence").gt(0.5));
    stage.validate(&collection).unwrap();
}

#[test]
fn list_filter_rejects_a_non_container_field_naming_it() {
    let collection = CollectionSchema::new().with_field("preds", FieldType::String);
    let stage = FilterDetections::new("preds", Expression::field("confidence").gt(0.5));
    let err = stage.validate(&collection).unwrap_err();
    match err {
        VistaError::Validation { field, message } => {
            assert_eq!(field, "preds");
            assert!(message.contains("EmbeddedDocument(Detections)"));
            assert!(message.contains("found String"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn filter_field_rejects_the_required_path_field() {
    let collection = CollectionSchema::new();
    let stage = FilterField::new(RECORD_PATH_FIELD, Expression::this().ne(json!(null)));
    let err = stage.validate(&collection).unwrap_err();
    assert!(matches!(err, VistaError::Validation { .. }));
    assert!(err.to_string().contains(RECORD_PATH_FIELD));
}

#[test]
fn filter_field_requires_the_field_to_exist() {
    let collection = CollectionSchema::new();
    let stage = FilterField::new("missing", Expression::this().ne(json!(null)));
    let err = stage.validate(&collection).unwrap_err();
    match err {
        VistaError::Validation { field, message } => {
            assert_eq!(field, "missing");
            assert_eq!(message, "does not exist");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn exists_compiles_to_present_and_non_null() {
    let stage = Exists::new("ground_truth");
    assert_eq!(
        stage.compile(),
        vec![json!({"$match": {"ground_truth": {"$exists": true, "$ne": null}}})]
    );
}
