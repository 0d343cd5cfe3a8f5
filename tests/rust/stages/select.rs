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

//! # Vista Stage Tests - Select
//!
//! Tests for the id-based Select and Exclude stages: id well-formedness at
//! construction, compiled match shapes, and the select/exclude complement.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test select
//! ```

use proptest::prelude::*;
use serde_json::json;
use vista::{CollectionSchema, Exclude, Select, ViewStage, VistaError};

const ID_A: &str = "5f0a1b2c3d4e5f6a7b8c9d0e";
const ID_B: &str = "0123456789abcdef01234567";

#[test]
fn select_compiles_to_in_match_over_exact_id_set() {
    let stage = Select::new([ID_A, ID_B]).unwrap();
    let ops = stage.compile();
    assert_eq!(
        ops,
        vec![json!({
            "$match": {
                "_id": { "$in": [{"$oid": ID_A}, {"$oid": ID_B}] }
            }
        })]
    );
}

#[test]
fn exclude_compiles_to_complement_of_select() {
    let select = Select::new([ID_A, ID_B]).unwrap().compile();
    let exclude = Exclude::new([ID_A, ID_B]).unwrap().compile();

    let selected = &select[0]["$match"]["_id"]["$in"];
    let excluded = &exclude[0]["$match"]["_id"]["$not"]["$in"];
    assert_eq!(selected, excluded);
}

#[test]
fn malformed_ids_fail_at_construction() {
    for bad in ["short", "5F0A1B2C3D4E5F6A7B8C9D0E", "5f0a1b2c3d4e5f6a7b8c9d0ez"] {
        let err = Select::new([bad]).unwrap_err();
        assert!(matches!(err, VistaError::Construction { .. }), "{bad}");
        let err = Exclude::new([bad]).unwrap_err();
        assert!(matches!(err, VistaError::Construction { .. }), "{bad}");
    }
}

#[test]
fn well_formed_ids_always_validate() {
    let collection = CollectionSchema::new();
    let stage = Select::new([ID_A]).unwrap();
    vista::Stage::from(stage).validate(&collection).unwrap();
}

#[test]
fn empty_id_set_is_allowed() {
    let stage = Select::new(Vec::<String>::new()).unwrap();
    let ops = stage.compile();
    assert_eq!(ops[0]["$match"]["_id"]["$in"], json!([]));
}

proptest! {
    #[test]
    fn any_well_formed_id_set_constructs_and_selects_exactly(
        ids in proptest::collection::vec("[0-9a-f]{24}", 0..8)
    ) {
        let stage = Select::new(ids.clone()).unwrap();
        let ops = stage.compile();
        let selected = ops[0]["$match"]["_id"]["$in"].as_array().unwrap();
        prop_assert_eq!(selected.len(), ids.len());
        for (value, id) in selected.iter().zip(&ids) {
            prop_assert_eq!(&value["$oid"], &json!(id));
        }
    }
}
