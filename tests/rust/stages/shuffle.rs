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

//! # Vista Stage Tests - Shuffle
//!
//! Tests for the randomized ordering stages. Reproducibility is the
//! contract under test: two freshly constructed stages with the same seed
//! must compile identical operations and therefore order identical record
//! sets identically.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test shuffle
//! ```

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::{json, Value};
use vista::{Shuffle, Take, ViewStage};

// Replays a compiled shuffle over synthetic records the way the execution
// engine would: key = multiplier mod record_rand, ascending.
fn replay_order(ops: &[Value], key: &str, rand_values: &[f64]) -> Vec<usize> {
    let multiplier = ops[0]["$set"][key]["$mod"][0].as_i64().unwrap() as f64;
    let mut indexed: Vec<(usize, f64)> = rand_values
        .iter()
        .map(|value| multiplier % value)
        .enumerate()
        .collect();
    indexed.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap());
    indexed.into_iter().map(|(index, _)| index).collect()
}

const RAND_VALUES: [f64; 8] = [0.11, 0.42, 0.73, 0.05, 0.98, 0.27, 0.64, 0.39];

#[test]
fn same_seed_instances_compile_identically() {
    let first = Shuffle::new(Some(42)).compile();
    let second = Shuffle::new(Some(42)).compile();
    assert_eq!(first, second);
}

#[test]
fn same_seed_instances_order_records_identically() {
    let first = replay_order(&Shuffle::new(Some(42)).compile(), "_rand_shuffle", &RAND_VALUES);
    let second = replay_order(&Shuffle::new(Some(42)).compile(), "_rand_shuffle", &RAND_VALUES);
    assert_eq!(first, second);
}

#[test]
fn different_seeds_compile_differently() {
    let first = Shuffle::new(Some(42)).compile();
    let second = Shuffle::new(Some(43)).compile();
    assert_ne!(first, second);
}

#[test]
fn unseeded_instances_compile_differently() {
    let first = Shuffle::new(None).compile();
    let second = Shuffle::new(None).compile();
    assert_ne!(first, second);
}

#[test]
fn injected_sources_make_unseeded_stages_reproducible() {
    let first = Shuffle::with_source(&mut StdRng::seed_from_u64(7)).compile();
    let second = Shuffle::with_source(&mut StdRng::seed_from_u64(7)).compile();
    assert_eq!(first, second);
}

#[test]
fn shuffle_sorts_ascending_by_a_transient_key() {
    let ops = Shuffle::new(Some(1)).compile();
    assert_eq!(ops.len(), 3);
    assert_eq!(ops[1], json!({"$sort": {"_rand_shuffle": 1}}));
    assert_eq!(ops[2], json!({"$unset": "_rand_shuffle"}));
}

#[test]
fn take_is_reproducible_under_a_seed() {
    let first = Take::new(3, Some(7)).compile();
    let second = Take::new(3, Some(7)).compile();
    assert_eq!(first, second);
    assert_eq!(first[2], json!({"$limit": 3}));
    assert_eq!(first[3], json!({"$unset": "_rand_take"}));
}

#[test]
fn take_limits_after_the_randomized_sort() {
    let ops = Take::new(3, Some(7)).compile();
    let order = replay_order(&ops, "_rand_take", &RAND_VALUES);
    // The stage selects the first 3 records of the randomized order.
    assert_eq!(order.len(), RAND_VALUES.len());
}

#[test]
fn non_positive_take_compiles_to_match_nothing() {
    for size in [0, -1] {
        let ops = Take::new(size, Some(7)).compile();
        assert_eq!(ops, vec![json!({"$match": {"_id": null}})]);
        let ops = Take::new(size, None).compile();
        assert_eq!(ops, vec![json!({"$match": {"_id": null}})]);
    }
}

#[test]
fn seeds_survive_serialization() {
    let stage = Take::new(3, Some(7));
    assert_eq!(stage.seed(), Some(7));
    assert_eq!(
        stage.params(),
        vec![("size", json!(3)), ("seed", json!(7))]
    );
}

proptest! {
    #[test]
    fn any_seed_reproduces_its_compiled_operations(seed in any::<u64>()) {
        prop_assert_eq!(
            Shuffle::new(Some(seed)).compile(),
            Shuffle::new(Some(seed)).compile()
        );
        prop_assert_eq!(
            Take::new(5, Some(seed)).compile(),
            Take::new(5, Some(seed)).compile()
        );
    }
}
