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

//! # Vista Pipeline Module
//!
//! [`ViewPipeline`] holds an ordered sequence of stages and compiles it
//! into a single flattened list of primitive operations. Compilation
//! validates each stage against the target collection in order and aborts
//! wholesale on the first failure; partial output is never returned. Stage
//! order is preserved exactly.

use std::collections::BTreeSet;

use serde_json::{json, Value};

use crate::errors::{Result, VistaError};
use crate::schema::Collection;
use crate::stage::Stage;

/// Ordered sequence of view stages.
///
/// Pipelines are stateless once built: recompiling against the same schema
/// yields the same primitive operations, up to the nondeterminism scoped to
/// unseeded randomized stages (which is fixed per stage *instance*).
#[derive(Clone, Debug, Default)]
pub struct ViewPipeline {
    stages: Vec<Stage>,
}

impl ViewPipeline {
    /// Creates an empty pipeline (the identity view).
    pub fn new() -> Self {
        ViewPipeline::default()
    }

    /// Creates a pipeline from an ordered stage sequence.
    pub fn from_stages(stages: Vec<Stage>) -> Self {
        ViewPipeline { stages }
    }

    /// Appends a stage.
    pub fn push(&mut self, stage: impl Into<Stage>) {
        self.stages.push(stage.into());
    }

    /// Builder-style [`ViewPipeline::push`].
    pub fn with_stage(mut self, stage: impl Into<Stage>) -> Self {
        self.push(stage);
        self
    }

    /// The stages, in application order.
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Validates every stage against the collection and compiles the
    /// pipeline to its flattened primitive operations.
    ///
    /// Stages are processed in order; the first validation failure aborts
    /// the whole compilation with an error naming the failing stage and
    /// its index.
    pub fn compile(&self, collection: &dyn Collection) -> Result<Vec<Value>> {
        log::debug!("compiling view pipeline with {} stages", self.stages.len());

        let mut ops = Vec::new();
        for (index, stage) in self.stages.iter().enumerate() {
            stage
                .validate(collection)
                .map_err(|err| VistaError::compilation(index, stage.name(), err))?;
            ops.extend(stage.compile());
        }

        log::debug!("compiled {} primitive operations", ops.len());
        Ok(ops)
    }

    /// Nested list field paths that any stage in the pipeline may have
    /// pruned. Downstream consumers must treat these as already filtered.
    pub fn filtered_list_fields(&self) -> BTreeSet<String> {
        self.stages
            .iter()
            .flat_map(|stage| stage.filtered_list_fields())
            .collect()
    }

    /// Serializes the pipeline as an ordered list of serialized stages.
    pub fn to_json(&self) -> Value {
        json!(self.stages.iter().map(Stage::to_json).collect::<Vec<_>>())
    }

    /// Reconstructs a pipeline from its serialized form.
    pub fn from_json(value: &Value) -> Result<ViewPipeline> {
        let items = value
            .as_array()
            .ok_or_else(|| VistaError::decode("serialized pipeline must be an array"))?;

        let stages = items
            .iter()
            .map(Stage::from_json)
            .collect::<Result<Vec<_>>>()?;

        Ok(ViewPipeline::from_stages(stages))
    }
}

impl FromIterator<Stage> for ViewPipeline {
    fn from_iter<I: IntoIterator<Item = Stage>>(iter: I) -> Self {
        ViewPipeline::from_stages(iter.into_iter().collect())
    }
}
