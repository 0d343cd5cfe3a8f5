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

use serde_json::{json, Value};

use crate::errors::{Result, VistaError};
use crate::stage::{required_param, ParamMap, ViewStage};

/// Escape hatch: a stage defined by raw primitive operations, passed
/// through verbatim. Bypasses schema validation entirely.
#[derive(Clone, Debug)]
pub struct RawPipeline {
    pipeline: Vec<Value>,
}

impl RawPipeline {
    pub fn new(pipeline: Vec<Value>) -> Self {
        RawPipeline { pipeline }
    }

    /// The raw primitive operations.
    pub fn pipeline(&self) -> &[Value] {
        &self.pipeline
    }

    pub(crate) fn from_params(params: &ParamMap) -> Result<Self> {
        let pipeline = required_param(params, "pipeline")?
            .as_array()
            .cloned()
            .ok_or_else(|| VistaError::decode("parameter 'pipeline' must be an array"))?;
        Ok(RawPipeline::new(pipeline))
    }
}

impl ViewStage for RawPipeline {
    fn name(&self) -> &'static str {
        "raw_pipeline"
    }

    fn compile(&self) -> Vec<Value> {
        self.pipeline.clone()
    }

    fn params(&self) -> Vec<(&'static str, Value)> {
        vec![("pipeline", json!(self.pipeline))]
    }
}
