/*
 * Project::Helios, solar energy prediction from environmental sensor data
 * Copyright (C) 2025 Athaariq A. Ramadhani <foss@athaariq.my.id>
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see <http://www.gnu.org/licenses/>.
 */

use serde::Deserialize;
use std::{path::PathBuf, sync::Arc};
use strum_macros::EnumString;

use crate::typedef::PredictionType;

/// One input row: `T_Amb`, `GlobHor`, `WindVel`. NaN marks a missing value.
pub type FeatureRow = [f64; 3];

/// A deterministic regressor. Must return exactly one value per row, in row order.
pub trait Predictor: Send + Sync {
	fn predict(&self, rows: &[FeatureRow]) -> Vec<f64>;
}

#[derive(Clone, Debug)]
pub struct ModelPaths {
	pub efficiency: PathBuf,
	pub egrid: PathBuf,
}

#[derive(Clone)]
pub struct ModelStore {
	efficiency: Arc<dyn Predictor>,
	egrid: Arc<dyn Predictor>,
}

impl ModelStore {
	pub fn new(efficiency: Arc<dyn Predictor>, egrid: Arc<dyn Predictor>) -> Self {
		Self { efficiency, egrid }
	}

	pub fn get(&self, prediction_type: PredictionType) -> &dyn Predictor {
		match prediction_type {
			PredictionType::Efficiency => self.efficiency.as_ref(),
			PredictionType::Egrid => self.egrid.as_ref(),
		}
	}
}

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
	#[error("Cannot read model file {path}: {source}")]
	Read {
		path: PathBuf,
		source: std::io::Error,
	},

	#[error("Cannot parse model file {path}: {source}")]
	Parse {
		path: PathBuf,
		source: serde_json::Error,
	},

	#[error("Unsupported model in {path}: {message}")]
	Unsupported { path: PathBuf, message: String },

	#[error("Malformed model in {path}: {message}")]
	Malformed { path: PathBuf, message: String },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumString)]
pub(crate) enum Objective {
	#[strum(
		serialize = "reg:squarederror",
		serialize = "reg:squaredlogerror",
		serialize = "reg:pseudohubererror",
		serialize = "reg:absoluteerror",
		serialize = "reg:quantileerror"
	)]
	Identity,
	#[strum(serialize = "reg:logistic", serialize = "binary:logistic")]
	Logistic,
	#[strum(serialize = "count:poisson", serialize = "reg:gamma", serialize = "reg:tweedie")]
	Exponential,
}

/// Flat node arrays, indexed by node id. Node 0 is the root.
#[derive(Clone, Debug, Default)]
pub(crate) struct Tree {
	pub left_children: Vec<i32>,
	pub right_children: Vec<i32>,
	pub split_indices: Vec<usize>,
	/// Threshold on split nodes, output value on leaves
	pub split_conditions: Vec<f32>,
	pub default_left: Vec<bool>,
}

#[derive(Clone, Debug)]
pub(crate) enum Booster {
	Trees {
		trees: Vec<Tree>,
		/// Only DART models scale their trees
		weights: Option<Vec<f32>>,
	},
	Linear {
		weights: Vec<f32>,
		bias: f32,
	},
}

#[derive(Clone, Debug)]
pub(crate) struct BoostedModel {
	pub booster: Booster,
	pub objective: Objective,
	pub base_margin: f32,
	/// Position of each model feature inside a [`FeatureRow`]
	pub feature_map: Vec<usize>,
}

// Mirrors the subset of the XGBoost JSON model layout that prediction needs

#[derive(Deserialize)]
pub(super) struct RawModelFile {
	pub learner: RawLearner,
}

#[derive(Deserialize)]
pub(super) struct RawLearner {
	#[serde(default)]
	pub feature_names: Vec<String>,
	pub gradient_booster: RawBooster,
	pub learner_model_param: RawLearnerParam,
	pub objective: RawObjective,
}

#[derive(Deserialize)]
#[serde(tag = "name")]
pub(super) enum RawBooster {
	#[serde(rename = "gbtree")]
	GbTree { model: RawTreeModel },
	#[serde(rename = "dart")]
	Dart {
		gbtree: RawGbTree,
		weight_drop: Vec<f32>,
	},
	#[serde(rename = "gblinear")]
	GbLinear { model: RawLinearModel },
}

#[derive(Deserialize)]
pub(super) struct RawGbTree {
	pub model: RawTreeModel,
}

#[derive(Deserialize)]
pub(super) struct RawTreeModel {
	pub trees: Vec<RawTree>,
}

#[derive(Deserialize)]
pub(super) struct RawTree {
	pub left_children: Vec<i32>,
	pub right_children: Vec<i32>,
	pub split_indices: Vec<i64>,
	pub split_conditions: Vec<f32>,
	pub default_left: Vec<RawFlag>,
	#[serde(default)]
	pub split_type: Vec<u8>,
	pub tree_param: RawTreeParam,
}

#[derive(Deserialize)]
pub(super) struct RawTreeParam {
	pub num_nodes: String,
}

/// Older writers emit booleans, newer ones emit 0/1
#[derive(Deserialize, Clone, Copy)]
#[serde(untagged)]
pub(super) enum RawFlag {
	Bool(bool),
	Int(u8),
}

impl RawFlag {
	pub fn is_set(self) -> bool {
		match self {
			RawFlag::Bool(flag) => flag,
			RawFlag::Int(flag) => flag != 0,
		}
	}
}

#[derive(Deserialize)]
pub(super) struct RawLinearModel {
	pub weights: Vec<f32>,
}

#[derive(Deserialize)]
pub(super) struct RawLearnerParam {
	pub base_score: String,
	pub num_feature: String,
	#[serde(default)]
	pub num_class: Option<String>,
	#[serde(default)]
	pub num_target: Option<String>,
}

#[derive(Deserialize)]
pub(super) struct RawObjective {
	pub name: String,
}
