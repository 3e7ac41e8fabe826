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

use std::{path::Path, str::FromStr, sync::Arc};
use tracing::info;

use super::helper::*;
use super::typedef::*;

/// Loads both models. Any failure here must stop the process from serving.
pub fn load_models(paths: &ModelPaths) -> Result<ModelStore, ModelError> {
	let efficiency = load_model(&paths.efficiency)?;
	let egrid = load_model(&paths.egrid)?;

	Ok(ModelStore::new(Arc::new(efficiency), Arc::new(egrid)))
}

pub(crate) fn load_model(path: &Path) -> Result<BoostedModel, ModelError> {
	let unsupported = |message: String| ModelError::Unsupported {
		path: path.to_path_buf(),
		message,
	};
	let malformed = |message: String| ModelError::Malformed {
		path: path.to_path_buf(),
		message,
	};

	let content = std::fs::read(path).map_err(|source| ModelError::Read {
		path: path.to_path_buf(),
		source,
	})?;

	let raw: RawModelFile = serde_json::from_slice(&content).map_err(|source| ModelError::Parse {
		path: path.to_path_buf(),
		source,
	})?;
	let learner = raw.learner;
	let param = &learner.learner_model_param;

	let objective = Objective::from_str(&learner.objective.name)
		.map_err(|_| unsupported(format!("objective \"{}\"", learner.objective.name)))?;

	if parse_count(param.num_class.as_ref()).map_err(malformed)? > 1 {
		return Err(unsupported(String::from("multi-class output")));
	}
	if parse_count(param.num_target.as_ref()).map_err(malformed)? > 1 {
		return Err(unsupported(String::from("multi-target output")));
	}

	let num_feature = parse_count(Some(&param.num_feature)).map_err(malformed)?;
	let feature_map = map_features(&learner.feature_names, num_feature).map_err(unsupported)?;

	let base_score = parse_base_score(&param.base_score)
		.ok_or_else(|| malformed(format!("base score \"{}\"", param.base_score)))?;
	let base_margin = objective.base_margin(base_score);
	if !base_margin.is_finite() {
		return Err(malformed(format!(
			"base score {} is outside the objective's range",
			base_score
		)));
	}

	let booster = match learner.gradient_booster {
		RawBooster::GbTree { model } => Booster::Trees {
			trees: build_trees(model, num_feature).map_err(malformed)?,
			weights: None,
		},
		RawBooster::Dart {
			gbtree,
			weight_drop,
		} => {
			let trees = build_trees(gbtree.model, num_feature).map_err(malformed)?;
			if weight_drop.len() != trees.len() {
				return Err(malformed(format!(
					"{} tree weights for {} trees",
					weight_drop.len(),
					trees.len()
				)));
			}

			Booster::Trees {
				trees,
				weights: Some(weight_drop),
			}
		}
		RawBooster::GbLinear { model } => {
			let mut weights = model.weights;
			if weights.len() != num_feature + 1 {
				return Err(malformed(format!(
					"{} linear weights for {} features",
					weights.len(),
					num_feature
				)));
			}

			let bias = weights.pop().unwrap_or_default();
			Booster::Linear { weights, bias }
		}
	};

	let model = BoostedModel {
		booster,
		objective,
		base_margin,
		feature_map,
	};

	info!(
		"loaded {} ({:?}, {})",
		path.display(),
		model.objective,
		match &model.booster {
			Booster::Trees { trees, .. } => format!("{} trees", trees.len()),
			Booster::Linear { .. } => String::from("linear"),
		}
	);

	Ok(model)
}

fn build_trees(model: RawTreeModel, num_feature: usize) -> Result<Vec<Tree>, String> {
	model
		.trees
		.into_iter()
		.enumerate()
		.map(|(index, raw)| {
			build_tree(raw, num_feature).map_err(|message| format!("tree {}: {}", index, message))
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::path::PathBuf;

	fn fixture(name: &str) -> PathBuf {
		Path::new(env!("CARGO_MANIFEST_DIR"))
			.join("tests")
			.join("fixtures")
			.join(name)
	}

	#[test]
	fn loads_tree_fixture() {
		let model = load_model(&fixture("solar_model.json")).unwrap();
		assert_eq!(model.objective, Objective::Identity);

		let predictions = model.predict(&[[20.0, 500.0, 3.0], [25.0, 700.0, 2.0]]);
		assert!((predictions[0] - 0.25).abs() < 1e-6);
		assert!((predictions[1] - 0.35).abs() < 1e-6);
	}

	#[test]
	fn reorders_named_features() {
		let model = load_model(&fixture("solar_model_egrid.json")).unwrap();
		assert_eq!(model.feature_map, vec![1, 2, 0]);

		let predictions = model.predict(&[[20.0, 500.0, 3.0], [25.0, 700.0, 2.0], [25.0, 700.0, 3.0]]);
		assert_eq!(predictions, vec![150.0, 250.0, 220.0]);
	}

	#[test]
	fn missing_file_is_a_read_error() {
		let result = load_model(&fixture("no_such_model.json"));
		assert!(matches!(result, Err(ModelError::Read { .. })));
	}

	#[test]
	fn rejects_unknown_objective() {
		let path = std::env::temp_dir().join("solar_predict_ranking_model.json");
		let content = std::fs::read_to_string(fixture("solar_model.json"))
			.unwrap()
			.replace("reg:squarederror", "rank:pairwise");
		std::fs::write(&path, content).unwrap();

		let result = load_model(&path);
		assert!(matches!(result, Err(ModelError::Unsupported { .. })));

		let _ = std::fs::remove_file(&path);
	}

	#[test]
	fn both_models_are_required() {
		let paths = ModelPaths {
			efficiency: fixture("solar_model.json"),
			egrid: fixture("no_such_model.json"),
		};
		assert!(load_models(&paths).is_err());
	}
}
