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

use super::typedef::*;
use crate::typedef::REQUIRED_COLUMNS;

/// Accepts both `"5E-1"` and the bracketed `"[5E-1]"` written by newer XGBoost.
pub(super) fn parse_base_score(raw: &str) -> Option<f32> {
	raw.trim()
		.trim_start_matches('[')
		.trim_end_matches(']')
		.split(',')
		.next()?
		.trim()
		.parse::<f32>()
		.ok()
}

pub(super) fn parse_count(raw: Option<&String>) -> Result<usize, String> {
	match raw {
		Some(found) => found
			.trim()
			.parse::<usize>()
			.map_err(|_| format!("\"{}\" is not a count", found)),
		None => Ok(0),
	}
}

/// Maps every model feature to its slot in a [`FeatureRow`]. Unnamed models are
/// assumed to be trained on the required columns in their canonical order.
pub(super) fn map_features(names: &[String], num_feature: usize) -> Result<Vec<usize>, String> {
	if num_feature > REQUIRED_COLUMNS.len() {
		return Err(format!(
			"expects {} features, only {} are provided",
			num_feature,
			REQUIRED_COLUMNS.len()
		));
	}

	if names.is_empty() {
		return Ok((0..num_feature).collect());
	}

	if names.len() != num_feature {
		return Err(format!(
			"names {} features but declares {}",
			names.len(),
			num_feature
		));
	}

	names
		.iter()
		.map(|name| {
			REQUIRED_COLUMNS
				.iter()
				.position(|each| *each == name.as_str())
				.ok_or_else(|| format!("feature \"{}\" is not an input column", name))
		})
		.collect()
}

/// Rejects anything that would make traversal go out of bounds or loop.
pub(super) fn build_tree(raw: RawTree, num_feature: usize) -> Result<Tree, String> {
	let num_nodes = raw
		.tree_param
		.num_nodes
		.trim()
		.parse::<usize>()
		.map_err(|_| format!("\"{}\" is not a node count", raw.tree_param.num_nodes))?;

	if num_nodes == 0 {
		return Err(String::from("tree has no nodes"));
	}

	let lengths = [
		raw.left_children.len(),
		raw.right_children.len(),
		raw.split_indices.len(),
		raw.split_conditions.len(),
		raw.default_left.len(),
	];
	if lengths.iter().any(|each| *each != num_nodes) {
		return Err(format!("node arrays do not all hold {} nodes", num_nodes));
	}

	if raw.split_type.iter().any(|each| *each != 0) {
		return Err(String::from("categorical splits"));
	}

	let tree = Tree {
		left_children: raw.left_children,
		right_children: raw.right_children,
		split_indices: raw
			.split_indices
			.iter()
			.map(|each| usize::try_from(*each).unwrap_or(usize::MAX))
			.collect(),
		split_conditions: raw.split_conditions,
		default_left: raw.default_left.iter().map(|each| each.is_set()).collect(),
	};

	let mut visited = vec![false; num_nodes];
	let mut pending = vec![0usize];
	while let Some(node) = pending.pop() {
		if visited[node] {
			return Err(format!("node {} is reachable twice", node));
		}
		visited[node] = true;

		let left = tree.left_children[node];
		let right = tree.right_children[node];
		if left == -1 {
			continue;
		}

		if tree.split_indices[node] >= num_feature {
			return Err(format!("node {} splits on an unknown feature", node));
		}

		for child in [left, right] {
			match usize::try_from(child) {
				Ok(found) if found < num_nodes => pending.push(found),
				_ => return Err(format!("node {} points at missing node {}", node, child)),
			}
		}
	}

	Ok(tree)
}

impl Tree {
	pub fn leaf_value(&self, features: &[f32]) -> f32 {
		let mut node = 0usize;
		loop {
			let left = self.left_children[node];
			if left == -1 {
				return self.split_conditions[node];
			}

			let value = features[self.split_indices[node]];
			let go_left = if value.is_nan() {
				self.default_left[node]
			} else {
				value < self.split_conditions[node]
			};

			node = if go_left {
				left as usize
			} else {
				self.right_children[node] as usize
			};
		}
	}
}

impl Objective {
	/// Moves `base_score` from output space into margin space
	pub fn base_margin(self, base_score: f32) -> f32 {
		match self {
			Objective::Identity => base_score,
			Objective::Logistic => (base_score / (1.0 - base_score)).ln(),
			Objective::Exponential => base_score.ln(),
		}
	}

	pub fn transform(self, margin: f32) -> f32 {
		match self {
			Objective::Identity => margin,
			Objective::Logistic => 1.0 / (1.0 + (-margin).exp()),
			Objective::Exponential => margin.exp(),
		}
	}
}

impl BoostedModel {
	pub fn predict_row(&self, row: &FeatureRow) -> f64 {
		let features = self
			.feature_map
			.iter()
			.map(|slot| row[*slot] as f32)
			.collect::<Vec<_>>();

		let margin = match &self.booster {
			Booster::Trees { trees, weights } => {
				trees
					.iter()
					.enumerate()
					.fold(self.base_margin, |sum, (index, tree)| {
						let weight = weights
							.as_ref()
							.and_then(|found| found.get(index).copied())
							.unwrap_or(1.0);
						sum + tree.leaf_value(&features) * weight
					})
			}
			Booster::Linear { weights, bias } => features
				.iter()
				.zip(weights)
				.filter(|(value, _)| !value.is_nan())
				.fold(self.base_margin + bias, |sum, (value, weight)| {
					sum + value * weight
				}),
		};

		self.objective.transform(margin) as f64
	}
}

impl Predictor for BoostedModel {
	fn predict(&self, rows: &[FeatureRow]) -> Vec<f64> {
		rows.iter().map(|row| self.predict_row(row)).collect()
	}
}
