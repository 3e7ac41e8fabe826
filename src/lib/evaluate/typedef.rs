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

use axum::body::Bytes;
use serde::Serialize;

use crate::data::typedef::{DataFrame, XAxisSource};
use crate::model::typedef::{ModelStore, Predictor};
use crate::typedef::{CellValue, PredictionType, Theme};

/// A validated upload, ready for the pipeline.
pub(crate) struct PredictionRequest {
	pub content: Bytes,
	pub prediction_type: PredictionType,
}

/// The prediction type resolved to everything it drives.
pub(crate) struct Selection<'a> {
	pub prediction_type: PredictionType,
	pub theme: Theme,
	pub model: &'a dyn Predictor,
}

impl<'a> Selection<'a> {
	pub fn new(models: &'a ModelStore, prediction_type: PredictionType) -> Self {
		Self {
			prediction_type,
			theme: prediction_type.theme(),
			model: models.get(prediction_type),
		}
	}
}

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PredictionSummary {
	pub max: f64,
	pub min: f64,
	pub mean: f64,
	pub max_label: String,
	pub min_label: String,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub(crate) struct PredictionPoint {
	pub x: CellValue,
	pub y: f64,
}

/// Everything one request produced. Discarded once the response is written.
pub(crate) struct PredictionReport {
	pub prediction_type: PredictionType,
	pub theme: Theme,
	/// The upload with its `Prediction` column appended
	pub frame: DataFrame,
	pub x_axis: XAxisSource,
	pub predictions: Vec<f64>,
	pub summary: PredictionSummary,
}

#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub(crate) struct EvaluationReport {
	pub prediction_type: PredictionType,
	pub label: &'static str,
	pub color: &'static str,
	pub x_title: &'static str,
	pub points: Vec<PredictionPoint>,
	pub summary: PredictionSummary,
}

impl From<&PredictionReport> for EvaluationReport {
	fn from(report: &PredictionReport) -> Self {
		let points = report
			.x_axis
			.values()
			.into_iter()
			.zip(&report.predictions)
			.map(|(x, y)| PredictionPoint { x, y: *y })
			.collect();

		Self {
			prediction_type: report.prediction_type,
			label: report.theme.label,
			color: report.theme.color,
			x_title: report.x_axis.title(),
			points,
			summary: report.summary.clone(),
		}
	}
}
