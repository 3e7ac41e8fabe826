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
use crate::data::typedef::DataFrame;
use crate::model::typedef::FeatureRow;
use crate::typedef::{
	CellValue, RequestError, NO_DATE_LABEL, PREDICTION_COLUMN, REQUIRED_COLUMNS,
};

pub(super) fn extract_features(frame: &DataFrame) -> Result<Vec<FeatureRow>, RequestError> {
	let indices = REQUIRED_COLUMNS
		.iter()
		.map(|each| frame.column_index(each).ok_or(RequestError::MissingColumns))
		.collect::<Result<Vec<_>, _>>()?;

	frame
		.rows
		.iter()
		.enumerate()
		.map(|(row_index, row)| {
			let mut features: FeatureRow = [f64::NAN; 3];
			for (slot, column_index) in indices.iter().enumerate() {
				features[slot] = match &row[*column_index] {
					CellValue::Number(number) => *number,
					CellValue::Boolean(true) => 1.0,
					CellValue::Boolean(false) => 0.0,
					// Blank cells are missing values, the model decides where they go
					cell if cell.is_blank() => f64::NAN,
					_ => {
						return Err(RequestError::NotNumeric {
							column: REQUIRED_COLUMNS[slot],
							row: row_index + 1,
						})
					}
				};
			}

			Ok(features)
		})
		.collect()
}

/// Feeds every row to the selected model and appends the `Prediction` column.
/// Returns the predictions in row order.
pub(crate) fn infer(
	frame: &mut DataFrame,
	selection: &Selection<'_>,
) -> Result<Vec<f64>, RequestError> {
	let features = extract_features(frame)?;
	let predictions = selection.model.predict(&features);

	if predictions.len() != features.len() {
		return Err(RequestError::Internal(format!(
			"the {} model returned {} predictions for {} rows",
			selection.prediction_type,
			predictions.len(),
			features.len()
		)));
	}

	frame.set_column(
		PREDICTION_COLUMN,
		predictions
			.iter()
			.map(|each| CellValue::Number(*each))
			.collect(),
	);

	Ok(predictions)
}

/// Ties resolve to the earliest row.
pub(crate) fn summarize(
	predictions: &[f64],
	labels: Option<&[String]>,
) -> Result<PredictionSummary, RequestError> {
	if predictions.is_empty() {
		return Err(RequestError::EmptyInput);
	}

	let [high_peak, low_peak] = predictions.iter().copied().enumerate().fold(
		[Option::<(usize, f64)>::None; 2],
		|[last_max, last_min], each| {
			let last_max_y = last_max.map(|found| found.1).unwrap_or(f64::MIN);
			let last_min_y = last_min.map(|found| found.1).unwrap_or(f64::MAX);

			let max = Some(if each.1 > last_max_y {
				each
			} else {
				last_max.unwrap_or(each)
			});

			let min = Some(if each.1 < last_min_y {
				each
			} else {
				last_min.unwrap_or(each)
			});

			[max, min]
		},
	);

	// Non-empty input always yields both peaks
	let (max_index, max) = high_peak.unwrap_or_default();
	let (min_index, min) = low_peak.unwrap_or_default();
	let mean = predictions.iter().sum::<f64>() / predictions.len() as f64;

	let label_at = |index: usize| match labels.and_then(|found| found.get(index)) {
		Some(label) if !label.trim().is_empty() => label.clone(),
		_ => String::from(NO_DATE_LABEL),
	};

	Ok(PredictionSummary {
		max,
		min,
		mean,
		max_label: label_at(max_index),
		min_label: label_at(min_index),
	})
}
