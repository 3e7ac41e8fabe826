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

use tracing::debug;

use super::helper::*;
use super::typedef::*;
use crate::data::command::{load_frame, resolve_x_axis};
use crate::model::typedef::ModelStore;
use crate::typedef::RequestError;

/// Upload to report: parse, infer, summarize. CPU-bound, run it off the async workers.
pub(crate) fn run_prediction(
	models: &ModelStore,
	request: PredictionRequest,
) -> Result<PredictionReport, RequestError> {
	let mut frame = load_frame(&request.content)?;
	let selection = Selection::new(models, request.prediction_type);

	let predictions = infer(&mut frame, &selection)?;
	let x_axis = resolve_x_axis(&frame);
	let summary = summarize(&predictions, x_axis.labels())?;

	debug!(
		"{} rows predicted as {}, x axis by {}",
		predictions.len(),
		selection.theme.label,
		x_axis.title()
	);

	Ok(PredictionReport {
		prediction_type: selection.prediction_type,
		theme: selection.theme,
		frame,
		x_axis,
		predictions,
		summary,
	})
}
