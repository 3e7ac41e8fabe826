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

use axum::{
	extract::{Multipart, State},
	http::header,
	response::{Html, IntoResponse, Json},
};
use std::sync::Arc;
use tracing::{info, warn};

use super::helper::*;
use super::typedef::*;
use crate::chart::helper::{build_chart, render_fragment};
use crate::evaluate::command::run_prediction;
use crate::evaluate::typedef::{EvaluationReport, PredictionReport};
use crate::render::helper::{render_index, render_result};
use crate::typedef::{AppState, RequestError};

/// Validates the form, then runs the pipeline and `finish` on a blocking thread
/// under the request timeout.
async fn evaluate_upload<T, F>(
	state: Arc<AppState>,
	multipart: Multipart,
	finish: F,
) -> Result<T, RequestError>
where
	T: Send + 'static,
	F: FnOnce(PredictionReport) -> Result<T, RequestError> + Send + 'static,
{
	let form = read_form(multipart).await?;
	let (file_name, request) = validate(form)?;

	info!(
		"predicting {} from \"{}\" ({} bytes)",
		request.prediction_type,
		file_name,
		request.content.len()
	);

	let timeout = state.request_timeout;
	let task = tokio::task::spawn_blocking(move || {
		run_prediction(&state.models, request).and_then(finish)
	});

	match tokio::time::timeout(timeout, task).await {
		Ok(Ok(result)) => result,
		Ok(Err(err)) => Err(RequestError::Internal(err.to_string())),
		Err(_) => Err(RequestError::Timeout),
	}
}

fn log_rejection(err: &RequestError) {
	if err.status().is_server_error() {
		warn!("prediction failed: {err}");
	} else {
		info!("upload rejected: {err}");
	}
}

pub(crate) async fn index() -> Html<String> {
	Html(render_index())
}

pub(crate) async fn predict(
	State(state): State<Arc<AppState>>,
	multipart: Multipart,
) -> Result<Html<String>, RequestError> {
	evaluate_upload(state, multipart, |report| {
		let chart = build_chart(&report.x_axis, &report.predictions, report.theme);
		let fragment =
			render_fragment(&chart).map_err(|err| RequestError::Internal(err.to_string()))?;

		Ok(Html(render_result(&fragment, &report.summary, report.theme)))
	})
	.await
	.inspect_err(log_rejection)
}

pub(crate) async fn predict_csv(
	State(state): State<Arc<AppState>>,
	multipart: Multipart,
) -> Result<impl IntoResponse, RequestError> {
	let content = evaluate_upload(state, multipart, |report| write_frame_csv(&report.frame))
		.await
		.inspect_err(log_rejection)?;

	Ok((
		[
			(header::CONTENT_TYPE, "text/csv; charset=utf-8"),
			(header::CONTENT_DISPOSITION, CSV_DISPOSITION),
		],
		content,
	))
}

pub(crate) async fn predict_json(
	State(state): State<Arc<AppState>>,
	multipart: Multipart,
) -> Result<Json<EvaluationReport>, RequestError> {
	evaluate_upload(state, multipart, |report| Ok(Json(EvaluationReport::from(&report))))
		.await
		.inspect_err(log_rejection)
}
