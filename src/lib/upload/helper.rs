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

use axum::extract::{multipart::MultipartError, Multipart};
use std::str::FromStr;
use tracing::debug;

use super::typedef::*;
use crate::data::typedef::DataFrame;
use crate::evaluate::typedef::PredictionRequest;
use crate::typedef::{PredictionType, RequestError};

const ERROR_CSV_WRITE: &'static str = "cannot write the predictions as CSV";

fn multipart_error(err: MultipartError) -> RequestError {
	RequestError::Multipart {
		status: err.status(),
		message: err.body_text(),
	}
}

/// Collects the two fields the form knows about. Anything else is drained and ignored.
pub(super) async fn read_form(mut multipart: Multipart) -> Result<UploadForm, RequestError> {
	let mut form = UploadForm::default();

	while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
		let name = field.name().map(str::to_string);

		match name.as_deref() {
			Some(FILE_FIELD) => {
				let file_name = field.file_name().unwrap_or_default().to_string();
				let content = field.bytes().await.map_err(multipart_error)?;

				// Browsers send an unnamed, empty part when nothing was picked
				if !file_name.is_empty() {
					form.file = Some(UploadedFile { file_name, content });
				}
			}
			Some(PREDICTION_TYPE_FIELD) => {
				form.prediction_type = Some(field.text().await.map_err(multipart_error)?);
			}
			other => {
				debug!("ignoring form field {:?}", other);
			}
		}
	}

	Ok(form)
}

/// File first, then prediction type. The content itself is checked by the pipeline.
pub(super) fn validate(form: UploadForm) -> Result<(String, PredictionRequest), RequestError> {
	let file = form.file.ok_or(RequestError::NoFile)?;

	let prediction_type = form
		.prediction_type
		.as_deref()
		.and_then(|found| PredictionType::from_str(found).ok())
		.ok_or(RequestError::InvalidPredictionType)?;

	Ok((
		file.file_name,
		PredictionRequest {
			content: file.content,
			prediction_type,
		},
	))
}

/// The frame as CSV, header first, rows in upload order. Cells are written as
/// they were uploaded.
pub(super) fn write_frame_csv(frame: &DataFrame) -> Result<Vec<u8>, RequestError> {
	let to_internal = |err: csv::Error| RequestError::Internal(format!("{ERROR_CSV_WRITE}: {err}"));

	let mut writer = csv::Writer::from_writer(Vec::new());
	writer
		.write_record(frame.columns.iter().map(|each| each.as_str()))
		.map_err(to_internal)?;

	for row in &frame.text {
		writer.write_record(row).map_err(to_internal)?;
	}

	writer
		.into_inner()
		.map_err(|err| RequestError::Internal(format!("{ERROR_CSV_WRITE}: {}", err.error())))
}
