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

pub(super) const FILE_FIELD: &'static str = "file";
pub(super) const PREDICTION_TYPE_FIELD: &'static str = "prediction_type";
pub(super) const CSV_DISPOSITION: &'static str = "attachment; filename=\"predictions.csv\"";

pub(super) struct UploadedFile {
	pub file_name: String,
	pub content: Bytes,
}

/// The form as submitted, nothing checked yet.
#[derive(Default)]
pub(super) struct UploadForm {
	pub file: Option<UploadedFile>,
	pub prediction_type: Option<String>,
}
