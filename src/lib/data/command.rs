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

use super::helper::*;
use super::typedef::*;
use crate::typedef::{RequestError, REQUIRED_COLUMNS};

pub(crate) use super::helper::resolve_x_axis;

const ERROR_EMPTY_FILE: &'static str = "the uploaded file is empty";

/// Parses an uploaded CSV and checks it can feed the models.
pub(crate) fn load_frame(content: &[u8]) -> Result<DataFrame, RequestError> {
	let frame = read_frame(content).map_err(|err| RequestError::Malformed(err.to_string()))?;

	if frame.columns.iter().all(|each| each.is_empty()) {
		return Err(RequestError::Malformed(String::from(ERROR_EMPTY_FILE)));
	}

	if !REQUIRED_COLUMNS.iter().all(|each| frame.has_column(each)) {
		return Err(RequestError::MissingColumns);
	}

	if frame.height() == 0 {
		return Err(RequestError::EmptyInput);
	}

	Ok(frame)
}
