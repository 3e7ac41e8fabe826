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

use parse_datetime::parse_datetime;
use std::sync::Arc;

use super::typedef::*;
use crate::typedef::{CellValue, DATE_COLUMN};

/// Numbers win over dates, otherwise a bare "20" would be read as a time of day.
pub(super) fn parse_cell(cell: &str) -> CellValue {
	let cell = cell.trim();

	if cell.is_empty() {
		CellValue::String(String::new())
	} else if let Ok(number_value) = cell.parse::<f64>() {
		CellValue::Number(number_value)
	} else if let Ok(boolean_value) = cell.parse::<bool>() {
		CellValue::Boolean(boolean_value)
	} else if let Ok(datetime_value) = parse_datetime(cell) {
		CellValue::DateTime(datetime_value.into())
	} else {
		CellValue::String(cell.to_string())
	}
}

pub(super) fn read_frame(content: &[u8]) -> Result<DataFrame, csv::Error> {
	let mut reader = csv::ReaderBuilder::new()
		.has_headers(true)
		.trim(csv::Trim::All)
		.from_reader(content);

	let columns = reader
		.headers()?
		.iter()
		.map(|each| Arc::new(each.to_string()))
		.collect::<Vec<_>>();

	let text = reader
		.records()
		.map(|each| each.map(|row| row.iter().map(String::from).collect::<Vec<_>>()))
		.collect::<Result<Vec<_>, csv::Error>>()?;

	let rows = text
		.iter()
		.map(|row| row.iter().map(|each| parse_cell(each)).collect())
		.collect();

	Ok(DataFrame::with_text(columns, rows, text))
}

/// Labels keep the uploaded text. The parsed cells only pick the axis type.
pub(crate) fn resolve_x_axis(frame: &DataFrame) -> XAxisSource {
	let (Some(cells), Some(labels)) = (frame.column(DATE_COLUMN), frame.text_column(DATE_COLUMN))
	else {
		return XAxisSource::RowIndex {
			count: frame.height(),
		};
	};

	let filled = cells.filter(|each| !each.is_blank()).collect::<Vec<_>>();
	let temporal = !filled.is_empty()
		&& filled
			.iter()
			.all(|each| matches!(each, CellValue::DateTime(_)));

	XAxisSource::Date {
		labels: labels.map(String::from).collect(),
		temporal,
	}
}
