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

use std::{collections::HashMap, sync::Arc};

use crate::typedef::CellValue;

/// Rows in upload order. Every row holds one cell per column, both typed and
/// as the trimmed text it was read from.
#[derive(Default, Clone, Debug)]
pub(crate) struct DataFrame {
	pub columns: Vec<Arc<String>>,
	pub column_lookup: HashMap<Arc<String>, usize>,
	pub rows: Vec<Vec<CellValue>>,
	pub text: Vec<Vec<String>>,
}

impl DataFrame {
	/// Text is rendered from the cells.
	pub fn new(columns: Vec<Arc<String>>, rows: Vec<Vec<CellValue>>) -> Self {
		let text = rows
			.iter()
			.map(|row| row.iter().map(|each| each.to_string()).collect())
			.collect();

		Self::with_text(columns, rows, text)
	}

	pub fn with_text(
		columns: Vec<Arc<String>>,
		rows: Vec<Vec<CellValue>>,
		text: Vec<Vec<String>>,
	) -> Self {
		debug_assert_eq!(rows.len(), text.len());

		let mut column_lookup = HashMap::with_capacity(columns.len());
		for (index, name) in columns.iter().enumerate() {
			// Duplicated headers resolve to the leftmost column
			column_lookup.entry(name.clone()).or_insert(index);
		}

		Self {
			columns,
			column_lookup,
			rows,
			text,
		}
	}

	pub fn height(&self) -> usize {
		self.rows.len()
	}

	pub fn column_index(&self, name: &str) -> Option<usize> {
		self.column_lookup.get(&name.to_string()).copied()
	}

	pub fn has_column(&self, name: &str) -> bool {
		self.column_index(name).is_some()
	}

	pub fn column(&self, name: &str) -> Option<impl Iterator<Item = &CellValue> + '_> {
		let index = self.column_index(name)?;
		Some(self.rows.iter().map(move |row| &row[index]))
	}

	pub fn text_column(&self, name: &str) -> Option<impl Iterator<Item = &str> + '_> {
		let index = self.column_index(name)?;
		Some(self.text.iter().map(move |row| row[index].as_str()))
	}

	/// Overwrites the column when it already exists, appends it otherwise.
	/// `values` must hold one cell per row.
	pub fn set_column(&mut self, name: &str, values: Vec<CellValue>) {
		debug_assert_eq!(values.len(), self.rows.len());

		let index = match self.column_index(name) {
			Some(found) => found,
			None => {
				let name = Arc::new(name.to_string());
				self.column_lookup.insert(name.clone(), self.columns.len());
				self.columns.push(name);
				for (row, text) in self.rows.iter_mut().zip(self.text.iter_mut()) {
					row.push(CellValue::default());
					text.push(String::new());
				}
				self.columns.len() - 1
			}
		};

		for ((row, text), value) in self.rows.iter_mut().zip(self.text.iter_mut()).zip(values) {
			text[index] = value.to_string();
			row[index] = value;
		}
	}
}

/// Where the chart's x values and the summary's labels come from.
/// Resolved once per request.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum XAxisSource {
	Date {
		/// The `Date` cells exactly as uploaded, trimmed
		labels: Vec<String>,
		/// Every non-blank cell parsed as a date/time
		temporal: bool,
	},
	RowIndex {
		count: usize,
	},
}

impl XAxisSource {
	pub fn title(&self) -> &'static str {
		match self {
			XAxisSource::Date { .. } => "Date",
			XAxisSource::RowIndex { .. } => "Row Index",
		}
	}

	pub fn axis_type(&self) -> &'static str {
		match self {
			XAxisSource::Date { temporal: true, .. } => "date",
			XAxisSource::Date { temporal: false, .. } => "category",
			XAxisSource::RowIndex { .. } => "linear",
		}
	}

	pub fn labels(&self) -> Option<&[String]> {
		match self {
			XAxisSource::Date { labels, .. } => Some(labels),
			XAxisSource::RowIndex { .. } => None,
		}
	}

	pub fn values(&self) -> Vec<CellValue> {
		match self {
			XAxisSource::Date { labels, .. } => labels
				.iter()
				.map(|label| CellValue::String(label.clone()))
				.collect(),
			XAxisSource::RowIndex { count } => (0..*count)
				.map(|index| CellValue::RowID(index as u32))
				.collect(),
		}
	}
}
