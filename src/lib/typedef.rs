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
	http::StatusCode,
	response::{IntoResponse, Response},
};
use chrono::{DateTime, Local, Timelike};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use strum_macros::{Display, EnumIter, EnumString};

use crate::config::ServerConfig;
use crate::model::typedef::ModelStore;

/// Model input columns, in the order every [`crate::FeatureRow`] is laid out.
pub(crate) const REQUIRED_COLUMNS: [&'static str; 3] = ["T_Amb", "GlobHor", "WindVel"];
pub(crate) const DATE_COLUMN: &'static str = "Date";
pub(crate) const PREDICTION_COLUMN: &'static str = "Prediction";
pub(crate) const NO_DATE_LABEL: &'static str = "N/A (No date information)";

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub(crate) enum CellValue {
	String(String),
	Number(f64),
	RowID(u32),
	DateTime(DateTime<Local>),
	Boolean(bool),
}

impl Default for CellValue {
	fn default() -> Self {
		CellValue::String(String::new())
	}
}

impl CellValue {
	pub fn is_blank(&self) -> bool {
		match self {
			CellValue::String(text) => text.trim().is_empty(),
			_ => false,
		}
	}
}

impl std::fmt::Display for CellValue {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			CellValue::String(text) => write!(f, "{}", text),
			CellValue::Number(number) => write!(f, "{}", number),
			CellValue::RowID(id) => write!(f, "{}", id),
			CellValue::DateTime(datetime)
				if datetime.num_seconds_from_midnight() == 0 && datetime.nanosecond() == 0 =>
			{
				write!(f, "{}", datetime.format("%Y-%m-%d"))
			}
			CellValue::DateTime(datetime) => write!(f, "{}", datetime.format("%Y-%m-%d %H:%M:%S")),
			CellValue::Boolean(boolean) => write!(f, "{}", boolean),
		}
	}
}

/// The metric a request asks for. Parsing is exact: `"efficiency"` or `"egrid"`.
#[derive(
	PartialEq, Eq, Hash, EnumIter, EnumString, Display, Deserialize, Serialize, Clone, Copy, Debug,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PredictionType {
	Efficiency,
	Egrid,
}

impl PredictionType {
	pub fn theme(self) -> Theme {
		match self {
			PredictionType::Efficiency => Theme {
				label: "Efficiency",
				color: "blue",
			},
			PredictionType::Egrid => Theme {
				label: "E_Grid",
				color: "red",
			},
		}
	}
}

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Theme {
	pub label: &'static str,
	pub color: &'static str,
}

/// Process-wide state. Built once before the listener opens, never mutated.
pub struct AppState {
	pub models: ModelStore,
	pub max_upload_bytes: usize,
	pub request_timeout: Duration,
}

impl AppState {
	pub fn new(models: ModelStore, config: &ServerConfig) -> Self {
		Self {
			models,
			max_upload_bytes: config.max_upload_bytes,
			request_timeout: Duration::from_secs(config.request_timeout_secs),
		}
	}
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum RequestError {
	#[error("No file uploaded")]
	NoFile,

	#[error("Invalid prediction type selected")]
	InvalidPredictionType,

	#[error("Missing required columns: T_Amb, GlobHor, WindVel")]
	MissingColumns,

	#[error("Empty input: the uploaded file has no data rows")]
	EmptyInput,

	#[error("Malformed input: {0}")]
	Malformed(String),

	/// `row` counts data rows from 1, the header excluded
	#[error("Malformed input: column \"{column}\" row {row} is not numeric")]
	NotNumeric { column: &'static str, row: usize },

	#[error("{message}")]
	Multipart { status: StatusCode, message: String },

	#[error("Request timed out")]
	Timeout,

	#[error("Prediction failed: {0}")]
	Internal(String),
}

impl RequestError {
	pub fn status(&self) -> StatusCode {
		match self {
			RequestError::Multipart { status, .. } => *status,
			RequestError::Timeout => StatusCode::SERVICE_UNAVAILABLE,
			RequestError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
			_ => StatusCode::BAD_REQUEST,
		}
	}
}

impl IntoResponse for RequestError {
	fn into_response(self) -> Response {
		(self.status(), self.to_string()).into_response()
	}
}
