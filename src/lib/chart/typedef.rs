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

use serde::Serialize;

use crate::evaluate::typedef::PredictionPoint;
use crate::typedef::{CellValue, Theme};

pub(crate) const GRID_COLOR: &'static str = "#e0e0e0";
pub(crate) const PLOT_BACKGROUND: &'static str = "#f9f9f9";
pub(crate) const PAPER_BACKGROUND: &'static str = "#ffffff";
pub(crate) const FRAME_DURATION_MS: u32 = 50;

/// What to draw, before it becomes a Plotly figure.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ChartSpec {
	pub points: Vec<PredictionPoint>,
	pub theme: Theme,
	pub title: String,
	pub x_title: &'static str,
	pub x_type: &'static str,
	pub y_title: &'static str,
}

#[derive(Serialize, Clone, Debug)]
pub(crate) struct Figure {
	pub data: Vec<Trace>,
	pub layout: Layout,
	pub frames: Vec<Frame>,
}

#[derive(Serialize, Clone, Debug)]
pub(crate) struct Frame {
	pub data: Vec<Trace>,
}

#[derive(Serialize, Clone, Debug)]
pub(crate) struct Trace {
	#[serde(rename = "type")]
	pub trace_type: &'static str,
	pub x: Vec<CellValue>,
	pub y: Vec<f64>,
	pub mode: &'static str,
	pub line: Line,
	pub marker: Marker,
}

#[derive(Serialize, Clone, Copy, Debug)]
pub(crate) struct Line {
	pub color: &'static str,
	pub width: u8,
}

#[derive(Serialize, Clone, Copy, Debug)]
pub(crate) struct Marker {
	pub size: u8,
}

#[derive(Serialize, Clone, Debug)]
pub(crate) struct Title {
	pub text: String,
}

#[derive(Serialize, Clone, Debug)]
pub(crate) struct Axis {
	pub title: Title,
	#[serde(rename = "type", skip_serializing_if = "Option::is_none")]
	pub axis_type: Option<&'static str>,
	pub showgrid: bool,
	pub gridcolor: &'static str,
}

#[derive(Serialize, Clone, Debug)]
pub(crate) struct Font {
	pub family: &'static str,
	pub size: u8,
	pub color: &'static str,
}

#[derive(Serialize, Clone, Copy, Debug)]
pub(crate) struct Margin {
	pub l: u16,
	pub r: u16,
	pub b: u16,
	pub t: u16,
	pub pad: u16,
}

#[derive(Serialize, Clone, Copy, Debug)]
pub(crate) struct Pad {
	pub r: u16,
	pub l: u16,
}

#[derive(Serialize, Clone, Debug)]
pub(crate) struct Button {
	pub label: &'static str,
	pub method: &'static str,
	pub args: serde_json::Value,
}

#[derive(Serialize, Clone, Debug)]
pub(crate) struct UpdateMenu {
	#[serde(rename = "type")]
	pub menu_type: &'static str,
	pub buttons: Vec<Button>,
	pub showactive: bool,
	pub x: f64,
	pub y: f64,
	pub xanchor: &'static str,
	pub yanchor: &'static str,
	pub direction: &'static str,
	pub pad: Pad,
}

#[derive(Serialize, Clone, Debug)]
pub(crate) struct Layout {
	pub title: Title,
	pub xaxis: Axis,
	pub yaxis: Axis,
	pub plot_bgcolor: &'static str,
	pub paper_bgcolor: &'static str,
	pub font: Font,
	pub margin: Margin,
	pub updatemenus: Vec<UpdateMenu>,
}
