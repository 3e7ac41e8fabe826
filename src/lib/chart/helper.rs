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

use serde_json::json;

use super::typedef::*;
use crate::data::typedef::XAxisSource;
use crate::evaluate::typedef::PredictionPoint;
use crate::typedef::Theme;

pub(crate) const CHART_ID: &'static str = "prediction-chart";
const PLOTLY_SCRIPT: &'static str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

pub(crate) fn build_chart(x_axis: &XAxisSource, y_values: &[f64], theme: Theme) -> ChartSpec {
	let points = x_axis
		.values()
		.into_iter()
		.zip(y_values)
		.map(|(x, y)| PredictionPoint { x, y: *y })
		.collect();

	ChartSpec {
		points,
		theme,
		title: format!("Predicted {} Over Time", theme.label),
		x_title: x_axis.title(),
		x_type: x_axis.axis_type(),
		y_title: theme.label,
	}
}

impl ChartSpec {
	/// The line drawn through the first `count` points.
	pub fn trace(&self, count: usize) -> Trace {
		let shown = &self.points[..count.min(self.points.len())];

		Trace {
			trace_type: "scatter",
			x: shown.iter().map(|each| each.x.clone()).collect(),
			y: shown.iter().map(|each| each.y).collect(),
			mode: "lines+markers",
			line: Line {
				color: self.theme.color,
				width: 2,
			},
			marker: Marker { size: 5 },
		}
	}

	/// Frame `i` (from 1) reveals the first `i` points. The initial state equals frame 1.
	pub fn figure(&self) -> Figure {
		let frames = (1..=self.points.len())
			.map(|count| Frame {
				data: vec![self.trace(count)],
			})
			.collect();

		Figure {
			data: vec![self.trace(1)],
			layout: self.layout(),
			frames,
		}
	}

	fn layout(&self) -> Layout {
		Layout {
			title: Title {
				text: self.title.clone(),
			},
			xaxis: Axis {
				title: Title {
					text: self.x_title.to_string(),
				},
				axis_type: Some(self.x_type),
				showgrid: true,
				gridcolor: GRID_COLOR,
			},
			yaxis: Axis {
				title: Title {
					text: self.y_title.to_string(),
				},
				axis_type: None,
				showgrid: true,
				gridcolor: GRID_COLOR,
			},
			plot_bgcolor: PLOT_BACKGROUND,
			paper_bgcolor: PAPER_BACKGROUND,
			font: Font {
				family: "Arial, sans-serif",
				size: 12,
				color: "#333",
			},
			margin: Margin {
				l: 50,
				r: 50,
				b: 100,
				t: 50,
				pad: 4,
			},
			updatemenus: vec![UpdateMenu {
				menu_type: "buttons",
				buttons: vec![
					Button {
						label: "Play",
						method: "animate",
						args: json!([null, {
							"frame": { "duration": FRAME_DURATION_MS, "redraw": true },
							"mode": "immediate",
							"fromcurrent": true,
						}]),
					},
					Button {
						label: "Pause",
						method: "animate",
						args: json!([[null], {
							"frame": { "duration": 0, "redraw": false },
							"mode": "immediate",
						}]),
					},
				],
				showactive: false,
				x: 0.5,
				y: -0.5,
				xanchor: "center",
				yanchor: "top",
				direction: "left",
				pad: Pad { r: 10, l: 10 },
			}],
		}
	}
}

/// JSON that is safe to inline in a `<script>` block.
fn script_json(figure: &Figure) -> Result<String, serde_json::Error> {
	Ok(serde_json::to_string(figure)?
		.replace('<', "\\u003c")
		.replace('>', "\\u003e")
		.replace('&', "\\u0026"))
}

/// Embeddable markup: the Plotly bundle, a container, and the script that animates it.
pub(crate) fn render_fragment(chart: &ChartSpec) -> Result<String, serde_json::Error> {
	let figure = script_json(&chart.figure())?;

	Ok(format!(
		r#"<div>
<script src="{script}" charset="utf-8"></script>
<div id="{id}" class="plotly-graph-div" style="height:100%; width:100%;"></div>
<script type="text/javascript">
	(function () {{
		var figure = {figure};
		Plotly.newPlot("{id}", figure.data, figure.layout, {{ "responsive": true }}).then(function () {{
			Plotly.addFrames("{id}", figure.frames);
		}});
	}})();
</script>
</div>"#,
		script = PLOTLY_SCRIPT,
		id = CHART_ID,
		figure = figure,
	))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::typedef::{CellValue, PredictionType};
	use proptest::prelude::*;

	fn dated(labels: &[&str]) -> XAxisSource {
		XAxisSource::Date {
			labels: labels.iter().map(|each| each.to_string()).collect(),
			temporal: true,
		}
	}

	#[test]
	fn two_points_make_two_frames() {
		let chart = build_chart(
			&dated(&["2024-01-01", "2024-01-02"]),
			&[0.25, 0.35],
			PredictionType::Efficiency.theme(),
		);
		let figure = chart.figure();

		assert_eq!(figure.frames.len(), 2);
		assert_eq!(figure.data[0].y, vec![0.25]);
		assert_eq!(figure.frames[1].data[0].y, vec![0.25, 0.35]);
		assert_eq!(
			figure.frames[1].data[0].x,
			vec![
				CellValue::String(String::from("2024-01-01")),
				CellValue::String(String::from("2024-01-02"))
			]
		);
		assert_eq!(figure.data[0].line.color, "blue");
		assert_eq!(figure.layout.title.text, "Predicted Efficiency Over Time");
		assert_eq!(figure.layout.xaxis.title.text, "Date");
		assert_eq!(figure.layout.yaxis.title.text, "Efficiency");
	}

	#[test]
	fn row_index_axis() {
		let chart = build_chart(
			&XAxisSource::RowIndex { count: 3 },
			&[150.0, 250.0, 220.0],
			PredictionType::Egrid.theme(),
		);

		assert_eq!(chart.x_title, "Row Index");
		assert_eq!(chart.x_type, "linear");
		assert_eq!(chart.points[2].x, CellValue::RowID(2));
		assert_eq!(chart.figure().data[0].line.color, "red");
	}

	#[test]
	fn empty_input_degenerates_quietly() {
		let chart = build_chart(
			&XAxisSource::RowIndex { count: 0 },
			&[],
			PredictionType::Efficiency.theme(),
		);
		let figure = chart.figure();

		assert!(figure.frames.is_empty());
		assert!(figure.data[0].x.is_empty());
		assert!(render_fragment(&chart).is_ok());
	}

	#[test]
	fn figure_serializes_for_plotly() {
		let chart = build_chart(&dated(&["2024-01-01"]), &[1.5], PredictionType::Efficiency.theme());
		let value = serde_json::to_value(chart.figure()).unwrap();

		assert_eq!(value["data"][0]["type"], "scatter");
		assert_eq!(value["data"][0]["mode"], "lines+markers");
		assert_eq!(value["layout"]["xaxis"]["type"], "date");
		assert!(value["layout"]["yaxis"].get("type").is_none());
		assert_eq!(value["layout"]["plot_bgcolor"], PLOT_BACKGROUND);

		let play = &value["layout"]["updatemenus"][0]["buttons"][0];
		assert_eq!(play["label"], "Play");
		assert_eq!(play["args"][1]["frame"]["duration"], 50);
		assert_eq!(play["args"][1]["frame"]["redraw"], true);

		let pause = &value["layout"]["updatemenus"][0]["buttons"][1];
		assert_eq!(pause["args"][0][0], serde_json::Value::Null);
		assert_eq!(pause["args"][1]["frame"]["duration"], 0);
	}

	#[test]
	fn fragment_cannot_close_its_script() {
		let chart = build_chart(
			&dated(&["</script><script>alert(1)</script>"]),
			&[1.0],
			PredictionType::Efficiency.theme(),
		);
		let html = render_fragment(&chart).unwrap();

		assert_eq!(html.matches("</script>").count(), 2);
		assert!(html.contains("\\u003c/script\\u003e"));
		assert!(html.contains(r#"<div id="prediction-chart""#));
		assert!(html.contains("Plotly.addFrames"));
	}

	proptest! {
		#[test]
		fn frame_i_reveals_i_points(y_values in prop::collection::vec(-1e3_f64..1e3, 0..40)) {
			let chart = build_chart(
				&XAxisSource::RowIndex { count: y_values.len() },
				&y_values,
				PredictionType::Egrid.theme(),
			);
			let figure = chart.figure();

			prop_assert_eq!(figure.frames.len(), y_values.len());
			for (index, frame) in figure.frames.iter().enumerate() {
				prop_assert_eq!(&frame.data[0].y[..], &y_values[..index + 1]);
				prop_assert_eq!(frame.data[0].x.len(), index + 1);
			}
		}
	}
}
