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

use strum::IntoEnumIterator;

use crate::evaluate::typedef::PredictionSummary;
use crate::typedef::{PredictionType, Theme};

const INDEX_TEMPLATE: &'static str = include_str!("../../../templates/index.html");
const RESULT_TEMPLATE: &'static str = include_str!("../../../templates/result.html");

/// Replaces every `{{name}}` in one pass. Substituted text is never rescanned,
/// unknown placeholders stay as they are.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
	let mut output = String::with_capacity(template.len());
	let mut rest = template;

	while let Some(start) = rest.find("{{") {
		output.push_str(&rest[..start]);
		let after = &rest[start + 2..];

		let Some(end) = after.find("}}") else {
			rest = &rest[start..];
			break;
		};

		let name = after[..end].trim();
		match values.iter().find(|(key, _)| *key == name) {
			Some((_, value)) => output.push_str(value),
			None => output.push_str(&rest[start..start + 2 + end + 2]),
		}

		rest = &after[end + 2..];
	}

	output.push_str(rest);
	output
}

pub(crate) fn escape_html(text: &str) -> String {
	let mut escaped = String::with_capacity(text.len());
	for each in text.chars() {
		match each {
			'&' => escaped.push_str("&amp;"),
			'<' => escaped.push_str("&lt;"),
			'>' => escaped.push_str("&gt;"),
			'"' => escaped.push_str("&quot;"),
			'\'' => escaped.push_str("&#39;"),
			_ => escaped.push(each),
		}
	}
	escaped
}

pub(crate) fn format_value(value: f64) -> String {
	format!("{:.2}", value)
}

pub(crate) fn render_index() -> String {
	let options = PredictionType::iter()
		.map(|each| {
			format!(
				"\t\t\t<option value=\"{}\">{}</option>",
				each,
				escape_html(each.theme().label)
			)
		})
		.collect::<Vec<_>>()
		.join("\n");

	fill_template(INDEX_TEMPLATE, &[("prediction_options", &options)])
}

/// `chart_html` goes in verbatim, everything else is escaped.
pub(crate) fn render_result(chart_html: &str, summary: &PredictionSummary, theme: Theme) -> String {
	fill_template(
		RESULT_TEMPLATE,
		&[
			("prediction_type", &escape_html(theme.label)),
			("line_color", &escape_html(theme.color)),
			("max_value", &format_value(summary.max)),
			("min_value", &format_value(summary.min)),
			("mean_value", &format_value(summary.mean)),
			("max_date", &escape_html(&summary.max_label)),
			("min_date", &escape_html(&summary.min_label)),
			("plot", chart_html),
		],
	)
}
