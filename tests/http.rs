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
	body::{to_bytes, Body},
	http::{header, Request, StatusCode},
	Router,
};
use solar_predict_lib::{
	load_models, router, AppState, FeatureRow, ModelPaths, ModelStore, Predictor, ServerConfig,
};
use std::{path::PathBuf, sync::Arc, time::Duration};
use tower::ServiceExt;

const BOUNDARY: &str = "solar-predict-test-boundary";
const TWO_DAYS: &str = "Date,T_Amb,GlobHor,WindVel\n2024-01-01,20,500,3\n2024-01-02,25,700,2\n";

fn fixture(name: &str) -> PathBuf {
	PathBuf::from(env!("CARGO_MANIFEST_DIR"))
		.join("tests")
		.join("fixtures")
		.join(name)
}

fn fixture_models() -> ModelStore {
	load_models(&ModelPaths {
		efficiency: fixture("solar_model.json"),
		egrid: fixture("solar_model_egrid.json"),
	})
	.unwrap()
}

fn app() -> Router {
	router(Arc::new(AppState::new(fixture_models(), &ServerConfig::default())))
}

/// Answers long after any sensible request deadline.
struct Sluggish;

impl Predictor for Sluggish {
	fn predict(&self, rows: &[FeatureRow]) -> Vec<f64> {
		std::thread::sleep(Duration::from_millis(500));
		vec![0.0; rows.len()]
	}
}

/// `file` is `(file name, content)`.
fn form_body(file: Option<(&str, &str)>, prediction_type: Option<&str>) -> String {
	let mut body = String::new();

	if let Some((file_name, content)) = file {
		body.push_str(&format!(
			"--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: text/csv\r\n\r\n{content}\r\n"
		));
	}

	if let Some(prediction_type) = prediction_type {
		body.push_str(&format!(
			"--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"prediction_type\"\r\n\r\n{prediction_type}\r\n"
		));
	}

	body.push_str(&format!("--{BOUNDARY}--\r\n"));
	body
}

async fn post(uri: &str, file: Option<(&str, &str)>, prediction_type: Option<&str>) -> (StatusCode, String) {
	send(app(), uri, file, prediction_type).await
}

async fn send(
	app: Router,
	uri: &str,
	file: Option<(&str, &str)>,
	prediction_type: Option<&str>,
) -> (StatusCode, String) {
	let request = Request::builder()
		.method("POST")
		.uri(uri)
		.header(
			header::CONTENT_TYPE,
			format!("multipart/form-data; boundary={BOUNDARY}"),
		)
		.body(Body::from(form_body(file, prediction_type)))
		.unwrap();

	let response = app.oneshot(request).await.unwrap();
	let status = response.status();
	let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();

	(status, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn index_serves_the_form() {
	let request = Request::builder().uri("/").body(Body::empty()).unwrap();
	let response = app().oneshot(request).await.unwrap();
	assert_eq!(response.status(), StatusCode::OK);

	let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
	let html = String::from_utf8(body.to_vec()).unwrap();
	assert!(html.contains(r#"enctype="multipart/form-data""#));
	assert!(html.contains(r#"value="efficiency""#));
	assert!(html.contains(r#"value="egrid""#));
}

#[tokio::test]
async fn unknown_route_is_not_found() {
	let request = Request::builder().uri("/upload").body(Body::empty()).unwrap();
	let response = app().oneshot(request).await.unwrap();
	assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn missing_file() {
	let (status, body) = post("/predict", None, Some("efficiency")).await;
	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(body, "No file uploaded");
}

#[tokio::test]
async fn unnamed_file_counts_as_missing() {
	let (status, body) = post("/predict", Some(("", TWO_DAYS)), Some("efficiency")).await;
	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(body, "No file uploaded");
}

#[tokio::test]
async fn invalid_prediction_type() {
	for prediction_type in [None, Some("Efficiency"), Some("solar")] {
		let (status, body) = post("/predict", Some(("data.csv", TWO_DAYS)), prediction_type).await;
		assert_eq!(status, StatusCode::BAD_REQUEST);
		assert_eq!(body, "Invalid prediction type selected");
	}
}

#[tokio::test]
async fn missing_columns() {
	let (status, body) = post(
		"/predict",
		Some(("data.csv", "Date,T_Amb,WindVel\n2024-01-01,20,3\n")),
		Some("efficiency"),
	)
	.await;
	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(body, "Missing required columns: T_Amb, GlobHor, WindVel");
}

#[tokio::test]
async fn header_only_upload() {
	let (status, body) = post(
		"/predict",
		Some(("data.csv", "T_Amb,GlobHor,WindVel\n")),
		Some("efficiency"),
	)
	.await;
	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(body, "Empty input: the uploaded file has no data rows");
}

#[tokio::test]
async fn malformed_upload() {
	for content in ["", "T_Amb,GlobHor,WindVel\n20,500\n", "T_Amb,GlobHor,WindVel\n20,bright,3\n"] {
		let (status, body) = post("/predict", Some(("data.csv", content)), Some("efficiency")).await;
		assert_eq!(status, StatusCode::BAD_REQUEST, "{content:?}");
		assert!(body.starts_with("Malformed input"), "{content:?}: {body}");
	}
}

#[tokio::test]
async fn efficiency_over_two_days() {
	let (status, html) = post("/predict", Some(("data.csv", TWO_DAYS)), Some("efficiency")).await;
	assert_eq!(status, StatusCode::OK, "{html}");

	assert!(html.contains("0.35"));
	assert!(html.contains("0.25"));
	assert!(html.contains("0.30"));
	assert!(html.contains("2024-01-01"));
	assert!(html.contains("2024-01-02"));
	assert!(html.contains("Predicted Efficiency"));
	assert!(html.contains("blue"));
	assert!(html.contains("Plotly.newPlot"));

	// The initial trace plus one frame per row
	assert_eq!(html.matches(r#"{"data":["#).count(), 3);
}

#[tokio::test]
async fn rows_without_dates_are_labelled() {
	let (status, html) = post(
		"/predict",
		Some(("data.csv", "T_Amb,GlobHor,WindVel\n20,500,3\n25,700,2\n")),
		Some("efficiency"),
	)
	.await;
	assert_eq!(status, StatusCode::OK);
	assert!(html.contains("N/A (No date information)"));
	assert!(html.contains("Row Index"));
}

#[tokio::test]
async fn egrid_uses_its_own_model() {
	let (status, html) = post("/predict", Some(("data.csv", TWO_DAYS)), Some("egrid")).await;
	assert_eq!(status, StatusCode::OK);
	assert!(html.contains("250.00"));
	assert!(html.contains("150.00"));
	assert!(html.contains("200.00"));
	assert!(html.contains("E_Grid"));
	assert!(html.contains("red"));
}

#[tokio::test]
async fn json_report_is_repeatable() {
	let (status, first) = post("/api/predict", Some(("data.csv", TWO_DAYS)), Some("egrid")).await;
	assert_eq!(status, StatusCode::OK);
	let (_, second) = post("/api/predict", Some(("data.csv", TWO_DAYS)), Some("egrid")).await;
	assert_eq!(first, second);

	let report: serde_json::Value = serde_json::from_str(&first).unwrap();
	assert_eq!(report["predictionType"], "egrid");
	assert_eq!(report["color"], "red");
	assert_eq!(report["points"].as_array().unwrap().len(), 2);
	assert_eq!(report["points"][1]["x"], "2024-01-02");
	assert_eq!(report["summary"]["max"].as_f64().unwrap(), 250.0);
	assert_eq!(report["summary"]["maxLabel"], "2024-01-02");
	assert_eq!(report["summary"]["minLabel"], "2024-01-01");
}

#[tokio::test]
async fn csv_export_appends_predictions() {
	let (status, content) = post("/predict/csv", Some(("data.csv", TWO_DAYS)), Some("egrid")).await;
	assert_eq!(status, StatusCode::OK);

	let lines = content.lines().collect::<Vec<_>>();
	assert_eq!(lines[0], "Date,T_Amb,GlobHor,WindVel,Prediction");
	assert_eq!(lines[1], "2024-01-01,20,500,3,150");
	assert_eq!(lines[2], "2024-01-02,25,700,2,250");
	assert_eq!(lines.len(), 3);
}

#[tokio::test]
async fn csv_export_keeps_input_text() {
	let content = "Date,T_Amb,GlobHor,WindVel\n2024-01-01T10:00:00+05:00,20.50,5e2,3\n";
	let (status, exported) = post("/predict/csv", Some(("data.csv", content)), Some("egrid")).await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(
		exported,
		"Date,T_Amb,GlobHor,WindVel,Prediction\n2024-01-01T10:00:00+05:00,20.50,5e2,3,150\n"
	);
}

#[tokio::test]
async fn summary_labels_are_the_uploaded_dates() {
	let content = "Date,T_Amb,GlobHor,WindVel\ntoday,20,500,3\n08:00,25,700,2\n";
	let (status, first) = post("/api/predict", Some(("data.csv", content)), Some("egrid")).await;
	assert_eq!(status, StatusCode::OK);

	let report: serde_json::Value = serde_json::from_str(&first).unwrap();
	assert_eq!(report["summary"]["maxLabel"], "08:00");
	assert_eq!(report["summary"]["minLabel"], "today");
	assert_eq!(report["points"][0]["x"], "today");

	let (_, second) = post("/api/predict", Some(("data.csv", content)), Some("egrid")).await;
	assert_eq!(first, second);
}

#[tokio::test]
async fn oversized_upload_is_rejected() {
	let config = ServerConfig {
		max_upload_bytes: 64,
		..ServerConfig::default()
	};
	let app = router(Arc::new(AppState::new(fixture_models(), &config)));

	let (status, _) = send(app, "/predict", Some(("data.csv", TWO_DAYS)), Some("efficiency")).await;
	assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn slow_prediction_times_out() {
	let sluggish: Arc<dyn Predictor> = Arc::new(Sluggish);
	let state = AppState {
		models: ModelStore::new(sluggish.clone(), sluggish),
		max_upload_bytes: ServerConfig::default().max_upload_bytes,
		request_timeout: Duration::from_millis(20),
	};

	let (status, body) = send(
		router(Arc::new(state)),
		"/predict",
		Some(("data.csv", TWO_DAYS)),
		Some("efficiency"),
	)
	.await;
	assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
	assert_eq!(body, "Request timed out");
}
