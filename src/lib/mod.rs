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
	extract::DefaultBodyLimit,
	routing::{get, post},
	Router,
};
use std::{path::Path, sync::Arc};
use tracing::{info, warn};

mod typedef;
pub use typedef::{AppState, PredictionType, Theme};

mod config;
pub use config::{ConfigError, ServerConfig, CONFIG_FILE};

mod chart;
mod data;
mod evaluate;
mod model;
mod render;
mod upload;

pub use model::command::load_models;
pub use model::typedef::{FeatureRow, ModelError, ModelPaths, ModelStore, Predictor};

use upload::command::*;

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
	#[error(transparent)]
	Config(#[from] ConfigError),

	#[error(transparent)]
	Model(#[from] ModelError),

	#[error("Cannot start the async runtime: {0}")]
	Runtime(std::io::Error),

	#[error("Cannot listen on {address}: {source}")]
	Bind {
		address: std::net::SocketAddr,
		source: std::io::Error,
	},

	#[error("Server stopped unexpectedly: {0}")]
	Serve(std::io::Error),
}

/// Every route of the service, sharing one immutable [`AppState`].
pub fn router(state: Arc<AppState>) -> Router {
	let body_limit = state.max_upload_bytes;

	Router::new()
		.route("/", get(index))
		.route("/predict", post(predict))
		.route("/predict/csv", post(predict_csv))
		.route("/api/predict", post(predict_json))
		.layer(DefaultBodyLimit::max(body_limit))
		.with_state(state)
}

/// Failures are returned, not logged. The binary reports them once.
pub fn run() -> Result<(), StartupError> {
	let config = ServerConfig::load_or_default(Path::new(CONFIG_FILE))?;
	config::init_logging(&config)?;

	// Nothing may be served until both models are in memory
	let models = load_models(&config.model_paths())?;

	let runtime = tokio::runtime::Builder::new_multi_thread()
		.enable_all()
		.build()
		.map_err(StartupError::Runtime)?;

	runtime.block_on(serve(config, models))
}

async fn serve(config: ServerConfig, models: ModelStore) -> Result<(), StartupError> {
	let state = Arc::new(AppState::new(models, &config));

	let listener = tokio::net::TcpListener::bind(config.bind_address)
		.await
		.map_err(|source| StartupError::Bind {
			address: config.bind_address,
			source,
		})?;

	info!("listening on http://{}", config.bind_address);

	axum::serve(listener, router(state))
		.with_graceful_shutdown(shutdown_signal())
		.await
		.map_err(StartupError::Serve)
}

async fn shutdown_signal() {
	if let Err(err) = tokio::signal::ctrl_c().await {
		warn!("cannot listen for ctrl-c: {err}");
		std::future::pending::<()>().await;
	}

	info!("shutting down");
}
