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

use serde::{Deserialize, Serialize};
use std::{
	net::{Ipv4Addr, SocketAddr},
	path::{Path, PathBuf},
};

use crate::model::typedef::ModelPaths;

/// Looked up in the working directory at startup. Optional.
pub const CONFIG_FILE: &'static str = "solar-predict.json";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	#[error("Cannot read config file {path}: {source}")]
	Read {
		path: PathBuf,
		source: std::io::Error,
	},

	#[error("Cannot parse config file {path}: {source}")]
	Parse {
		path: PathBuf,
		source: serde_json::Error,
	},

	#[error("Unknown log level \"{0}\"")]
	LogLevel(String),
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ServerConfig {
	pub bind_address: SocketAddr,
	pub model_dir: PathBuf,
	pub efficiency_model: String,
	pub egrid_model: String,
	pub max_upload_bytes: usize,
	pub request_timeout_secs: u64,
	pub log_level: String,
}

impl Default for ServerConfig {
	fn default() -> Self {
		Self {
			bind_address: SocketAddr::from((Ipv4Addr::LOCALHOST, 5000)),
			model_dir: PathBuf::from("model"),
			efficiency_model: String::from("solar_model.json"),
			egrid_model: String::from("solar_model_egrid.json"),
			max_upload_bytes: 16 * 1024 * 1024,
			request_timeout_secs: 30,
			log_level: String::from("info"),
		}
	}
}

impl ServerConfig {
	pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
		let content = std::fs::read(path).map_err(|source| ConfigError::Read {
			path: path.to_path_buf(),
			source,
		})?;

		serde_json::from_slice(&content).map_err(|source| ConfigError::Parse {
			path: path.to_path_buf(),
			source,
		})
	}

	/// Missing file means defaults; a present but broken file is an error.
	pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
		if path.exists() {
			Self::from_file(path)
		} else {
			Ok(Self::default())
		}
	}

	pub fn model_paths(&self) -> ModelPaths {
		ModelPaths {
			efficiency: self.model_dir.join(&self.efficiency_model),
			egrid: self.model_dir.join(&self.egrid_model),
		}
	}
}

pub(crate) fn init_logging(config: &ServerConfig) -> Result<(), ConfigError> {
	let level = config
		.log_level
		.parse::<tracing::Level>()
		.map_err(|_| ConfigError::LogLevel(config.log_level.clone()))?;

	tracing_subscriber::fmt()
		.with_max_level(level)
		.with_target(false)
		.init();

	Ok(())
}
