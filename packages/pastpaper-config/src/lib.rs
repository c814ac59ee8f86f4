mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Catalog, Config, Drive, Proxy, Service};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.http_bind must be non-empty.".to_string(),
		});
	}
	if cfg.drive.api_base.trim().is_empty() {
		return Err(Error::Validation { message: "drive.api_base must be non-empty.".to_string() });
	}
	if !cfg.drive.api_base.starts_with("http://") && !cfg.drive.api_base.starts_with("https://") {
		return Err(Error::Validation {
			message: "drive.api_base must be an http or https URL.".to_string(),
		});
	}
	if cfg.drive.root_folder_id.trim().is_empty() {
		return Err(Error::Validation {
			message: "drive.root_folder_id must be non-empty.".to_string(),
		});
	}
	if !(1..=1_000).contains(&cfg.drive.page_size) {
		return Err(Error::Validation {
			message: "drive.page_size must be in the range 1-1000.".to_string(),
		});
	}
	if cfg.drive.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "drive.timeout_ms must be greater than zero.".to_string(),
		});
	}
	if cfg.drive.list_timeout_ms < cfg.drive.timeout_ms {
		return Err(Error::Validation {
			message: "drive.list_timeout_ms must be greater than or equal to drive.timeout_ms."
				.to_string(),
		});
	}
	if cfg.catalog.min_year > cfg.catalog.max_year {
		return Err(Error::Validation {
			message: "catalog.min_year must be less than or equal to catalog.max_year.".to_string(),
		});
	}

	for (label, value) in [
		("catalog.audio_group", &cfg.catalog.audio_group),
		("catalog.language_acquisition_group", &cfg.catalog.language_acquisition_group),
		("catalog.arts_group_marker", &cfg.catalog.arts_group_marker),
		("catalog.language_group_marker", &cfg.catalog.language_group_marker),
	] {
		if value.trim().is_empty() {
			return Err(Error::Validation { message: format!("{label} must be non-empty.") });
		}
	}

	if cfg.proxy.max_requests == 0 {
		return Err(Error::Validation {
			message: "proxy.max_requests must be greater than zero.".to_string(),
		});
	}
	if cfg.proxy.window_secs == 0 {
		return Err(Error::Validation {
			message: "proxy.window_secs must be greater than zero.".to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	if cfg.drive.access_token.as_deref().map(|token| token.trim().is_empty()).unwrap_or(false) {
		cfg.drive.access_token = None;
	}

	cfg.drive.api_base = cfg.drive.api_base.trim_end_matches('/').to_string();
}
