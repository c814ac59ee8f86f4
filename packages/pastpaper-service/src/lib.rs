//! Search orchestration over the remote folder hierarchy.

pub mod cache;
pub mod files;
pub mod navigator;
pub mod options;
pub mod search;

mod error;
mod remote;

pub use cache::{FolderKey, MetadataCache};
pub use error::{Error, Result};
pub use options::{AvailableOptions, OptionsRequest};
pub use search::{AudioStrategy, SearchResponse};

use std::sync::Arc;

use pastpaper_config::Config;
use pastpaper_drive::{DriveClient, RemoteStore};

pub struct PaperService {
	pub cfg: Config,
	pub store: Arc<dyn RemoteStore>,
	pub cache: MetadataCache,
}
impl PaperService {
	/// Connects to the remote store described by `cfg.drive`.
	pub fn new(cfg: Config) -> Result<Self> {
		let client = DriveClient::new(&cfg.drive)?;

		Ok(Self::with_store(cfg, Arc::new(client)))
	}

	pub fn with_store(cfg: Config, store: Arc<dyn RemoteStore>) -> Self {
		Self { cfg, store, cache: MetadataCache::default() }
	}
}
