use std::time::Duration;

use pastpaper_drive::{DriveItem, Query};

use crate::{Error, PaperService, Result};

impl PaperService {
	/// Runs one paginated listing. A missing credential is fatal; any other failure or an
	/// exhausted time budget is logged and contributes no results.
	pub(crate) async fn fetch(&self, query: &Query, purpose: &'static str) -> Result<Vec<DriveItem>> {
		let budget = Duration::from_millis(self.cfg.drive.list_timeout_ms);

		match tokio::time::timeout(budget, self.store.list(query)).await {
			Ok(Ok(items)) => {
				tracing::debug!(purpose, count = items.len(), "Remote listing completed.");

				Ok(items)
			},
			Ok(Err(err)) if err.is_missing_credential() => Err(Error::MissingCredential),
			Ok(Err(err)) => {
				tracing::warn!(
					error = %err,
					purpose,
					query = %query.render(),
					"Remote listing failed. Continuing without its results."
				);

				Ok(Vec::new())
			},
			Err(_) => {
				tracing::warn!(
					purpose,
					budget_ms = self.cfg.drive.list_timeout_ms,
					query = %query.render(),
					"Remote listing timed out. Continuing without its results."
				);

				Ok(Vec::new())
			},
		}
	}
}
