//! Walks `root / year / month / group`, memoising every level it resolves.

use pastpaper_domain::Month;
use pastpaper_drive::{FolderHandle, Query};

use crate::{PaperService, Result, cache::FolderKey};

impl PaperService {
	/// Resolves the group folder for a (year, month, group) triple. `None` when any level is absent.
	pub async fn resolve_group_folder(
		&self,
		year: u16,
		month: Month,
		group: &str,
	) -> Result<Option<FolderHandle>> {
		let key = FolderKey::Group(year, month, group.to_string());

		if let Some(handle) = self.cache.folder(&key) {
			return Ok(Some(handle));
		}

		let Some(month_folder) = self.resolve_month_folder(year, month).await? else {
			return Ok(None);
		};
		let found = self.find_child_folder(&month_folder.id, group, "group_folder").await?;

		if let Some(handle) = &found {
			self.cache.put_folder(key, handle.clone());
		} else {
			tracing::info!(year, %month, group, "Group folder not found.");
		}

		Ok(found)
	}

	/// Every group folder under (year, month), in remote order.
	pub async fn list_subject_folders(&self, year: u16, month: Month) -> Result<Vec<FolderHandle>> {
		if let Some(folders) = self.cache.group_folders(year, month) {
			return Ok(folders);
		}

		let Some(month_folder) = self.resolve_month_folder(year, month).await? else {
			return Ok(Vec::new());
		};
		let items = self.fetch(&Query::folders_in(&month_folder.id), "group_folders").await?;
		let folders: Vec<FolderHandle> =
			items.into_iter().filter(|item| item.is_folder()).map(FolderHandle::from).collect();

		for folder in &folders {
			self.cache
				.put_folder(FolderKey::Group(year, month, folder.name.clone()), folder.clone());
		}
		if !folders.is_empty() {
			self.cache.put_group_folders(year, month, folders.clone());
		}

		Ok(folders)
	}

	/// Four-digit year folders within the catalog range, newest first.
	pub async fn list_available_years(&self) -> Result<Vec<u16>> {
		if let Some(years) = self.cache.years() {
			return Ok(years);
		}

		let catalog = &self.cfg.catalog;
		let items =
			self.fetch(&Query::folders_in(&self.cfg.drive.root_folder_id), "year_folders").await?;
		let mut years = Vec::new();

		for item in items.into_iter().filter(|item| item.is_folder()) {
			let Some(year) = parse_year(&item.name) else {
				continue;
			};

			if !(catalog.min_year..=catalog.max_year).contains(&year) || years.contains(&year) {
				continue;
			}

			self.cache.put_folder(FolderKey::Year(year), FolderHandle::from(item));
			years.push(year);
		}

		years.sort_unstable_by(|a, b| b.cmp(a));

		if !years.is_empty() {
			self.cache.put_years(years.clone());
		}

		Ok(years)
	}

	/// Exam-session folders present under a year.
	pub async fn list_available_months(&self, year: u16) -> Result<Vec<Month>> {
		if let Some(months) = self.cache.months(year) {
			return Ok(months);
		}

		let Some(year_folder) = self.resolve_year_folder(year).await? else {
			return Ok(Vec::new());
		};
		let query = Query::all([
			Query::folders_in(&year_folder.id),
			Query::any(Month::ALL.map(|month| Query::name_eq(month.as_str()))),
		]);
		let mut months = Vec::new();

		for item in self.fetch(&query, "month_folders").await? {
			let Some(month) = Month::from_folder_name(&item.name) else {
				continue;
			};

			if months.contains(&month) {
				continue;
			}

			self.cache.put_folder(FolderKey::Month(year, month), FolderHandle::from(item));
			months.push(month);
		}

		months.sort_unstable();

		if !months.is_empty() {
			self.cache.put_months(year, months.clone());
		}

		Ok(months)
	}

	async fn resolve_year_folder(&self, year: u16) -> Result<Option<FolderHandle>> {
		let key = FolderKey::Year(year);

		if let Some(handle) = self.cache.folder(&key) {
			return Ok(Some(handle));
		}

		let found = self
			.find_child_folder(&self.cfg.drive.root_folder_id, &year.to_string(), "year_folder")
			.await?;

		if let Some(handle) = &found {
			self.cache.put_folder(key, handle.clone());
		}

		Ok(found)
	}

	async fn resolve_month_folder(&self, year: u16, month: Month) -> Result<Option<FolderHandle>> {
		let key = FolderKey::Month(year, month);

		if let Some(handle) = self.cache.folder(&key) {
			return Ok(Some(handle));
		}

		let Some(year_folder) = self.resolve_year_folder(year).await? else {
			return Ok(None);
		};
		let found = self.find_child_folder(&year_folder.id, month.as_str(), "month_folder").await?;

		if let Some(handle) = &found {
			self.cache.put_folder(key, handle.clone());
		}

		Ok(found)
	}

	// Folder names must match exactly; the remote equality check is not trusted to be case-sensitive.
	async fn find_child_folder(
		&self,
		parent_id: &str,
		name: &str,
		purpose: &'static str,
	) -> Result<Option<FolderHandle>> {
		let query = Query::all([Query::folders_in(parent_id), Query::name_eq(name)]);
		let items = self.fetch(&query, purpose).await?;

		Ok(items
			.into_iter()
			.find(|item| item.is_folder() && item.name == name)
			.map(FolderHandle::from))
	}
}

fn parse_year(name: &str) -> Option<u16> {
	let trimmed = name.trim();

	if trimmed.len() != 4 || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
		return None;
	}

	trimmed.parse().ok()
}

#[cfg(test)]
mod tests {
	use super::parse_year;

	#[test]
	fn only_four_digit_names_are_years() {
		assert_eq!(parse_year("2023"), Some(2023));
		assert_eq!(parse_year(" 2019 "), Some(2019));
		assert_eq!(parse_year("2023 backup"), None);
		assert_eq!(parse_year("999"), None);
	}
}
