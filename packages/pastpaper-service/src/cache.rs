//! Process-lifetime memo of folder handles and picker listings.
//!
//! Entries are never invalidated. Only non-empty resolutions are stored, so a folder that was
//! missing, or a listing that degraded to nothing, is looked up again on the next request.

use std::{
	collections::HashMap,
	hash::Hash,
	sync::{RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use pastpaper_domain::Month;
use pastpaper_drive::FolderHandle;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FolderKey {
	Year(u16),
	Month(u16, Month),
	Group(u16, Month, String),
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct SubjectsKey {
	pub(crate) year: u16,
	pub(crate) month: Month,
	pub(crate) group: String,
}

#[derive(Default)]
pub struct MetadataCache {
	folders: RwLock<HashMap<FolderKey, FolderHandle>>,
	group_folders: RwLock<HashMap<(u16, Month), Vec<FolderHandle>>>,
	years: RwLock<Option<Vec<u16>>>,
	months: RwLock<HashMap<u16, Vec<Month>>>,
	subjects: RwLock<HashMap<SubjectsKey, Vec<String>>>,
}
impl MetadataCache {
	pub fn folder(&self, key: &FolderKey) -> Option<FolderHandle> {
		read(&self.folders).get(key).cloned()
	}

	pub fn put_folder(&self, key: FolderKey, handle: FolderHandle) {
		write(&self.folders).insert(key, handle);
	}

	pub(crate) fn group_folders(&self, year: u16, month: Month) -> Option<Vec<FolderHandle>> {
		lookup(&self.group_folders, &(year, month))
	}

	pub(crate) fn put_group_folders(&self, year: u16, month: Month, folders: Vec<FolderHandle>) {
		write(&self.group_folders).insert((year, month), folders);
	}

	pub(crate) fn years(&self) -> Option<Vec<u16>> {
		read(&self.years).clone()
	}

	pub(crate) fn put_years(&self, years: Vec<u16>) {
		*write(&self.years) = Some(years);
	}

	pub(crate) fn months(&self, year: u16) -> Option<Vec<Month>> {
		lookup(&self.months, &year)
	}

	pub(crate) fn put_months(&self, year: u16, months: Vec<Month>) {
		write(&self.months).insert(year, months);
	}

	pub(crate) fn subjects(&self, key: &SubjectsKey) -> Option<Vec<String>> {
		lookup(&self.subjects, key)
	}

	pub(crate) fn put_subjects(&self, key: SubjectsKey, subjects: Vec<String>) {
		write(&self.subjects).insert(key, subjects);
	}
}

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
	lock.read().unwrap_or_else(|err| err.into_inner())
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
	lock.write().unwrap_or_else(|err| err.into_inner())
}

fn lookup<K, V>(lock: &RwLock<HashMap<K, V>>, key: &K) -> Option<V>
where
	K: Eq + Hash,
	V: Clone,
{
	read(lock).get(key).cloned()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn folder_keys_are_distinct_per_level() {
		let cache = MetadataCache::default();
		let handle = FolderHandle { id: "y".to_string(), name: "2023".to_string() };

		cache.put_folder(FolderKey::Year(2023), handle.clone());

		assert_eq!(cache.folder(&FolderKey::Year(2023)), Some(handle));
		assert_eq!(cache.folder(&FolderKey::Month(2023, Month::May)), None);
	}
}
