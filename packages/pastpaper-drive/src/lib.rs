pub mod auth;
pub mod client;
pub mod query;

mod error;
mod model;

pub use auth::{StaticToken, TokenSource};
pub use client::DriveClient;
pub use error::{Error, Result};
pub use model::{
	AUDIO_EXTENSION, AUDIO_MIME_TYPES, DriveItem, FOLDER_MIME_TYPE, FileContent, FileKind,
	FolderHandle, PDF_MIME_TYPE, RemoteFile,
};
pub use query::Query;

use std::{future::Future, pin::Pin};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// The remote object store as seen by the search core.
pub trait RemoteStore
where
	Self: Send + Sync,
{
	fn list<'a>(&'a self, query: &'a Query) -> BoxFuture<'a, Result<Vec<DriveItem>>>;

	fn file<'a>(&'a self, file_id: &'a str) -> BoxFuture<'a, Result<Option<DriveItem>>>;

	fn content<'a>(&'a self, file_id: &'a str) -> BoxFuture<'a, Result<Option<FileContent>>>;
}

impl RemoteStore for DriveClient {
	fn list<'a>(&'a self, query: &'a Query) -> BoxFuture<'a, Result<Vec<DriveItem>>> {
		Box::pin(DriveClient::list(self, query))
	}

	fn file<'a>(&'a self, file_id: &'a str) -> BoxFuture<'a, Result<Option<DriveItem>>> {
		Box::pin(DriveClient::file(self, file_id))
	}

	fn content<'a>(&'a self, file_id: &'a str) -> BoxFuture<'a, Result<Option<FileContent>>> {
		Box::pin(DriveClient::content(self, file_id))
	}
}
