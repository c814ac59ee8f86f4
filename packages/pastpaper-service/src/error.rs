pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("No valid access token is available for the remote store.")]
	MissingCredential,
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("Not found: {message}")]
	NotFound { message: String },
	#[error("Remote store error: {message}")]
	Remote { message: String },
}
impl From<pastpaper_drive::Error> for Error {
	fn from(err: pastpaper_drive::Error) -> Self {
		match err {
			pastpaper_drive::Error::MissingCredential => Self::MissingCredential,
			other => Self::Remote { message: other.to_string() },
		}
	}
}

impl From<pastpaper_domain::InvalidQuery> for Error {
	fn from(err: pastpaper_domain::InvalidQuery) -> Self {
		Self::InvalidRequest { message: err.to_string() }
	}
}
