pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Reqwest(#[from] reqwest::Error),
	#[error(transparent)]
	InvalidHeaderValue(#[from] reqwest::header::InvalidHeaderValue),
	#[error("Remote store responded with status {status}: {body}")]
	Status { status: u16, body: String },
	#[error("No valid access token is available for the remote store.")]
	MissingCredential,
	#[error("{message}")]
	InvalidResponse { message: String },
}
impl Error {
	pub fn is_missing_credential(&self) -> bool {
		matches!(self, Self::MissingCredential)
	}
}
