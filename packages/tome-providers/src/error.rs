pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Reqwest(#[from] reqwest::Error),
	#[error("Invalid provider header {name:?}: {reason}.")]
	InvalidHeader { name: String, reason: String },
	#[error("{message}")]
	InvalidResponse { message: String },
}
