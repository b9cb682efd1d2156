pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("Provider error: {message}")]
	Provider { message: String },
	#[error("Storage error: {message}")]
	Storage { message: String },
}
impl From<tome_providers::Error> for Error {
	fn from(err: tome_providers::Error) -> Self {
		Self::Provider { message: err.to_string() }
	}
}

impl From<tome_storage::Error> for Error {
	fn from(err: tome_storage::Error) -> Self {
		match err {
			tome_storage::Error::Sqlx(inner) => Self::Storage { message: inner.to_string() },
			tome_storage::Error::NotFound(message) => Self::Storage { message },
		}
	}
}
