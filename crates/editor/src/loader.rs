//! Background document loading.
//!
//! The file is read and split into a rope on a blocking worker. The finished
//! [`RopeContent`] is handed back over a oneshot channel; the owning thread
//! either polls [`LoadHandle::try_take`] between frames or awaits
//! [`LoadHandle::wait`], and only then installs it into a session. The
//! worker never sees carets or history.

use std::path::{Path, PathBuf};

use tokio::sync::oneshot;
use tokio::sync::oneshot::error::TryRecvError;
use tracing::{debug, warn};

use crate::error::LoadError;
use crate::rope_content::RopeContent;

/// Result type for document loading.
pub type Result<T> = std::result::Result<T, LoadError>;

/// Reads `path` into a [`RopeContent`], normalizing CRLF to LF.
pub fn load_file(path: &Path) -> Result<RopeContent> {
	let text = std::fs::read_to_string(path).map_err(|error| LoadError::Io {
		path: path.to_path_buf(),
		error,
	})?;
	if text.contains("\r\n") {
		return Ok(RopeContent::from(text.replace("\r\n", "\n").as_str()));
	}
	Ok(RopeContent::from(text.as_str()))
}

/// Pending result of [`spawn_load`].
#[derive(Debug)]
pub struct LoadHandle {
	path: PathBuf,
	rx: Option<oneshot::Receiver<Result<RopeContent>>>,
}

impl LoadHandle {
	/// Returns the path being loaded.
	pub fn path(&self) -> &Path {
		&self.path
	}

	/// Returns true once the result has been taken.
	pub fn is_taken(&self) -> bool {
		self.rx.is_none()
	}

	/// Takes the result if the load has finished, without blocking.
	///
	/// Returns `None` while the load is still running and after the result
	/// has been taken once.
	pub fn try_take(&mut self) -> Option<Result<RopeContent>> {
		let rx = self.rx.as_mut()?;
		let result = match rx.try_recv() {
			Ok(result) => result,
			Err(TryRecvError::Empty) => return None,
			Err(TryRecvError::Closed) => Err(LoadError::Abandoned {
				path: self.path.clone(),
			}),
		};
		self.rx = None;
		Some(result)
	}

	/// Waits for the load to finish.
	pub async fn wait(mut self) -> Result<RopeContent> {
		let Some(rx) = self.rx.take() else {
			return Err(LoadError::Abandoned { path: self.path });
		};
		match rx.await {
			Ok(result) => result,
			Err(_) => Err(LoadError::Abandoned { path: self.path }),
		}
	}
}

/// Starts loading `path` on the blocking pool of the current tokio runtime.
pub fn spawn_load(path: impl Into<PathBuf>) -> LoadHandle {
	let path = path.into();
	let (tx, rx) = oneshot::channel();
	let worker_path = path.clone();
	tokio::task::spawn_blocking(move || {
		let result = load_file(&worker_path);
		match &result {
			Ok(content) => debug!(path = %worker_path.display(), rows = content.rope().len_lines(), "document loaded"),
			Err(error) => warn!(path = %worker_path.display(), %error, "document load failed"),
		}
		if tx.send(result).is_err() {
			debug!(path = %worker_path.display(), "load result dropped, handle gone");
		}
	});
	LoadHandle { path, rx: Some(rx) }
}
