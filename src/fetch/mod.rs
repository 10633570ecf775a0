// src/fetch/mod.rs

pub mod archive;
pub mod progress;

pub use archive::{archive_client, download_archive};
pub use progress::DownloadProgress;
