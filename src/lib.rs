pub mod config;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod load;
pub mod pipeline;
pub mod process;

pub use config::Config;
pub use error::{ErrorKind, EtlError};
pub use pipeline::{process_data_dump, Stage, StageError};
pub use process::LoadSummary;
