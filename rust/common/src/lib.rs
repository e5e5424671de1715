pub mod error;
pub mod types;
pub mod config;

pub use error::{DiscoveryError, ErrorKind, Result};
pub use types::*;
pub use config::*;
