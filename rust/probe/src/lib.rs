pub mod discovery;
pub mod interfaces;
pub mod presenter;
pub mod prompt;

pub use discovery::{DiscoverySession, ProbeEnvelope, SessionState};
