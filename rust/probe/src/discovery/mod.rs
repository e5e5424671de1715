pub mod envelope;
pub mod mint;
pub mod response;
pub mod session;

pub use envelope::ProbeEnvelope;
pub use mint::{mint, IdentifierMint};
pub use session::{DiscoverySession, SessionState};
