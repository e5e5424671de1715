use common::{DiscoveryError, MessageId, Result};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};

/// Produces fresh WS-Addressing message identifiers from a cryptographic source.
pub struct IdentifierMint<R = OsRng> {
    rng: R,
}

impl IdentifierMint<OsRng> {
    pub fn new() -> Self {
        Self { rng: OsRng }
    }
}

impl Default for IdentifierMint<OsRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RngCore + CryptoRng> IdentifierMint<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    pub fn mint(&mut self) -> Result<MessageId> {
        let mut bytes = [0u8; 16];
        self.rng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| DiscoveryError::RandomSourceFailed(e.to_string()))?;
        Ok(MessageId::from_random_bytes(bytes))
    }
}

pub fn mint() -> Result<MessageId> {
    IdentifierMint::new().mint()
}
