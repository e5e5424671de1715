use thiserror::Error;

pub type Result<T> = std::result::Result<T, DiscoveryError>;

#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error("Unknown interface: {0}")]
    InterfaceUnknown(String),
    #[error("Multicast bind failed: {0}")]
    MulticastBindFailed(String),
    #[error("Send error: {0}")]
    SendFailed(String),
    #[error("Read error: {0}")]
    ReadFailed(String),
    #[error("Random source error: {0}")]
    RandomSourceFailed(String),
    #[error("Interface enumeration error: {0}")]
    InterfaceEnumeration(String),
    #[error("Invalid selection: {0}")]
    InvalidSelection(String),
    #[error("Session already used: {0}")]
    SessionSpent(String),
}

/// Fieldless mirror of [`DiscoveryError`], used where only the category matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InterfaceUnknown,
    MulticastBindFailed,
    SendFailed,
    ReadFailed,
    RandomSourceFailed,
    InterfaceEnumeration,
    InvalidSelection,
    SessionSpent,
}

impl DiscoveryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InterfaceUnknown(_) => ErrorKind::InterfaceUnknown,
            Self::MulticastBindFailed(_) => ErrorKind::MulticastBindFailed,
            Self::SendFailed(_) => ErrorKind::SendFailed,
            Self::ReadFailed(_) => ErrorKind::ReadFailed,
            Self::RandomSourceFailed(_) => ErrorKind::RandomSourceFailed,
            Self::InterfaceEnumeration(_) => ErrorKind::InterfaceEnumeration,
            Self::InvalidSelection(_) => ErrorKind::InvalidSelection,
            Self::SessionSpent(_) => ErrorKind::SessionSpent,
        }
    }

    pub fn multicast_bind_failed(interface: &str, cause: impl std::fmt::Display) -> Self {
        DiscoveryError::MulticastBindFailed(format!("{}: {}", interface, cause))
    }
}
