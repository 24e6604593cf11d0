use thiserror::Error;

// ============================================================================
// Main Error Enum
// ============================================================================

/// Error enum shared by the simulation and dashboard crates
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DashboardError {
    // ========================================================================
    // Guard Failures
    // ========================================================================

    /// Action requires a connected wallet
    #[error("Wallet is not connected")]
    WalletNotConnected,

    /// Vault id is not part of the catalog
    #[error("Vault not found: {vault_id}")]
    VaultNotFound { vault_id: String },

    /// No active vault is flagged as best
    #[error("No active vault available for optimization")]
    NoBestVault,

    /// Deposit amount is zero, negative or not finite
    #[error("Invalid amount: {amount}")]
    InvalidAmount { amount: f64 },

    // ========================================================================
    // Settlement Errors
    // ========================================================================

    /// Simulated cross-chain message was not delivered
    #[error("XCM message {message_id} failed to settle")]
    XcmDeliveryFailed { message_id: String },

    // ========================================================================
    // Wallet Collaborator Errors
    // ========================================================================

    /// Balance returned by the wallet provider could not be decoded
    #[error("Invalid balance '{raw}': {reason}")]
    InvalidBalance { raw: String, reason: String },

    // ========================================================================
    // Configuration and I/O Errors
    // ========================================================================

    /// Parameter outside its accepted range
    #[error("Invalid parameter '{parameter}': got {value}, expected {expected}")]
    InvalidParameter { parameter: String, value: String, expected: String },

    /// Configuration could not be read or parsed
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization failure
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Filesystem failure
    #[error("I/O error: {0}")]
    Io(String),

    /// Catch-all
    #[error("{message}")]
    Generic { message: String },
}

impl DashboardError {
    /// Create a vault not found error
    pub fn vault_not_found(vault_id: &str) -> Self {
        Self::VaultNotFound {
            vault_id: vault_id.to_string(),
        }
    }

    /// Create an XCM delivery failure for a message id
    pub fn xcm_delivery_failed(message_id: &str) -> Self {
        Self::XcmDeliveryFailed {
            message_id: message_id.to_string(),
        }
    }

    /// Create an invalid balance error
    pub fn invalid_balance(raw: &str, reason: &str) -> Self {
        Self::InvalidBalance {
            raw: raw.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create an invalid parameter error
    pub fn invalid_parameter(parameter: &str, value: &str, expected: &str) -> Self {
        Self::InvalidParameter {
            parameter: parameter.to_string(),
            value: value.to_string(),
            expected: expected.to_string(),
        }
    }

    /// Create a configuration error
    pub fn config(message: &str) -> Self {
        Self::Config(message.to_string())
    }

    /// Create a generic error
    pub fn generic(message: &str) -> Self {
        Self::Generic {
            message: message.to_string(),
        }
    }

    /// Whether the error is a precondition failure rather than a settlement failure
    pub fn is_guard_failure(&self) -> bool {
        matches!(
            self,
            Self::WalletNotConnected
                | Self::VaultNotFound { .. }
                | Self::NoBestVault
                | Self::InvalidAmount { .. }
        )
    }
}

impl From<std::io::Error> for DashboardError {
    fn from(err: std::io::Error) -> Self {
        DashboardError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for DashboardError {
    fn from(err: serde_json::Error) -> Self {
        DashboardError::Serialization(err.to_string())
    }
}

/// Result type alias using the shared error type
pub type DashboardResult<T> = std::result::Result<T, DashboardError>;
