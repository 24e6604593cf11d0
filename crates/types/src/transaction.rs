/// Simulated cross-chain transactions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Deposit,
    Withdraw,
    Harvest,
    Optimize,
}

/// Lifecycle of a transaction: `Pending` then exactly one terminal state
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
    Completed,
    Failed,
}

impl TransactionStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, TransactionStatus::Pending)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Hash-like synthetic identifier
    pub id: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub vault_id: String,
    pub amount: f64,
    pub status: TransactionStatus,
    pub timestamp: DateTime<Utc>,
    /// Settlement hash, set on completion
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xcm_message_id: Option<String>,
}

impl Transaction {
    pub fn pending_deposit(
        id: String,
        vault_id: &str,
        amount: f64,
        xcm_message_id: String,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            kind: TransactionKind::Deposit,
            vault_id: vault_id.to_string(),
            amount,
            status: TransactionStatus::Pending,
            timestamp,
            tx_hash: None,
            xcm_message_id: Some(xcm_message_id),
        }
    }

    /// Move to `Completed`. Terminal transactions are left untouched.
    pub fn complete(&mut self, tx_hash: String) -> bool {
        if self.status.is_terminal() {
            return false;
        }
        self.status = TransactionStatus::Completed;
        self.tx_hash = Some(tx_hash);
        true
    }

    /// Move to `Failed`. Terminal transactions are left untouched.
    pub fn fail(&mut self) -> bool {
        if self.status.is_terminal() {
            return false;
        }
        self.status = TransactionStatus::Failed;
        true
    }
}
