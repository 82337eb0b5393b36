use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::utils::lenient_u64;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(try_from = "u8", into = "u8")]
pub enum TransactionType {
    #[default]
    Deposit,
    Withdrawal,
}

impl TryFrom<u8> for TransactionType {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(TransactionType::Deposit),
            2 => Ok(TransactionType::Withdrawal),
            other => Err(format!("unknown transaction type {other}")),
        }
    }
}

impl From<TransactionType> for u8 {
    fn from(value: TransactionType) -> Self {
        match value {
            TransactionType::Deposit => 1,
            TransactionType::Withdrawal => 2,
        }
    }
}

impl std::str::FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "deposit" => Ok(TransactionType::Deposit),
            "2" | "withdrawal" => Ok(TransactionType::Withdrawal),
            other => Err(format!("unknown transaction type '{other}'")),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Transaction {
    pub transaction_id: i64,
    pub account_number: String,
    pub transaction_date: NaiveDateTime,
    pub transaction_type: TransactionType,
    #[serde(deserialize_with = "lenient_u64")]
    pub transaction_amount: u64,
    #[serde(deserialize_with = "lenient_u64")]
    pub balance_after_transaction: u64,
    #[serde(default)]
    pub registration_date: Option<NaiveDateTime>,
}

/// Body of `POST /transactions/`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TransactionCreate {
    pub account_number: String,
    pub transaction_date: NaiveDateTime,
    pub transaction_type: TransactionType,
    pub transaction_amount: u64,
    pub balance_after_transaction: u64,
}
