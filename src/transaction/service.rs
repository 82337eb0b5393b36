use std::sync::Arc;

use tracing::info;

use super::ledger::{self, TransactionDraft};
use super::model::Transaction;
use crate::client::DepositApi;
use crate::error::CustomError;

pub struct TransactionService<A: DepositApi> {
    api: Arc<A>,
}

impl<A: DepositApi> TransactionService<A> {
    pub fn new(api: Arc<A>) -> Self {
        TransactionService { api }
    }

    pub async fn balance(&self, account_number: &str) -> Result<u64, CustomError> {
        let account = self.api.account(account_number).await?;
        let history = self.api.account_transactions(account_number).await?;
        Ok(ledger::current_balance(&account, &history))
    }

    /// Posts the draft with its balance derived from the account's history.
    pub async fn record(&self, draft: &TransactionDraft) -> Result<Transaction, CustomError> {
        if !draft.is_submittable() {
            return Err(CustomError::NotSubmittable);
        }
        let balance = self.balance(&draft.account_number).await?;
        let payload = draft.build_submission_payload(balance)?;
        let transaction = self.api.create_transaction(&payload).await?;
        info!(
            "recorded transaction {} on {}: balance {} -> {}",
            transaction.transaction_id,
            transaction.account_number,
            balance,
            transaction.balance_after_transaction
        );
        Ok(transaction)
    }

    pub async fn history(&self, account_number: &str) -> Result<Vec<Transaction>, CustomError> {
        let transactions = self.api.account_transactions(account_number).await?;
        Ok(ledger::newest_first(transactions))
    }

    pub async fn delete(&self, transaction_id: i64) -> Result<(), CustomError> {
        self.api.delete_transaction(transaction_id).await
    }
}
