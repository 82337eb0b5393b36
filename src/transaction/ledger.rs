//! Running balances for deposit accounts.
//!
//! Every posted transaction records the balance it leaves behind, so the
//! current balance is that of the latest transaction, or the initial deposit
//! when the account has none.

use chrono::{NaiveDateTime, Utc};

use super::model::{Transaction, TransactionCreate, TransactionType};
use crate::account::model::Account;
use crate::error::CustomError;
use crate::utils::sanitize_amount;
use crate::validation::{self, FieldError, MAX_AMOUNT};

pub fn apply(balance: u64, kind: TransactionType, amount: u64) -> Result<u64, CustomError> {
    match kind {
        TransactionType::Deposit => match balance.checked_add(amount) {
            Some(after) if after <= MAX_AMOUNT => Ok(after),
            Some(after) => Err(CustomError::ValidationError(vec![
                FieldError::AmountTooLarge {
                    field: "balance_after_transaction",
                    max: MAX_AMOUNT,
                    actual: after,
                },
            ])),
            None => Err(CustomError::ValidationError(vec![FieldError::Overflow(
                "balance_after_transaction",
            )])),
        },
        TransactionType::Withdrawal => {
            balance
                .checked_sub(amount)
                .ok_or(CustomError::InsufficientFunds {
                    balance,
                    requested: amount,
                })
        }
    }
}

pub fn current_balance(account: &Account, transactions: &[Transaction]) -> u64 {
    transactions
        .iter()
        .filter(|t| t.account_number == account.account_number)
        .max_by_key(|t| (t.transaction_date, t.transaction_id))
        .map(|t| t.balance_after_transaction)
        .unwrap_or(account.initial_deposit_amount)
}

pub fn newest_first(mut transactions: Vec<Transaction>) -> Vec<Transaction> {
    transactions.sort_by(|a, b| {
        b.transaction_date
            .cmp(&a.transaction_date)
            .then(b.transaction_id.cmp(&a.transaction_id))
    });
    transactions
}

pub fn accounts_of_customer<'a>(accounts: &'a [Account], customer_id: &str) -> Vec<&'a Account> {
    accounts
        .iter()
        .filter(|a| a.customer_id == customer_id)
        .collect()
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct TransactionDraft {
    pub account_number: String,
    pub transaction_date: Option<NaiveDateTime>,
    pub transaction_type: TransactionType,
    pub transaction_amount: u64,
}

impl TransactionDraft {
    pub fn for_account(account_number: &str) -> Self {
        Self {
            account_number: account_number.to_string(),
            ..Self::default()
        }
    }

    pub fn set_amount(&mut self, raw: &str) {
        self.transaction_amount = sanitize_amount(raw);
    }

    pub fn is_submittable(&self) -> bool {
        !self.account_number.is_empty() && self.transaction_amount > 0
    }

    /// Derives `balance_after_transaction` from `balance`, the account's
    /// balance before this transaction. An unset date means now.
    pub fn build_submission_payload(
        &self,
        balance: u64,
    ) -> Result<TransactionCreate, CustomError> {
        if !self.is_submittable() {
            return Err(CustomError::NotSubmittable);
        }
        let mut errors = Vec::new();
        validation::amount("transaction_amount", self.transaction_amount, &mut errors);
        validation::into_result(errors).map_err(CustomError::ValidationError)?;
        let balance_after = apply(balance, self.transaction_type, self.transaction_amount)?;
        Ok(TransactionCreate {
            account_number: self.account_number.clone(),
            transaction_date: self
                .transaction_date
                .unwrap_or_else(|| Utc::now().naive_utc()),
            transaction_type: self.transaction_type,
            transaction_amount: self.transaction_amount,
            balance_after_transaction: balance_after,
        })
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::customer::model::CustomerType;
    use chrono::NaiveDate;

    fn at(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, day)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn account(number: &str, customer_id: &str, deposit: u64) -> Account {
        Account {
            account_number: number.to_string(),
            customer_id: customer_id.to_string(),
            product_code: "DEP001".to_string(),
            real_name_identification_number: "9001011234567".to_string(),
            customer_type: CustomerType::Individual,
            taxation_code: "1".to_string(),
            initial_deposit_amount: deposit,
            passbook_exemption_flag: false,
            base_interest_rate: 2,
            additional_interest_rate: 1,
            applied_interest_rate: 3,
            account_password: "1234".to_string(),
            cash_amount: deposit,
            linked_substitute_amount: 0,
            linked_substitute_account_number: None,
            account_opening_date: None,
            last_modified_date: None,
        }
    }

    fn tx(id: i64, number: &str, day: u32, balance: u64) -> Transaction {
        Transaction {
            transaction_id: id,
            account_number: number.to_string(),
            transaction_date: at(day),
            transaction_type: TransactionType::Deposit,
            transaction_amount: 1,
            balance_after_transaction: balance,
            registration_date: None,
        }
    }

    #[test]
    fn withdrawal_above_balance_fails() {
        assert_eq!(apply(100, TransactionType::Withdrawal, 100).unwrap(), 0);
        let err = apply(100, TransactionType::Withdrawal, 101).unwrap_err();
        assert!(matches!(
            err,
            CustomError::InsufficientFunds {
                balance: 100,
                requested: 101
            }
        ));
        assert_eq!(apply(100, TransactionType::Deposit, 50).unwrap(), 150);
    }

    #[test]
    fn balance_falls_back_to_initial_deposit() {
        let acc = account("100-0001000", "C1", 5000);
        let others = vec![tx(1, "100-0001001", 3, 99)];
        assert_eq!(current_balance(&acc, &others), 5000);
    }

    #[test]
    fn balance_follows_latest_transaction_not_latest_id() {
        let acc = account("100-0001000", "C1", 5000);
        let history = vec![
            tx(1, "100-0001000", 5, 7000),
            tx(2, "100-0001000", 2, 6000),
            tx(3, "100-0001001", 9, 1),
        ];
        assert_eq!(current_balance(&acc, &history), 7000);
    }

    #[test]
    fn newest_first_orders_by_date_descending() {
        let sorted = newest_first(vec![tx(1, "a", 1, 0), tx(2, "a", 3, 0), tx(3, "a", 2, 0)]);
        let ids: Vec<_> = sorted.iter().map(|t| t.transaction_id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn accounts_are_filtered_by_customer() {
        let accounts = vec![
            account("100-0001000", "C1", 1),
            account("100-0001001", "C2", 1),
            account("100-0001002", "C1", 1),
        ];
        let numbers: Vec<_> = accounts_of_customer(&accounts, "C1")
            .iter()
            .map(|a| a.account_number.as_str())
            .collect();
        assert_eq!(numbers, vec!["100-0001000", "100-0001002"]);
    }

    #[test]
    fn draft_derives_balance_after_instead_of_copying_amount() {
        let mut draft = TransactionDraft::for_account("100-0001000");
        draft.transaction_type = TransactionType::Withdrawal;
        draft.transaction_date = Some(at(10));
        draft.set_amount("3,000");
        let payload = draft.build_submission_payload(10_000).unwrap();
        assert_eq!(payload.transaction_amount, 3000);
        assert_eq!(payload.balance_after_transaction, 7000);
        assert_eq!(payload.transaction_date, at(10));
    }

    #[test]
    fn deposits_stay_within_twelve_digits() {
        assert_eq!(
            apply(999_999_999_000, TransactionType::Deposit, 999).unwrap(),
            MAX_AMOUNT
        );
        let err = apply(MAX_AMOUNT, TransactionType::Deposit, 1).unwrap_err();
        assert!(matches!(
            err,
            CustomError::ValidationError(ref fields) if matches!(
                fields[0],
                FieldError::AmountTooLarge { field: "balance_after_transaction", .. }
            )
        ));
        let err = apply(u64::MAX, TransactionType::Deposit, 1).unwrap_err();
        assert!(matches!(
            err,
            CustomError::ValidationError(ref fields)
                if fields == &vec![FieldError::Overflow("balance_after_transaction")]
        ));
    }

    #[test]
    fn oversized_transaction_amount_is_rejected() {
        let mut draft = TransactionDraft::for_account("100-0001000");
        draft.set_amount("99999999999999999999999");
        assert!(draft.is_submittable());
        let err = draft.build_submission_payload(0).unwrap_err();
        assert!(matches!(
            err,
            CustomError::ValidationError(ref fields) if matches!(
                fields[0],
                FieldError::AmountTooLarge { field: "transaction_amount", .. }
            )
        ));
    }

    #[test]
    fn empty_draft_is_not_submittable() {
        let mut draft = TransactionDraft::for_account("100-0001000");
        draft.set_amount("abc");
        assert!(!draft.is_submittable());
        assert!(matches!(
            draft.build_submission_payload(10),
            Err(CustomError::NotSubmittable)
        ));
        draft.set_amount("5");
        draft.reset();
        assert_eq!(draft, TransactionDraft::default());
    }
}
