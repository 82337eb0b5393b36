use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::customer::model::{CustomerType, REAL_NAME_ID_LEN};
use crate::product::model::{PRODUCT_CODE_LEN, TAXATION_CODE_LEN};
use crate::utils::{lenient_percentage, lenient_u64};
use crate::validation::{self, FieldError};

pub const ACCOUNT_PASSWORD_LEN: usize = 4;
pub const LINKED_ACCOUNT_NUMBER_LEN: usize = 10;

/// Body of `POST /accounts/`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AccountCreateRequest {
    pub customer_id: String,
    pub product_code: String,
    pub real_name_identification_number: String,
    pub customer_type: CustomerType,
    pub taxation_code: String,
    pub initial_deposit_amount: u64,
    pub passbook_exemption_flag: bool,
    pub base_interest_rate: u32,
    pub additional_interest_rate: u32,
    pub applied_interest_rate: u32,
    pub account_password: String,
    pub cash_amount: u64,
    pub linked_substitute_amount: u64,
    pub linked_substitute_account_number: Option<String>,
}

impl AccountCreateRequest {
    /// Field constraints the API enforces on account creation.
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        validation::required("customer_id", &self.customer_id, &mut errors);
        validation::exact_chars(
            "product_code",
            &self.product_code,
            PRODUCT_CODE_LEN,
            &mut errors,
        );
        validation::exact_chars(
            "real_name_identification_number",
            &self.real_name_identification_number,
            REAL_NAME_ID_LEN,
            &mut errors,
        );
        validation::exact_chars(
            "taxation_code",
            &self.taxation_code,
            TAXATION_CODE_LEN,
            &mut errors,
        );
        validation::percentage("base_interest_rate", self.base_interest_rate, &mut errors);
        validation::percentage(
            "additional_interest_rate",
            self.additional_interest_rate,
            &mut errors,
        );
        validation::percentage(
            "applied_interest_rate",
            self.applied_interest_rate,
            &mut errors,
        );
        validation::exact_chars(
            "account_password",
            &self.account_password,
            ACCOUNT_PASSWORD_LEN,
            &mut errors,
        );
        if let Some(number) = &self.linked_substitute_account_number {
            validation::exact_chars(
                "linked_substitute_account_number",
                number,
                LINKED_ACCOUNT_NUMBER_LEN,
                &mut errors,
            );
        }
        validation::amount("cash_amount", self.cash_amount, &mut errors);
        validation::amount(
            "linked_substitute_amount",
            self.linked_substitute_amount,
            &mut errors,
        );
        validation::amount(
            "initial_deposit_amount",
            self.initial_deposit_amount,
            &mut errors,
        );
        match self.cash_amount.checked_add(self.linked_substitute_amount) {
            Some(expected) if expected == self.initial_deposit_amount => {}
            Some(expected) => errors.push(FieldError::DepositMismatch {
                expected,
                actual: self.initial_deposit_amount,
            }),
            None => errors.push(FieldError::Overflow("initial_deposit_amount")),
        }
        validation::into_result(errors)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Account {
    pub account_number: String,
    pub customer_id: String,
    pub product_code: String,
    pub real_name_identification_number: String,
    pub customer_type: CustomerType,
    pub taxation_code: String,
    #[serde(deserialize_with = "lenient_u64")]
    pub initial_deposit_amount: u64,
    #[serde(default)]
    pub passbook_exemption_flag: bool,
    #[serde(deserialize_with = "lenient_percentage")]
    pub base_interest_rate: u32,
    #[serde(deserialize_with = "lenient_percentage")]
    pub additional_interest_rate: u32,
    #[serde(deserialize_with = "lenient_percentage")]
    pub applied_interest_rate: u32,
    pub account_password: String,
    #[serde(deserialize_with = "lenient_u64")]
    pub cash_amount: u64,
    #[serde(deserialize_with = "lenient_u64")]
    pub linked_substitute_amount: u64,
    #[serde(default)]
    pub linked_substitute_account_number: Option<String>,
    #[serde(default)]
    pub account_opening_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub last_modified_date: Option<NaiveDateTime>,
}

impl From<&Account> for AccountCreateRequest {
    fn from(account: &Account) -> Self {
        Self {
            customer_id: account.customer_id.clone(),
            product_code: account.product_code.clone(),
            real_name_identification_number: account.real_name_identification_number.clone(),
            customer_type: account.customer_type,
            taxation_code: account.taxation_code.clone(),
            initial_deposit_amount: account.initial_deposit_amount,
            passbook_exemption_flag: account.passbook_exemption_flag,
            base_interest_rate: account.base_interest_rate,
            additional_interest_rate: account.additional_interest_rate,
            applied_interest_rate: account.applied_interest_rate,
            account_password: account.account_password.clone(),
            cash_amount: account.cash_amount,
            linked_substitute_amount: account.linked_substitute_amount,
            linked_substitute_account_number: account.linked_substitute_account_number.clone(),
        }
    }
}
