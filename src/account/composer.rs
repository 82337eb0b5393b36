use tracing::debug;

use super::draft::{AccountDraft, CustomerProjection, ProductProjection};
use super::lookup::{CustomerLookup, ProductLookup};
use super::model::AccountCreateRequest;
use crate::error::CustomError;
use crate::utils::sanitize_amount;
use crate::validation::FieldError;

#[derive(Debug, Default, Clone)]
pub struct AccountDraftComposer {
    draft: AccountDraft,
}

impl AccountDraftComposer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &AccountDraft {
        &self.draft
    }

    /// Unknown ids leave the draft untouched.
    pub fn select_customer<L>(&mut self, customer_id: &str, lookup: &L)
    where
        L: CustomerLookup + ?Sized,
    {
        match lookup.customer(customer_id) {
            Some(customer) => self.draft.apply_customer(CustomerProjection::from(customer)),
            None => debug!("customer {} not in lookup, draft unchanged", customer_id),
        }
    }

    /// Unknown codes leave the draft untouched.
    pub fn select_product<L>(&mut self, product_code: &str, lookup: &L)
    where
        L: ProductLookup + ?Sized,
    {
        match lookup.product(product_code) {
            Some(product) => self.draft.apply_product(ProductProjection::from(product)),
            None => debug!("product {} not in lookup, draft unchanged", product_code),
        }
    }

    pub fn set_cash_amount(&mut self, raw: &str) {
        self.draft.cash_amount = sanitize_amount(raw);
    }

    pub fn set_linked_substitute_amount(&mut self, raw: &str) {
        self.draft.linked_substitute_amount = sanitize_amount(raw);
    }

    pub fn set_linked_substitute_account_number(&mut self, raw: &str) {
        let raw = raw.trim();
        self.draft.linked_substitute_account_number = if raw.is_empty() {
            None
        } else {
            Some(raw.to_string())
        };
    }

    pub fn set_account_password(&mut self, password: &str) {
        self.draft.account_password = password.to_string();
    }

    pub fn set_passbook_exemption(&mut self, exempt: bool) {
        self.draft.passbook_exemption_flag = exempt;
    }

    // linked_substitute_amount is unsigned, so its >= 0 bound always holds.
    pub fn is_submittable(&self) -> bool {
        let d = &self.draft;
        !d.customer_id.is_empty()
            && !d.product_code.is_empty()
            && !d.real_name_identification_number.is_empty()
            && !d.account_password.is_empty()
            && d.cash_amount > 0
    }

    /// Snapshot of the draft with the initial deposit derived from the
    /// current amounts. Fails only when cash plus linked amount overflows.
    pub fn build_submission_payload(&mut self) -> Result<AccountCreateRequest, CustomError> {
        self.draft.initial_deposit_amount = self
            .draft
            .total_deposit()
            .ok_or_else(|| {
                CustomError::ValidationError(vec![FieldError::Overflow("initial_deposit_amount")])
            })?;
        let d = &self.draft;
        Ok(AccountCreateRequest {
            customer_id: d.customer_id.clone(),
            product_code: d.product_code.clone(),
            real_name_identification_number: d.real_name_identification_number.clone(),
            customer_type: d.customer_type,
            taxation_code: d.taxation_code.clone(),
            initial_deposit_amount: d.initial_deposit_amount,
            passbook_exemption_flag: d.passbook_exemption_flag,
            base_interest_rate: d.base_interest_rate,
            additional_interest_rate: d.additional_interest_rate,
            applied_interest_rate: d.applied_interest_rate,
            account_password: d.account_password.clone(),
            cash_amount: d.cash_amount,
            linked_substitute_amount: d.linked_substitute_amount,
            linked_substitute_account_number: d.linked_substitute_account_number.clone(),
        })
    }

    pub fn reset(&mut self) {
        self.draft = AccountDraft::default();
    }
}
