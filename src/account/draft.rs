use crate::customer::model::{Customer, CustomerType};
use crate::product::model::Product;

pub const DEFAULT_TAXATION_CODE: &str = "1";

/// New-account form state. Only `AccountDraftComposer` mutates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountDraft {
    pub customer_id: String,
    pub product_code: String,
    pub real_name_identification_number: String,
    pub customer_type: CustomerType,
    pub taxation_code: String,
    pub base_interest_rate: u32,
    pub additional_interest_rate: u32,
    pub applied_interest_rate: u32,
    pub cash_amount: u64,
    pub linked_substitute_amount: u64,
    pub linked_substitute_account_number: Option<String>,
    pub passbook_exemption_flag: bool,
    pub account_password: String,
    pub initial_deposit_amount: u64,
}

impl Default for AccountDraft {
    fn default() -> Self {
        Self {
            customer_id: String::new(),
            product_code: String::new(),
            real_name_identification_number: String::new(),
            customer_type: CustomerType::Individual,
            taxation_code: DEFAULT_TAXATION_CODE.to_string(),
            base_interest_rate: 0,
            additional_interest_rate: 0,
            applied_interest_rate: 0,
            cash_amount: 0,
            linked_substitute_amount: 0,
            linked_substitute_account_number: None,
            passbook_exemption_flag: false,
            account_password: String::new(),
            initial_deposit_amount: 0,
        }
    }
}

/// The customer fields an account draft mirrors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerProjection {
    pub customer_id: String,
    pub customer_type: CustomerType,
    pub real_name_identification_number: String,
}

impl From<&Customer> for CustomerProjection {
    fn from(customer: &Customer) -> Self {
        Self {
            customer_id: customer.customer_id.clone(),
            customer_type: customer.customer_type,
            real_name_identification_number: customer.real_name_identification_number.clone(),
        }
    }
}

/// The product fields an account draft mirrors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductProjection {
    pub product_code: String,
    pub taxation_code: String,
    pub base_interest_rate: u32,
    pub additional_interest_rate: u32,
    pub applied_interest_rate: u32,
}

impl From<&Product> for ProductProjection {
    fn from(product: &Product) -> Self {
        Self {
            product_code: product.product_code.clone(),
            taxation_code: product.taxation_code.clone(),
            base_interest_rate: product.base_interest_rate,
            additional_interest_rate: product.additional_interest_rate,
            applied_interest_rate: product.applied_interest_rate,
        }
    }
}

impl AccountDraft {
    pub fn apply_customer(&mut self, projection: CustomerProjection) {
        self.customer_id = projection.customer_id;
        self.customer_type = projection.customer_type;
        self.real_name_identification_number = projection.real_name_identification_number;
    }

    pub fn apply_product(&mut self, projection: ProductProjection) {
        self.product_code = projection.product_code;
        self.taxation_code = projection.taxation_code;
        self.base_interest_rate = projection.base_interest_rate;
        self.additional_interest_rate = projection.additional_interest_rate;
        self.applied_interest_rate = projection.applied_interest_rate;
    }

    /// `None` when the sum does not fit in a `u64`.
    pub fn total_deposit(&self) -> Option<u64> {
        self.cash_amount.checked_add(self.linked_substitute_amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_draft_matches_empty_form() {
        let draft = AccountDraft::default();
        assert!(draft.customer_id.is_empty());
        assert!(draft.product_code.is_empty());
        assert_eq!(draft.customer_type, CustomerType::Individual);
        assert_eq!(draft.taxation_code, "1");
        assert_eq!(draft.total_deposit(), Some(0));
        assert_eq!(draft.linked_substitute_account_number, None);
    }

    #[test]
    fn product_projection_copies_rates_and_taxation() {
        let product = Product {
            product_code: "DEP001".to_string(),
            product_name: "Savings".to_string(),
            eligible_customer_type: CustomerType::Individual,
            taxation_code: "2".to_string(),
            eligible_age: Some(19),
            base_interest_rate: 3,
            additional_interest_rate: 2,
            applied_interest_rate: 5,
            registration_date: None,
            last_modified_date: None,
        };
        let mut draft = AccountDraft::default();
        draft.apply_product(ProductProjection::from(&product));
        assert_eq!(draft.product_code, "DEP001");
        assert_eq!(draft.taxation_code, "2");
        assert_eq!(
            (
                draft.base_interest_rate,
                draft.additional_interest_rate,
                draft.applied_interest_rate
            ),
            (3, 2, 5)
        );
    }
}
