use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::customer::model::CustomerType;
use crate::utils::{lenient_percentage, optional_lenient_u32};
use crate::validation::{self, FieldError};

pub const PRODUCT_CODE_LEN: usize = 6;
pub const TAXATION_CODE_LEN: usize = 1;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Product {
    pub product_code: String,
    pub product_name: String,
    pub eligible_customer_type: CustomerType,
    pub taxation_code: String,
    #[serde(default, deserialize_with = "optional_lenient_u32")]
    pub eligible_age: Option<u32>,
    #[serde(deserialize_with = "lenient_percentage")]
    pub base_interest_rate: u32,
    #[serde(deserialize_with = "lenient_percentage")]
    pub additional_interest_rate: u32,
    #[serde(deserialize_with = "lenient_percentage")]
    pub applied_interest_rate: u32,
    #[serde(default)]
    pub registration_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub last_modified_date: Option<NaiveDateTime>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ProductCreate {
    pub product_code: String,
    pub product_name: String,
    pub eligible_customer_type: CustomerType,
    pub taxation_code: String,
    pub eligible_age: Option<u32>,
    pub base_interest_rate: u32,
    pub additional_interest_rate: u32,
    pub applied_interest_rate: u32,
}

impl From<&Product> for ProductCreate {
    fn from(product: &Product) -> Self {
        Self {
            product_code: product.product_code.clone(),
            product_name: product.product_name.clone(),
            eligible_customer_type: product.eligible_customer_type,
            taxation_code: product.taxation_code.clone(),
            eligible_age: product.eligible_age,
            base_interest_rate: product.base_interest_rate,
            additional_interest_rate: product.additional_interest_rate,
            applied_interest_rate: product.applied_interest_rate,
        }
    }
}

impl ProductCreate {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        validation::exact_chars(
            "product_code",
            &self.product_code,
            PRODUCT_CODE_LEN,
            &mut errors,
        );
        validation::required("product_name", &self.product_name, &mut errors);
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
        validation::into_result(errors)
    }
}
