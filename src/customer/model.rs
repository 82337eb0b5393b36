use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::validation::{self, FieldError};

pub const REAL_NAME_ID_LEN: usize = 13;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(try_from = "u8", into = "u8")]
pub enum CustomerType {
    #[default]
    Individual,
    Corporate,
}

impl TryFrom<u8> for CustomerType {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(CustomerType::Individual),
            2 => Ok(CustomerType::Corporate),
            other => Err(format!("unknown customer type {other}")),
        }
    }
}

impl From<CustomerType> for u8 {
    fn from(value: CustomerType) -> Self {
        match value {
            CustomerType::Individual => 1,
            CustomerType::Corporate => 2,
        }
    }
}

impl std::str::FromStr for CustomerType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "individual" => Ok(CustomerType::Individual),
            "2" | "corporate" => Ok(CustomerType::Corporate),
            other => Err(format!("unknown customer type '{other}'")),
        }
    }
}

impl std::fmt::Display for CustomerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CustomerType::Individual => write!(f, "individual"),
            CustomerType::Corporate => write!(f, "corporate"),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Customer {
    pub customer_id: String,
    pub customer_name: String,
    pub customer_type: CustomerType,
    pub real_name_identification_number: String,
    #[serde(default)]
    pub registration_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub last_modified_date: Option<NaiveDateTime>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CustomerCreate {
    pub customer_name: String,
    pub customer_type: CustomerType,
    pub real_name_identification_number: String,
}

impl From<&Customer> for CustomerCreate {
    fn from(customer: &Customer) -> Self {
        Self {
            customer_name: customer.customer_name.clone(),
            customer_type: customer.customer_type,
            real_name_identification_number: customer.real_name_identification_number.clone(),
        }
    }
}

impl CustomerCreate {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        validation::required("customer_name", &self.customer_name, &mut errors);
        validation::exact_chars(
            "real_name_identification_number",
            &self.real_name_identification_number,
            REAL_NAME_ID_LEN,
            &mut errors,
        );
        validation::into_result(errors)
    }
}
