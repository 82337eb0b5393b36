#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error("{field} must be exactly {expected} characters (got {actual})")]
    Length {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("{field} must be between {min} and {max} (got {actual})")]
    Range {
        field: &'static str,
        min: u32,
        max: u32,
        actual: u32,
    },

    #[error("{field} must be at most {max} (got {actual})")]
    AmountTooLarge {
        field: &'static str,
        max: u64,
        actual: u64,
    },

    #[error(
        "initial_deposit_amount must equal cash plus linked substitute amount ({expected}, got {actual})"
    )]
    DepositMismatch { expected: u64, actual: u64 },

    #[error("{0} overflows")]
    Overflow(&'static str),
}

pub const MAX_INTEREST_RATE: u32 = 100;

/// Amounts are stored as NUMERIC(12, 0).
pub const MAX_AMOUNT: u64 = 999_999_999_999;

pub fn required(field: &'static str, value: &str, errors: &mut Vec<FieldError>) {
    if value.trim().is_empty() {
        errors.push(FieldError::Required(field));
    }
}

pub fn exact_chars(
    field: &'static str,
    value: &str,
    expected: usize,
    errors: &mut Vec<FieldError>,
) {
    let actual = value.chars().count();
    if actual != expected {
        errors.push(FieldError::Length {
            field,
            expected,
            actual,
        });
    }
}

pub fn within(field: &'static str, value: u32, min: u32, max: u32, errors: &mut Vec<FieldError>) {
    if value < min || value > max {
        errors.push(FieldError::Range {
            field,
            min,
            max,
            actual: value,
        });
    }
}

pub fn percentage(field: &'static str, value: u32, errors: &mut Vec<FieldError>) {
    within(field, value, 0, MAX_INTEREST_RATE, errors);
}

pub fn amount(field: &'static str, value: u64, errors: &mut Vec<FieldError>) {
    if value > MAX_AMOUNT {
        errors.push(FieldError::AmountTooLarge {
            field,
            max: MAX_AMOUNT,
            actual: value,
        });
    }
}

pub fn into_result(errors: Vec<FieldError>) -> Result<(), Vec<FieldError>> {
    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
