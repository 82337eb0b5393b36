pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
pub const API_URL_ENV: &str = "DEPOSIT_API_URL";

pub const REQUEST_TIMEOUT_SECS: u64 = 30;
pub const CONNECT_TIMEOUT_SECS: u64 = 10;

// Collection path segments; collections end in a slash, items do not.
pub const CUSTOMERS: &str = "customers";
pub const PRODUCTS: &str = "products";
pub const ACCOUNTS: &str = "accounts";
pub const TRANSACTIONS: &str = "transactions";
