pub mod account;
pub mod client;
pub mod config;
pub mod constants;
pub mod customer;
pub mod error;
pub mod http;
pub mod product;
pub mod transaction;
pub mod utils;
pub mod validation;
