use std::env;

use dotenvy::dotenv;
use once_cell::sync::Lazy;

use crate::constants::{API_URL_ENV, DEFAULT_API_BASE_URL};

pub struct Config {
    pub api_base_url: String,
}

impl Config {
    fn from_env() -> Self {
        Config {
            api_base_url: env::var(API_URL_ENV)
                .ok()
                .filter(|url| !url.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
        }
    }
}

pub static CONFIG: Lazy<Config> = Lazy::new(|| {
    dotenv().ok(); // Load environment variables
    Config::from_env()
});

pub fn init_config() -> &'static Config {
    &CONFIG
}
