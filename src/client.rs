use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use reqwest::header::ACCEPT;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::account::model::{Account, AccountCreateRequest};
use crate::constants::{
    ACCOUNTS, CONNECT_TIMEOUT_SECS, CUSTOMERS, PRODUCTS, REQUEST_TIMEOUT_SECS, TRANSACTIONS,
};
use crate::customer::model::{Customer, CustomerCreate};
use crate::error::CustomError;
use crate::http::{Endpoint, Method};
use crate::product::model::{Product, ProductCreate};
use crate::transaction::model::{Transaction, TransactionCreate};
use crate::utils::des_from_str;

#[async_trait]
pub trait DepositApi: Send + Sync {
    async fn customers(&self) -> Result<Vec<Customer>, CustomError>;
    async fn customer(&self, customer_id: &str) -> Result<Customer, CustomError>;
    async fn create_customer(&self, customer: &CustomerCreate) -> Result<Customer, CustomError>;
    async fn update_customer(
        &self,
        customer_id: &str,
        customer: &CustomerCreate,
    ) -> Result<Customer, CustomError>;
    async fn delete_customer(&self, customer_id: &str) -> Result<(), CustomError>;

    async fn products(&self) -> Result<Vec<Product>, CustomError>;
    async fn product(&self, product_code: &str) -> Result<Product, CustomError>;
    async fn create_product(&self, product: &ProductCreate) -> Result<Product, CustomError>;
    async fn update_product(
        &self,
        product_code: &str,
        product: &ProductCreate,
    ) -> Result<Product, CustomError>;
    async fn delete_product(&self, product_code: &str) -> Result<(), CustomError>;

    async fn accounts(&self) -> Result<Vec<Account>, CustomError>;
    async fn account(&self, account_number: &str) -> Result<Account, CustomError>;
    async fn create_account(&self, account: &AccountCreateRequest) -> Result<Account, CustomError>;
    async fn update_account(
        &self,
        account_number: &str,
        account: &AccountCreateRequest,
    ) -> Result<Account, CustomError>;
    async fn delete_account(&self, account_number: &str) -> Result<(), CustomError>;
    async fn account_transactions(&self, account_number: &str)
    -> Result<Vec<Transaction>, CustomError>;

    async fn transactions(&self) -> Result<Vec<Transaction>, CustomError>;
    async fn create_transaction(
        &self,
        transaction: &TransactionCreate,
    ) -> Result<Transaction, CustomError>;
    async fn delete_transaction(&self, transaction_id: i64) -> Result<(), CustomError>;
}

/// `DepositApi` over HTTP with JSON bodies.
pub struct HttpDepositApi {
    endpoint: Endpoint,
    client: reqwest::Client,
}

impl HttpDepositApi {
    pub fn new(base_url: &str) -> Result<Self, CustomError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .no_proxy()
            .build()
            .map_err(CustomError::ClientError)?;
        Ok(Self {
            endpoint: Endpoint::parse(base_url)?,
            client,
        })
    }

    async fn send<B>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
    ) -> Result<String, CustomError>
    where
        B: Serialize + ?Sized,
    {
        debug!("{} {}", method, url);
        let mut request = self
            .client
            .request(method.into(), url.clone())
            .header(ACCEPT, "application/json");
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_connect() || e.is_timeout() {
                CustomError::ConnectionError(self.endpoint.base().to_string(), e)
            } else {
                CustomError::RequestError(url.to_string(), e)
            }
        })?;
        let status = response.status();
        let text = response.text().await.map_err(CustomError::ReadError)?;

        if !status.is_success() {
            let detail = error_detail(&text);
            warn!("{} {} rejected with {}: {}", method, url, status, detail);
            return Err(CustomError::ApiStatus {
                status: status.as_u16(),
                detail,
            });
        }
        Ok(text)
    }

    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, CustomError> {
        let text = self.send::<()>(Method::GET, url, None).await?;
        des_from_str(&text)
    }

    async fn write<B, T>(&self, method: Method, url: Url, body: &B) -> Result<T, CustomError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let text = self.send(method, url, Some(body)).await?;
        des_from_str(&text)
    }

    async fn delete(&self, url: Url) -> Result<(), CustomError> {
        self.send::<()>(Method::DELETE, url, None).await?;
        Ok(())
    }
}

/// The API reports failures as `{"detail": ...}`; anything else is passed
/// through verbatim.
fn error_detail(body: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(serde_json::Value::Object(map)) => match map.get("detail") {
            Some(serde_json::Value::String(detail)) => detail.clone(),
            Some(other) => other.to_string(),
            None => body.trim().to_string(),
        },
        _ => body.trim().to_string(),
    }
}

#[async_trait]
impl DepositApi for HttpDepositApi {
    async fn customers(&self) -> Result<Vec<Customer>, CustomError> {
        self.get(self.endpoint.collection(CUSTOMERS)?).await
    }

    async fn customer(&self, customer_id: &str) -> Result<Customer, CustomError> {
        self.get(self.endpoint.item(CUSTOMERS, customer_id)?).await
    }

    async fn create_customer(&self, customer: &CustomerCreate) -> Result<Customer, CustomError> {
        self.write(Method::POST, self.endpoint.collection(CUSTOMERS)?, customer)
            .await
    }

    async fn update_customer(
        &self,
        customer_id: &str,
        customer: &CustomerCreate,
    ) -> Result<Customer, CustomError> {
        let url = self.endpoint.item(CUSTOMERS, customer_id)?;
        self.write(Method::PUT, url, customer).await
    }

    async fn delete_customer(&self, customer_id: &str) -> Result<(), CustomError> {
        self.delete(self.endpoint.item(CUSTOMERS, customer_id)?)
            .await
    }

    async fn products(&self) -> Result<Vec<Product>, CustomError> {
        self.get(self.endpoint.collection(PRODUCTS)?).await
    }

    async fn product(&self, product_code: &str) -> Result<Product, CustomError> {
        self.get(self.endpoint.item(PRODUCTS, product_code)?).await
    }

    async fn create_product(&self, product: &ProductCreate) -> Result<Product, CustomError> {
        self.write(Method::POST, self.endpoint.collection(PRODUCTS)?, product)
            .await
    }

    async fn update_product(
        &self,
        product_code: &str,
        product: &ProductCreate,
    ) -> Result<Product, CustomError> {
        let url = self.endpoint.item(PRODUCTS, product_code)?;
        self.write(Method::PUT, url, product).await
    }

    async fn delete_product(&self, product_code: &str) -> Result<(), CustomError> {
        self.delete(self.endpoint.item(PRODUCTS, product_code)?)
            .await
    }

    async fn accounts(&self) -> Result<Vec<Account>, CustomError> {
        self.get(self.endpoint.collection(ACCOUNTS)?).await
    }

    async fn account(&self, account_number: &str) -> Result<Account, CustomError> {
        self.get(self.endpoint.item(ACCOUNTS, account_number)?)
            .await
    }

    async fn create_account(&self, account: &AccountCreateRequest) -> Result<Account, CustomError> {
        self.write(Method::POST, self.endpoint.collection(ACCOUNTS)?, account)
            .await
    }

    async fn update_account(
        &self,
        account_number: &str,
        account: &AccountCreateRequest,
    ) -> Result<Account, CustomError> {
        let url = self.endpoint.item(ACCOUNTS, account_number)?;
        self.write(Method::PUT, url, account).await
    }

    async fn delete_account(&self, account_number: &str) -> Result<(), CustomError> {
        self.delete(self.endpoint.item(ACCOUNTS, account_number)?)
            .await
    }

    async fn account_transactions(
        &self,
        account_number: &str,
    ) -> Result<Vec<Transaction>, CustomError> {
        let url = self
            .endpoint
            .nested(ACCOUNTS, account_number, TRANSACTIONS)?;
        self.get(url).await
    }

    async fn transactions(&self) -> Result<Vec<Transaction>, CustomError> {
        self.get(self.endpoint.collection(TRANSACTIONS)?).await
    }

    async fn create_transaction(
        &self,
        transaction: &TransactionCreate,
    ) -> Result<Transaction, CustomError> {
        let url = self.endpoint.collection(TRANSACTIONS)?;
        self.write(Method::POST, url, transaction).await
    }

    async fn delete_transaction(&self, transaction_id: i64) -> Result<(), CustomError> {
        let url = self
            .endpoint
            .item(TRANSACTIONS, &transaction_id.to_string())?;
        self.delete(url).await
    }
}
