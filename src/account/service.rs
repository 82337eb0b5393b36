use std::sync::Arc;

use tracing::{info, warn};

use super::composer::AccountDraftComposer;
use super::lookup::Directory;
use super::model::{Account, AccountCreateRequest};
use crate::client::DepositApi;
use crate::error::CustomError;

/// Account-opening workflow: lookups, draft, submission.
pub struct AccountService<A: DepositApi> {
    api: Arc<A>,
    directory: Directory,
    composer: AccountDraftComposer,
}

impl<A: DepositApi> AccountService<A> {
    pub fn new(api: Arc<A>) -> Self {
        AccountService {
            api,
            directory: Directory::default(),
            composer: AccountDraftComposer::new(),
        }
    }

    pub async fn load_lookups(&mut self) -> Result<(), CustomError> {
        let customers = self.api.customers().await?;
        let products = self.api.products().await?;
        info!(
            "loaded {} customers and {} products",
            customers.len(),
            products.len()
        );
        self.directory = Directory::new(customers, products);
        Ok(())
    }

    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    pub fn composer(&self) -> &AccountDraftComposer {
        &self.composer
    }

    pub fn composer_mut(&mut self) -> &mut AccountDraftComposer {
        &mut self.composer
    }

    pub fn select_customer(&mut self, customer_id: &str) {
        self.composer
            .select_customer(customer_id, &self.directory.customers);
    }

    pub fn select_product(&mut self, product_code: &str) {
        self.composer
            .select_product(product_code, &self.directory.products);
    }

    /// Like the two selects, but reports which id the lookups do not know.
    pub fn select(&mut self, customer_id: &str, product_code: &str) -> Result<(), CustomError> {
        if !self.directory.customers.contains_key(customer_id) {
            return Err(CustomError::UnknownCustomer(customer_id.to_string()));
        }
        if !self.directory.products.contains_key(product_code) {
            return Err(CustomError::UnknownProduct(product_code.to_string()));
        }
        self.select_customer(customer_id);
        self.select_product(product_code);
        Ok(())
    }

    /// Posts the draft. The draft is cleared only when the API accepts it.
    pub async fn submit(&mut self) -> Result<Account, CustomError> {
        if !self.composer.is_submittable() {
            return Err(CustomError::NotSubmittable);
        }
        let payload = self.composer.build_submission_payload()?;
        payload.validate().map_err(CustomError::ValidationError)?;

        match self.api.create_account(&payload).await {
            Ok(account) => {
                info!(
                    "opened account {} for customer {} with {}",
                    account.account_number, account.customer_id, account.initial_deposit_amount
                );
                self.composer.reset();
                Ok(account)
            }
            Err(err) => {
                warn!("account creation failed: {:?}", err);
                Err(err)
            }
        }
    }

    pub fn cancel(&mut self) {
        self.composer.reset();
    }

    pub async fn accounts(&self) -> Result<Vec<Account>, CustomError> {
        self.api.accounts().await
    }

    /// Fetches the account, applies `edit` and writes it back after validation.
    pub async fn update<F>(&self, account_number: &str, edit: F) -> Result<Account, CustomError>
    where
        F: FnOnce(&mut AccountCreateRequest),
    {
        let current = self.api.account(account_number).await?;
        let mut request = AccountCreateRequest::from(&current);
        edit(&mut request);
        request.validate().map_err(CustomError::ValidationError)?;
        let account = self.api.update_account(account_number, &request).await?;
        info!("updated account {}", account_number);
        Ok(account)
    }

    pub async fn delete(&self, account_number: &str) -> Result<(), CustomError> {
        self.api.delete_account(account_number).await?;
        info!("deleted account {}", account_number);
        Ok(())
    }
}
