use std::collections::HashMap;

use crate::customer::model::Customer;
use crate::product::model::Product;

pub trait CustomerLookup {
    fn customer(&self, customer_id: &str) -> Option<&Customer>;
}

pub trait ProductLookup {
    fn product(&self, product_code: &str) -> Option<&Product>;
}

impl CustomerLookup for HashMap<String, Customer> {
    fn customer(&self, customer_id: &str) -> Option<&Customer> {
        self.get(customer_id)
    }
}

impl CustomerLookup for [Customer] {
    fn customer(&self, customer_id: &str) -> Option<&Customer> {
        self.iter().find(|c| c.customer_id == customer_id)
    }
}

impl CustomerLookup for Vec<Customer> {
    fn customer(&self, customer_id: &str) -> Option<&Customer> {
        self.as_slice().customer(customer_id)
    }
}

impl ProductLookup for HashMap<String, Product> {
    fn product(&self, product_code: &str) -> Option<&Product> {
        self.get(product_code)
    }
}

impl ProductLookup for [Product] {
    fn product(&self, product_code: &str) -> Option<&Product> {
        self.iter().find(|p| p.product_code == product_code)
    }
}

impl ProductLookup for Vec<Product> {
    fn product(&self, product_code: &str) -> Option<&Product> {
        self.as_slice().product(product_code)
    }
}

/// Customers and products as loaded for the account-opening form.
#[derive(Debug, Default, Clone)]
pub struct Directory {
    pub customers: HashMap<String, Customer>,
    pub products: HashMap<String, Product>,
}

impl Directory {
    pub fn new(customers: Vec<Customer>, products: Vec<Product>) -> Self {
        Self {
            customers: customers
                .into_iter()
                .map(|c| (c.customer_id.clone(), c))
                .collect(),
            products: products
                .into_iter()
                .map(|p| (p.product_code.clone(), p))
                .collect(),
        }
    }

    /// Products whose eligible customer type matches the given customer.
    pub fn eligible_products(&self, customer_id: &str) -> Vec<&Product> {
        let Some(customer) = self.customers.customer(customer_id) else {
            return Vec::new();
        };
        let mut products: Vec<&Product> = self
            .products
            .values()
            .filter(|p| p.eligible_customer_type == customer.customer_type)
            .collect();
        products.sort_by(|a, b| a.product_code.cmp(&b.product_code));
        products
    }
}
