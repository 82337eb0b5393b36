use std::sync::Arc;

use chrono::NaiveDateTime;
use clap::{Parser, Subcommand};
use deposit_console::account::lookup::Directory;
use deposit_console::account::service::AccountService;
use deposit_console::client::{DepositApi, HttpDepositApi};
use deposit_console::config::init_config;
use deposit_console::customer::model::{CustomerCreate, CustomerType};
use deposit_console::error::CustomError;
use deposit_console::product::model::ProductCreate;
use deposit_console::transaction::ledger::{TransactionDraft, accounts_of_customer};
use deposit_console::transaction::model::TransactionType;
use deposit_console::transaction::service::TransactionService;
use deposit_console::utils::parse_datetime;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "deposit-console", about = "Back-office console for deposit accounts")]
struct Cli {
    /// Base url of the deposit API, e.g. http://localhost:8000
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List customers
    Customers,
    /// Register a customer
    AddCustomer {
        #[arg(long)]
        name: String,
        #[arg(long = "type", default_value = "individual")]
        kind: CustomerType,
        #[arg(long)]
        id_number: String,
    },
    /// Change a customer's details
    UpdateCustomer {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long = "type")]
        kind: Option<CustomerType>,
        #[arg(long)]
        id_number: Option<String>,
    },
    DeleteCustomer { id: String },
    /// Register a product; rates are integer percentages
    AddProduct {
        #[arg(long)]
        code: String,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "individual")]
        eligible: CustomerType,
        #[arg(long, default_value = "1")]
        taxation_code: String,
        #[arg(long)]
        eligible_age: Option<u32>,
        #[arg(long)]
        base_rate: u32,
        #[arg(long, default_value_t = 0)]
        additional_rate: u32,
        #[arg(long)]
        applied_rate: u32,
    },
    /// Change a product's name, taxation or rates
    UpdateProduct {
        code: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        taxation_code: Option<String>,
        #[arg(long)]
        eligible_age: Option<u32>,
        #[arg(long)]
        base_rate: Option<u32>,
        #[arg(long)]
        additional_rate: Option<u32>,
        #[arg(long)]
        applied_rate: Option<u32>,
    },
    DeleteProduct { code: String },
    /// List products, optionally only those a customer may open
    Products {
        #[arg(long)]
        customer: Option<String>,
    },
    /// List accounts, optionally for one customer
    Accounts {
        #[arg(long)]
        customer: Option<String>,
    },
    /// Transaction history of an account, newest first
    Transactions { account: String },
    /// Open a new account
    OpenAccount {
        #[arg(long)]
        customer: String,
        #[arg(long)]
        product: String,
        #[arg(long)]
        cash: String,
        #[arg(long, default_value = "")]
        linked: String,
        #[arg(long)]
        linked_account: Option<String>,
        #[arg(long)]
        password: String,
        #[arg(long)]
        passbook_exempt: bool,
    },
    /// Change an account's password or passbook exemption
    UpdateAccount {
        account: String,
        #[arg(long)]
        password: Option<String>,
        #[arg(long)]
        passbook_exempt: Option<bool>,
    },
    /// Record a deposit or withdrawal
    Record {
        #[arg(long)]
        account: String,
        #[arg(long = "type", default_value = "deposit")]
        kind: TransactionType,
        #[arg(long)]
        amount: String,
        #[arg(long, value_parser = parse_date_arg)]
        date: Option<NaiveDateTime>,
    },
    DeleteAccount { account: String },
    DeleteTransaction { id: i64 },
}

fn parse_date_arg(raw: &str) -> Result<NaiveDateTime, String> {
    parse_datetime(raw).ok_or_else(|| format!("unrecognised date '{raw}'"))
}

async fn run(cli: Cli) -> Result<(), CustomError> {
    let base_url = cli
        .api_url
        .unwrap_or_else(|| init_config().api_base_url.clone());
    let api = Arc::new(HttpDepositApi::new(&base_url)?);

    match cli.command {
        Commands::Customers => {
            for c in api.customers().await? {
                println!(
                    "{}\t{}\t{}\t{}",
                    c.customer_id,
                    c.customer_name,
                    c.customer_type,
                    c.real_name_identification_number
                );
            }
        }
        Commands::AddCustomer {
            name,
            kind,
            id_number,
        } => {
            let create = CustomerCreate {
                customer_name: name,
                customer_type: kind,
                real_name_identification_number: id_number,
            };
            create.validate().map_err(CustomError::ValidationError)?;
            let customer = api.create_customer(&create).await?;
            println!("Registered customer {}", customer.customer_id);
        }
        Commands::AddProduct {
            code,
            name,
            eligible,
            taxation_code,
            eligible_age,
            base_rate,
            additional_rate,
            applied_rate,
        } => {
            let create = ProductCreate {
                product_code: code,
                product_name: name,
                eligible_customer_type: eligible,
                taxation_code,
                eligible_age,
                base_interest_rate: base_rate,
                additional_interest_rate: additional_rate,
                applied_interest_rate: applied_rate,
            };
            create.validate().map_err(CustomError::ValidationError)?;
            let product = api.create_product(&create).await?;
            println!("Registered product {}", product.product_code);
        }
        Commands::UpdateCustomer {
            id,
            name,
            kind,
            id_number,
        } => {
            let mut change = CustomerCreate::from(&api.customer(&id).await?);
            if let Some(name) = name {
                change.customer_name = name;
            }
            if let Some(kind) = kind {
                change.customer_type = kind;
            }
            if let Some(id_number) = id_number {
                change.real_name_identification_number = id_number;
            }
            change.validate().map_err(CustomError::ValidationError)?;
            let customer = api.update_customer(&id, &change).await?;
            println!("Updated customer {}", customer.customer_id);
        }
        Commands::DeleteCustomer { id } => {
            api.delete_customer(&id).await?;
            println!("Deleted customer {id}");
        }
        Commands::UpdateProduct {
            code,
            name,
            taxation_code,
            eligible_age,
            base_rate,
            additional_rate,
            applied_rate,
        } => {
            let mut change = ProductCreate::from(&api.product(&code).await?);
            if let Some(name) = name {
                change.product_name = name;
            }
            if let Some(taxation_code) = taxation_code {
                change.taxation_code = taxation_code;
            }
            if eligible_age.is_some() {
                change.eligible_age = eligible_age;
            }
            change.base_interest_rate = base_rate.unwrap_or(change.base_interest_rate);
            change.additional_interest_rate =
                additional_rate.unwrap_or(change.additional_interest_rate);
            change.applied_interest_rate = applied_rate.unwrap_or(change.applied_interest_rate);
            change.validate().map_err(CustomError::ValidationError)?;
            let product = api.update_product(&code, &change).await?;
            println!("Updated product {}", product.product_code);
        }
        Commands::DeleteProduct { code } => {
            api.delete_product(&code).await?;
            println!("Deleted product {code}");
        }
        Commands::Products { customer } => {
            let mut products = api.products().await?;
            if let Some(id) = customer {
                let directory = Directory::new(api.customers().await?, products);
                products = directory.eligible_products(&id).into_iter().cloned().collect();
            }
            for p in products {
                println!(
                    "{}\t{}\t{}\ttax {}\t{}% + {}% = {}%",
                    p.product_code,
                    p.product_name,
                    p.eligible_customer_type,
                    p.taxation_code,
                    p.base_interest_rate,
                    p.additional_interest_rate,
                    p.applied_interest_rate
                );
            }
        }
        Commands::Accounts { customer } => {
            let accounts = api.accounts().await?;
            let shown = match &customer {
                Some(id) => accounts_of_customer(&accounts, id),
                None => accounts.iter().collect(),
            };
            for a in shown {
                println!(
                    "{}\t{}\t{}\t{}\t{}%",
                    a.account_number,
                    a.customer_id,
                    a.product_code,
                    a.initial_deposit_amount,
                    a.applied_interest_rate
                );
            }
        }
        Commands::Transactions { account } => {
            let svc = TransactionService::new(api);
            for t in svc.history(&account).await? {
                println!(
                    "{}\t{}\t{:?}\t{}\t{}",
                    t.transaction_id,
                    t.transaction_date,
                    t.transaction_type,
                    t.transaction_amount,
                    t.balance_after_transaction
                );
            }
        }
        Commands::OpenAccount {
            customer,
            product,
            cash,
            linked,
            linked_account,
            password,
            passbook_exempt,
        } => {
            let mut svc = AccountService::new(api);
            svc.load_lookups().await?;
            svc.select(&customer, &product)?;
            let composer = svc.composer_mut();
            composer.set_cash_amount(&cash);
            composer.set_linked_substitute_amount(&linked);
            composer.set_linked_substitute_account_number(linked_account.as_deref().unwrap_or(""));
            composer.set_account_password(&password);
            composer.set_passbook_exemption(passbook_exempt);

            let account = svc.submit().await?;
            println!(
                "Opened {} with initial deposit {}",
                account.account_number, account.initial_deposit_amount
            );
        }
        Commands::UpdateAccount {
            account,
            password,
            passbook_exempt,
        } => {
            let updated = AccountService::new(api)
                .update(&account, |req| {
                    if let Some(password) = password {
                        req.account_password = password;
                    }
                    if let Some(exempt) = passbook_exempt {
                        req.passbook_exemption_flag = exempt;
                    }
                })
                .await?;
            println!("Updated {}", updated.account_number);
        }
        Commands::Record {
            account,
            kind,
            amount,
            date,
        } => {
            let mut draft = TransactionDraft::for_account(&account);
            draft.transaction_type = kind;
            draft.transaction_date = date;
            draft.set_amount(&amount);

            let svc = TransactionService::new(api);
            let transaction = svc.record(&draft).await?;
            println!(
                "Recorded #{}: balance now {}",
                transaction.transaction_id, transaction.balance_after_transaction
            );
        }
        Commands::DeleteAccount { account } => {
            AccountService::new(api).delete(&account).await?;
            println!("Deleted {account}");
        }
        Commands::DeleteTransaction { id } => {
            TransactionService::new(api).delete(id).await?;
            println!("Deleted transaction {id}");
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        tracing::debug!("{:?}", e);
        eprintln!("Error: {}", e.user_message());
        std::process::exit(1);
    }
}
