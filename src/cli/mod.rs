pub mod app;
pub mod catalog;
pub mod checkout;
pub mod quote;
pub mod signup;
pub mod storefront;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "easypay", about = "Terminal storefront with installment financing.")]
pub struct Cli {
    /// JSON catalog file to use instead of the built-in products
    #[arg(long, global = true)]
    pub catalog: Option<String>,

    /// Block sign-up steps until their fields pass validation
    #[arg(long, global = true)]
    pub strict: bool,

    /// Open the catalog directly instead of starting with sign-up
    #[arg(long = "skip-signup")]
    pub skip_signup: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List products, optionally filtered by a search query.
    Products {
        /// Case-insensitive text matched against name and description
        #[arg(long)]
        search: Option<String>,
    },
    /// List loan firms and deposit options.
    Firms,
    /// Show the deposit and loan amounts for a product.
    Quote {
        /// Product ID or exact name
        product: String,
        /// Deposit percentage, e.g. 20
        #[arg(long)]
        deposit: u32,
        /// Loan firm ID (shown in `easypay firms`)
        #[arg(long)]
        firm: Option<u32>,
    },
    /// Run only the two-step sign-up wizard.
    Signup,
    /// Write a settings file with default values.
    Init,
}
