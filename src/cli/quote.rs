use colored::Colorize;
use comfy_table::{Cell, Table};
use tracing::info;

use crate::calculator::split;
use crate::catalog::Catalog;
use crate::error::{EasyPayError, Result};
use crate::fmt::cedis;
use crate::state::checkout::CheckoutParams;

/// Print the deposit/loan split for one product at one deposit tier.
pub fn run(catalog: &Catalog, product: &str, deposit_pct: u32, firm: Option<u32>) -> Result<()> {
    let product = catalog
        .find_product(product)
        .ok_or_else(|| EasyPayError::UnknownProduct(product.to_string()))?;
    let option = catalog.deposit_for_percent(deposit_pct).ok_or_else(|| {
        let tiers: Vec<&str> = catalog.deposit_options.iter().map(|o| o.label.as_str()).collect();
        EasyPayError::InvalidDeposit(deposit_pct, tiers.join(", "))
    })?;
    let firm = firm
        .map(|id| catalog.loan_firm(id).ok_or(EasyPayError::UnknownLoanFirm(id)))
        .transpose()?;

    let params = CheckoutParams::from_product(product);
    let amounts = split(params.price_value(), Some(option.value));
    info!(product = %product.name, deposit_pct, "quote");

    let mut table = Table::new();
    table.set_header(vec!["", "Amount"]);
    table.add_row(vec![Cell::new("Price"), Cell::new(&product.price)]);
    table.add_row(vec![
        Cell::new(format!("Initial Deposit ({})", option.label)),
        Cell::new(cedis(amounts.deposit)),
    ]);
    table.add_row(vec![Cell::new("Loan Amount".bold()), Cell::new(cedis(amounts.remaining))]);
    if let Some(f) = firm {
        table.add_row(vec![
            Cell::new("Loan Firm"),
            Cell::new(format!("{} ({})", f.name, f.interest_rate)),
        ]);
    }

    println!("{}\n{table}", product.name.green().bold());
    Ok(())
}
