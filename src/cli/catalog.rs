use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::calculator::parse_price;
use crate::catalog::Catalog;
use crate::error::Result;
use crate::fmt::cedis;

pub fn products(catalog: &Catalog, search: Option<&str>) -> Result<()> {
    let query = search.unwrap_or("");
    let hits = catalog.filter(query);
    if hits.is_empty() {
        println!("No products match \"{query}\".");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Product", "Description", "Price"]);
    for p in &hits {
        table.add_row(vec![
            Cell::new(p.id),
            Cell::new(&p.name),
            Cell::new(&p.description),
            Cell::new(&p.price),
        ]);
    }
    let total: f64 = hits.iter().map(|p| parse_price(&p.price)).sum();
    println!("{}\n{table}", "Products".bold());
    println!("{} item(s), {} in total", hits.len(), cedis(total));
    Ok(())
}

pub fn firms(catalog: &Catalog) -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["ID", "", "Loan Firm", "Interest Rate"]);
    for f in &catalog.loan_firms {
        table.add_row(vec![
            Cell::new(f.id),
            Cell::new(&f.logo),
            Cell::new(&f.name),
            Cell::new(&f.interest_rate),
        ]);
    }
    let tiers: Vec<&str> = catalog.deposit_options.iter().map(|o| o.label.as_str()).collect();
    println!("{}\n{table}", "Loan Firms".bold());
    println!("Deposit options: {}", tiers.join(", "));
    Ok(())
}
