use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::{EasyPayError, Result};
use crate::models::{DepositOption, LoanFirm, Product};

/// Everything the storefront sells and the financing it offers.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub products: Vec<Product>,
    pub loan_firms: Vec<LoanFirm>,
    pub deposit_options: Vec<DepositOption>,
}

/// On-disk shape of a catalog file. Any omitted table keeps the built-in data.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CatalogFile {
    products: Option<Vec<Product>>,
    loan_firms: Option<Vec<LoanFirm>>,
    deposit_options: Option<Vec<DepositOption>>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            products: default_products(),
            loan_firms: default_loan_firms(),
            deposit_options: default_deposit_options(),
        }
    }
}

impl Catalog {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let file: CatalogFile = serde_json::from_str(&content)?;
        let defaults = Catalog::default();
        let catalog = Self {
            products: file.products.unwrap_or(defaults.products),
            loan_firms: file.loan_firms.unwrap_or(defaults.loan_firms),
            deposit_options: file.deposit_options.unwrap_or(defaults.deposit_options),
        };
        if catalog.deposit_options.iter().any(|o| !(0.0..=1.0).contains(&o.value)) {
            return Err(EasyPayError::Settings(format!(
                "deposit options in {} must be fractions between 0 and 1",
                path.display()
            )));
        }
        debug!(
            path = %path.display(),
            products = catalog.products.len(),
            loan_firms = catalog.loan_firms.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    /// Products whose name or description contains `query`, ignoring case.
    /// An empty query matches everything; catalog order is preserved.
    pub fn filter(&self, query: &str) -> Vec<&Product> {
        let needle = query.to_lowercase();
        self.products
            .iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&needle)
                    || p.description.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Look a product up by numeric id or by case-insensitive exact name.
    pub fn find_product(&self, key: &str) -> Option<&Product> {
        let key = key.trim();
        if let Ok(id) = key.parse::<u32>() {
            if let Some(p) = self.products.iter().find(|p| p.id == id) {
                return Some(p);
            }
        }
        let lowered = key.to_lowercase();
        self.products.iter().find(|p| p.name.to_lowercase() == lowered)
    }

    pub fn loan_firm(&self, id: u32) -> Option<&LoanFirm> {
        self.loan_firms.iter().find(|f| f.id == id)
    }

    /// Find the tier matching a whole percentage, e.g. 20 -> the 0.2 option.
    pub fn deposit_for_percent(&self, pct: u32) -> Option<&DepositOption> {
        self.deposit_options
            .iter()
            .find(|o| (o.value * 100.0).round() as u32 == pct)
    }
}

fn product(id: u32, name: &str, price: &str, photo: &str, description: &str) -> Product {
    Product {
        id,
        name: name.to_string(),
        price: price.to_string(),
        image: format!("https://images.unsplash.com/photo-{photo}?w=400&q=80"),
        description: description.to_string(),
    }
}

fn default_products() -> Vec<Product> {
    vec![
        product(1, "iPhone 15 Pro", "GH₵ 15,999", "1695048133142-1a20484d2569", "Latest iPhone with titanium design"),
        product(2, "MacBook Pro M3", "GH₵ 25,500", "1517336714731-489689fd1ca8", "Powerful laptop for professionals"),
        product(3, "AirPods Pro", "GH₵ 3,499", "1606841837239-c5a1a4a07af7", "Active noise cancellation"),
        product(4, "Samsung Galaxy S24", "GH₵ 12,999", "1610945415295-d9bbf067e59c", "Flagship Android smartphone"),
        product(5, "iPad Pro 12.9\"", "GH₵ 18,999", "1544244015-0df4b3ffc6b0", "Ultimate creative tool"),
        product(6, "Sony WH-1000XM5", "GH₵ 4,899", "1546435770-a3e426bf472b", "Premium wireless headphones"),
        product(7, "Dell XPS 15", "GH₵ 22,000", "1593642632823-8f785ba67e45", "High-performance laptop"),
        product(8, "Apple Watch Ultra", "GH₵ 9,999", "1434494878577-86c23bcb06b9", "Rugged smartwatch"),
    ]
}

fn default_loan_firms() -> Vec<LoanFirm> {
    [
        (1, "Fidelity Bank Ghana", "🏦", "12% p.a."),
        (2, "CalBank", "🏛️", "10% p.a."),
        (3, "Ecobank Ghana", "💳", "11.5% p.a."),
        (4, "Absa Bank Ghana", "🏪", "13% p.a."),
        (5, "Stanbic Bank", "🏢", "9.5% p.a."),
    ]
    .into_iter()
    .map(|(id, name, logo, rate)| LoanFirm {
        id,
        name: name.to_string(),
        logo: logo.to_string(),
        interest_rate: rate.to_string(),
    })
    .collect()
}

fn default_deposit_options() -> Vec<DepositOption> {
    [0.1, 0.2, 0.3, 0.4, 0.5]
        .into_iter()
        .map(|value| DepositOption {
            label: crate::fmt::percent(value),
            value,
        })
        .collect()
}
