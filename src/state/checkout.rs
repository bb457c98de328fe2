use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::{debug, info};

use super::{Dialog, Navigate};
use crate::calculator::{self, DepositSplit};
use crate::catalog::Catalog;
use crate::fmt::cedis;
use crate::models::{DepositOption, LoanFirm, Product};

/// The four strings the catalog hands to checkout.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CheckoutParams {
    pub name: String,
    pub price: String,
    pub image: String,
    pub description: String,
}

impl CheckoutParams {
    pub fn from_product(product: &Product) -> Self {
        Self::from_pairs([
            ("name", product.name.as_str()),
            ("price", product.price.as_str()),
            ("image", product.image.as_str()),
            ("description", product.description.as_str()),
        ])
    }

    /// Build from loose key/value pairs. Unknown keys are ignored and missing
    /// ones stay empty.
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            match key {
                "name" => params.name = value.to_string(),
                "price" => params.price = value.to_string(),
                "image" => params.image = value.to_string(),
                "description" => params.description = value.to_string(),
                _ => {}
            }
        }
        params
    }

    pub fn price_value(&self) -> f64 {
        calculator::parse_price(&self.price)
    }
}

#[derive(Debug, Clone, Copy, Error, PartialEq)]
pub enum CheckoutError {
    #[error("Please select an initial deposit amount")]
    NoDeposit,
    #[error("Please select a loan firm")]
    NoLoanFirm,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CheckoutEvent {
    SelectDeposit(f64),
    SelectLoanFirm(u32),
    PlaceOrder,
    Tick,
    Acknowledge,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderConfirmation {
    pub product_name: String,
    pub loan_firm: String,
    pub deposit: f64,
    pub remaining: f64,
}

impl OrderConfirmation {
    pub const TITLE: &'static str = "Order Placed Successfully!";

    pub fn message(&self) -> String {
        format!(
            "Your order for {} has been placed.\n\nInitial Deposit: {}\nLoan Amount: {}",
            self.product_name,
            cedis(self.deposit),
            cedis(self.remaining)
        )
    }
}

struct PendingOrder {
    resolves_at: Instant,
    confirmation: OrderConfirmation,
}

pub struct CheckoutState {
    pub params: CheckoutParams,
    price: f64,
    deposit_options: Vec<DepositOption>,
    loan_firms: Vec<LoanFirm>,
    selected_deposit: Option<f64>,
    selected_loan_firm: Option<u32>,
    delay: Duration,
    pending: Option<PendingOrder>,
    confirmation: Option<OrderConfirmation>,
    alert: Option<CheckoutError>,
}

impl CheckoutState {
    pub fn new(params: CheckoutParams, catalog: &Catalog, delay: Duration) -> Self {
        let price = params.price_value();
        Self {
            params,
            price,
            deposit_options: catalog.deposit_options.clone(),
            loan_firms: catalog.loan_firms.clone(),
            selected_deposit: None,
            selected_loan_firm: None,
            delay,
            pending: None,
            confirmation: None,
            alert: None,
        }
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn deposit_options(&self) -> &[DepositOption] {
        &self.deposit_options
    }

    pub fn loan_firms(&self) -> &[LoanFirm] {
        &self.loan_firms
    }

    pub fn selected_deposit(&self) -> Option<f64> {
        self.selected_deposit
    }

    pub fn selected_loan_firm(&self) -> Option<u32> {
        self.selected_loan_firm
    }

    pub fn split(&self) -> DepositSplit {
        calculator::split(self.price, self.selected_deposit)
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Place Order is enabled only with both choices made and nothing in flight.
    pub fn can_place_order(&self) -> bool {
        self.selected_deposit.is_some() && self.selected_loan_firm.is_some() && !self.is_loading()
    }

    /// The dialog currently blocking input, if any.
    pub fn dialog(&self) -> Option<Dialog> {
        if let Some(err) = self.alert {
            return Some(Dialog::new("Error", err.to_string()));
        }
        self.confirmation
            .as_ref()
            .map(|c| Dialog::new(OrderConfirmation::TITLE, c.message()))
    }

    pub fn apply(&mut self, event: CheckoutEvent, now: Instant) -> Navigate {
        match event {
            CheckoutEvent::SelectDeposit(fraction) => {
                if let Some(opt) = self
                    .deposit_options
                    .iter()
                    .find(|o| (o.value - fraction).abs() < f64::EPSILON)
                {
                    self.selected_deposit = Some(opt.value);
                }
            }
            CheckoutEvent::SelectLoanFirm(id) => {
                if self.loan_firms.iter().any(|f| f.id == id) {
                    self.selected_loan_firm = Some(id);
                }
            }
            CheckoutEvent::PlaceOrder => {
                if let Err(err) = self.place_order(now) {
                    debug!(%err, "order rejected");
                    self.alert = Some(err);
                }
            }
            CheckoutEvent::Tick => self.tick(now),
            CheckoutEvent::Acknowledge => {
                if self.alert.take().is_some() {
                    return Navigate::Stay;
                }
                if self.confirmation.take().is_some() {
                    return Navigate::Catalog;
                }
            }
        }
        Navigate::Stay
    }

    /// Start the simulated order round trip. The amounts in the confirmation
    /// are the ones on screen when the order was placed.
    pub fn place_order(&mut self, now: Instant) -> Result<(), CheckoutError> {
        if self.is_loading() {
            return Ok(());
        }
        let fraction = self.selected_deposit.ok_or(CheckoutError::NoDeposit)?;
        let firm_id = self.selected_loan_firm.ok_or(CheckoutError::NoLoanFirm)?;
        let split = calculator::split(self.price, Some(fraction));
        let loan_firm = self
            .loan_firms
            .iter()
            .find(|f| f.id == firm_id)
            .map(|f| f.name.clone())
            .unwrap_or_default();

        info!(
            product = %self.params.name,
            deposit = split.deposit,
            loan = split.remaining,
            loan_firm = %loan_firm,
            "placing order"
        );
        self.pending = Some(PendingOrder {
            resolves_at: now + self.delay,
            confirmation: OrderConfirmation {
                product_name: self.params.name.clone(),
                loan_firm,
                deposit: split.deposit,
                remaining: split.remaining,
            },
        });
        Ok(())
    }

    fn tick(&mut self, now: Instant) {
        let due = matches!(&self.pending, Some(p) if now >= p.resolves_at);
        if due {
            if let Some(done) = self.pending.take() {
                info!(product = %done.confirmation.product_name, "order placed");
                self.confirmation = Some(done.confirmation);
            }
        }
    }
}
