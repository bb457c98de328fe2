//! Per-screen state with reducer-style updates. Nothing in here draws or
//! reads the terminal; the views in `cli` translate keys into events.

pub mod checkout;
pub mod signup;
pub mod storefront;

use checkout::CheckoutParams;

/// Blocking message box. While one is showing the screen only accepts an
/// acknowledgement.
#[derive(Debug, Clone, PartialEq)]
pub struct Dialog {
    pub title: String,
    pub message: String,
}

impl Dialog {
    pub fn new(title: &str, message: impl Into<String>) -> Self {
        Self {
            title: title.to_string(),
            message: message.into(),
        }
    }
}

/// What a screen asks the app loop to do after handling an event.
#[derive(Debug, Clone, PartialEq)]
pub enum Navigate {
    Stay,
    Catalog,
    Checkout(CheckoutParams),
    Quit,
}
