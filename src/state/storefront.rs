use tracing::debug;

use super::checkout::CheckoutParams;
use super::Navigate;
use crate::catalog::Catalog;
use crate::models::{PaymentDetails, Profile};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Profile,
    Products,
    Transactions,
    Settings,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Profile, Tab::Products, Tab::Transactions, Tab::Settings];

    pub fn label(self) -> &'static str {
        match self {
            Tab::Profile => "Profile",
            Tab::Products => "Products",
            Tab::Transactions => "Transactions",
            Tab::Settings => "Settings",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Tab::Profile => "👤",
            Tab::Products => "🛍️",
            Tab::Transactions => "💳",
            Tab::Settings => "⚙️",
        }
    }

    pub fn badge(self) -> Option<u32> {
        match self {
            Tab::Transactions => Some(4),
            _ => None,
        }
    }

    fn index(self) -> usize {
        Tab::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum StorefrontEvent {
    SelectTab(Tab),
    NextTab,
    PrevTab,
    SetQuery(String),
    MoveSelection(isize),
    Buy,
    ToggleEditBio,
    ToggleEditPayment,
}

pub struct StorefrontState {
    tab: Tab,
    query: String,
    selected: usize,
    pub profile: Profile,
    pub payment: PaymentDetails,
    editing_bio: bool,
    editing_payment: bool,
}

impl Default for StorefrontState {
    fn default() -> Self {
        Self {
            tab: Tab::Products,
            query: String::new(),
            selected: 0,
            profile: Profile::default(),
            payment: PaymentDetails::default(),
            editing_bio: false,
            editing_payment: false,
        }
    }
}

impl StorefrontState {
    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn editing_bio(&self) -> bool {
        self.editing_bio
    }

    pub fn editing_payment(&self) -> bool {
        self.editing_payment
    }

    pub fn apply(&mut self, event: StorefrontEvent, catalog: &Catalog) -> Navigate {
        match event {
            StorefrontEvent::SelectTab(tab) => self.tab = tab,
            StorefrontEvent::NextTab => {
                self.tab = Tab::ALL[(self.tab.index() + 1) % Tab::ALL.len()];
            }
            StorefrontEvent::PrevTab => {
                let n = Tab::ALL.len();
                self.tab = Tab::ALL[(self.tab.index() + n - 1) % n];
            }
            StorefrontEvent::SetQuery(query) => {
                // The search box only exists on the products tab.
                if self.tab == Tab::Products {
                    self.query = query;
                    self.selected = 0;
                }
            }
            StorefrontEvent::MoveSelection(delta) => {
                let count = catalog.filter(&self.query).len();
                if count > 0 {
                    let next = self.selected as isize + delta;
                    self.selected = next.clamp(0, count as isize - 1) as usize;
                }
            }
            StorefrontEvent::Buy => {
                if self.tab != Tab::Products {
                    return Navigate::Stay;
                }
                if let Some(product) = catalog.filter(&self.query).get(self.selected) {
                    debug!(product = %product.name, "buy now");
                    return Navigate::Checkout(CheckoutParams::from_product(product));
                }
            }
            StorefrontEvent::ToggleEditBio => {
                if self.tab == Tab::Profile {
                    self.editing_bio = !self.editing_bio;
                }
            }
            StorefrontEvent::ToggleEditPayment => {
                if self.tab == Tab::Profile {
                    self.editing_payment = !self.editing_payment;
                }
            }
        }
        Navigate::Stay
    }
}
