use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u32,
    pub name: String,
    /// Display price as shown on the card, e.g. "GH₵ 15,999".
    pub price: String,
    pub image: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanFirm {
    pub id: u32,
    pub name: String,
    pub logo: String,
    /// Cosmetic only; never used in any calculation.
    pub interest_rate: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepositOption {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub date_of_birth: String,
    pub hometown: String,
    pub ghana_card: String,
}

impl Profile {
    /// Uppercase first letter of each word in the name: "John Doe" -> "JD".
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|w| w.chars().next())
            .flat_map(char::to_uppercase)
            .collect()
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: "John Doe".to_string(),
            email: "john.doe@example.com".to_string(),
            phone: "+233 24 123 4567".to_string(),
            date_of_birth: "15/03/1990".to_string(),
            hometown: "Accra".to_string(),
            ghana_card: "GHA-123456789-0".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaymentDetails {
    pub card_number: String,
    pub bank_name: String,
    pub account_type: String,
}

impl Default for PaymentDetails {
    fn default() -> Self {
        Self {
            card_number: "**** **** **** 1234".to_string(),
            bank_name: "Fidelity Bank Ghana".to_string(),
            account_type: "Savings".to_string(),
        }
    }
}
