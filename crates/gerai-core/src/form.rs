//! Record form validation
//!
//! Turns raw user input into a [`RecordDraft`]. Validation happens before
//! any mutation, so a rejected form leaves every collection untouched.

use thiserror::Error;

use crate::models::RecordDraft;

/// Reasons a form is rejected
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// One or more required fields are blank
    #[error("Missing required field(s): {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("Stock quantity must be a whole number of 0 or more, got '{0}'")]
    InvalidQuantity(String),

    #[error("Cost price must be a valid number of 0 or more, got '{0}'")]
    InvalidCostPrice(String),

    #[error("Sell price must be a valid number of 0 or more, got '{0}'")]
    InvalidSellPrice(String),
}

/// Raw, unvalidated input for a new record
#[derive(Debug, Clone, Default)]
pub struct RecordForm {
    pub name: String,
    pub vendor: String,
    pub stock_quantity: String,
    pub cost_price: String,
    pub sell_price: String,
    pub image_url: String,
    pub notes: String,
}

impl RecordForm {
    /// Validate the form and produce a draft
    ///
    /// All blank required fields are reported together. Optional fields that
    /// are blank become absent rather than zero.
    pub fn validate(&self) -> Result<RecordDraft, ValidationError> {
        let name = self.name.trim();
        let vendor = self.vendor.trim();
        let quantity = self.stock_quantity.trim();

        let required = [
            ("name", name),
            ("vendor", vendor),
            ("stock quantity", quantity),
        ];
        let missing: Vec<&'static str> = required
            .into_iter()
            .filter(|(_, value)| value.is_empty())
            .map(|(field, _)| field)
            .collect();
        if !missing.is_empty() {
            return Err(ValidationError::MissingFields(missing));
        }

        let stock_quantity: u32 = quantity
            .parse()
            .map_err(|_| ValidationError::InvalidQuantity(quantity.to_string()))?;

        let cost_price = parse_price(&self.cost_price)
            .map_err(|_| ValidationError::InvalidCostPrice(self.cost_price.trim().to_string()))?;
        let sell_price = parse_price(&self.sell_price)
            .map_err(|_| ValidationError::InvalidSellPrice(self.sell_price.trim().to_string()))?;

        Ok(RecordDraft {
            name: name.to_string(),
            vendor: vendor.to_string(),
            stock_quantity,
            cost_price,
            sell_price,
            image_url: non_empty(&self.image_url),
            notes: non_empty(&self.notes),
        })
    }
}

/// Parse an optional price; blank is `None`, anything else must be a finite
/// non-negative number
fn parse_price(raw: &str) -> Result<Option<f64>, ()> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Ok(Some(value)),
        _ => Err(()),
    }
}

fn non_empty(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
