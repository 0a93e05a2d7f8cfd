use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::format_rupiah;

/// The two externally observable states of the quote form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuoteState {
    /// Total computed, deep link live.
    Valid,
    /// Zero price, no link.
    Invalid,
}

/// Output of [`QuoteEngine::recompute`](crate::calculations::QuoteEngine::recompute).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteResult {
    /// Whole currency units. Zero whenever the quote is invalid.
    pub total: Decimal,
    pub is_valid: bool,
    /// `total` rendered for display, e.g. `Rp 155.000`.
    pub display_price: String,
    /// Prefilled messaging link. Present iff `is_valid`.
    pub link: Option<String>,
}

impl QuoteResult {
    /// The zero-total, link-less result shown for incomplete selections.
    pub fn invalid() -> Self {
        Self {
            total: Decimal::ZERO,
            is_valid: false,
            display_price: format_rupiah(Decimal::ZERO),
            link: None,
        }
    }

    pub fn state(&self) -> QuoteState {
        if self.is_valid {
            QuoteState::Valid
        } else {
            QuoteState::Invalid
        }
    }
}
