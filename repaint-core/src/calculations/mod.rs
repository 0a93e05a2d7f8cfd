//! Pricing and quote-link construction.
//!
//! Everything here is a pure function of the current selection; nothing
//! touches the form controls directly.

pub mod common;
pub mod quote;

pub use quote::{QuoteEngine, QuoteMessageError};
