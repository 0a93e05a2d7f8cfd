//! The quote calculator behind the "get quote" button.
//!
//! # Pricing
//!
//! | Step | Value |
//! |------|-------|
//! | 1    | Service base price × motor category multiplier |
//! | 2    | Step 1 rounded to a whole unit, half up |
//! | 3    | Sum of the prices of all active add-ons |
//! | 4    | Total (Step 2 + Step 3) |
//!
//! The quote is valid only when a priced service and a motor category with a
//! multiplier are both selected and the total is above zero. Anything else
//! yields the zero-total invalid result; nothing here returns an error.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use repaint_core::calculations::QuoteEngine;
//! use repaint_core::{AddOnOption, ContactConfig, MotorCategoryOption, QuoteSelection, ServiceOption};
//!
//! let contact = ContactConfig::default();
//! let engine = QuoteEngine::new(&contact);
//!
//! let selection = QuoteSelection::empty()
//!     .with_service(ServiceOption::new("full-body", "Repaint Full Body", Some(dec!(100000))))
//!     .with_motor(MotorCategoryOption::new("sport", "Sport 150cc+", Some(dec!(1.2))))
//!     .with_add_on(AddOnOption::new("coating", "Coating Ceramic", Some(dec!(20000))))
//!     .with_add_on(AddOnOption::new("decal", "Decal Custom", Some(dec!(15000))));
//!
//! let result = engine.recompute(&selection);
//!
//! assert_eq!(result.total, dec!(155000));
//! assert!(result.is_valid);
//! assert!(result.link.unwrap().starts_with("https://api.whatsapp.com/send?phone="));
//! ```

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::debug;

use crate::calculations::common::{format_rupiah, round_whole_half_up};
use crate::models::{
    AddOnOption, ContactConfig, MotorCategoryOption, QuoteResult, QuoteSelection, ServiceOption,
};

const SUMMARY_HEADER: &str = "📋 Detail Pesanan:";
const SERVICE_LABEL: &str = "• Layanan: ";
const MOTOR_LABEL: &str = "• Jenis Motor: ";
const ADD_ON_HEADER: &str = "• Layanan Tambahan:";
const ADD_ON_BULLET: &str = "  - ";
const PRICE_LABEL: &str = "💰 Estimasi Harga: ";
const CLOSING_PROMPT: &str = "Bisa diproses lebih lanjut?";

/// Errors returned when an order summary is requested for a quote that
/// cannot be sent.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuoteMessageError {
    /// The quote result is not valid.
    #[error("quote is not valid")]
    InvalidQuote,

    /// No service is selected.
    #[error("no service selected")]
    MissingService,

    /// No motor category is selected.
    #[error("no motor category selected")]
    MissingMotor,
}

/// Calculator for quotes and their messaging deep links.
#[derive(Debug, Clone)]
pub struct QuoteEngine<'a> {
    contact: &'a ContactConfig,
}

impl<'a> QuoteEngine<'a> {
    /// Creates an engine that addresses links to `contact`.
    pub fn new(contact: &'a ContactConfig) -> Self {
        Self { contact }
    }

    /// Projects the current selection onto a displayed price and link.
    ///
    /// Calling this twice with the same selection yields equal results; the
    /// link is rebuilt from scratch every time so it can never go stale.
    pub fn recompute(
        &self,
        selection: &QuoteSelection,
    ) -> QuoteResult {
        let priced = (
            self.priced_service(selection),
            self.priced_motor(selection),
        );
        let (Some(service), Some(motor)) = priced else {
            debug!("quote incomplete: service or motor category missing");
            return QuoteResult::invalid();
        };

        let Some(total) = self.total(service, motor, selection.active_add_ons()) else {
            debug!(service = %service.id, motor = %motor.id, "quote total overflows");
            return QuoteResult::invalid();
        };
        if total <= Decimal::ZERO {
            debug!(%total, "quote total is not positive");
            return QuoteResult::invalid();
        }

        let display_price = format_rupiah(total);
        let summary = self.compose_summary(service, motor, selection.active_add_ons(), &display_price);
        let link = self.deep_link(&encode_message(&summary));

        debug!(
            %total,
            service = %service.id,
            motor = %motor.id,
            add_ons = selection.active_add_ons().len(),
            "quote recomputed"
        );

        QuoteResult {
            total,
            is_valid: true,
            display_price,
            link: Some(link),
        }
    }

    /// Returns the plain-text order summary for a valid quote.
    ///
    /// # Errors
    ///
    /// Returns [`QuoteMessageError`] if `result` is invalid or the selection
    /// is missing its service or motor category.
    pub fn quote_summary(
        &self,
        result: &QuoteResult,
        selection: &QuoteSelection,
    ) -> Result<String, QuoteMessageError> {
        if !result.is_valid {
            return Err(QuoteMessageError::InvalidQuote);
        }
        let service = selection
            .service
            .as_ref()
            .ok_or(QuoteMessageError::MissingService)?;
        let motor = selection
            .motor
            .as_ref()
            .ok_or(QuoteMessageError::MissingMotor)?;

        Ok(self.compose_summary(
            service,
            motor,
            selection.active_add_ons(),
            &result.display_price,
        ))
    }

    /// Returns the order summary percent-encoded for a query string.
    ///
    /// # Errors
    ///
    /// Same as [`quote_summary`](Self::quote_summary).
    pub fn build_quote_message(
        &self,
        result: &QuoteResult,
        selection: &QuoteSelection,
    ) -> Result<String, QuoteMessageError> {
        self.quote_summary(result, selection)
            .map(|summary| encode_message(&summary))
    }

    /// Embeds an already-encoded message into the messaging endpoint URL.
    pub fn deep_link(
        &self,
        encoded_message: &str,
    ) -> String {
        format!(
            "{}?phone={}&text={}",
            self.contact.endpoint, self.contact.phone, encoded_message
        )
    }

    /// The selected service, if it carries a base price.
    fn priced_service<'s>(
        &self,
        selection: &'s QuoteSelection,
    ) -> Option<&'s ServiceOption> {
        selection.service.as_ref().filter(|s| s.base_price.is_some())
    }

    /// The selected motor category, if it carries a multiplier.
    fn priced_motor<'s>(
        &self,
        selection: &'s QuoteSelection,
    ) -> Option<&'s MotorCategoryOption> {
        selection.motor.as_ref().filter(|m| m.multiplier.is_some())
    }

    /// Calculates the total for a complete selection, or `None` if it does
    /// not fit in a `Decimal`.
    fn total(
        &self,
        service: &ServiceOption,
        motor: &MotorCategoryOption,
        add_ons: &[AddOnOption],
    ) -> Option<Decimal> {
        let base_price = service.base_price.unwrap_or(Decimal::ZERO);
        let multiplier = motor.multiplier.unwrap_or(Decimal::ZERO);
        let painted = round_whole_half_up(base_price.checked_mul(multiplier)?);
        painted.checked_add(self.add_on_total(add_ons)?)
    }

    /// Sums the active add-ons. Add-ons without a price count as zero.
    fn add_on_total(
        &self,
        add_ons: &[AddOnOption],
    ) -> Option<Decimal> {
        add_ons
            .iter()
            .filter_map(|a| a.price)
            .try_fold(Decimal::ZERO, |sum, price| sum.checked_add(price))
    }

    fn compose_summary(
        &self,
        service: &ServiceOption,
        motor: &MotorCategoryOption,
        add_ons: &[AddOnOption],
        display_price: &str,
    ) -> String {
        let mut lines = vec![
            format!(
                "Halo {}, saya tertarik dengan penawaran berikut:",
                self.contact.business_name
            ),
            String::new(),
            SUMMARY_HEADER.to_string(),
            format!("{SERVICE_LABEL}{}", service.display_name),
            format!("{MOTOR_LABEL}{}", motor.display_name),
        ];

        if !add_ons.is_empty() {
            lines.push(ADD_ON_HEADER.to_string());
            lines.extend(
                add_ons
                    .iter()
                    .map(|a| format!("{ADD_ON_BULLET}{}", a.display_name)),
            );
        }

        lines.push(String::new());
        lines.push(format!("{PRICE_LABEL}{display_price}"));
        lines.push(String::new());
        lines.push(CLOSING_PROMPT.to_string());

        lines.join("\n")
    }
}

/// Percent-encodes every byte outside the unreserved set, including
/// newlines and multi-byte glyphs.
fn encode_message(message: &str) -> String {
    urlencoding::encode(message).into_owned()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::QuoteState;

    fn full_body() -> ServiceOption {
        ServiceOption::new("full-body", "Repaint Full Body", Some(dec!(100000)))
    }

    fn sport() -> MotorCategoryOption {
        MotorCategoryOption::new("sport", "Sport 150cc+", Some(dec!(1.2)))
    }

    fn coating() -> AddOnOption {
        AddOnOption::new("coating", "Coating Ceramic", Some(dec!(20000)))
    }

    fn decal() -> AddOnOption {
        AddOnOption::new("decal", "Decal Custom", Some(dec!(15000)))
    }

    fn complete_selection() -> QuoteSelection {
        QuoteSelection::empty()
            .with_service(full_body())
            .with_motor(sport())
    }

    fn decoded_text(link: &str) -> String {
        let encoded = link
            .split("&text=")
            .nth(1)
            .expect("link should carry a text parameter");
        urlencoding::decode(encoded)
            .expect("text should be valid percent-encoded UTF-8")
            .into_owned()
    }

    // =========================================================================
    // recompute: validity
    // =========================================================================

    #[test]
    fn empty_selection_is_invalid_with_zero_total() {
        let contact = ContactConfig::default();
        let engine = QuoteEngine::new(&contact);

        let result = engine.recompute(&QuoteSelection::empty());

        assert_eq!(result, QuoteResult::invalid());
        assert_eq!(result.total, Decimal::ZERO);
        assert!(!result.is_valid);
        assert!(result.link.is_none());
        assert_eq!(result.display_price, "Rp\u{a0}0");
        assert_eq!(result.state(), QuoteState::Invalid);
    }

    #[test]
    fn service_without_motor_is_invalid() {
        let contact = ContactConfig::default();
        let engine = QuoteEngine::new(&contact);

        let selection = QuoteSelection::empty().with_service(full_body());

        assert_eq!(engine.recompute(&selection), QuoteResult::invalid());
    }

    #[test]
    fn add_ons_alone_do_not_make_a_quote_valid() {
        let contact = ContactConfig::default();
        let engine = QuoteEngine::new(&contact);

        let selection = QuoteSelection::empty()
            .with_add_on(coating())
            .with_add_on(decal());

        assert_eq!(engine.recompute(&selection), QuoteResult::invalid());
    }

    #[test]
    fn service_without_price_is_treated_as_unselected() {
        let contact = ContactConfig::default();
        let engine = QuoteEngine::new(&contact);

        let selection = QuoteSelection::empty()
            .with_service(ServiceOption::new("mystery", "Mystery", None))
            .with_motor(sport())
            .with_add_on(coating());

        assert_eq!(engine.recompute(&selection), QuoteResult::invalid());
    }

    #[test]
    fn motor_without_multiplier_is_treated_as_unselected() {
        let contact = ContactConfig::default();
        let engine = QuoteEngine::new(&contact);

        let selection = QuoteSelection::empty()
            .with_service(full_body())
            .with_motor(MotorCategoryOption::new("unknown", "Unknown", None));

        assert_eq!(engine.recompute(&selection), QuoteResult::invalid());
    }

    #[test]
    fn zero_priced_selection_is_invalid() {
        let contact = ContactConfig::default();
        let engine = QuoteEngine::new(&contact);

        let selection = QuoteSelection::empty()
            .with_service(ServiceOption::new("consult", "Konsultasi", Some(dec!(0))))
            .with_motor(sport());

        let result = engine.recompute(&selection);

        assert!(!result.is_valid);
        assert_eq!(result.total, Decimal::ZERO);
        assert!(result.link.is_none());
    }

    #[test]
    fn overflowing_product_is_invalid() {
        let contact = ContactConfig::default();
        let engine = QuoteEngine::new(&contact);

        let selection = QuoteSelection::empty()
            .with_service(ServiceOption::new("emas", "Lapis Emas", Some(Decimal::MAX)))
            .with_motor(MotorCategoryOption::new("moge", "Moge", Some(dec!(2))));

        let result = engine.recompute(&selection);

        assert_eq!(result, QuoteResult::invalid());
    }

    #[test]
    fn overflowing_add_on_sum_is_invalid() {
        let contact = ContactConfig::default();
        let engine = QuoteEngine::new(&contact);

        let selection = QuoteSelection::empty()
            .with_service(ServiceOption::new("velg", "Repaint Velg", Some(dec!(1))))
            .with_motor(MotorCategoryOption::new("bebek", "Bebek", Some(dec!(1))))
            .with_add_on(AddOnOption::new("emas", "Lapis Emas", Some(Decimal::MAX)));

        let result = engine.recompute(&selection);

        assert_eq!(result, QuoteResult::invalid());
    }

    // =========================================================================
    // recompute: arithmetic
    // =========================================================================

    #[test]
    fn base_price_times_multiplier() {
        let contact = ContactConfig::default();
        let engine = QuoteEngine::new(&contact);

        let result = engine.recompute(&complete_selection());

        assert_eq!(result.total, dec!(120000));
        assert!(result.is_valid);
        assert_eq!(result.display_price, "Rp\u{a0}120.000");
        assert_eq!(result.state(), QuoteState::Valid);
    }

    #[test]
    fn add_ons_are_added_after_scaling() {
        let contact = ContactConfig::default();
        let engine = QuoteEngine::new(&contact);

        let selection = complete_selection()
            .with_add_on(coating())
            .with_add_on(decal());

        let result = engine.recompute(&selection);

        assert_eq!(result.total, dec!(155000));
        assert_eq!(result.display_price, "Rp\u{a0}155.000");
    }

    #[test]
    fn add_on_without_price_contributes_zero() {
        let contact = ContactConfig::default();
        let engine = QuoteEngine::new(&contact);

        let selection = complete_selection()
            .with_add_on(AddOnOption::new("wash", "Cuci Gratis", None));

        let result = engine.recompute(&selection);

        assert_eq!(result.total, dec!(120000));
        assert!(result.is_valid);
    }

    #[test]
    fn fractional_product_rounds_half_up() {
        let contact = ContactConfig::default();
        let engine = QuoteEngine::new(&contact);

        let selection = QuoteSelection::empty()
            .with_service(ServiceOption::new("velg", "Repaint Velg", Some(dec!(350001))))
            .with_motor(MotorCategoryOption::new("bebek", "Bebek", Some(dec!(1.5))));

        // 350001 × 1.5 = 525001.5
        assert_eq!(engine.recompute(&selection).total, dec!(525002));
    }

    #[test]
    fn fractional_product_below_midpoint_rounds_down() {
        let contact = ContactConfig::default();
        let engine = QuoteEngine::new(&contact);

        let selection = QuoteSelection::empty()
            .with_service(ServiceOption::new("velg", "Repaint Velg", Some(dec!(100001))))
            .with_motor(MotorCategoryOption::new("matic", "Matic", Some(dec!(1.25))));

        // 100001 × 1.25 = 125001.25
        assert_eq!(engine.recompute(&selection).total, dec!(125001));
    }

    // =========================================================================
    // recompute: state transitions
    // =========================================================================

    #[test]
    fn recompute_is_idempotent() {
        let contact = ContactConfig::default();
        let engine = QuoteEngine::new(&contact);
        let selection = complete_selection().with_add_on(coating());

        let first = engine.recompute(&selection);
        let second = engine.recompute(&selection);

        assert_eq!(first, second);
    }

    #[test]
    fn deselecting_motor_resets_regardless_of_add_ons() {
        let contact = ContactConfig::default();
        let engine = QuoteEngine::new(&contact);
        let mut selection = complete_selection()
            .with_add_on(coating())
            .with_add_on(decal());
        assert!(engine.recompute(&selection).is_valid);

        selection.clear_motor();
        let result = engine.recompute(&selection);

        assert!(!result.is_valid);
        assert_eq!(result.total, Decimal::ZERO);
        assert!(result.link.is_none());
    }

    #[test]
    fn toggling_add_on_off_replaces_link() {
        let contact = ContactConfig::default();
        let engine = QuoteEngine::new(&contact);
        let mut selection = complete_selection().with_add_on(coating());
        let with_coating = engine.recompute(&selection);

        selection.set_add_on(coating(), false);
        let without_coating = engine.recompute(&selection);

        assert_ne!(with_coating.link, without_coating.link);
        let text = decoded_text(without_coating.link.as_deref().unwrap());
        assert!(!text.contains("Coating Ceramic"));
        assert!(text.contains("Rp\u{a0}120.000"));
    }

    // =========================================================================
    // message and link
    // =========================================================================

    #[test]
    fn link_targets_configured_endpoint_and_phone() {
        let contact = ContactConfig {
            business_name: "Bengkel Cat".to_string(),
            phone: "628111222333".to_string(),
            endpoint: "https://wa.example.com/send".to_string(),
        };
        let engine = QuoteEngine::new(&contact);

        let link = engine.recompute(&complete_selection()).link.unwrap();

        assert!(link.starts_with("https://wa.example.com/send?phone=628111222333&text="));
        assert!(decoded_text(&link).starts_with("Halo Bengkel Cat, "));
    }

    #[test]
    fn message_is_fully_percent_encoded() {
        let contact = ContactConfig::default();
        let engine = QuoteEngine::new(&contact);
        let selection = complete_selection().with_add_on(coating());
        let result = engine.recompute(&selection);

        let encoded = engine.build_quote_message(&result, &selection).unwrap();

        assert!(encoded.contains("%0A"), "newlines must be encoded");
        assert!(encoded.contains("%F0%9F%93%8B"), "clipboard glyph must be encoded");
        assert!(encoded.contains("%E2%80%A2"), "bullet glyph must be encoded");
        assert!(!encoded.contains(' '));
        assert!(!encoded.contains('\n'));
        assert!(!encoded.contains('&'));
    }

    #[test]
    fn link_text_matches_build_quote_message() {
        let contact = ContactConfig::default();
        let engine = QuoteEngine::new(&contact);
        let selection = complete_selection().with_add_on(decal());
        let result = engine.recompute(&selection);

        let encoded = engine.build_quote_message(&result, &selection).unwrap();

        assert_eq!(result.link, Some(engine.deep_link(&encoded)));
    }

    #[test]
    fn decoded_message_lists_items_in_order() {
        let contact = ContactConfig::default();
        let engine = QuoteEngine::new(&contact);
        let selection = complete_selection()
            .with_add_on(coating())
            .with_add_on(decal());
        let result = engine.recompute(&selection);

        let encoded = engine.build_quote_message(&result, &selection).unwrap();
        let decoded = urlencoding::decode(&encoded).unwrap().into_owned();

        let positions: Vec<usize> = [
            "Repaint Full Body",
            "Sport 150cc+",
            "Coating Ceramic",
            "Decal Custom",
            "Rp\u{a0}155.000",
            CLOSING_PROMPT,
        ]
        .iter()
        .map(|needle| {
            decoded
                .find(needle)
                .unwrap_or_else(|| panic!("message should contain {needle:?}:\n{decoded}"))
        })
        .collect();

        let mut sorted = positions.clone();
        sorted.sort_unstable();
        assert_eq!(positions, sorted);
        assert!(decoded.ends_with(CLOSING_PROMPT));
    }

    #[test]
    fn summary_layout_with_add_ons() {
        let contact = ContactConfig::default();
        let engine = QuoteEngine::new(&contact);
        let selection = complete_selection().with_add_on(coating());
        let result = engine.recompute(&selection);

        let summary = engine.quote_summary(&result, &selection).unwrap();

        assert_eq!(
            summary,
            "Halo MOTOR REPAINT PRO, saya tertarik dengan penawaran berikut:\n\
             \n\
             📋 Detail Pesanan:\n\
             • Layanan: Repaint Full Body\n\
             • Jenis Motor: Sport 150cc+\n\
             • Layanan Tambahan:\n  - Coating Ceramic\n\
             \n\
             💰 Estimasi Harga: Rp\u{a0}140.000\n\
             \n\
             Bisa diproses lebih lanjut?"
        );
    }

    #[test]
    fn summary_without_add_ons_omits_section() {
        let contact = ContactConfig::default();
        let engine = QuoteEngine::new(&contact);
        let selection = complete_selection();
        let result = engine.recompute(&selection);

        let encoded = engine.build_quote_message(&result, &selection).unwrap();
        let decoded = urlencoding::decode(&encoded).unwrap().into_owned();

        assert!(!decoded.contains(ADD_ON_HEADER));
        assert!(!decoded.lines().any(|line| line.starts_with(ADD_ON_BULLET)));
        assert!(decoded.contains("• Jenis Motor: Sport 150cc+\n\n💰"));
    }

    #[test]
    fn message_for_invalid_quote_is_rejected() {
        let contact = ContactConfig::default();
        let engine = QuoteEngine::new(&contact);

        let result = engine.build_quote_message(&QuoteResult::invalid(), &complete_selection());

        assert_eq!(result, Err(QuoteMessageError::InvalidQuote));
    }

    #[test]
    fn message_requires_service_and_motor() {
        let contact = ContactConfig::default();
        let engine = QuoteEngine::new(&contact);
        let valid = engine.recompute(&complete_selection());

        let no_service = QuoteSelection::empty().with_motor(sport());
        let no_motor = QuoteSelection::empty().with_service(full_body());

        assert_eq!(
            engine.quote_summary(&valid, &no_service),
            Err(QuoteMessageError::MissingService)
        );
        assert_eq!(
            engine.quote_summary(&valid, &no_motor),
            Err(QuoteMessageError::MissingMotor)
        );
    }
}
