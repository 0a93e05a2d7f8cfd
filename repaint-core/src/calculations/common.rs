//! Rounding and currency formatting shared by the quote calculations.

use rust_decimal::{Decimal, RoundingStrategy};

/// Currency symbol placed before every displayed amount.
pub const CURRENCY_SYMBOL: &str = "Rp";

/// Separator between the symbol and the amount. The `id-ID` locale uses a
/// no-break space here.
pub const SYMBOL_SEPARATOR: char = '\u{a0}';

/// Thousands separator for the `id-ID` locale.
pub const GROUP_SEPARATOR: char = '.';

/// Rounds a decimal value to a whole currency unit, half away from zero.
///
/// `base price × multiplier` can be fractional; this is the single rounding
/// step applied to it. For the non-negative amounts the calculator deals
/// with, this is plain round-half-up.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use repaint_core::calculations::common::round_whole_half_up;
///
/// assert_eq!(round_whole_half_up(dec!(120000.4)), dec!(120000));
/// assert_eq!(round_whole_half_up(dec!(120000.5)), dec!(120001));
/// assert_eq!(round_whole_half_up(dec!(-10.5)), dec!(-11)); // Away from zero
/// ```
pub fn round_whole_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Formats an amount as Indonesian Rupiah with no fraction digits.
///
/// Fractions are rounded with [`round_whole_half_up`] before formatting.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use repaint_core::calculations::common::format_rupiah;
///
/// assert_eq!(format_rupiah(dec!(155000)), "Rp\u{a0}155.000");
/// assert_eq!(format_rupiah(dec!(0)), "Rp\u{a0}0");
/// ```
pub fn format_rupiah(amount: Decimal) -> String {
    let rounded = round_whole_half_up(amount);
    let digits = rounded.abs().trunc().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(GROUP_SEPARATOR);
        }
        grouped.push(ch);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    format!("{sign}{CURRENCY_SYMBOL}{SYMBOL_SEPARATOR}{grouped}")
}
