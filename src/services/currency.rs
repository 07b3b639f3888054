//! Fixed-rate conversion of a base-currency (INR) amount.
//!
//! Rates are fixed by configuration, not fetched. Each result is rounded to
//! 2 decimal places with `Decimal::round_dp`, which rounds half-to-even
//! (banker's rounding).

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const USD_RATE: Decimal = dec!(85);
const AUD_RATE: Decimal = dec!(60);
const CAD_RATE: Decimal = dec!(70);

/// Conversion table computed once at intake and cached on the opportunity row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrencyTable {
    pub usd: Decimal,
    pub aud: Decimal,
    pub cad: Decimal,
    pub inr: Decimal,
}

/// Convert an INR amount to the supported currencies. Total function: no
/// amount means no table, which leaves the derived columns absent.
pub fn convert(amount: Decimal) -> CurrencyTable {
    CurrencyTable {
        usd: (amount * USD_RATE).round_dp(2),
        aud: (amount * AUD_RATE).round_dp(2),
        cad: (amount * CAD_RATE).round_dp(2),
        inr: amount.round_dp(2),
    }
}
