//! Amount-in-words rendering, cached on the opportunity at write time.

use num2words::{Currency, Lang, Num2Words};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Render an INR amount as English currency words. An absent amount yields
/// the literal "Zero". A value that cannot be rendered falls back to its
/// plain decimal form.
pub fn amount_in_words(amount: Option<Decimal>) -> String {
    let Some(amount) = amount else {
        return "Zero".to_string();
    };

    amount
        .to_f64()
        .and_then(|value| {
            Num2Words::new(value)
                .lang(Lang::English)
                .currency(Currency::INR)
                .to_words()
                .ok()
        })
        .unwrap_or_else(|| amount.to_string())
}
