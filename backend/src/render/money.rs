//! Currency display for `MoneyV2` amounts.
//!
//! Arithmetic happens on the decimal string so amounts never pass through
//! floating point.

use tracing::debug;

use crate::domain::MoneyV2;

use super::Element;

/// Format `money` for display, for example `$1,234.50`.
///
/// Amounts that are not plain decimals fall back to `"{amount} {code}"`.
///
/// # Examples
/// ```
/// use storefront::domain::MoneyV2;
/// use storefront::render::format_money;
///
/// assert_eq!(format_money(&MoneyV2::new("1234.5", "USD")), "$1,234.50");
/// assert_eq!(format_money(&MoneyV2::new("1234.5", "JPY")), "¥1,235");
/// assert_eq!(format_money(&MoneyV2::new("-3", "CHF")), "-CHF 3.00");
/// ```
#[must_use]
pub fn format_money(money: &MoneyV2) -> String {
    let code = money.currency_code.trim();
    let Some(amount) = Decimal::parse(&money.amount) else {
        debug!(amount = %money.amount, currency = code, "amount is not a plain decimal");
        return format!("{} {}", money.amount, money.currency_code);
    };
    let rounded = amount.round(fraction_digits(code));
    let sign = if rounded.negative { "-" } else { "" };
    let number = rounded.grouped();
    match symbol(code) {
        Some(symbol) => format!("{sign}{symbol}{number}"),
        None => format!("{sign}{code} {number}"),
    }
}

/// `<span class="money">` wrapping [`format_money`].
#[must_use]
pub fn money(money: &MoneyV2) -> Element {
    Element::new("span")
        .attr("class", "money")
        .child(format_money(money))
}

fn symbol(code: &str) -> Option<&'static str> {
    match code {
        "USD" => Some("$"),
        "EUR" => Some("€"),
        "GBP" => Some("£"),
        "JPY" => Some("¥"),
        "CAD" => Some("CA$"),
        "AUD" => Some("A$"),
        "INR" => Some("₹"),
        _ => None,
    }
}

fn fraction_digits(code: &str) -> usize {
    match code {
        "JPY" | "KRW" => 0,
        _ => 2,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Decimal {
    negative: bool,
    integer: Vec<u8>,
    fraction: Vec<u8>,
}

impl Decimal {
    fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        let (negative, unsigned) = match raw.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, raw.strip_prefix('+').unwrap_or(raw)),
        };
        let (integer, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));
        if integer.is_empty() && fraction.is_empty() {
            return None;
        }
        let digits = |part: &str| -> Option<Vec<u8>> {
            part.bytes()
                .map(|byte| byte.is_ascii_digit().then(|| byte - b'0'))
                .collect()
        };
        let mut integer = digits(integer)?;
        let fraction = digits(fraction)?;
        if integer.is_empty() {
            integer.push(0);
        }
        Some(Self {
            negative,
            integer,
            fraction,
        })
    }

    /// Round half away from zero to `places` fraction digits.
    fn round(&self, places: usize) -> Self {
        let mut fraction = self.fraction.clone();
        let round_up = fraction.get(places).is_some_and(|digit| *digit >= 5);
        fraction.resize(places, 0);

        let mut digits = self.integer.clone();
        digits.extend_from_slice(&fraction);
        if round_up {
            increment(&mut digits);
        }
        let split = digits.len() - places;
        let fraction = digits.split_off(split);
        let first_significant = digits
            .iter()
            .position(|digit| *digit != 0)
            .unwrap_or(digits.len().saturating_sub(1));
        Self {
            negative: self.negative,
            integer: digits[first_significant..].to_vec(),
            fraction,
        }
    }

    fn grouped(&self) -> String {
        let mut out = String::with_capacity(self.integer.len() * 4 / 3 + self.fraction.len() + 1);
        for (index, digit) in self.integer.iter().enumerate() {
            let remaining = self.integer.len() - index;
            if index > 0 && remaining % 3 == 0 {
                out.push(',');
            }
            out.push(char::from(b'0' + digit));
        }
        if !self.fraction.is_empty() {
            out.push('.');
            out.extend(self.fraction.iter().map(|digit| char::from(b'0' + digit)));
        }
        out
    }
}

/// Add one unit in the last place, growing the number when it carries out.
fn increment(digits: &mut Vec<u8>) {
    for digit in digits.iter_mut().rev() {
        if *digit == 9 {
            *digit = 0;
        } else {
            *digit += 1;
            return;
        }
    }
    digits.insert(0, 1);
}
