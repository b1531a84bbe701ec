use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::french::number_to_french_words;
use crate::error::AmountError;

/// Rendered form of [`AmountError::InvalidNumber`], kept byte-for-byte for the UI.
pub const INVALID_NUMBER: &str = "Invalid number";

/// Largest integer part that can be spelled; the next scale (milliard) has no words.
/// Larger amounts are [`AmountError::OutOfRange`], which
/// [`amount_to_words_or_sentinel`] prints as [`INVALID_NUMBER`].
pub const MAX_INTEGER_PART: u64 = 999_999_999;

const CURRENCY: &str = "dirhams";
const SUBUNIT: &str = "centimes";

/// What callers hand over: a number from the totals, or raw text from a form field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AmountInput {
    Number(f64),
    Text(String),
}

impl From<f64> for AmountInput {
    fn from(v: f64) -> Self {
        AmountInput::Number(v)
    }
}

impl From<i64> for AmountInput {
    fn from(v: i64) -> Self {
        AmountInput::Number(v as f64)
    }
}

impl From<u32> for AmountInput {
    fn from(v: u32) -> Self {
        AmountInput::Number(v.into())
    }
}

impl From<u64> for AmountInput {
    fn from(v: u64) -> Self {
        AmountInput::Number(v as f64)
    }
}

impl From<&str> for AmountInput {
    fn from(v: &str) -> Self {
        AmountInput::Text(v.to_string())
    }
}

impl From<String> for AmountInput {
    fn from(v: String) -> Self {
        AmountInput::Text(v)
    }
}

/// A validated amount split into whole dirhams and centimes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Amount {
    integer_part: u64,
    centimes: u8,
}

impl Amount {
    /// Splits `value` into `floor(value)` and the fractional part rounded to
    /// the nearest centime, half away from zero, on the binary `f64` value.
    /// `2.005` is stored just below the half and gives 0 centimes. A fraction
    /// that rounds to 100 centimes carries into the integer part.
    pub fn from_f64(value: f64) -> Result<Self, AmountError> {
        if !value.is_finite() {
            return Err(AmountError::InvalidNumber);
        }
        if value < 0.0 {
            return Err(AmountError::Negative(value));
        }

        let floor = value.floor();
        if floor > MAX_INTEGER_PART as f64 {
            return Err(AmountError::OutOfRange(value));
        }

        let mut integer_part = floor as u64;
        let mut centimes = ((value - floor) * 100.0).round() as u8;
        if centimes >= 100 {
            integer_part += 1;
            centimes -= 100;
        }
        if integer_part > MAX_INTEGER_PART {
            return Err(AmountError::OutOfRange(value));
        }

        Ok(Self {
            integer_part,
            centimes,
        })
    }

    pub fn integer_part(&self) -> u64 {
        self.integer_part
    }

    pub fn centimes(&self) -> u8 {
        self.centimes
    }

    /// "<entier> dirhams[ et <centimes> centimes]", first letter uppercased.
    ///
    /// The currency is never singularized: 1 gives "Un dirhams".
    pub fn to_words(&self) -> String {
        let mut out = format!("{} {}", number_to_french_words(self.integer_part), CURRENCY);
        if self.centimes > 0 {
            out.push_str(" et ");
            out.push_str(&number_to_french_words(self.centimes.into()));
            out.push(' ');
            out.push_str(SUBUNIT);
        }
        capitalize_first(&out)
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    /// Reads the leading number of `s` and ignores what follows it, the way
    /// form fields are read: "3500.75 MAD" is 3500.75 and "1,5" is 1.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let number = numeric_prefix(s.trim()).ok_or(AmountError::InvalidNumber)?;
        let value: f64 = number.parse().map_err(|_| AmountError::InvalidNumber)?;
        Self::from_f64(value)
    }
}

/// Longest leading `[+-]digits[.digits][(e|E)[+-]digits]` slice of `s`.
/// At least one digit is required before or after the dot.
fn numeric_prefix(s: &str) -> Option<&str> {
    let bytes = s.as_bytes();
    let count_digits = |from: usize| bytes[from..].iter().take_while(|b| b.is_ascii_digit()).count();

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let mut digits = count_digits(end);
    end += digits;

    if bytes.get(end) == Some(&b'.') {
        let fraction = count_digits(end + 1);
        digits += fraction;
        end += 1 + fraction;
    }
    if digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(exp_end);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    Some(&s[..end])
}

impl TryFrom<&AmountInput> for Amount {
    type Error = AmountError;

    fn try_from(input: &AmountInput) -> Result<Self, Self::Error> {
        match input {
            AmountInput::Number(v) => Amount::from_f64(*v),
            AmountInput::Text(s) => s.parse(),
        }
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.integer_part, self.centimes)
    }
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Spells a monetary amount in French dirhams.
pub fn amount_to_words<A: Into<AmountInput>>(amount: A) -> Result<String, AmountError> {
    let input = amount.into();
    match Amount::try_from(&input) {
        Ok(amount) => {
            let words = amount.to_words();
            tracing::debug!(%amount, %words, "amount spelled");
            Ok(words)
        }
        Err(err) => {
            tracing::warn!(?input, error = %err, "amount rejected");
            Err(err)
        }
    }
}

/// Same as [`amount_to_words`] but answers [`INVALID_NUMBER`] on any error,
/// for templates that print the result verbatim.
pub fn amount_to_words_or_sentinel<A: Into<AmountInput>>(amount: A) -> String {
    amount_to_words(amount).unwrap_or_else(|_| INVALID_NUMBER.to_string())
}
