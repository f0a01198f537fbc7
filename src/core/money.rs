//! Exact-decimal monetary values

use anyhow::Context;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

pub const US_DOLLAR_CODE: &str = "USD";
pub const US_DOLLAR_SYMBOL: &str = "$";
pub const DECIMALS: u32 = 2;
/// Largest number of fractional digits a `Decimal` can hold.
pub const MAX_DECIMALS: u32 = 28;

/// A monetary amount together with the currency it is expressed in.
///
/// The value always carries exactly `decimals` fractional digits, so it
/// serializes as a fixed-precision string (`"12.30"`). `decimals` is capped
/// at [`MAX_DECIMALS`]. Amounts are never
/// converted between currencies; combining values assumes they share one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "MoneyRepr")]
pub struct Money {
    currency_code: String,
    currency_symbol: String,
    decimals: u32,
    value: Decimal,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MoneyRepr {
    currency_code: String,
    currency_symbol: String,
    decimals: u32,
    value: Decimal,
}

impl From<MoneyRepr> for Money {
    fn from(repr: MoneyRepr) -> Self {
        Money::new(
            repr.currency_code,
            repr.currency_symbol,
            repr.decimals,
            repr.value,
        )
    }
}

fn round(value: Decimal, decimals: u32) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(decimals);
    rounded
}

impl Money {
    pub fn new(
        currency_code: impl Into<String>,
        currency_symbol: impl Into<String>,
        decimals: u32,
        value: Decimal,
    ) -> Self {
        let decimals = decimals.min(MAX_DECIMALS);
        Self {
            currency_code: currency_code.into(),
            currency_symbol: currency_symbol.into(),
            decimals,
            value: round(value, decimals),
        }
    }

    /// `0.00` in US dollars, the seed of every summation.
    pub fn zero() -> Self {
        Self::from_decimal(Decimal::ZERO)
    }

    pub fn from_decimal(value: Decimal) -> Self {
        Self::new(US_DOLLAR_CODE, US_DOLLAR_SYMBOL, DECIMALS, value)
    }

    pub fn currency_code(&self) -> &str {
        &self.currency_code
    }

    pub fn currency_symbol(&self) -> &str {
        &self.currency_symbol
    }

    pub fn decimals(&self) -> u32 {
        self.decimals
    }

    pub fn value(&self) -> Decimal {
        self.value
    }

    /// Copies the currency metadata onto a new value.
    pub fn with_value(&self, value: Decimal) -> Self {
        Self::new(
            self.currency_code.clone(),
            self.currency_symbol.clone(),
            self.decimals,
            value,
        )
    }

    /// Multiplies the amount, keeping the original number of decimals.
    ///
    /// Returns `None` for a negative multiplier, since a scaled amount may
    /// not flip sign, and when the product leaves the decimal range.
    pub fn scale(&self, multiplier: Decimal) -> Option<Self> {
        if multiplier < Decimal::ZERO {
            return None;
        }
        self.value
            .checked_mul(multiplier)
            .map(|value| self.with_value(value))
    }

    /// Adds up amounts left to right, starting from [`Money::zero`].
    ///
    /// Each step adopts the term's currency metadata and rounds the running
    /// total to the term's decimals.
    pub fn sum<'a, I>(terms: I) -> Self
    where
        I: IntoIterator<Item = &'a Money>,
    {
        terms.into_iter().fold(Self::zero(), |total, term| {
            term.with_value(total.value.saturating_add(term.value))
        })
    }

    /// Like [`Money::sum`], but `None` once the total leaves the decimal range.
    pub fn checked_sum<'a, I>(terms: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Money>,
    {
        terms.into_iter().try_fold(Self::zero(), |total, term| {
            total
                .value
                .checked_add(term.value)
                .map(|value| term.with_value(value))
        })
    }
}

impl Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.currency_symbol, self.value)
    }
}

impl FromStr for Money {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = Decimal::from_str(s.trim())
            .with_context(|| format!("Invalid monetary amount: {s}"))?;
        Ok(Self::from_decimal(value))
    }
}
