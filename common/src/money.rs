//! [`Money`]-related definitions.

use std::{fmt, str::FromStr};

use rust_decimal::{prelude::ToPrimitive as _, Decimal};

use crate::define_kind;

/// Amount of money in some [`Currency`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Money {
    /// Amount of this [`Money`].
    pub amount: Decimal,

    /// [`Currency`] of this amount.
    pub currency: Currency,
}

impl Money {
    /// Creates a zero [`Money`] amount in the provided [`Currency`].
    #[must_use]
    pub const fn zero(currency: Currency) -> Self {
        Self {
            amount: Decimal::ZERO,
            currency,
        }
    }

    /// Multiplies this [`Money`] amount by the provided `factor`.
    ///
    /// [`None`] is returned on overflow.
    #[must_use]
    pub fn checked_mul(self, factor: u32) -> Option<Self> {
        Some(Self {
            amount: self.amount.checked_mul(Decimal::from(factor))?,
            currency: self.currency,
        })
    }

    /// Adds the `other` [`Money`] amount to this one.
    ///
    /// [`None`] is returned if the [`Currency`]s differ or on overflow.
    #[must_use]
    pub fn checked_add(self, other: Self) -> Option<Self> {
        (self.currency == other.currency).then_some(())?;
        Some(Self {
            amount: self.amount.checked_add(other.amount)?,
            currency: self.currency,
        })
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { amount, currency } = self;
        match amount.is_integer().then(|| amount.to_i128()).flatten() {
            Some(int) => write!(f, "{int}{currency}"),
            None => write!(f, "{}{currency}", amount.normalize()),
        }
    }
}

impl FromStr for Money {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() < 4 || !s.is_char_boundary(s.len() - 3) {
            return Err("too short");
        }

        let (amount, currency) = s.split_at(s.len() - 3);
        let amount = Decimal::from_str(amount).map_err(|_| "invalid amount")?;
        let currency =
            Currency::from_str(currency).map_err(|_| "invalid currency")?;

        Ok(Self { amount, currency })
    }
}

define_kind! {
    #[doc = "Currency of a [`Money`] amount."]
    enum Currency {
        #[doc = "US Dollar."]
        Usd = 1,

        #[doc = "Euro."]
        Eur = 2,

        #[doc = "British Pound."]
        Gbp = 3,
    }
}

#[cfg(feature = "juniper")]
mod juniper {
    //! Module providing integration with [`juniper`] crate.

    use std::str::FromStr as _;

    use juniper::{graphql_scalar, InputValue, ScalarValue, Value};

    /// Money in `{major}.{minor}{currency}` format, where:
    /// - `major` is an integer;
    /// - `minor` is an optional integer;
    /// - `currency` is a three-letter currency code.
    #[graphql_scalar(with = Self, parse_token(String))]
    type Money = super::Money;

    impl Money {
        fn to_output<S: ScalarValue>(m: &Money) -> Value<S> {
            Value::scalar(m.to_string())
        }

        fn from_input<S: ScalarValue>(
            input: &InputValue<S>,
        ) -> Result<Self, String> {
            input
                .as_string_value()
                .ok_or_else(|| {
                    format!(
                        "Cannot parse `Money` input scalar from \
                         non-string value: {input}",
                    )
                })
                .and_then(|s| {
                    Self::from_str(s).map_err(|e| {
                        format!("Cannot parse `Money` input scalar: {e}")
                    })
                })
        }
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use rust_decimal::Decimal;

    use super::{Currency, Money};

    fn money(s: &str) -> Money {
        Money::from_str(s).unwrap()
    }

    #[test]
    fn from_str() {
        assert_eq!(
            money("20.50USD"),
            Money {
                amount: "20.50".parse::<Decimal>().unwrap(),
                currency: Currency::Usd,
            },
        );
        assert_eq!(money("7GBP").currency, Currency::Gbp);

        assert!(Money::from_str("20.50").is_err());
        assert!(Money::from_str("20.50Us").is_err());
        assert!(Money::from_str("20.50Usdollar").is_err());
        assert!(Money::from_str("abcUSD").is_err());
    }

    #[test]
    fn to_string_drops_zero_fraction() {
        assert_eq!(money("20USD").to_string(), "20USD");
        assert_eq!(money("20.00USD").to_string(), "20USD");
        assert_eq!(money("20.50EUR").to_string(), "20.5EUR");
    }

    #[test]
    fn multiplies_by_factor() {
        assert_eq!(money("20USD").checked_mul(3), Some(money("60USD")));
        assert_eq!(money("12.25EUR").checked_mul(0), Some(money("0EUR")));
    }

    #[test]
    fn adds_same_currency_only() {
        assert_eq!(
            money("60USD").checked_add(money("50USD")),
            Some(money("110USD")),
        );
        assert_eq!(money("60USD").checked_add(money("50EUR")), None);
    }

    #[test]
    fn zero_is_zero() {
        assert_eq!(Money::zero(Currency::Usd), money("0USD"));
    }
}
