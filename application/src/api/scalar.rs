//! Helpers for defining GraphQL scalars over domain types.
//!
//! Both helpers are meant for `#[graphql(with = ..)]` attribute of a newtype
//! wrapping the domain type `As`.

use std::{fmt, marker::PhantomData, str::FromStr};

use juniper::{
    GraphQLType, InputValue, ParseScalarResult, ParseScalarValue, ScalarToken,
    ScalarValue, Value,
};

/// String scalar converted via [`FromStr`]/[`Display`] impls of `As`.
///
/// Target type must implement [`TryFrom`] and [`AsRef`] for `As` type.
///
/// [`Display`]: fmt::Display
#[derive(Debug)]
pub struct Via<As>(PhantomData<As>);

impl<As> Via<As> {
    /// Formats the target type as a string scalar [`Value`].
    pub fn to_output<T, S>(value: &T) -> Value<S>
    where
        As: fmt::Display,
        T: AsRef<As>,
        S: ScalarValue,
    {
        Value::from(value.as_ref().to_string())
    }

    /// Parses the target type out of a string scalar.
    ///
    /// # Errors
    ///
    /// If the input is not a string, or it's rejected by `As` or the target
    /// type.
    pub fn from_input<T, S>(input: &InputValue<S>) -> Result<T, String>
    where
        As: FromStr,
        As::Err: fmt::Display,
        T: TryFrom<As> + GraphQLType<S, TypeInfo = ()>,
        T::Error: fmt::Display,
        S: ScalarValue,
    {
        let s = input.as_string_value().ok_or_else(|| {
            format!(
                "Cannot parse input scalar `{}`: expected string input \
                 value, found: {input}",
                name_of::<T, S>(),
            )
        })?;
        let parsed = s.parse::<As>().map_err(|e| {
            format!(
                "Cannot parse input scalar `{}` from \"{s}\" string: {e}",
                name_of::<T, S>(),
            )
        })?;
        T::try_from(parsed).map_err(|e| {
            format!("Cannot parse input scalar `{}`: {e}", name_of::<T, S>())
        })
    }

    /// Parses the provided [`ScalarToken`] as a [`String`].
    ///
    /// # Errors
    ///
    /// If the token is not a string.
    pub fn parse_token<S: ScalarValue>(
        value: ScalarToken<'_>,
    ) -> ParseScalarResult<S> {
        <String as ParseScalarValue<S>>::from_str(value)
    }
}

/// Integer scalar converted via [`TryFrom`]/[`Into`] `i32` impls of `As`.
///
/// Target type must implement [`From`] and [`AsRef`] for `As` type.
#[derive(Debug)]
pub struct ViaInt<As>(PhantomData<As>);

impl<As> ViaInt<As> {
    /// Formats the target type as an integer scalar [`Value`].
    pub fn to_output<T, S>(value: &T) -> Value<S>
    where
        As: Copy + Into<i32>,
        T: AsRef<As>,
        S: ScalarValue,
    {
        Value::scalar((*value.as_ref()).into())
    }

    /// Parses the target type out of an integer scalar.
    ///
    /// # Errors
    ///
    /// If the input is not an integer, or it's rejected by `As`.
    pub fn from_input<T, S>(input: &InputValue<S>) -> Result<T, String>
    where
        As: TryFrom<i32>,
        As::Error: fmt::Display,
        T: From<As> + GraphQLType<S, TypeInfo = ()>,
        S: ScalarValue,
    {
        let i = input.as_int_value().ok_or_else(|| {
            format!(
                "Cannot parse input scalar `{}`: expected integer input \
                 value, found: {input}",
                name_of::<T, S>(),
            )
        })?;
        As::try_from(i).map(T::from).map_err(|e| {
            format!(
                "Cannot parse input scalar `{}` from `{i}` integer: {e}",
                name_of::<T, S>(),
            )
        })
    }

    /// Parses the provided [`ScalarToken`] as an [`i32`].
    ///
    /// # Errors
    ///
    /// If the token is not an integer.
    pub fn parse_token<S: ScalarValue>(
        value: ScalarToken<'_>,
    ) -> ParseScalarResult<S> {
        <i32 as ParseScalarValue<S>>::from_str(value)
    }
}

/// Returns the GraphQL name of the `T` scalar.
fn name_of<T, S>() -> String
where
    T: GraphQLType<S, TypeInfo = ()>,
    S: ScalarValue,
{
    T::name(&()).map(ToOwned::to_owned).unwrap_or_default()
}

#[cfg(test)]
mod spec {
    use juniper::{DefaultScalarValue, InputValue, Value};

    use crate::api::review::Rating;

    use super::ViaInt;

    type Via = ViaInt<service::domain::review::Rating>;

    #[test]
    fn parses_rating_from_int() {
        let input = InputValue::<DefaultScalarValue>::scalar(4);

        let rating: Rating = Via::from_input(&input).unwrap();

        assert_eq!(
            Via::to_output::<_, DefaultScalarValue>(&rating),
            Value::scalar(4),
        );
    }

    #[test]
    fn rejects_out_of_range_rating() {
        let err = Via::from_input::<Rating, DefaultScalarValue>(
            &InputValue::scalar(0),
        )
        .unwrap_err();

        assert!(err.contains("ReviewRating"), "{err}");
        assert!(err.contains("from 1 to 5"), "{err}");
    }

    #[test]
    fn rejects_non_int_rating() {
        let err = Via::from_input::<Rating, DefaultScalarValue>(
            &InputValue::scalar("five".to_owned()),
        )
        .unwrap_err();

        assert!(err.contains("expected integer"), "{err}");
    }
}
