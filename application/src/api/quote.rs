//! [`Quote`]-related definitions.

use common::Money;
use juniper::GraphQLObject;
use service::domain;

/// Price breakdown of renting an item for the picked dates.
#[derive(Clone, Copy, Debug, GraphQLObject)]
pub struct Quote {
    /// Number of billed days, partial days rounded up.
    pub duration_days: i32,

    /// Price of renting the item for a single day.
    pub price_per_day: Money,

    /// `pricePerDay` multiplied by `durationDays`.
    pub rental_total: Money,

    /// Marketplace service fee.
    pub service_fee: Money,

    /// Refundable deposit.
    pub deposit_fee: Money,

    /// Sum of `rentalTotal`, `serviceFee` and `depositFee`.
    pub grand_total: Money,
}

impl From<domain::Quote> for Quote {
    fn from(quote: domain::Quote) -> Self {
        let domain::Quote {
            duration_days,
            price_per_day,
            rental_total,
            service_fee,
            deposit_fee,
            grand_total,
        } = quote;
        Self {
            duration_days: i32::try_from(duration_days).unwrap_or(i32::MAX),
            price_per_day,
            rental_total,
            service_fee,
            deposit_fee,
            grand_total,
        }
    }
}
