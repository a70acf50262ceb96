//! [`Quote`] calculation for a [`DateRange`].

use common::{unit, DateTimeOf, Money};

#[cfg(doc)]
use crate::domain::Booking;
use crate::domain::Listing;

/// Rental dates picked by a renter.
///
/// Both bounds stay unset until picked.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct DateRange {
    /// [`DateTimeOf`] the rental starts.
    pub start: Option<StartDateTime>,

    /// [`DateTimeOf`] the rental ends.
    pub end: Option<EndDateTime>,
}

impl DateRange {
    /// Creates a new [`DateRange`] out of the provided bounds.
    #[must_use]
    pub fn new(start: Option<StartDateTime>, end: Option<EndDateTime>) -> Self {
        Self { start, end }
    }

    /// Returns both bounds if they are set.
    #[must_use]
    pub fn bounds(&self) -> Option<(StartDateTime, EndDateTime)> {
        Some((self.start?, self.end?))
    }

    /// Returns the number of rental days covered by this [`DateRange`].
    ///
    /// Partial days are rounded up and bounds in reverse order are
    /// tolerated. Any range with both bounds set covers at least `1` day,
    /// while an incomplete range covers `0` days.
    #[must_use]
    pub fn duration_days(&self) -> u32 {
        let Some((start, end)) = self.bounds() else {
            return 0;
        };
        u32::try_from(start.days_spanned(&end)).unwrap_or(u32::MAX).max(1)
    }
}

/// Price quote of renting a [`Listing`] for a [`DateRange`].
///
/// Derived on demand, never stored.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Quote {
    /// Number of rental days.
    pub duration_days: u32,

    /// Price of a single rental day.
    pub price_per_day: Money,

    /// Price of all the rental days, this is what a [`Booking`] costs.
    pub rental_total: Money,

    /// Marketplace service fee, currently always zero.
    pub service_fee: Money,

    /// Refundable deposit of the [`Listing`].
    pub deposit_fee: Money,

    /// Everything the renter pays upfront.
    pub grand_total: Money,
}

impl Quote {
    /// Calculates a [`Quote`] of renting the provided [`Listing`] for the
    /// provided [`DateRange`].
    ///
    /// [`None`] is returned if the amounts overflow or the [`Listing`] prices
    /// are in different currencies.
    #[must_use]
    pub fn new(listing: &Listing, dates: &DateRange) -> Option<Self> {
        let duration_days = dates.duration_days();
        let price_per_day = listing.price_per_day;
        let rental_total = price_per_day.checked_mul(duration_days)?;
        let service_fee = Money::zero(price_per_day.currency);
        let deposit_fee = listing.deposit_fee;
        let grand_total = rental_total
            .checked_add(service_fee)?
            .checked_add(deposit_fee)?;

        Some(Self {
            duration_days,
            price_per_day,
            rental_total,
            service_fee,
            deposit_fee,
            grand_total,
        })
    }
}

/// [`DateTimeOf`] a rental starts.
pub type StartDateTime = DateTimeOf<(DateRange, unit::Start)>;

/// [`DateTimeOf`] a rental ends.
pub type EndDateTime = DateTimeOf<(DateRange, unit::End)>;
