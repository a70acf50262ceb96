//! [`Review`] definitions.

use std::mem;

#[cfg(doc)]
use common::DateTime;
use common::{unit, DateTimeOf};
use derive_more::{AsRef, Display, Error, From, FromStr, Into};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{listing, user};
#[cfg(doc)]
use crate::domain::{Listing, User};

/// Feedback left by a [`User`] about a [`Listing`].
#[derive(Clone, Debug)]
pub struct Review {
    /// ID of this [`Review`].
    pub id: Id,

    /// ID of the reviewed [`Listing`].
    pub listing_id: listing::Id,

    /// ID of the [`User`] who left this [`Review`].
    pub user_id: user::Id,

    /// Name of the [`User`] who left this [`Review`].
    pub user_name: user::Name,

    /// [`Rating`] given by the [`User`].
    pub rating: Rating,

    /// [`Comment`] written by the [`User`].
    pub comment: Comment,

    /// [`DateTime`] when this [`Review`] was left.
    pub created_at: CreationDateTime,
}

/// Sample [`Review`]s every [`Listing`] page starts with.
const SAMPLES: [(u128, &str, u8, &str); 3] = [
    (
        1,
        "Alex Johnson",
        5,
        "Great experience! The item was exactly as described and the owner \
         was very responsive.",
    ),
    (
        2,
        "Samantha Lee",
        4,
        "Item was in good condition. Pickup and return were smooth. Would \
         definitely rent again.",
    ),
    (
        3,
        "Ravi Patel",
        5,
        "Excellent service. The rental process was easy and the item worked \
         perfectly!",
    ),
];

impl Review {
    /// Returns the sample [`Review`]s of the [`Listing`] with the provided
    /// ID.
    #[must_use]
    pub fn samples(listing_id: listing::Id) -> Vec<Self> {
        let now = CreationDateTime::now();
        SAMPLES
            .into_iter()
            .map(|(user_id, user_name, stars, comment)| {
                // SAFETY: Sample names are non-empty and trimmed.
                #[expect(unsafe_code, reason = "constant")]
                let user_name = unsafe { user::Name::new_unchecked(user_name) };
                Self {
                    id: Id::new(),
                    listing_id,
                    user_id: Uuid::from_u128(user_id).into(),
                    user_name,
                    rating: Rating(stars),
                    comment: Comment(comment.into()),
                    created_at: now,
                }
            })
            .collect()
    }
}

/// ID of a [`Review`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Number of stars given in a [`Review`], from `1` to `5`.
#[derive(Clone, Copy, Debug, Display, Eq, Into, Ord, PartialEq, PartialOrd)]
pub struct Rating(u8);

impl Rating {
    /// Creates a new [`Rating`] if the given `stars` are within `1..=5`.
    #[must_use]
    pub fn new(stars: u8) -> Option<Self> {
        (1..=5).contains(&stars).then_some(Self(stars))
    }

    /// Returns the number of stars of this [`Rating`].
    #[must_use]
    pub fn stars(self) -> u8 {
        self.0
    }
}

impl TryFrom<i32> for Rating {
    type Error = RatingError;

    fn try_from(stars: i32) -> Result<Self, Self::Error> {
        u8::try_from(stars)
            .ok()
            .and_then(Self::new)
            .ok_or(RatingError::OutOfRange)
    }
}

impl From<Rating> for i32 {
    fn from(rating: Rating) -> Self {
        rating.0.into()
    }
}

/// Text of a [`Review`].
///
/// Kept exactly as typed, but must contain something besides whitespace.
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str)]
pub struct Comment(String);

impl Comment {
    /// Maximum length of a [`Comment`] in characters.
    pub const MAX_LEN: usize = 4096;

    /// Creates a new [`Comment`] if the given `text` is valid.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Option<Self> {
        Self::parse(text).ok()
    }

    /// Parses a [`Comment`] out of the given `text`.
    ///
    /// # Errors
    ///
    /// If the `text` is blank or longer than [`Comment::MAX_LEN`].
    pub fn parse(text: impl Into<String>) -> Result<Self, CommentError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(CommentError::Blank);
        }
        if text.chars().count() > Self::MAX_LEN {
            return Err(CommentError::TooLong);
        }
        Ok(Self(text))
    }
}

/// Add-review form of a [`Listing`] page.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum Form {
    /// Form is hidden.
    #[default]
    Idle,

    /// Form is shown and being filled in.
    Composing(Draft),
}

/// Contents of a [`Form`] being filled in.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Draft {
    /// Selected [`Rating`], if any.
    pub rating: Option<Rating>,

    /// Typed comment text, possibly blank.
    pub comment: String,
}

impl Form {
    /// Shows this [`Form`], keeping the [`Draft`] if it's already shown.
    pub fn open(&mut self) {
        if *self == Self::Idle {
            *self = Self::Composing(Draft::default());
        }
    }

    /// Hides this [`Form`], discarding its [`Draft`].
    pub fn cancel(&mut self) {
        *self = Self::Idle;
    }

    /// Selects the provided [`Rating`] in the [`Draft`].
    ///
    /// # Errors
    ///
    /// If this [`Form`] is [`Form::Idle`].
    pub fn rate(&mut self, rating: Rating) -> Result<(), ClosedError> {
        self.draft_mut()?.rating = Some(rating);
        Ok(())
    }

    /// Replaces the comment text of the [`Draft`].
    ///
    /// # Errors
    ///
    /// If this [`Form`] is [`Form::Idle`].
    pub fn comment(
        &mut self,
        text: impl Into<String>,
    ) -> Result<(), ClosedError> {
        self.draft_mut()?.comment = text.into();
        Ok(())
    }

    /// Checks this [`Form`] is complete and returns its [`Rating`] and
    /// [`Comment`], leaving this [`Form`] untouched.
    ///
    /// # Errors
    ///
    /// If the [`Rating`] is not selected (including the [`Form::Idle`] case),
    /// or the comment is blank or too long.
    pub fn submission(&self) -> Result<(Rating, Comment), SubmissionError> {
        let Self::Composing(draft) = self else {
            return Err(SubmissionError::RatingRequired);
        };
        let rating = draft.rating.ok_or(SubmissionError::RatingRequired)?;
        let comment =
            Comment::parse(draft.comment.clone()).map_err(|e| match e {
                CommentError::Blank => SubmissionError::CommentRequired,
                CommentError::TooLong => SubmissionError::CommentTooLong,
            })?;
        Ok((rating, comment))
    }

    /// Resets this [`Form`] to [`Form::Idle`], returning the previous state.
    pub fn reset(&mut self) -> Self {
        mem::take(self)
    }

    /// Returns the [`Draft`] of this [`Form`] if it's being filled in.
    fn draft_mut(&mut self) -> Result<&mut Draft, ClosedError> {
        match self {
            Self::Composing(draft) => Ok(draft),
            Self::Idle => Err(ClosedError),
        }
    }
}

/// Error of constructing a [`Rating`].
#[derive(Clone, Copy, Debug, Display, Eq, Error, PartialEq)]
pub enum RatingError {
    /// Number of stars is not within `1..=5`.
    #[display("rating must be from 1 to 5 stars")]
    OutOfRange,
}

/// Error of parsing a [`Comment`].
#[derive(Clone, Copy, Debug, Display, Eq, Error, PartialEq)]
pub enum CommentError {
    /// Text contains nothing besides whitespace.
    #[display("comment is blank")]
    Blank,

    /// Text is longer than [`Comment::MAX_LEN`] characters.
    #[display("comment is too long")]
    TooLong,
}

/// Error of editing a [`Form::Idle`].
#[derive(Clone, Copy, Debug, Display, Error)]
#[display("review form is not open")]
pub struct ClosedError;

/// Error of submitting an incomplete [`Form`].
#[derive(Clone, Copy, Debug, Display, Eq, Error, PartialEq)]
pub enum SubmissionError {
    /// [`Rating`] is not selected.
    #[display("rating is not selected")]
    RatingRequired,

    /// Comment is blank.
    #[display("comment is blank")]
    CommentRequired,

    /// Comment is longer than [`Comment::MAX_LEN`] characters.
    #[display("comment is too long")]
    CommentTooLong,
}

/// [`DateTime`] when a [`Review`] was left.
pub type CreationDateTime = DateTimeOf<(Review, unit::Creation)>;
