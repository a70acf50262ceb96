//! Macros for defining kind enums.

/// Macro for defining a kind enum.
///
/// Every variant has a stable [`u8`] discriminant and a
/// `SCREAMING_SNAKE_CASE` string representation, so the enum can be displayed
/// and parsed back.
///
/// # Example
///
/// ```rust
/// # use common::define_kind;
/// define_kind! {
///     #[doc = "Shape kind."]
///     enum Kind {
///         #[doc = "A cube"]
///         Cube = 1,
///
///         #[doc = "A sphere"]
///         Sphere = 2,
///     }
/// }
///
/// assert_eq!(Kind::Cube.to_string(), "CUBE");
/// assert_eq!("SPHERE".parse::<Kind>().ok(), Some(Kind::Sphere));
/// ```
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_kind {
    (
        #[doc = $doc:literal]
        enum $name:ident {
            $(
                #[doc = $variant_doc:literal]
                $variant:ident = $value:expr
            ),* $(,)?
        }
    ) => {
        #[derive(
            Clone,
            Copy,
            Debug,
            $crate::private::strum::Display,
            $crate::private::strum::EnumString,
            Eq,
            Hash,
            PartialEq,
        )]
        #[doc = $doc]
        #[repr(u8)]
        #[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
        pub enum $name {
            $(
                 #[doc = $variant_doc]
                 $variant = $value,
            )*
        }

        impl $name {
            /// Converts this into its [`u8`] representation.
            #[must_use]
            pub const fn u8(self) -> u8 {
                self as u8
            }

            /// Converts the provided [`u8`] representation back, if valid.
            #[must_use]
            pub const fn from_u8(value: u8) -> Option<Self> {
                $(
                    if value == $value {
                        return Some(Self::$variant);
                    }
                )*
                None
            }
        }
    };
}

#[cfg(test)]
mod spec {
    crate::define_kind! {
        #[doc = "Test kind."]
        enum Fruit {
            #[doc = "An apple."]
            Apple = 1,

            #[doc = "A green pear."]
            GreenPear = 2,
        }
    }

    #[test]
    fn displays_in_screaming_snake_case() {
        assert_eq!(Fruit::Apple.to_string(), "APPLE");
        assert_eq!(Fruit::GreenPear.to_string(), "GREEN_PEAR");
    }

    #[test]
    fn parses_from_string() {
        assert_eq!("GREEN_PEAR".parse::<Fruit>().ok(), Some(Fruit::GreenPear));
        assert!("green pear".parse::<Fruit>().is_err());
    }

    #[test]
    fn converts_to_and_from_u8() {
        assert_eq!(Fruit::GreenPear.u8(), 2);
        assert_eq!(Fruit::from_u8(1), Some(Fruit::Apple));
        assert_eq!(Fruit::from_u8(3), None);
    }
}
