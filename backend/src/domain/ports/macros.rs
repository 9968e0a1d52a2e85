//! `define_port_error!`: failure enums for the store ports.
//!
//! Each port lists its failures as variants with a display message. The
//! macro derives `thiserror::Error` and adds one snake_case constructor per
//! variant. Constructor parameters take `impl Into<T>`, so adapters can pass
//! `&str` or a formatted message straight through.
//!
//! ```rust,ignore
//! define_port_error! {
//!     /// Errors raised by review repository adapters.
//!     pub enum ReviewRepositoryError {
//!         /// A mutation referenced a review the store does not hold.
//!         MissingReview { review_id: i64 } => "review {review_id} does not exist",
//!     }
//! }
//!
//! let error = ReviewRepositoryError::missing_review(12_i64);
//! assert_eq!(error.to_string(), "review 12 does not exist");
//! ```

macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:literal
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@constructor $variant [] [] $( $($field : $ty,)* )?);
            )*
        }
    };

    // Fields move one at a time into the parameter and initialiser lists.
    (@constructor $variant:ident [$($param:tt)*] [$($init:tt)*] $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @constructor $variant
            [$($param)* $field: impl Into<$ty>,]
            [$($init)* $field: $field.into(),]
            $($rest)*
        );
    };

    (@constructor $variant:ident [] []) => {
        ::paste::paste! {
            #[doc = "Build [`Self::" $variant "`]."]
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@constructor $variant:ident [$($param:tt)*] [$($init:tt)*]) => {
        ::paste::paste! {
            #[doc = "Build [`Self::" $variant "`]."]
            pub fn [<$variant:snake>]($($param)*) -> Self {
                Self::$variant { $($init)* }
            }
        }
    };
}

pub(crate) use define_port_error;
