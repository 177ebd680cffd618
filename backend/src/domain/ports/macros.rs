//! Helper macro for declaring driven-port error enums.
//!
//! Each variant gets a `thiserror` message and a snake_case constructor whose
//! parameters accept anything convertible into the field type, so adapters
//! can write `InvoiceRepositoryError::query(err.to_string())` or pass a
//! `&str` directly.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_impl $variant () () $( $field : $ty, )*);
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_impl
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
    };
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
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
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use rstest::rstest;

    define_port_error! {
        /// Error shaped like the driven-port errors.
        pub enum LedgerError {
            Connection { message: String } => "ledger connection failed: {message}",
            Overdrawn { shortfall: i64 } => "ledger overdrawn by {shortfall} cents",
            Rejected { message: String, attempts: u8 } => "ledger rejected after {attempts}: {message}",
            Closed => "ledger closed",
        }
    }

    #[rstest]
    fn string_fields_accept_borrowed_input() {
        let err = LedgerError::connection("refused");
        assert_eq!(err, LedgerError::Connection { message: "refused".to_owned() });
        assert_eq!(err.to_string(), "ledger connection failed: refused");
    }

    #[rstest]
    fn non_string_fields_keep_their_type() {
        assert_eq!(LedgerError::overdrawn(250_i64).to_string(), "ledger overdrawn by 250 cents");
    }

    #[rstest]
    fn mixed_fields_are_passed_in_declaration_order() {
        let err = LedgerError::rejected("limit", 3_u8);
        assert_eq!(err.to_string(), "ledger rejected after 3: limit");
    }

    #[rstest]
    fn unit_variants_get_nullary_constructors() {
        assert_eq!(LedgerError::closed(), LedgerError::Closed);
    }
}
