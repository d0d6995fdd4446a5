//! Macro for implementing Display and FromStr for wire enums
//!
//! The admin API spells its enums in SCREAMING_CASE (`MONTHLY`,
//! `WHOLE_NUMBER`) or lowercase (`asc`). This macro generates the `Display`
//! and `FromStr` pair so CLI arguments and query strings agree with the wire
//! spelling. Parsing is case-insensitive.
//!
//! # Example
//!
//! ```rust
//! use memberdesk_domain::impl_wire_enum_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Billing {
//!     Monthly,
//!     Yearly,
//! }
//!
//! impl_wire_enum_conversions!(Billing {
//!     Monthly => "MONTHLY",
//!     Yearly => "YEARLY",
//! });
//!
//! assert_eq!(Billing::Monthly.to_string(), "MONTHLY");
//! assert_eq!("yearly".parse::<Billing>().unwrap(), Billing::Yearly);
//! ```

/// Implements Display and FromStr traits for wire enums
///
/// This macro generates:
/// - Display trait: writes the exact wire spelling
/// - FromStr trait: parses the wire spelling ignoring ASCII case
#[macro_export]
macro_rules! impl_wire_enum_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(Self::$variant => f.write_str($str),)+
                }
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                $(
                    if s.eq_ignore_ascii_case($str) {
                        return Ok(Self::$variant);
                    }
                )+
                Err(format!("Invalid {}: {}", stringify!($enum_name), s))
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum TestKind {
        Percent,
        WholeNumber,
    }

    impl_wire_enum_conversions!(TestKind {
        Percent => "PERCENT",
        WholeNumber => "WHOLE_NUMBER",
    });

    #[test]
    fn test_display_uses_wire_spelling() {
        assert_eq!(TestKind::Percent.to_string(), "PERCENT");
        assert_eq!(TestKind::WholeNumber.to_string(), "WHOLE_NUMBER");
    }

    #[test]
    fn test_fromstr_ignores_case() {
        assert_eq!(TestKind::from_str("percent").unwrap(), TestKind::Percent);
        assert_eq!(TestKind::from_str("Whole_Number").unwrap(), TestKind::WholeNumber);
    }

    #[test]
    fn test_fromstr_invalid() {
        let result = TestKind::from_str("fixed");
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Invalid TestKind: fixed"));
    }

    #[test]
    fn test_fromstr_empty() {
        assert!(TestKind::from_str("").is_err());
    }
}
