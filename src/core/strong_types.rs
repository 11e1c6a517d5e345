// Strong Types - newtypes and closed value sets used across the crate

use serde::{Deserialize, Serialize};
use std::fmt;

/// Strongly-typed user reference - users live in the external identity
/// provider, so this is an opaque id rather than a foreign key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(pub i64);

impl UserId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn value(self) -> i64 {
        self.0
    }

    /// Identity provider ids are always positive
    pub fn is_valid(self) -> bool {
        self.0 > 0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<UserId> for i64 {
    fn from(id: UserId) -> Self {
        id.0
    }
}

/// Raised when a stored or submitted string is not part of a closed value set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownValue {
    pub kind: &'static str,
    pub value: String,
}

impl fmt::Display for UnknownValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' is not a valid {}", self.value, self.kind)
    }
}

impl std::error::Error for UnknownValue {}

/// Declares a closed set of string values stored as TEXT columns.
///
/// Generates the enum with snake_case serde names, `as_str`, `Display`
/// and an exact-match `FromStr` that reports `UnknownValue`. Callers trim.
#[macro_export]
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($variant:ident => $text:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::core::strong_types::UnknownValue;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    other => Err($crate::core::strong_types::UnknownValue {
                        kind: stringify!($name),
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    string_enum! {
        pub enum Shade {
            Light => "light",
            DarkGrey => "dark_grey",
        }
    }

    #[test]
    fn test_user_id_operations() {
        let id = UserId::new(42);
        assert_eq!(id.value(), 42);
        assert!(id.is_valid());
        assert!(!UserId::new(0).is_valid());
        assert_eq!(serde_json::to_string(&id).unwrap(), "42");
    }

    #[test]
    fn test_string_enum_round_trip() {
        assert_eq!("dark_grey".parse::<Shade>().unwrap(), Shade::DarkGrey);
        assert_eq!(Shade::Light.to_string(), "light");
        assert_eq!(serde_json::to_string(&Shade::DarkGrey).unwrap(), "\"dark_grey\"");
    }

    #[test]
    fn test_string_enum_is_exact_match() {
        let err = "Light".parse::<Shade>().unwrap_err();
        assert_eq!(err.kind, "Shade");
        assert_eq!(err.value, "Light");
        assert!("lig".parse::<Shade>().is_err());
        assert!(" light ".parse::<Shade>().is_err());
    }
}
