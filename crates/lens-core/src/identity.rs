//! # Identity Newtypes
//!
//! Newtype wrappers for the three key namespaces of the reference data:
//! regions (countries or markets), cultural blocs, and sensitivity
//! frameworks. These prevent accidental identifier confusion, e.g. looking up
//! a bloc name in the framework table.
//!
//! All constructors trim surrounding whitespace and reject empty input.
//! Comparison is exact: `"Saudi Arabia"` and `"saudi arabia"` are different
//! regions, matching how the reference tables key them.

use serde::{Deserialize, Serialize};

use crate::error::LensError;

macro_rules! string_identifier {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Create a validated identifier.
            ///
            /// # Errors
            ///
            /// Returns [`LensError::EmptyIdentifier`] if the input is empty
            /// after trimming.
            pub fn new(value: impl AsRef<str>) -> Result<Self, LensError> {
                let trimmed = value.as_ref().trim();
                if trimmed.is_empty() {
                    return Err(LensError::EmptyIdentifier { kind: $kind });
                }
                Ok(Self(trimmed.to_string()))
            }

            /// Access the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = LensError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl std::str::FromStr for $name {
            type Err = LensError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl std::borrow::Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

string_identifier!(
    /// A country or market name keying a cultural profile, and the target
    /// region of an analysis (e.g. `"Saudi Arabia"`, `"Japan"`).
    RegionId,
    "region"
);

string_identifier!(
    /// A named cultural bloc (e.g. `"Gulf Cooperation Council"`).
    BlocName,
    "bloc"
);

string_identifier!(
    /// Stable machine identifier of a sensitivity framework
    /// (e.g. `"islamic_compliance"`).
    FrameworkId,
    "framework"
);

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn new_trims_whitespace() {
        let region = RegionId::new("  Japan \n").unwrap();
        assert_eq!(region.as_str(), "Japan");
    }

    #[test]
    fn new_rejects_empty() {
        assert_eq!(
            RegionId::new("   "),
            Err(LensError::EmptyIdentifier { kind: "region" })
        );
        assert!(BlocName::new("").is_err());
        assert!(FrameworkId::new("\t").is_err());
    }

    #[test]
    fn identifiers_are_case_sensitive() {
        assert_ne!(
            RegionId::new("Saudi Arabia").unwrap(),
            RegionId::new("saudi arabia").unwrap()
        );
    }

    #[test]
    fn serde_rejects_empty_identifier() {
        let result: Result<FrameworkId, _> = serde_json::from_str("\"\"");
        assert!(result.is_err());
    }

    #[test]
    fn serde_is_transparent_string() {
        let id = FrameworkId::new("islamic_compliance").unwrap();
        assert_eq!(
            serde_json::to_string(&id).unwrap(),
            "\"islamic_compliance\""
        );
    }

    #[test]
    fn borrow_allows_str_lookup() {
        let mut map = HashMap::new();
        map.insert(BlocName::new("Nordic").unwrap(), 5);
        assert_eq!(map.get("Nordic"), Some(&5));
    }

    #[test]
    fn display_matches_as_str() {
        let bloc = BlocName::new("Latin America").unwrap();
        assert_eq!(bloc.to_string(), bloc.as_str());
    }
}
