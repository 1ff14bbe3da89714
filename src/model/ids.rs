//! Typed identifiers.
//!
//! Every resource id is a sequential `u32` handed out by its actor. Ids serialize as
//! plain numbers, log as `<kind>_<n>` and parse from either form, so `/order/12/status`
//! and `/order/order_12/status` address the same order.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind} id: {input:?}")]
pub struct ParseIdError {
    pub kind: &'static str,
    pub input: String,
}

macro_rules! entity_id {
    ($($name:ident => $prefix:literal),* $(,)?) => {
        paste::paste! {
            $(
                #[doc = "Type-safe identifier for " $name " records."]
                #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
                #[serde(transparent)]
                pub struct [<$name Id>](pub u32);

                impl From<u32> for [<$name Id>] {
                    fn from(id: u32) -> Self {
                        Self(id)
                    }
                }

                impl fmt::Display for [<$name Id>] {
                    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                        write!(f, concat!($prefix, "_{}"), self.0)
                    }
                }

                impl FromStr for [<$name Id>] {
                    type Err = ParseIdError;

                    fn from_str(s: &str) -> Result<Self, Self::Err> {
                        let digits = s.strip_prefix(concat!($prefix, "_")).unwrap_or(s);
                        digits.parse::<u32>().map(Self).map_err(|_| ParseIdError {
                            kind: $prefix,
                            input: s.to_string(),
                        })
                    }
                }
            )*
        }
    };
}

entity_id! {
    Party => "party",
    Material => "material",
    Address => "address",
    Order => "order",
}
