mod core;
mod format;
mod parse;
#[cfg(feature = "serde")]
mod serde_;

pub use self::core::Angle;
pub use format::{DmsFmt, HmsFmt};
pub use parse::{parse_dms, parse_hms};
