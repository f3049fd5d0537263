//! # ArborDB Format
//!
//! Locale-aware rendering for the presentation layer: node keys become
//! spelled-out cardinal labels, creation instants become wall-clock
//! timestamps in a requested zone.
//!
//! Everything here is total. Unsupported locale tags normalize to
//! English, unknown zone names fall back to UTC, and the spellers cover
//! all of `i64`. Tree logic never depends on this crate; it renders what
//! the engine already decided.
//!
//! ## Usage
//!
//! ```
//! use arbordb_format::{render_label, Locale};
//! use arbordb_store::NodeKey;
//!
//! let locale = Locale::from_tag("es-MX,es;q=0.9");
//! assert_eq!(render_label(NodeKey::new(45), locale), "cuarenta y cinco");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod labels;
mod locale;
mod timestamps;

pub use labels::render_label;
pub use locale::Locale;
pub use timestamps::{render_timestamp, zone_from_tag};
