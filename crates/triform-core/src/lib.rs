//! # triform-core
//!
//! Convert documents between **JSON**, **XML**, and **YAML** through a shared
//! in-memory value model, with pretty and minified output modes.
//!
//! The source format is auto-detected from the first non-whitespace character
//! of the input (`{`/`[` is JSON, `<` is XML, anything else is YAML), the
//! matching codec parses it into a [`Value`], and the target codec
//! re-serializes it. Key order survives the trip, so converting the same
//! document twice produces byte-identical output.
//!
//! ## Quick start
//!
//! ```rust
//! use triform_core::{convert, ConvertOptions, Format};
//!
//! let yaml = convert(r#"{"name":"Ada"}"#, Format::Yaml, &ConvertOptions::default()).unwrap();
//! assert_eq!(yaml, "name: Ada\n");
//!
//! let minified = convert("name: Ada", Format::Json, &ConvertOptions { minify: true }).unwrap();
//! assert_eq!(minified, r#"{"name":"Ada"}"#);
//! ```
//!
//! ## Modules
//!
//! - [`convert`] — format detection and the public entry point
//! - [`json`], [`xml`], [`yaml`] — the three codecs
//! - [`value`] — the shared `Value` tagged union
//! - [`error`] — the two terminal error kinds (parse/serialize)

pub mod convert;
pub mod error;
pub mod json;
pub mod value;
pub mod xml;
pub mod yaml;

pub use convert::{convert, ConvertOptions, Format};
pub use error::ConvertError;
pub use value::{Number, Value};
