// ABOUTME: Main library entry point for the digests HTML-to-prompt normalizer.
// ABOUTME: Re-exports the public API: Formatter, FormatterBuilder, Options, FormatRequest, FormatResult, FormatError.

//! digests-prompt - turns rendered HTML into a compact rendering for language models.
//!
//! The pipeline parses the input once, filters attributes, prunes empty
//! markup, collapses bare `div`/`span` wrappers and serializes what is left as
//! indented pseudo-HTML with long attribute values and text truncated.
//!
//! # Example
//!
//! ```
//! use digests_prompt::{Formatter, FormatError};
//!
//! fn main() -> Result<(), FormatError> {
//!     let formatter = Formatter::builder().max_attr_len(40).build();
//!     let out = formatter.format("<div><div><a href=\"/docs\">Docs</a></div></div>")?;
//!     assert_eq!(out, "<a href=\"/docs\">Docs</a>\n");
//!     Ok(())
//! }
//! ```

pub mod dom;
pub mod error;
pub mod filter;
pub mod formatter;
pub mod options;
pub mod reduce;
pub mod result;
pub mod serialize;
pub mod source;

pub use crate::dom::{Document, Element, Html5everParser, HtmlParser, Node};
pub use crate::error::{ErrorCode, FormatError};
pub use crate::formatter::{format_html_for_prompt, format_request, Formatter};
pub use crate::options::{
    FormatRequest, FormatterBuilder, Options, DEFAULT_MAX_ATTR_LEN, DEFAULT_MAX_CONTENT_LEN,
};
pub use crate::reduce::{reduce, reduce_document, reduce_root, ReduceStats, Reduced};
pub use crate::result::FormatResult;
pub use crate::serialize::{serialize, serialize_document, truncate};

/// Result alias for fallible operations in this crate.
pub type Result<T> = std::result::Result<T, FormatError>;
