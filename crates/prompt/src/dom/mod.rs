// ABOUTME: Owned DOM model and the parser boundary that produces it.
// ABOUTME: Re-exports Node, Element, Document, HtmlParser and Html5everParser.

//! DOM model for the prompt pipeline.
//!
//! The pipeline never works on a live DOM. A parser collaborator builds an
//! owned tree once per call, and every later pass consumes and returns nodes.

pub mod node;
pub mod parser;

pub use node::{Document, Element, Node};
pub use parser::{Html5everParser, HtmlParser};
