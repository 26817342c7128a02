// ABOUTME: Configuration for the prompt formatter: Options, FormatRequest and FormatterBuilder.
// ABOUTME: FormatterBuilder provides a fluent API for constructing Formatter instances.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::dom::parser::HtmlParser;
use crate::error::FormatError;
use crate::formatter::Formatter;

/// Characters of an attribute value shown before truncation.
///
/// Long enough for ids, test hooks, URLs and short labels; short enough that
/// data URIs and serialized JSON blobs are cut.
pub const DEFAULT_MAX_ATTR_LEN: usize = 100;

/// Characters of a text node shown before truncation.
pub const DEFAULT_MAX_CONTENT_LEN: usize = 1000;

/// Configuration options for a format call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Keep `class` and `style` attributes.
    pub keep_styles: bool,
    pub max_attr_len: usize,
    pub max_content_len: usize,
    /// Elements dropped together with their subtree before reduction.
    pub skip_tags: Vec<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            keep_styles: false,
            max_attr_len: DEFAULT_MAX_ATTR_LEN,
            max_content_len: DEFAULT_MAX_CONTENT_LEN,
            skip_tags: Vec::new(),
        }
    }
}

impl Options {
    /// Check that both truncation limits are positive.
    pub fn validate(&self) -> Result<(), FormatError> {
        if self.max_attr_len == 0 {
            return Err(FormatError::invalid_options(
                "Validate",
                Some(anyhow::anyhow!("max_attr_len must be positive")),
            ));
        }
        if self.max_content_len == 0 {
            return Err(FormatError::invalid_options(
                "Validate",
                Some(anyhow::anyhow!("max_content_len must be positive")),
            ));
        }
        Ok(())
    }

    /// Returns true if elements with this tag are dropped wholesale.
    pub fn is_skipped(&self, tag: &str) -> bool {
        self.skip_tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }
}

/// A single format request as received from a caller, e.g. over JSON.
///
/// Unset fields fall back to the `Options` defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FormatRequest {
    pub html: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keep_styles: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_attr_len: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_content_len: Option<usize>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skip_tags: Vec<String>,
}

impl FormatRequest {
    /// Create a request for the given HTML with default options.
    pub fn new(html: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            ..Default::default()
        }
    }

    /// Resolve the request's optional fields against the defaults.
    pub fn options(&self) -> Options {
        let defaults = Options::default();
        Options {
            keep_styles: self.keep_styles.unwrap_or(defaults.keep_styles),
            max_attr_len: self.max_attr_len.unwrap_or(defaults.max_attr_len),
            max_content_len: self.max_content_len.unwrap_or(defaults.max_content_len),
            skip_tags: self.skip_tags.clone(),
        }
    }
}

/// Builder for constructing Formatter instances with custom configuration.
#[derive(Debug, Clone)]
pub struct FormatterBuilder {
    opts: Options,
    parser: Option<Arc<dyn HtmlParser>>,
}

impl FormatterBuilder {
    /// Create a new FormatterBuilder with default options.
    pub fn new() -> Self {
        Self {
            opts: Options::default(),
            parser: None,
        }
    }

    /// Start from an existing set of options.
    pub fn options(mut self, opts: Options) -> Self {
        self.opts = opts;
        self
    }

    /// Keep or drop `class` and `style` attributes.
    pub fn keep_styles(mut self, keep: bool) -> Self {
        self.opts.keep_styles = keep;
        self
    }

    /// Set the attribute value truncation limit.
    pub fn max_attr_len(mut self, len: usize) -> Self {
        self.opts.max_attr_len = len;
        self
    }

    /// Set the text content truncation limit.
    pub fn max_content_len(mut self, len: usize) -> Self {
        self.opts.max_content_len = len;
        self
    }

    /// Drop every element with this tag, subtree included.
    pub fn skip_tag(mut self, tag: impl Into<String>) -> Self {
        self.opts.skip_tags.push(tag.into());
        self
    }

    /// Use a custom parser collaborator.
    pub fn parser(mut self, parser: impl HtmlParser + 'static) -> Self {
        self.parser = Some(Arc::new(parser));
        self
    }

    /// Build the Formatter with the configured options.
    pub fn build(self) -> Formatter {
        match self.parser {
            Some(parser) => Formatter::with_parser(self.opts, parser),
            None => Formatter::new(self.opts),
        }
    }
}

impl Default for FormatterBuilder {
    fn default() -> Self {
        Self::new()
    }
}
