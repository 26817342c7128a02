// ABOUTME: Formatter orchestrating parse, reduce and serialize for one HTML input.
// ABOUTME: Also exposes the free functions format_html_for_prompt and format_request.

use std::sync::Arc;

use tracing::debug;

use crate::dom::{Html5everParser, HtmlParser};
use crate::error::FormatError;
use crate::options::{FormatRequest, FormatterBuilder, Options};
use crate::reduce::reduce_document;
use crate::result::FormatResult;
use crate::serialize::serialize_document;

/// Turns HTML into a compact prompt rendering.
///
/// A `Formatter` holds only immutable options and a parser, so one instance
/// can serve concurrent calls; every call works on its own freshly parsed tree.
#[derive(Debug, Clone)]
pub struct Formatter {
    opts: Options,
    parser: Arc<dyn HtmlParser>,
}

impl Formatter {
    /// Create a new FormatterBuilder for configuring the formatter.
    pub fn builder() -> FormatterBuilder {
        FormatterBuilder::new()
    }

    /// Create a Formatter with the given options and the default parser.
    pub fn new(opts: Options) -> Self {
        Self::with_parser(opts, Arc::new(Html5everParser))
    }

    /// Create a Formatter with a custom parser collaborator.
    pub fn with_parser(opts: Options, parser: Arc<dyn HtmlParser>) -> Self {
        Self { opts, parser }
    }

    pub fn options(&self) -> &Options {
        &self.opts
    }

    /// Format HTML into indented, newline-terminated pseudo-HTML.
    pub fn format(&self, html: &str) -> Result<String, FormatError> {
        self.format_with_stats(html).map(|result| result.content)
    }

    /// Format HTML and report what the reduction removed.
    ///
    /// Parser errors are returned exactly as the parser produced them.
    pub fn format_with_stats(&self, html: &str) -> Result<FormatResult, FormatError> {
        let _span = tracing::info_span!("format", input_bytes = html.len()).entered();

        self.opts.validate()?;

        let document = self.parser.parse(html)?;
        let reduced = reduce_document(document, &self.opts);
        let content = serialize_document(&reduced.document, &self.opts);

        debug!(
            pruned = reduced.stats.pruned,
            collapsed = reduced.stats.collapsed,
            blank_text = reduced.stats.blank_text,
            dropped_attrs = reduced.stats.dropped_attrs,
            skipped = reduced.stats.skipped,
            output_bytes = content.len(),
            "formatted html for prompt"
        );

        Ok(FormatResult {
            input_bytes: html.len(),
            output_bytes: content.len(),
            stats: reduced.stats,
            content,
        })
    }
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new(Options::default())
    }
}

/// Format HTML with the given options and the default parser.
pub fn format_html_for_prompt(html: &str, opts: &Options) -> Result<String, FormatError> {
    Formatter::new(opts.clone()).format(html)
}

/// Format a caller-supplied request record.
pub fn format_request(req: &FormatRequest) -> Result<String, FormatError> {
    Formatter::new(req.options()).format(&req.html)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Document, Element};
    use pretty_assertions::assert_eq;

    #[derive(Debug)]
    struct FailingParser;

    impl HtmlParser for FailingParser {
        fn parse(&self, _html: &str) -> Result<Document, FormatError> {
            Err(FormatError::parse(
                "FailingParser",
                Some(anyhow::anyhow!("tokenizer exploded")),
            ))
        }
    }

    #[derive(Debug)]
    struct FixedParser(Document);

    impl HtmlParser for FixedParser {
        fn parse(&self, _html: &str) -> Result<Document, FormatError> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn format_returns_prompt_text() {
        let out = Formatter::default()
            .format("<div><span></span><span></span><p>content</p><div></div></div>")
            .unwrap();
        assert_eq!(out, "<p>content</p>\n");
    }

    #[test]
    fn parser_errors_propagate_unchanged() {
        let formatter = Formatter::builder().parser(FailingParser).build();
        let err = formatter.format("<p>x</p>").unwrap_err();
        assert!(err.is_parse());
        assert_eq!(err.op, "FailingParser");
        assert_eq!(
            err.source.as_ref().map(|e| e.to_string()),
            Some("tokenizer exploded".to_string())
        );
    }

    #[test]
    fn invalid_options_fail_before_parsing() {
        let formatter = Formatter::builder()
            .max_attr_len(0)
            .parser(FailingParser)
            .build();
        let err = formatter.format("<p>x</p>").unwrap_err();
        assert!(err.is_invalid_options());
    }

    #[test]
    fn custom_parser_tree_is_used() {
        let doc = Document::new(vec![Element::new("div")
            .with_child(Element::new("button").with_attr("testid", "ok").with_text("OK"))
            .into()]);
        let formatter = Formatter::builder().parser(FixedParser(doc)).build();
        assert_eq!(
            formatter.format("ignored").unwrap(),
            "<button testid=\"ok\">OK</button>\n"
        );
    }

    #[test]
    fn stats_and_sizes_are_reported() {
        let html = "<div class=\"wrap\"><p>hi</p></div>";
        let result = Formatter::default().format_with_stats(html).unwrap();
        assert_eq!(result.content, "<p>hi</p>\n");
        assert_eq!(result.input_bytes, html.len());
        assert_eq!(result.output_bytes, "<p>hi</p>\n".len());
        assert_eq!(result.stats.collapsed, 1);
        assert_eq!(result.stats.dropped_attrs, 1);
    }

    #[test]
    fn format_request_applies_options() {
        let req = FormatRequest {
            html: "<a class=\"btn\" href=\"/abcdefghij\">Go</a>".to_string(),
            keep_styles: Some(true),
            max_attr_len: Some(4),
            ..Default::default()
        };
        assert_eq!(
            format_request(&req).unwrap(),
            "<a class=\"btn\" href=\"/abc...7 more characters\">Go</a>\n"
        );
    }

    #[test]
    fn free_function_matches_formatter() {
        let html = "<nav><a href=\"/\">Home</a></nav>";
        assert_eq!(
            format_html_for_prompt(html, &Options::default()).unwrap(),
            Formatter::default().format(html).unwrap()
        );
    }

    #[test]
    fn formatter_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Formatter>();
    }
}
