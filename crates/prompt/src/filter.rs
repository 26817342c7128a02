// ABOUTME: Attribute filter deciding which attributes of an element survive into the prompt.
// ABOUTME: Test hooks and data-* always survive; class/style are gated on keep_styles.

use crate::options::Options;

/// Attribute names used by test tooling to look elements up.
pub const TEST_ID_ATTRS: &[&str] = &["testid", "test-id", "data-test", "data-cy", "data-testid"];

/// Presentational attributes dropped unless styles are kept.
pub const STYLE_ATTRS: &[&str] = &["class", "style"];

const DATA_PREFIX: &str = "data-";

/// Returns true if the name is a test-identifier attribute.
pub fn is_test_id_attr(name: &str) -> bool {
    TEST_ID_ATTRS.iter().any(|t| t.eq_ignore_ascii_case(name))
}

/// Returns true for `data-*` attributes, ignoring ASCII case.
pub fn is_data_attr(name: &str) -> bool {
    name.len() >= DATA_PREFIX.len()
        && name.as_bytes()[..DATA_PREFIX.len()].eq_ignore_ascii_case(DATA_PREFIX.as_bytes())
}

fn is_style_attr(name: &str) -> bool {
    STYLE_ATTRS.iter().any(|s| s.eq_ignore_ascii_case(name))
}

/// Decide whether a single attribute survives.
pub fn keep_attr(name: &str, opts: &Options) -> bool {
    // Test hooks and data-* win over every later rule.
    if is_test_id_attr(name) || is_data_attr(name) {
        return true;
    }
    if is_style_attr(name) {
        return opts.keep_styles;
    }
    true
}

/// Filter an element's attributes, keeping survivors in their original order.
pub fn filter_attrs(attrs: Vec<(String, String)>, opts: &Options) -> Vec<(String, String)> {
    attrs
        .into_iter()
        .filter(|(name, _)| keep_attr(name, opts))
        .collect()
}
