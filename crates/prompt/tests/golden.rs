// ABOUTME: Golden tests comparing formatter output for saved pages against expected renderings.
// ABOUTME: Fixtures live in tests/fixtures/html/*.html with expectations in tests/fixtures/*.txt.

use digests_prompt::Formatter;
use pretty_assertions::assert_eq;
use std::fs;

/// Load an HTML snapshot from the fixtures directory.
fn load_html_fixture(name: &str) -> String {
    let path = format!(
        "{}/tests/fixtures/html/{}.html",
        env!("CARGO_MANIFEST_DIR"),
        name
    );
    fs::read_to_string(&path).unwrap_or_else(|_| panic!("Failed to read HTML fixture: {}", path))
}

/// Load the expected rendering for a fixture.
fn load_expected(name: &str) -> String {
    let path = format!("{}/tests/fixtures/{}.txt", env!("CARGO_MANIFEST_DIR"), name);
    fs::read_to_string(&path).unwrap_or_else(|_| panic!("Failed to read expected output: {}", path))
}

fn page_formatter() -> Formatter {
    Formatter::builder()
        .skip_tag("script")
        .skip_tag("style")
        .build()
}

#[test]
fn golden_product_page() {
    let html = load_html_fixture("product");
    let actual = page_formatter().format(&html).unwrap();
    assert_eq!(actual, load_expected("product"));
}

#[test]
fn golden_product_page_is_stable_when_reformatted() {
    let formatter = page_formatter();
    let once = formatter.format(&load_html_fixture("product")).unwrap();
    let twice = formatter.format(&once).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn golden_product_page_keeps_styles_on_request() {
    let html = load_html_fixture("product");
    let formatter = Formatter::builder()
        .keep_styles(true)
        .skip_tag("script")
        .skip_tag("style")
        .build();
    let actual = formatter.format(&html).unwrap();

    assert!(actual.contains("<body class=\"page\">"));
    assert!(actual.contains("<div class=\"spacer\" style=\"height: 24px\"></div>"));
    assert!(actual.contains("<button type=\"button\" data-cy=\"add-to-cart\" class=\"btn\">"));
    // Styled wrappers are no longer bare, so they stay.
    assert!(actual.contains("<div class=\"header-wrap\">"));
}

#[test]
fn golden_product_page_without_skips_keeps_payloads_truncated() {
    let html = load_html_fixture("product");
    let formatter = Formatter::builder().max_content_len(10).build();
    let actual = formatter.format(&html).unwrap();

    assert!(actual.contains("<style>.hero { co...11 more characters</style>"));
    assert!(actual.contains(
        "<script id=\"__NEXT_DATA__\" type=\"application/json\">{\"props\":{...28 more characters</script>"
    ));
}
