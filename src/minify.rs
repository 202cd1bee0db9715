//! Whitespace collapse for rendered HTML.
//!
//! This is not an HTML minifier. It does not know about `<pre>`, `<script>` or
//! `<textarea>` and will strip significant whitespace inside them. Existing views
//! rely on this exact output, so it stays this crude.

use once_cell::sync::Lazy;
use regex::Regex;

/// Two or more ASCII whitespace characters in a row.
static WHITESPACE_RUNS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?-u:\s){2,}").expect("whitespace run pattern is valid"));

static LINE_BREAKS_AND_TABS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\r\n\t]").expect("line break pattern is valid"));

/// Removes every run of two or more whitespace characters, then every remaining
/// carriage return, line feed and tab.
///
/// Single spaces survive: `"<p>  hi\n\tthere</p>"` becomes `"<p>hithere</p>"`
/// while `"<p>hi there</p>"` is unchanged.
pub fn minify(html: &str) -> String {
    let collapsed = WHITESPACE_RUNS.replace_all(html, "");
    LINE_BREAKS_AND_TABS.replace_all(&collapsed, "").into_owned()
}
