//! `<script type="application/ld+json">` block minification.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde_json::Value;
use tracing::debug;

use super::js::SCRIPT_BLOCK;

static JSON_LD_TYPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)\stype\s*=\s*(?:"application/ld\+json"|'application/ld\+json'|application/ld\+json(?:[\s/>]|$))"#,
    )
    .unwrap()
});

/// Whether a `<script …>` opening tag declares JSON-LD content.
pub(super) fn is_json_ld_tag(open_tag: &str) -> bool {
    JSON_LD_TYPE.is_match(open_tag)
}

/// Re-serialises a JSON document without insignificant whitespace.
///
/// Object keys keep their source order and numbers keep their source text.
/// `<`, `>` and `&` are written as `\u003c`, `\u003e` and `\u0026` so no
/// string value can close the surrounding `<script>` element. Returns
/// `None` when `content` is not valid JSON.
///
/// ```rust
/// let out = redo::minify::minify_json_ld(r#"{ "b": [1, 2], "a": null }"#);
/// assert_eq!(out.as_deref(), Some(r#"{"b":[1,2],"a":null}"#));
/// assert_eq!(redo::minify::minify_json_ld("{oops}"), None);
/// ```
pub fn minify_json_ld(content: &str) -> Option<String> {
    let value: Value = match serde_json::from_str(content) {
        Ok(value) => value,
        Err(err) => {
            debug!(%err, "malformed JSON-LD left as is");
            return None;
        }
    };
    serde_json::to_string(&value).ok().map(escape_markup)
}

/// These characters only occur inside JSON strings, where the `\u` escape
/// is the same value.
fn escape_markup(json: String) -> String {
    if !json.contains(['<', '>', '&']) {
        return json;
    }
    let mut out = String::with_capacity(json.len() + 16);
    for c in json.chars() {
        match c {
            '<' => out.push_str("\\u003c"),
            '>' => out.push_str("\\u003e"),
            '&' => out.push_str("\\u0026"),
            c => out.push(c),
        }
    }
    out
}

/// Rewrites every JSON-LD block. Blocks that fail to parse are kept
/// byte-for-byte.
pub(super) fn minify_json_ld_blocks(html: &str) -> Cow<'_, str> {
    SCRIPT_BLOCK.replace_all(html, |caps: &Captures<'_>| {
        if !is_json_ld_tag(&caps[1]) {
            return caps[0].to_owned();
        }
        match minify_json_ld(&caps[2]) {
            Some(json) => format!("{}{}{}", &caps[1], json, &caps[3]),
            None => caps[0].to_owned(),
        }
    })
}
