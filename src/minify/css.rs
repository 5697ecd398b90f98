//! `<style>` block minification.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::{BLOCK_COMMENT, WHITESPACE};

static STYLE_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)(<style[^>]*>)(.*?)(</style>)").unwrap());

static AROUND_PUNCT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*([{:;}])\s*").unwrap());

/// Minifies a stylesheet: drops `/* … */` comments, collapses whitespace,
/// and removes whitespace next to `{`, `:`, `;` and `}`.
///
/// ```rust
/// assert_eq!(redo::minify::minify_css(" a { color : red ; } "), "a{color:red;}");
/// ```
pub fn minify_css(content: &str) -> String {
    let css = BLOCK_COMMENT.replace_all(content, "");
    let css = WHITESPACE.replace_all(&css, " ");
    let css = AROUND_PUNCT.replace_all(&css, "${1}");
    css.trim().to_owned()
}

/// Rewrites the content of every `<style>` block, tags kept verbatim.
pub(super) fn minify_style_blocks(html: &str) -> Cow<'_, str> {
    STYLE_BLOCK.replace_all(html, |caps: &Captures<'_>| {
        format!("{}{}{}", &caps[1], minify_css(&caps[2]), &caps[3])
    })
}
