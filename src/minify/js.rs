//! `<script>` block minification.
//!
//! Comment and whitespace removal only: no renaming, no semantic rewriting.
//! URLs are swapped out for placeholders first so `//` inside them is not
//! taken for a line comment.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::json_ld::is_json_ld_tag;
use super::{BLOCK_COMMENT, WHITESPACE, remove_unless};

pub(super) static SCRIPT_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)(<script[^>]*>)(.*?)(</script>)").unwrap());

static URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(https?:)?//[^\s/$.?#].[^\s]*").unwrap());

static LINE_COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"//[^\n]*").unwrap());

/// Private-use delimiters around the placeholder index.
const PLACEHOLDER_OPEN: char = '\u{E000}';
const PLACEHOLDER_CLOSE: char = '\u{E001}';

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x{E000}(\d+)\x{E001}").unwrap());

/// URLs lifted out of one script body, indexed by placeholder number.
#[derive(Default)]
struct UrlGuard {
    urls: Vec<String>,
}

impl UrlGuard {
    fn hide<'t>(&mut self, js: &'t str) -> Cow<'t, str> {
        URL.replace_all(js, |caps: &Captures<'_>| {
            self.urls.push(caps[0].to_owned());
            format!("{PLACEHOLDER_OPEN}{}{PLACEHOLDER_CLOSE}", self.urls.len() - 1)
        })
    }

    fn restore<'t>(&self, js: &'t str) -> Cow<'t, str> {
        if self.urls.is_empty() {
            return Cow::Borrowed(js);
        }
        PLACEHOLDER.replace_all(js, |caps: &Captures<'_>| {
            caps[1]
                .parse::<usize>()
                .ok()
                .and_then(|i| self.urls.get(i))
                .map_or_else(|| caps[0].to_owned(), String::clone)
        })
    }
}

/// Minifies a script body: strips `//` and `/* … */` comments and collapses
/// whitespace, leaving URLs intact.
///
/// A `//` directly after `:` is never treated as a comment.
///
/// ```rust
/// let js = "let u = 'https://a.io/x'; // note\nlet v = 1;";
/// assert_eq!(redo::minify::minify_js(js), "let u = 'https://a.io/x'; let v = 1;");
/// ```
pub fn minify_js(content: &str) -> String {
    let mut guard = UrlGuard::default();

    let js = guard.hide(content);
    let js = remove_unless(&js, &LINE_COMMENT, |text, start| text[..start].ends_with(':'));
    let js = BLOCK_COMMENT.replace_all(&js, "");
    let js = WHITESPACE.replace_all(&js, " ");
    let js = guard.restore(&js);

    js.trim().to_owned()
}

/// Rewrites the content of every `<script>` block except JSON-LD ones,
/// which belong to the JSON-LD step.
pub(super) fn minify_script_blocks(html: &str) -> Cow<'_, str> {
    SCRIPT_BLOCK.replace_all(html, |caps: &Captures<'_>| {
        if is_json_ld_tag(&caps[1]) {
            return caps[0].to_owned();
        }
        format!("{}{}{}", &caps[1], minify_js(&caps[2]), &caps[3])
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minify_js_comments() {
        let js = "/* header */\nvar a = 1; // one\n\n// alone\nvar b = 2;\n";
        assert_eq!(minify_js(js), "var a = 1; var b = 2;");
    }

    #[test]
    fn test_minify_js_protocol_relative_url() {
        let js = "load('//cdn.example.com/lib.js'); // go";
        assert_eq!(minify_js(js), "load('//cdn.example.com/lib.js');");
    }

    #[test]
    fn test_minify_js_colon_guard() {
        // `://` followed by whitespace is no URL, but the colon still guards it.
        let js = "var s = 'x:// y';";
        assert_eq!(minify_js(js), "var s = 'x:// y';");
    }

    #[test]
    fn test_minify_js_several_urls() {
        let js = "a('http://one.test/a');\nb('https://two.test/b'); // c\n";
        assert_eq!(
            minify_js(js),
            "a('http://one.test/a'); b('https://two.test/b');"
        );
    }

    #[test]
    fn test_minify_js_url_inside_comment_dropped() {
        let js = "x(); // see https://docs.test/page\ny();";
        assert_eq!(minify_js(js), "x(); y();");
    }

    #[test]
    fn test_script_blocks_skip_json_ld() {
        let html = "<script type=\"application/ld+json\">{ \"a\" : 1 } // x</script><script>\n  go(); // now\n</script>";
        assert_eq!(
            minify_script_blocks(html),
            "<script type=\"application/ld+json\">{ \"a\" : 1 } // x</script><script>go();</script>"
        );
    }

    #[test]
    fn test_script_blocks_keep_src_tag() {
        let html = "<SCRIPT src=\"/app.js\" defer></SCRIPT>";
        assert_eq!(minify_script_blocks(html), html);
    }
}
