//! Regex-driven HTML minifier.
//!
//! [`minify`] runs a fixed pipeline over a whole HTML document. Every step
//! feeds the next, and the embedded sub-languages are handled before the
//! generic whitespace passes so their own rules win:
//!
//! | # | Step                 | Effect                                             |
//! |---|----------------------|----------------------------------------------------|
//! | 1 | comments             | drop `<!-- … -->`, keep conditional comments       |
//! | 2 | `<style>` blocks     | [`minify_css`] on the inner content                |
//! | 3 | `<script>` blocks    | [`minify_js`] on the inner content (not JSON-LD)   |
//! | 4 | JSON-LD blocks       | [`minify_json_ld`], verbatim on parse failure      |
//! | 5 | inter-tag whitespace | `>   <` becomes `><`                               |
//! | 6 | whitespace runs      | collapsed to one space                             |
//! | 7 | trim                 | leading and trailing whitespace removed            |
//!
//! This is a best-effort minifier, not a parser. Typical documents come out
//! with the same rendered tree and script behaviour; pathological inputs
//! (unterminated comments, `</script>` inside a string literal, `//` inside
//! a JS string) may not.
//!
//! ```rust
//! let html = "<div>   <span>x</span>   </div>";
//! assert_eq!(redo::minify::minify(html), "<div><span>x</span></div>");
//! ```

mod css;
mod js;
mod json_ld;

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

pub use css::minify_css;
pub use js::minify_js;
pub use json_ld::minify_json_ld;

/// `<!--` followed by anything but `[` or `>`. Conditional comments
/// (`<!--[if IE]>`) never match; `<!--<![endif]-->` is vetoed in
/// [`strip_comments`].
static HTML_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<!--[^\[>](?s:.*?)-->").unwrap());

/// `/* … */`, shared by the CSS and JS steps.
static BLOCK_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/\*(?s:.*?)\*/").unwrap());

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

static BETWEEN_TAGS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r">\s+<").unwrap());

/// Minifies a full HTML document.
///
/// Never fails: malformed JSON-LD is left as it was and every other step is
/// a plain substitution.
pub fn minify(html: &str) -> String {
    let html = strip_comments(html);
    let html = css::minify_style_blocks(&html);
    let html = js::minify_script_blocks(&html);
    let html = json_ld::minify_json_ld_blocks(&html);
    let html = BETWEEN_TAGS.replace_all(&html, "><");
    let html = WHITESPACE.replace_all(&html, " ");
    html.trim().to_owned()
}

/// Whether a `Content-Type` header value denotes an HTML document.
pub fn is_html(content_type: &str) -> bool {
    content_type.to_ascii_lowercase().contains("text/html")
}

fn strip_comments(html: &str) -> Cow<'_, str> {
    remove_unless(html, &HTML_COMMENT, |text, start| {
        text[start + "<!--".len()..].starts_with("<!")
    })
}

/// Removes every match of `re` that `keep` does not veto.
///
/// `keep` gets the whole text and the match start. A vetoed match only
/// skips its first byte, so a match starting inside it is still found.
/// Every pattern passed here starts with an ASCII byte.
fn remove_unless<'t>(
    text: &'t str,
    re: &Regex,
    keep: impl Fn(&str, usize) -> bool,
) -> Cow<'t, str> {
    let mut out = String::new();
    let mut copied = 0;
    let mut pos = 0;

    while let Some(m) = re.find_at(text, pos) {
        if keep(text, m.start()) {
            pos = m.start() + 1;
            continue;
        }
        out.push_str(&text[copied..m.start()]);
        copied = m.end();
        pos = m.end();
        if pos >= text.len() {
            break;
        }
    }

    if copied == 0 {
        return Cow::Borrowed(text);
    }
    out.push_str(&text[copied..]);
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_plain_comments() {
        let out = minify("<p>a</p><!-- a comment --><p>b</p>");
        assert_eq!(out, "<p>a</p><p>b</p>");
        assert!(!out.contains("a comment"));
    }

    #[test]
    fn test_strips_multiline_comment() {
        let out = minify("<p>a</p>\n<!--\n  spans\n  lines\n-->\n<p>b</p>");
        assert_eq!(out, "<p>a</p><p>b</p>");
    }

    #[test]
    fn test_keeps_conditional_comments() {
        let html = "<!--[if IE]><p>old browser</p><![endif]-->";
        assert_eq!(minify(html), html);
    }

    #[test]
    fn test_keeps_downlevel_revealed_closer() {
        let html = "<!--[if !IE]>--><p>modern</p><!--<![endif]-->";
        assert_eq!(minify(html), html);
    }

    #[test]
    fn test_vetoed_comment_does_not_hide_later_one() {
        let out = minify("<!--<!x<!-- y -->z");
        assert_eq!(out, "<!--<!xz");
    }

    #[test]
    fn test_style_collapsing() {
        assert_eq!(
            minify("<style>  body { color: red; }  </style>"),
            "<style>body{color:red;}</style>"
        );
    }

    #[test]
    fn test_style_keeps_tag_attributes_and_case() {
        let out = minify("<STYLE media=\"print\">\n/* x */\na , b {\n  margin : 0 ;\n}\n</STYLE>");
        assert_eq!(out, "<STYLE media=\"print\">a , b{margin:0;}</STYLE>");
    }

    #[test]
    fn test_json_ld_round_trip() {
        assert_eq!(
            minify(r#"<script type="application/ld+json">{ "a": 1, "b": [1,2] }</script>"#),
            r#"<script type="application/ld+json">{"a":1,"b":[1,2]}</script>"#
        );
    }

    #[test]
    fn test_json_ld_malformed_passthrough() {
        let html = r#"<script type="application/ld+json">{not valid json}</script>"#;
        assert_eq!(minify(html), html);
    }

    #[test]
    fn test_json_ld_skips_script_step() {
        // The generic script step would cut everything after `// `.
        let html = "<script type=\"application/ld+json\">\n{\"note\": \"a // b\"}\n</script>";
        assert_eq!(
            minify(html),
            r#"<script type="application/ld+json">{"note":"a // b"}</script>"#
        );
    }

    #[test]
    fn test_json_ld_keeps_key_order() {
        let html = r#"<script type="application/ld+json">{"z": 1, "a": {"y": 2, "b": 3}}</script>"#;
        assert_eq!(
            minify(html),
            r#"<script type="application/ld+json">{"z":1,"a":{"y":2,"b":3}}</script>"#
        );
    }

    #[test]
    fn test_url_preserved_in_script() {
        let out = minify(r#"<script>var x = "http://example.com/a//b"; // comment</script>"#);
        assert!(out.contains("http://example.com/a//b"));
        assert!(!out.contains("// comment"));
        assert_eq!(out, r#"<script>var x = "http://example.com/a//b";</script>"#);
    }

    #[test]
    fn test_inter_tag_whitespace() {
        assert_eq!(
            minify("<div>   <span>x</span>   </div>"),
            "<div><span>x</span></div>"
        );
    }

    #[test]
    fn test_text_whitespace_collapses_to_one_space() {
        assert_eq!(minify("  <p>hello \n\t world</p>\n"), "<p>hello world</p>");
    }

    #[test]
    fn test_empty_and_plain_input() {
        assert_eq!(minify(""), "");
        assert_eq!(minify("   \n "), "");
        assert_eq!(minify("hello"), "hello");
    }

    #[test]
    fn test_idempotent_on_typical_document() {
        let doc = r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <!-- page metadata -->
    <meta charset="utf-8">
    <title>  Redo  </title>
    <style>
      /* layout */
      body { margin: 0; font-family: sans-serif; }
      .card > p { color : #333 ; }
    </style>
    <script type="application/ld+json">
      { "@context": "https://schema.org", "@type": "WebSite", "name": "Redo" }
    </script>
    <!--[if lt IE 9]><script src="html5shiv.js"></script><![endif]-->
  </head>
  <body>
    <div class="card">
      <p>Hello,   world!</p>
    </div>
    <script>
      // greet the user
      const api = "https://api.example.com/v1//users";
      /* block
         comment */
      function greet(name) {
        return "hi " + name; // trailing
      }
    </script>
  </body>
</html>
"#;
        let once = minify(doc);
        assert_eq!(minify(&once), once);

        assert!(!once.contains("page metadata"));
        assert!(!once.contains("greet the user"));
        assert!(!once.contains("trailing"));
        assert!(once.contains("<!--[if lt IE 9]>"));
        assert!(once.contains("https://api.example.com/v1//users"));
        assert!(once.contains("body{margin:0;font-family:sans-serif;}"));
        assert!(once.contains(
            r#"{"@context":"https://schema.org","@type":"WebSite","name":"Redo"}"#
        ));
        assert!(once.starts_with("<!DOCTYPE html><html lang=\"en\"><head><meta"));
    }

    #[test]
    fn test_idempotent_over_samples() {
        let samples = [
            r#"<script type="application/ld+json">{"id": 123456789012345678901234567890, "n": 1.10}</script>"#,
            r#"<script type="application/ld+json">{"name": "a\u003c/script><img src=x>"}</script><p>after</p>"#,
            "<script type=\"application/ld+json\">\n  {not   valid\n\t json}\n</script>",
            "<script>\n  x();//note\n  y();\n</script>",
            "<script>\n  a = 1;//x\n  b = 2;\n</script>",
            "<script>\n  if (a > b) {   c();   }\n</script>\n<p> <b>t</b> </p>",
            "<style>\n  a:hover  >  b { color : red }\n</style>",
        ];
        for html in samples {
            let once = minify(html);
            assert_eq!(minify(&once), once, "not idempotent for {html:?}");
        }
    }

    #[test]
    fn test_whitespace_collapse_after_block_steps() {
        assert_eq!(
            minify("<script type=\"application/ld+json\">\n  {not   valid\n\t json}\n</script>"),
            r#"<script type="application/ld+json"> {not valid json} </script>"#
        );
        assert_eq!(
            minify("<script>\n  a = 1;//x\n  b = 2;\n</script>"),
            "<script>a = 1; b = 2;</script>"
        );
    }

    #[test]
    fn test_json_ld_number_and_escape_fidelity() {
        assert_eq!(
            minify(r#"<script type="application/ld+json">{"id": 123456789012345678901234567890, "n": 1.10}</script>"#),
            r#"<script type="application/ld+json">{"id":123456789012345678901234567890,"n":1.10}</script>"#
        );
        assert_eq!(
            minify(r#"<script type="application/ld+json">{"name": "a\u003c/script><img src=x>"}</script><p>after</p>"#),
            r#"<script type="application/ld+json">{"name":"a\u003c/script\u003e\u003cimg src=x\u003e"}</script><p>after</p>"#
        );
    }

    #[test]
    fn test_is_html() {
        assert!(is_html("text/html"));
        assert!(is_html("text/html; charset=utf-8"));
        assert!(is_html("Text/HTML"));
        assert!(!is_html("application/json"));
        assert!(!is_html(""));
    }
}
