//! Anchor extraction from auto-generated directory listing pages.
//!
//! Runs the page through the html5ever tokenizer and collects the `href` of
//! every `<a>` start tag. Character references in attribute values are
//! decoded and commented-out markup never produces a tag.

use core::cell::RefCell;

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use html5ever::tendril::StrTendril;
use html5ever::tokenizer::{
    BufferQueue, TagKind, Token, TokenSink, TokenSinkResult, Tokenizer, TokenizerOpts,
};

use super::{DEFAULT_EXTENSIONS, Manifest, ManifestWarning, has_extension};

/// Parse a directory listing, keeping links to [`DEFAULT_EXTENSIONS`] files.
pub fn parse_listing(html: &str) -> Manifest {
    parse_listing_with(html, DEFAULT_EXTENSIONS)
}

/// Parse a directory listing, keeping links whose target ends with one of
/// `extensions` (case-insensitive, dot included).
pub fn parse_listing_with(html: &str, extensions: &[&str]) -> Manifest {
    let mut manifest = Manifest::default();
    for href in anchor_hrefs(html) {
        if href.is_empty() {
            skip(&mut manifest.warnings, href, "empty link");
        } else if href == "../" {
            skip(&mut manifest.warnings, href, "parent directory");
        } else if has_extension(&href, extensions) {
            manifest.entries.push(href);
        } else {
            skip(&mut manifest.warnings, href, "unsupported extension");
        }
    }
    manifest
}

fn skip(warnings: &mut Vec<ManifestWarning>, href: String, reason: &'static str) {
    warnings.push(ManifestWarning::SkippedLink { href, reason });
}

/// Collects anchor targets as the tokenizer emits start tags.
#[derive(Default)]
struct AnchorSink {
    hrefs: RefCell<Vec<String>>,
}

impl TokenSink for AnchorSink {
    type Handle = ();

    fn process_token(&self, token: Token, _line_number: u64) -> TokenSinkResult<()> {
        if let Token::TagToken(tag) = token
            && tag.kind == TagKind::StartTag
            && &*tag.name == "a"
            && let Some(href) = tag.attrs.iter().find(|attr| &*attr.name.local == "href")
        {
            self.hrefs.borrow_mut().push(href.value.to_string());
        }
        TokenSinkResult::Continue
    }
}

/// `href` values of every anchor tag, in document order.
fn anchor_hrefs(html: &str) -> Vec<String> {
    let input = BufferQueue::default();
    input.push_back(StrTendril::from(html));
    let tokenizer = Tokenizer::new(AnchorSink::default(), TokenizerOpts::default());
    let _ = tokenizer.feed(&input);
    tokenizer.end();
    tokenizer.sink.hrefs.take()
}

#[cfg(test)]
mod tests {
    use super::*;

    const NGINX: &str = r#"<html>
<head><title>Index of /assets/</title></head>
<body>
<h1>Index of /assets/</h1><hr><pre><a href="../">../</a>
<a href="2024-01-01-sunrise.gif">2024-01-01-sunrise.gif</a>    01-Jan-2024 08:00  1048576
<a href="2024-03-05-tulips.WEBP">2024-03-05-tulips.WEBP</a>    05-Mar-2024 12:00   524288
<a href="readme.txt">readme.txt</a>                           05-Mar-2024 12:00      120
</pre><hr></body>
</html>"#;

    #[test]
    fn nginx_listing() {
        let m = parse_listing(NGINX);
        assert_eq!(m.entries, ["2024-01-01-sunrise.gif", "2024-03-05-tulips.WEBP"]);
        assert_eq!(
            m.warnings,
            [
                ManifestWarning::SkippedLink {
                    href: "../".into(),
                    reason: "parent directory"
                },
                ManifestWarning::SkippedLink {
                    href: "readme.txt".into(),
                    reason: "unsupported extension"
                },
            ]
        );
    }

    #[test]
    fn quote_styles_and_attribute_order() {
        let html = r#"<A class=x HREF='one.gif'>1</A>
<a title="two" href = two.webp>2</a>
<a data-href="no.gif" href="three.gif">3</a>"#;
        let m = parse_listing(html);
        assert_eq!(m.entries, ["one.gif", "two.webp", "three.gif"]);
    }

    #[test]
    fn ignores_non_anchor_tags() {
        let html = r#"<abbr href="x.gif"></abbr><area href="y.gif"><a name="top">"#;
        let m = parse_listing(html);
        assert!(m.entries.is_empty());
        assert!(m.warnings.is_empty());
    }

    #[test]
    fn custom_extensions() {
        let html = r#"<a href="a.png">a</a><a href="b.gif">b</a>"#;
        let m = parse_listing_with(html, &[".png"]);
        assert_eq!(m.entries, ["a.png"]);
    }

    #[test]
    fn truncated_document_does_not_panic() {
        for html in ["<a href=\"a.gif", "<a href=", "<a ", "<a", "<"] {
            let _ = parse_listing(html);
        }
        // A tag cut off by the end of the document is never emitted.
        assert!(parse_listing("<a href=\"a.gif").entries.is_empty());
        assert_eq!(parse_listing("<a href=a.gif>").entries, ["a.gif"]);
    }

    #[test]
    fn character_references_are_decoded() {
        let html = r#"<a href="rock&amp;roll-2024-03-05.gif">x</a><a href="a&#x2D;b.webp">y</a>"#;
        assert_eq!(
            parse_listing(html).entries,
            ["rock&roll-2024-03-05.gif", "a-b.webp"]
        );
    }

    #[test]
    fn commented_links_are_ignored() {
        let html = r#"<a href="kept.gif">k</a><!-- <a href="old.gif">old</a> -->"#;
        let m = parse_listing(html);
        assert_eq!(m.entries, ["kept.gif"]);
        assert!(m.warnings.is_empty());
    }

    #[test]
    fn angle_bracket_inside_quoted_href() {
        let html = r#"<a href="a>b.gif">x</a>"#;
        assert_eq!(parse_listing(html).entries, ["a>b.gif"]);
    }

    #[test]
    fn multibyte_text_between_links() {
        let html = "<p>写真</p><a href=\"été.gif\">été</a>";
        assert_eq!(parse_listing(html).entries, ["été.gif"]);
    }
}
