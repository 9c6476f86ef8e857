//! Small HTML helpers for slide rendering.
//!
//! Values produced here are inserted into templates with `| safe`; every
//! other value is left to the template engine's autoescaping.

/// Whether `text` already carries markup (the model may return HTML
/// fragments in `content`).
pub fn looks_like_html(text: &str) -> bool {
    let Some(open) = text.find('<') else {
        return false;
    };
    let tail = &text[open + 1..];
    tail.starts_with(|c: char| c.is_ascii_alphabetic() || c == '/') && tail.contains('>')
}

/// Block content: HTML passes through, plain text becomes one `<p>` per
/// blank-line-separated block with `<br>` for single line breaks.
pub fn blocks(text: &str) -> String {
    if looks_like_html(text) {
        return text.to_owned();
    }
    text.split("\n\n")
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .map(|block| {
            let lines: Vec<String> = block.lines().map(|l| tera::escape_html(l.trim())).collect();
            format!("<p>{}</p>", lines.join("<br>"))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Split a rendered layout into its first `<style>` block body and the
/// remaining markup.
pub fn split_style(rendered: &str) -> (String, String) {
    const OPEN: &str = "<style>";
    const CLOSE: &str = "</style>";

    let Some(start) = rendered.find(OPEN) else {
        return (String::new(), rendered.to_owned());
    };
    let Some(end) = rendered[start..].find(CLOSE).map(|e| start + e) else {
        return (String::new(), rendered.to_owned());
    };

    let css = rendered[start + OPEN.len()..end].trim().to_owned();
    let markup = format!("{}{}", &rendered[..start], &rendered[end + CLOSE.len()..]);
    (css, markup)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_html_fragments() {
        assert!(looks_like_html("<p>hi</p>"));
        assert!(looks_like_html("text <strong>bold</strong>"));
        assert!(!looks_like_html("1 < 2 and 3 > 2"));
        assert!(!looks_like_html("plain"));
    }

    #[test]
    fn blocks_wraps_plain_paragraphs() {
        let out = blocks("第一段\n续行\n\n第二段 <3");
        assert_eq!(out, "<p>第一段<br>续行</p>\n<p>第二段 &lt;3</p>");
    }

    #[test]
    fn blocks_escapes_markup_characters_in_plain_text() {
        assert_eq!(blocks("a & b > c"), "<p>a &amp; b &gt; c</p>");
    }

    #[test]
    fn blocks_passes_html_through() {
        assert_eq!(blocks("<ul><li>a</li></ul>"), "<ul><li>a</li></ul>");
    }

    #[test]
    fn split_style_extracts_first_block() {
        let (css, markup) = split_style("<style>\n .a {}\n</style>\n<div>x</div>");
        assert_eq!(css, ".a {}");
        assert_eq!(markup, "\n<div>x</div>");
    }

    #[test]
    fn split_style_without_style_returns_markup() {
        let (css, markup) = split_style("<div>x</div>");
        assert_eq!(css, "");
        assert_eq!(markup, "<div>x</div>");
    }

    #[test]
    fn split_style_ignores_unterminated_block() {
        let (css, markup) = split_style("<style> .a {} <div>x</div>");
        assert_eq!(css, "");
        assert_eq!(markup, "<style> .a {} <div>x</div>");
    }
}
