use std::sync::LazyLock;

use regex::Regex;

use super::blocks::{blocks, Block};

/// Bare URLs worth linking. Punctuation is allowed inside the path but not at
/// its end, so a sentence can finish right after a URL.
static URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(https?|ftp|file|gopher|mailto|nntp)://",
        r"[a-zA-Z0-9_@\-.\[\]:]+",
        r"([.,:;?!]*[a-zA-Z0-9$'()*+&#=@~_/\-\[\]%])*",
    ))
    .unwrap()
});

pub(crate) fn escape_into(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
}

pub(crate) fn heading_id(text: &str) -> String {
    let mut id = String::with_capacity(text.len() + 4);
    id.push_str("hdr-");
    id.extend(
        text.chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' }),
    );
    id
}

/// Drops closing parentheses that have no opening partner, so `(see
/// http://x.org)` does not swallow the `)`.
fn balance_parens(url: &str) -> &str {
    let mut url = url;
    while url.ends_with(')') && url.matches(')').count() > url.matches('(').count() {
        url = &url[..url.len() - 1];
    }
    url
}

fn link_urls(out: &mut String, line: &str) {
    let mut last = 0;
    for found in URL.find_iter(line) {
        let url = balance_parens(found.as_str());
        escape_into(out, &line[last..found.start()]);
        out.push_str("<a href=\"");
        escape_into(out, url);
        out.push_str("\">");
        escape_into(out, url);
        out.push_str("</a>");
        last = found.start() + url.len();
    }
    escape_into(out, &line[last..]);
}

pub(crate) fn to_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len() * 5 / 4);

    for block in blocks(text) {
        match block {
            Block::Paragraph(lines) => {
                out.push_str("<p>\n");
                for line in lines {
                    link_urls(&mut out, line);
                    out.push('\n');
                }
                out.push_str("</p>\n");
            }
            Block::Heading(line) => {
                out.push_str("<h3 id=\"");
                out.push_str(&heading_id(line));
                out.push_str("\">");
                escape_into(&mut out, line);
                out.push_str("</h3>\n");
            }
            Block::Preformatted(lines) => {
                out.push_str("<pre>");
                for line in lines {
                    escape_into(&mut out, line);
                    out.push('\n');
                }
                out.push_str("</pre>\n");
            }
        }
    }

    out
}
