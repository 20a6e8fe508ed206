use std::borrow::Cow;

use super::blocks::{blocks, Block};

pub(crate) const WRAP_WIDTH: usize = 100;

pub(crate) const PRE_INDENT: &str = "\t";

/// ``` `` ``` and `''` become typographic double quotes.
fn convert_quotes(line: &str) -> Cow<'_, str> {
    if line.contains("``") || line.contains("''") {
        Cow::Owned(line.replace("``", "\u{201c}").replace("''", "\u{201d}"))
    } else {
        Cow::Borrowed(line)
    }
}

/// Every block after the first, and any leading heading or preformatted
/// block, is preceded by a blank line.
pub(crate) fn reflow(text: &str, width: usize) -> String {
    let mut out = String::with_capacity(text.len());

    for block in blocks(text) {
        if !out.is_empty() || !matches!(block, Block::Paragraph(_)) {
            out.push('\n');
        }
        match block {
            Block::Paragraph(lines) => {
                let lines: Vec<_> = lines.into_iter().map(convert_quotes).collect();
                let mut column = 0;
                for word in lines.iter().flat_map(|line| line.split_whitespace()) {
                    let len = word.chars().count();
                    if column > 0 && column + 1 + len > width {
                        out.push('\n');
                        column = 0;
                    } else if column > 0 {
                        out.push(' ');
                        column += 1;
                    }
                    out.push_str(word);
                    column += len;
                }
                out.push('\n');
            }
            Block::Heading(line) => {
                out.push_str(&convert_quotes(line));
                out.push('\n');
            }
            Block::Preformatted(lines) => {
                for line in lines {
                    if !line.is_empty() {
                        out.push_str(PRE_INDENT);
                        out.push_str(line);
                    }
                    out.push('\n');
                }
            }
        }
    }

    out
}
