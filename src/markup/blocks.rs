//! Splits plain text into paragraphs, headings and preformatted runs. Both the
//! reflow pass and the HTML pass read text through this one classifier, so a
//! heading that survives reflow is recognised again when structuring.

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Block<'a> {
    Paragraph(Vec<&'a str>),
    Heading(&'a str),
    /// Indented lines with their common indentation removed. Blank lines
    /// inside the run are kept as empty strings.
    Preformatted(Vec<&'a str>),
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

fn indent_len(line: &str) -> usize {
    line.len() - line.trim_start_matches([' ', '\t']).len()
}

fn unindent(lines: &mut [&str]) {
    let mut prefix: Option<&str> = None;
    for line in lines.iter().copied().filter(|line| !is_blank(line)) {
        let indent = &line[..indent_len(line)];
        prefix = Some(match prefix {
            None => indent,
            Some(p) => {
                let common = p
                    .bytes()
                    .zip(indent.bytes())
                    .take_while(|(a, b)| a == b)
                    .count();
                &p[..common]
            }
        });
    }

    let n = prefix.map_or(0, str::len);
    for line in lines.iter_mut() {
        let text = *line;
        *line = if is_blank(text) { "" } else { &text[n..] };
    }
}

/// Returns the heading text if `line` looks like one: starts with an
/// upper-case letter, ends in a letter or digit, and has no markup-like
/// punctuation.
pub(crate) fn heading(line: &str) -> Option<&str> {
    let line = line.trim();

    let first = line.chars().next()?;
    if !first.is_alphabetic() || !first.is_uppercase() {
        return None;
    }
    let last = line.chars().next_back()?;
    if !last.is_alphanumeric() {
        return None;
    }
    if line.contains([
        ';', ':', '!', '?', '+', '*', '/', '=', '[', ']', '{', '}', '_', '^', '°', '&', '§',
        '~', '%', '#', '@', '<', '"', '>', '\\',
    ]) {
        return None;
    }

    // apostrophes only as a possessive "'s"
    let mut rest = line;
    while let Some(i) = rest.find('\'') {
        let after = &rest[i + 1..];
        if !after.starts_with('s') || !(after.len() == 1 || after[1..].starts_with(' ')) {
            return None;
        }
        rest = &after[1..];
    }

    // periods only inside tokens, like "v1.2"
    let mut rest = line;
    while let Some(i) = rest.find('.') {
        let after = &rest[i + 1..];
        if after.is_empty() || after.starts_with(' ') {
            return None;
        }
        rest = after;
    }

    Some(line)
}

pub(crate) fn blocks(text: &str) -> Vec<Block<'_>> {
    let mut lines: Vec<&str> = text.lines().collect();
    unindent(&mut lines);

    let mut out = vec![];
    let mut para: Vec<&str> = vec![];
    let mut last_was_blank = false;
    let mut last_was_heading = false;

    let mut i = 0;
    while i < lines.len() {
        let line = lines[i];

        if is_blank(line) {
            if !para.is_empty() {
                out.push(Block::Paragraph(std::mem::take(&mut para)));
            }
            last_was_blank = true;
            i += 1;
            continue;
        }

        if indent_len(line) > 0 {
            if !para.is_empty() {
                out.push(Block::Paragraph(std::mem::take(&mut para)));
            }
            let mut j = i + 1;
            while j < lines.len() && (is_blank(lines[j]) || indent_len(lines[j]) > 0) {
                j += 1;
            }
            while j > i && is_blank(lines[j - 1]) {
                j -= 1;
            }
            let mut pre = lines[i..j].to_vec();
            unindent(&mut pre);
            out.push(Block::Preformatted(pre));
            last_was_heading = false;
            i = j;
            continue;
        }

        // a lone line between blank lines, followed by unindented text
        if last_was_blank
            && !last_was_heading
            && i + 2 < lines.len()
            && is_blank(lines[i + 1])
            && !is_blank(lines[i + 2])
            && indent_len(lines[i + 2]) == 0
        {
            if let Some(head) = heading(line) {
                if !para.is_empty() {
                    out.push(Block::Paragraph(std::mem::take(&mut para)));
                }
                out.push(Block::Heading(head));
                last_was_heading = true;
                i += 2;
                continue;
            }
        }

        last_was_blank = false;
        last_was_heading = false;
        para.push(line);
        i += 1;
    }

    if !para.is_empty() {
        out.push(Block::Paragraph(para));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heading_rules() {
        assert_eq!(heading("Introduction"), Some("Introduction"));
        assert_eq!(heading("  Go 1.2 release notes "), Some("Go 1.2 release notes"));
        assert_eq!(heading("Bob's notes"), Some("Bob's notes"));
        assert_eq!(heading("Parsing (and more), today"), Some("Parsing (and more), today"));

        assert_eq!(heading("lowercase start"), None);
        assert_eq!(heading("Ends with period."), None);
        assert_eq!(heading("Has a colon: here"), None);
        assert_eq!(heading("Don't do this"), None);
        assert_eq!(heading("Sentence. Then more"), None);
        assert_eq!(heading(""), None);
    }

    #[test]
    fn paragraphs_and_preformatted() {
        let text = "first line\nsecond line\n\n    code here\n\n      nested\n\nafter\n";
        assert_eq!(
            blocks(text),
            vec![
                Block::Paragraph(vec!["first line", "second line"]),
                Block::Preformatted(vec!["code here", "", "  nested"]),
                Block::Paragraph(vec!["after"]),
            ]
        );
    }

    #[test]
    fn heading_needs_surrounding_blank_lines() {
        let text = "\nIntroduction\n\nSome text.\n";
        assert_eq!(
            blocks(text),
            vec![
                Block::Heading("Introduction"),
                Block::Paragraph(vec!["Some text."]),
            ]
        );

        // first line of the text is never a heading
        assert_eq!(
            blocks("Introduction\n\nSome text.\n"),
            vec![
                Block::Paragraph(vec!["Introduction"]),
                Block::Paragraph(vec!["Some text."]),
            ]
        );

        // nor is the last block
        assert_eq!(
            blocks("text\n\nClosing\n"),
            vec![
                Block::Paragraph(vec!["text"]),
                Block::Paragraph(vec!["Closing"]),
            ]
        );
    }

    #[test]
    fn consecutive_headings_are_not_detected() {
        let text = "\nFirst\n\nSecond\n\nbody\n";
        assert_eq!(
            blocks(text),
            vec![
                Block::Heading("First"),
                Block::Paragraph(vec!["Second"]),
                Block::Paragraph(vec!["body"]),
            ]
        );
    }

    #[test]
    fn common_indent_is_removed_from_whole_text() {
        assert_eq!(
            blocks("  one\n  two\n"),
            vec![Block::Paragraph(vec!["one", "two"])]
        );
    }
}
