use std::fmt::Write;

use chrono::Local;
use maud::{html, Markup};

use crate::post::Post;

pub(crate) const DEFAULT_DATE_FORMAT: &str = "%-d %B %Y";

/// chrono panics in `to_string()` on formats it can parse but not print
/// (`%#z`), so a sample date is formatted through `write!` first.
pub(crate) fn is_valid_date_format(format: &str) -> bool {
    let mut sample = String::new();
    write!(sample, "{}", Local::now().format(format)).is_ok()
}

#[derive(Debug)]
pub(crate) struct Section<'a> {
    pub label: String,
    pub posts: Vec<&'a Post>,
}

impl Section<'_> {
    pub fn anchor(&self) -> String {
        self.label.replace(' ', "")
    }

    fn render(&self) -> Markup {
        html! {
            section id=(self.anchor()) {
                h3 { (self.label) }
                ul {
                    @for post in &self.posts {
                        li { a id=(post.slug) href=(post.output_path) { (post.title) } }
                    }
                }
            }
        }
    }
}

/// Buckets posts by their formatted modification date. `posts` must already be
/// sorted; a new section starts whenever the label changes.
pub(crate) fn sections<'a>(posts: &'a [Post], date_format: &str) -> Vec<Section<'a>> {
    let mut sections = vec![];
    let mut current: Option<String> = None;
    let mut pending: Vec<&Post> = vec![];

    for post in posts {
        let label = post.mod_time.format(date_format).to_string();
        if current.as_deref() != Some(label.as_str()) {
            if let Some(done) = current.replace(label) {
                sections.push(Section {
                    label: done,
                    posts: std::mem::take(&mut pending),
                });
            }
        }
        pending.push(post);
    }

    if let Some(label) = current {
        if !pending.is_empty() {
            sections.push(Section {
                label,
                posts: pending,
            });
        }
    }

    sections
}

pub(crate) fn build_index(posts: &[Post], date_format: &str) -> String {
    sections(posts, date_format)
        .iter()
        .map(|section| section.render().into_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Local, TimeZone};

    use super::*;
    use crate::metadata::Metadata;

    fn post(slug: &str, title: &str, mod_time: DateTime<Local>) -> Post {
        Post {
            slug: slug.to_string(),
            output_path: format!("{slug}.html"),
            title: title.to_string(),
            metadata: Metadata::default(),
            body: String::new(),
            mod_time,
        }
    }

    fn at(d: u32, h: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, d, h, 0, 0).unwrap()
    }

    #[test]
    fn empty_input_emits_nothing() {
        assert!(sections(&[], DEFAULT_DATE_FORMAT).is_empty());
        assert_eq!(build_index(&[], DEFAULT_DATE_FORMAT), "");
    }

    #[test]
    fn same_day_posts_share_a_section() {
        let posts = vec![
            post("b", "Second", at(5, 18)),
            post("a", "First", at(5, 9)),
            post("c", "Earlier", at(4, 12)),
        ];

        let sections = sections(&posts, DEFAULT_DATE_FORMAT);
        assert_eq!(sections.len(), 2);

        assert_eq!(sections[0].label, "5 March 2024");
        assert_eq!(sections[0].anchor(), "5March2024");
        let slugs: Vec<_> = sections[0].posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["b", "a"]);

        assert_eq!(sections[1].label, "4 March 2024");
        let slugs: Vec<_> = sections[1].posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["c"]);
    }

    #[test]
    fn single_post_single_section() {
        let posts = vec![post("only", "Only", at(1, 0))];
        let sections = sections(&posts, DEFAULT_DATE_FORMAT);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].posts.len(), 1);
    }

    #[test]
    fn section_count_matches_distinct_labels() {
        let posts = vec![
            post("e", "E", at(9, 1)),
            post("d", "D", at(8, 1)),
            post("c", "C", at(8, 0)),
            post("b", "B", at(2, 1)),
            post("a", "A", at(1, 1)),
        ];
        let sections = sections(&posts, DEFAULT_DATE_FORMAT);
        let labels: Vec<_> = sections.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["9 March 2024", "8 March 2024", "2 March 2024", "1 March 2024"]
        );
        let total: usize = sections.iter().map(|s| s.posts.len()).sum();
        assert_eq!(total, posts.len());
    }

    #[test]
    fn coarser_format_merges_days() {
        let posts = vec![post("b", "B", at(5, 1)), post("a", "A", at(4, 1))];
        assert_eq!(sections(&posts, "%B %Y").len(), 1);
    }

    #[test]
    fn renders_escaped_fragment() {
        let posts = vec![post("hello", "Fish & <Chips>", at(5, 12))];
        assert_eq!(
            build_index(&posts, DEFAULT_DATE_FORMAT),
            concat!(
                r#"<section id="5March2024"><h3>5 March 2024</h3><ul>"#,
                r#"<li><a id="hello" href="hello.html">Fish &amp; &lt;Chips&gt;</a></li>"#,
                "</ul></section>",
            )
        );
    }

    #[test]
    fn date_format_validation() {
        assert!(is_valid_date_format(DEFAULT_DATE_FORMAT));
        assert!(is_valid_date_format("%Y-%m-%d"));
        assert!(!is_valid_date_format("%Q"));
        assert!(!is_valid_date_format("%#z"));
    }
}
