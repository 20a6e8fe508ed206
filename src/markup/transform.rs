use std::{borrow::Cow, sync::LazyLock};

use regex::{Captures, Regex};

static IMAGE_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"!<a href="(\S+)">\S+</a>"#).unwrap());

// The optional leading group matches headings that already carry a permalink.
static HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r##"(<a class="permalink" href="#hdr-[^"]*">)?<h3 id="hdr-([^"]*)">.*?</h3>"##)
        .unwrap()
});

pub(crate) trait TextTransform {
    fn apply<'a>(&self, html: &'a str) -> Cow<'a, str>;
}

/// `!<a href="URL">URL</a>` becomes `<img src="URL" />`.
pub(crate) struct ImageLinks;

impl TextTransform for ImageLinks {
    fn apply<'a>(&self, html: &'a str) -> Cow<'a, str> {
        IMAGE_LINK.replace_all(html, r#"<img src="$1" />"#)
    }
}

pub(crate) struct HeadingPermalinks;

impl TextTransform for HeadingPermalinks {
    fn apply<'a>(&self, html: &'a str) -> Cow<'a, str> {
        HEADING.replace_all(html, |caps: &Captures| {
            if caps.get(1).is_some() {
                caps[0].to_string()
            } else {
                format!(
                    r##"<a class="permalink" href="#hdr-{}">{}</a>"##,
                    &caps[2], &caps[0]
                )
            }
        })
    }
}

pub(crate) struct Transforms {
    rules: Vec<Box<dyn TextTransform + Send + Sync>>,
}

impl Transforms {
    pub fn new() -> Self {
        Self { rules: vec![] }
    }

    pub fn with(mut self, rule: impl TextTransform + Send + Sync + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    pub fn apply(&self, mut html: String) -> String {
        for rule in &self.rules {
            let replaced = match rule.apply(&html) {
                Cow::Owned(s) => Some(s),
                Cow::Borrowed(_) => None,
            };
            if let Some(s) = replaced {
                html = s;
            }
        }
        html
    }
}

impl Default for Transforms {
    fn default() -> Self {
        Self::new().with(ImageLinks).with(HeadingPermalinks)
    }
}
