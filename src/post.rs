use std::{
    cmp::Ordering,
    collections::HashMap,
    fs,
    path::Path,
    sync::LazyLock,
};

use anyhow::{bail, Context};
use chrono::{DateTime, Local};
use log::{debug, info};
use regex::Regex;
use serde::Serialize;
use thiserror::Error;

use crate::metadata::{parse_header_line, Metadata};

// blank line ending the header block, with or without CRs
static HEADER_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\r?\n\r?\n").unwrap());

#[derive(Serialize, Debug, Clone)]
pub(crate) struct Post {
    pub slug: String,
    pub output_path: String,
    pub title: String,
    pub metadata: Metadata,
    /// Raw text after the header block, separator included. Rendered lazily.
    pub body: String,
    pub mod_time: DateTime<Local>,
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Failed to parse {file}: {reason}")]
pub(crate) struct ParseError {
    pub file: String,
    pub reason: &'static str,
}

pub(crate) fn slug_of(filename: &str) -> &str {
    let base = Path::new(filename)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(filename);
    base.split('.').next().unwrap_or(base)
}

pub(crate) fn output_path_of(slug: &str) -> String {
    format!("{slug}.html")
}

/// The header block runs up to the first blank line. Its first line is the
/// title; every later line holding a `:` is a `key: value` pair, anything else
/// in the header is ignored.
pub(crate) fn parse_post(
    raw: &[u8],
    filename: &str,
    mod_time: DateTime<Local>,
) -> Result<Post, ParseError> {
    let fail = |reason: &'static str| ParseError {
        file: filename.to_string(),
        reason,
    };

    let text = String::from_utf8_lossy(raw);
    let separator = HEADER_SEPARATOR
        .find(&text)
        .ok_or_else(|| fail("no header separator found"))?;
    let (header, body) = text.split_at(separator.start());

    let mut lines = header.lines();
    let title = lines.next().unwrap_or_default().trim_end_matches('\r');
    if title.trim().is_empty() {
        return Err(fail("empty title"));
    }

    let mut metadata = Metadata::default();
    for (key, value) in lines.filter_map(parse_header_line) {
        metadata.insert(key, value);
    }

    let slug = slug_of(filename).to_string();
    if slug.is_empty() {
        return Err(fail("empty slug"));
    }
    info!("Parsed post {title}");
    Ok(Post {
        output_path: output_path_of(&slug),
        slug,
        title: title.to_string(),
        metadata,
        body: body.to_string(),
        mod_time,
    })
}

pub(crate) fn by_mod_time_desc(a: &Post, b: &Post) -> Ordering {
    b.mod_time.cmp(&a.mod_time)
}

/// Parses every entry of `post_dir` (non-recursive, no extension filter) and
/// returns the posts latest first. The first unreadable or malformed entry
/// aborts the whole batch, as do two files sharing a slug. Equal timestamps
/// keep directory order.
pub(crate) fn parse_all(post_dir: &Path) -> anyhow::Result<Vec<Post>> {
    let mut posts = vec![];
    let mut seen: HashMap<String, String> = HashMap::new();

    let entries = fs::read_dir(post_dir)
        .with_context(|| format!("Failed to read directory {post_dir:?}"))?;
    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to read directory {post_dir:?}"))?;
        let path = entry.path();

        let raw = fs::read(&path).with_context(|| format!("Failed to read post {path:?}"))?;
        let mod_time = entry
            .metadata()
            .and_then(|meta| meta.modified())
            .with_context(|| format!("Failed to get modification time of {path:?}"))?;

        let filename = entry.file_name().to_string_lossy().into_owned();
        let post = parse_post(&raw, &filename, mod_time.into())?;
        if let Some(other) = seen.insert(post.slug.clone(), filename.clone()) {
            bail!(
                "{filename:?} and {other:?} would both be written to {:?}",
                post.output_path
            );
        }
        posts.push(post);
    }

    posts.sort_by(by_mod_time_desc);
    debug!("Parsed {} posts from {post_dir:?}", posts.len());

    Ok(posts)
}
