use serde::{Serialize, Serializer};

/// Header fields of a post, kept in the order they were first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Metadata {
    entries: Vec<(String, String)>,
}

impl Metadata {
    /// Sets `key` to `value`. A repeated key keeps its original position.
    pub fn insert(&mut self, key: &str, value: &str) {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.entries.push((key.to_string(), value.to_string())),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl Serialize for Metadata {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

pub(crate) fn parse_header_line(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once(':')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some((key, value.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_write_wins_in_place() {
        let mut meta = Metadata::default();
        meta.insert("author", "ann");
        meta.insert("tags", "rust");
        meta.insert("author", "bob");

        let entries: Vec<_> = meta.iter().collect();
        assert_eq!(entries, vec![("author", "bob"), ("tags", "rust")]);
    }

    #[test]
    fn header_line_splits_on_first_colon() {
        assert_eq!(
            parse_header_line("link: https://example.org"),
            Some(("link", "https://example.org"))
        );
        assert_eq!(parse_header_line("  date :  2024-03-05 "), Some(("date", "2024-03-05")));
        assert_eq!(parse_header_line("no separator here"), None);
        assert_eq!(parse_header_line(" : value"), None);
    }

    #[test]
    fn serializes_as_ordered_map() {
        let mut meta = Metadata::default();
        meta.insert("z", "1");
        meta.insert("a", "2");
        assert_eq!(
            serde_json::to_string(&meta).unwrap(),
            r#"{"z":"1","a":"2"}"#
        );
    }
}
