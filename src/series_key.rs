use crate::TagSet;

/// Identifies a series by its metric and tags, e.g. `disk.read_ops#project:p-1;zone:us-east1-b`.
///
/// Tags are sorted by key, so the same tags in a different order produce the same key.
/// Delimiters (`#`, `;`, `:`) and `\` inside tags are escaped with a backslash.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SeriesKey(String);

impl SeriesKey {
    /// Creates the key of a series.
    #[must_use]
    pub fn new(metric: &str, tags: &TagSet) -> Self {
        let mut tags = tags.iter().collect::<Vec<_>>();
        tags.sort();

        // +1 for the ':' between key and value, +1 for the ';' or '#' in front
        let len = metric.len()
            + tags
                .iter()
                .map(|(key, value)| key.len() + value.len() + 2)
                .sum::<usize>();

        let mut buf = String::with_capacity(len);
        buf.push_str(metric);

        for (idx, (key, value)) in tags.iter().enumerate() {
            buf.push(if idx == 0 { '#' } else { ';' });
            push_escaped(&mut buf, key);
            buf.push(':');
            push_escaped(&mut buf, value);
        }

        Self(buf)
    }
}

fn push_escaped(buf: &mut String, s: &str) {
    for c in s.chars() {
        if matches!(c, '#' | ';' | ':' | '\\') {
            buf.push('\\');
        }
        buf.push(c);
    }
}

impl std::fmt::Display for SeriesKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::ops::Deref for SeriesKey {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<SeriesKey> for String {
    fn from(value: SeriesKey) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tagset;

    #[test_log::test]
    fn series_key_without_tags() {
        assert_eq!("instance.cpu", &*SeriesKey::new("instance.cpu", &[]));
    }

    #[test_log::test]
    fn series_key_single_tag() {
        assert_eq!(
            "instance.cpu#instance:vm-1",
            &*SeriesKey::new("instance.cpu", tagset!("instance" => "vm-1")),
        );
    }

    #[test_log::test]
    fn series_key_escapes_delimiters() {
        let a = SeriesKey::new(
            "disk.read_ops",
            tagset!("location" => "x;project:y", "project" => "z"),
        );
        let b = SeriesKey::new(
            "disk.read_ops",
            tagset!("location" => "x", "project" => "y;project:z"),
        );

        assert_ne!(a, b);
        assert_eq!(
            r"disk.read_ops#location:x\;project\:y;project:z",
            a.to_string()
        );
    }

    #[test_log::test]
    fn series_key_sorts_tags() {
        let key = SeriesKey::new(
            "disk.read_ops",
            tagset!(
                "zone" => "us-east1-b",
                "disk" => "pd-1",
                "project" => "p-1",
            ),
        );

        assert_eq!(
            "disk.read_ops#disk:pd-1;project:p-1;zone:us-east1-b",
            key.to_string(),
        );
        assert_eq!(
            key,
            SeriesKey::new(
                "disk.read_ops",
                tagset!(
                    "project" => "p-1",
                    "disk" => "pd-1",
                    "zone" => "us-east1-b",
                ),
            ),
        );
    }
}
