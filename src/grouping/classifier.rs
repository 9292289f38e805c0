use crate::config::{MarkerConfig, SoundListConfig};

/// A literal token expected at a fixed byte column of a line.
///
/// Columns count bytes from the start of the raw line, so a multi-byte
/// character before the marker shifts it. Nothing is trimmed, so the
/// comparison is sensitive to indentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMarker {
    offset: usize,
    token: String,
}

impl ColumnMarker {
    pub fn new<S: Into<String>>(offset: usize, token: S) -> Self {
        Self {
            offset,
            token: token.into(),
        }
    }

    pub fn matches(&self, line: &str) -> bool {
        let end = self.offset + self.token.len();
        line.as_bytes().get(self.offset..end) == Some(self.token.as_bytes())
    }
}

impl From<&MarkerConfig> for ColumnMarker {
    fn from(config: &MarkerConfig) -> Self {
        Self::new(config.offset, config.token.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    /// Opens a group. `member` is set when the member marker matched too, in
    /// which case the name is also the group's first member.
    Header { name: String, member: bool },
    Member(String),
    Other,
}

#[derive(Debug, Clone)]
pub struct LineClassifier {
    header: ColumnMarker,
    member: ColumnMarker,
}

impl LineClassifier {
    pub fn new(header: ColumnMarker, member: ColumnMarker) -> Self {
        Self { header, member }
    }

    /// Tag a raw input line. The two markers are tested independently; the
    /// carried text is the last whitespace-separated token of the line.
    pub fn classify(&self, line: &str) -> LineKind {
        let is_header = self.header.matches(line);
        let is_member = self.member.matches(line);
        if !is_header && !is_member {
            return LineKind::Other;
        }

        let Some(token) = last_token(line) else {
            return LineKind::Other;
        };

        if is_header {
            LineKind::Header {
                name: token.to_string(),
                member: is_member,
            }
        } else {
            LineKind::Member(token.to_string())
        }
    }
}

impl From<&SoundListConfig> for LineClassifier {
    fn from(config: &SoundListConfig) -> Self {
        Self::new((&config.header).into(), (&config.member).into())
    }
}

impl Default for LineClassifier {
    fn default() -> Self {
        Self::from(&SoundListConfig::default())
    }
}

fn last_token(line: &str) -> Option<&str> {
    line.split_whitespace().last()
}
