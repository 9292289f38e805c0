use crate::config::compile_pattern;
use crate::error::{AssetListError, Result};
use regex::Regex;

/// Matches a double-quoted, whitespace-free string literal ending in `.<extension>`.
#[derive(Debug, Clone)]
pub struct FilenamePattern {
    regex: Regex,
    extension: String,
}

impl FilenamePattern {
    pub fn new(extension: &str) -> Result<Self> {
        if extension.is_empty() {
            return Err(AssetListError::Config {
                message: "File extension must not be empty".to_string(),
            });
        }

        let regex = compile_pattern(&format!(r#""\S+\.{}""#, regex::escape(extension)))?;

        Ok(Self {
            regex,
            extension: extension.to_string(),
        })
    }

    /// Leftmost match in `line`, quotes included. Only one match per line is ever reported.
    pub fn find<'a>(&self, line: &'a str) -> Option<&'a str> {
        self.regex.find(line).map(|m| m.as_str())
    }

    /// `"theme.mp3"` -> `theme.mp3`
    pub fn strip_quotes<'a>(&self, matched: &'a str) -> &'a str {
        &matched[1..matched.len() - 1]
    }

    /// `"forest.rgab"` -> `forest`
    pub fn strip_quotes_and_extension<'a>(&self, matched: &'a str) -> &'a str {
        // closing quote plus ".<ext>"
        let suffix_len = self.extension.len() + 2;
        &matched[1..matched.len() - suffix_len]
    }
}
