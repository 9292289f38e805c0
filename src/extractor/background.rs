use crate::config::{compile_pattern, BackgroundConfig};
use crate::error::{AssetListError, Result};
use crate::extractor::pattern::FilenamePattern;
use regex::Regex;
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

/// Background names declared inside the `bg_list` table of a source file.
///
/// Lines are consumed lazily. Capture starts at the line matching the start
/// pattern and ends for good at the first close pattern seen while capturing;
/// after that no further line is read.
pub struct BackgroundList<R> {
    lines: Lines<R>,
    start: Regex,
    close: Regex,
    filename: FilenamePattern,
    capturing: bool,
    finished: bool,
}

impl BackgroundList<BufReader<File>> {
    pub fn open<P: AsRef<Path>>(path: P, config: &BackgroundConfig) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| AssetListError::from_open(e, path))?;
        Self::new(BufReader::new(file), config)
    }
}

impl<R: BufRead> BackgroundList<R> {
    pub fn new(reader: R, config: &BackgroundConfig) -> Result<Self> {
        Ok(Self {
            lines: reader.lines(),
            start: compile_pattern(&config.start_pattern)?,
            close: compile_pattern(&config.close_pattern)?,
            filename: FilenamePattern::new(&config.extension)?,
            capturing: false,
            finished: false,
        })
    }
}

impl<R: BufRead> Iterator for BackgroundList<R> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        for line in self.lines.by_ref() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    self.finished = true;
                    return Some(Err(e.into()));
                }
            };

            if self.start.is_match(&line) {
                self.capturing = true;
            }

            if self.capturing && self.close.is_match(&line) {
                self.finished = true;
                return None;
            }

            if !self.capturing {
                continue;
            }

            if let Some(matched) = self.filename.find(&line) {
                return Some(Ok(self.filename.strip_quotes_and_extension(matched).to_string()));
            }
        }

        self.finished = true;
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Read};

    fn extract(input: &str) -> Vec<String> {
        BackgroundList::new(Cursor::new(input), &BackgroundConfig::default())
            .unwrap()
            .collect::<Result<Vec<_>>>()
            .unwrap()
    }

    #[test]
    fn test_extracts_table_entries() {
        let input = "const char *bg_list[] = {\n\"forest.rgab\",\n\"cave.rgab\",\n};\n";
        assert_eq!(extract(input), vec!["forest", "cave"]);
    }

    #[test]
    fn test_ignores_entries_outside_table() {
        let input = "\
            const char *title = \"title.rgab\";\n\
            const char *bg_list[] = {\n\
              \"forest.rgab\",\n\
            };\n\
            const char *other[] = { \"late.rgab\" };\n";
        assert_eq!(extract(input), vec!["forest"]);
    }

    #[test]
    fn test_close_before_start_does_not_stop() {
        let input = "struct a {};\nconst char *bg_list[] = {\n\"sky.rgab\",\n};\n";
        assert_eq!(extract(input), vec!["sky"]);
    }

    #[test]
    fn test_start_line_may_carry_data() {
        let input = "const char *bg_list[] = { \"sea.rgab\",\n\"sand.rgab\" };\n";
        // The second line closes the table, so its literal is not emitted.
        assert_eq!(extract(input), vec!["sea"]);
    }

    #[test]
    fn test_start_and_close_on_same_line() {
        let input = "const char *bg_list[] = { \"sea.rgab\" };\n\"later.rgab\",\n";
        assert!(extract(input).is_empty());
    }

    #[test]
    fn test_one_filename_per_line() {
        let input = "const char *bg_list[] = {\n\"a.rgab\", \"b.rgab\",\n};\n";
        assert_eq!(extract(input), vec!["a"]);
    }

    #[test]
    fn test_no_matches_gives_empty_output() {
        assert!(extract("int main() { return 0; }\n").is_empty());
        assert!(extract("").is_empty());
    }

    #[test]
    fn test_unterminated_table_runs_to_end() {
        let input = "const char *bg_list[] = {\n\"a.rgab\",\n\"b.rgab\",\n";
        assert_eq!(extract(input), vec!["a", "b"]);
    }

    struct CountingReader<R> {
        inner: R,
        bytes_read: std::rc::Rc<std::cell::Cell<usize>>,
    }

    impl<R: Read> Read for CountingReader<R> {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            let n = self.inner.read(buf)?;
            self.bytes_read.set(self.bytes_read.get() + n);
            Ok(n)
        }
    }

    #[test]
    fn test_stops_reading_after_close() {
        let bytes_read = std::rc::Rc::new(std::cell::Cell::new(0));
        let head = "const char *bg_list[] = {\n\"a.rgab\",\n};\n";
        let tail = "\"b.rgab\",\n".repeat(10_000);
        let reader = CountingReader {
            inner: Cursor::new(format!("{}{}", head, tail)),
            bytes_read: bytes_read.clone(),
        };

        let mut list = BackgroundList::new(
            BufReader::with_capacity(16, reader),
            &BackgroundConfig::default(),
        )
        .unwrap();

        assert_eq!(list.next().unwrap().unwrap(), "a");
        assert!(list.next().is_none());
        assert!(list.next().is_none());
        assert!(bytes_read.get() < head.len() + 64);
    }

    #[test]
    fn test_open_missing_file() {
        let result = BackgroundList::open("/nonexistent/backgrounds.h", &BackgroundConfig::default());
        assert!(matches!(result, Err(AssetListError::InputNotFound { .. })));
    }

    #[test]
    fn test_invalid_start_pattern() {
        let config = BackgroundConfig {
            start_pattern: "[".to_string(),
            ..BackgroundConfig::default()
        };
        let result = BackgroundList::new(Cursor::new(""), &config);
        assert!(matches!(result, Err(AssetListError::InvalidPattern { .. })));
    }
}
