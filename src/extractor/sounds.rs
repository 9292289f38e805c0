use crate::config::SoundConfig;
use crate::error::{AssetListError, Result};
use crate::extractor::pattern::FilenamePattern;
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

/// Every quoted sound filename in a source file, extension kept.
pub struct SoundFiles<R> {
    lines: Lines<R>,
    filename: FilenamePattern,
}

impl SoundFiles<BufReader<File>> {
    pub fn open<P: AsRef<Path>>(path: P, config: &SoundConfig) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| AssetListError::from_open(e, path))?;
        Self::new(BufReader::new(file), config)
    }
}

impl<R: BufRead> SoundFiles<R> {
    pub fn new(reader: R, config: &SoundConfig) -> Result<Self> {
        Ok(Self {
            lines: reader.lines(),
            filename: FilenamePattern::new(&config.extension)?,
        })
    }
}

impl<R: BufRead> Iterator for SoundFiles<R> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        for line in self.lines.by_ref() {
            let line = match line {
                Ok(line) => line,
                Err(e) => return Some(Err(e.into())),
            };

            if let Some(matched) = self.filename.find(&line) {
                return Some(Ok(self.filename.strip_quotes(matched).to_string()));
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn extract(input: &str) -> Vec<String> {
        SoundFiles::new(Cursor::new(input), &SoundConfig::default())
            .unwrap()
            .collect::<Result<Vec<_>>>()
            .unwrap()
    }

    #[test]
    fn test_keeps_extension() {
        assert_eq!(extract("play(\"theme.mp3\");\n"), vec!["theme.mp3"]);
    }

    #[test]
    fn test_scans_whole_input_in_order() {
        let input = "\
            #define INTRO \"intro.mp3\"\n\
            };\n\
            int x;\n\
            beep(\"sfx/hit.mp3\");\n\
            beep(\"sfx/hit.mp3\");\n";
        assert_eq!(extract(input), vec!["intro.mp3", "sfx/hit.mp3", "sfx/hit.mp3"]);
    }

    #[test]
    fn test_other_extensions_ignored() {
        assert!(extract("load(\"bg.rgab\");\nload(\"x.wav\");\n").is_empty());
    }

    #[test]
    fn test_configured_extension() {
        let config = SoundConfig {
            extension: "wav".to_string(),
        };
        let found: Vec<String> = SoundFiles::new(Cursor::new("a(\"x.wav\"); b(\"y.mp3\");\n"), &config)
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(found, vec!["x.wav"]);
    }

    #[test]
    fn test_invalid_utf8_surfaces_as_io_error() {
        let bytes: &[u8] = b"\"a.mp3\"\n\xff\xfe\n";
        let mut sounds = SoundFiles::new(Cursor::new(bytes), &SoundConfig::default()).unwrap();
        assert_eq!(sounds.next().unwrap().unwrap(), "a.mp3");
        assert!(matches!(sounds.next(), Some(Err(AssetListError::Io(_)))));
    }

    #[test]
    fn test_open_missing_file() {
        let result = SoundFiles::open("/nonexistent/sounds.h", &SoundConfig::default());
        assert!(matches!(result, Err(AssetListError::InputNotFound { .. })));
    }
}
