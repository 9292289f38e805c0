use crate::error::{AssetListError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tempfile::NamedTempFile;

/// What a single run produced, reported as a diagnostic after the data is flushed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub command: String,
    pub input: String,
    pub output: String,
    pub lines_emitted: usize,
    pub groups: usize,
    pub orphan_members: usize,
    pub duration: Duration,
    pub completed_at: DateTime<Utc>,
}

impl RunSummary {
    pub fn display_summary(&self) -> String {
        let mut summary = format!(
            "{}: {} lines from {} to {} in {}ms",
            self.command,
            self.lines_emitted,
            self.input,
            self.output,
            self.duration.as_millis()
        );

        if self.groups > 0 {
            summary.push_str(&format!(", {} groups", self.groups));
        }

        summary
    }
}

enum Sink {
    Stream(BufWriter<Box<dyn Write>>),
    /// Written to a temporary file beside `path`, which is only moved into
    /// place by `finish`. Dropping the writer early removes the temporary file.
    File {
        writer: BufWriter<NamedTempFile>,
        path: PathBuf,
        force: bool,
    },
}

/// Newline-delimited sink for extracted values.
pub struct ListWriter {
    sink: Sink,
    destination: String,
    lines_written: usize,
    started: Instant,
}

impl ListWriter {
    pub fn stdout() -> Self {
        Self::from_writer(Box::new(io::stdout()), "<stdout>")
    }

    /// Stage output for `path`. The file itself is untouched until `finish`
    /// succeeds, and an existing file is only replaced when `force` is set.
    pub fn create<P: AsRef<Path>>(path: P, force: bool) -> Result<Self> {
        let path = path.as_ref();

        if path.exists() && !force {
            return Err(AssetListError::OutputExists {
                path: path.display().to_string(),
            });
        }

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        if !dir.is_dir() {
            return Err(AssetListError::InvalidPath {
                path: path.display().to_string(),
            });
        }

        let file = NamedTempFile::new_in(dir).map_err(|e| write_error(e, path))?;

        Ok(Self {
            sink: Sink::File {
                writer: BufWriter::new(file),
                path: path.to_path_buf(),
                force,
            },
            destination: path.display().to_string(),
            lines_written: 0,
            started: Instant::now(),
        })
    }

    pub fn open(output: Option<&Path>, force: bool) -> Result<Self> {
        match output {
            Some(path) => Self::create(path, force),
            None => Ok(Self::stdout()),
        }
    }

    pub fn from_writer(writer: Box<dyn Write>, destination: &str) -> Self {
        Self {
            sink: Sink::Stream(BufWriter::new(writer)),
            destination: destination.to_string(),
            lines_written: 0,
            started: Instant::now(),
        }
    }

    pub fn write_line<T: Display>(&mut self, value: T) -> Result<()> {
        match &mut self.sink {
            Sink::Stream(writer) => writeln!(writer, "{}", value)?,
            Sink::File { writer, .. } => writeln!(writer, "{}", value)?,
        }
        self.lines_written += 1;
        Ok(())
    }

    /// Drain `values` into the sink, stopping at the first error.
    pub fn write_all<I, T>(&mut self, values: I) -> Result<usize>
    where
        I: IntoIterator<Item = Result<T>>,
        T: Display,
    {
        let before = self.lines_written;
        for value in values {
            self.write_line(value?)?;
        }
        Ok(self.lines_written - before)
    }

    pub fn lines_written(&self) -> usize {
        self.lines_written
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    /// Flush everything and, for file output, move the staged file into place.
    pub fn finish(self) -> Result<(usize, Duration)> {
        match self.sink {
            Sink::Stream(mut writer) => writer.flush()?,
            Sink::File {
                writer,
                path,
                force,
            } => {
                let file = writer.into_inner().map_err(|e| e.into_error())?;

                // Keep the mode of a file being replaced.
                if let Ok(metadata) = fs::metadata(&path) {
                    file.as_file().set_permissions(metadata.permissions())?;
                }

                let persisted = if force {
                    file.persist(&path)
                } else {
                    file.persist_noclobber(&path)
                };
                persisted.map_err(|e| write_error(e.error, &path))?;
            }
        }

        Ok((self.lines_written, self.started.elapsed()))
    }
}

fn write_error(error: io::Error, path: &Path) -> AssetListError {
    match error.kind() {
        io::ErrorKind::AlreadyExists => AssetListError::OutputExists {
            path: path.display().to_string(),
        },
        io::ErrorKind::PermissionDenied => AssetListError::Permission {
            path: path.display().to_string(),
        },
        _ => AssetListError::Io(error),
    }
}
