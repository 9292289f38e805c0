use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssetListError {
    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Input file not found: {path}")]
    InputNotFound { path: String },

    #[error("Permission denied: {path}")]
    Permission { path: String },

    #[error("Output file already exists: {path}")]
    OutputExists { path: String },

    #[error("Path validation failed: {path}")]
    InvalidPath { path: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Malformed listing at line {line}: {message}")]
    MalformedListing { line: usize, message: String },
}

impl AssetListError {
    /// Map an error raised while opening `path` to the most specific variant.
    pub fn from_open(error: std::io::Error, path: &std::path::Path) -> Self {
        match error.kind() {
            std::io::ErrorKind::NotFound => AssetListError::InputNotFound {
                path: path.display().to_string(),
            },
            std::io::ErrorKind::PermissionDenied => AssetListError::Permission {
                path: path.display().to_string(),
            },
            _ => AssetListError::Io(error),
        }
    }
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for AssetListError {
    fn user_message(&self) -> String {
        match self {
            AssetListError::InputNotFound { path } => {
                format!("Cannot open input file: {}", path)
            }
            AssetListError::Permission { path } => {
                format!("Permission denied accessing: {}", path)
            }
            AssetListError::OutputExists { path } => {
                format!("Refusing to overwrite existing file: {}", path)
            }
            AssetListError::InvalidPath { path } => {
                format!("Invalid output path: {}", path)
            }
            AssetListError::Config { message } => {
                format!("Configuration error: {}", message)
            }
            AssetListError::InvalidPattern { pattern, .. } => {
                format!("Invalid regular expression: {}", pattern)
            }
            AssetListError::MalformedListing { line, message } => {
                format!("Malformed listing (line {}): {}", line, message)
            }
            _ => self.to_string(),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            AssetListError::InputNotFound { .. } => Some(
                "Check the path of the source file passed on the command line.".to_string()
            ),
            AssetListError::Permission { .. } => Some(
                "Ensure you have read permission on the input and write permission on the output location.".to_string()
            ),
            AssetListError::OutputExists { .. } => Some(
                "Remove the existing file, choose a different --output path, or use --force to overwrite.".to_string()
            ),
            AssetListError::InvalidPath { .. } => Some(
                "Create the parent directory of the --output file first.".to_string()
            ),
            AssetListError::Config { .. } => Some(
                "Check your configuration file syntax. Run with --generate-config to see every available key.".to_string()
            ),
            AssetListError::InvalidPattern { .. } => Some(
                "Patterns use Rust regex syntax; escape literal characters such as '*' and '}'.".to_string()
            ),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for AssetListError {
    fn from(error: toml::de::Error) -> Self {
        AssetListError::Config {
            message: error.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AssetListError>;
