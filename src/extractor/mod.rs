pub mod background;
pub mod output;
pub mod pattern;
pub mod sounds;

pub use background::BackgroundList;
pub use output::{ListWriter, RunSummary};
pub use pattern::FilenamePattern;
pub use sounds::SoundFiles;
