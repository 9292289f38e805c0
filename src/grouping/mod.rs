pub mod builder;
pub mod classifier;
pub mod listing;

pub use builder::SoundListBuilder;
pub use classifier::{ColumnMarker, LineClassifier, LineKind};
pub use listing::{parse_listing, Group, ListingLine};
