mod cache;
mod matcher;
mod resolve_path;
mod segment;

pub use cache::{global_cache, match_path, MatcherCache};
pub use matcher::{MatchOptions, Matcher, PathMatch};
pub use resolve_path::{join_paths, resolve_path};
pub use segment::{PatternError, PatternSegment};
