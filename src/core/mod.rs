// Core algorithm exports
pub mod matcher;
pub mod scoring;
pub mod selection;

pub use matcher::{Matcher, MatcherOptions, LARGE_PROFILE_SET};
pub use scoring::{directed_view, score_pair, DirectedView};
pub use selection::{select_top_k, SelectionOrder};
