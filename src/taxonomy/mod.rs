//! Category hierarchy: classification, tree building, level resolution, and
//! picker state.

pub mod classify;
pub mod options;
pub mod path;
pub mod tree;

pub use classify::{classify, DocumentNode, LeafRule, DEFAULT_SENTINEL_FIELD};
pub use options::{SelectOption, PATH_SEPARATOR};
pub use path::TaxonomyPath;
pub use tree::{
    leaves_at, TaxonomyNode, TaxonomyOptions, TaxonomyTree, DEFAULT_MAX_DEPTH,
    MAX_SUPPORTED_DEPTH,
};
