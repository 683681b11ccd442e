//! Sorting pipeline components.
//!
//! - **discovery**: find candidate images in a source tree
//! - **probe**: determine pixel dimensions
//! - **planner**: derive collision-free destination paths
//! - **transfer**: copy or move into the destination tree
//! - **sorter**: orchestrates the per-file pipeline

pub mod discovery;
pub mod planner;
pub mod probe;
pub mod sorter;
pub mod transfer;

// Re-exports for convenient access
pub use discovery::{DiscoveredFile, FileDiscovery};
pub use planner::{destination_dir, plan, CollisionPolicy};
pub use probe::{
    probe_all, ChainProvider, FileCommandProvider, ImageHeaderProvider, ProviderFactory,
    ResolutionProvider,
};
pub use sorter::{SortOptions, Sorter};
pub use transfer::transfer;
