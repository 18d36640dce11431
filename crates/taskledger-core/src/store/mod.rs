//! Task store: the owned collection, id allocation and queries.

mod config;
mod filter;
mod memory;
mod shared;
mod sort;

pub use config::StoreConfig;
pub use filter::TaskFilter;
pub use memory::TaskStore;
pub use shared::SharedTaskStore;
pub use sort::SortKey;
