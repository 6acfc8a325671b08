pub mod orphan_cleanup;

pub use orphan_cleanup::orphan_cleanup_worker;
