//! Shared helpers for integration tests

use std::path::PathBuf;

/// Path of the sample annotated API surface shipped with the repository.
pub fn demo_source() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos/user_api.rs")
}
