//! Core item record for heterogeneous collections.
//! Bookmarks, history entries and search-engine descriptors share this shape.

pub mod logging;
pub mod model;

pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::array::{ItemArray, WeakItemArray};
pub use model::item::{Item, ItemAttributes, ObserverId, SharedItem};
pub use model::property::{ItemError, ItemProperty, PropertyValue};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
