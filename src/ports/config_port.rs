//! Configuration access port trait.

/// Read-only view over sectioned `key = value` settings.
pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;
}
