//! Widget instance keys
//!
//! Every widget gets a key that tags its log fields and owns its document
//! listeners. The key combines the construction call site with a random
//! suffix, so widgets built in a loop never collide.

use uuid::Uuid;

/// Unique key for a widget instance
///
/// Format: `{prefix}:{file}:{line}:{uuid}`
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct InstanceKey(String);

impl InstanceKey {
    #[track_caller]
    pub fn new(prefix: &'static str) -> Self {
        let loc = std::panic::Location::caller();
        Self(format!(
            "{prefix}:{}:{}:{}",
            loc.file(),
            loc.line(),
            Uuid::new_v4().as_simple()
        ))
    }

    pub fn get(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for InstanceKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "InstanceKey({})", self.0)
    }
}
