use std::sync::{Arc, Mutex, PoisonError};

use crate::ports::logging::DebugLog;

/// In-memory implementation of DebugLog.
///
/// Cloning shares the underlying buffer, so a test can keep a handle and
/// inspect what a client appended.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDebugLog {
    entries: Arc<Mutex<Vec<String>>>,
}

impl InMemoryDebugLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DebugLog for InMemoryDebugLog {
    fn append(&self, entry: String) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(entry);
    }

    fn entries(&self) -> Vec<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_keep_append_order() {
        let log = InMemoryDebugLog::new();
        assert!(log.is_empty());

        log.append("first".to_string());
        log.append("second".to_string());

        assert_eq!(log.entries(), vec!["first", "second"]);
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_clones_share_buffer() {
        let log = InMemoryDebugLog::new();
        let handle = log.clone();

        log.append("s3.check".to_string());
        assert_eq!(handle.entries(), vec!["s3.check"]);
    }
}
