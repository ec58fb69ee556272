mod in_memory_debug_log;

pub use in_memory_debug_log::InMemoryDebugLog;
