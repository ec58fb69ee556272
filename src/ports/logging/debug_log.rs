/// Port for the debug log side-channel.
///
/// Append-only: entries come back in the order they were appended and are
/// never removed. The facade only writes to it.
pub trait DebugLog: Send + Sync + 'static {
    fn append(&self, entry: String);

    fn entries(&self) -> Vec<String>;
}
