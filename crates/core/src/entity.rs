//! Entity trait: identity + version across state changes.

/// A persisted document with stable identity and a monotonically increasing
/// version.
///
/// Stores bump `version` on every successful write; callers hand the version
/// they read back as an [`crate::ExpectedVersion`] so that concurrent writers
/// cannot silently overwrite each other.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + Ord + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> Self::Id;

    /// Version of the stored state this value was read from.
    fn version(&self) -> u64;

    /// Set by the store when a write commits.
    fn set_version(&mut self, version: u64);
}
