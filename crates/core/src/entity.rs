//! Entity trait: identity + continuity across state changes.

use crate::id::RecordId;

/// Entity marker + minimal interface.
///
/// Identity is store-assigned: an entity starts transient (id `0`) and gains
/// its identifier on first persistence.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: RecordId;

    /// Returns the entity identifier.
    fn id(&self) -> Self::Id;

    /// Whether the entity has no corresponding row in the store.
    fn is_transient(&self) -> bool {
        self.id().is_transient()
    }
}
