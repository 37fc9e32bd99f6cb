/// Durable key/value slots holding opaque string blobs.
///
/// Each slot is read and written wholesale; there are no partial updates.
#[async_trait::async_trait]
pub trait SlotStorage: Send + Sync {
    /// Read a slot. `None` when the slot has never been written or was removed.
    async fn get(&self, key: &str) -> crate::error::Result<Option<String>>;

    /// Overwrite a slot.
    async fn set(&self, key: &str, value: &str) -> crate::error::Result<()>;

    /// Remove a slot. Removing an absent slot is not an error.
    async fn remove(&self, key: &str) -> crate::error::Result<()>;

    /// All slot keys, sorted.
    async fn keys(&self) -> crate::error::Result<Vec<String>>;
}
