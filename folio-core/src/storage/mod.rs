//! String-keyed slot storage: the durable side of the project store and
//! the session guard.

pub mod envelope;
pub mod memory;
pub mod schema;
pub mod sqlite;
pub mod traits;

pub use memory::MemorySlots;
pub use sqlite::SqliteSlots;
pub use traits::SlotStorage;
