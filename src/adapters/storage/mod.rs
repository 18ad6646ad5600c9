// Key-value storage backends

pub mod factory;
pub mod file;
pub mod memory;
pub mod traits;

pub use factory::create_key_value_store;
pub use file::FileStore;
pub use memory::MemoryStore;
pub use traits::KeyValueStore;
