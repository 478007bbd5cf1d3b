//! Storage and transport adapters for the Frinzy core traits.

pub mod config_service;
pub mod live_channel;
pub mod memory_store;
pub mod paths;
pub mod storage;
pub mod toml_profile_repository;

pub use crate::config_service::ConfigService;
pub use crate::live_channel::BroadcastLiveChannel;
pub use crate::memory_store::InMemoryRecordStore;
pub use crate::paths::FrinzyPaths;
pub use crate::toml_profile_repository::TomlProfileRepository;
