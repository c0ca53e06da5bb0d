// Adapters layer: concrete implementations of domain ports.

pub mod memory;

pub use memory::InMemoryRepository;
