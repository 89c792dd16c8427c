// Adapters layer: concrete implementations of the domain ports.

pub mod notifier;
pub mod postgrest;

pub use notifier::ConsoleNotifier;
pub use postgrest::PostgrestStore;
