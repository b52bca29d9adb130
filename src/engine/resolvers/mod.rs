// Built-in resolvers.
//
// These define the reference semantics every resolver, hand-written or
// generated, follows: check applicability cheaply, decline with NotFound,
// evaluate parameters only after the accessor has been matched.

pub mod collection;
pub mod map;
pub mod map_entry;
pub mod or;
pub mod this;

pub use collection::CollectionResolver;
pub use map::MapResolver;
pub use map_entry::MapEntryResolver;
pub use or::OrResolver;
pub use this::ThisResolver;
