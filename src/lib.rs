/// Template value resolution
///
/// Resolves accessor expressions like `item.name` or `order.total('EUR')`
/// against dynamic data through an ordered chain of resolvers, and generates
/// specialized resolvers for host types from their structural metadata.
pub mod cli;
pub mod engine;
pub mod error;
pub mod generator;
pub mod logging;
pub mod metadata;

pub use engine::{EvalContext, Resolved, Resolver, ResolverChain, Value};
pub use error::{Error, Result};
pub use generator::AccessorGenerator;
