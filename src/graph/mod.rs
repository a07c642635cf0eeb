//! Graph model and the authoritative store.
//!
//! [`GraphStore`] owns every [`Node`] and [`Edge`]; reference sets, ports and
//! the alias table are derived from it and refreshed on each mutation.

pub mod builder;
pub mod edge;
pub mod node;
pub mod store;

pub use builder::*;
pub use edge::*;
pub use node::*;
pub use store::*;
