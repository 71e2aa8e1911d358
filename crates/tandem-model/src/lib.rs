//! Plain data shared by the coordinator, the simulated tasks and the binary.

mod domain;
pub use domain::*;

mod spec;
pub use spec::*;

mod error;
pub use error::ModelError;
