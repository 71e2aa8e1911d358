pub mod sim;
pub use sim::{PrimaryTask, SecondaryTask, simulated_pair};
