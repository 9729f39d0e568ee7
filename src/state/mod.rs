pub mod replay;
pub mod script;
mod test;

pub use replay::{ReplayArgs, ReplayState};
