mod candidate;
mod decision;
mod filter;
mod vote;

pub use candidate::*;
pub use decision::*;
pub use filter::*;
pub use vote::*;
