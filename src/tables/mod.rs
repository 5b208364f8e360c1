mod history;
mod killers;
mod repetitions;
mod transposition;

pub use history::*;
pub use killers::*;
pub use repetitions::*;
pub use transposition::*;
