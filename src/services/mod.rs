// Service exports
pub mod directory;
pub mod lookup;
pub mod sleeper;

pub use directory::{DirectoryClient, DirectoryError};
pub use lookup::{LookupError, LookupService};
pub use sleeper::{Sleeper, TokioSleeper};
