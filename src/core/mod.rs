// Core classification exports
pub mod compliance;
pub mod identifier;
pub mod report;

pub use compliance::{is_compliant, is_compliant_profile, match_is_compliant, COMPLIANT_PROFILES};
pub use identifier::{normalize_all, normalize_identifier};
pub use report::build_report;
