//! Peppol lookup - batch company number lookup against the Peppol directory
//!
//! Each identifier is classified as registered (with a Billing 3.0
//! compliance flag), unregistered, or failed, and collected into a
//! [`LookupReport`].

pub mod config;
pub mod core;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use crate::core::{build_report, is_compliant, normalize_identifier, COMPLIANT_PROFILES};
pub use models::{LookupOptions, LookupOutcome, LookupReport, RegisteredEntry};
pub use services::{DirectoryClient, DirectoryError, LookupError, LookupService};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        // Verify that the library exports work correctly
        assert_eq!(normalize_identifier("BE 0769.377.373"), "0769377373");
        assert_eq!(COMPLIANT_PROFILES.len(), 2);
    }
}
