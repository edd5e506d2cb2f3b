// Model exports
pub mod domain;
pub mod requests;

pub use domain::{
    DirectoryMatch, DocumentType, FailedLookup, LookupOutcome, LookupReport, RegisteredEntry,
    SchemedValue, SearchResponse,
};
pub use requests::LookupOptions;
