use serde::{Deserialize, Serialize};

/// Scheme-qualified identifier as returned by the directory (participant IDs, doc types)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemedValue {
    #[serde(default)]
    pub scheme: Option<String>,
    pub value: String,
}

/// Supported electronic document exchange profile of a participant
pub type DocumentType = SchemedValue;

/// One registry entry returned by a directory search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryMatch {
    #[serde(rename = "participantID", default)]
    pub participant_id: Option<SchemedValue>,
    #[serde(rename = "docTypes", default)]
    pub doc_types: Vec<DocumentType>,
}

/// Body of `GET {base_url}?q=...`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(rename = "total-result-count", default)]
    pub total_result_count: Option<u64>,
    #[serde(default)]
    pub matches: Vec<DirectoryMatch>,
}

/// A company found in the directory, with its billing compliance flag
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegisteredEntry {
    #[serde(rename = "companyNumber")]
    pub company_number: String,
    pub compliant: bool,
}

/// An identifier whose lookup ended in an error that could not be classified
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedLookup {
    pub identifier: String,
    pub reason: String,
}

/// Result of looking up a single identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    /// One entry per directory match
    Registered(Vec<RegisteredEntry>),
    Unregistered,
    Failed(String),
}

/// Aggregate result of a batch lookup
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupReport {
    pub registered: Vec<RegisteredEntry>,
    pub unregistered: Vec<String>,
    #[serde(default)]
    pub failed: Vec<FailedLookup>,
}

impl LookupReport {
    /// Number of identifiers that were classified one way or the other
    pub fn classified(&self) -> usize {
        self.registered.len() + self.unregistered.len()
    }

    pub fn is_registered(&self, company_number: &str) -> bool {
        self.registered
            .iter()
            .any(|e| e.company_number == company_number)
    }
}
