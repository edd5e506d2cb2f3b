use std::collections::HashSet;

use crate::models::{FailedLookup, LookupOutcome, LookupReport, RegisteredEntry};

/// Fold per-identifier outcomes into a report
///
/// Registered entries are deduplicated on `(company_number, compliant)`,
/// keeping first-seen order. Unregistered and failed identifiers are kept
/// as they come, duplicates included.
pub fn build_report<I>(outcomes: I) -> LookupReport
where
    I: IntoIterator<Item = (String, LookupOutcome)>,
{
    let mut report = LookupReport::default();
    let mut seen: HashSet<RegisteredEntry> = HashSet::new();

    for (identifier, outcome) in outcomes {
        match outcome {
            LookupOutcome::Registered(entries) => {
                for entry in entries {
                    if seen.insert(entry.clone()) {
                        report.registered.push(entry);
                    }
                }
            }
            LookupOutcome::Unregistered => report.unregistered.push(identifier),
            LookupOutcome::Failed(reason) => {
                report.failed.push(FailedLookup { identifier, reason })
            }
        }
    }

    report
}
