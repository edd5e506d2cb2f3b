use crate::config::DirectorySettings;
use crate::core::{build_report, match_is_compliant};
use crate::models::{LookupOptions, LookupOutcome, LookupReport, RegisteredEntry};
use crate::services::directory::{DirectoryClient, DirectoryError};
use crate::services::sleeper::{Sleeper, TokioSleeper};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};
use validator::Validate;

/// Errors that abort a batch lookup before any request is sent
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Batch lookup of company numbers against the Peppol directory
///
/// Identifiers are processed strictly in order, one request in flight at a
/// time. A 429 pauses the loop and retries the same identifier, then the
/// batch carries on with the remaining identifiers.
pub struct LookupService<S = TokioSleeper> {
    client: DirectoryClient,
    sleeper: S,
    default_retry_after: Duration,
    max_rate_limit_retries: u32,
}

impl LookupService<TokioSleeper> {
    pub fn new(client: DirectoryClient, settings: &DirectorySettings) -> Self {
        Self::with_sleeper(client, settings, TokioSleeper)
    }

    /// Build the client and service from settings alone
    pub fn from_settings(settings: &DirectorySettings) -> Result<Self, DirectoryError> {
        Ok(Self::new(DirectoryClient::from_settings(settings)?, settings))
    }
}

impl<S: Sleeper> LookupService<S> {
    pub fn with_sleeper(client: DirectoryClient, settings: &DirectorySettings, sleeper: S) -> Self {
        Self {
            client,
            sleeper,
            default_retry_after: settings.default_retry_after(),
            max_rate_limit_retries: settings.max_rate_limit_retries,
        }
    }

    /// Look up every identifier and classify it as registered, unregistered or failed
    ///
    /// # Errors
    /// `LookupError::InvalidInput` for an empty list or invalid options. No
    /// request is made in that case.
    pub async fn lookup(
        &self,
        identifiers: &[String],
        options: &LookupOptions,
    ) -> Result<LookupReport, LookupError> {
        if identifiers.is_empty() {
            return Err(LookupError::InvalidInput(
                "identifiers must be a non-empty list".to_string(),
            ));
        }
        options
            .validate()
            .map_err(|e| LookupError::InvalidInput(e.to_string()))?;

        if let Some(batch_size) = options.batch_size {
            debug!(batch_size, "batch_size ignored, lookups run sequentially");
        }

        let mut outcomes = Vec::with_capacity(identifiers.len());
        for identifier in identifiers {
            let outcome = self.lookup_one(identifier).await;
            outcomes.push((identifier.clone(), outcome));
        }

        let report = build_report(outcomes);
        info!(
            total = identifiers.len(),
            registered = report.registered.len(),
            unregistered = report.unregistered.len(),
            failed = report.failed.len(),
            "Lookup finished"
        );

        Ok(report)
    }

    /// Classify a single identifier, waiting out rate limits in place
    pub async fn lookup_one(&self, identifier: &str) -> LookupOutcome {
        let mut rate_limited = 0u32;

        loop {
            match self.client.search(identifier).await {
                Ok(response) if response.matches.is_empty() => return LookupOutcome::Unregistered,
                Ok(response) => {
                    let entries = response
                        .matches
                        .iter()
                        .map(|m| RegisteredEntry {
                            company_number: identifier.to_string(),
                            compliant: match_is_compliant(m),
                        })
                        .collect();
                    return LookupOutcome::Registered(entries);
                }
                Err(DirectoryError::NotFound(_)) => return LookupOutcome::Unregistered,
                Err(DirectoryError::RateLimited { retry_after }) => {
                    if rate_limited >= self.max_rate_limit_retries {
                        warn!(
                            identifier,
                            attempts = rate_limited + 1,
                            "Still rate limited, giving up on identifier"
                        );
                        return LookupOutcome::Failed(format!(
                            "rate limited after {} retries",
                            rate_limited
                        ));
                    }
                    rate_limited += 1;

                    let wait = retry_after.unwrap_or(self.default_retry_after);
                    warn!(
                        identifier,
                        wait_secs = wait.as_secs(),
                        "Rate limited, waiting before retry"
                    );
                    self.sleeper.sleep(wait).await;
                }
                Err(e) => {
                    warn!(identifier, error = %e, "Lookup failed, skipping identifier");
                    return LookupOutcome::Failed(e.to_string());
                }
            }
        }
    }

    /// Raw participant document for a known participant ID
    pub async fn participant_details(&self, participant_id: &str) -> Result<Value, DirectoryError> {
        self.client.get_participant(participant_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::sleeper::RecordingSleeper;

    fn service() -> LookupService<RecordingSleeper> {
        // Nothing listens here; only used where no request is expected
        let settings = DirectorySettings::with_base_url("http://127.0.0.1:9/search");
        let client = DirectoryClient::from_settings(&settings).unwrap();
        LookupService::with_sleeper(client, &settings, RecordingSleeper::new())
    }

    #[tokio::test]
    async fn test_empty_list_is_invalid() {
        let err = service().lookup(&[], &LookupOptions::default()).await.unwrap_err();
        assert!(matches!(err, LookupError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_zero_batch_size_is_invalid() {
        let err = service()
            .lookup(&["0769377373".to_string()], &LookupOptions::with_batch_size(0))
            .await
            .unwrap_err();
        assert!(matches!(err, LookupError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_connection_error_is_tracked_as_failed() {
        let report = service()
            .lookup(&["0769377373".to_string()], &LookupOptions::default())
            .await
            .unwrap();

        assert!(report.registered.is_empty());
        assert!(report.unregistered.is_empty());
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].identifier, "0769377373");
    }
}
