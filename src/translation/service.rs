/*!
 * Translation gateway.
 *
 * Wraps a provider with the best-effort contract the rest of the pipeline
 * relies on: blank input never reaches the network, every failure degrades
 * to the source text, and batches run one request at a time with a fixed
 * pause in between.
 */

use log::{debug, warn};
use std::time::Duration;

use crate::app_config::TranslationConfig;
use crate::errors::{ProviderError, TranslationError};
use crate::providers::google::GoogleTranslate;
use crate::providers::{Provider, TranslationRequest};

/// Probe text sent by the connectivity check
const PROBE_TEXT: &str = "Hello";

/// Lower-cased tokens accepted as a Portuguese answer to the probe
const PROBE_ACKNOWLEDGEMENTS: [&str; 2] = ["olá", "oi"];

/// Outcome of translating one text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationResult {
    /// Text as given to the gateway
    pub original_text: String,
    /// Translation, or the original text when translation failed
    pub translated_text: String,
    /// Source language code
    pub source_language: String,
    /// Target language code
    pub target_language: String,
}

impl TranslationResult {
    /// A result that carries the source text through untouched
    pub fn unchanged(text: &str, source_language: &str, target_language: &str) -> Self {
        Self {
            original_text: text.to_string(),
            translated_text: text.to_string(),
            source_language: source_language.to_string(),
            target_language: target_language.to_string(),
        }
    }

    /// True when the translated text differs from the source
    pub fn is_translated(&self) -> bool {
        self.translated_text != self.original_text
    }
}

/// Translation options for customizing the gateway
#[derive(Debug, Clone)]
pub struct TranslationOptions {
    /// Upper bound for a single remote call
    pub request_timeout: Duration,

    /// Pause between consecutive remote calls of a batch
    pub request_delay: Duration,
}

impl Default for TranslationOptions {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(10),
            request_delay: Duration::from_millis(100),
        }
    }
}

impl From<&TranslationConfig> for TranslationOptions {
    fn from(config: &TranslationConfig) -> Self {
        Self {
            request_timeout: Duration::from_secs(config.timeout_secs),
            request_delay: Duration::from_millis(config.rate_limit_delay_ms),
        }
    }
}

/// Fail-soft translation service over a provider
#[derive(Debug)]
pub struct TranslationService<P = GoogleTranslate> {
    /// Provider implementation
    provider: P,

    /// Timeout and pacing
    pub options: TranslationOptions,
}

impl TranslationService<GoogleTranslate> {
    /// Create a service backed by the HTTP provider
    pub fn new(config: TranslationConfig) -> Result<Self, ProviderError> {
        let provider = GoogleTranslate::new(&config)?;
        Ok(Self::with_provider(provider, TranslationOptions::from(&config)))
    }
}

impl<P> TranslationService<P>
where
    P: Provider<Request = TranslationRequest>,
{
    /// Create a service around any provider
    pub fn with_provider(provider: P, options: TranslationOptions) -> Self {
        Self { provider, options }
    }

    /// Access the underlying provider
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Translate one text; never fails.
    ///
    /// Blank text is returned as-is without a remote call. Any provider error,
    /// timeout or empty answer yields the original text and a warning.
    pub async fn translate_one(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> TranslationResult {
        if text.trim().is_empty() {
            return TranslationResult::unchanged(text, source_language, target_language);
        }

        match self.request(text, source_language, target_language).await {
            Ok(translated_text) => TranslationResult {
                original_text: text.to_string(),
                translated_text,
                source_language: source_language.to_string(),
                target_language: target_language.to_string(),
            },
            Err(e) => {
                warn!("Translation of \"{}\" failed, keeping source text: {}", text, e);
                TranslationResult::unchanged(text, source_language, target_language)
            }
        }
    }

    /// Translate texts sequentially, one result per input in the same order.
    ///
    /// A failed element degrades on its own and the batch carries on.
    pub async fn translate_batch(
        &self,
        texts: &[String],
        source_language: &str,
        target_language: &str,
    ) -> Vec<TranslationResult> {
        let mut results = Vec::with_capacity(texts.len());
        let mut previous_call_remote = false;

        for text in texts {
            let needs_remote = !text.trim().is_empty();
            if needs_remote && previous_call_remote && !self.options.request_delay.is_zero() {
                tokio::time::sleep(self.options.request_delay).await;
            }

            results.push(self.translate_one(text, source_language, target_language).await);
            previous_call_remote |= needs_remote;
        }

        debug!(
            "Batch of {} texts done, {} translated",
            results.len(),
            results.iter().filter(|r| r.is_translated()).count()
        );
        results
    }

    /// Translate a known probe and check for a Portuguese greeting.
    ///
    /// A smoke test for reachability, not a correctness check.
    pub async fn test_connection(&self) -> bool {
        let result = self.translate_one(PROBE_TEXT, "en", "pt").await;
        let answer = result.translated_text.to_lowercase();
        PROBE_ACKNOWLEDGEMENTS.iter().any(|token| answer.contains(token))
    }

    async fn request(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, TranslationError> {
        let request = TranslationRequest::new(text.trim(), source_language, target_language);

        let response = tokio::time::timeout(self.options.request_timeout, self.provider.complete(request))
            .await
            .map_err(|_| ProviderError::Timeout(self.options.request_timeout))??;

        let translated = P::extract_text(&response);
        if translated.trim().is_empty() {
            return Err(TranslationError::EmptyTranslation(text.to_string()));
        }

        Ok(translated)
    }
}
