use anyhow::{Context, Result, anyhow};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::app_config::Config;
use crate::document::{DocumentStats, XmlCodec};
use crate::errors::DocumentError;
use crate::file_utils::FileManager;
use crate::language_utils;
use crate::providers::google::GoogleTranslate;
use crate::providers::{Provider, TranslationRequest};
use crate::translation::{TranslationReport, TranslationService, TreeTranslator};

// @module: Application controller for localization file processing

/// Result of a successful `translate` run
#[derive(Debug, Clone)]
pub struct TranslateOutcome {
    /// Where the translated document was written
    pub output_path: PathBuf,
    /// Statistics of the input document
    pub stats: DocumentStats,
    /// What the translator did
    pub report: TranslationReport,
    /// Whether the connectivity probe succeeded before translating
    pub service_reachable: bool,
}

/// Main application controller for localization translation
pub struct Controller<P = GoogleTranslate> {
    // @field: App configuration
    config: Config,
    // @field: Document translator for the configured language pair
    translator: TreeTranslator<P>,
}

impl Controller<GoogleTranslate> {
    // @method: Create a new controller backed by the HTTP translation service
    pub fn with_config(config: Config) -> Result<Self> {
        let service = TranslationService::new(config.translation.clone())
            .context("Failed to create translation service")?;
        Ok(Self::with_service(config, service))
    }
}

impl<P> Controller<P>
where
    P: Provider<Request = TranslationRequest>,
{
    /// Create a controller around an existing translation service
    pub fn with_service(config: Config, service: TranslationService<P>) -> Self {
        let translator = TreeTranslator::new(
            service,
            config.source_language.clone(),
            config.target_language.clone(),
        );
        Self { config, translator }
    }

    /// The active configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the full pipeline: validate, report, probe, translate, write
    pub async fn translate_file(
        &self,
        input_file: &Path,
        output_file: Option<PathBuf>,
    ) -> Result<TranslateOutcome> {
        let start_time = Instant::now();
        Self::ensure_input_exists(input_file)?;

        info!("🔍 Validating {:?}", input_file);
        let document = XmlCodec::parse_file(input_file)
            .with_context(|| format!("Failed to parse {:?}", input_file))?;
        if !XmlCodec::validate(&document) {
            return Err(anyhow!("Invalid XML or not a localization file: {:?}", input_file));
        }
        info!("Valid localization file");

        let stats = document.stats();
        Self::log_stats(&stats);

        if !language_utils::language_codes_match(&document.culture, &self.config.source_language)
            && language_utils::primary_subtag(&self.config.source_language) != language_utils::AUTO_DETECT
        {
            warn!(
                "Document culture '{}' does not match source language '{}'",
                document.culture, self.config.source_language
            );
        }

        info!("Testing translation service...");
        let service_reachable = self.translator.service().test_connection().await;
        if service_reachable {
            info!("Translation service is working");
        } else {
            warn!("Translation service may not be working correctly, continuing anyway");
        }

        let output_path = output_file.unwrap_or_else(|| {
            FileManager::generate_output_path(input_file, self.translator.target_language())
        });

        info!(
            "Translating from {} to {}...",
            describe_language(&self.config.source_language),
            describe_language(&self.config.target_language)
        );
        let (translated, report) = self.translator.translate_document_with_report(&document).await;

        info!("💾 Saving translated file: {:?}", output_path);
        XmlCodec::save_to_file(&translated, &output_path)
            .with_context(|| format!("Failed to write {:?}", output_path))?;

        info!(
            "Translated {} of {} strings ({} unchanged, {}) in {:.1}s",
            report.strings_translated,
            report.strings_sent,
            report.strings_unchanged(),
            format_skipped(report.strings_skipped),
            start_time.elapsed().as_secs_f64()
        );

        Ok(TranslateOutcome {
            output_path,
            stats,
            report,
            service_reachable,
        })
    }

    /// Validate a file and compute its statistics.
    ///
    /// Returns `Ok(None)` for a readable file that is not a valid localization
    /// document; I/O problems are errors.
    pub fn validate_file(&self, input_file: &Path) -> Result<Option<DocumentStats>> {
        Self::ensure_input_exists(input_file)?;

        let document = match XmlCodec::parse_file(input_file) {
            Ok(document) => document,
            Err(e @ DocumentError::Io { .. }) => return Err(e.into()),
            Err(e) => {
                warn!("{}", e);
                return Ok(None);
            }
        };

        if !XmlCodec::validate(&document) {
            debug!("Header attributes or groups missing in {:?}", input_file);
            return Ok(None);
        }

        let stats = document.stats();
        Self::log_stats(&stats);
        Ok(Some(stats))
    }

    /// Probe the translation service
    pub async fn test_service(&self) -> bool {
        self.translator.service().test_connection().await
    }

    fn ensure_input_exists(input_file: &Path) -> Result<()> {
        if !FileManager::file_exists(input_file) {
            return Err(anyhow!("File not found: {:?}", input_file));
        }
        Ok(())
    }

    fn log_stats(stats: &DocumentStats) {
        info!("📊 File statistics:");
        info!("   - Culture: {}", stats.culture);
        info!("   - Module ID: {}", stats.module_id);
        info!("   - Total groups: {}", stats.total_groups);
        info!("   - Total strings: {}", stats.total_strings);
    }
}

fn describe_language(code: &str) -> String {
    match language_utils::get_language_name(code) {
        Ok(name) => format!("{} ({})", name, code),
        Err(_) => code.to_string(),
    }
}

fn format_skipped(skipped: usize) -> String {
    match skipped {
        0 => "none blank".to_string(),
        1 => "1 blank skipped".to_string(),
        n => format!("{} blank skipped", n),
    }
}
