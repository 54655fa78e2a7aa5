/*!
 * Tree translator.
 *
 * Produces a translated copy of a localization document. Every group's own
 * strings go to the gateway as one batch; subgroups are handled recursively.
 * Results are matched back to entries by position, so two entries with the
 * same source text each receive their own result.
 */

use log::{debug, info};

use crate::document::{Group, LocalizationDocument, StringEntry};
use crate::providers::google::GoogleTranslate;
use crate::providers::{Provider, TranslationRequest};

use super::service::TranslationService;

/// Counters collected while translating a document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TranslationReport {
    /// Groups visited, at every level
    pub groups: usize,
    /// Non-blank strings sent to the gateway
    pub strings_sent: usize,
    /// Strings whose text changed
    pub strings_translated: usize,
    /// Blank strings passed through without a request
    pub strings_skipped: usize,
}

impl TranslationReport {
    /// Strings sent but returned unchanged (service degraded or identical text)
    pub fn strings_unchanged(&self) -> usize {
        self.strings_sent - self.strings_translated
    }
}

/// Walks a document and substitutes translated leaf values
#[derive(Debug)]
pub struct TreeTranslator<P = GoogleTranslate> {
    service: TranslationService<P>,
    source_language: String,
    target_language: String,
}

impl<P> TreeTranslator<P>
where
    P: Provider<Request = TranslationRequest>,
{
    /// Create a translator for one language pair
    pub fn new(
        service: TranslationService<P>,
        source_language: impl Into<String>,
        target_language: impl Into<String>,
    ) -> Self {
        Self {
            service,
            source_language: source_language.into(),
            target_language: target_language.into(),
        }
    }

    /// The gateway used by this translator
    pub fn service(&self) -> &TranslationService<P> {
        &self.service
    }

    /// Target language written into the translated document's culture
    pub fn target_language(&self) -> &str {
        &self.target_language
    }

    /// Translate a document; the input is left untouched
    pub async fn translate_document(&self, document: &LocalizationDocument) -> LocalizationDocument {
        self.translate_document_with_report(document).await.0
    }

    /// Translate a document and report what happened
    pub async fn translate_document_with_report(
        &self,
        document: &LocalizationDocument,
    ) -> (LocalizationDocument, TranslationReport) {
        info!(
            "Translating {} top-level groups from {} to {}",
            document.groups.len(),
            self.source_language,
            self.target_language
        );

        let mut report = TranslationReport::default();
        let groups = self.translate_groups(&document.groups, &mut report).await;

        let translated = LocalizationDocument {
            namespace: document.namespace.clone(),
            culture: self.target_language.clone(),
            module_id: document.module_id.clone(),
            groups,
        };

        (translated, report)
    }

    async fn translate_groups(&self, groups: &[Group], report: &mut TranslationReport) -> Vec<Group> {
        let mut translated_groups = Vec::with_capacity(groups.len());

        for group in groups {
            report.groups += 1;
            debug!("Group '{}': {} strings, {} subgroups", group.name, group.strings.len(), group.subgroups.len());

            let strings = self.translate_strings(&group.strings, report).await;
            let subgroups = Box::pin(self.translate_groups(&group.subgroups, report)).await;

            translated_groups.push(Group {
                name: group.name.clone(),
                tags: group.tags.clone(),
                strings,
                subgroups,
            });
        }

        translated_groups
    }

    async fn translate_strings(
        &self,
        strings: &[StringEntry],
        report: &mut TranslationReport,
    ) -> Vec<StringEntry> {
        let mut translated = strings.to_vec();

        let pending: Vec<usize> = strings
            .iter()
            .enumerate()
            .filter(|(_, entry)| !entry.is_blank())
            .map(|(index, _)| index)
            .collect();

        report.strings_skipped += strings.len() - pending.len();
        if pending.is_empty() {
            return translated;
        }

        let texts: Vec<String> = pending.iter().map(|&index| strings[index].text.clone()).collect();
        let results = self
            .service
            .translate_batch(&texts, &self.source_language, &self.target_language)
            .await;

        for (&index, result) in pending.iter().zip(results) {
            report.strings_sent += 1;
            if result.is_translated() {
                report.strings_translated += 1;
                debug!("  \"{}\" → \"{}\"", result.original_text, result.translated_text);
            }
            // `text` is the authoritative slot; `slot` and `legacy_value` stay as copied
            translated[index].text = result.translated_text;
        }

        translated
    }
}
