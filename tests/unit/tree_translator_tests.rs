/*!
 * Tests for the recursive document translator
 */

use anyhow::Result;
use xml_loc_translator::document::{
    Group, LocalizationDocument, StringEntry, ValueSlot, XmlCodec,
};
use xml_loc_translator::providers::mock::MockProvider;
use xml_loc_translator::translation::TreeTranslator;

use crate::common;

fn translator(provider: MockProvider) -> TreeTranslator<MockProvider> {
    TreeTranslator::new(common::mock_service(provider), "en", "pt")
}

/// (name, tags, keys) for every group, depth first
fn skeleton(groups: &[Group]) -> Vec<(String, Option<String>, Vec<String>)> {
    groups
        .iter()
        .flat_map(|group| {
            let keys = group.strings.iter().map(|s| s.key.clone()).collect();
            std::iter::once((group.name.clone(), group.tags.clone(), keys)).chain(skeleton(&group.subgroups))
        })
        .collect()
}

#[tokio::test]
async fn test_translate_document_withSingleString_shouldTranslateAndRelabelCulture() -> Result<()> {
    let source = XmlCodec::parse_str(common::SIMPLE_XML)?;
    let translator = translator(MockProvider::working().with_translations(&[("Save", "Salvar")]));

    let translated = translator.translate_document(&source).await;

    assert_eq!(translated.culture, "pt");
    assert_eq!(translated.namespace, source.namespace);
    assert_eq!(translated.module_id, source.module_id);
    assert_eq!(translated.groups[0].strings[0].key, "Save");
    assert_eq!(translated.groups[0].strings[0].text, "Salvar");
    Ok(())
}

#[tokio::test]
async fn test_translate_document_shouldNotMutateInput() -> Result<()> {
    let source = XmlCodec::parse_str(common::NESTED_XML)?;
    let snapshot = source.clone();

    let _ = translator(MockProvider::working()).translate_document(&source).await;

    assert_eq!(source, snapshot);
    Ok(())
}

#[tokio::test]
async fn test_translate_document_shouldPreserveStructure() -> Result<()> {
    let source = XmlCodec::parse_str(common::NESTED_XML)?;

    let translated = translator(MockProvider::working()).translate_document(&source).await;

    assert_eq!(skeleton(&translated.groups), skeleton(&source.groups));
    let (before, after) = (source.stats(), translated.stats());
    assert_eq!(before.total_groups, after.total_groups);
    assert_eq!(before.total_strings, after.total_strings);
    assert_eq!(after.culture, "pt");
    Ok(())
}

#[tokio::test]
async fn test_translate_document_shouldWriteIntoAuthoritativeSlot() -> Result<()> {
    let source = XmlCodec::parse_str(common::NESTED_XML)?;

    let translated = translator(MockProvider::working().with_translations(&[("Close", "Fechar")]))
        .translate_document(&source)
        .await;

    let legacy = &translated.groups[0].strings[2];
    assert_eq!(legacy.key, "Legacy");
    assert_eq!(legacy.text, "Fechar");
    assert_eq!(legacy.slot, ValueSlot::Attribute);
    Ok(())
}

#[tokio::test]
async fn test_translate_document_shouldLeaveLegacyValueUntranslated() {
    let mut entry = StringEntry::new("k", "New");
    entry.legacy_value = Some("Old".to_string());
    let source = LocalizationDocument::new("x", "en", "m").with_group(Group::new("G").with_string(entry));

    let translated = translator(MockProvider::working()).translate_document(&source).await;

    let entry = &translated.groups[0].strings[0];
    assert_eq!(entry.text, "[pt] New");
    assert_eq!(entry.legacy_value.as_deref(), Some("Old"));
}

#[tokio::test]
async fn test_translate_document_withBlankEntry_shouldPassThroughWithoutRequest() -> Result<()> {
    let source = XmlCodec::parse_str(common::NESTED_XML)?;
    let provider = MockProvider::working();
    let translator = translator(provider.clone());

    let (translated, report) = translator.translate_document_with_report(&source).await;

    assert!(translated.groups[0].strings[3].is_blank());
    // Save, Cancel, Close, File not found, Access denied
    assert_eq!(provider.request_count(), 5);
    assert!(!provider.requested_texts().iter().any(|t| t.trim().is_empty()));
    assert_eq!(report.strings_sent, 5);
    assert_eq!(report.strings_skipped, 1);
    assert_eq!(report.groups, 3);
    Ok(())
}

#[tokio::test]
async fn test_translate_document_withFailingGateway_shouldOnlyChangeCulture() -> Result<()> {
    let source = XmlCodec::parse_str(common::NESTED_XML)?;

    let (translated, report) = translator(MockProvider::failing())
        .translate_document_with_report(&source)
        .await;

    let mut expected = source.clone();
    expected.culture = "pt".to_string();
    assert_eq!(translated, expected);
    assert_eq!(report.strings_translated, 0);
    assert_eq!(report.strings_unchanged(), 5);
    assert!(XmlCodec::validate(&translated));
    Ok(())
}

#[tokio::test]
async fn test_translate_document_withDuplicateTexts_shouldCorrelateByPosition() {
    let source = LocalizationDocument::new("x", "en", "m").with_group(
        Group::new("G")
            .with_string(StringEntry::new("first", "OK"))
            .with_string(StringEntry::new("blank", ""))
            .with_string(StringEntry::new("second", "OK")),
    );
    // Second request fails, so the two "OK" entries end up different
    let translated = translator(MockProvider::intermittent(2)).translate_document(&source).await;

    let texts: Vec<&str> = translated.groups[0].strings.iter().map(|s| s.text.as_str()).collect();
    assert_eq!(texts, vec!["[pt] OK", "", "OK"]);
}

#[tokio::test]
async fn test_translate_document_shouldBatchPerGroupInDocumentOrder() -> Result<()> {
    let source = XmlCodec::parse_str(common::NESTED_XML)?;
    let provider = MockProvider::working();

    translator(provider.clone()).translate_document(&source).await;

    assert_eq!(
        provider.requested_texts(),
        vec!["Save", "Cancel", "Close", "File not found", "Access denied"]
    );
    Ok(())
}
