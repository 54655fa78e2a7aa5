/*!
 * End-to-end workflow tests through the application controller
 */

use anyhow::Result;
use std::fs;
use xml_loc_translator::app_config::Config;
use xml_loc_translator::document::XmlCodec;
use xml_loc_translator::providers::mock::MockProvider;
use xml_loc_translator::Controller;

use crate::common;

fn controller(provider: MockProvider) -> Controller<MockProvider> {
    Controller::with_service(Config::default(), common::mock_service(provider))
}

/// Test the default translate flow writes `<stem>_<target>.xml` next to the input
#[tokio::test]
async fn test_translate_file_withDefaults_shouldWriteTranslatedSibling() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "strings.xml", common::SIMPLE_XML)?;
    let controller = controller(
        MockProvider::working().with_translations(&[("Save", "Salvar"), ("Hello", "Olá")]),
    );

    let outcome = controller.translate_file(&input, None).await?;

    assert_eq!(outcome.output_path, temp_dir.path().join("strings_pt.xml"));
    assert!(outcome.service_reachable);
    assert_eq!(outcome.stats.total_groups, 1);
    assert_eq!(outcome.stats.total_strings, 1);
    assert_eq!(outcome.report.strings_translated, 1);

    let written = fs::read_to_string(&outcome.output_path)?;
    assert!(written.contains(r#"culture="pt""#));
    assert!(written.contains(r#"moduleId="Core.Module""#));
    assert!(written.contains(r#"<string key="Save">Salvar</string>"#));

    // Input is left as it was
    assert_eq!(fs::read_to_string(&input)?, common::SIMPLE_XML);
    Ok(())
}

#[tokio::test]
async fn test_translate_file_withExplicitOutput_shouldHonourPath() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "strings.xml", common::NESTED_XML)?;
    let output = temp_dir.path().join("out").join("translated.xml");
    let controller = controller(MockProvider::working());

    let outcome = controller.translate_file(&input, Some(output.clone())).await?;

    assert_eq!(outcome.output_path, output);
    assert!(!temp_dir.path().join("strings_pt.xml").exists());

    let translated = XmlCodec::parse_file(&output)?;
    assert_eq!(translated.culture, "pt");
    assert_eq!(translated.groups.len(), 2);
    assert_eq!(translated.groups[0].tags.as_deref(), Some("ui,buttons"));
    assert_eq!(translated.groups[0].subgroups[0].strings[1].text, "[pt] Access denied");
    assert_eq!(translated.stats().total_strings, 6);
    Ok(())
}

/// A failed probe only warns; strings that cannot be translated keep their source text
#[tokio::test]
async fn test_translate_file_withFailingService_shouldStillWriteSourceText() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "strings.xml", common::SIMPLE_XML)?;
    let controller = controller(MockProvider::failing());

    let outcome = controller.translate_file(&input, None).await?;

    assert!(!outcome.service_reachable);
    assert_eq!(outcome.report.strings_translated, 0);
    let translated = XmlCodec::parse_file(&outcome.output_path)?;
    assert_eq!(translated.culture, "pt");
    assert_eq!(translated.groups[0].strings[0].text, "Save");
    Ok(())
}

#[tokio::test]
async fn test_translate_file_withMissingInput_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let controller = controller(MockProvider::working());

    let result = controller
        .translate_file(&temp_dir.path().join("missing.xml"), None)
        .await;

    assert!(result.is_err());
    assert!(format!("{:#}", result.unwrap_err()).contains("File not found"));
    Ok(())
}

#[tokio::test]
async fn test_translate_file_withInvalidDocument_shouldFailWithoutOutput() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let malformed = common::create_test_file(temp_dir.path(), "bad.xml", "<localization><group")?;
    let incomplete =
        common::create_test_file(temp_dir.path(), "incomplete.xml", common::MISSING_MODULE_ID_XML)?;
    let provider = MockProvider::working();
    let controller = controller(provider.clone());

    assert!(controller.translate_file(&malformed, None).await.is_err());
    assert!(controller.translate_file(&incomplete, None).await.is_err());

    assert!(!temp_dir.path().join("bad_pt.xml").exists());
    assert!(!temp_dir.path().join("incomplete_pt.xml").exists());
    assert_eq!(provider.request_count(), 0);
    Ok(())
}

#[test]
fn test_validate_file_withNestedDocument_shouldReturnStats() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "strings.xml", common::NESTED_XML)?;
    let controller = controller(MockProvider::working());

    let stats = controller.validate_file(&input)?.expect("document should be valid");

    assert_eq!(stats.culture, "en");
    assert_eq!(stats.module_id, "Core.Module");
    assert_eq!(stats.total_groups, 3);
    assert_eq!(stats.total_strings, 6);
    Ok(())
}

#[test]
fn test_validate_file_withInvalidDocuments_shouldReturnNone() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let incomplete =
        common::create_test_file(temp_dir.path(), "incomplete.xml", common::MISSING_MODULE_ID_XML)?;
    let malformed = common::create_test_file(temp_dir.path(), "bad.xml", "not xml at all <")?;
    let controller = controller(MockProvider::working());

    assert!(controller.validate_file(&incomplete)?.is_none());
    assert!(controller.validate_file(&malformed)?.is_none());
    assert!(controller.validate_file(&temp_dir.path().join("missing.xml")).is_err());
    Ok(())
}

#[tokio::test]
async fn test_test_service_shouldReflectProbeResult() {
    let working = controller(MockProvider::working().with_translations(&[("Hello", "Olá")]));
    let wrong_answer = controller(MockProvider::working());
    let failing = controller(MockProvider::failing());

    assert!(working.test_service().await);
    assert!(!wrong_answer.test_service().await);
    assert!(!failing.test_service().await);
}
