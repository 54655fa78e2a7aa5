/*!
 * Common test utilities for the xml-loc-translator test suite
 */

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;

use xml_loc_translator::providers::mock::MockProvider;
use xml_loc_translator::translation::{TranslationOptions, TranslationService};

/// One group, one string, English culture
pub const SIMPLE_XML: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<localization xmlns="http://schemas.example.com/localization" culture="en" moduleId="Core.Module">
  <group name="Common">
    <string key="Save">Save</string>
  </group>
</localization>
"#;

/// Nested groups, tags, an attribute-style value and a blank entry
pub const NESTED_XML: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<localization xmlns="http://schemas.example.com/localization" culture="en" moduleId="Core.Module">
  <group name="Common" tags="ui,buttons">
    <string key="Save">Save</string>
    <string key="Cancel">Cancel</string>
    <string key="Legacy" value="Close" />
    <string key="Blank">   </string>
    <group name="Errors">
      <string key="NotFound">File not found</string>
      <string key="Denied">Access denied</string>
    </group>
  </group>
  <group name="Empty" />
</localization>
"#;

/// Well-formed but missing the moduleId attribute
pub const MISSING_MODULE_ID_XML: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<localization xmlns="urn:x" culture="en">
  <group name="Common">
    <string key="Save">Save</string>
  </group>
</localization>
"#;

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Gateway options without pacing so tests run fast
pub fn fast_options() -> TranslationOptions {
    TranslationOptions {
        request_timeout: Duration::from_secs(10),
        request_delay: Duration::ZERO,
    }
}

/// Translation service backed by the given mock
pub fn mock_service(provider: MockProvider) -> TranslationService<MockProvider> {
    TranslationService::with_provider(provider, fast_options())
}
