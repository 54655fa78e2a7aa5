/*!
 * Tests for file utility functions
 */

use anyhow::Result;
use std::fs;
use std::path::Path;
use xml_loc_translator::file_utils::FileManager;

use crate::common;

/// Test that file_exists returns true for existing files
#[test]
fn test_file_exists_withExistingFile_shouldReturnTrue() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let test_file = common::create_test_file(temp_dir.path(), "strings.xml", "<x/>")?;

    assert!(FileManager::file_exists(&test_file));
    Ok(())
}

/// Test that file_exists returns false for directories and missing files
#[test]
fn test_file_exists_withDirectoryOrMissingFile_shouldReturnFalse() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;

    assert!(!FileManager::file_exists(temp_dir.path()));
    assert!(!FileManager::file_exists(temp_dir.path().join("missing.xml")));
    Ok(())
}

/// Test that generate_output_path inserts the language before the extension
#[test]
fn test_generate_output_path_withExtension_shouldInsertLanguageSuffix() {
    let output = FileManager::generate_output_path(Path::new("/data/loc/strings.xml"), "pt");
    assert_eq!(output, Path::new("/data/loc/strings_pt.xml"));
}

#[test]
fn test_generate_output_path_withoutExtensionOrDirectory_shouldStillWork() {
    assert_eq!(
        FileManager::generate_output_path(Path::new("/data/strings"), "de"),
        Path::new("/data/strings_de")
    );
    assert_eq!(
        FileManager::generate_output_path(Path::new("app.en.xml"), "pt-BR"),
        Path::new("app.en_pt-BR.xml")
    );
}

/// Test that write_atomic replaces existing content and leaves no temp files
#[test]
fn test_write_atomic_withExistingFile_shouldReplaceContent() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let target = common::create_test_file(temp_dir.path(), "out.xml", "old content that is longer")?;

    FileManager::write_atomic(&target, "new")?;

    assert_eq!(fs::read_to_string(&target)?, "new");
    let entries = fs::read_dir(temp_dir.path())?.count();
    assert_eq!(entries, 1);
    Ok(())
}

#[test]
fn test_write_atomic_withMissingParent_shouldCreateDirectories() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let target = temp_dir.path().join("a").join("b").join("out.xml");

    FileManager::write_atomic(&target, "content")?;

    assert_eq!(fs::read_to_string(&target)?, "content");
    Ok(())
}
