use anyhow::{Result, anyhow};
use isolang::Language;

/// Language utilities for culture code handling
///
/// Localization files label themselves with BCP-47-like culture codes
/// (`pt`, `pt-BR`, `zh-CN`). Only the primary subtag is checked against
/// ISO 639; region and script subtags are passed through untouched.
/// Language code type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageCodeType {
    /// ISO 639-1 (2-letter) code
    Part1,
    /// ISO 639-2/T (3-letter) code
    Part2T,
    /// Let the translation service detect the source language
    Auto,
}

/// Pseudo language code accepted by the remote service for source detection
pub const AUTO_DETECT: &str = "auto";

/// Split a culture code into its primary language subtag
pub fn primary_subtag(code: &str) -> String {
    code.trim()
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_lowercase()
}

/// Validate that the primary subtag of a culture code is ISO 639-1 or ISO 639-2/T
pub fn validate_language_code(code: &str) -> Result<LanguageCodeType> {
    let primary = primary_subtag(code);

    if primary == AUTO_DETECT {
        return Ok(LanguageCodeType::Auto);
    }

    match primary.len() {
        2 if Language::from_639_1(&primary).is_some() => Ok(LanguageCodeType::Part1),
        3 if Language::from_639_3(&primary).is_some() => Ok(LanguageCodeType::Part2T),
        _ => Err(anyhow!("Invalid language code: {}", code)),
    }
}

/// Normalize a culture code to ISO 639-2/T (3-letter) format
pub fn normalize_to_part2t(code: &str) -> Result<String> {
    let primary = primary_subtag(code);

    let language = match primary.len() {
        2 => Language::from_639_1(&primary),
        3 => Language::from_639_3(&primary),
        _ => None,
    };

    language
        .map(|lang| lang.to_639_3().to_string())
        .ok_or_else(|| anyhow!("Cannot normalize invalid language code: {}", code))
}

/// Check if two culture codes name the same language, ignoring region subtags
pub fn language_codes_match(code1: &str, code2: &str) -> bool {
    match (normalize_to_part2t(code1), normalize_to_part2t(code2)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Get the English language name from a culture code
pub fn get_language_name(code: &str) -> Result<String> {
    if primary_subtag(code) == AUTO_DETECT {
        return Ok("Auto-detect".to_string());
    }

    let normalized = normalize_to_part2t(code)?;
    let lang = Language::from_639_3(&normalized)
        .ok_or_else(|| anyhow!("Failed to get language from code: {}", normalized))?;

    Ok(lang.to_name().to_string())
}
