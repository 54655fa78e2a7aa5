/*!
 * Translation of localization documents.
 *
 * - `service`: fail-soft gateway over a translation provider
 * - `tree`: recursive document translator built on the gateway
 */

// Re-export main types for easier usage
pub use self::service::{TranslationOptions, TranslationResult, TranslationService};
pub use self::tree::{TranslationReport, TreeTranslator};

// Submodules
pub mod service;
pub mod tree;
