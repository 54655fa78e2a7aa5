/*!
 * Localization document handling.
 *
 * - `model`: the resource-bundle tree (document, groups, string entries)
 * - `codec`: XML parsing, validation and pretty-printing
 */

pub mod codec;
pub mod model;

// Re-export types used by other modules
pub use codec::XmlCodec;
pub use model::{DocumentStats, Group, LocalizationDocument, StringEntry, ValueSlot};
