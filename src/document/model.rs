/*!
 * In-memory model of a localization resource bundle.
 *
 * A document is a tree: the root carries the culture metadata and an ordered
 * list of groups, each group holds ordered string entries and ordered subgroups.
 * The codec always produces explicit sequences, so a group with one child and a
 * group with many children look the same to every consumer.
 */

use serde::{Deserialize, Serialize};

/// Root of a localization file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizationDocument {
    /// XML namespace (`xmlns` attribute)
    pub namespace: String,

    /// Culture code of the texts in this document
    pub culture: String,

    /// Opaque module identifier, passed through unchanged
    pub module_id: String,

    /// Top-level groups in document order
    #[serde(default)]
    pub groups: Vec<Group>,
}

impl LocalizationDocument {
    /// Create an empty document with the given header attributes
    pub fn new(
        namespace: impl Into<String>,
        culture: impl Into<String>,
        module_id: impl Into<String>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            culture: culture.into(),
            module_id: module_id.into(),
            groups: Vec::new(),
        }
    }

    /// Append a top-level group
    pub fn with_group(mut self, group: Group) -> Self {
        self.groups.push(group);
        self
    }

    /// Count groups and strings across every nesting level
    pub fn stats(&self) -> DocumentStats {
        let (total_groups, total_strings) = count_groups_and_strings(&self.groups);
        DocumentStats {
            culture: self.culture.clone(),
            module_id: self.module_id.clone(),
            total_groups,
            total_strings,
        }
    }
}

/// Named container of string entries and nested groups
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Group name
    pub name: String,

    /// Free-form tags attribute
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,

    /// String entries owned directly by this group
    #[serde(default)]
    pub strings: Vec<StringEntry>,

    /// Nested groups
    #[serde(default)]
    pub subgroups: Vec<Group>,
}

impl Group {
    /// Create an empty group
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tags: None,
            strings: Vec::new(),
            subgroups: Vec::new(),
        }
    }

    /// Set the tags attribute
    pub fn with_tags(mut self, tags: impl Into<String>) -> Self {
        self.tags = Some(tags.into());
        self
    }

    /// Append a string entry
    pub fn with_string(mut self, entry: StringEntry) -> Self {
        self.strings.push(entry);
        self
    }

    /// Append a nested group
    pub fn with_subgroup(mut self, group: Group) -> Self {
        self.subgroups.push(group);
        self
    }

    /// True when the group has neither strings nor subgroups
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty() && self.subgroups.is_empty()
    }
}

/// Which of the two legacy encodings held an entry's text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSlot {
    /// Element body: `<string key="k">text</string>`
    #[default]
    Body,
    /// `value` attribute: `<string key="k" value="text"/>`
    Attribute,
}

/// A single translatable string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StringEntry {
    /// Key, unique within the owning group
    pub key: String,

    /// Authoritative text of the entry
    pub text: String,

    /// Slot the authoritative text was read from
    #[serde(default)]
    pub slot: ValueSlot,

    /// Content of the `value` attribute when the body is authoritative.
    /// Never translated, written back as found.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legacy_value: Option<String>,
}

impl StringEntry {
    /// Entry whose text lives in the element body
    pub fn new(key: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            text: text.into(),
            slot: ValueSlot::Body,
            legacy_value: None,
        }
    }

    /// Entry whose text lives in the `value` attribute
    pub fn with_attribute_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            text: value.into(),
            slot: ValueSlot::Attribute,
            legacy_value: None,
        }
    }

    /// Resolve the two raw slots of a `<string>` element into one entry.
    ///
    /// A non-blank body wins; the attribute is used only when the body is blank.
    pub fn from_slots(key: impl Into<String>, body: &str, value_attr: Option<&str>) -> Self {
        let body = body.trim();
        let value_attr = value_attr.filter(|v| !v.trim().is_empty());

        match value_attr {
            Some(value) if body.is_empty() => Self::with_attribute_value(key, value),
            other => Self {
                key: key.into(),
                text: body.to_string(),
                slot: ValueSlot::Body,
                legacy_value: other.map(str::to_string),
            },
        }
    }

    /// True when the authoritative text is empty or whitespace
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Summary counters reported before translating or after validation
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DocumentStats {
    /// Culture of the document
    pub culture: String,
    /// Module identifier
    pub module_id: String,
    /// Groups at every nesting level
    pub total_groups: usize,
    /// Strings at every nesting level
    pub total_strings: usize,
}

fn count_groups_and_strings(groups: &[Group]) -> (usize, usize) {
    groups.iter().fold((groups.len(), 0), |(group_count, string_count), group| {
        let (sub_groups, sub_strings) = count_groups_and_strings(&group.subgroups);
        (
            group_count + sub_groups,
            string_count + group.strings.len() + sub_strings,
        )
    })
}
