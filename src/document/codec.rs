/*!
 * XML codec for localization documents.
 *
 * Reading is event-driven (quick-xml) with an explicit frame stack, so a
 * group holding a single `<string>` and one holding many end up as the same
 * `Vec`. Writing goes through the quick-xml writer with a fixed two-space
 * indent; each entry goes back into the slot it was read from, so the output
 * always parses back to an equal tree.
 */

use std::borrow::Cow;
use std::path::Path;

use log::debug;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::errors::DocumentError;
use crate::file_utils::FileManager;

use super::model::{Group, LocalizationDocument, StringEntry, ValueSlot};

const ROOT_ELEMENT: &str = "localization";
const GROUP_ELEMENT: &str = "group";
const STRING_ELEMENT: &str = "string";
const INDENT_SIZE: usize = 2;

/// Element currently being assembled by the reader
enum Frame {
    Root(LocalizationDocument),
    Group(Group),
    Entry {
        key: String,
        value_attr: Option<String>,
        body: String,
    },
}

impl Frame {
    fn element_name(&self) -> &'static str {
        match self {
            Frame::Root(_) => ROOT_ELEMENT,
            Frame::Group(_) => GROUP_ELEMENT,
            Frame::Entry { .. } => STRING_ELEMENT,
        }
    }
}

/// Bidirectional mapping between localization XML text and the document model
pub struct XmlCodec;

impl XmlCodec {
    /// Parse raw bytes into a document
    pub fn parse(input: &[u8]) -> Result<LocalizationDocument, DocumentError> {
        let text = std::str::from_utf8(input)
            .map_err(|e| DocumentError::Xml(format!("input is not valid UTF-8: {}", e)))?;
        Self::parse_str(text)
    }

    /// Parse XML text into a document
    pub fn parse_str(xml: &str) -> Result<LocalizationDocument, DocumentError> {
        let xml = xml.strip_prefix('\u{feff}').unwrap_or(xml);
        let mut reader = Reader::from_str(xml);

        let mut stack: Vec<Frame> = Vec::new();
        let mut document: Option<LocalizationDocument> = None;

        loop {
            let event = reader.read_event().map_err(|e| {
                DocumentError::Xml(format!("at position {}: {}", reader.buffer_position(), e))
            })?;

            match event {
                Event::Start(e) => {
                    let frame = Self::open_frame(&e, &stack, document.is_some())?;
                    stack.push(frame);
                }
                Event::Empty(e) => {
                    let frame = Self::open_frame(&e, &stack, document.is_some())?;
                    stack.push(frame);
                    Self::close_frame(&mut stack, &mut document);
                }
                Event::End(_) => {
                    Self::close_frame(&mut stack, &mut document);
                }
                Event::Text(e) => {
                    if let Some(Frame::Entry { body, .. }) = stack.last_mut() {
                        body.push_str(&e.unescape()?);
                    }
                }
                Event::CData(e) => {
                    if let Some(Frame::Entry { body, .. }) = stack.last_mut() {
                        body.push_str(&String::from_utf8_lossy(&e.into_inner()));
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if let Some(open) = stack.last() {
            return Err(DocumentError::Xml(format!(
                "unexpected end of document inside <{}>",
                open.element_name()
            )));
        }

        document.ok_or(DocumentError::MissingRoot)
    }

    /// Read and parse a document from disk
    pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<LocalizationDocument, DocumentError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| DocumentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Read {} bytes from {:?}", bytes.len(), path);
        Self::parse(&bytes)
    }

    /// Check the header attributes and group list of a parsed document.
    ///
    /// Never fails; a `false` result means the file is not a usable localization file.
    pub fn validate(document: &LocalizationDocument) -> bool {
        let header_present = [&document.culture, &document.module_id, &document.namespace]
            .iter()
            .all(|value| !value.trim().is_empty());

        header_present && !document.groups.is_empty()
    }

    /// Parse and validate a file, treating any read or parse failure as invalid
    pub fn validate_file<P: AsRef<Path>>(path: P) -> bool {
        match Self::parse_file(&path) {
            Ok(document) => Self::validate(&document),
            Err(e) => {
                debug!("Validation of {:?} failed: {}", path.as_ref(), e);
                false
            }
        }
    }

    /// Render a document as pretty-printed XML
    pub fn serialize(document: &LocalizationDocument) -> Result<String, DocumentError> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', INDENT_SIZE);

        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
            .map_err(write_error)?;

        let root = BytesStart::new(ROOT_ELEMENT).with_attributes([
            ("xmlns", document.namespace.as_str()),
            ("culture", document.culture.as_str()),
            ("moduleId", document.module_id.as_str()),
        ]);
        writer.write_event(Event::Start(root)).map_err(write_error)?;

        for group in &document.groups {
            Self::write_group(&mut writer, group)?;
        }

        writer
            .write_event(Event::End(BytesEnd::new(ROOT_ELEMENT)))
            .map_err(write_error)?;

        let mut xml = writer.into_inner();
        xml.push(b'\n');
        String::from_utf8(xml).map_err(write_error)
    }

    /// Serialize and atomically write a document to disk
    pub fn save_to_file<P: AsRef<Path>>(
        document: &LocalizationDocument,
        path: P,
    ) -> Result<(), DocumentError> {
        let path = path.as_ref();
        let xml = Self::serialize(document)?;
        FileManager::write_atomic(path, &xml).map_err(|source| DocumentError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    fn write_group(writer: &mut Writer<Vec<u8>>, group: &Group) -> Result<(), DocumentError> {
        let mut start = BytesStart::new(GROUP_ELEMENT);
        start.push_attribute(("name", group.name.as_str()));
        if let Some(tags) = &group.tags {
            start.push_attribute(("tags", tags.as_str()));
        }

        if group.is_empty() {
            return writer.write_event(Event::Empty(start)).map_err(write_error);
        }
        writer.write_event(Event::Start(start)).map_err(write_error)?;

        for entry in &group.strings {
            Self::write_string(writer, entry)?;
        }

        for subgroup in &group.subgroups {
            Self::write_group(writer, subgroup)?;
        }

        writer
            .write_event(Event::End(BytesEnd::new(GROUP_ELEMENT)))
            .map_err(write_error)
    }

    fn write_string(writer: &mut Writer<Vec<u8>>, entry: &StringEntry) -> Result<(), DocumentError> {
        let mut start = BytesStart::new(STRING_ELEMENT);
        start.push_attribute(("key", entry.key.as_str()));

        // A blank attribute would read back as a body entry, so it is written as one
        if entry.slot == ValueSlot::Attribute && !entry.is_blank() {
            start.push_attribute(("value", entry.text.as_str()));
            return writer.write_event(Event::Empty(start)).map_err(write_error);
        }

        // A value attribute that lost to the body is written back untouched.
        // Next to a blank body it would win on the next read, so it is dropped.
        if let Some(legacy) = entry.legacy_value.as_deref().filter(|_| !entry.is_blank()) {
            start.push_attribute(("value", legacy));
        }

        writer.write_event(Event::Start(start)).map_err(write_error)?;
        writer
            .write_event(Event::Text(BytesText::new(&entry.text)))
            .map_err(write_error)?;
        writer
            .write_event(Event::End(BytesEnd::new(STRING_ELEMENT)))
            .map_err(write_error)
    }

    fn open_frame(
        element: &BytesStart<'_>,
        stack: &[Frame],
        root_seen: bool,
    ) -> Result<Frame, DocumentError> {
        let name = String::from_utf8_lossy(element.name().as_ref()).into_owned();

        let Some(parent) = stack.last() else {
            if root_seen {
                return Err(DocumentError::Xml(format!(
                    "element <{}> after the root element",
                    name
                )));
            }
            if name != ROOT_ELEMENT {
                return Err(DocumentError::MissingRoot);
            }
            return Ok(Frame::Root(LocalizationDocument::new(
                attribute(element, "xmlns")?.unwrap_or_default(),
                attribute(element, "culture")?.unwrap_or_default(),
                attribute(element, "moduleId")?.unwrap_or_default(),
            )));
        };

        match (parent, name.as_str()) {
            (Frame::Root(_) | Frame::Group(_), GROUP_ELEMENT) => {
                let mut group = Group::new(required_attribute(element, GROUP_ELEMENT, "name")?);
                group.tags = attribute(element, "tags")?;
                Ok(Frame::Group(group))
            }
            (Frame::Group(_), STRING_ELEMENT) => Ok(Frame::Entry {
                key: required_attribute(element, STRING_ELEMENT, "key")?,
                value_attr: attribute(element, "value")?,
                body: String::new(),
            }),
            _ => Err(DocumentError::UnexpectedElement {
                found: name,
                parent: parent.element_name().to_string(),
            }),
        }
    }

    fn close_frame(stack: &mut Vec<Frame>, document: &mut Option<LocalizationDocument>) {
        let Some(frame) = stack.pop() else {
            return;
        };

        match (frame, stack.last_mut()) {
            (Frame::Root(root), None) => *document = Some(root),
            (Frame::Group(group), Some(Frame::Root(root))) => root.groups.push(group),
            (Frame::Group(group), Some(Frame::Group(parent))) => parent.subgroups.push(group),
            (Frame::Entry { key, value_attr, body }, Some(Frame::Group(parent))) => {
                parent
                    .strings
                    .push(StringEntry::from_slots(key, &body, value_attr.as_deref()));
            }
            // open_frame only pushes frames in the combinations above
            _ => {}
        }
    }
}

fn write_error(error: impl std::fmt::Display) -> DocumentError {
    DocumentError::Xml(format!("failed to write XML: {}", error))
}

fn attribute(element: &BytesStart<'_>, name: &str) -> Result<Option<String>, DocumentError> {
    for attr in element.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == name.as_bytes() {
            let value: Cow<'_, str> = attr.unescape_value()?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

fn required_attribute(
    element: &BytesStart<'_>,
    element_name: &str,
    name: &str,
) -> Result<String, DocumentError> {
    attribute(element, name)?.ok_or_else(|| DocumentError::MissingAttribute {
        element: element_name.to_string(),
        attribute: name.to_string(),
    })
}
