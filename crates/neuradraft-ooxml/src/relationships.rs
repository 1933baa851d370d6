//! Relationships parsing and modification for OOXML documents
//!
//! OOXML uses relationship files (`_rels/*.rels`) to connect a part to the
//! parts it depends on, such as styles and numbering.

use quick_xml::escape::escape;
use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::{OoxmlError, Result};

/// OOXML namespace for relationships
pub const RELATIONSHIPS_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";

/// Common relationship type URIs
impl Relationships {
    pub const TYPE_OFFICE_DOCUMENT: &'static str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
    pub const TYPE_CORE_PROPERTIES: &'static str =
        "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";
    pub const TYPE_EXTENDED_PROPERTIES: &'static str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties";
    pub const TYPE_STYLES: &'static str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";
    pub const TYPE_NUMBERING: &'static str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/numbering";
}

/// One relationship entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    pub id: String,
    pub rel_type: String,
    pub target: String,
}

/// Parsed relationships from a .rels file, in document order
#[derive(Debug, Clone)]
pub struct Relationships {
    entries: Vec<Relationship>,
    /// Counter for generating unique IDs
    next_id_counter: u32,
}

impl Default for Relationships {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_id_counter: 1, // IDs start at rId1
        }
    }
}

impl Relationships {
    /// Create an empty relationships list
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse relationships from XML bytes
    pub fn parse(xml: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(xml);
        reader.config_mut().trim_text(true);

        let mut entries = Vec::new();
        let mut max_id: u32 = 0;
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e)) => {
                    if e.local_name().as_ref() == b"Relationship" {
                        let mut id = None;
                        let mut target = None;
                        let mut rel_type = None;

                        for attr in e.attributes().filter_map(|a| a.ok()) {
                            let value = attr.unescape_value().ok().map(|s| s.to_string());
                            match attr.key.as_ref() {
                                b"Id" => id = value,
                                b"Target" => target = value,
                                b"Type" => rel_type = value,
                                _ => {}
                            }
                        }

                        if let (Some(id), Some(target)) = (id, target) {
                            if let Some(num) = extract_id_number(&id) {
                                max_id = max_id.max(num);
                            }
                            entries.push(Relationship {
                                id,
                                rel_type: rel_type.unwrap_or_default(),
                                target,
                            });
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(OoxmlError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(Self {
            entries,
            next_id_counter: max_id + 1,
        })
    }

    /// Add a relationship and return its generated ID
    pub fn add(&mut self, target: impl Into<String>, rel_type: &str) -> String {
        let id = format!("rId{}", self.next_id_counter);
        self.next_id_counter += 1;
        self.entries.push(Relationship {
            id: id.clone(),
            rel_type: rel_type.to_string(),
            target: target.into(),
        });
        id
    }

    /// Check whether a relationship of the given type exists
    pub fn has_type(&self, rel_type: &str) -> bool {
        self.entries.iter().any(|r| r.rel_type == rel_type)
    }

    /// Find the target of the first relationship with the given type
    pub fn target_of(&self, rel_type: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|r| r.rel_type == rel_type)
            .map(|r| r.target.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize to XML
    pub fn to_xml(&self) -> String {
        let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n");
        xml.push_str(&format!("<Relationships xmlns=\"{}\">\n", RELATIONSHIPS_NS));
        for rel in &self.entries {
            xml.push_str(&format!(
                "  <Relationship Id=\"{}\" Type=\"{}\" Target=\"{}\"/>\n",
                escape(rel.id.as_str()),
                escape(rel.rel_type.as_str()),
                escape(rel.target.as_str())
            ));
        }
        xml.push_str("</Relationships>");
        xml
    }
}

/// Extract the numeric part from a relationship ID like "rId5"
fn extract_id_number(id: &str) -> Option<u32> {
    id.strip_prefix("rId")?.parse().ok()
}
