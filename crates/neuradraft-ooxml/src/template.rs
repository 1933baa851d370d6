//! Word templates (.dotx/.docx)
//!
//! A template supplies page setup, fonts and styles. Its body is discarded
//! and replaced with generated content; any style, numbering or metadata
//! part the generated body needs is added when missing.
//!
//! # Example
//!
//! ```ignore
//! use neuradraft_ooxml::Template;
//!
//! let template = Template::load("corporate.dotx")?;
//! println!("{} styles", template.style_ids()?.len());
//! ```

use std::collections::HashSet;
use std::path::Path;

use quick_xml::escape::escape;
use quick_xml::events::Event;
use quick_xml::Reader;

use crate::archive::OoxmlArchive;
use crate::error::{OoxmlError, Result};
use crate::package::{
    bullet_abstract_num, bullet_num, core_props_xml, ensure_override, numbering_xml, styles_xml,
    CORE_PROPS_PATH, CT_CORE_PROPS, CT_NUMBERING, CT_STYLES, DOCUMENT_PATH, DOCUMENT_RELS_PATH,
    NUMBERING_PATH, ROOT_RELS_PATH, STYLES_PATH, STYLE_DEFINITIONS,
};
use crate::relationships::Relationships;

/// A Word template wrapper
#[derive(Debug, Clone)]
pub struct Template {
    archive: OoxmlArchive,
}

impl Template {
    /// Load a template from a file path
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_archive(OoxmlArchive::open(path)?)
    }

    /// Load a template from bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let cursor = std::io::Cursor::new(bytes);
        Self::from_archive(OoxmlArchive::from_reader(cursor)?)
    }

    fn from_archive(archive: OoxmlArchive) -> Result<Self> {
        if !archive.contains(DOCUMENT_PATH) {
            return Err(OoxmlError::InvalidStructure(format!(
                "template has no {}",
                DOCUMENT_PATH
            )));
        }
        Ok(Self { archive })
    }

    /// Style ids defined by the template
    pub fn style_ids(&self) -> Result<HashSet<String>> {
        match self.archive.get(STYLES_PATH) {
            Some(xml) => collect_attribute_values(xml, b"style", b"w:styleId"),
            None => Ok(HashSet::new()),
        }
    }

    /// Turn the template into a package ready for a new body
    ///
    /// Returns the archive and the `numId` to use for bullet items.
    pub fn prepare(self, title: &str) -> Result<(OoxmlArchive, u32)> {
        let style_ids = self.style_ids()?;
        let mut archive = self.archive;

        let mut doc_rels = match archive.get(DOCUMENT_RELS_PATH) {
            Some(xml) => Relationships::parse(xml)?,
            None => Relationships::new(),
        };

        ensure_styles(&mut archive, &mut doc_rels, &style_ids)?;
        let num_id = ensure_bullet_numbering(&mut archive, &mut doc_rels)?;
        archive.set_string(DOCUMENT_RELS_PATH, doc_rels.to_xml());
        set_core_title(&mut archive, title)?;

        Ok((archive, num_id))
    }
}

/// Collect values of `attr` on every element with local name `element`
fn collect_attribute_values(xml: &[u8], element: &[u8], attr: &[u8]) -> Result<HashSet<String>> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);

    let mut values = HashSet::new();
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                if e.local_name().as_ref() == element {
                    for a in e.attributes().filter_map(|a| a.ok()) {
                        if a.key.as_ref() == attr {
                            if let Ok(value) = a.unescape_value() {
                                values.insert(value.to_string());
                            }
                        }
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(OoxmlError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }
    Ok(values)
}

fn parse_ids(values: &HashSet<String>) -> u32 {
    values.iter().filter_map(|v| v.parse::<u32>().ok()).max().unwrap_or(0)
}

/// Add the styles part or any missing required style
fn ensure_styles(
    archive: &mut OoxmlArchive,
    doc_rels: &mut Relationships,
    existing: &HashSet<String>,
) -> Result<()> {
    let Some(styles) = archive.get_string(STYLES_PATH) else {
        log::debug!("Template has no styles part, adding defaults");
        archive.set_string(STYLES_PATH, styles_xml());
        if !doc_rels.has_type(Relationships::TYPE_STYLES) {
            doc_rels.add("styles.xml", Relationships::TYPE_STYLES);
        }
        ensure_override(archive, STYLES_PATH, CT_STYLES);
        return Ok(());
    };

    let missing: String = STYLE_DEFINITIONS
        .iter()
        .filter(|(id, _)| !existing.contains(*id))
        .map(|(id, definition)| {
            log::debug!("Adding missing style {}", id);
            *definition
        })
        .collect();
    if missing.is_empty() {
        return Ok(());
    }

    let Some(end) = styles.rfind("</w:styles>") else {
        return Err(OoxmlError::InvalidStructure(
            "styles part has no closing w:styles".to_string(),
        ));
    };
    let mut updated = styles;
    updated.insert_str(end, &missing);
    archive.set_string(STYLES_PATH, updated);
    Ok(())
}

/// Add a bullet list definition and return its `numId`
fn ensure_bullet_numbering(
    archive: &mut OoxmlArchive,
    doc_rels: &mut Relationships,
) -> Result<u32> {
    let Some(numbering) = archive.get_string(NUMBERING_PATH) else {
        archive.set_string(NUMBERING_PATH, numbering_xml());
        if !doc_rels.has_type(Relationships::TYPE_NUMBERING) {
            doc_rels.add("numbering.xml", Relationships::TYPE_NUMBERING);
        }
        ensure_override(archive, NUMBERING_PATH, CT_NUMBERING);
        return Ok(1);
    };

    let bytes = numbering.as_bytes();
    let abstract_id =
        parse_ids(&collect_attribute_values(bytes, b"abstractNum", b"w:abstractNumId")?) + 1;
    let num_id = parse_ids(&collect_attribute_values(bytes, b"num", b"w:numId")?) + 1;

    let Some(end) = numbering.rfind("</w:numbering>") else {
        return Err(OoxmlError::InvalidStructure(
            "numbering part has no closing w:numbering".to_string(),
        ));
    };

    // abstractNum elements must precede num elements
    let abstract_at = numbering.find("<w:num ").unwrap_or(end);
    let mut updated = numbering.clone();
    updated.insert_str(end, &bullet_num(num_id, abstract_id));
    updated.insert_str(abstract_at, &bullet_abstract_num(abstract_id));
    archive.set_string(NUMBERING_PATH, updated);

    if !doc_rels.has_type(Relationships::TYPE_NUMBERING) {
        doc_rels.add("numbering.xml", Relationships::TYPE_NUMBERING);
    }
    Ok(num_id)
}

/// Set `dc:title` in the core properties, adding the part if needed
fn set_core_title(archive: &mut OoxmlArchive, title: &str) -> Result<()> {
    let Some(core) = archive.get_string(CORE_PROPS_PATH) else {
        archive.set_string(CORE_PROPS_PATH, core_props_xml(title));
        let mut root_rels = match archive.get(ROOT_RELS_PATH) {
            Some(xml) => Relationships::parse(xml)?,
            None => Relationships::new(),
        };
        if !root_rels.has_type(Relationships::TYPE_CORE_PROPERTIES) {
            root_rels.add(CORE_PROPS_PATH, Relationships::TYPE_CORE_PROPERTIES);
            archive.set_string(ROOT_RELS_PATH, root_rels.to_xml());
        }
        ensure_override(archive, CORE_PROPS_PATH, CT_CORE_PROPS);
        return Ok(());
    };

    let element = format!("<dc:title>{}</dc:title>", escape(title));
    let updated = if let (Some(start), Some(end)) = (core.find("<dc:title>"), core.find("</dc:title>")) {
        format!("{}{}{}", &core[..start], element, &core[end + "</dc:title>".len()..])
    } else if core.contains("<dc:title/>") {
        core.replacen("<dc:title/>", &element, 1)
    } else if let Some(end) = core.rfind("</cp:coreProperties>") {
        format!("{}{}{}", &core[..end], element, &core[end..])
    } else {
        return Err(OoxmlError::InvalidStructure(
            "core properties have no closing cp:coreProperties".to_string(),
        ));
    };
    archive.set_string(CORE_PROPS_PATH, updated);
    Ok(())
}
