//! Default WordprocessingML package parts
//!
//! Used when no template is configured, and to fill in parts a template
//! lacks.

use quick_xml::escape::escape;

use crate::archive::{OoxmlArchive, CONTENT_TYPES_PATH};
use crate::relationships::Relationships;

pub const DOCUMENT_PATH: &str = "word/document.xml";
pub const DOCUMENT_RELS_PATH: &str = "word/_rels/document.xml.rels";
pub const ROOT_RELS_PATH: &str = "_rels/.rels";
pub const STYLES_PATH: &str = "word/styles.xml";
pub const NUMBERING_PATH: &str = "word/numbering.xml";
pub const CORE_PROPS_PATH: &str = "docProps/core.xml";
pub const APP_PROPS_PATH: &str = "docProps/app.xml";

pub const CT_DOCUMENT: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml";
pub const CT_STYLES: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml";
pub const CT_NUMBERING: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.numbering+xml";
pub const CT_CORE_PROPS: &str = "application/vnd.openxmlformats-package.core-properties+xml";
pub const CT_APP_PROPS: &str =
    "application/vnd.openxmlformats-officedocument.extended-properties+xml";

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
</Types>"#;

const APP_PROPS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties">
  <Application>neuradraft</Application>
</Properties>"#;

/// Style ids every generated document relies on
pub const TITLE_STYLE: &str = "Title";
pub const HEADING1_STYLE: &str = "Heading1";
pub const HEADING2_STYLE: &str = "Heading2";
pub const LIST_BULLET_STYLE: &str = "ListBullet";
pub const NORMAL_STYLE: &str = "Normal";

const STYLES_HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:docDefaults>
    <w:rPrDefault><w:rPr><w:rFonts w:ascii="Calibri" w:hAnsi="Calibri" w:cs="Calibri"/><w:sz w:val="22"/><w:szCs w:val="22"/><w:lang w:val="en-US"/></w:rPr></w:rPrDefault>
    <w:pPrDefault><w:pPr><w:spacing w:after="160" w:line="276" w:lineRule="auto"/></w:pPr></w:pPrDefault>
  </w:docDefaults>
"#;

/// Style definitions keyed by style id
pub const STYLE_DEFINITIONS: &[(&str, &str)] = &[
    (
        NORMAL_STYLE,
        r#"  <w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/><w:qFormat/></w:style>
"#,
    ),
    (
        TITLE_STYLE,
        r#"  <w:style w:type="paragraph" w:styleId="Title"><w:name w:val="Title"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:qFormat/><w:pPr><w:jc w:val="center"/><w:spacing w:after="300"/></w:pPr><w:rPr><w:b/><w:color w:val="003366"/><w:sz w:val="48"/><w:szCs w:val="48"/></w:rPr></w:style>
"#,
    ),
    (
        HEADING1_STYLE,
        r#"  <w:style w:type="paragraph" w:styleId="Heading1"><w:name w:val="heading 1"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:qFormat/><w:pPr><w:keepNext/><w:spacing w:before="360" w:after="120"/><w:outlineLvl w:val="0"/></w:pPr><w:rPr><w:b/><w:color w:val="003366"/><w:sz w:val="32"/><w:szCs w:val="32"/></w:rPr></w:style>
"#,
    ),
    (
        HEADING2_STYLE,
        r#"  <w:style w:type="paragraph" w:styleId="Heading2"><w:name w:val="heading 2"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:qFormat/><w:pPr><w:keepNext/><w:spacing w:before="240" w:after="80"/><w:outlineLvl w:val="1"/></w:pPr><w:rPr><w:b/><w:color w:val="555555"/><w:sz w:val="26"/><w:szCs w:val="26"/></w:rPr></w:style>
"#,
    ),
    (
        LIST_BULLET_STYLE,
        r#"  <w:style w:type="paragraph" w:styleId="ListBullet"><w:name w:val="List Bullet"/><w:basedOn w:val="Normal"/><w:qFormat/><w:pPr><w:spacing w:after="60"/><w:ind w:left="720" w:hanging="360"/></w:pPr></w:style>
"#,
    ),
];

/// Complete styles part with every required style
pub fn styles_xml() -> String {
    let mut xml = String::from(STYLES_HEADER);
    for (_, definition) in STYLE_DEFINITIONS {
        xml.push_str(definition);
    }
    xml.push_str("</w:styles>");
    xml
}

/// Bullet list definition using the given ids
pub fn bullet_abstract_num(abstract_id: u32) -> String {
    format!(
        r#"  <w:abstractNum w:abstractNumId="{abstract_id}"><w:multiLevelType w:val="singleLevel"/><w:lvl w:ilvl="0"><w:start w:val="1"/><w:numFmt w:val="bullet"/><w:lvlText w:val="{bullet}"/><w:lvlJc w:val="left"/><w:pPr><w:ind w:left="720" w:hanging="360"/></w:pPr><w:rPr><w:rFonts w:ascii="Symbol" w:hAnsi="Symbol" w:hint="default"/></w:rPr></w:lvl></w:abstractNum>
"#,
        bullet = "\u{f0b7}"
    )
}

pub fn bullet_num(num_id: u32, abstract_id: u32) -> String {
    format!(
        "  <w:num w:numId=\"{num_id}\"><w:abstractNumId w:val=\"{abstract_id}\"/></w:num>\n"
    )
}

/// Numbering part with a single bullet list, `numId` 1
pub fn numbering_xml() -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n<w:numbering xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\">\n{}{}</w:numbering>",
        bullet_abstract_num(0),
        bullet_num(1, 0)
    )
}

/// Core properties part carrying the document title
pub fn core_props_xml(title: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
  <dc:title>{}</dc:title>
  <dc:creator>neuradraft</dc:creator>
</cp:coreProperties>"#,
        escape(title)
    )
}

/// Add an `<Override>` for `part` unless one already exists
pub fn ensure_override(archive: &mut OoxmlArchive, part: &str, content_type: &str) {
    let content_types = archive
        .get_string(CONTENT_TYPES_PATH)
        .unwrap_or_else(|| CONTENT_TYPES.to_string());
    let part_name = format!("PartName=\"/{}\"", part);
    if content_types.contains(&part_name) {
        return;
    }
    let updated = content_types.replace(
        "</Types>",
        &format!(
            "  <Override {} ContentType=\"{}\"/>\n</Types>",
            part_name, content_type
        ),
    );
    archive.set_string(CONTENT_TYPES_PATH, updated);
}

/// Build a package with every part except the document body
pub fn default_package(title: &str) -> OoxmlArchive {
    let mut archive = OoxmlArchive::new();
    archive.set_string(CONTENT_TYPES_PATH, CONTENT_TYPES);

    let mut root_rels = Relationships::new();
    root_rels.add(DOCUMENT_PATH, Relationships::TYPE_OFFICE_DOCUMENT);
    root_rels.add(CORE_PROPS_PATH, Relationships::TYPE_CORE_PROPERTIES);
    root_rels.add(APP_PROPS_PATH, Relationships::TYPE_EXTENDED_PROPERTIES);
    archive.set_string(ROOT_RELS_PATH, root_rels.to_xml());

    let mut doc_rels = Relationships::new();
    doc_rels.add("styles.xml", Relationships::TYPE_STYLES);
    doc_rels.add("numbering.xml", Relationships::TYPE_NUMBERING);
    archive.set_string(DOCUMENT_RELS_PATH, doc_rels.to_xml());

    archive.set_string(STYLES_PATH, styles_xml());
    archive.set_string(NUMBERING_PATH, numbering_xml());
    archive.set_string(CORE_PROPS_PATH, core_props_xml(title));
    archive.set_string(APP_PROPS_PATH, APP_PROPS);

    ensure_override(&mut archive, DOCUMENT_PATH, CT_DOCUMENT);
    ensure_override(&mut archive, STYLES_PATH, CT_STYLES);
    ensure_override(&mut archive, NUMBERING_PATH, CT_NUMBERING);
    ensure_override(&mut archive, CORE_PROPS_PATH, CT_CORE_PROPS);
    ensure_override(&mut archive, APP_PROPS_PATH, CT_APP_PROPS);
    archive
}
