//! Global height range modifier
//!
//! A single `height_range_modifier` entry on the model root applies to every
//! object on the plate. OrcaSlicer expects the JSON quotes in this entry as
//! `&amp;quot;`, so the text is escaped here by hand and handed to the writer
//! already escaped.

use super::{
    MODEL, RESOURCES, element_name, into_document, is_height_range_modifier, is_whitespace,
    write_event, write_modifier,
};
use crate::descriptor::HeightRange;
use crate::error::{Error, Result};
use log::info;
use quick_xml::escape::partial_escape;
use quick_xml::events::{BytesText, Event};
use quick_xml::{Reader, Writer};

/// Escaped form of `"` inside the global entry's text
const QUOTE_ESCAPE: &str = "&amp;quot;";

/// Replace the document's global height range modifier
///
/// The first `<metadata name="height_range_modifier">` at any depth is
/// removed together with the whitespace that follows it. A new entry is then
/// inserted as a child of the root element, right before `<resources>`, or
/// at the end of the root when there is no `<resources>` child.
///
/// Returns the rewritten document and whether an entry was replaced.
pub fn set_global_modifier(xml: &str, descriptor: &HeightRange) -> Result<(String, bool)> {
    let text = escape_global_text(&descriptor.to_json()?);

    let mut reader = Reader::from_str(xml);
    let mut writer = Writer::new(Vec::new());

    let mut depth = 0usize;
    let mut seen_root = false;
    let mut removed = false;
    let mut skip_depth: Option<usize> = None;
    let mut drop_tail = false;
    let mut inserted = false;
    let mut indent: Option<String> = None;

    loop {
        let event = reader.read_event()?;

        if let Some(skip) = skip_depth {
            match event {
                Event::Start(_) => depth += 1,
                Event::End(_) => {
                    if depth == skip {
                        skip_depth = None;
                        drop_tail = true;
                    }
                    depth = depth.saturating_sub(1);
                }
                Event::Eof => break,
                _ => {}
            }
            continue;
        }

        match event {
            Event::Start(e) => {
                if depth > 0 && !removed && is_height_range_modifier(&e)? {
                    info!("  Found existing height_range_modifier, replacing...");
                    removed = true;
                    depth += 1;
                    skip_depth = Some(depth);
                    continue;
                }
                drop_tail = false;
                if depth == 1 && !inserted && element_name(&e)? == RESOURCES {
                    insert(&mut writer, &text, indent.as_deref())?;
                    inserted = true;
                }
                seen_root = true;
                write_event(&mut writer, Event::Start(e), "start element")?;
                depth += 1;
            }
            Event::Empty(e) => {
                if depth > 0 && !removed && is_height_range_modifier(&e)? {
                    info!("  Found existing height_range_modifier, replacing...");
                    removed = true;
                    drop_tail = true;
                    continue;
                }
                drop_tail = false;
                if depth == 1 && !inserted && element_name(&e)? == RESOURCES {
                    insert(&mut writer, &text, indent.as_deref())?;
                    inserted = true;
                }
                seen_root = true;
                write_event(&mut writer, Event::Empty(e), "empty element")?;
            }
            Event::End(e) => {
                drop_tail = false;
                if depth == 1 && !inserted {
                    write_modifier(&mut writer, &text)?;
                    inserted = true;
                }
                write_event(&mut writer, Event::End(e), "end element")?;
                depth = depth.saturating_sub(1);
            }
            Event::Text(t) => {
                let blank = is_whitespace(&t);
                if std::mem::take(&mut drop_tail) && blank {
                    continue;
                }
                if depth == 1 && blank {
                    indent = Some(String::from_utf8_lossy(&t).into_owned());
                }
                write_event(&mut writer, Event::Text(t), "text")?;
            }
            Event::Eof => break,
            event => {
                drop_tail = false;
                write_event(&mut writer, event, "XML content")?;
            }
        }
    }

    if !seen_root {
        return Err(Error::invalid_xml_element(MODEL, "document has no root element"));
    }
    if !inserted {
        // Self-closing root element
        return Err(Error::invalid_xml_element(
            MODEL,
            "root element is empty and cannot hold metadata",
        ));
    }

    info!("  Added height_range_modifier metadata");
    Ok((into_document(writer)?, removed))
}

/// Escape the descriptor JSON the way the global entry stores it
fn escape_global_text(json: &str) -> String {
    partial_escape(json).replace('"', QUOTE_ESCAPE)
}

/// Write the entry followed by the indentation that preceded `<resources>`
fn insert(writer: &mut Writer<Vec<u8>>, text: &str, indent: Option<&str>) -> Result<()> {
    write_modifier(writer, text)?;
    if let Some(indent) = indent {
        write_event(writer, Event::Text(BytesText::from_escaped(indent)), "indentation")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::DEFAULT_HEIGHT_MM;

    const ENTRY: &str = concat!(
        r#"<metadata name="height_range_modifier">"#,
        "{&amp;quot;ranges&amp;quot;:[{&amp;quot;min&amp;quot;:0,&amp;quot;max&amp;quot;:1.5,",
        "&amp;quot;color&amp;quot;:&amp;quot;RoyalBlue&amp;quot;},{&amp;quot;min&amp;quot;:1.5,",
        "&amp;quot;max&amp;quot;:999,&amp;quot;color&amp;quot;:&amp;quot;white&amp;quot;,",
        "&amp;quot;gcode&amp;quot;:&amp;quot;M600&amp;quot;}]}",
        "</metadata>"
    );

    fn descriptor() -> HeightRange {
        HeightRange::filament_change(DEFAULT_HEIGHT_MM)
    }

    #[test]
    fn test_escape_global_text() {
        assert_eq!(escape_global_text(r#"{"a":"b&c"}"#), "{&amp;quot;a&amp;quot;:&amp;quot;b&amp;c&amp;quot;}");
    }

    #[test]
    fn test_inserted_before_resources_with_indentation() {
        let xml = "<model>\n  <metadata name=\"Title\">Plate</metadata>\n  <resources/>\n  <build/>\n</model>";
        let (out, replaced) = set_global_modifier(xml, &descriptor()).unwrap();
        assert!(!replaced);
        assert_eq!(
            out,
            format!(
                "<model>\n  <metadata name=\"Title\">Plate</metadata>\n  {}\n  <resources/>\n  <build/>\n</model>",
                ENTRY
            )
        );
    }

    #[test]
    fn test_appended_when_no_resources() {
        let xml = "<model><build/></model>";
        let (out, _) = set_global_modifier(xml, &descriptor()).unwrap();
        assert_eq!(out, format!("<model><build/>{}</model>", ENTRY));
    }

    #[test]
    fn test_nested_resources_are_not_an_anchor() {
        let xml = "<model><build><resources/></build></model>";
        let (out, _) = set_global_modifier(xml, &descriptor()).unwrap();
        assert_eq!(out, format!("<model><build><resources/></build>{}</model>", ENTRY));
    }

    #[test]
    fn test_existing_entry_is_replaced() {
        let xml = concat!(
            "<model>\n",
            "  <metadata name=\"height_range_modifier\">old</metadata>\n",
            "  <resources/>\n",
            "</model>"
        );
        let (out, replaced) = set_global_modifier(xml, &descriptor()).unwrap();
        assert!(replaced);
        assert!(!out.contains(">old<"));
        assert_eq!(out, format!("<model>\n  {}\n  <resources/>\n</model>", ENTRY));
    }

    #[test]
    fn test_only_first_nested_entry_is_removed() {
        let xml = concat!(
            "<model><resources/><build><item objectid=\"1\"><metadatagroup>",
            "<metadata name=\"height_range_modifier\">a</metadata>",
            "<metadata name=\"height_range_modifier\">b</metadata>",
            "</metadatagroup></item></build></model>"
        );
        let (out, replaced) = set_global_modifier(xml, &descriptor()).unwrap();
        assert!(replaced);
        assert!(!out.contains(">a<"));
        assert!(out.contains(">b<"));
        assert!(out.starts_with(&format!("<model>{}<resources/>", ENTRY)));
    }

    #[test]
    fn test_idempotent_count() {
        let xml = "<model>\n  <resources/>\n</model>";
        let (once, _) = set_global_modifier(xml, &descriptor()).unwrap();
        let (twice, replaced) = set_global_modifier(&once, &descriptor()).unwrap();
        assert!(replaced);
        assert_eq!(twice.matches("height_range_modifier").count(), 1);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty_document_is_rejected() {
        let result = set_global_modifier("<?xml version=\"1.0\"?>", &descriptor());
        assert!(matches!(result, Err(Error::InvalidXml(_))));

        let result = set_global_modifier("<model/>", &descriptor());
        assert!(matches!(result, Err(Error::InvalidXml(_))));
    }
}
