//! Streaming edits of the 3MF model document
//!
//! The model document is copied event by event from a `quick-xml` reader to a
//! writer. Only the elements an edit is interested in are touched; everything
//! else (declaration, namespaces, formatting, vendor elements) is written
//! back as it was read.
//!
//! Elements are matched by their unprefixed name, i.e. elements in the
//! document's default (3MF core) namespace.

mod global;
mod per_object;

pub use global::set_global_modifier;
pub use per_object::add_per_object_modifier;

use crate::descriptor::HEIGHT_RANGE_MODIFIER;
use crate::error::{Error, Result};
use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use std::io::Write as IoWrite;

/// Element names
pub(crate) const MODEL: &str = "model";
pub(crate) const BUILD: &str = "build";
pub(crate) const ITEM: &str = "item";
pub(crate) const METADATA: &str = "metadata";
pub(crate) const METADATA_GROUP: &str = "metadatagroup";
pub(crate) const RESOURCES: &str = "resources";

/// Qualified name of an element as UTF-8
pub(crate) fn element_name<'a>(e: &'a BytesStart<'_>) -> Result<&'a str> {
    std::str::from_utf8(e.name().into_inner()).map_err(|err| Error::InvalidXml(err.to_string()))
}

/// Raw value of the attribute `key`, if present
pub(crate) fn attribute(e: &BytesStart<'_>, key: &str) -> Result<Option<String>> {
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == key.as_bytes() {
            let value =
                std::str::from_utf8(&attr.value).map_err(|err| Error::InvalidXml(err.to_string()))?;
            return Ok(Some(value.to_string()));
        }
    }
    Ok(None)
}

/// Whether `e` is a `<metadata name="height_range_modifier">` element
pub(crate) fn is_height_range_modifier(e: &BytesStart<'_>) -> Result<bool> {
    if element_name(e)? != METADATA {
        return Ok(false);
    }
    Ok(attribute(e, "name")?.as_deref() == Some(HEIGHT_RANGE_MODIFIER))
}

/// Whether the text is made of XML whitespace only
pub(crate) fn is_whitespace(text: &[u8]) -> bool {
    text.iter().all(|b| matches!(b, b' ' | b'\t' | b'\r' | b'\n'))
}

/// Write an event, labelling failures with `what`
pub(crate) fn write_event<W: IoWrite>(
    writer: &mut Writer<W>,
    event: Event<'_>,
    what: &str,
) -> Result<()> {
    writer
        .write_event(event)
        .map_err(|e| Error::xml_write(format!("Failed to write {}: {}", what, e)))
}

/// Write `<metadata name="height_range_modifier">text</metadata>`
///
/// `escaped_text` is written verbatim, so the caller decides the escaping.
pub(crate) fn write_modifier<W: IoWrite>(writer: &mut Writer<W>, escaped_text: &str) -> Result<()> {
    let mut elem = BytesStart::new(METADATA);
    elem.push_attribute(("name", HEIGHT_RANGE_MODIFIER));

    write_event(writer, Event::Start(elem), "metadata element")?;
    write_event(
        writer,
        Event::Text(BytesText::from_escaped(escaped_text)),
        "metadata value",
    )?;
    write_event(writer, Event::End(BytesEnd::new(METADATA)), "metadata end")
}

/// Turn the writer's buffer back into a document string
pub(crate) fn into_document(writer: Writer<Vec<u8>>) -> Result<String> {
    String::from_utf8(writer.into_inner())
        .map_err(|e| Error::xml_write(format!("Failed to convert XML to UTF-8: {}", e)))
}
