//! Per-object height range modifiers
//!
//! Every build item receives its own `height_range_modifier` entry inside its
//! `<metadatagroup>`. Existing entries are left alone, so running this twice
//! leaves two entries per item.

use super::{
    BUILD, ITEM, METADATA_GROUP, attribute, element_name, into_document, write_event,
    write_modifier,
};
use crate::descriptor::HeightRange;
use crate::error::{Error, Result};
use log::{info, warn};
use quick_xml::escape::partial_escape;
use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::{Reader, Writer};

/// Which `<item>` elements receive a modifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Targets {
    /// The document has a `<build>` element; only items below the first one count
    has_build: bool,
    /// Number of target items
    items: usize,
}

/// Item currently being copied
struct OpenItem {
    /// Nesting depth of the item element itself
    depth: usize,
    /// Depth of the metadata group receiving the entry, while it is open
    group_depth: Option<usize>,
    /// The entry has been written
    done: bool,
}

/// Append a height range modifier to the metadata group of every build item
///
/// Targets are the `<item>` elements below the first `<build>`; a document
/// without `<build>` has all of its `<item>` elements targeted. An item's
/// first `<metadatagroup>` child receives the entry as its last child. Items
/// without one get a new group appended.
///
/// Returns the rewritten document and the number of modified items.
pub fn add_per_object_modifier(xml: &str, descriptor: &HeightRange) -> Result<(String, usize)> {
    let targets = scan_targets(xml)?;
    if !targets.has_build {
        warn!("No <build> element found. Looking for items directly...");
    }
    if targets.items == 0 {
        return Err(Error::NoBuildItems);
    }
    info!("Found {} object(s) in the file", targets.items);

    let json = descriptor.to_json()?;
    let text = partial_escape(&json);

    let mut reader = Reader::from_str(xml);
    let mut writer = Writer::new(Vec::new());

    let mut depth = 0usize;
    let mut build_depth: Option<usize> = None;
    let mut build_seen = false;
    let mut item: Option<OpenItem> = None;
    let mut modified = 0usize;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = element_name(&e)?;
                if name == BUILD && !build_seen {
                    build_seen = true;
                    build_depth = Some(depth + 1);
                } else if name == ITEM && item.is_none() && in_scope(targets, build_depth) {
                    modified += 1;
                    log_item(&e, modified, targets.items)?;
                    item = Some(OpenItem {
                        depth: depth + 1,
                        group_depth: None,
                        done: false,
                    });
                } else if name == METADATA_GROUP {
                    if let Some(open) = item.as_mut() {
                        if open.depth == depth && !open.done && open.group_depth.is_none() {
                            open.group_depth = Some(depth + 1);
                        }
                    }
                }
                write_event(&mut writer, Event::Start(e), "start element")?;
                depth += 1;
            }
            Event::Empty(e) => {
                let name = element_name(&e)?;
                if name == BUILD {
                    build_seen = true;
                } else if name == ITEM && item.is_none() && in_scope(targets, build_depth) {
                    modified += 1;
                    log_item(&e, modified, targets.items)?;
                    write_event(&mut writer, Event::Start(e.borrow()), "item element")?;
                    write_group(&mut writer, &text)?;
                    write_event(&mut writer, Event::End(e.to_end()), "item end")?;
                    continue;
                }

                let fills_group = name == METADATA_GROUP
                    && item
                        .as_ref()
                        .is_some_and(|open| open.depth == depth && !open.done);
                if fills_group {
                    write_event(&mut writer, Event::Start(e.borrow()), "metadata group")?;
                    write_modifier(&mut writer, &text)?;
                    write_event(&mut writer, Event::End(e.to_end()), "metadata group end")?;
                    if let Some(open) = item.as_mut() {
                        open.done = true;
                    }
                    continue;
                }

                write_event(&mut writer, Event::Empty(e), "empty element")?;
            }
            Event::End(e) => {
                if let Some(open) = item.as_mut() {
                    if open.group_depth == Some(depth) {
                        write_modifier(&mut writer, &text)?;
                        open.group_depth = None;
                        open.done = true;
                    } else if open.depth == depth {
                        if !open.done {
                            write_group(&mut writer, &text)?;
                        }
                        item = None;
                    }
                }
                if build_depth == Some(depth) {
                    build_depth = None;
                }
                write_event(&mut writer, Event::End(e), "end element")?;
                depth = depth.saturating_sub(1);
            }
            Event::Eof => break,
            event => write_event(&mut writer, event, "XML content")?,
        }
    }

    info!("Modified {} object(s)", modified);
    Ok((into_document(writer)?, modified))
}

fn in_scope(targets: Targets, build_depth: Option<usize>) -> bool {
    !targets.has_build || build_depth.is_some()
}

/// Count the items that will receive a modifier
fn scan_targets(xml: &str) -> Result<Targets> {
    let mut reader = Reader::from_str(xml);
    let mut has_build = false;
    let mut build_depth: Option<usize> = None;
    let mut build_items = 0usize;
    let mut all_items = 0usize;
    let mut depth = 0usize;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                depth += 1;
                let name = element_name(&e)?;
                if name == BUILD && !has_build {
                    has_build = true;
                    build_depth = Some(depth);
                } else if name == ITEM {
                    all_items += 1;
                    if build_depth.is_some() {
                        build_items += 1;
                    }
                }
            }
            Event::Empty(e) => {
                let name = element_name(&e)?;
                if name == BUILD {
                    has_build = true;
                } else if name == ITEM {
                    all_items += 1;
                    if build_depth.is_some() {
                        build_items += 1;
                    }
                }
            }
            Event::End(_) => {
                if build_depth == Some(depth) {
                    build_depth = None;
                }
                depth = depth.saturating_sub(1);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(Targets {
        has_build,
        items: if has_build { build_items } else { all_items },
    })
}

fn log_item(e: &BytesStart<'_>, index: usize, total: usize) -> Result<()> {
    let object_id = attribute(e, "objectid")?.unwrap_or_else(|| format!("unknown_{}", index));
    info!("  Processing object {}/{} (ID: {})...", index, total, object_id);
    Ok(())
}

/// Write `<metadatagroup>` holding a single modifier entry
fn write_group(writer: &mut Writer<Vec<u8>>, text: &str) -> Result<()> {
    write_event(
        writer,
        Event::Start(BytesStart::new(METADATA_GROUP)),
        "metadata group",
    )?;
    write_modifier(writer, text)?;
    write_event(
        writer,
        Event::End(BytesEnd::new(METADATA_GROUP)),
        "metadata group end",
    )
}
