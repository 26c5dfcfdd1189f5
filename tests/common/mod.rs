//! Shared fixtures for the injector integration tests
//!
//! Builds small OrcaSlicer-style 3MF archives on disk and reads them back.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{Cursor, Read, Write};
use std::path::Path;
use zip::ZipArchive;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

pub const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
 <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
 <Default Extension="model" ContentType="application/vnd.ms-package.3dmanufacturing-3dmodel+xml"/>
 <Default Extension="png" ContentType="image/png"/>
</Types>"#;

pub const RELS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
 <Relationship Target="/3D/3dmodel.model" Id="rel-1" Type="http://schemas.microsoft.com/3dmanufacturing/2013/01/3dmodel"/>
</Relationships>"#;

pub const PROJECT_SETTINGS: &str = r##"{"layer_height": "0.2", "filament_colour": ["#4169E1", "#FFFFFF"]}"##;

pub const THUMBNAIL: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 0, 0, 0, 0];

/// Descriptor JSON for the default 1.5mm change
pub const DESCRIPTOR: &str = r#"{"ranges":[{"min":0,"max":1.5,"color":"RoyalBlue"},{"min":1.5,"max":999,"color":"white","gcode":"M600"}]}"#;

/// Model document with one build item per object id
pub fn orca_model(object_ids: &[u32]) -> String {
    let mut objects = String::new();
    let mut items = String::new();
    for id in object_ids {
        objects.push_str(&format!(
            "  <object id=\"{id}\" p:UUID=\"0000000{id}-61cb-4c03-9d28-80fed5dfa1dc\" type=\"model\">\n   <components>\n    <component p:path=\"/3D/Objects/object_{id}.model\" objectid=\"{id}\"/>\n   </components>\n  </object>\n"
        ));
        items.push_str(&format!(
            "  <item objectid=\"{id}\" p:UUID=\"0000000{id}-b206-40ff-9872-83e8017abed1\" transform=\"1 0 0 0 1 0 0 0 1 128 128 1.5\" printable=\"1\"/>\n"
        ));
    }

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<model unit="millimeter" xml:lang="en-US" xmlns="http://schemas.microsoft.com/3dmanufacturing/core/2015/02" xmlns:BambuStudio="http://schemas.bambulab.com/package/2021" xmlns:p="http://schemas.microsoft.com/3dmanufacturing/production/2015/06" requiredextensions="p">
 <metadata name="Application">OrcaSlicer-2.1.1</metadata>
 <metadata name="BambuStudio:3mfVersion">1</metadata>
 <metadata name="Title">Zipper pulls &amp; tags</metadata>
 <resources>
{objects} </resources>
 <build p:UUID="2c7c17d8-22b5-4d84-8835-1976022ea369">
{items} </build>
</model>
"#
    )
}

/// Write a 3MF archive with the usual OrcaSlicer parts around `model`
///
/// `model` of `None` leaves the model document out.
pub fn write_3mf(path: &Path, model: Option<&str>) {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();

    zip.start_file("[Content_Types].xml", options).unwrap();
    zip.write_all(CONTENT_TYPES.as_bytes()).unwrap();
    zip.start_file("_rels/.rels", options).unwrap();
    zip.write_all(RELS.as_bytes()).unwrap();
    if let Some(model) = model {
        zip.start_file("3D/3dmodel.model", options).unwrap();
        zip.write_all(model.as_bytes()).unwrap();
    }
    zip.start_file("Metadata/project_settings.config", options).unwrap();
    zip.write_all(PROJECT_SETTINGS.as_bytes()).unwrap();
    zip.start_file("Metadata/plate_1.png", options).unwrap();
    zip.write_all(THUMBNAIL).unwrap();

    let cursor = zip.finish().unwrap();
    std::fs::write(path, cursor.into_inner()).unwrap();
}

/// All entries of an archive, keyed by name
pub fn read_entries(path: &Path) -> BTreeMap<String, Vec<u8>> {
    let mut archive = ZipArchive::new(File::open(path).unwrap()).unwrap();
    let mut entries = BTreeMap::new();
    for i in 0..archive.len() {
        let mut file = archive.by_index(i).unwrap();
        if file.is_dir() {
            continue;
        }
        let mut data = Vec::new();
        file.read_to_end(&mut data).unwrap();
        entries.insert(file.name().to_string(), data);
    }
    entries
}

/// The model document of an archive as text
pub fn read_model(path: &Path) -> String {
    let entries = read_entries(path);
    String::from_utf8(entries["3D/3dmodel.model"].clone()).unwrap()
}
