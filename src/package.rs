// ABOUTME: Open Packaging Conventions container for .pptx files
// ABOUTME: Reads and writes zip parts, content types and relationship parts

use crate::errors::{Result, SlideError};
use crate::xml::Element;
use log::debug;
use std::io::{Cursor, Read, Seek, Write};
use zip::{write::FileOptions, CompressionMethod, ZipArchive, ZipWriter};

pub const CONTENT_TYPES_PART: &str = "[Content_Types].xml";
pub const ROOT_RELS_PART: &str = "_rels/.rels";

pub const RT_OFFICE_DOCUMENT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
pub const RT_SLIDE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide";
pub const RT_SLIDE_LAYOUT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout";
pub const RT_SLIDE_MASTER: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster";
pub const RT_IMAGE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";

pub const CT_SLIDE: &str = "application/vnd.openxmlformats-officedocument.presentationml.slide+xml";

const RELATIONSHIPS_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";

/// One named part of the package (zip entry name, no leading slash).
#[derive(Debug, Clone)]
pub struct Part {
    pub name: String,
    pub data: Vec<u8>,
}

/// All parts of a presentation package, in archive order.
#[derive(Debug, Clone, Default)]
pub struct Package {
    parts: Vec<Part>,
}

impl Package {
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Self::from_bytes(&bytes)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut archive = ZipArchive::new(Cursor::new(bytes))?;
        let mut parts = Vec::with_capacity(archive.len());
        for i in 0..archive.len() {
            let mut file = archive.by_index(i)?;
            if file.is_dir() {
                continue;
            }
            let mut data = Vec::with_capacity(file.size() as usize);
            file.read_to_end(&mut data)?;
            parts.push(Part {
                name: file.name().trim_start_matches('/').to_string(),
                data,
            });
        }
        debug!("Read package with {} parts", parts.len());
        Ok(Self { parts })
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    pub fn contains(&self, name: &str) -> bool {
        self.parts.iter().any(|p| p.name == name)
    }

    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.parts
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.data.as_slice())
    }

    /// Returns the part's bytes or a package error naming the missing part.
    pub fn require(&self, name: &str) -> Result<&[u8]> {
        self.get(name)
            .ok_or_else(|| SlideError::PackageError(format!("missing part {}", name)))
    }

    pub fn xml(&self, name: &str) -> Result<Element> {
        Element::parse(self.require(name)?)
    }

    /// Replaces the part if it exists, otherwise appends it.
    pub fn put(&mut self, name: &str, data: Vec<u8>) {
        match self.parts.iter_mut().find(|p| p.name == name) {
            Some(part) => part.data = data,
            None => self.parts.push(Part {
                name: name.to_string(),
                data,
            }),
        }
    }

    /// Relationships of a part, empty when the part has no relationship part.
    pub fn relationships(&self, part_name: &str) -> Result<Relationships> {
        match self.get(&rels_part_name(part_name)) {
            Some(data) => Relationships::parse(data),
            None => Ok(Relationships::default()),
        }
    }

    pub fn put_relationships(&mut self, part_name: &str, rels: &Relationships) {
        self.put(&rels_part_name(part_name), rels.to_xml());
    }

    pub fn content_types(&self) -> Result<ContentTypes> {
        Ok(ContentTypes {
            root: self.xml(CONTENT_TYPES_PART)?,
        })
    }

    pub fn put_content_types(&mut self, content_types: &ContentTypes) {
        self.put(CONTENT_TYPES_PART, content_types.root.to_xml());
    }

    /// Writes the package as a zip archive into any seekable writer.
    pub fn write_zip<W: Write + Seek>(&self, writer: W) -> Result<W> {
        let mut zip = ZipWriter::new(writer);
        let options = FileOptions::default().compression_method(CompressionMethod::Deflated);
        // The content types part goes first so tools that stream the archive can find it.
        let ordered = self
            .parts
            .iter()
            .filter(|p| p.name == CONTENT_TYPES_PART)
            .chain(self.parts.iter().filter(|p| p.name != CONTENT_TYPES_PART));
        for part in ordered {
            zip.start_file(part.name.as_str(), options)?;
            zip.write_all(&part.data)?;
        }
        Ok(zip.finish()?)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(self.write_zip(Cursor::new(Vec::new()))?.into_inner())
    }
}

/// `ppt/slides/slide1.xml` -> `ppt/slides/_rels/slide1.xml.rels`
pub fn rels_part_name(part_name: &str) -> String {
    match part_name.rsplit_once('/') {
        Some((dir, file)) => format!("{}/_rels/{}.rels", dir, file),
        None => format!("_rels/{}.rels", part_name),
    }
}

/// Resolves a relationship target against the part that owns the relationship.
pub fn resolve_target(source_part: &str, target: &str) -> String {
    if let Some(absolute) = target.strip_prefix('/') {
        return absolute.to_string();
    }
    let mut segments: Vec<&str> = match source_part.rsplit_once('/') {
        Some((dir, _)) => dir.split('/').collect(),
        None => Vec::new(),
    };
    for segment in target.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }
    segments.join("/")
}

/// Relative target from one part to another, e.g. `../media/image1.png`.
pub fn relative_target(source_part: &str, target_part: &str) -> String {
    let source_dir: Vec<&str> = match source_part.rsplit_once('/') {
        Some((dir, _)) => dir.split('/').collect(),
        None => Vec::new(),
    };
    let target: Vec<&str> = target_part.split('/').collect();
    let common = source_dir
        .iter()
        .zip(target.iter())
        .take_while(|(a, b)| a == b)
        .count();
    let mut segments: Vec<&str> = vec![".."; source_dir.len() - common];
    segments.extend_from_slice(&target[common..]);
    segments.join("/")
}

#[derive(Debug, Clone, PartialEq)]
pub struct Relationship {
    pub id: String,
    pub rel_type: String,
    pub target: String,
    pub external: bool,
}

/// The relationships owned by one part.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Relationships {
    rels: Vec<Relationship>,
}

impl Relationships {
    pub fn parse(data: &[u8]) -> Result<Self> {
        let root = Element::parse(data)?;
        let rels = root
            .children_named("Relationship")
            .map(|rel| {
                let id = rel.attr("Id").unwrap_or_default().to_string();
                Relationship {
                    id,
                    rel_type: rel.attr("Type").unwrap_or_default().to_string(),
                    target: rel.attr("Target").unwrap_or_default().to_string(),
                    external: rel.attr("TargetMode") == Some("External"),
                }
            })
            .collect();
        Ok(Self { rels })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Relationship> {
        self.rels.iter()
    }

    pub fn len(&self) -> usize {
        self.rels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rels.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Relationship> {
        self.rels.iter().find(|r| r.id == id)
    }

    pub fn first_of_type(&self, rel_type: &str) -> Option<&Relationship> {
        self.rels.iter().find(|r| r.rel_type == rel_type)
    }

    /// Target of the relationship `id`, or a package error.
    pub fn target(&self, id: &str) -> Result<&str> {
        self.get(id)
            .map(|r| r.target.as_str())
            .ok_or_else(|| SlideError::PackageError(format!("missing relationship {}", id)))
    }

    /// The next unused `rIdN`.
    pub fn next_id(&self) -> String {
        let max = self
            .rels
            .iter()
            .filter_map(|r| r.id.strip_prefix("rId").and_then(|n| n.parse::<u32>().ok()))
            .max()
            .unwrap_or(0);
        format!("rId{}", max + 1)
    }

    /// Adds an internal relationship and returns its id.
    pub fn add(&mut self, rel_type: &str, target: &str) -> String {
        let id = self.next_id();
        self.rels.push(Relationship {
            id: id.clone(),
            rel_type: rel_type.to_string(),
            target: target.to_string(),
            external: false,
        });
        id
    }

    pub fn to_xml(&self) -> Vec<u8> {
        let mut root = Element::new("Relationships").with_attr("xmlns", RELATIONSHIPS_NS);
        for rel in &self.rels {
            let mut element = Element::new("Relationship")
                .with_attr("Id", rel.id.as_str())
                .with_attr("Type", rel.rel_type.as_str())
                .with_attr("Target", rel.target.as_str());
            if rel.external {
                element.set_attr("TargetMode", "External");
            }
            root.push_child(element);
        }
        root.to_xml()
    }
}

/// The `[Content_Types].xml` part.
#[derive(Debug, Clone)]
pub struct ContentTypes {
    root: Element,
}

impl ContentTypes {
    /// Content type registered for a part, by override first, then extension default.
    pub fn content_type(&self, part_name: &str) -> Option<&str> {
        let absolute = format!("/{}", part_name);
        let by_override = self
            .root
            .children_named("Override")
            .find(|o| o.attr("PartName") == Some(absolute.as_str()))
            .and_then(|o| o.attr("ContentType"));
        by_override.or_else(|| {
            let extension = part_name.rsplit_once('.')?.1;
            self.root
                .children_named("Default")
                .find(|d| {
                    d.attr("Extension")
                        .is_some_and(|e| e.eq_ignore_ascii_case(extension))
                })
                .and_then(|d| d.attr("ContentType"))
        })
    }

    pub fn add_override(&mut self, part_name: &str, content_type: &str) {
        let absolute = format!("/{}", part_name);
        let exists = self
            .root
            .children_named("Override")
            .any(|o| o.attr("PartName") == Some(absolute.as_str()));
        if !exists {
            self.root.push_child(
                Element::new("Override")
                    .with_attr("PartName", absolute)
                    .with_attr("ContentType", content_type),
            );
        }
    }

    pub fn add_default(&mut self, extension: &str, content_type: &str) {
        let exists = self.root.children_named("Default").any(|d| {
            d.attr("Extension")
                .is_some_and(|e| e.eq_ignore_ascii_case(extension))
        });
        if !exists {
            // Defaults precede overrides in the schema.
            let index = self
                .root
                .children
                .iter()
                .position(|n| matches!(n, crate::xml::Node::Element(e) if e.name == "Override"))
                .unwrap_or(self.root.children.len());
            self.root.children.insert(
                index,
                crate::xml::Node::Element(
                    Element::new("Default")
                        .with_attr("Extension", extension)
                        .with_attr("ContentType", content_type),
                ),
            );
        }
    }
}
