// ABOUTME: Presentation document wrapper over a .pptx package
// ABOUTME: Opens templates, exposes layouts and slides, appends slides and saves

use crate::errors::{Result, SlideError};
use crate::package::{
    relative_target, resolve_target, Package, Relationships, CT_SLIDE, ROOT_RELS_PART,
    RT_OFFICE_DOCUMENT, RT_SLIDE, RT_SLIDE_LAYOUT, RT_SLIDE_MASTER,
};
use crate::shapes;
use crate::slide::Slide;
use crate::templates;
use crate::xml::Element;
use log::{debug, info};
use std::fs;
use std::io::{Cursor, Read, Write};
use std::path::Path;

const NS_A: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
const NS_R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const NS_P: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";

// Children of p:presentation that come after p:sldIdLst.
const AFTER_SLIDE_ID_LIST: &[&str] = &[
    "p:sldSz",
    "p:notesSz",
    "p:smartTags",
    "p:embeddedFontLst",
    "p:custShowLst",
    "p:photoAlbum",
    "p:custDataLst",
    "p:kinsoku",
    "p:defaultTextStyle",
    "p:modifyVerifier",
    "p:extLst",
];

/// A slide layout of the first slide master.
#[derive(Debug, Clone)]
pub struct SlideLayout {
    partname: String,
    name: String,
    xml: Element,
}

impl SlideLayout {
    pub fn partname(&self) -> &str {
        &self.partname
    }

    /// Layout name as stored in the template (`p:cSld/@name`).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Placeholder types defined by the layout, in shape-tree order.
    pub fn placeholder_types(&self) -> Vec<String> {
        self.xml
            .find(&["p:cSld", "p:spTree"])
            .map(|tree| {
                tree.child_elements()
                    .filter_map(shapes::placeholder)
                    .map(|ph| ph.attr("type").unwrap_or("obj").to_string())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn has_title(&self) -> bool {
        self.placeholder_types()
            .iter()
            .any(|t| shapes::is_title_type(Some(t.as_str())))
    }
}

/// An in-memory presentation built on a template package.
#[derive(Debug, Clone)]
pub struct Presentation {
    package: Package,
    presentation_part: String,
    presentation_xml: Element,
    presentation_rels: Relationships,
    layouts: Vec<SlideLayout>,
    slides: Vec<Slide>,
}

impl Presentation {
    /// A new presentation based on the bundled default template.
    pub fn new() -> Result<Self> {
        Self::from_bytes(templates::DEFAULT_TEMPLATE)
    }

    /// A new presentation based on a template file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Opening presentation template {:?}", path);
        let bytes = fs::read(path)?;
        Self::from_bytes(&bytes)
    }

    /// A new presentation based on a template read from a stream.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Self::from_bytes(&bytes)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_package(Package::from_bytes(bytes)?)
    }

    fn from_package(package: Package) -> Result<Self> {
        let root_rels = Relationships::parse(package.require(ROOT_RELS_PART)?)?;
        let presentation_part = root_rels
            .first_of_type(RT_OFFICE_DOCUMENT)
            .map(|rel| resolve_target("", &rel.target))
            .ok_or_else(|| {
                SlideError::PackageError("package has no main presentation part".to_string())
            })?;
        let presentation_xml = package.xml(&presentation_part)?;
        let presentation_rels = package.relationships(&presentation_part)?;

        let layouts = load_layouts(&package, &presentation_part, &presentation_xml, &presentation_rels)?;
        let slides = load_slides(&package, &presentation_part, &presentation_xml, &presentation_rels)?;
        debug!(
            "Loaded presentation with {} layouts and {} slides",
            layouts.len(),
            slides.len()
        );

        Ok(Self {
            package,
            presentation_part,
            presentation_xml,
            presentation_rels,
            layouts,
            slides,
        })
    }

    /// Layouts of the first slide master, in the order the master lists them.
    pub fn layouts(&self) -> &[SlideLayout] {
        &self.layouts
    }

    /// Slides in document order.
    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn slides_mut(&mut self) -> &mut [Slide] {
        &mut self.slides
    }

    pub fn slide(&self, index: usize) -> Option<&Slide> {
        self.slides.get(index)
    }

    pub fn slide_mut(&mut self, index: usize) -> Option<&mut Slide> {
        self.slides.get_mut(index)
    }

    /// Slide size in EMU as declared by `p:sldSz`.
    pub fn slide_size(&self) -> Option<(i64, i64)> {
        let size = self.presentation_xml.child("p:sldSz")?;
        let cx = size.attr("cx")?.parse().ok()?;
        let cy = size.attr("cy")?.parse().ok()?;
        Some((cx, cy))
    }

    /// Appends a new slide built from `layouts()[layout_index]`.
    pub fn add_slide(&mut self, layout_index: usize) -> Result<&mut Slide> {
        let layout = self
            .layouts
            .get(layout_index)
            .ok_or(SlideError::LayoutIndexOutOfRange {
                index: layout_index,
                len: self.layouts.len(),
            })?;

        let partname = self.next_slide_partname();
        let mut rels = Relationships::default();
        rels.add(RT_SLIDE_LAYOUT, &relative_target(&partname, &layout.partname));

        let mut sp_tree = Element::new("p:spTree")
            .with_child(
                Element::new("p:nvGrpSpPr")
                    .with_child(
                        Element::new("p:cNvPr")
                            .with_attr("id", "1")
                            .with_attr("name", ""),
                    )
                    .with_child(Element::new("p:cNvGrpSpPr"))
                    .with_child(Element::new("p:nvPr")),
            )
            .with_child(Element::new("p:grpSpPr"));
        if let Some(layout_tree) = layout.xml.find(&["p:cSld", "p:spTree"]) {
            for placeholder in shapes::clone_layout_placeholders(layout_tree) {
                sp_tree.push_child(placeholder);
            }
        }
        let xml = Element::new("p:sld")
            .with_attr("xmlns:a", NS_A)
            .with_attr("xmlns:r", NS_R)
            .with_attr("xmlns:p", NS_P)
            .with_child(Element::new("p:cSld").with_child(sp_tree))
            .with_child(
                Element::new("p:clrMapOvr").with_child(Element::new("a:masterClrMapping")),
            );

        let rel_id = self
            .presentation_rels
            .add(RT_SLIDE, &relative_target(&self.presentation_part, &partname));
        let slide_id = self.next_slide_id();
        self.presentation_xml
            .get_or_insert_child("p:sldIdLst", AFTER_SLIDE_ID_LIST)
            .push_child(
                Element::new("p:sldId")
                    .with_attr("id", slide_id.to_string())
                    .with_attr("r:id", rel_id),
            );

        info!(
            "Added slide {} from layout {:?}",
            partname,
            layout.name()
        );
        self.slides.push(Slide::new(partname, xml, rels));
        let index = self.slides.len() - 1;
        Ok(&mut self.slides[index])
    }

    fn next_slide_partname(&self) -> String {
        (1..)
            .map(|n| format!("ppt/slides/slide{}.xml", n))
            .find(|name| {
                !self.package.contains(name) && self.slides.iter().all(|s| s.partname() != name.as_str())
            })
            .unwrap_or_default()
    }

    fn next_slide_id(&self) -> u32 {
        self.presentation_xml
            .find(&["p:sldIdLst"])
            .map(|list| {
                list.children_named("p:sldId")
                    .filter_map(|s| s.attr("id").and_then(|id| id.parse::<u32>().ok()))
                    .max()
                    .map_or(256, |max| max + 1)
            })
            .unwrap_or(256)
    }

    /// The complete package with every in-memory change written back.
    fn to_package(&self) -> Result<Package> {
        let mut package = self.package.clone();
        let mut content_types = package.content_types()?;

        for slide in &self.slides {
            package.put(slide.partname(), slide.xml().to_xml());
            package.put_relationships(slide.partname(), slide.relationships());
            content_types.add_override(slide.partname(), CT_SLIDE);
            for media in slide.media() {
                if let Some((_, extension)) = media.name.rsplit_once('.') {
                    content_types.add_default(extension, media.content_type);
                }
                package.put(&media.name, media.data.clone());
            }
        }
        package.put(&self.presentation_part, self.presentation_xml.to_xml());
        package.put_relationships(&self.presentation_part, &self.presentation_rels);
        package.put_content_types(&content_types);
        Ok(package)
    }

    /// Writes the presentation to any byte stream.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
        let bytes = self.to_bytes()?;
        writer.write_all(&bytes)?;
        writer.flush()?;
        Ok(())
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let package = self.to_package()?;
        Ok(package.write_zip(Cursor::new(Vec::new()))?.into_inner())
    }

    /// Saves the presentation as a .pptx file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.to_bytes()?;
        fs::write(path, bytes)?;
        info!("Presentation saved to {:?}", path);
        Ok(())
    }
}

fn load_layouts(
    package: &Package,
    presentation_part: &str,
    presentation_xml: &Element,
    presentation_rels: &Relationships,
) -> Result<Vec<SlideLayout>> {
    let master_rel_id = presentation_xml
        .find(&["p:sldMasterIdLst", "p:sldMasterId"])
        .and_then(|m| m.attr("r:id"));
    let master_part = match master_rel_id {
        Some(id) => resolve_target(presentation_part, presentation_rels.target(id)?),
        None => match presentation_rels.first_of_type(RT_SLIDE_MASTER) {
            Some(rel) => resolve_target(presentation_part, &rel.target),
            None => return Ok(Vec::new()),
        },
    };
    let master_xml = package.xml(&master_part)?;
    let master_rels = package.relationships(&master_part)?;

    let mut layouts = Vec::new();
    if let Some(list) = master_xml.child("p:sldLayoutIdLst") {
        for layout_id in list.children_named("p:sldLayoutId") {
            let Some(rel_id) = layout_id.attr("r:id") else {
                continue;
            };
            let partname = resolve_target(&master_part, master_rels.target(rel_id)?);
            let xml = package.xml(&partname)?;
            let name = xml
                .child("p:cSld")
                .and_then(|c| c.attr("name"))
                .unwrap_or_default()
                .to_string();
            layouts.push(SlideLayout {
                partname,
                name,
                xml,
            });
        }
    }
    Ok(layouts)
}

fn load_slides(
    package: &Package,
    presentation_part: &str,
    presentation_xml: &Element,
    presentation_rels: &Relationships,
) -> Result<Vec<Slide>> {
    let mut slides = Vec::new();
    if let Some(list) = presentation_xml.child("p:sldIdLst") {
        for slide_id in list.children_named("p:sldId") {
            let Some(rel_id) = slide_id.attr("r:id") else {
                continue;
            };
            let partname = resolve_target(presentation_part, presentation_rels.target(rel_id)?);
            let xml = package.xml(&partname)?;
            let rels = package.relationships(&partname)?;
            slides.push(Slide::new(partname, xml, rels));
        }
    }
    Ok(slides)
}
