//! PPTX package writer.
//!
//! Assembles the OPC/ZIP container for a presentation: content types,
//! package relationships, document properties, one minimal slide master
//! with its layout and theme, and one slide part per document slide.
//! Output is deterministic for identical input; ZIP entry timestamps are
//! fixed and parts are written in a stable order.

use std::io::{Cursor, Write as IoWrite};
use std::sync::LazyLock;

use deck_core::{Error, Presentation, Result, Slide, SlideContent};
use regex::Regex;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::media::{self, ResolvedImage};
use crate::shapes::{self, Align, Frame, Region, TextFrame};

/// MIME type of the exported container.
pub const PPTX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presentation";

/// EMUs per inch.
const EMU_PER_INCH: f64 = 914_400.0;

/// Canvas size in EMUs (10 x 5.625 inches, 16:9).
const SLIDE_WIDTH_EMU: i64 = 9_144_000;
const SLIDE_HEIGHT_EMU: i64 = 5_143_500;

static FILE_SLUG_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new("[^A-Za-z0-9]").unwrap());

/// Derive the download filename from the presentation title: every
/// non-alphanumeric character becomes `_`, lower-cased, `.pptx` appended.
pub fn export_file_name(presentation: &Presentation) -> String {
    let slug = FILE_SLUG_REGEX.replace_all(&presentation.title, "_");
    format!("{}.pptx", slug.to_lowercase())
}

/// Writer for PPTX (Office Open XML) presentation files.
pub struct PptxWriter;

impl PptxWriter {
    /// Create a new PPTX writer.
    pub fn new() -> Self {
        Self
    }

    /// Serialize a presentation to PPTX container bytes.
    ///
    /// Per-slide image failures fall back to placeholder boxes and never
    /// abort the export; container-level failures surface as errors with
    /// no partial output.
    pub fn write(&self, presentation: &Presentation) -> Result<Vec<u8>> {
        let buffer = Cursor::new(Vec::new());
        let mut zip = ZipWriter::new(buffer);
        let options = FileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .last_modified_time(zip::DateTime::default());

        let slide_count = presentation.slide_count();

        add_part(&mut zip, &options, "[Content_Types].xml", &content_types_xml(slide_count))?;
        add_part(&mut zip, &options, "_rels/.rels", PACKAGE_RELS_XML)?;
        add_part(&mut zip, &options, "docProps/core.xml", &core_props_xml(presentation))?;
        add_part(&mut zip, &options, "docProps/app.xml", &app_props_xml(slide_count))?;
        add_part(&mut zip, &options, "ppt/presentation.xml", &presentation_xml(slide_count))?;
        add_part(
            &mut zip,
            &options,
            "ppt/_rels/presentation.xml.rels",
            &presentation_rels_xml(slide_count),
        )?;
        add_part(&mut zip, &options, "ppt/slideMasters/slideMaster1.xml", SLIDE_MASTER_XML)?;
        add_part(
            &mut zip,
            &options,
            "ppt/slideMasters/_rels/slideMaster1.xml.rels",
            MASTER_RELS_XML,
        )?;
        add_part(&mut zip, &options, "ppt/slideLayouts/slideLayout1.xml", SLIDE_LAYOUT_XML)?;
        add_part(
            &mut zip,
            &options,
            "ppt/slideLayouts/_rels/slideLayout1.xml.rels",
            LAYOUT_RELS_XML,
        )?;
        add_part(&mut zip, &options, "ppt/theme/theme1.xml", THEME_XML)?;

        let mut media_parts: Vec<(String, Vec<u8>)> = Vec::new();
        for (index, slide) in presentation.slides.iter().enumerate() {
            let image = resolve_slide_image(slide);
            let frames = shapes::slide_frames(slide, &presentation.brand_settings, image);

            let mut image_target = None;
            for frame in &frames {
                if let Frame::Picture { image, .. } = frame {
                    let part_number = media_parts.len() + 1;
                    let file = format!("image{part_number}.{}", image.format.extension());
                    media_parts.push((format!("ppt/media/{file}"), image.data.clone()));
                    image_target = Some(format!("../media/{file}"));
                }
            }

            add_part(
                &mut zip,
                &options,
                &format!("ppt/slides/slide{}.xml", index + 1),
                &slide_xml(slide, &frames),
            )?;
            add_part(
                &mut zip,
                &options,
                &format!("ppt/slides/_rels/slide{}.xml.rels", index + 1),
                &slide_rels_xml(image_target.as_deref()),
            )?;
        }

        for (name, data) in &media_parts {
            zip.start_file(name.as_str(), options.clone())
                .map_err(|e| Error::Zip(e.to_string()))?;
            zip.write_all(data)?;
        }

        let buffer = zip.finish().map_err(|e| Error::Zip(e.to_string()))?;
        Ok(buffer.into_inner())
    }
}

impl Default for PptxWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve the image for an image-focus slide, logging and recovering
/// with `None` (placeholder) when the source cannot be embedded.
fn resolve_slide_image(slide: &Slide) -> Option<ResolvedImage> {
    let SlideContent::ImageFocus { image_url, .. } = &slide.content else {
        return None;
    };
    if image_url.is_empty() {
        return None;
    }
    match media::resolve_image(image_url) {
        Ok(image) => Some(image),
        Err(err) => {
            log::warn!(
                "slide {}: embedding image failed, using placeholder: {}",
                slide.order + 1,
                err
            );
            None
        }
    }
}

fn add_part<W: IoWrite + std::io::Seek>(
    zip: &mut ZipWriter<W>,
    options: &FileOptions,
    name: &str,
    content: &str,
) -> Result<()> {
    zip.start_file(name, options.clone())
        .map_err(|e| Error::Zip(e.to_string()))?;
    zip.write_all(content.as_bytes())?;
    Ok(())
}

fn esc(text: &str) -> String {
    quick_xml::escape::escape(text).into_owned()
}

fn emu(inches: f64) -> i64 {
    (inches * EMU_PER_INCH).round() as i64
}

const XML_DECL: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

const NS_A: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
const NS_P: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";
const NS_R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

fn content_types_xml(slide_count: usize) -> String {
    let mut xml = String::with_capacity(2048);
    xml.push_str(XML_DECL);
    xml.push_str(r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#);
    xml.push_str(r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#);
    xml.push_str(r#"<Default Extension="xml" ContentType="application/xml"/>"#);
    xml.push_str(r#"<Default Extension="png" ContentType="image/png"/>"#);
    xml.push_str(r#"<Default Extension="jpeg" ContentType="image/jpeg"/>"#);
    xml.push_str(r#"<Default Extension="gif" ContentType="image/gif"/>"#);
    xml.push_str(r#"<Override PartName="/ppt/presentation.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml"/>"#);
    xml.push_str(r#"<Override PartName="/ppt/slideMasters/slideMaster1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml"/>"#);
    xml.push_str(r#"<Override PartName="/ppt/slideLayouts/slideLayout1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml"/>"#);
    xml.push_str(r#"<Override PartName="/ppt/theme/theme1.xml" ContentType="application/vnd.openxmlformats-officedocument.theme+xml"/>"#);
    for index in 1..=slide_count {
        xml.push_str(&format!(
            r#"<Override PartName="/ppt/slides/slide{index}.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slide+xml"/>"#
        ));
    }
    xml.push_str(r#"<Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>"#);
    xml.push_str(r#"<Override PartName="/docProps/app.xml" ContentType="application/vnd.openxmlformats-officedocument.extended-properties+xml"/>"#);
    xml.push_str("</Types>");
    xml
}

const PACKAGE_RELS_XML: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="ppt/presentation.xml"/>"#,
    r#"<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/>"#,
    r#"<Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties" Target="docProps/app.xml"/>"#,
    "</Relationships>",
);

/// Output-container metadata carries the presentation title and
/// description; created/modified come from the document timestamps so
/// identical input yields identical bytes.
fn core_props_xml(presentation: &Presentation) -> String {
    let subject = presentation
        .description
        .as_deref()
        .unwrap_or("Created with Deck");
    let created = presentation.created_at.format("%Y-%m-%dT%H:%M:%SZ");
    let modified = presentation.updated_at.format("%Y-%m-%dT%H:%M:%SZ");
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            r#"<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" "#,
            r#"xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" "#,
            r#"xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#,
            "<dc:title>{title}</dc:title>",
            "<dc:subject>{subject}</dc:subject>",
            "<dc:creator>Deck</dc:creator>",
            r#"<dcterms:created xsi:type="dcterms:W3CDTF">{created}</dcterms:created>"#,
            r#"<dcterms:modified xsi:type="dcterms:W3CDTF">{modified}</dcterms:modified>"#,
            "</cp:coreProperties>",
        ),
        title = esc(&presentation.title),
        subject = esc(subject),
        created = created,
        modified = modified,
    )
}

fn app_props_xml(slide_count: usize) -> String {
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            r#"<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties" "#,
            r#"xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes">"#,
            "<Application>Deck</Application>",
            "<Slides>{count}</Slides>",
            "<PresentationFormat>Widescreen</PresentationFormat>",
            "</Properties>",
        ),
        count = slide_count,
    )
}

fn presentation_xml(slide_count: usize) -> String {
    let mut xml = String::with_capacity(1024);
    xml.push_str(XML_DECL);
    xml.push_str(&format!(
        r#"<p:presentation xmlns:a="{NS_A}" xmlns:r="{NS_R}" xmlns:p="{NS_P}">"#
    ));
    xml.push_str(r#"<p:sldMasterIdLst><p:sldMasterId id="2147483648" r:id="rId1"/></p:sldMasterIdLst>"#);
    if slide_count > 0 {
        xml.push_str("<p:sldIdLst>");
        for index in 0..slide_count {
            xml.push_str(&format!(
                r#"<p:sldId id="{}" r:id="rId{}"/>"#,
                256 + index,
                index + 2
            ));
        }
        xml.push_str("</p:sldIdLst>");
    }
    xml.push_str(&format!(
        r#"<p:sldSz cx="{SLIDE_WIDTH_EMU}" cy="{SLIDE_HEIGHT_EMU}"/>"#
    ));
    xml.push_str(r#"<p:notesSz cx="6858000" cy="9144000"/>"#);
    xml.push_str("</p:presentation>");
    xml
}

fn presentation_rels_xml(slide_count: usize) -> String {
    let mut xml = String::with_capacity(1024);
    xml.push_str(XML_DECL);
    xml.push_str(r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#);
    xml.push_str(r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster" Target="slideMasters/slideMaster1.xml"/>"#);
    for index in 0..slide_count {
        xml.push_str(&format!(
            r#"<Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide{}.xml"/>"#,
            index + 2,
            index + 1
        ));
    }
    xml.push_str("</Relationships>");
    xml
}

const SLIDE_MASTER_XML: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<p:sldMaster xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" "#,
    r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" "#,
    r#"xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main">"#,
    r#"<p:cSld><p:bg><p:bgRef idx="1001"><a:schemeClr val="bg1"/></p:bgRef></p:bg><p:spTree>"#,
    r#"<p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>"#,
    r#"<p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/><a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr>"#,
    r#"</p:spTree></p:cSld>"#,
    r#"<p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" hlink="hlink" folHlink="folHlink"/>"#,
    r#"<p:sldLayoutIdLst><p:sldLayoutId id="2147483649" r:id="rId1"/></p:sldLayoutIdLst>"#,
    r#"<p:txStyles><p:titleStyle/><p:bodyStyle/><p:otherStyle/></p:txStyles>"#,
    "</p:sldMaster>",
);

const MASTER_RELS_XML: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout" Target="../slideLayouts/slideLayout1.xml"/>"#,
    r#"<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme" Target="../theme/theme1.xml"/>"#,
    "</Relationships>",
);

const SLIDE_LAYOUT_XML: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<p:sldLayout xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" "#,
    r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" "#,
    r#"xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" type="blank" preserve="1">"#,
    r#"<p:cSld name="Blank"><p:spTree>"#,
    r#"<p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>"#,
    r#"<p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/><a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr>"#,
    r#"</p:spTree></p:cSld>"#,
    r#"<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>"#,
    "</p:sldLayout>",
);

const LAYOUT_RELS_XML: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster" Target="../slideMasters/slideMaster1.xml"/>"#,
    "</Relationships>",
);

const THEME_XML: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<a:theme xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" name="Deck Theme"><a:themeElements>"#,
    r#"<a:clrScheme name="Deck">"#,
    r#"<a:dk1><a:sysClr val="windowText" lastClr="000000"/></a:dk1>"#,
    r#"<a:lt1><a:sysClr val="window" lastClr="FFFFFF"/></a:lt1>"#,
    r#"<a:dk2><a:srgbClr val="44546A"/></a:dk2>"#,
    r#"<a:lt2><a:srgbClr val="E7E6E6"/></a:lt2>"#,
    r#"<a:accent1><a:srgbClr val="6366F1"/></a:accent1>"#,
    r#"<a:accent2><a:srgbClr val="F59E0B"/></a:accent2>"#,
    r#"<a:accent3><a:srgbClr val="10B981"/></a:accent3>"#,
    r#"<a:accent4><a:srgbClr val="FFC000"/></a:accent4>"#,
    r#"<a:accent5><a:srgbClr val="5B9BD5"/></a:accent5>"#,
    r#"<a:accent6><a:srgbClr val="70AD47"/></a:accent6>"#,
    r#"<a:hlink><a:srgbClr val="0563C1"/></a:hlink>"#,
    r#"<a:folHlink><a:srgbClr val="954F72"/></a:folHlink>"#,
    "</a:clrScheme>",
    r#"<a:fontScheme name="Deck">"#,
    r#"<a:majorFont><a:latin typeface="Calibri Light"/><a:ea typeface=""/><a:cs typeface=""/></a:majorFont>"#,
    r#"<a:minorFont><a:latin typeface="Calibri"/><a:ea typeface=""/><a:cs typeface=""/></a:minorFont>"#,
    "</a:fontScheme>",
    r#"<a:fmtScheme name="Deck">"#,
    r#"<a:fillStyleLst><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:fillStyleLst>"#,
    r#"<a:lnStyleLst><a:ln w="6350"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln><a:ln w="12700"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln><a:ln w="19050"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln></a:lnStyleLst>"#,
    r#"<a:effectStyleLst><a:effectStyle><a:effectLst/></a:effectStyle><a:effectStyle><a:effectLst/></a:effectStyle><a:effectStyle><a:effectLst/></a:effectStyle></a:effectStyleLst>"#,
    r#"<a:bgFillStyleLst><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:bgFillStyleLst>"#,
    "</a:fmtScheme>",
    "</a:themeElements></a:theme>",
);

/// Generate one slide part from its layout frames.
fn slide_xml(slide: &Slide, frames: &[Frame]) -> String {
    let mut xml = String::with_capacity(4096);
    xml.push_str(XML_DECL);
    xml.push_str(&format!(
        r#"<p:sld xmlns:a="{NS_A}" xmlns:r="{NS_R}" xmlns:p="{NS_P}">"#
    ));
    xml.push_str("<p:cSld>");

    // Background override comes before the shape tree.
    if let Some(background) = shapes::background_override(slide) {
        xml.push_str(&format!(
            r#"<p:bg><p:bgPr><a:solidFill><a:srgbClr val="{}"/></a:solidFill><a:effectLst/></p:bgPr></p:bg>"#,
            shapes::ppt_color(background)
        ));
    }

    xml.push_str("<p:spTree>");
    xml.push_str(r#"<p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>"#);
    xml.push_str(r#"<p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/><a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr>"#);

    // IDs: 1 is the group shape, frames start at 2.
    for (offset, frame) in frames.iter().enumerate() {
        let shape_id = offset as u32 + 2;
        match frame {
            Frame::Text(text) => write_text_frame(&mut xml, text, shape_id),
            Frame::Picture { region, alt, .. } => write_picture(&mut xml, *region, alt, shape_id),
        }
    }

    xml.push_str("</p:spTree></p:cSld>");
    xml.push_str(r#"<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>"#);
    xml.push_str("</p:sld>");
    xml
}

fn write_xfrm(xml: &mut String, region: Region) {
    xml.push_str(&format!(
        r#"<a:xfrm><a:off x="{}" y="{}"/><a:ext cx="{}" cy="{}"/></a:xfrm>"#,
        emu(region.x),
        emu(region.y),
        emu(region.w),
        emu(region.h)
    ));
}

fn write_text_frame(xml: &mut String, frame: &TextFrame, shape_id: u32) {
    xml.push_str("<p:sp>");
    xml.push_str(&format!(
        r#"<p:nvSpPr><p:cNvPr id="{shape_id}" name="TextBox {shape_id}"/><p:cNvSpPr txBox="1"/><p:nvPr/></p:nvSpPr>"#
    ));

    xml.push_str("<p:spPr>");
    write_xfrm(xml, frame.region);
    xml.push_str(r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom>"#);
    if let Some(border) = &frame.border_color {
        // 1 pt outline.
        xml.push_str(&format!(
            r#"<a:ln w="12700"><a:solidFill><a:srgbClr val="{border}"/></a:solidFill></a:ln>"#
        ));
    }
    xml.push_str("</p:spPr>");

    xml.push_str("<p:txBody>");
    if frame.middle_anchor {
        xml.push_str(r#"<a:bodyPr wrap="square" rtlCol="0" anchor="ctr"/>"#);
    } else {
        xml.push_str(r#"<a:bodyPr wrap="square" rtlCol="0"/>"#);
    }
    xml.push_str("<a:lstStyle/>");

    for paragraph in &frame.paragraphs {
        xml.push_str("<a:p>");
        let algn = match frame.align {
            Align::Center => r#" algn="ctr""#,
            Align::Left => "",
        };
        if paragraph.bullet {
            xml.push_str(&format!(
                r#"<a:pPr{algn} marL="342900" indent="-342900"><a:buFont typeface="Arial"/><a:buChar char="•"/></a:pPr>"#
            ));
        } else {
            xml.push_str(&format!(r#"<a:pPr{algn}><a:buNone/></a:pPr>"#));
        }

        // Embedded newlines inside a paragraph become soft line breaks.
        for (line_index, line) in paragraph.text.split('\n').enumerate() {
            if line_index > 0 {
                xml.push_str("<a:br/>");
            }
            write_run(xml, frame, line);
        }

        xml.push_str("</a:p>");
    }

    xml.push_str("</p:txBody></p:sp>");
}

fn write_run(xml: &mut String, frame: &TextFrame, text: &str) {
    let bold = if frame.bold { r#" b="1""# } else { "" };
    xml.push_str(&format!(
        concat!(
            r#"<a:r><a:rPr lang="en-US" sz="{size}"{bold} dirty="0">"#,
            r#"<a:solidFill><a:srgbClr val="{color}"/></a:solidFill>"#,
            r#"<a:latin typeface="{font}"/>"#,
            "</a:rPr><a:t>{text}</a:t></a:r>",
        ),
        size = frame.font_size * 100,
        bold = bold,
        color = frame.color,
        font = esc(&frame.font),
        text = esc(text),
    ));
}

fn write_picture(xml: &mut String, region: Region, alt: &str, shape_id: u32) {
    xml.push_str("<p:pic>");
    xml.push_str("<p:nvPicPr>");
    if alt.is_empty() {
        xml.push_str(&format!(
            r#"<p:cNvPr id="{shape_id}" name="Picture {shape_id}"/>"#
        ));
    } else {
        xml.push_str(&format!(
            r#"<p:cNvPr id="{shape_id}" name="Picture {shape_id}" descr="{}"/>"#,
            esc(alt)
        ));
    }
    xml.push_str(r#"<p:cNvPicPr><a:picLocks noChangeAspect="1"/></p:cNvPicPr><p:nvPr/>"#);
    xml.push_str("</p:nvPicPr>");

    // rId1 is the layout relationship; the embedded image is rId2.
    xml.push_str(r#"<p:blipFill><a:blip r:embed="rId2"/><a:stretch><a:fillRect/></a:stretch></p:blipFill>"#);

    xml.push_str("<p:spPr>");
    write_xfrm(xml, region);
    xml.push_str(r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom>"#);
    xml.push_str("</p:spPr></p:pic>");
}

fn slide_rels_xml(image_target: Option<&str>) -> String {
    let mut xml = String::with_capacity(512);
    xml.push_str(XML_DECL);
    xml.push_str(r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#);
    xml.push_str(r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout" Target="../slideLayouts/slideLayout1.xml"/>"#);
    if let Some(target) = image_target {
        xml.push_str(&format!(
            r#"<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="{target}"/>"#
        ));
    }
    xml.push_str("</Relationships>");
    xml
}
