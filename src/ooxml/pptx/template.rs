//! Presentation template module.
//!
//! Provides the fixed parts every new presentation needs. The slide master
//! and slide layouts are generated from the layout catalog and page size;
//! the theme and notes master ship as resources.

use crate::common::xml::push_escaped_text;
use crate::ooxml::error::Result;
use crate::ooxml::pptx::layout::{Geometry, LayoutCatalog, LayoutKind, PlaceholderKind, SlideLayout};
use crate::ooxml::pptx::writer::shape::{write_ph, write_xfrm};
use chrono::{DateTime, Utc};
use std::fmt::Write as FmtWrite;

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

const PML_ROOT_NAMESPACES: &str = concat!(
    r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" "#,
    r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" "#,
    r#"xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main""#,
);

const GROUP_SHAPE_PROPERTIES: &str = concat!(
    r#"<p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>"#,
    r#"<p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/>"#,
    r#"<a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr>"#,
);

const COLOR_MAP: &str = concat!(
    r#"<p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" "#,
    r#"accent2="accent2" accent3="accent3" accent4="accent4" accent5="accent5" "#,
    r#"accent6="accent6" hlink="hlink" folHlink="folHlink"/>"#,
);

const TEXT_STYLES: &str = concat!(
    "<p:txStyles>",
    "<p:titleStyle>",
    r#"<a:lvl1pPr algn="ctr" defTabSz="914400" rtl="0" eaLnBrk="1" latinLnBrk="0" hangingPunct="1">"#,
    r#"<a:spcBef><a:spcPct val="0"/></a:spcBef><a:buNone/>"#,
    r#"<a:defRPr sz="4400" kern="1200"><a:solidFill><a:schemeClr val="tx1"/></a:solidFill>"#,
    r#"<a:latin typeface="+mj-lt"/><a:ea typeface="+mj-ea"/><a:cs typeface="+mj-cs"/></a:defRPr>"#,
    "</a:lvl1pPr>",
    "</p:titleStyle>",
    "<p:bodyStyle>",
    r#"<a:lvl1pPr marL="342900" indent="-342900" algn="l" defTabSz="914400" rtl="0" eaLnBrk="1" latinLnBrk="0" hangingPunct="1">"#,
    r#"<a:spcBef><a:spcPct val="20000"/></a:spcBef><a:buFont typeface="Arial"/><a:buChar char="&#8226;"/>"#,
    r#"<a:defRPr sz="3200" kern="1200"><a:solidFill><a:schemeClr val="tx1"/></a:solidFill>"#,
    r#"<a:latin typeface="+mn-lt"/><a:ea typeface="+mn-ea"/><a:cs typeface="+mn-cs"/></a:defRPr>"#,
    "</a:lvl1pPr>",
    r#"<a:lvl2pPr marL="742950" indent="-285750" algn="l" defTabSz="914400" rtl="0" eaLnBrk="1" latinLnBrk="0" hangingPunct="1">"#,
    r#"<a:spcBef><a:spcPct val="20000"/></a:spcBef><a:buFont typeface="Arial"/><a:buChar char="&#8211;"/>"#,
    r#"<a:defRPr sz="2800" kern="1200"><a:solidFill><a:schemeClr val="tx1"/></a:solidFill>"#,
    r#"<a:latin typeface="+mn-lt"/><a:ea typeface="+mn-ea"/><a:cs typeface="+mn-cs"/></a:defRPr>"#,
    "</a:lvl2pPr>",
    "</p:bodyStyle>",
    "<p:otherStyle>",
    r#"<a:defPPr><a:defRPr lang="en-US"/></a:defPPr>"#,
    r#"<a:lvl1pPr marL="0" algn="l" defTabSz="914400" rtl="0" eaLnBrk="1" latinLnBrk="0" hangingPunct="1">"#,
    r#"<a:defRPr sz="1800" kern="1200"><a:solidFill><a:schemeClr val="tx1"/></a:solidFill>"#,
    r#"<a:latin typeface="+mn-lt"/><a:ea typeface="+mn-ea"/><a:cs typeface="+mn-cs"/></a:defRPr>"#,
    "</a:lvl1pPr>",
    "</p:otherStyle>",
    "</p:txStyles>",
);

/// First ID of `sldLayoutIdLst`; must exceed the master ID.
const FIRST_LAYOUT_ID: u32 = 2_147_483_649;

/// Generate slideMaster1.xml.
///
/// The master carries a title and a body placeholder positioned like the
/// standard content layout for `geometry`, and lists one layout per
/// relationship ID in `layout_r_ids`.
pub fn slide_master_xml(geometry: &Geometry, layout_r_ids: &[String]) -> Result<String> {
    let mut xml = String::with_capacity(4096);

    xml.push_str(XML_DECLARATION);
    write!(xml, "<p:sldMaster {}>", PML_ROOT_NAMESPACES)?;
    xml.push_str("<p:cSld>");
    xml.push_str(r#"<p:bg><p:bgRef idx="1001"><a:schemeClr val="bg1"/></p:bgRef></p:bg>"#);
    xml.push_str("<p:spTree>");
    xml.push_str(GROUP_SHAPE_PROPERTIES);

    let standard = LayoutCatalog::standard(geometry);
    if let Some(content) = standard.get(LayoutKind::Content) {
        for (i, spec) in content.placeholders().iter().enumerate() {
            let prompt = match spec.kind {
                PlaceholderKind::Body => "Click to edit Master text styles",
                _ => "Click to edit Master title style",
            };
            let name = match spec.kind {
                PlaceholderKind::Body => "Text Placeholder",
                _ => "Title Placeholder",
            };
            write_placeholder(
                &mut xml,
                i as u32 + 2,
                &format!("{} {}", name, i + 1),
                spec.kind,
                (spec.x, spec.y, spec.width, spec.height),
                Some(prompt),
            )?;
        }
    }

    xml.push_str("</p:spTree>");
    xml.push_str("</p:cSld>");
    xml.push_str(COLOR_MAP);

    xml.push_str("<p:sldLayoutIdLst>");
    for (i, r_id) in layout_r_ids.iter().enumerate() {
        write!(
            xml,
            r#"<p:sldLayoutId id="{}" r:id="{}"/>"#,
            FIRST_LAYOUT_ID + i as u32,
            r_id
        )?;
    }
    xml.push_str("</p:sldLayoutIdLst>");

    xml.push_str(TEXT_STYLES);
    xml.push_str("</p:sldMaster>");

    Ok(xml)
}

/// Generate the XML of a slide layout part.
pub fn slide_layout_xml(layout: &SlideLayout) -> Result<String> {
    let mut xml = String::with_capacity(2048);

    xml.push_str(XML_DECLARATION);
    write!(
        xml,
        r#"<p:sldLayout {} type="{}" preserve="1">"#,
        PML_ROOT_NAMESPACES,
        layout.kind().layout_type()
    )?;

    xml.push_str(r#"<p:cSld name=""#);
    push_escaped_text(&mut xml, layout.name());
    xml.push_str(r#"">"#);
    xml.push_str("<p:spTree>");
    xml.push_str(GROUP_SHAPE_PROPERTIES);

    for (i, spec) in layout.placeholders().iter().enumerate() {
        write_placeholder(
            &mut xml,
            i as u32 + 2,
            &spec.name,
            spec.kind,
            (spec.x, spec.y, spec.width, spec.height),
            spec.prompt.as_deref(),
        )?;
    }

    xml.push_str("</p:spTree>");
    xml.push_str("</p:cSld>");
    xml.push_str(r#"<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>"#);
    xml.push_str("</p:sldLayout>");

    Ok(xml)
}

fn write_placeholder(
    xml: &mut String,
    shape_id: u32,
    name: &str,
    kind: PlaceholderKind,
    rect: (i64, i64, i64, i64),
    prompt: Option<&str>,
) -> Result<()> {
    xml.push_str("<p:sp>");
    xml.push_str("<p:nvSpPr>");
    write!(xml, r#"<p:cNvPr id="{}" name=""#, shape_id)?;
    push_escaped_text(xml, name);
    xml.push_str(r#""/>"#);
    xml.push_str(r#"<p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr>"#);
    xml.push_str("<p:nvPr>");
    write_ph(xml, kind)?;
    xml.push_str("</p:nvPr>");
    xml.push_str("</p:nvSpPr>");

    xml.push_str("<p:spPr>");
    write_xfrm(xml, rect.0, rect.1, rect.2, rect.3);
    xml.push_str("</p:spPr>");

    xml.push_str("<p:txBody>");
    xml.push_str("<a:bodyPr/>");
    xml.push_str("<a:lstStyle/>");
    xml.push_str("<a:p>");
    if let Some(prompt) = prompt {
        xml.push_str(r#"<a:r><a:rPr lang="en-US"/><a:t>"#);
        push_escaped_text(xml, prompt);
        xml.push_str("</a:t></a:r>");
    }
    xml.push_str(r#"<a:endParaRPr lang="en-US"/>"#);
    xml.push_str("</a:p>");
    xml.push_str("</p:txBody>");
    xml.push_str("</p:sp>");

    Ok(())
}

/// Office theme shared by the slide master and the notes master.
pub fn default_theme_xml() -> &'static str {
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/resources/theme/theme1.xml"))
}

/// Generate notes master XML
pub fn default_notes_master_xml() -> &'static str {
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/resources/notesMaster.xml"))
}

/// Generate a minimal valid tableStyles.xml content.
pub fn default_table_styles_xml() -> &'static str {
    concat!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
        r#"<a:tblStyleLst xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" "#,
        r#"def="{5C22544A-7EE6-4342-B048-85BDC9FD1C3A}"/>"#,
    )
}

/// Generate a minimal valid viewProps.xml content.
pub fn default_view_props_xml() -> &'static str {
    concat!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
        r#"<p:viewPr xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" "#,
        r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" "#,
        r#"xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main">"#,
        r#"<p:normalViewPr><p:restoredLeft sz="15620"/><p:restoredTop sz="94660"/></p:normalViewPr>"#,
        r#"<p:gridSpacing cx="76200" cy="76200"/>"#,
        "</p:viewPr>",
    )
}

/// Generate a minimal valid presProps.xml content.
pub fn default_pres_props_xml() -> &'static str {
    concat!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
        r#"<p:presentationPr xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" "#,
        r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" "#,
        r#"xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"/>"#,
    )
}

/// Generate core.xml (core properties) content.
pub fn core_props_xml(title: Option<&str>, created: DateTime<Utc>) -> String {
    let timestamp = created.format("%Y-%m-%dT%H:%M:%SZ").to_string();
    let mut xml = String::with_capacity(1024);

    xml.push_str(XML_DECLARATION);
    xml.push_str(concat!(
        r#"<cp:coreProperties "#,
        r#"xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" "#,
        r#"xmlns:dc="http://purl.org/dc/elements/1.1/" "#,
        r#"xmlns:dcterms="http://purl.org/dc/terms/" "#,
        r#"xmlns:dcmitype="http://purl.org/dc/dcmitype/" "#,
        r#"xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#,
    ));
    if let Some(title) = title {
        xml.push_str("<dc:title>");
        push_escaped_text(&mut xml, title);
        xml.push_str("</dc:title>");
    }
    xml.push_str("<cp:revision>1</cp:revision>");
    xml.push_str(r#"<dcterms:created xsi:type="dcterms:W3CDTF">"#);
    xml.push_str(&timestamp);
    xml.push_str("</dcterms:created>");
    xml.push_str(r#"<dcterms:modified xsi:type="dcterms:W3CDTF">"#);
    xml.push_str(&timestamp);
    xml.push_str("</dcterms:modified>");
    xml.push_str("</cp:coreProperties>");

    xml
}

/// Generate app.xml (extended properties) content.
pub fn app_props_xml(slide_count: usize, notes_count: usize) -> String {
    let mut buf = itoa::Buffer::new();
    let mut xml = String::with_capacity(512);

    xml.push_str(XML_DECLARATION);
    xml.push_str(concat!(
        r#"<Properties "#,
        r#"xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties" "#,
        r#"xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes">"#,
    ));
    xml.push_str("<Application>");
    xml.push_str(env!("CARGO_PKG_NAME"));
    xml.push_str("</Application>");
    xml.push_str("<PresentationFormat>On-screen Show</PresentationFormat>");
    xml.push_str("<Slides>");
    xml.push_str(buf.format(slide_count));
    xml.push_str("</Slides>");
    xml.push_str("<Notes>");
    xml.push_str(buf.format(notes_count));
    xml.push_str("</Notes>");
    xml.push_str("<AppVersion>");
    xml.push_str(env!("CARGO_PKG_VERSION"));
    xml.push_str("</AppVersion>");
    xml.push_str("</Properties>");

    xml
}
