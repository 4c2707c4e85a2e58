//! SVG generation for a laid-out chart.
//!
//! Baselines go into `<defs>` so curved text can reference them by id. Each
//! person becomes a group holding its arc and its labels; the color arcs
//! follow in their own group, after every person.

use std::fmt::Write;

use super::arc::fmt_num;
use super::chart::{ChartLayout, PersonLayout};
use super::label::{CurvedLabel, FlatLabel, Label, TextRun};

/// Where curved text starts along its baseline. The baseline runs out along
/// the arc and back, so a quarter of its length is the middle of the way out.
pub const TEXT_PATH_START_OFFSET: &str = "25%";

/// Margin around the chart in the view box
const VIEW_BOX_MARGIN: f64 = 10.0;

/// Escape text for use in XML content and attribute values.
pub fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

fn run_class(run: &TextRun) -> String {
    if run.rtl {
        format!("{} rtl", run.kind.class())
    } else {
        run.kind.class().to_string()
    }
}

fn write_tspans(out: &mut String, run: &TextRun) {
    for segment in &run.segments {
        out.push_str("<tspan");
        if segment.preferred {
            out.push_str(r#" class="preferred""#);
        }
        if segment.dx_em != 0.0 {
            let _ = write!(out, r#" dx="{}em""#, fmt_num(segment.dx_em));
        }
        let _ = write!(out, ">{}</tspan>", escape_xml(&segment.text));
    }
}

fn write_curved(out: &mut String, label: &CurvedLabel) {
    for run in &label.runs {
        let Some(baseline) = &run.baseline else {
            continue;
        };
        let _ = write!(
            out,
            r##"<text class="{}"><textPath href="#{}" startOffset="{}">"##,
            run_class(run),
            escape_xml(baseline),
            TEXT_PATH_START_OFFSET
        );
        write_tspans(out, run);
        out.push_str("</textPath></text>");
    }
}

fn write_flat(out: &mut String, label: &FlatLabel) {
    for (run, transform) in label.runs.iter().zip(&label.transforms) {
        let _ = write!(
            out,
            r#"<text class="{}" transform="{}" text-anchor="middle""#,
            run_class(run),
            transform.to_svg_attr()
        );
        if let Some(dy) = run.dy {
            let _ = write!(out, r#" dy="{}px""#, fmt_num(dy.raw()));
        }
        out.push('>');
        write_tspans(out, run);
        out.push_str("</text>");
    }
}

fn write_person(out: &mut String, person: &PersonLayout) {
    let _ = write!(
        out,
        r#"<g id="{}" class="person"><path class="appearance" d="{}" fill="{}"/>"#,
        escape_xml(&person.element_id),
        person.path,
        escape_xml(&person.color.to_string())
    );
    for label in &person.labels {
        out.push_str(r#"<g class="wt-chart-box-name">"#);
        match label {
            Label::CurvedLabel(curved) => write_curved(out, curved),
            Label::FlatLabel(flat) => write_flat(out, flat),
        }
        out.push_str("</g>");
    }
    out.push_str("</g>");
}

/// Serialize the layout into a standalone SVG document.
pub fn generate_svg(layout: &ChartLayout) -> String {
    let extent = layout.extent().raw() + VIEW_BOX_MARGIN;
    let mut out = String::new();
    let _ = write!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{} {} {} {}">"#,
        fmt_num(-extent),
        fmt_num(-extent),
        fmt_num(2.0 * extent),
        fmt_num(2.0 * extent)
    );

    out.push_str("<defs>");
    for baseline in layout.baselines().iter() {
        let _ = write!(
            out,
            r#"<path id="{}" d="{}"/>"#,
            escape_xml(&baseline.id),
            baseline.d
        );
    }
    out.push_str("</defs>");

    out.push_str(r#"<g class="personGroup">"#);
    for person in layout.persons() {
        write_person(&mut out, person);
    }
    out.push_str("</g>");

    if !layout.color_arcs().is_empty() {
        out.push_str(r#"<g class="colorGroup">"#);
        for arc in layout.color_arcs() {
            let _ = write!(
                out,
                r#"<path class="color-arc" data-person="{}" d="{}" fill="{}"/>"#,
                arc.person,
                arc.path,
                escape_xml(&arc.color.to_string())
            );
        }
        out.push_str("</g>");
    }

    out.push_str("</svg>\n");
    out
}

impl ChartLayout {
    pub fn to_svg(&self) -> String {
        generate_svg(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Configuration;
    use crate::hierarchy::{HierarchyNode, PersonRecord};
    use crate::measure::FixedWidthMeasure;
    use crate::render::chart::FanChart;
    use crate::types::Color;

    fn layout_of(root: HierarchyNode, config: Configuration) -> ChartLayout {
        FanChart::new(config, FixedWidthMeasure(1.0))
            .layout(&root)
            .unwrap()
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(escape_xml(r#"<a & "b">"#), "&lt;a &amp; &quot;b&quot;&gt;");
        assert_eq!(escape_xml("O'Neil"), "O&apos;Neil");
    }

    #[test]
    fn lone_center_person() {
        let record = PersonRecord::new(1, "I1")
            .with_first_names("Ada")
            .with_last_names("Lovelace")
            .with_color("#ffcc00".parse::<Color>().unwrap());
        let svg = layout_of(HierarchyNode::new(0, 0.0, 1.0, record), Configuration::default())
            .to_svg();
        insta::assert_snapshot!(svg, @r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="-95 -95 190 190"><defs></defs><g class="personGroup"><g id="person-1" class="person"><path class="appearance" d="M0,-85A85,85,0,1,1,0,85A85,85,0,1,1,0,-85Z" fill="rgb(255,204,0)"/><g class="wt-chart-box-name"><text class="name" transform="translate(0,-14)" text-anchor="middle" dy="2px"><tspan>Ada</tspan></text><text class="name" transform="translate(0,7)" text-anchor="middle" dy="2px"><tspan>Lovelace</tspan></text><text class="date" transform="translate(0,28)" text-anchor="middle" dy="2px"></text></g></g></g></svg>"#);
    }

    #[test]
    fn curved_text_references_defs() {
        let child = HierarchyNode::new(
            1,
            0.0,
            1.0,
            PersonRecord::new(2, "I2")
                .with_first_names("Karl Otto")
                .with_preferred_name("Otto"),
        );
        let root = HierarchyNode::new(0, 0.0, 1.0, PersonRecord::new(1, "I1"))
            .with_children(vec![child]);
        let svg = layout_of(root, Configuration::default()).to_svg();

        assert!(svg.contains(r#"<path id="path-person-2-0" d="M"#));
        assert!(svg.contains(r##"<textPath href="#path-person-2-0" startOffset="25%">"##));
        assert!(svg.contains(r#"<tspan>Karl</tspan><tspan class="preferred" dx="0.25em">Otto</tspan>"#));
        // the center's marriage baseline exists even without a date
        assert!(svg.contains(r#"<path id="path-person-1-4""#));
        assert!(!svg.contains("colorGroup"));
    }

    #[test]
    fn color_group_follows_persons() {
        let child = HierarchyNode::new(1, 0.0, 1.0, PersonRecord::new(2, "I2"));
        let root = HierarchyNode::new(0, 0.0, 1.0, PersonRecord::new(1, "I1"))
            .with_children(vec![child]);
        let svg = layout_of(root, Configuration::default().with_color_gradients(true)).to_svg();
        let persons = svg.find("personGroup").unwrap();
        let colors = svg.find("colorGroup").unwrap();
        assert!(persons < colors);
        assert!(svg.contains(r#"data-person="2""#));
    }
}
