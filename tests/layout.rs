//! End-to-end layout scenarios through the public API.

use fanchart::render::baseline::{BaselineKey, BaselineRegistry, FLIPPED_TEXT_OFFSETS, text_offset};
use fanchart::render::label::{LabelComposer, Segment, TextRun};
use fanchart::render::truncate::fit_run;
use fanchart::{
    Configuration, FanChart, FitOutcome, FixedWidthMeasure, Geometry, HierarchyNode, LabelRuns,
    LayoutError, Lifespan, PersonId, PersonRecord, PersonTree, Px, RunKind, partition,
};

fn config_360() -> Configuration {
    Configuration::default()
        .with_fan_degree(360.0)
        .with_inner_circles(6)
}

fn ancestors(generations: u32, next_id: &mut u32) -> PersonTree {
    let id = *next_id;
    *next_id += 1;
    let record = PersonRecord::new(id, format!("I{}", id))
        .with_first_names("Johann Wilhelm")
        .with_preferred_name("Wilhelm")
        .with_last_names("Schmidt")
        .with_lifespan(Lifespan {
            birth: Some(1900 - 25 * generations as i32),
            death: Some(1960 - 25 * generations as i32),
            deceased: true,
        })
        .with_marriage("1880");
    let tree = PersonTree::leaf(record);
    if generations == 0 {
        return tree;
    }
    let father = ancestors(generations - 1, next_id);
    let mother = ancestors(generations - 1, next_id);
    tree.with_children(vec![father, mother])
}

fn pedigree(generations: u32) -> HierarchyNode {
    let mut next_id = 1;
    partition(ancestors(generations, &mut next_id))
}

#[test]
fn angles_stay_ordered_for_every_node() {
    let config = config_360();
    let g = Geometry::new(&config);
    let root = pedigree(8);
    for node in root.descendants() {
        let start = g.start_angle(node.depth, node.x0);
        let end = g.end_angle(node.depth, node.x1);
        assert!(start < end, "person {} at depth {}", node.id(), node.depth);
    }
}

#[test]
fn flipped_slice_uses_flipped_offsets() {
    let config = config_360();
    let g = Geometry::new(&config);

    // 0.6..0.65 covers 36°..54° and reads fine as is
    let upper = HierarchyNode::new(2, 0.6, 0.65, PersonRecord::new(1, "I1"));
    assert!(!g.is_orientation_flipped(2, 0.6, 0.65));
    assert_eq!(text_offset(&g, &upper, RunKind::FirstNames), 73.0);

    // 0.8..0.85 covers 108°..126° and is flipped
    let lower = HierarchyNode::new(2, 0.8, 0.85, PersonRecord::new(2, "I2"));
    assert!(g.is_orientation_flipped(2, 0.8, 0.85));
    assert_eq!(
        text_offset(&g, &lower, RunKind::FirstNames),
        FLIPPED_TEXT_OFFSETS[0]
    );
    assert_eq!(FLIPPED_TEXT_OFFSETS[0], 23.0);
}

#[test]
fn baseline_requested_twice_is_registered_once() {
    let config = config_360();
    let g = Geometry::new(&config);
    let node = HierarchyNode::new(3, 0.3, 0.35, PersonRecord::new(7, "I7"));
    let key = BaselineKey::new(PersonId(7), RunKind::LastNames);

    let mut registry = BaselineRegistry::new();
    let a = registry.ensure_baseline(key, &node, &g).unwrap();
    let b = registry.ensure_baseline(key, &node, &g).unwrap();
    assert_eq!(a, b);
    assert_eq!(registry.len(), 1);
}

#[test]
fn preferred_name_survives_truncation() {
    let measure = FixedWidthMeasure(1.0);
    let mut run = TextRun::new(
        RunKind::FirstNames,
        vec![
            Segment::new("Johann", false),
            Segment::new("Wilhelm", true).with_dx(0.25),
        ],
    );
    // 13 measured, "J. Wilhelm" needs 10
    let outcome = fit_run(&mut run, Px(11.0), &measure);
    assert_eq!(outcome, FitOutcome::Truncated);
    let texts: Vec<_> = run.segments.iter().map(|s| s.text.as_str()).collect();
    assert_eq!(texts, ["J.", "Wilhelm"]);
}

#[test]
fn truncation_is_idempotent_across_a_whole_chart() {
    let config = config_360();
    let measure = FixedWidthMeasure(6.0);
    let layout = FanChart::new(config, measure).layout(&pedigree(6)).unwrap();
    for person in layout.persons() {
        for label in &person.labels {
            for run in label.runs() {
                let mut again = run.clone();
                fit_run(&mut again, run.available_width, &measure);
                assert_eq!(again.segments, run.segments, "person {}", person.id);
            }
        }
    }
}

#[test]
fn dates_hide_and_names_abbreviate_under_pressure() {
    let config = config_360();
    let measure = FixedWidthMeasure(30.0);
    let layout = FanChart::new(config, measure).layout(&pedigree(4)).unwrap();
    let great_grandparent = layout
        .persons()
        .iter()
        .find(|p| p.depth == 4)
        .unwrap();
    let runs = great_grandparent.labels[0].runs();
    let last = runs.iter().find(|r| r.kind == RunKind::LastNames).unwrap();
    assert_eq!(last.text(), "S.");
    let dates = runs.iter().find(|r| r.kind == RunKind::Timespan).unwrap();
    assert_eq!(dates.text(), "");
}

#[test]
fn inner_label_boundary_follows_configuration() {
    let config = config_360();
    let measure = FixedWidthMeasure::default();
    let composer = LabelComposer::new(Geometry::new(&config), &measure);
    let at = |depth| HierarchyNode::new(depth, 0.0, 0.1, PersonRecord::new(1, "I1"));
    assert!(!composer.is_inner_label(&at(0)));
    assert!(composer.is_inner_label(&at(6)));
    assert!(!composer.is_inner_label(&at(7)));
}

#[test]
fn every_ring_kind_appears_in_a_deep_pedigree() {
    let config = config_360();
    let layout = FanChart::new(config, FixedWidthMeasure(5.0))
        .layout(&pedigree(8))
        .unwrap();

    let depth_of = |depth: u32| layout.persons().iter().find(|p| p.depth == depth).unwrap();
    // center: flat, plus marriage
    assert!(!depth_of(0).labels[0].is_curved());
    assert!(depth_of(0).labels[1].is_curved());
    // inner rings: curved
    assert!(depth_of(3).labels[0].is_curved());
    // no marriage from depth five on
    assert_eq!(depth_of(5).labels.len(), 1);
    // outer ring beyond seven: one combined line
    assert_eq!(depth_of(8).labels[0].runs().len(), 1);
    assert_eq!(depth_of(7).labels[0].runs().len(), 1);

    // person ids are unique, so are the baselines
    let mut ids: Vec<_> = layout.baselines().iter().map(|b| b.id.clone()).collect();
    let total = ids.len();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), total);
}

#[test]
fn duplicate_person_ids_collide() {
    let a = HierarchyNode::new(1, 0.0, 0.5, PersonRecord::new(2, "I2"));
    let b = HierarchyNode::new(1, 0.5, 1.0, PersonRecord::new(2, "I2"));
    let root = HierarchyNode::new(0, 0.0, 1.0, PersonRecord::new(1, "I1")).with_children(vec![a, b]);
    let err = FanChart::new(config_360(), FixedWidthMeasure::default())
        .layout(&root)
        .unwrap_err();
    assert!(matches!(err, LayoutError::BaselineCollision { .. }));
}

#[test]
fn missing_geometry_fails_fast() {
    let root = HierarchyNode::new(0, 0.0, f64::NAN, PersonRecord::new(1, "I1"));
    let err = FanChart::new(config_360(), FixedWidthMeasure::default())
        .layout(&root)
        .unwrap_err();
    assert!(matches!(err, LayoutError::MissingGeometryInput { field: "x1", .. }));
}

#[test]
fn empty_interval_is_rejected() {
    let root = HierarchyNode::new(0, 0.5, 0.5, PersonRecord::new(1, "I1"));
    let err = FanChart::new(config_360(), FixedWidthMeasure::default())
        .layout(&root)
        .unwrap_err();
    assert!(matches!(err, LayoutError::InvalidAngularInterval { .. }));
}

#[test]
fn svg_of_a_small_family() {
    let root = partition(PersonTree::leaf(
        PersonRecord::new(1, "I1")
            .with_first_names("Ada")
            .with_last_names("Lovelace")
            .with_marriage("1835"),
    )
    .with_children(vec![PersonTree::leaf(
        PersonRecord::new(2, "I2")
            .with_first_names("George")
            .with_last_names("Byron"),
    )]));
    let config = Configuration::default().with_fan_degree(180.0);
    let svg = FanChart::new(config, FixedWidthMeasure(7.0))
        .layout(&root)
        .unwrap()
        .to_svg();

    assert!(svg.starts_with("<svg "));
    assert!(svg.ends_with("</svg>\n"));
    // center marriage plus three runs of the child
    assert_eq!(svg.matches("<path id=\"path-person-").count(), 4);
    assert!(svg.contains("\u{26AD} 1835"));
    assert!(svg.contains("<tspan>Byron</tspan>"));
    assert!(svg.contains(r#"<g id="person-2" class="person">"#));
    let defs = svg.find("</defs>").unwrap();
    let first_use = svg.find("href=\"#path-person-").unwrap();
    assert!(defs < first_use);
}
