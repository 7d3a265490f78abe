//! End-to-end: drawing text through collation to a written script.

use approx::assert_relative_eq;
use pinbuilder::{BuildSettings, FeatureKind, Playfield, RampError};

const TABLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg"
     xmlns:inkscape="http://www.inkscape.org/namespaces/inkscape"
     xmlns:sodipodi="http://sodipodi.sourceforge.net/DTD/sodipodi-0.dtd"
     width="100mm" height="200mm" viewBox="0 0 100 200">
  <sodipodi:namedview id="namedview1" inkscape:zoom="1.0"/>
  <defs id="defs1"/>
  <g inkscape:label="Ramps" inkscape:groupmode="layer" transform="translate(0,0)">
    <path inkscape:label="RampWidth left 2" d="M 60,50 H 80"/>
    <path inkscape:label="RampPath left" d="M 10,190 L 40,190 L 40,150"/>
    <path inkscape:label="RampWidth left 0" d="M 60,30 L 80,30"/>
    <path inkscape:label="RampWidth left 1" d="M 60,40 L 70,40"/>
    <path inkscape:label="RampHeight left" d="M 0,200 L 70,186"/>
    <path inkscape:label="RampPath right" d="M 60,100 L 90,100"/>
    <path inkscape:label="RampWidth right 0" d="M 0,0 L 10,0"/>
    <path inkscape:label="RampHeight right" d="M 0,200 L 30,190"/>
    <path inkscape:label="RampHeight ghost" d="M 0,200 L 10,200"/>
  </g>
  <g inkscape:label="Toys" transform="translate(5,5)">
    <circle inkscape:label="PopBumper top" cx="50" cy="20" r="8"/>
  </g>
</svg>"#;

fn table() -> Playfield {
    Playfield::from_svg_str("table", TABLE, &BuildSettings::default()).unwrap()
}

#[test]
fn test_features_read_in_document_order() {
    let playfield = table();
    let kinds: Vec<FeatureKind> = playfield.features().iter().map(|f| f.kind).collect();
    assert_eq!(kinds.len(), 11);
    assert_eq!(kinds[0], FeatureKind::PlayfieldDimensions);
    assert_eq!(kinds[1], FeatureKind::RampWidth);
    assert_eq!(kinds[10], FeatureKind::PopBumper);
    assert_eq!(playfield.size().x, 100.0);
    assert_eq!(playfield.size().y, 200.0);

    let bumper = &playfield.features()[10];
    let center = bumper.center.unwrap();
    assert_eq!((center.x, center.y), (55.0, 175.0));
}

#[test]
fn test_ramps_collated() {
    let playfield = table();
    let ids: Vec<&str> = playfield.ramps().iter().map(|r| r.id()).collect();
    assert_eq!(ids, vec!["left", "right"]);

    let left = &playfield.ramps()[0];
    assert!(left.is_valid());
    assert_eq!(left.width_values(), vec![20.0, 10.0, 20.0]);
    assert_relative_eq!(left.centerline_length(), 70.0, epsilon = 1e-9);

    let right = &playfield.ramps()[1];
    assert!(!right.has_widths());
    assert!(right.has_heightpath());

    assert_eq!(playfield.rejected().len(), 1);
    assert_eq!(playfield.rejected()[0].id, "ghost");
    assert_eq!(
        playfield.rejected()[0].error,
        RampError::MissingCenterline("ghost".into())
    );
}

#[test]
fn test_left_ramp_geometry() {
    let playfield = table();
    let left = &playfield.ramps()[0];
    let path = left.lifted_path().unwrap();
    let start = path.first().unwrap();
    let end = path.last().unwrap();
    assert_eq!((start.x, start.y, start.z), (10.0, 10.0, 0.0));
    assert_relative_eq!(end.x, 40.0);
    assert_relative_eq!(end.y, 50.0);
    assert_relative_eq!(end.z, 14.0, epsilon = 1e-9);

    let scales = left.scales().unwrap();
    assert_eq!(scales.len(), path.len());
    assert_relative_eq!(scales.last().unwrap().x, 1.0, epsilon = 1e-12);
}

#[test]
fn test_script_contains_only_valid_ramps() {
    let playfield = table();
    let script = playfield.script(&BuildSettings::default());
    assert!(script.starts_with("include <BOSL2/beziers.scad>\ninclude <BOSL2/std.scad>\n"));
    assert!(script.contains("difference() {"));
    assert_eq!(script.matches("union() {").count(), 2);
    assert_eq!(script.matches("path_sweep(").count(), 2);
    assert!(script.contains("method = \"manual\", normal = UP"));
}

#[test]
fn test_generate_writes_file() {
    let playfield = table();
    let settings = BuildSettings::from_toml_str("[output]\nfile_name = \"table.scad\"").unwrap();
    let out = std::env::temp_dir().join(format!("pinbuilder-generate-{}", std::process::id()));

    let written = playfield.generate(&out, &settings).unwrap();
    assert_eq!(written, out.join("table.scad"));
    let contents = std::fs::read_to_string(&written).unwrap();
    assert_eq!(contents, playfield.script(&settings));

    std::fs::remove_dir_all(&out).unwrap();
}

#[test]
fn test_report_json() {
    let report = table().report();
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["name"], "table");
    assert_eq!(json["width"], 100.0);
    assert_eq!(json["ramps"][0]["valid"], true);
    assert_eq!(json["ramps"][1]["valid"], false);
    assert_eq!(json["rejected"][0]["id"], "ghost");
    assert_eq!(json["features"][10]["center"][0], 55.0);
}

#[test]
fn test_unknown_tag_fails_load() {
    let text = TABLE.replace("<defs id=\"defs1\"/>", "<rect width=\"1\" height=\"1\"/>");
    let result = Playfield::from_svg_str("table", &text, &BuildSettings::default());
    assert!(result.is_err());
}
