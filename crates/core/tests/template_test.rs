//! Tests for loading capture templates.

use std::io::Write;

use pdfcapture_core::capture::ShapeKind;
use pdfcapture_core::error::CaptureError;
use pdfcapture_core::template::{DEFAULT_SEPARATOR, Template};

const INVOICE: &str = r#"{
    "defaults": { "height": 12 },
    "shapes": [
        { "name": "Total", "kind": "rectangle",
          "area": { "left": 400, "top": 120, "width": 100 } },
        { "name": "Items", "kind": "Line", "separator": "|",
          "area": { "left": 50, "top": 600, "right": 549, "bottom": 589 },
          "columns": [
              { "name": "sku", "area": { "left": 50, "width": 100 } },
              { "name": "qty", "area": { "left": 150, "right": 199 } }
          ] }
    ]
}"#;

#[test]
fn test_load_invoice_template() {
    let template = Template::from_json(INVOICE).unwrap();
    assert_eq!(template.len(), 2);

    let total = template.shape("Total").unwrap();
    assert_eq!(total.kind, ShapeKind::Rectangle);
    assert_eq!(total.area.right(), 499.0);
    assert_eq!(total.area.bottom(), 109.0);
    assert_eq!(total.separator, DEFAULT_SEPARATOR);
    assert!(total.columns.is_empty());

    let items = template.shape("Items").unwrap();
    assert_eq!(items.kind, ShapeKind::Line);
    assert_eq!(items.separator, "|");
    let sku = items.column("sku").unwrap();
    assert_eq!(sku.area.right(), 149.0);
    assert_eq!(sku.area.top(), 600.0);
    assert_eq!(sku.area.bottom(), 589.0);
    assert!(items.area.contains(&items.column("qty").unwrap().area));
}

#[test]
fn test_shapes_keep_template_order() {
    let template = Template::from_json(INVOICE).unwrap();
    let names: Vec<&str> = template.shapes().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Total", "Items"]);
}

#[test]
fn test_shape_contains_text_run() {
    let template = Template::from_json(INVOICE).unwrap();
    let total = template.shape("Total").unwrap();
    let run = pdfcapture_core::Area::new(410.0, 118.0, 450.0, 110.0).unwrap();
    assert!(total.contains(&run));
    let outside = pdfcapture_core::Area::new(410.0, 130.0, 450.0, 110.0).unwrap();
    assert!(!total.contains(&outside));
}

#[test]
fn test_error_names_the_shape() {
    let json = r#"{ "shapes": [ { "name": "Total", "kind": "rectangle",
                   "area": { "top": 120, "width": 100, "height": 10 } } ] }"#;
    let err = Template::from_json(json).unwrap_err();
    assert!(err.is_configuration());
    assert_eq!(err.to_string(), "Total: left is mandatory");
}

#[test]
fn test_error_names_the_column() {
    let json = r#"{ "shapes": [ { "name": "Items", "kind": "line",
                   "area": { "left": 0, "top": 100, "right": 500, "bottom": 90 },
                   "columns": [ { "name": "sku", "area": { "left": 10, "right": 5 } } ] } ] }"#;
    let err = Template::from_json(json).unwrap_err();
    assert!(err.is_configuration());
    assert!(err.to_string().starts_with("Items: sku: invalid area"));
}

#[test]
fn test_column_inherits_line_anchor() {
    let json = r#"{ "shapes": [ { "name": "Items", "kind": "line",
                   "area": { "left": 20, "top": 100, "right": 500, "bottom": 90 },
                   "columns": [ { "name": "sku", "area": { "width": 10 } } ] } ] }"#;
    let template = Template::from_json(json).unwrap();
    let sku = template.shape("Items").unwrap().column("sku").unwrap();
    assert_eq!((sku.area.left(), sku.area.right()), (20.0, 29.0));
}

#[test]
fn test_column_without_extent_spans_line() {
    let json = r#"{ "shapes": [ { "name": "Items", "kind": "line",
                   "area": { "left": 20, "top": 100, "right": 500, "bottom": 90 },
                   "columns": [ { "name": "all", "area": {} } ] } ] }"#;
    let template = Template::from_json(json).unwrap();
    let items = template.shape("Items").unwrap();
    assert_eq!(items.column("all").unwrap().area, items.area);
}

#[test]
fn test_template_default_corner_beats_shape_width() {
    let json = r#"{ "defaults": { "right": 500, "bottom": 90 },
                   "shapes": [ { "name": "Total", "kind": "rectangle",
                   "area": { "left": 100, "top": 100, "width": 50 } } ] }"#;
    let template = Template::from_json(json).unwrap();
    let total = template.shape("Total").unwrap();
    assert_eq!(total.area.right(), 500.0);
    assert_eq!(total.area.bottom(), 90.0);
}

#[test]
fn test_unknown_kind_rejected() {
    let json = r#"{ "shapes": [ { "name": "Logo", "kind": "circle",
                   "area": { "left": 0, "top": 10, "width": 5, "height": 5 } } ] }"#;
    let err = Template::from_json(json).unwrap_err();
    assert!(err.to_string().contains("circle"));
    assert!(err.is_configuration());
}

#[test]
fn test_duplicate_shape_rejected() {
    let json = r#"{ "shapes": [
        { "name": "A", "kind": "rectangle", "area": { "left": 0, "top": 10, "width": 5, "height": 5 } },
        { "name": "A", "kind": "rectangle", "area": { "left": 0, "top": 10, "width": 5, "height": 5 } }
    ] }"#;
    let err = Template::from_json(json).unwrap_err();
    assert!(matches!(err, CaptureError::DuplicateShape(ref name) if name == "A"));
}

#[test]
fn test_columns_only_on_lines() {
    let rect_with_columns = r#"{ "shapes": [ { "name": "A", "kind": "rectangle",
        "area": { "left": 0, "top": 10, "width": 5, "height": 5 },
        "columns": [ { "name": "x", "area": { "left": 0 } } ] } ] }"#;
    assert!(Template::from_json(rect_with_columns).is_err());

    let line_without_columns = r#"{ "shapes": [ { "name": "L", "kind": "line",
        "area": { "left": 0, "top": 10, "width": 5, "height": 5 } } ] }"#;
    assert!(Template::from_json(line_without_columns).is_err());
}

#[test]
fn test_malformed_json_is_configuration_error() {
    let err = Template::from_json("{ \"shapes\": [ }").unwrap_err();
    assert!(matches!(err, CaptureError::Json(_)));
    assert!(err.is_configuration());
}

#[test]
fn test_from_path() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(INVOICE.as_bytes()).unwrap();
    let template = Template::from_path(file.path()).unwrap();
    assert!(template.shape("Items").is_some());
    assert_eq!(template.defaults().unwrap().height, Some(12.0));

    let err = Template::from_path("/nonexistent/template.json").unwrap_err();
    assert!(matches!(err, CaptureError::Io(_)));
}
