use super::*;
use crate::draw::{Point, Stroke};
use crate::extract::{ExtractionSettings, extract_regions};
use crate::region::PixelBounds;

fn block_region(color: &str, x: u32, y: u32, width: u32, height: u32) -> Region {
    let pixels: Vec<(u32, u32)> = (y..y + height)
        .flat_map(|py| (x..x + width).map(move |px| (px, py)))
        .collect();
    Region {
        color: color.to_string(),
        opacity: 0.5,
        bounds: PixelBounds {
            x,
            y,
            width,
            height,
        },
        mask: format!("1:{}", width * height),
        pixels: Some(pixels),
    }
}

#[test]
fn to_export_uses_fractions_and_drops_pixels() {
    let export = to_export(200, 100, &[block_region("#ff0000", 20, 10, 40, 30)]);
    assert_eq!(export.version, EXPORT_VERSION);
    assert!(!export.compressed);
    let record = &export.regions[0];
    assert_eq!(record.bounds.x, 0.1);
    assert_eq!(record.bounds.y, 0.1);
    assert_eq!(record.bounds.width, 0.2);
    assert_eq!(record.bounds.height, 0.3);

    let json = serde_json::to_value(&export).unwrap();
    assert!(json["regions"][0].get("pixels").is_none());
    assert_eq!(json["regions"][0]["mask"], "1:1200");
}

#[test]
fn export_round_trip_preserves_bounds_and_masks() {
    let settings = ExtractionSettings::default();
    let strokes = vec![
        Stroke::highlight("#ff0000", 12.0, 0.5)
            .with_points([Point::new(20.0, 20.0), Point::new(80.0, 60.0)]),
        Stroke::highlight("#00ff00", 8.0, 0.5)
            .with_points([Point::new(100.0, 10.0), Point::new(100.0, 90.0)]),
    ];
    let (w, h) = (137, 101);
    let regions = extract_regions(w, h, &strokes, &[], &settings).unwrap();
    assert_eq!(regions.len(), 2);

    for mode in [CompressionMode::Off, CompressionMode::On] {
        let blob = encode_export(&to_export(w, h, &regions), &ExportOptions::with_compression(mode))
            .unwrap();
        let back = from_import(&blob).unwrap();
        assert_eq!((back.width, back.height), (w, h));
        for region in &regions {
            let record = back
                .regions
                .iter()
                .find(|r| r.mask == region.mask && r.color == region.color)
                .expect("region survives round trip");
            assert_eq!(record.pixel_bounds(w, h), region.bounds);
        }
    }
}

#[test]
fn rectangles_use_percent_scale() {
    let export = to_export(200, 100, &[block_region("#0000ff", 20, 10, 40, 30)]);
    let rects = rectangles_from_export(&export, &ExtractionSettings::default()).unwrap();
    assert_eq!(rects.len(), 1);
    let rect = &rects[0];
    assert_eq!((rect.x, rect.y, rect.width, rect.height), (20, 10, 40, 30));
    assert!((rect.x_percent - 10.0).abs() < 1e-9);
    assert!((rect.y_percent - 10.0).abs() < 1e-9);
    assert!((rect.width_percent - 20.0).abs() < 1e-9);
    assert!((rect.height_percent - 30.0).abs() < 1e-9);
    assert_eq!(rect.color, "#0000ff");

    let json = serde_json::to_value(rect).unwrap();
    assert!(json.get("xPercent").is_some());
    assert!(json.get("heightPercent").is_some());
}

#[test]
fn data_to_rectangles_accepts_compressed_blobs() {
    let export = to_export(
        100,
        100,
        &[
            block_region("#ff0000", 0, 0, 10, 10),
            block_region("#00ff00", 50, 50, 20, 5),
        ],
    );
    let blob = encode_export(&export, &ExportOptions::default()).unwrap();
    let rects = data_to_rectangles(&blob);
    assert_eq!(rects.len(), 2);
    assert!(rects.iter().any(|r| r.color == "#00ff00" && r.width == 20));
}

#[test]
fn data_to_rectangles_is_total() {
    assert!(data_to_rectangles("").is_empty());
    assert!(data_to_rectangles("{\"regions\": 5}").is_empty());

    let bad_color = to_export(50, 50, &[block_region("not-a-color", 0, 0, 10, 10)]);
    let blob = serde_json::to_string(&bad_color).unwrap();
    assert!(data_to_rectangles(&blob).is_empty());
}

#[test]
fn oversized_bounds_yield_no_rectangles() {
    let blob = r##"{"width":100,"height":100,"regions":[{"color":"#f00","bounds":{"x":0,"y":0,"width":1e9,"height":1e9},"mask":"1:1"}]}"##;
    assert!(data_to_rectangles(blob).is_empty());

    let blob = r##"{"width":1000,"height":1000,"regions":[{"color":"#f00","bounds":{"x":0,"y":0,"width":500.0,"height":500.0},"mask":"1:1"}]}"##;
    assert!(data_to_rectangles(blob).is_empty());
}

#[test]
fn rectangles_skip_loaded_regions_outside_the_canvas() {
    let mut export = to_export(100, 100, &[block_region("#00ff00", 10, 10, 20, 20)]);
    let mut wild = export.regions[0].clone();
    wild.bounds.width = 1e9;
    wild.color = "#0000ff".into();
    export.regions.push(wild);

    let rects = rectangles_from_export(&export, &ExtractionSettings::default()).unwrap();
    assert_eq!(rects.len(), 1);
    assert_eq!(rects[0].color, "#00ff00");
}

#[test]
fn empty_canvas_yields_no_rectangles() {
    let blob = r##"{"regions":[{"color":"#ff0","bounds":{"x":0,"y":0,"width":1,"height":1},"mask":"1:1"}]}"##;
    assert!(data_to_rectangles(blob).is_empty());
}
