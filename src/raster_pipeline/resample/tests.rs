use crate::raster_pipeline::common::error::RasterError;
use crate::raster_pipeline::model::RasterImage;
use crate::raster_pipeline::resample::{ResampleMethod, cubic_weight, height_for_aspect, resample};

fn single_band(width: usize, height: usize, f: impl Fn(usize, usize) -> u8) -> RasterImage {
    let mut plane = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            plane.push(f(x, y));
        }
    }
    RasterImage::from_planes(width, height, vec![plane]).unwrap()
}

fn rgb(width: usize, height: usize) -> RasterImage {
    let planes = (0..3)
        .map(|band| {
            (0..width * height)
                .map(|i| ((i + band * 50) % 256) as u8)
                .collect()
        })
        .collect();
    RasterImage::from_planes(width, height, planes).unwrap()
}

#[test]
fn test_output_shape_for_all_methods() {
    let image = rgb(17, 11);
    for method in ResampleMethod::ALL {
        for &(w, h) in &[(1, 1), (5, 3), (17, 11), (40, 29), (3, 50)] {
            let out = resample(&image, w, h, method).unwrap();
            assert_eq!((out.width, out.height), (w, h), "{method}");
            assert_eq!(out.band_count, 3);
            assert!(out.planes.iter().all(|p| p.len() == w * h));
        }
    }
}

#[test]
fn test_nearest_upsample_replicates_blocks() {
    let image = single_band(4, 4, |x, y| (y * 4 + x) as u8 * 10);
    let out = resample(&image, 8, 8, ResampleMethod::NearestNeighbor).unwrap();

    for y in 0..8 {
        for x in 0..8 {
            let expected = image.planes[0][(y / 2) * 4 + x / 2];
            assert_eq!(out.planes[0][y * 8 + x], expected, "({x}, {y})");
        }
    }
}

#[test]
fn test_nearest_downsample_picks_top_left() {
    let image = single_band(4, 2, |x, y| (y * 4 + x) as u8);
    let out = resample(&image, 2, 1, ResampleMethod::NearestNeighbor).unwrap();
    assert_eq!(out.planes[0], vec![0, 2]);
}

#[test]
fn test_bilinear_known_values() {
    let image = single_band(2, 2, |x, y| [[0, 100], [100, 200]][y][x]);
    let out = resample(&image, 4, 4, ResampleMethod::Bilinear).unwrap();

    assert_eq!(out.planes[0][0], 0);
    assert_eq!(out.planes[0][1], 50);
    assert_eq!(out.planes[0][2], 100);
    // right edge clamps to the last column
    assert_eq!(out.planes[0][3], 100);
    assert_eq!(out.planes[0][4 + 1], 100);
}

#[test]
fn test_bilinear_stays_in_range_on_extreme_gradients() {
    let checker = single_band(9, 9, |x, y| if (x + y) % 2 == 0 { 0 } else { 255 });
    let out = resample(&checker, 31, 23, ResampleMethod::Bilinear).unwrap();

    // u8 storage already bounds the values; interior blends must not saturate
    // to a single extreme.
    assert!(out.planes[0].iter().any(|&v| v > 0 && v < 255));
}

#[test]
fn test_cubic_preserves_constant_plane() {
    let image = single_band(6, 6, |_, _| 128);
    let out = resample(&image, 13, 4, ResampleMethod::Cubic).unwrap();
    assert!(out.planes[0].iter().all(|&v| v == 127 || v == 128));
}

#[test]
fn test_cubic_identity_scale() {
    let image = single_band(5, 5, |x, y| (x * 40 + y * 7) as u8);
    let out = resample(&image, 5, 5, ResampleMethod::Cubic).unwrap();
    assert_eq!(out.planes[0], image.planes[0]);
}

#[test]
fn test_cubic_weight_properties() {
    assert_eq!(cubic_weight(0.0), 1.0);
    assert_eq!(cubic_weight(1.0), 0.0);
    assert_eq!(cubic_weight(2.0), 0.0);
    assert_eq!(cubic_weight(3.5), 0.0);
    for step in 0..=40 {
        let t = step as f64 * 0.07;
        assert_eq!(cubic_weight(-t), cubic_weight(t));
    }
}

#[test]
fn test_zero_dimensions_rejected_for_all_methods() {
    let image = rgb(4, 4);
    for method in ResampleMethod::ALL {
        for &(w, h) in &[(0, 4), (4, 0), (0, 0)] {
            let result = resample(&image, w, h, method);
            assert!(matches!(result, Err(RasterError::Validation(_))), "{method} {w}x{h}");
        }
    }
}

#[test]
fn test_overflowing_target_rejected() {
    let image = rgb(4, 4);
    for method in ResampleMethod::ALL {
        let result = resample(&image, usize::MAX, 2, method);
        assert!(matches!(result, Err(RasterError::Validation(_))), "{method}");
    }
}

#[test]
fn test_malformed_source_rejected() {
    let mut image = rgb(4, 4);
    image.planes[1].pop();
    let result = resample(&image, 2, 2, ResampleMethod::Bilinear);
    assert!(matches!(result, Err(RasterError::Validation(_))));
}

#[test]
fn test_georeference_not_carried_over() {
    let mut image = rgb(4, 4);
    image.projection = "EPSG:3857".to_string();
    image.geo_transform = [1.0, 2.0, 0.0, 3.0, 0.0, -2.0];
    image.metadata.insert("k".to_string(), "v".to_string());

    let out = resample(&image, 2, 2, ResampleMethod::NearestNeighbor).unwrap();

    assert!(out.projection.is_empty());
    assert_eq!(out.geo_transform, [0.0; 6]);
    assert!(out.metadata.is_empty());
}

#[test]
fn test_height_for_aspect() {
    assert_eq!(height_for_aspect(1024, 1920, 1080), 576);
    assert_eq!(height_for_aspect(100, 3, 2), 66);
    assert_eq!(height_for_aspect(10, 0, 5), 0);
}

#[test]
fn test_method_parsing() {
    assert_eq!("Cubic".parse::<ResampleMethod>().unwrap(), ResampleMethod::Cubic);
    assert_eq!("nearest".parse::<ResampleMethod>().unwrap(), ResampleMethod::NearestNeighbor);
    assert!("lanczos".parse::<ResampleMethod>().is_err());
}
