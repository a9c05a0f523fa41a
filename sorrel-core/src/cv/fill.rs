// Copyright (c) 2025, Tom Ouellette
// Licensed under the BSD 3-Clause License

use crate::error::SorrelError;
use crate::im::IdMask;

/// De-flatten a normalized vertex list and scale it to pixel space
///
/// Vertex lists arrive flat as [x0, y0, x1, y1, ..] with coordinates in
/// [0, 1]. Each coordinate is scaled by the canonical frame resolution.
/// Empty and odd-length lists are malformed and rejected.
///
/// # Arguments
///
/// * `flat` - Flat vertex list in normalized coordinates
/// * `width` - Frame width in pixels
/// * `height` - Frame height in pixels
///
/// # Examples
///
/// ```
/// use sorrel_core::cv::scale_vertices;
///
/// let points = scale_vertices(&[0.5, 0.25], 1280, 800).unwrap();
/// assert_eq!(points, vec![[640.0, 200.0]]);
/// ```
pub fn scale_vertices(flat: &[f32], width: u32, height: u32) -> Result<Vec<[f32; 2]>, SorrelError> {
    if flat.is_empty() {
        return Err(SorrelError::GeometryError("Vertex list is empty."));
    }

    if flat.len() % 2 != 0 {
        return Err(SorrelError::GeometryError(
            "Vertex list has an odd number of coordinates.",
        ));
    }

    Ok(flat
        .chunks_exact(2)
        .map(|point| [point[0] * width as f32, point[1] * height as f32])
        .collect())
}

/// Fill a polygon into an id mask using even-odd scanline rasterization
///
/// Each mask row is sampled at the pixel center: edges crossing the
/// scanline contribute x-intersections, and pixels between successive
/// pairs of sorted intersections are labeled. The even-odd rule makes
/// envelope geometries with holes fill correctly when every member list
/// is passed through the same call. Polygons extending past the frame
/// are clipped. Fewer than three vertices fill nothing.
///
/// # Arguments
///
/// * `mask` - Target id mask buffer
/// * `polygon` - Polygon vertices in pixel coordinates
/// * `id` - Category id written to every covered pixel
pub fn fill_polygon(mask: &mut IdMask, polygon: &[[f32; 2]], id: u32) {
    let n = polygon.len();

    if n < 3 {
        return;
    }

    let min_y = polygon.iter().map(|p| p[1]).fold(f32::INFINITY, f32::min);
    let max_y = polygon
        .iter()
        .map(|p| p[1])
        .fold(f32::NEG_INFINITY, f32::max);

    let y_start = min_y.floor().max(0.0) as u32;
    let y_end = max_y.ceil().min(mask.height() as f32) as u32;

    let mut crossings: Vec<f32> = Vec::with_capacity(n);

    for y in y_start..y_end {
        let yc = y as f32 + 0.5;

        crossings.clear();

        for i in 0..n {
            let [x0, y0] = polygon[i];
            let [x1, y1] = polygon[(i + 1) % n];

            if (y0 <= yc) != (y1 <= yc) {
                crossings.push(x0 + (yc - y0) / (y1 - y0) * (x1 - x0));
            }
        }

        crossings.sort_by(f32::total_cmp);

        for pair in crossings.chunks_exact(2) {
            let x_start = (pair[0] - 0.5).ceil().max(0.0) as u32;
            let x_end = (pair[1] - 0.5).ceil().min(mask.width() as f32) as u32;

            for x in x_start..x_end {
                mask.set(x, y, id);
            }
        }
    }
}

#[cfg(test)]
mod test {

    use super::*;

    use crate::constant;

    #[test]
    fn test_scale_vertices() {
        let points = scale_vertices(&[0.0, 0.0, 0.5, 0.0, 0.5, 0.5, 0.0, 0.5], 1280, 800).unwrap();

        assert_eq!(
            points,
            vec![[0.0, 0.0], [640.0, 0.0], [640.0, 400.0], [0.0, 400.0]]
        );
    }

    #[test]
    fn test_scale_vertices_empty() {
        assert!(scale_vertices(&[], 1280, 800).is_err());
    }

    #[test]
    fn test_scale_vertices_odd() {
        assert!(scale_vertices(&[0.1, 0.2, 0.3], 1280, 800).is_err());
    }

    #[test]
    fn test_fill_half_frame_rectangle() {
        let mut mask = IdMask::new(constant::FRAME_WIDTH, constant::FRAME_HEIGHT);

        let polygon = scale_vertices(
            &[0.0, 0.0, 0.5, 0.0, 0.5, 0.5, 0.0, 0.5],
            constant::FRAME_WIDTH,
            constant::FRAME_HEIGHT,
        )
        .unwrap();

        fill_polygon(&mut mask, &polygon, 1);

        assert_eq!(mask.id_at(0, 0), 1);
        assert_eq!(mask.id_at(639, 0), 1);
        assert_eq!(mask.id_at(639, 399), 1);
        assert_eq!(mask.id_at(640, 0), 0);
        assert_eq!(mask.id_at(0, 400), 0);

        let filled = mask.as_raw().chunks_exact(4).filter(|p| p[2] == 1).count();
        assert_eq!(filled, 640 * 400);
    }

    #[test]
    fn test_fill_triangle() {
        let mut mask = IdMask::new(10, 10);

        fill_polygon(&mut mask, &[[0.0, 0.0], [10.0, 0.0], [0.0, 10.0]], 1);

        assert_eq!(mask.id_at(0, 0), 1);
        assert_eq!(mask.id_at(9, 9), 0);

        // Pixel centers under the hypotenuse satisfy x + y <= 8
        let filled = mask.as_raw().chunks_exact(4).filter(|p| p[2] == 1).count();
        assert_eq!(filled, 45);
    }

    #[test]
    fn test_fill_clips_to_frame() {
        let mut mask = IdMask::new(4, 4);

        fill_polygon(
            &mut mask,
            &[[-2.0, -2.0], [8.0, -2.0], [8.0, 8.0], [-2.0, 8.0]],
            1,
        );

        let filled = mask.as_raw().chunks_exact(4).filter(|p| p[2] == 1).count();
        assert_eq!(filled, 16);
    }

    #[test]
    fn test_fill_overlap_last_wins() {
        let mut mask = IdMask::new(8, 8);

        fill_polygon(&mut mask, &[[0.0, 0.0], [6.0, 0.0], [6.0, 6.0], [0.0, 6.0]], 1);
        fill_polygon(&mut mask, &[[2.0, 2.0], [8.0, 2.0], [8.0, 8.0], [2.0, 8.0]], 2);

        assert_eq!(mask.id_at(1, 1), 1);
        assert_eq!(mask.id_at(4, 4), 2);
        assert_eq!(mask.id_at(7, 7), 2);
    }

    #[test]
    fn test_fill_degenerate() {
        let mut mask = IdMask::new(4, 4);

        fill_polygon(&mut mask, &[[1.0, 1.0], [3.0, 3.0]], 1);

        assert!(mask.as_raw().iter().all(|&v| v == 0));
    }
}
