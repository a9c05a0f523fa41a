// Copyright (c) 2025, Tom Ouellette
// Licensed under the BSD 3-Clause License

use std::collections::{BTreeSet, HashMap};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbImage};

use crate::constant;
use crate::error::SorrelError;
use crate::im::color::{Color, is_background};

/// A 4-channel buffer storing category ids instead of colors
///
/// Pixels are stored in RGBA order. The category id lives in the blue
/// channel as the review tool reads mask pixels in BGR order, and the
/// alpha channel marks labeled pixels as opaque. Background pixels stay
/// fully transparent with a zero id.
///
/// # Examples
///
/// ```
/// use sorrel_core::im::IdMask;
///
/// let mut mask = IdMask::new(4, 4);
/// mask.set(1, 2, 3);
///
/// assert_eq!(mask.id_at(1, 2), 3);
/// assert_eq!(mask.id_at(0, 0), 0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct IdMask {
    width: u32,
    height: u32,
    buffer: Vec<u8>,
}

impl IdMask {
    /// Initialize a transparent background-only mask
    pub fn new(width: u32, height: u32) -> IdMask {
        IdMask {
            width,
            height,
            buffer: vec![0u8; (width * height * 4) as usize],
        }
    }

    /// Return the mask width
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Return the mask height
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Return a reference to the underlying RGBA buffer
    pub fn as_raw(&self) -> &[u8] {
        &self.buffer
    }

    /// Label one pixel with a category id and mark it opaque
    ///
    /// Coordinates outside the frame are ignored so that polygons
    /// extending past the canonical resolution are clipped.
    pub fn set(&mut self, x: u32, y: u32, id: u32) {
        if x >= self.width || y >= self.height {
            return;
        }

        let idx = ((y * self.width + x) * 4) as usize;
        self.buffer[idx + 2] = id as u8;
        self.buffer[idx + 3] = 255;
    }

    /// Return the category id stored at a pixel
    pub fn id_at(&self, x: u32, y: u32) -> u32 {
        self.buffer[((y * self.width + x) * 4 + 2) as usize] as u32
    }

    /// Return the alpha value stored at a pixel
    pub fn alpha_at(&self, x: u32, y: u32) -> u8 {
        self.buffer[((y * self.width + x) * 4 + 3) as usize]
    }

    /// Re-encode a color mask given a color to category id table
    ///
    /// Every pixel whose color appears in the table receives that color's
    /// id; all other pixels, the background included, stay transparent.
    /// The table is expected to hold one entry per distinct foreground
    /// color so the registry is only consulted once per color, not once
    /// per pixel.
    pub fn from_color_mask(image: &RgbImage, ids: &HashMap<Color, u32>) -> IdMask {
        let mut mask = IdMask::new(image.width(), image.height());

        for (x, y, pixel) in image.enumerate_pixels() {
            if let Some(&id) = ids.get(&pixel.0) {
                mask.set(x, y, id);
            }
        }

        mask
    }

    /// Encode the mask as a portable embeddable image blob
    ///
    /// The buffer is serialized as a lossless alpha-preserving png and
    /// wrapped in a base64 data URL for embedding in annotation records.
    pub fn to_data_url(&self) -> Result<String, SorrelError> {
        let mut buffer = Vec::new();

        PngEncoder::new(&mut buffer)
            .write_image(&self.buffer, self.width, self.height, ExtendedColorType::Rgba8)
            .map_err(|_| SorrelError::MaskEncodeError)?;

        Ok(format!(
            "{}{}",
            constant::MASK_DATA_URL_PREFIX,
            STANDARD.encode(buffer)
        ))
    }
}

/// Enumerate the distinct non-background colors in a mask image
///
/// The enumeration is deterministic per image: colors are returned in
/// ascending channel order rather than pixel-scan order.
pub fn distinct_colors(image: &RgbImage) -> Vec<Color> {
    image
        .pixels()
        .map(|pixel| pixel.0)
        .filter(|color| !is_background(color))
        .collect::<BTreeSet<Color>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod test {

    use super::*;

    use image::Rgb;

    fn checker() -> RgbImage {
        // [[0,0,0], [1,2,3]]
        // [[1,2,3], [0,0,0]]
        let mut image = RgbImage::new(2, 2);
        image.put_pixel(1, 0, Rgb([1, 2, 3]));
        image.put_pixel(0, 1, Rgb([1, 2, 3]));
        image
    }

    #[test]
    fn test_distinct_colors() {
        let image = checker();
        assert_eq!(distinct_colors(&image), vec![[1, 2, 3]]);
    }

    #[test]
    fn test_distinct_colors_sorted() {
        let mut image = RgbImage::new(2, 1);
        image.put_pixel(0, 0, Rgb([4, 5, 6]));
        image.put_pixel(1, 0, Rgb([1, 2, 3]));

        assert_eq!(distinct_colors(&image), vec![[1, 2, 3], [4, 5, 6]]);
    }

    #[test]
    fn test_from_color_mask() {
        let image = checker();

        let mut ids = HashMap::new();
        ids.insert([1, 2, 3], 1);

        let mask = IdMask::from_color_mask(&image, &ids);

        assert_eq!(mask.id_at(0, 0), 0);
        assert_eq!(mask.id_at(1, 0), 1);
        assert_eq!(mask.id_at(0, 1), 1);
        assert_eq!(mask.id_at(1, 1), 0);

        assert_eq!(mask.alpha_at(0, 0), 0);
        assert_eq!(mask.alpha_at(1, 0), 255);
    }

    #[test]
    fn test_coverage() {
        let image = checker();

        let mut ids = HashMap::new();
        ids.insert([1, 2, 3], 1);

        let mask = IdMask::from_color_mask(&image, &ids);

        for (x, y, pixel) in image.enumerate_pixels() {
            if pixel.0 == [0, 0, 0] {
                assert_eq!(mask.id_at(x, y), 0);
                assert_eq!(mask.alpha_at(x, y), 0);
            } else {
                assert!(mask.id_at(x, y) > 0);
                assert_eq!(mask.alpha_at(x, y), 255);
            }
        }
    }

    #[test]
    fn test_set_clips_out_of_bounds() {
        let mut mask = IdMask::new(2, 2);
        mask.set(2, 0, 1);
        mask.set(0, 2, 1);

        assert!(mask.as_raw().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_data_url_round_trip() {
        let mut mask = IdMask::new(2, 2);
        mask.set(1, 0, 7);

        let url = mask.to_data_url().unwrap();
        assert!(url.starts_with(constant::MASK_DATA_URL_PREFIX));

        let bytes = STANDARD
            .decode(&url[constant::MASK_DATA_URL_PREFIX.len()..])
            .unwrap();

        let decoded = image::load_from_memory(&bytes).unwrap().into_rgba8();

        assert_eq!(decoded.get_pixel(1, 0).0, [0, 0, 7, 255]);
        assert_eq!(decoded.get_pixel(0, 0).0, [0, 0, 0, 0]);
    }

    #[test]
    fn test_data_url_deterministic() {
        let mut mask = IdMask::new(3, 3);
        mask.set(0, 0, 1);
        mask.set(2, 2, 2);

        assert_eq!(mask.to_data_url().unwrap(), mask.to_data_url().unwrap());
    }
}
