// Copyright (c) 2025, Tom Ouellette
// Licensed under the BSD 3-Clause License

use crate::constant;

/// A color key identifying one semantic class within a mask image
///
/// Channels are stored in the source image's native order (RGB for
/// decoded PNG masks). Equality is exact per channel and the all-zero
/// triple is reserved for background.
pub type Color = [u8; 3];

/// Check whether a color key is the background sentinel
pub fn is_background(color: &Color) -> bool {
    *color == constant::BACKGROUND
}

/// Convert a color key to its hex string representation
///
/// The review tool stores colors with channels in the order opposite to
/// the source image, so the triple is reversed before formatting.
///
/// # Examples
///
/// ```
/// use sorrel_core::im::to_hex;
///
/// assert_eq!(to_hex(&[1, 2, 3]), "#030201");
/// ```
pub fn to_hex(color: &Color) -> String {
    format!("#{:02x}{:02x}{:02x}", color[2], color[1], color[0])
}

/// Encode a category id as an object identifier string
///
/// Object identifiers mirror the pixel value carrying the id in the
/// re-encoded mask, serialized without spaces to match the identifiers
/// the review tool generates itself.
///
/// # Examples
///
/// ```
/// use sorrel_core::im::object_id;
///
/// assert_eq!(object_id(4), "[0,0,4]");
/// ```
pub fn object_id(id: u32) -> String {
    format!("[0,0,{}]", id)
}

#[cfg(test)]
mod test {

    use super::*;

    #[test]
    fn test_background() {
        assert!(is_background(&[0, 0, 0]));
        assert!(!is_background(&[0, 0, 1]));
        assert!(!is_background(&[255, 255, 255]));
    }

    #[test]
    fn test_hex_reverses_channels() {
        assert_eq!(to_hex(&[255, 0, 0]), "#0000ff");
        assert_eq!(to_hex(&[16, 32, 48]), "#302010");
    }

    #[test]
    fn test_object_id() {
        assert_eq!(object_id(1), "[0,0,1]");
        assert_eq!(object_id(255), "[0,0,255]");
    }
}
