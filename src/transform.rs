//! Sprite transforms - rotation with bounding-box expansion

use image::{imageops, Rgba, RgbaImage};

/// Rotate a sprite counter-clockwise by `degrees`, growing the output image
/// so the rotated content is never clipped. Uncovered pixels stay
/// transparent.
///
/// Multiples of 90 take exact, loss-free paths; everything else is resampled
/// nearest-neighbor about the sprite's center (no smoothing - this is pixel
/// art).
pub fn rotate_expand(sprite: &RgbaImage, degrees: f64) -> RgbaImage {
    let angle = degrees.rem_euclid(360.0);
    if angle == 0.0 {
        return sprite.clone();
    }
    if angle == 90.0 {
        // The imageops rotations are clockwise; 270 CW == 90 CCW.
        return imageops::rotate270(sprite);
    }
    if angle == 180.0 {
        return imageops::rotate180(sprite);
    }
    if angle == 270.0 {
        return imageops::rotate90(sprite);
    }

    let width = sprite.width() as f64;
    let height = sprite.height() as f64;
    let (sin, cos) = angle.to_radians().sin_cos();
    let out_w = (width * cos.abs() + height * sin.abs()).ceil().max(1.0) as u32;
    let out_h = (width * sin.abs() + height * cos.abs()).ceil().max(1.0) as u32;

    let mut out = RgbaImage::from_pixel(out_w, out_h, Rgba([0, 0, 0, 0]));
    let out_cx = out_w as f64 / 2.0;
    let out_cy = out_h as f64 / 2.0;
    let src_cx = width / 2.0;
    let src_cy = height / 2.0;

    for (dx, dy, pixel) in out.enumerate_pixels_mut() {
        // Map the destination pixel center back onto the source grid.
        let rx = dx as f64 + 0.5 - out_cx;
        let ry = dy as f64 + 0.5 - out_cy;
        let sx = cos * rx - sin * ry + src_cx;
        let sy = sin * rx + cos * ry + src_cy;
        if sx >= 0.0 && sy >= 0.0 && (sx as u32) < sprite.width() && (sy as u32) < sprite.height() {
            *pixel = *sprite.get_pixel(sx as u32, sy as u32);
        }
    }
    out
}
