//! Alpha compositing - pastes sprites onto a canvas through their alpha mask

use image::{Rgba, RgbaImage};

/// Paste `sprite` onto `canvas` with its top-left corner at (`x`, `y`).
///
/// Coordinates are signed: any part of the sprite hanging off the canvas is
/// clipped. Source pixels with zero alpha leave the destination untouched,
/// fully opaque pixels replace it, and partial alpha blends source over
/// destination.
pub fn blit(canvas: &mut RgbaImage, sprite: &RgbaImage, x: i32, y: i32) {
    let canvas_w = canvas.width() as i32;
    let canvas_h = canvas.height() as i32;

    for (sx, sy, &src) in sprite.enumerate_pixels() {
        if src[3] == 0 {
            continue;
        }
        let dx = x + sx as i32;
        let dy = y + sy as i32;
        if dx < 0 || dy < 0 || dx >= canvas_w || dy >= canvas_h {
            continue;
        }
        let (dx, dy) = (dx as u32, dy as u32);
        if src[3] == 255 {
            canvas.put_pixel(dx, dy, src);
        } else {
            let dst = *canvas.get_pixel(dx, dy);
            canvas.put_pixel(dx, dy, over(src, dst));
        }
    }
}

/// Source-over for one pixel pair of straight-alpha u8 channels.
fn over(src: Rgba<u8>, dst: Rgba<u8>) -> Rgba<u8> {
    let src_a = src[3] as f32 / 255.0;
    let dst_a = dst[3] as f32 / 255.0;
    let out_a = src_a + dst_a * (1.0 - src_a);
    if out_a == 0.0 {
        return Rgba([0, 0, 0, 0]);
    }

    let mut out = [0u8; 4];
    for channel in 0..3 {
        let s = src[channel] as f32;
        let d = dst[channel] as f32;
        out[channel] = ((s * src_a + d * dst_a * (1.0 - src_a)) / out_a).round() as u8;
    }
    out[3] = (out_a * 255.0).round() as u8;
    Rgba(out)
}
