//! Straight-alpha compositing primitives
//!
//! Colors are carried unpremultiplied: a source pixel with alpha `a`
//! contributes `a * src + (1 - a) * dst` per color channel, and the alphas
//! combine as `a + dst_a * (1 - a)`. Integer arithmetic throughout, with
//! rounding on the /255 step.

use image::RgbaImage;

/// One straight-alpha RGBA pixel
pub type Rgba8 = [u8; 4];

/// Composite `src` over `dst` (straight alpha)
pub fn over(dst: Rgba8, src: Rgba8) -> Rgba8 {
    let sa = u16::from(src[3]);
    if sa == 0 {
        return dst;
    }
    if sa == 255 {
        return src;
    }

    let inv = 255u16 - sa;
    let mut out = [0u8; 4];
    for i in 0..3 {
        out[i] = mul_div255(u16::from(src[i]), sa).saturating_add(mul_div255(u16::from(dst[i]), inv));
    }
    out[3] = (sa as u8).saturating_add(mul_div255(u16::from(dst[3]), inv));
    out
}

/// Paint `src` onto `canvas` with its top-left corner at `(x, y)`
///
/// Coordinates may be negative or extend past the canvas; out-of-bounds
/// source pixels are clipped rather than wrapped.
pub fn blit_over(canvas: &mut RgbaImage, src: &RgbaImage, x: i64, y: i64) {
    let (cw, ch) = (i64::from(canvas.width()), i64::from(canvas.height()));

    for (sx, sy, pixel) in src.enumerate_pixels() {
        let dx = x + i64::from(sx);
        let dy = y + i64::from(sy);
        if dx < 0 || dy < 0 || dx >= cw || dy >= ch {
            continue;
        }
        let dst = canvas.get_pixel_mut(dx as u32, dy as u32);
        dst.0 = over(dst.0, pixel.0);
    }
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transparent_source_is_noop() {
        let dst = [10, 20, 30, 40];
        assert_eq!(over(dst, [255, 255, 255, 0]), dst);
    }

    #[test]
    fn opaque_source_replaces_dst() {
        let src = [255, 0, 0, 255];
        assert_eq!(over([0, 0, 0, 255], src), src);
    }

    #[test]
    fn half_alpha_blends_colors() {
        let out = over([0, 0, 0, 255], [255, 255, 255, 128]);
        // 128/255 of white over opaque black
        assert_eq!(out[3], 255);
        assert!(out[0] >= 127 && out[0] <= 129);
    }

    #[test]
    fn blit_clips_at_canvas_edges() {
        let mut canvas = RgbaImage::from_pixel(4, 4, image::Rgba([0, 0, 0, 0]));
        let src = RgbaImage::from_pixel(3, 3, image::Rgba([255, 0, 0, 255]));

        blit_over(&mut canvas, &src, -1, -1);

        // Only the 2x2 overlap lands on the canvas.
        assert_eq!(canvas.get_pixel(0, 0).0, [255, 0, 0, 255]);
        assert_eq!(canvas.get_pixel(1, 1).0, [255, 0, 0, 255]);
        assert_eq!(canvas.get_pixel(2, 2).0, [0, 0, 0, 0]);
    }

    #[test]
    fn blit_paints_over_earlier_content() {
        let mut canvas = RgbaImage::from_pixel(2, 2, image::Rgba([0, 255, 0, 255]));
        let src = RgbaImage::from_pixel(1, 1, image::Rgba([255, 0, 0, 255]));

        blit_over(&mut canvas, &src, 1, 1);

        assert_eq!(canvas.get_pixel(0, 0).0, [0, 255, 0, 255]);
        assert_eq!(canvas.get_pixel(1, 1).0, [255, 0, 0, 255]);
    }
}
