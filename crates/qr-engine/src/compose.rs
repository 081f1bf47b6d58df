//! Image composition: background blending and the alpha gradient.

use image::imageops::FilterType;
use image::{DynamicImage, GrayImage, Luma, Rgba, RgbImage, RgbaImage};
use tracing::debug;

use crate::BLEND_ALPHA;

/// Composite a QR bitmap with an optional background and alpha gradient.
///
/// - Without a background the bitmap keeps its native size.
/// - With a background the bitmap is stretched to the background's size,
///   given a uniform alpha of [`BLEND_ALPHA`] and blended over it.
/// - With `gradient` the alpha channel is replaced by a left-to-right ramp,
///   discarding any alpha produced by the background step.
///
/// When neither effect is requested the bitmap is returned as opaque RGB.
pub fn composite(qr: RgbImage, background: Option<&DynamicImage>, gradient: bool) -> DynamicImage {
    let mut image = match background {
        Some(bg) => DynamicImage::ImageRgba8(blend_onto_background(&qr, bg)),
        None => DynamicImage::ImageRgb8(qr),
    };

    if gradient {
        let mut rgba = image.to_rgba8();
        let mask = gradient_mask(rgba.width(), rgba.height());
        apply_alpha_mask(&mut rgba, &mask);
        image = DynamicImage::ImageRgba8(rgba);
    }

    image
}

fn blend_onto_background(qr: &RgbImage, background: &DynamicImage) -> RgbaImage {
    let (width, height) = (background.width(), background.height());
    debug!(
        qr_w = qr.width(),
        qr_h = qr.height(),
        width,
        height,
        "Stretching QR bitmap over background"
    );

    let resized = image::imageops::resize(qr, width, height, FilterType::Triangle);
    let mut layer = RgbaImage::new(width, height);
    for (x, y, pixel) in resized.enumerate_pixels() {
        layer.put_pixel(x, y, Rgba([pixel[0], pixel[1], pixel[2], BLEND_ALPHA]));
    }

    let mut base = background.to_rgba8();
    alpha_composite(&mut base, &layer);
    base
}

/// Alpha-composite `top` over `base` in place ("over" operator).
///
/// Both images must share dimensions; pixels outside `base` are ignored.
fn alpha_composite(base: &mut RgbaImage, top: &RgbaImage) {
    for (x, y, pixel) in top.enumerate_pixels() {
        if x < base.width() && y < base.height() {
            let bg = base.get_pixel(x, y);
            let blended = blend_pixel(bg, pixel);
            base.put_pixel(x, y, blended);
        }
    }
}

fn blend_pixel(bg: &Rgba<u8>, fg: &Rgba<u8>) -> Rgba<u8> {
    let fa = f32::from(fg[3]) / 255.0;
    let ba = f32::from(bg[3]) / 255.0;
    let out_a = fa + ba * (1.0 - fa);
    if out_a <= f32::EPSILON {
        return Rgba([0, 0, 0, 0]);
    }

    let channel = |i: usize| {
        let c = (f32::from(fg[i]) * fa + f32::from(bg[i]) * ba * (1.0 - fa)) / out_a;
        c.round().clamp(0.0, 255.0) as u8
    };
    Rgba([
        channel(0),
        channel(1),
        channel(2),
        (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
    ])
}

/// Horizontal alpha ramp: column `i` of `width` holds `floor(255 * i / width)`.
pub fn gradient_mask(width: u32, height: u32) -> GrayImage {
    GrayImage::from_fn(width, height, |x, _| {
        Luma([(255 * u64::from(x) / u64::from(width)) as u8])
    })
}

/// Replace the alpha channel of `image` with `mask`.
pub fn apply_alpha_mask(image: &mut RgbaImage, mask: &GrayImage) {
    for (x, y, pixel) in image.enumerate_pixels_mut() {
        if x < mask.width() && y < mask.height() {
            pixel[3] = mask.get_pixel(x, y)[0];
        }
    }
}
