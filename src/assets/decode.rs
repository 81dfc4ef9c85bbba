use image::{DynamicImage, RgbaImage, imageops::FilterType};

use crate::foundation::core::{Resolution, Rgba8};

/// Decode encoded image bytes (any format the `image` crate recognises) into RGBA8.
pub fn decode_image(bytes: &[u8]) -> image::ImageResult<RgbaImage> {
    Ok(image::load_from_memory(bytes)?.to_rgba8())
}

/// Scale and centre-crop `img` so it exactly fills `resolution`, dropping any alpha.
pub fn fit_to_resolution(img: &RgbaImage, resolution: Resolution) -> RgbaImage {
    let Resolution { width, height } = resolution;
    let mut out = if img.dimensions() == (width, height) {
        img.clone()
    } else if img.width() == 0 || img.height() == 0 {
        RgbaImage::new(width, height)
    } else {
        DynamicImage::ImageRgba8(img.clone())
            .resize_to_fill(width, height, FilterType::Lanczos3)
            .to_rgba8()
    };
    for px in out.pixels_mut() {
        px[3] = 255;
    }
    out
}

/// Opaque single-colour image of `resolution`.
pub fn solid_fill(resolution: Resolution, color: Rgba8) -> RgbaImage {
    RgbaImage::from_pixel(
        resolution.width,
        resolution.height,
        image::Rgba([color.r, color.g, color.b, 255]),
    )
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
