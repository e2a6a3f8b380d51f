use image::{imageops, Rgb, Rgba, RgbaImage};

pub const WHITE: Rgba<u8> = Rgba([u8::MAX, u8::MAX, u8::MAX, u8::MAX]);
pub const BLACK: Rgba<u8> = Rgba([u8::MIN, u8::MIN, u8::MIN, u8::MAX]);

pub const GREEN: Rgb<u8> = Rgb([0, 255, 0]);
pub const DARK_GREEN: Rgb<u8> = Rgb([0, 127, 0]);
pub const RED: Rgb<u8> = Rgb([255, 0, 0]);
pub const BLUE: Rgb<u8> = Rgb([0, 0, 255]);
pub const ORANGE: Rgb<u8> = Rgb([255, 127, 0]);

/// Unweighted mean of the red, green and blue channels. Alpha is ignored.
pub fn grayscale(pixel: &Rgba<u8>) -> f32 {
    let [r, g, b, _] = pixel.0;
    (r as f32 + g as f32 + b as f32) / 3.0
}

/// Scales an image to exactly the given dimensions, stretching if the aspect
/// ratio differs. Images that already match are returned unchanged.
pub fn size_image_to_fit(img: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    if img.dimensions() == (width, height) {
        return img.clone();
    }
    imageops::resize(img, width, height, imageops::FilterType::Triangle)
}
