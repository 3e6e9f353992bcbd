use anyhow::Context;

use crate::foundation::core::Bitmap;
use crate::foundation::error::{AvatarError, AvatarResult};

/// Decode encoded image bytes and convert to a premultiplied RGBA8 bitmap.
pub fn decode_image(bytes: &[u8]) -> AvatarResult<Bitmap> {
    let dyn_img = image::load_from_memory(bytes)
        .context("decode image from memory")
        .map_err(|e| AvatarError::decode(format!("{e:#}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Bitmap::from_premul_rgba8(width, height, rgba8_premul)
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

/// Downscale `source` toward `target` per side with box averaging.
///
/// Both fetch backends honor their requested target size by scaling the
/// decoded source down before cropping; upscaling is never performed. A
/// zero target or an empty source returns the source unchanged.
pub fn scale_down_to(source: &Bitmap, target: u32) -> AvatarResult<Bitmap> {
    if target == 0 || source.is_empty() {
        return Ok(source.clone());
    }
    let (w, h) = (source.width(), source.height());
    if w <= target && h <= target {
        return Ok(source.clone());
    }

    let scale = (f64::from(target) / f64::from(w)).min(f64::from(target) / f64::from(h));
    let out_w = ((f64::from(w) * scale).round() as u32).max(1);
    let out_h = ((f64::from(h) * scale).round() as u32).max(1);

    let mut bytes = Vec::with_capacity((out_w as usize) * (out_h as usize) * 4);
    for oy in 0..out_h {
        let y_lo = (u64::from(oy) * u64::from(h)) / u64::from(out_h);
        let y_hi = ((u64::from(oy) + 1) * u64::from(h)).div_ceil(u64::from(out_h));
        for ox in 0..out_w {
            let x_lo = (u64::from(ox) * u64::from(w)) / u64::from(out_w);
            let x_hi = ((u64::from(ox) + 1) * u64::from(w)).div_ceil(u64::from(out_w));

            let mut acc = [0u64; 4];
            let mut n = 0u64;
            for sy in y_lo..y_hi {
                for sx in x_lo..x_hi {
                    let px = source.pixel(sx as u32, sy as u32);
                    acc[0] += u64::from(px.r);
                    acc[1] += u64::from(px.g);
                    acc[2] += u64::from(px.b);
                    acc[3] += u64::from(px.a);
                    n += 1;
                }
            }
            for c in acc {
                bytes.push(((c + n / 2) / n.max(1)) as u8);
            }
        }
    }

    Bitmap::from_premul_rgba8(out_w, out_h, bytes)
}
