//! Floyd-Steinberg error diffusion.
//!
//! Processes pixels left-to-right, top-to-bottom. After choosing a colour
//! for a pixel, its per-channel error is pushed onto the neighbours that
//! have not been visited yet:
//!
//! ```text
//!        *   7/16
//!  3/16 5/16 1/16
//! ```
//!
//! Each pixel depends on every earlier one, so this pass is strictly
//! sequential.

use crate::types::Colour;

/// Neighbour offsets (dx, dy) and their share of the error.
const DIFFUSION: [(isize, isize, f32); 4] = [
    (1, 0, 7.0 / 16.0),
    (-1, 1, 3.0 / 16.0),
    (0, 1, 5.0 / 16.0),
    (1, 1, 1.0 / 16.0),
];

/// Dither a row-major `width * height` image.
///
/// `choose` maps a pending colour to its output colour (usually a palette
/// lookup). Pixels flagged in `fixed` are copied through unchanged and
/// neither emit nor receive error.
pub fn floyd_steinberg<F>(
    pixels: &[Colour],
    width: usize,
    height: usize,
    fixed: Option<&[bool]>,
    mut choose: F,
) -> Vec<Colour>
where
    F: FnMut(Colour) -> Colour,
{
    debug_assert_eq!(pixels.len(), width * height);
    let is_fixed = |i: usize| fixed.map_or(false, |mask| mask[i]);

    // Working buffer with f32 channels for error accumulation
    let mut buf: Vec<[f32; 3]> = pixels
        .iter()
        .map(|c| [c.r as f32, c.g as f32, c.b as f32])
        .collect();

    let mut result = Vec::with_capacity(pixels.len());

    for y in 0..height {
        for x in 0..width {
            let i = y * width + x;
            if is_fixed(i) {
                result.push(pixels[i]);
                continue;
            }

            let old = buf[i];
            let chosen = choose(Colour::from_f32_clamped(old));
            result.push(chosen);

            let err = [
                old[0] - chosen.r as f32,
                old[1] - chosen.g as f32,
                old[2] - chosen.b as f32,
            ];

            for &(dx, dy, weight) in &DIFFUSION {
                let nx = x as isize + dx;
                let ny = y as isize + dy;
                if nx < 0 || nx >= width as isize || ny >= height as isize {
                    continue;
                }

                let n = ny as usize * width + nx as usize;
                if is_fixed(n) {
                    continue;
                }
                for c in 0..3 {
                    buf[n][c] = (buf[n][c] + err[c] * weight).clamp(0.0, 255.0);
                }
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quantize::metric::nearest_rgb;
    use crate::types::Palette;

    fn black_white() -> Palette {
        Palette::new(vec![Colour::BLACK, Colour::WHITE]).unwrap()
    }

    #[test]
    fn test_mid_grey_dithers_to_half_and_half() {
        let (w, h) = (64, 64);
        let pixels = vec![Colour::rgb(128, 128, 128); w * h];
        let palette = black_white();

        let out = floyd_steinberg(&pixels, w, h, None, |c| nearest_rgb(c, &palette));

        let white = out.iter().filter(|&&c| c == Colour::WHITE).count();
        let ratio = white as f64 / out.len() as f64;
        assert!((0.45..=0.55).contains(&ratio), "white ratio {}", ratio);
        assert!(out.iter().all(|c| palette.contains(*c)));
    }

    #[test]
    fn test_exact_palette_colours_pass_through() {
        let pixels = vec![Colour::BLACK, Colour::WHITE, Colour::WHITE, Colour::BLACK];
        let palette = black_white();
        let out = floyd_steinberg(&pixels, 2, 2, None, |c| nearest_rgb(c, &palette));
        assert_eq!(out, pixels);
    }

    #[test]
    fn test_fixed_pixels_are_untouched() {
        let marker = Colour::rgb(1, 2, 3);
        let pixels = vec![Colour::rgb(128, 128, 128), marker, Colour::rgb(128, 128, 128)];
        let fixed = [false, true, false];
        let palette = black_white();

        let out = floyd_steinberg(&pixels, 3, 1, Some(&fixed), |c| nearest_rgb(c, &palette));

        assert_eq!(out[1], marker);
        // Error from pixel 0 is not carried across the fixed pixel
        assert_eq!(out[2], Colour::WHITE);
    }

    #[test]
    fn test_visits_in_raster_order() {
        let pixels: Vec<Colour> = (0..6u8).map(|i| Colour::rgb(i * 10, 0, 0)).collect();
        let mut seen = Vec::new();
        let out = floyd_steinberg(&pixels, 3, 2, None, |c| {
            seen.push(c);
            c
        });
        assert_eq!(seen, pixels);
        assert_eq!(out, pixels);
    }
}
