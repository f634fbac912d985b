//! Colour distance metrics.
//!
//! Perceptual distance is Euclidean distance in CIELAB (D65 white). Plain
//! RGB distance is kept for paths that do not need perceptual weighting.

use palette::{LinSrgb, Srgb};

use crate::types::{Colour, Palette};

/// D65 reference white, scaled so that Y = 100.
const WHITE_X: f64 = 95.047;
const WHITE_Y: f64 = 100.0;
const WHITE_Z: f64 = 108.883;

/// CIELAB piecewise threshold and linear segment.
const LAB_EPSILON: f64 = 0.008856;
const LAB_SLOPE: f64 = 7.787;
const LAB_OFFSET: f64 = 16.0 / 116.0;

/// A colour in CIELAB space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lab {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

impl Lab {
    /// Euclidean distance to another LAB colour.
    pub fn distance(&self, other: &Lab) -> f64 {
        self.distance_sq(other).sqrt()
    }

    /// Squared distance, for comparisons that never need the root.
    pub fn distance_sq(&self, other: &Lab) -> f64 {
        let dl = self.l - other.l;
        let da = self.a - other.a;
        let db = self.b - other.b;
        dl * dl + da * da + db * db
    }
}

impl From<Colour> for Lab {
    fn from(colour: Colour) -> Self {
        to_lab(colour)
    }
}

/// Convert an sRGB colour to CIELAB.
///
/// Channels are gamma-expanded with the sRGB inverse transfer function,
/// mapped to XYZ with the sRGB primaries (scaled by 100), then to LAB
/// relative to D65.
pub fn to_lab(colour: Colour) -> Lab {
    let lin: LinSrgb<f64> = Srgb::new(colour.r, colour.g, colour.b)
        .into_format::<f64>()
        .into_linear();

    let x = (lin.red * 0.4124 + lin.green * 0.3576 + lin.blue * 0.1805) * 100.0;
    let y = (lin.red * 0.2126 + lin.green * 0.7152 + lin.blue * 0.0722) * 100.0;
    let z = (lin.red * 0.0193 + lin.green * 0.1192 + lin.blue * 0.9505) * 100.0;

    let fx = lab_f(x / WHITE_X);
    let fy = lab_f(y / WHITE_Y);
    let fz = lab_f(z / WHITE_Z);

    Lab {
        l: 116.0 * fy - 16.0,
        a: 500.0 * (fx - fy),
        b: 200.0 * (fy - fz),
    }
}

fn lab_f(t: f64) -> f64 {
    if t > LAB_EPSILON {
        t.cbrt()
    } else {
        LAB_SLOPE * t + LAB_OFFSET
    }
}

/// Perceptual distance: Euclidean distance in LAB.
pub fn perceptual_distance(a: Colour, b: Colour) -> f64 {
    to_lab(a).distance(&to_lab(b))
}

/// Plain Euclidean distance in RGB.
pub fn rgb_distance(a: Colour, b: Colour) -> f64 {
    (rgb_distance_sq(a, b) as f64).sqrt()
}

/// Squared RGB distance in integer arithmetic.
pub fn rgb_distance_sq(a: Colour, b: Colour) -> u32 {
    let dr = a.r as i32 - b.r as i32;
    let dg = a.g as i32 - b.g as i32;
    let db = a.b as i32 - b.b as i32;
    (dr * dr + dg * dg + db * db) as u32
}

/// Nearest palette entry by plain RGB distance. The first of several
/// equally close entries wins.
pub fn nearest_rgb(colour: Colour, palette: &Palette) -> Colour {
    let mut best = palette.colours()[0];
    let mut best_dist = u32::MAX;

    for &candidate in palette.iter() {
        let dist = rgb_distance_sq(colour, candidate);
        if dist < best_dist {
            best_dist = dist;
            best = candidate;
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() < tol
    }

    #[test]
    fn test_white_is_l100() {
        let lab = to_lab(Colour::WHITE);
        assert!(approx(lab.l, 100.0, 0.01), "L = {}", lab.l);
        assert!(approx(lab.a, 0.0, 0.05), "a = {}", lab.a);
        assert!(approx(lab.b, 0.0, 0.05), "b = {}", lab.b);
    }

    #[test]
    fn test_black_is_origin() {
        let lab = to_lab(Colour::BLACK);
        assert!(approx(lab.l, 0.0, 1e-9));
        assert!(approx(lab.a, 0.0, 1e-9));
        assert!(approx(lab.b, 0.0, 1e-9));
    }

    #[test]
    fn test_pure_red() {
        // Reference values for sRGB red under D65
        let lab = to_lab(Colour::rgb(255, 0, 0));
        assert!(approx(lab.l, 53.24, 0.1), "L = {}", lab.l);
        assert!(approx(lab.a, 80.09, 0.2), "a = {}", lab.a);
        assert!(approx(lab.b, 67.20, 0.2), "b = {}", lab.b);
    }

    #[test]
    fn test_self_distance_is_zero() {
        for colour in [
            Colour::BLACK,
            Colour::WHITE,
            Colour::rgb(26, 27, 75),
            Colour::rgb(3, 250, 129),
        ] {
            assert_eq!(perceptual_distance(colour, colour), 0.0);
            assert_eq!(rgb_distance(colour, colour), 0.0);
        }
    }

    #[test]
    fn test_distances_are_symmetric() {
        let a = Colour::rgb(255, 62, 62);
        let b = Colour::rgb(26, 27, 75);
        assert_eq!(perceptual_distance(a, b), perceptual_distance(b, a));
        assert_eq!(rgb_distance(a, b), rgb_distance(b, a));
    }

    #[test]
    fn test_rgb_distance_black_white() {
        let d = rgb_distance(Colour::BLACK, Colour::WHITE);
        assert!(approx(d, (3.0f64 * 255.0 * 255.0).sqrt(), 1e-9));
    }

    #[test]
    fn test_nearest_rgb_first_wins_on_tie() {
        let grey = Colour::rgb(100, 100, 100);
        let palette = Palette::new(vec![
            Colour::rgb(90, 100, 100),
            Colour::rgb(110, 100, 100),
        ])
        .unwrap();
        assert_eq!(nearest_rgb(grey, &palette), Colour::rgb(90, 100, 100));
    }
}
