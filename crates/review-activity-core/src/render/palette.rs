//! Yellow-to-green color scale.

use image::Rgb;

/// ColorBrewer YlGn, nine classes, palest first.
const YLGN: [[u8; 3]; 9] = [
    [0xff, 0xff, 0xe5],
    [0xf7, 0xfc, 0xb9],
    [0xd9, 0xf0, 0xa3],
    [0xad, 0xdd, 0x8e],
    [0x78, 0xc6, 0x79],
    [0x41, 0xab, 0x5d],
    [0x23, 0x84, 0x43],
    [0x00, 0x68, 0x37],
    [0x00, 0x45, 0x29],
];

/// Color for an intensity in `0.0..=1.0`, interpolated between the stops.
/// Out-of-range input is clamped.
pub fn ylgn(t: f64) -> Rgb<u8> {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let pos = t * (YLGN.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = (lo + 1).min(YLGN.len() - 1);
    let frac = pos - lo as f64;

    let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * frac).round() as u8;
    Rgb([
        mix(YLGN[lo][0], YLGN[hi][0]),
        mix(YLGN[lo][1], YLGN[hi][1]),
        mix(YLGN[lo][2], YLGN[hi][2]),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_match_stops() {
        assert_eq!(ylgn(0.0), Rgb([0xff, 0xff, 0xe5]));
        assert_eq!(ylgn(1.0), Rgb([0x00, 0x45, 0x29]));
        assert_eq!(ylgn(0.5), Rgb([0x78, 0xc6, 0x79]));
    }

    #[test]
    fn out_of_range_is_clamped() {
        assert_eq!(ylgn(-3.0), ylgn(0.0));
        assert_eq!(ylgn(7.0), ylgn(1.0));
        assert_eq!(ylgn(f64::NAN), ylgn(0.0));
    }

    #[test]
    fn darker_with_intensity() {
        let luma = |c: Rgb<u8>| c.0.iter().map(|v| *v as u32).sum::<u32>();
        let mut prev = u32::MAX;
        for step in 0..=10 {
            let l = luma(ylgn(step as f64 / 10.0));
            assert!(l <= prev);
            prev = l;
        }
    }
}
