//! Conversions between RGB and CIE 1931 xy.
//!
//! RGB to xy follows http://www.easyrgb.com/index.php?X=MATH&H=02#text2, the
//! other direction the Philips Hue iOS SDK notes. The two are not inverses of
//! each other.

use super::gamut::Gamut;
use super::rgb::Rgb;
use super::xy::XyPoint;

// sRGB D65 based
const RGB_TO_XYZ: [[f64; 3]; 3] = [
    [0.4360747, 0.3850649, 0.0930804],
    [0.2225045, 0.7168786, 0.0406169],
    [0.0139322, 0.0971045, 0.7141733],
];

// Wide RGB D65
const XYZ_TO_RGB: [[f64; 3]; 3] = [
    [1.612, -0.203, -0.302],
    [-0.509, 1.412, 0.066],
    [0.026, -0.072, 0.962],
];

fn mul(m: &[[f64; 3]; 3], v: [f64; 3]) -> [f64; 3] {
    let row = |r: &[f64; 3]| r[0] * v[0] + r[1] * v[1] + r[2] * v[2];
    [row(&m[0]), row(&m[1]), row(&m[2])]
}

fn gamma_expand(c: f64) -> f64 {
    if c > 0.04045 {
        ((c + 0.055) / (1.0 + 0.055)).powf(2.4)
    } else {
        c / 12.92
    }
}

fn gamma_compress(c: f64) -> f64 {
    if c <= 0.0031308 {
        12.92 * c
    } else {
        (1.0 + 0.055) * c.powf(1.0 / 2.4) - 0.055
    }
}

/// Approximate xy coordinates of an RGB color, moved inside the gamut if needed.
///
/// Black has no chromaticity; it ends up at (0, 0) before gamut correction.
pub fn rgb_to_xy(rgb: &Rgb, gamut: &Gamut) -> XyPoint {
    let [r, g, b] = rgb.normalized().map(gamma_expand);
    let [x, y, z] = mul(&RGB_TO_XYZ, [r, g, b]);
    let sum = x + y + z;
    let cx = x / sum;
    let cy = y / sum;
    let p = XyPoint::new(
        if cx.is_nan() { 0.0 } else { cx },
        if cy.is_nan() { 0.0 } else { cy },
    );
    gamut.clamp(p)
}

/// RGB color for the given coordinates and brightness (0.0 - 1.0).
///
/// Lossy. Components are scaled down uniformly if any of them saturates, so
/// the hue is kept at the cost of brightness. A y coordinate of 0 is not
/// handled.
pub fn xy_to_rgb(xy: &XyPoint, brightness: f64, gamut: &Gamut) -> Rgb {
    let xy = gamut.clamp(*xy);
    let y_lum = brightness;
    let x_lum = y_lum / xy.y * xy.x;
    let z_lum = y_lum / xy.y * (1.0 - xy.x - xy.y);

    let rgb = mul(&XYZ_TO_RGB, [x_lum, y_lum, z_lum]).map(|c| gamma_compress(c).max(0.0));
    let max = rgb[0].max(rgb[1]).max(rgb[2]);
    let rgb = if max > 1.0 { rgb.map(|c| c / max) } else { rgb };
    let [r, g, b] = rgb.map(|c| (c * 255.0).floor() as i32);
    Rgb::clamped(r, g, b)
}
