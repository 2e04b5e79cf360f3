use super::xy::XyPoint;

/// Mired (micro reciprocal degree) for a temperature in Kelvin. 0 K gives infinity.
pub fn kelvin_to_mired(kelvin: f64) -> f64 {
    1.0e6 / kelvin
}

pub fn mired_to_kelvin(mired: f64) -> f64 {
    1.0e6 / mired
}

pub fn clamp_to_range<T: PartialOrd>(min: T, max: T, value: T) -> T {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

// Algorithm from:
// Bongsoon Kang; Ohak Moon; Changhee Hong; Honam Lee; Bonghwan Cho; Youngsun Kim (December 2002).
// "Design of Advanced Color Temperature Control System for HDTV Applications"
// Equations 8 and 9
//
// Valid for 1667 K - 25000 K

pub fn cct_to_xy(kelvin: u32) -> XyPoint {
    let mired = kelvin_to_mired(f64::from(kelvin));
    let mired2 = mired * mired;
    let mired3 = mired2 * mired;
    let x = if kelvin < 4000 {
        -0.2661239e-9 * mired3 - 0.2343589e-6 * mired2 + 0.8776956e-3 * mired + 0.179910
    } else {
        -3.0258469e-9 * mired3 + 2.1070379e-6 * mired2 + 0.2226347e-3 * mired + 0.24039
    };
    let x2 = x * x;
    let x3 = x2 * x;
    let y = if kelvin < 2222 {
        -1.1063814 * x3 - 1.34811020 * x2 + 2.18555832 * x - 0.20219683
    } else if kelvin < 4000 {
        -0.9549476 * x3 - 1.37418593 * x2 + 2.09137015 * x - 0.16748867
    } else {
        3.0817580 * x3 - 5.8733867 * x2 + 3.75112997 * x - 0.37001483
    };
    XyPoint::new(x, y)
}
