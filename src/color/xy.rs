use core::fmt;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Point in the CIE 1931 chromaticity diagram
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct XyPoint {
    pub x: f64,
    pub y: f64,
}

impl XyPoint {
    pub const fn new(x: f64, y: f64) -> XyPoint {
        XyPoint { x, y }
    }

    pub fn sub(&self, other: &XyPoint) -> XyPoint {
        XyPoint::new(self.x - other.x, self.y - other.y)
    }

    pub fn cross(&self, other: &XyPoint) -> f64 {
        self.x * other.y - self.y * other.x
    }

    pub fn dot(&self, other: &XyPoint) -> f64 {
        self.x * other.x + self.y * other.y
    }

    pub fn distance(&self, other: &XyPoint) -> f64 {
        let d = self.sub(other);
        d.dot(&d).sqrt()
    }
}

impl fmt::Display for XyPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{x: {}, y: {}}}", self.x, self.y)
    }
}

impl From<[f64; 2]> for XyPoint {
    fn from(xy: [f64; 2]) -> Self {
        XyPoint::new(xy[0], xy[1])
    }
}

impl From<XyPoint> for [f64; 2] {
    fn from(p: XyPoint) -> Self {
        [p.x, p.y]
    }
}

// The bridge represents coordinates as a two element array
impl Serialize for XyPoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        [self.x, self.y].serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for XyPoint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let xy = <[f64; 2]>::deserialize(deserializer)?;
        Ok(XyPoint::from(xy))
    }
}
