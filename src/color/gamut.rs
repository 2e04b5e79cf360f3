use super::xy::XyPoint;

/// Triangle of reproducible colors, corners at the primaries of the lamp.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Gamut {
    pub red: XyPoint,
    pub green: XyPoint,
    pub blue: XyPoint,
}

// Philips Hue gamuts, see https://homeautotechs.com/philips-hue-light-models-full-list/

pub const GAMUT_A: Gamut = Gamut {
    red: XyPoint::new(0.704, 0.296),
    green: XyPoint::new(0.2151, 0.7106),
    blue: XyPoint::new(0.138, 0.08),
};

/// Used unless something else is selected
pub const GAMUT_B: Gamut = Gamut {
    red: XyPoint::new(0.675, 0.322),
    green: XyPoint::new(0.4091, 0.518),
    blue: XyPoint::new(0.167, 0.04),
};

pub const GAMUT_C: Gamut = Gamut {
    red: XyPoint::new(0.692, 0.308),
    green: XyPoint::new(0.17, 0.7),
    blue: XyPoint::new(0.153, 0.048),
};

impl Default for Gamut {
    fn default() -> Self {
        GAMUT_B
    }
}

/// Point on the segment a-b closest to p
fn closest_point_on_segment(a: &XyPoint, b: &XyPoint, p: &XyPoint) -> XyPoint {
    let ap = p.sub(a);
    let ab = b.sub(a);
    let t = (ap.dot(&ab) / ab.dot(&ab)).clamp(0.0, 1.0);
    XyPoint::new(a.x + ab.x * t, a.y + ab.y * t)
}

// Points projected onto an edge may end up a few ulp outside
const EDGE_TOLERANCE: f64 = 1e-12;

impl Gamut {
    /// True if the lamp can reproduce the color at p
    pub fn contains(&self, p: &XyPoint) -> bool {
        let v1 = self.green.sub(&self.red);
        let v2 = self.blue.sub(&self.red);
        let q = p.sub(&self.red);
        let denom = v1.cross(&v2);
        let s = q.cross(&v2) / denom;
        let t = v1.cross(&q) / denom;
        s >= -EDGE_TOLERANCE && t >= -EDGE_TOLERANCE && s + t <= 1.0 + EDGE_TOLERANCE
    }

    /// Closest point on the border of the triangle.
    ///
    /// Edges are tried in the order red-green, blue-red, green-blue. On equal
    /// distance the earlier edge wins.
    pub fn closest_point(&self, p: &XyPoint) -> XyPoint {
        let candidates = [
            closest_point_on_segment(&self.red, &self.green, p),
            closest_point_on_segment(&self.blue, &self.red, p),
            closest_point_on_segment(&self.green, &self.blue, p),
        ];
        let mut closest = candidates[0];
        let mut lowest = p.distance(&closest);
        for c in &candidates[1..] {
            let d = p.distance(c);
            if d < lowest {
                lowest = d;
                closest = *c;
            }
        }
        closest
    }

    /// Returns p unchanged if inside, otherwise the closest border point
    pub fn clamp(&self, p: XyPoint) -> XyPoint {
        if self.contains(&p) {
            p
        } else {
            self.closest_point(&p)
        }
    }
}

impl std::str::FromStr for Gamut {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" | "a" => Ok(GAMUT_A),
            "B" | "b" => Ok(GAMUT_B),
            "C" | "c" => Ok(GAMUT_C),
            _ => Err(format!("Unknown gamut '{}', expected A, B or C", s)),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const EPS: f64 = 1e-12;

    fn near(a: XyPoint, b: XyPoint) -> bool {
        (a.x - b.x).abs() < EPS && (a.y - b.y).abs() < EPS
    }

    #[test]
    fn test_contains() {
        let g = GAMUT_B;
        assert!(g.contains(&XyPoint::new(0.4, 0.3)));
        assert!(g.contains(&g.red));
        assert!(g.contains(&g.green));
        assert!(g.contains(&g.blue));
        assert!(!g.contains(&XyPoint::new(0.0, 0.0)));
        assert!(!g.contains(&XyPoint::new(0.2, 0.7)));
        assert!(!g.contains(&XyPoint::new(0.8, 0.1)));
    }

    #[test]
    fn test_contains_border() {
        for g in [GAMUT_A, GAMUT_B, GAMUT_C] {
            // Projections from outside must count as inside
            for p in [
                XyPoint::new(0.0, 0.0),
                XyPoint::new(0.9, 0.3),
                XyPoint::new(0.6, 0.5),
                XyPoint::new(0.1, 0.5),
                XyPoint::new(0.4, 0.05),
            ] {
                let c = g.closest_point(&p);
                assert!(g.contains(&c), "{} projected to {}", p, c);
            }
            let beyond_blue = XyPoint::new(g.blue.x, g.blue.y - 1e-6);
            assert!(!g.contains(&beyond_blue));
        }
    }

    #[test]
    fn test_closest_vertex() {
        let g = GAMUT_B;
        // Beyond each corner the corner itself is closest
        assert!(near(g.closest_point(&XyPoint::new(0.0, 0.0)), g.blue));
        assert!(near(g.closest_point(&XyPoint::new(0.9, 0.3)), g.red));
        assert!(near(g.closest_point(&XyPoint::new(0.4, 0.8)), g.green));
    }

    #[test]
    fn test_closest_edge() {
        let g = GAMUT_B;
        let p = XyPoint::new(0.6, 0.5);
        let c = g.closest_point(&p);
        // On the red-green edge and the offset is perpendicular to it
        let edge = g.green.sub(&g.red);
        assert!(c.sub(&g.red).cross(&edge).abs() < EPS);
        assert!(p.sub(&c).dot(&edge).abs() < EPS);

        // Just below the blue-red edge
        let p = XyPoint::new(0.3, 0.1);
        assert!(!g.contains(&p));
        let c = g.closest_point(&p);
        let edge = g.red.sub(&g.blue);
        assert!(c.sub(&g.blue).cross(&edge).abs() < EPS);
        assert!(p.sub(&c).dot(&edge).abs() < EPS);
    }

    #[test]
    fn test_clamp_keeps_inside() {
        let p = XyPoint::new(0.4, 0.3);
        assert_eq!(GAMUT_B.clamp(p), p);
        let p = XyPoint::new(0.1, 0.1);
        assert_ne!(GAMUT_B.clamp(p), p);
    }

    #[test]
    fn test_parse() {
        assert_eq!("a".parse::<Gamut>().unwrap(), GAMUT_A);
        assert_eq!("C".parse::<Gamut>().unwrap(), GAMUT_C);
        assert!("D".parse::<Gamut>().is_err());
        assert_eq!(Gamut::default(), GAMUT_B);
    }
}
