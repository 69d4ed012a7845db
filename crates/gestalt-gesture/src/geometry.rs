//! Pointer geometry: drag vectors, angles and compass sectors
//!
//! Screen coordinates grow rightwards and downwards. Angles are measured
//! counter-clockwise from +x with the y axis flipped, so 90° points up.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Displacement of the pointer from the gesture origin
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Drag {
    pub dx: f64,
    pub dy: f64,
}

impl Drag {
    pub fn between(origin: Point, point: Point) -> Self {
        Self { dx: point.x - origin.x, dy: point.y - origin.y }
    }

    pub fn distance(&self) -> f64 {
        self.dx.hypot(self.dy)
    }

    pub fn is_zero(&self) -> bool {
        self.dx == 0.0 && self.dy == 0.0
    }

    /// Direction in degrees within `[0, 360)`; `None` for a zero-length drag
    pub fn angle(&self) -> Option<f64> {
        if self.is_zero() {
            return None;
        }
        let degrees = (-self.dy).atan2(self.dx).to_degrees();
        Some(degrees.rem_euclid(360.0))
    }

    pub fn sector(&self) -> Option<Sector> {
        self.angle().map(Sector::from_angle)
    }
}

/// One of eight 45° compass sectors, centred on multiples of 45°
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Sector {
    E,
    Ne,
    N,
    Nw,
    W,
    Sw,
    S,
    Se,
}

impl Sector {
    /// Counter-clockwise from east
    pub const ALL: [Sector; 8] =
        [Sector::E, Sector::Ne, Sector::N, Sector::Nw, Sector::W, Sector::Sw, Sector::S, Sector::Se];

    pub fn from_angle(degrees: f64) -> Self {
        let index = (degrees.rem_euclid(360.0) / 45.0).round() as usize % 8;
        Self::ALL[index]
    }

    pub fn centre(self) -> f64 {
        Self::ALL.iter().position(|s| *s == self).unwrap_or(0) as f64 * 45.0
    }

    pub fn name(self) -> &'static str {
        match self {
            Sector::E => "E",
            Sector::Ne => "NE",
            Sector::N => "N",
            Sector::Nw => "NW",
            Sector::W => "W",
            Sector::Sw => "SW",
            Sector::S => "S",
            Sector::Se => "SE",
        }
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drag(dx: f64, dy: f64) -> Drag {
        Drag::between(Point::new(100.0, 100.0), Point::new(100.0 + dx, 100.0 + dy))
    }

    #[test]
    fn test_screen_up_is_ninety_degrees() {
        assert_eq!(drag(0.0, -10.0).angle(), Some(90.0));
        assert_eq!(drag(0.0, 10.0).angle(), Some(270.0));
        assert_eq!(drag(-10.0, 0.0).angle(), Some(180.0));
        assert_eq!(drag(10.0, 0.0).angle(), Some(0.0));
    }

    #[test]
    fn test_zero_drag_has_no_direction() {
        assert!(drag(0.0, 0.0).angle().is_none());
        assert!(drag(0.0, 0.0).sector().is_none());
    }

    #[test]
    fn test_sectors_are_centred_on_multiples_of_45() {
        assert_eq!(Sector::from_angle(0.0), Sector::E);
        assert_eq!(Sector::from_angle(22.0), Sector::E);
        assert_eq!(Sector::from_angle(23.0), Sector::Ne);
        assert_eq!(Sector::from_angle(45.0), Sector::Ne);
        assert_eq!(Sector::from_angle(350.0), Sector::E);
        assert_eq!(Sector::from_angle(270.0), Sector::S);
        assert_eq!(drag(30.0, -30.0).sector(), Some(Sector::Ne));
        assert_eq!(Sector::Nw.centre(), 135.0);
    }

    #[test]
    fn test_sector_names_round_trip_through_json() {
        let json = serde_json::to_string(&Sector::Nw).unwrap();
        assert_eq!(json, "\"NW\"");
        assert_eq!(serde_json::from_str::<Sector>(&json).unwrap(), Sector::Nw);
    }
}
