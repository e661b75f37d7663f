use serde::{Deserialize, Serialize};

use super::Location;

/// Geographic bounding box in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl BoundingBox {
    pub fn new(south: f64, west: f64, north: f64, east: f64) -> Self {
        Self {
            south,
            west,
            north,
            east,
        }
    }

    /// Smallest box enclosing all locations, `None` for an empty slice
    pub fn from_locations(locations: &[Location]) -> Option<Self> {
        let first = locations.first()?;
        let mut bbox = Self::new(
            first.latitude,
            first.longitude,
            first.latitude,
            first.longitude,
        );

        for location in &locations[1..] {
            bbox.south = bbox.south.min(location.latitude);
            bbox.north = bbox.north.max(location.latitude);
            bbox.west = bbox.west.min(location.longitude);
            bbox.east = bbox.east.max(location.longitude);
        }

        Some(bbox)
    }

    pub fn corners(&self) -> [Location; 4] {
        [
            Location::new(self.south, self.west),
            Location::new(self.south, self.east),
            Location::new(self.north, self.west),
            Location::new(self.north, self.east),
        ]
    }

    pub fn is_finite(&self) -> bool {
        self.south.is_finite()
            && self.west.is_finite()
            && self.north.is_finite()
            && self.east.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_locations() {
        let bbox = BoundingBox::from_locations(&[
            Location::new(10.0, 20.0),
            Location::new(-5.0, 40.0),
            Location::new(3.0, -1.0),
        ])
        .unwrap();

        assert_eq!(bbox, BoundingBox::new(-5.0, -1.0, 10.0, 40.0));
    }

    #[test]
    fn test_from_locations_empty() {
        assert!(BoundingBox::from_locations(&[]).is_none());
    }
}
