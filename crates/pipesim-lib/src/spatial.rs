use serde::Serialize;

use crate::config::NEAREST_CLOSE_DISTANCE;
use crate::vector::Point;

/// A labelled concept on the 2-D drag canvas.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ConceptPoint {
    pub position: Point,
    pub name: String,
    pub category: String,
}

impl ConceptPoint {
    pub fn new(x: f64, y: f64, name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            position: Point::new(x, y),
            name: name.into(),
            category: category.into(),
        }
    }
}

/// The concept closest to a query position.
#[derive(Clone, Debug, Serialize)]
pub struct Nearest<'a> {
    pub point: &'a ConceptPoint,
    pub distance: f64,
}

impl Nearest<'_> {
    /// Distance in display units (five per percent of canvas).
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn scaled_distance(&self) -> i64 {
        (self.distance * 5.0).round() as i64
    }

    /// Whether the query is close enough to "snap" to the concept.
    #[must_use]
    pub fn is_close(&self) -> bool {
        self.scaled_distance() < NEAREST_CLOSE_DISTANCE
    }
}

/// Fixed set of concept points for the nearest-neighbour demo.
#[derive(Clone, Debug, Default)]
pub struct SpatialMap {
    points: Vec<ConceptPoint>,
}

impl SpatialMap {
    #[must_use]
    pub fn new(points: Vec<ConceptPoint>) -> Self {
        Self { points }
    }

    /// Organic, tech and space concepts spread over the canvas.
    #[must_use]
    pub fn reference() -> Self {
        Self::new(vec![
            ConceptPoint::new(20.0, 20.0, "Banana", "Organic"),
            ConceptPoint::new(80.0, 20.0, "Server", "Tech"),
            ConceptPoint::new(50.0, 80.0, "Rocket", "Space"),
            ConceptPoint::new(30.0, 50.0, "Apple", "Organic"),
            ConceptPoint::new(70.0, 30.0, "Laptop", "Tech"),
            ConceptPoint::new(60.0, 90.0, "Mars", "Space"),
        ])
    }

    pub fn points(&self) -> &[ConceptPoint] {
        &self.points
    }

    /// Closest concept to `query` (clamped onto the canvas). The first point
    /// wins ties; `None` only for an empty map.
    #[must_use]
    pub fn nearest(&self, query: Point) -> Option<Nearest<'_>> {
        let query = query.clamped();
        let mut best: Option<Nearest<'_>> = None;
        for point in &self.points {
            let distance = query.distance_to(point.position);
            if best.as_ref().is_none_or(|b| distance < b.distance) {
                best = Some(Nearest { point, distance });
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearest_picks_closest_concept() {
        let map = SpatialMap::reference();
        let hit = map.nearest(Point::new(78.0, 22.0)).unwrap();
        assert_eq!(hit.point.name, "Server");
        assert_eq!(hit.point.category, "Tech");
        assert!(hit.is_close());
    }

    #[test]
    fn exact_position_has_zero_distance() {
        let map = SpatialMap::reference();
        let hit = map.nearest(Point::new(50.0, 80.0)).unwrap();
        assert_eq!(hit.point.name, "Rocket");
        assert_eq!(hit.scaled_distance(), 0);
    }

    #[test]
    fn far_query_is_not_close() {
        let map = SpatialMap::new(vec![ConceptPoint::new(0.0, 0.0, "Origin", "Test")]);
        let hit = map.nearest(Point::new(100.0, 100.0)).unwrap();
        assert_eq!(hit.scaled_distance(), 707);
        assert!(!hit.is_close());
    }

    #[test]
    fn query_is_clamped_to_canvas() {
        let map = SpatialMap::new(vec![ConceptPoint::new(100.0, 100.0, "Corner", "Test")]);
        let hit = map.nearest(Point::new(250.0, 300.0)).unwrap();
        assert_eq!(hit.distance, 0.0);
    }

    #[test]
    fn ties_go_to_first_point() {
        let map = SpatialMap::new(vec![
            ConceptPoint::new(40.0, 50.0, "Left", "A"),
            ConceptPoint::new(60.0, 50.0, "Right", "B"),
        ]);
        assert_eq!(map.nearest(Point::new(50.0, 50.0)).unwrap().point.name, "Left");
    }

    #[test]
    fn empty_map_has_no_nearest() {
        assert!(SpatialMap::default().nearest(Point::new(1.0, 1.0)).is_none());
    }
}
