//! Geographic primitives: the serviced-region bounding box, viewport
//! clamping and great-circle distances.

use serde::{Deserialize, Serialize};

/// Mean Earth radius in kilometers, as used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A point on the globe in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// The visible rectangular region of a map: a center point plus the
/// latitude/longitude span (not a radius).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub center: GeoPoint,
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

fn default_north() -> f64 {
    13.0
}

fn default_south() -> f64 {
    9.5
}

fn default_west() -> f64 {
    123.5
}

fn default_east() -> f64 {
    126.5
}

fn default_min_zoom_delta() -> f64 {
    0.01
}

fn default_max_zoom_delta() -> f64 {
    4.0
}

/// The geographic rectangle the app services, plus the allowed zoom range.
///
/// Defaults cover the Leyte and Samar region.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MapBounds {
    #[serde(default = "default_north")]
    pub north: f64,
    #[serde(default = "default_south")]
    pub south: f64,
    #[serde(default = "default_west")]
    pub west: f64,
    #[serde(default = "default_east")]
    pub east: f64,
    #[serde(default = "default_min_zoom_delta")]
    pub min_zoom_delta: f64,
    #[serde(default = "default_max_zoom_delta")]
    pub max_zoom_delta: f64,
}

impl Default for MapBounds {
    fn default() -> Self {
        Self {
            north: default_north(),
            south: default_south(),
            west: default_west(),
            east: default_east(),
            min_zoom_delta: default_min_zoom_delta(),
            max_zoom_delta: default_max_zoom_delta(),
        }
    }
}

impl MapBounds {
    /// Inclusive range test on both axes.
    #[must_use]
    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        latitude >= self.south
            && latitude <= self.north
            && longitude >= self.west
            && longitude <= self.east
    }

    /// Clamp a requested viewport back inside the rectangle.
    ///
    /// The zoom deltas are clamped into `[min_zoom_delta, max_zoom_delta]`
    /// first; the center is then pushed inside using half the already
    /// clamped spans, latitude before longitude. The function is pure and
    /// idempotent.
    ///
    /// When a clamped delta exceeds the rectangle's own extent both pushes
    /// on that axis fire and the north/east write wins. That is an ordering
    /// dependency, not a centering guarantee.
    #[must_use]
    pub fn constrain(&self, viewport: Viewport) -> Viewport {
        let latitude_delta = viewport
            .latitude_delta
            .clamp(self.min_zoom_delta, self.max_zoom_delta);
        let longitude_delta = viewport
            .longitude_delta
            .clamp(self.min_zoom_delta, self.max_zoom_delta);

        let half_lat = latitude_delta / 2.0;
        let half_lon = longitude_delta / 2.0;

        let mut latitude = viewport.center.latitude;
        let mut longitude = viewport.center.longitude;

        if latitude - half_lat < self.south {
            latitude = self.south + half_lat;
        }
        if latitude + half_lat > self.north {
            latitude = self.north - half_lat;
        }

        if longitude - half_lon < self.west {
            longitude = self.west + half_lon;
        }
        if longitude + half_lon > self.east {
            longitude = self.east - half_lon;
        }

        Viewport {
            center: GeoPoint::new(latitude, longitude),
            latitude_delta,
            longitude_delta,
        }
    }

    /// The camera a host map starts from: the rectangle's center with a
    /// region-wide span.
    #[must_use]
    pub fn default_viewport(&self) -> Viewport {
        Viewport {
            center: GeoPoint::new(
                (self.north + self.south) / 2.0,
                (self.west + self.east) / 2.0,
            ),
            latitude_delta: 3.5,
            longitude_delta: 3.5,
        }
    }
}

/// Great-circle distance between two points in kilometers, by the
/// haversine formula.
#[must_use]
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + a.latitude.to_radians().cos() * b.latitude.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
}
