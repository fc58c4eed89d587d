//! Defines the data structures representing weather stations on the
//! dashboard map, including their geographical location. Also includes the
//! implementations necessary for spatial indexing using the `rstar` crate.

use rstar::{PointDistance, RTreeObject, AABB};
use serde::{Deserialize, Serialize};

// --- Data Structures ---

/// A single weather station (forecast area) shown on the dashboard map.
///
/// Built from the data.gov.sg area metadata: every 2-hour forecast area has
/// a name and a label location used to place its marker. The same name keys
/// the textual forecast returned by
/// [`crate::Meteoview::area_forecasts`].
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Station {
    /// The area name (e.g., "Bedok", "Jurong West").
    pub name: String,
    /// Marker position for the station.
    pub location: Location,
}

/// The geographical position of a station marker.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Location {
    /// Latitude in decimal degrees (positive for North, negative for South).
    pub latitude: f64,
    /// Longitude in decimal degrees (positive for East, negative for West).
    pub longitude: f64,
}

// --- R-Tree Implementations ---

/// Implementation required by `rstar` to treat a `Station` as an object
/// within an R-Tree, enabling efficient nearest-station queries.
impl RTreeObject for Station {
    type Envelope = AABB<[f64; 2]>;

    /// A station is conceptually a point, so its envelope is the degenerate
    /// AABB containing only its (latitude, longitude).
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point([self.location.latitude, self.location.longitude])
    }
}

/// Implementation required by `rstar` to calculate distances between
/// stations and query points.
impl PointDistance for Station {
    /// Squared Euclidean distance between the station and a query point
    /// `[latitude, longitude]`. Treating degrees as Cartesian coordinates is
    /// an approximation, but a fine one at city scale; the locator re-ranks
    /// candidates with Haversine distance afterwards.
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.location.latitude - point[0];
        let dy = self.location.longitude - point[1];
        dx * dx + dy * dy
    }
}
