use crate::stations::error::LocateStationError;
use crate::types::station::{Location, Station};
use bincode::config::{Configuration, Fixint, LittleEndian};
use haversine::{distance, Location as HaversineLocation, Units};
use log::{info, warn};
use ordered_float::OrderedFloat;
use reqwest::Client;
use rstar::RTree;
use serde::Deserialize;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tokio::task;

const DATA_URL: &str = "https://api.data.gov.sg/v1/environment/2-hour-weather-forecast";
const BINCODE_CACHE_FILE_NAME: &str = "stations.bin";
const BINCODE_CONFIG: Configuration<LittleEndian, Fixint> =
    bincode::config::standard().with_fixed_int_encoding();

/// Wire format of the station metadata inside the 2-hour forecast response.
#[derive(Debug, Deserialize)]
struct AreaMetadataResponse {
    #[serde(default)]
    area_metadata: Vec<AreaMetadata>,
}

#[derive(Debug, Deserialize)]
struct AreaMetadata {
    name: String,
    label_location: LabelLocation,
}

#[derive(Debug, Deserialize)]
struct LabelLocation {
    latitude: f64,
    longitude: f64,
}

/// Loads the station registry (from cache or the live API) and answers
/// nearest-station queries through an R-tree index.
#[derive(Debug, Clone)]
pub struct StationLocator {
    rtree: RTree<Station>,
    stations: Vec<Station>,
}

impl StationLocator {
    pub async fn new(cache_dir: &Path) -> Result<Self, LocateStationError> {
        let cache_file = cache_dir.join(BINCODE_CACHE_FILE_NAME);

        let stations: Vec<Station>;

        if cache_file.exists() {
            let path_clone = cache_file.clone();
            stations = task::spawn_blocking(move || Self::get_cached_stations(&path_clone))
                .await??;
            info!("Loaded {} stations from cache", stations.len());
        } else {
            warn!("Station cache not found. Fetching from {}", DATA_URL);
            stations = Self::fetch_stations().await?;
            Self::cache_stations(stations.clone(), &cache_file).await?;
        }

        let rtree = RTree::bulk_load(stations.clone());
        Ok(StationLocator { rtree, stations })
    }

    /// Builds a locator from an already materialized registry.
    #[cfg(test)]
    pub(crate) fn from_stations(stations: Vec<Station>) -> Self {
        let rtree = RTree::bulk_load(stations.clone());
        StationLocator { rtree, stations }
    }

    fn get_cached_stations(cache_path: &Path) -> Result<Vec<Station>, LocateStationError> {
        let bytes = std::fs::read(cache_path)
            .map_err(|e| LocateStationError::CacheRead(cache_path.to_path_buf(), e))?;
        let (decoded_stations, _) =
            bincode::serde::decode_from_slice::<Vec<Station>, _>(&bytes, BINCODE_CONFIG).map_err(
                |e| LocateStationError::CacheDecode(cache_path.to_path_buf(), Box::from(e)),
            )?;
        Ok(decoded_stations)
    }

    async fn fetch_stations() -> Result<Vec<Station>, LocateStationError> {
        let client = Client::new();
        let response = client
            .get(DATA_URL)
            .send()
            .await
            .map_err(|e| LocateStationError::NetworkRequest(DATA_URL.to_string(), e))?;
        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                if let Some(status) = e.status() {
                    return Err(LocateStationError::HttpStatus {
                        url: DATA_URL.to_string(),
                        status,
                        source: e,
                    });
                } else {
                    return Err(LocateStationError::NetworkRequest(DATA_URL.to_string(), e));
                }
            }
        };
        let body = response
            .bytes()
            .await
            .map_err(|e| LocateStationError::ResponseBody(DATA_URL.to_string(), e))?;
        let metadata = serde_json::from_slice::<AreaMetadataResponse>(&body)?;
        let stations = metadata
            .area_metadata
            .into_iter()
            .map(|area| Station {
                name: area.name,
                location: Location {
                    latitude: area.label_location.latitude,
                    longitude: area.label_location.longitude,
                },
            })
            .collect::<Vec<_>>();
        info!("Parsed {} stations from area metadata", stations.len());
        Ok(stations)
    }

    async fn cache_stations(
        stations: Vec<Station>,
        cache_path: &Path,
    ) -> Result<(), LocateStationError> {
        let path = cache_path.to_path_buf();
        task::spawn_blocking(move || {
            let bytes = bincode::serde::encode_to_vec(stations, BINCODE_CONFIG)
                .map_err(|e| LocateStationError::CacheEncode(Box::new(e)))?;
            let dir = path.parent().unwrap_or_else(|| Path::new("."));
            // Write-then-rename so a crash never leaves a truncated cache.
            let mut temp = NamedTempFile::new_in(dir)
                .map_err(|e| LocateStationError::CacheWrite(path.clone(), e))?;
            temp.write_all(&bytes)
                .map_err(|e| LocateStationError::CacheWrite(path.clone(), e))?;
            temp.persist(&path)
                .map_err(|e| LocateStationError::CacheWrite(path.clone(), e.error))?;
            info!("Wrote station cache ({} bytes) to {}", bytes.len(), path.display());
            Ok::<(), LocateStationError>(())
        })
        .await??;
        Ok(())
    }

    /// Every station in the registry, in registry order. The dashboard map
    /// plots all of these as markers.
    pub fn all(&self) -> &[Station] {
        &self.stations
    }

    /// Finds up to `n_results` stations within `max_distance_km` of a point,
    /// closest first.
    ///
    /// The R-tree pre-selects candidates by planar distance; Haversine
    /// distance then does the final filter and ordering.
    pub fn query(
        &self,
        latitude: f64,
        longitude: f64,
        n_results: usize,
        max_distance_km: f64,
    ) -> Vec<(Station, f64)> {
        if n_results == 0 {
            return vec![];
        }

        // Take slightly more than needed to account for the difference
        // between planar R-tree distance and Haversine distance.
        let candidate_limit = (n_results * 2).max(20);

        let mut stations_with_dist: Vec<(Station, f64)> = self
            .rtree
            .nearest_neighbor_iter(&[latitude, longitude])
            .take(candidate_limit)
            .filter_map(|station| {
                let dist_km = distance(
                    HaversineLocation {
                        latitude,
                        longitude,
                    },
                    HaversineLocation {
                        latitude: station.location.latitude,
                        longitude: station.location.longitude,
                    },
                    Units::Kilometers,
                );
                if dist_km <= max_distance_km {
                    Some((station.to_owned(), dist_km))
                } else {
                    None
                }
            })
            .collect();

        stations_with_dist.sort_by_key(|(_, dist_km)| OrderedFloat(*dist_km));
        stations_with_dist.truncate(n_results);
        stations_with_dist
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn station(name: &str, latitude: f64, longitude: f64) -> Station {
        Station {
            name: name.to_string(),
            location: Location {
                latitude,
                longitude,
            },
        }
    }

    fn singapore_registry() -> StationLocator {
        StationLocator::from_stations(vec![
            station("Ang Mo Kio", 1.375, 103.839),
            station("Bedok", 1.321, 103.924),
            station("Jurong West", 1.340, 103.705),
            station("Sentosa", 1.250, 103.830),
            station("Woodlands", 1.432, 103.786),
        ])
    }

    #[test]
    fn query_orders_by_distance() {
        let locator = singapore_registry();
        // City hall area: Sentosa is closer than Woodlands.
        let results = locator.query(1.293, 103.852, 5, 50.0);
        assert_eq!(results.len(), 5);
        let names: Vec<&str> = results.iter().map(|(s, _)| s.name.as_str()).collect();
        assert_eq!(names[0], "Sentosa");
        for pair in results.windows(2) {
            assert!(pair[0].1 <= pair[1].1);
        }
    }

    #[test]
    fn query_respects_limit_and_radius() {
        let locator = singapore_registry();
        assert_eq!(locator.query(1.293, 103.852, 2, 50.0).len(), 2);
        // 100 m radius around an arbitrary point catches nothing.
        assert!(locator.query(1.293, 103.852, 5, 0.1).is_empty());
        assert!(locator.query(1.293, 103.852, 0, 50.0).is_empty());
    }

    #[test]
    fn all_preserves_registry_order() {
        let locator = singapore_registry();
        assert_eq!(locator.all().len(), 5);
        assert_eq!(locator.all()[0].name, "Ang Mo Kio");
    }

    #[test]
    fn parses_area_metadata_wire_format() {
        let body = r#"{
            "area_metadata": [
                {
                    "name": "Bedok",
                    "label_location": { "latitude": 1.321, "longitude": 103.924 }
                }
            ],
            "items": []
        }"#;
        let parsed: AreaMetadataResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.area_metadata.len(), 1);
        assert_eq!(parsed.area_metadata[0].name, "Bedok");
        assert_eq!(parsed.area_metadata[0].label_location.latitude, 1.321);
    }

    #[tokio::test]
    async fn caches_and_reloads_registry() -> Result<(), LocateStationError> {
        let dir = tempfile::tempdir().expect("tempdir");
        let cache_file = dir.path().join(BINCODE_CACHE_FILE_NAME);
        let stations = vec![station("Bedok", 1.321, 103.924)];

        StationLocator::cache_stations(stations.clone(), &cache_file).await?;
        let reloaded = task::spawn_blocking({
            let cache_file = cache_file.clone();
            move || StationLocator::get_cached_stations(&cache_file)
        })
        .await??;

        assert_eq!(reloaded, stations);
        Ok(())
    }
}
