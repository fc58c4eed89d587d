use meteoview::{LatLon, Meteoview, MeteoviewError};

#[tokio::main]
async fn main() -> Result<(), MeteoviewError> {
    let client = Meteoview::new().await?;

    // The full marker layer, as the map component would plot it.
    for station in client.stations() {
        println!(
            "{:<24} ({:.4}, {:.4})",
            station.name, station.location.latitude, station.location.longitude,
        );
    }

    let marina_bay = LatLon(1.2806, 103.8539);
    let nearest = client.nearest_station().location(marina_bay).call()?;
    println!("\nNearest station to Marina Bay: {}", nearest.name);

    Ok(())
}
