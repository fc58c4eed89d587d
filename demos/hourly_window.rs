use chrono::Local;
use meteoview::{hourly_window, LatLon, Meteoview, MeteoviewError, DEFAULT_WINDOW_HOURS};

#[tokio::main]
async fn main() -> Result<(), MeteoviewError> {
    let client = Meteoview::new().await?;

    let forecast = client
        .forecast()
        .location(LatLon(1.3521, 103.8198))
        .forecast_days(4)
        .call()
        .await?;

    // Next 72 hours, anchored to the current local hour.
    let now = Local::now().naive_local();
    let window = hourly_window(&forecast, now, DEFAULT_WINDOW_HOURS);

    println!("{} hours starting at the current hour:", window.time.len());
    for (i, time) in window.time.iter().enumerate() {
        println!(
            "{time}  {:>5.1} C  radiation {:>6.1}",
            window.temperature[i], window.direct_radiation[i],
        );
    }

    Ok(())
}
