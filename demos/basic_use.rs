use chrono::{Duration, Local};
use meteoview::{LatLon, Meteoview, MeteoviewError};

#[tokio::main]
async fn main() -> Result<(), MeteoviewError> {
    let client = Meteoview::new().await?;

    // The dashboard's history view: the last two days through today.
    let today = Local::now().date_naive();
    let forecast = client
        .forecast()
        .location(LatLon(1.3521, 103.8198))
        .start_date(today - Duration::days(2))
        .end_date(today)
        .call()
        .await?;

    let chart = meteoview::resample_daily(&forecast);
    for (i, date) in chart.dates.iter().enumerate() {
        println!(
            "{date}  max {:>5.1} C  min {:>5.1} C  radiation {:>6.0}  humidity {:>3.0} %",
            chart.temperature_max[i],
            chart.temperature_min[i],
            chart.radiation_sum[i],
            chart.humidity_mean[i],
        );
    }

    Ok(())
}
