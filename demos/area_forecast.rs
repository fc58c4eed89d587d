use meteoview::{Meteoview, MeteoviewError};

#[tokio::main]
async fn main() -> Result<(), MeteoviewError> {
    let client = Meteoview::new().await?;

    let forecasts = client.area_forecasts().await?;
    for entry in &forecasts {
        println!("{:<24} {}", entry.area, entry.forecast);
    }

    let text = client.forecast_for_area("Bedok").await?;
    println!(
        "\nBedok: {}",
        text.unwrap_or_else(|| "No forecast available".to_string())
    );

    Ok(())
}
