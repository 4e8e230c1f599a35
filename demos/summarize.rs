use chrono::Duration;
use hawaii_climate::{default_dataset_path, AggregationEngine, DatasetSource, ObservationStore};
use std::env;
use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    configure_polars_display();
    let path = match env::args().nth(1) {
        Some(arg) => PathBuf::from(arg),
        None => default_dataset_path()?,
    };
    let store = ObservationStore::new(DatasetSource::detect(&path)?.load()?)?;
    let engine = AggregationEngine::new(&store);
    let latest = store.max_date()?;

    println!("{} observations, latest {latest}", store.len());
    for (station, count) in engine.most_active_stations()?.into_iter().take(3) {
        println!("  {station}: {count} observations");
    }

    let month_ago = latest - Duration::days(30);
    let stats = engine.temperature_stats(month_ago).end(latest).call()?;
    println!(
        "Last 30 days: min {:.1}, max {:.1}, avg {:.1}",
        stats.min, stats.max, stats.avg
    );

    let recent = store
        .observations_in_range()
        .from(latest - Duration::days(6))
        .call()
        .frame
        .collect()?;
    println!("{recent}");

    Ok(())
}

fn configure_polars_display() {
    // show 20 rows
    env::set_var("POLARS_FMT_MAX_ROWS", "20");
}
