// Batch job: generate every configured field and persist the labeled dataset
use irrigation_forecast::application::repository::DatasetRepository;
use irrigation_forecast::application::series_generator::SeriesGenerator;
use irrigation_forecast::infrastructure::config::load_app_config;
use irrigation_forecast::infrastructure::csv_dataset_repository::CsvDatasetRepository;
use irrigation_forecast::infrastructure::logging::init_tracing;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = load_app_config()?;
    let generation = &config.generation;
    let start = generation.start_time();

    tracing::info!(
        "Generating {} fields x {} hourly periods from {}",
        generation.fields.len(),
        generation.periods,
        start
    );
    let generator = SeriesGenerator::new(start, generation.periods)?;
    let dataset = generator.generate_fields(&generation.fields, generation.seed);

    CsvDatasetRepository::new(&config.paths.dataset).save(&dataset)?;
    Ok(())
}
