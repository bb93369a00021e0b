use anyhow::Context;
use data_loader::Dataset;
use std::path::Path;
use std::time::Instant;

fn main() -> anyhow::Result<()> {
    let data_dir = Path::new("data");

    println!("Loading catalog and similarity matrix...\n");

    let start = Instant::now();
    let dataset = Dataset::load_from_files(data_dir).context("Failed to load dataset")?;
    let elapsed = start.elapsed();

    let movies = dataset.catalog().len();
    let cells = movies * dataset.similarity().dimension();

    println!("=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Movies: {}", movies);
    println!("Matrix cells: {}", cells);
    println!(
        "\nPerformance: {:.0} cells/second",
        cells as f64 / elapsed.as_secs_f64()
    );
    Ok(())
}
