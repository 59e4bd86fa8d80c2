use clap::Parser;
use json_adapter::JsonScenarioWriter;
use scenario_core::generator::{
    generate_subscriptions, page_filename, paginate_subscriptions, PAGE_SIZE,
};
use scenario_core::ports::Result;
use serde_json::Value;
use std::path::Path;

/// CLI tool that regenerates the large randomized subscription fixture,
/// split into pages of 1000 records
#[derive(Parser, Debug)]
#[command(name = "scenario-generate")]
#[command(about = "Generates randomized subscription_response.json fixture pages")]
struct Cli {
    /// Directory to save output in, replacing its previous contents.
    /// Example: 'testserver/data/scenarios/onek_clusters'. With no value the
    /// pages are printed to stdout instead.
    #[arg(long = "output", default_value = "")]
    output: String,

    /// The total number of clusters that will be created
    #[arg(long = "total", default_value_t = 1)]
    total: usize,
}

fn run(cli: &Cli) -> Result<()> {
    let subscriptions = generate_subscriptions(cli.total);
    let pages = paginate_subscriptions(subscriptions, PAGE_SIZE);

    if cli.output.is_empty() {
        print!("{}", serde_json::to_string_pretty(&pages)?);
        return Ok(());
    }

    let documents = pages
        .iter()
        .enumerate()
        .map(|(index, page)| Ok((page_filename(index), serde_json::to_value(page)?)))
        .collect::<Result<Vec<(String, Value)>>>()?;

    let written = JsonScenarioWriter::new().write_folder(Path::new(&cli.output), &documents)?;
    for path in &written {
        println!("Wrote to file {}", path.display());
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("Error generating fixture: {}", e);
        std::process::exit(1);
    }
}
