use clap::Parser;
use json_adapter::JsonScenarioWriter;
use scenario_core::application::RefreshServiceImpl;
use scenario_core::ports::{ScenarioRepository, ScenarioWriter};
use walkdir_adapter::WalkdirScenarioRepository;

/// CLI tool that rewrites created_at/updated_at on every scenario fixture so
/// the test data always looks fresh (yesterday/today)
#[derive(Parser, Debug)]
#[command(name = "scenario-refresh")]
#[command(about = "Rewrites created_at/updated_at in scenario fixtures to yesterday/today")]
struct Cli {
    /// Directory containing the scenario JSON fixtures, resolved against the
    /// current working directory
    #[arg(long = "scenarios-dir", default_value = "testserver/data/scenarios")]
    scenarios_dir: String,
}

fn main() {
    let cli = Cli::parse();

    // Instantiate concrete implementations of secondary adapters
    let repository: Box<dyn ScenarioRepository> =
        Box::new(WalkdirScenarioRepository::new(cli.scenarios_dir.clone()));

    let writer: Box<dyn ScenarioWriter> = Box::new(JsonScenarioWriter::new());

    // Instantiate the core service with dependency injection
    let service = RefreshServiceImpl::new(repository, writer);

    // Execute the primary port method
    match service.execute_refresh() {
        Ok(_) => {
            println!("Scenario timestamps refreshed in {}", cli.scenarios_dir);
        }
        Err(e) => {
            eprintln!("Error refreshing scenarios: {}", e);
            std::process::exit(1);
        }
    }
}
