use clap::Parser;
use scenario_core::generator::{
    generate_managed_clusters, render_managed_clusters_yaml, SubscriptionList,
};
use scenario_core::ports::Result;
use std::fs;

/// CLI tool that derives ManagedCluster manifests from a generated
/// subscription fixture
#[derive(Parser, Debug)]
#[command(name = "managedcluster-generate")]
#[command(about = "Generates ManagedCluster manifests from a subscription fixture")]
struct Cli {
    /// Subscription fixture to read discovered clusters from
    #[arg(
        long = "input",
        default_value = "testserver/data/scenarios/onek_clusters/subscription_response.json"
    )]
    input: String,

    /// File location to save the managed cluster manifests
    #[arg(
        long = "output",
        default_value = "testserver/data/sample_managed_clusters.yaml"
    )]
    output: String,

    /// The total number of managed clusters that will be created
    #[arg(long = "tot", default_value_t = 1)]
    total: usize,
}

fn run(cli: &Cli) -> Result<()> {
    let raw = fs::read_to_string(&cli.input)?;
    let list: SubscriptionList = serde_json::from_str(&raw)?;

    let clusters = generate_managed_clusters(&list, cli.total)?;
    fs::write(&cli.output, render_managed_clusters_yaml(&clusters)?)?;
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(_) => {
            println!("Wrote {} managed clusters to {}", cli.total, cli.output);
        }
        Err(e) => {
            eprintln!("Error generating managed clusters: {}", e);
            std::process::exit(1);
        }
    }
}
