use clap::Parser;
use pipegraph::prelude::*;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Inspect a pipeline graph's derived ports and reference consistency, and
/// optionally submit it to the validation service.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the pipeline JSON file (`{"nodes": [...], "edges": [...]}`)
    pipeline_path: String,

    /// Submit the snapshot to the validation service after inspecting it
    #[arg(short, long)]
    submit: bool,

    /// Validation service endpoint (defaults to $PIPEGRAPH_ENDPOINT or the local backend)
    #[arg(long)]
    endpoint: Option<String>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Refuse pipelines where two nodes share a display name
    #[arg(long)]
    strict_aliases: bool,

    /// Print debug logs
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let store = load_store(&cli);
    print_inspection(&store);

    if cli.submit {
        run_submit(&cli, &store);
    }
}

fn run_submit(cli: &Cli, store: &GraphStore) {
    let mut config = SubmitConfig::from_env();
    if let Some(endpoint) = &cli.endpoint {
        config = config.with_endpoint(endpoint.clone());
    }
    if let Some(secs) = cli.timeout {
        config = config.with_timeout(Duration::from_secs(secs));
    }
    let validator =
        HttpValidator::new(config).unwrap_or_else(|e| exit_with_error(&e.to_string()));

    let rt = tokio::runtime::Runtime::new()
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to start async runtime: {}", e)));
    rt.block_on(run_submission(&validator, &store.snapshot()));
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_store(cli: &Cli) -> GraphStore {
    let snapshot = GraphSnapshot::from_file(&cli.pipeline_path).unwrap_or_else(|e| {
        exit_with_error(&format!("Failed to load pipeline: {}", e))
    });
    let policy = if cli.strict_aliases {
        AliasPolicy::Reject
    } else {
        AliasPolicy::Allow
    };
    GraphStore::builder()
        .alias_policy(policy)
        .load(snapshot)
        .unwrap_or_else(|e| exit_with_error(&format!("Pipeline is inconsistent: {}", e)))
}

fn print_inspection(store: &GraphStore) {
    println!(
        "Loaded {} nodes and {} edges.",
        store.nodes().len(),
        store.edges().len()
    );

    for node in store.nodes() {
        let alias = store
            .aliases()
            .alias_of(&node.id)
            .map(|a| format!(" \"{}\"", a))
            .unwrap_or_default();
        println!("\n[{}] {}{}", node.kind, node.id, alias);

        if let Some(ports) = store.ports(&node.id) {
            if !ports.is_empty() {
                for line in ReportFormatter::format_ports(ports).lines() {
                    println!("  {}", line);
                }
            }
        }
        if node.kind.template_field().is_some() {
            if let Ok(report) = store.validate(&node.id) {
                for line in ReportFormatter::format_report(&report).lines() {
                    println!("  -> {}", line);
                }
            }
        }
    }

    let dangling = store.dangling_edges();
    if !dangling.is_empty() {
        println!("\nEdges to ports that no longer exist:");
        for edge in dangling {
            println!("  {}", edge);
        }
    }
    let ambiguous = store.aliases().ambiguous_aliases();
    if !ambiguous.is_empty() {
        println!("\nDisplay names shared by several nodes: {}", ambiguous.join(", "));
    }
}

async fn run_submission<V: PipelineValidator>(validator: &V, snapshot: &GraphSnapshot) {
    println!("\nSubmitting pipeline...");
    match validator.submit(snapshot).await {
        Ok(verdict) => {
            println!("{}", ReportFormatter::format_verdict(&verdict));
            if !verdict.matches(snapshot) {
                println!("Warning: the service counted a different number of nodes or edges.");
            }
        }
        Err(e) => exit_with_error(&e.to_string()),
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
