use clap::Parser;
use dtn_router_domain::{CliOverrides, Config};
use dtn_router_infrastructure::simulation::{SimReport, World};
use tracing::info;

mod bootstrap;

#[derive(Parser)]
#[command(name = "dtn-router")]
#[command(version)]
#[command(about = "Contact-frequency epidemic routing for delay tolerant networks")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Number of ticks to simulate
    #[arg(short = 't', long)]
    ticks: Option<u64>,

    /// Seed for contacts, traffic and the random send queue
    #[arg(short = 's', long)]
    seed: Option<u64>,

    /// Send queue ordering (random, fifo, lfu)
    #[arg(long, value_name = "MODE")]
    queue_mode: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_default_config: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.print_default_config {
        print!("{}", Config::default().to_toml()?);
        return Ok(());
    }

    let cli_overrides = CliOverrides {
        ticks: cli.ticks,
        seed: cli.seed,
        send_queue_mode: cli.queue_mode.clone(),
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;
    bootstrap::init_logging(&config.logging);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        ticks = config.simulation.ticks,
        seed = config.simulation.seed,
        "Starting DTN router simulation"
    );

    let mut world = World::new(&config)?;
    let report = world.run(config.simulation.ticks);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&report);
    }

    Ok(())
}

fn print_summary(report: &SimReport) {
    let m = &report.metrics;

    println!("=== Simulation ({} ticks) ===", report.ticks);
    println!("Created:        {}", m.created);
    println!("Delivered:      {}", m.delivered);
    println!("Relayed:        {}", m.relayed);
    println!("Aborted:        {}", m.aborted);
    println!("Dropped:        {}", m.dropped);
    println!("Expired:        {}", m.expired);
    println!("Rejected:       {}", m.rejected);
    println!("Delivery ratio: {:.3}", report.delivery_ratio);
    println!("Overhead ratio: {:.3}", report.overhead_ratio);
    println!("Latency (avg):  {:.1} ticks", report.latency_avg);
    println!("Hops (avg):     {:.2}", report.hop_count_avg);

    println!("\n=== Router ticks ===");
    println!("Idle:           {}", m.ticks_idle);
    println!("Delivered:      {}", m.ticks_delivered);
    println!("Flooded:        {}", m.ticks_flooded);
    println!("Forwarded:      {}", m.ticks_forwarded);
    println!("No action:      {}", m.ticks_no_action);

    println!("\n=== Contact caches ===");
    for host in &report.hosts {
        let entries: Vec<String> = host
            .cache
            .iter()
            .map(|(node, count)| format!("{}:{}", node, count))
            .collect();
        println!(
            "{:>4} buffered={:<3} [{}]",
            host.node.to_string(),
            host.buffered,
            entries.join(" ")
        );
    }
}
