//! System Presence - command line entry point
//!
//! Samples local telemetry and publishes it to Discord Rich Presence until
//! interrupted.

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use system_presence::{
    format_bytes,
    metrics::sampler::{host_info, os_name},
    DiscordClient, HostInfo, MetricsProvider, MetricsSampler, MetricsSnapshot, Monitor,
    MonitorConfig, PresencePublisher, SystemError, DEFAULT_DISCORD_CLIENT_ID,
    DEFAULT_RPC_UPDATE_INTERVAL_SECS,
};
use tracing::{error, info, warn, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "system_presence")]
#[command(about = "System monitor with Discord Rich Presence")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = "Publishes CPU, memory, disk and network usage to Discord Rich Presence")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Discord RPC update interval (seconds)
    #[arg(long, default_value_t = DEFAULT_RPC_UPDATE_INTERVAL_SECS)]
    rpc_update_interval: u64,

    /// Discord Application Client ID
    #[arg(long, default_value = DEFAULT_DISCORD_CLIENT_ID)]
    discord_client_id: String,

    /// Show operating system in Discord presence
    #[arg(long)]
    show_os: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Publish presence until interrupted (default)
    Run,

    /// Take a single metrics snapshot and exit
    Snapshot(SnapshotArgs),

    /// Show host information
    Info,
}

#[derive(Args)]
struct SnapshotArgs {
    /// Output format: json or pretty
    #[arg(short, long, default_value = "pretty")]
    format: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(&cli)?;

    if !sysinfo::IS_SUPPORTED_SYSTEM {
        return Err(SystemError::unsupported(format!(
            "sysinfo cannot read system metrics on {}",
            std::env::consts::OS
        )))
        .context("Required metrics support is missing");
    }

    match &cli.command {
        Some(Commands::Run) | None => run_command(&cli).await?,
        Some(Commands::Snapshot(args)) => snapshot_command(args).await?,
        Some(Commands::Info) => info_command(),
    }

    Ok(())
}

fn log_level(cli: &Cli) -> Level {
    if cli.debug {
        Level::DEBUG
    } else if cli.verbose {
        Level::INFO
    } else {
        Level::WARN
    }
}

/// `RUST_LOG`, when set and valid, replaces the level chosen by the flags.
fn build_subscriber(
    level: Level,
    env_filter: Option<EnvFilter>,
) -> impl tracing::Subscriber + Send + Sync + 'static {
    let filter =
        env_filter.unwrap_or_else(|| EnvFilter::new(level.as_str().to_lowercase()));

    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .finish()
}

fn init_logging(cli: &Cli) -> anyhow::Result<()> {
    let subscriber = build_subscriber(log_level(cli), EnvFilter::try_from_default_env().ok());

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to install tracing subscriber")?;

    Ok(())
}

fn monitor_config(cli: &Cli) -> MonitorConfig {
    MonitorConfig::new(&cli.discord_client_id, cli.rpc_update_interval).with_show_os(cli.show_os)
}

fn client_id_warning(config: &MonitorConfig) -> Option<&'static str> {
    if config.has_client_id() {
        None
    } else {
        Some("Discord RPC not available or client ID not set. Pass --discord-client-id to publish presence")
    }
}

async fn run_command(cli: &Cli) -> anyhow::Result<()> {
    let config = monitor_config(cli);
    config.validate()?;

    if let Some(message) = client_id_warning(&config) {
        warn!("{}", message);
    }

    let host = host_info();
    println!("Monitoring system: {} on {}", host.processor, host.os_name);
    info!(
        "Presence client id {}, update interval {}s, show OS: {}",
        config.client_id, config.update_interval_secs, config.show_os
    );

    let publisher =
        PresencePublisher::new(DiscordClient::new(), rand::rng(), &config, host.os_name);
    let monitor = Monitor::new(MetricsSampler::new(), publisher, &config);

    let stats = monitor.run(shutdown_signal()).await;
    info!(
        "Published {} updates, {} send failures",
        stats.published, stats.send_failures
    );

    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => println!("\nShutting down system monitor..."),
        Err(err) => {
            error!("Failed to listen for interrupt signal: {}", err);
            std::future::pending::<()>().await;
        }
    }
}

async fn snapshot_command(args: &SnapshotArgs) -> anyhow::Result<()> {
    let mut sampler = MetricsSampler::new();
    let snapshot = sampler.collect_snapshot().await;

    match args.format.as_str() {
        "json" => {
            let json = serde_json::to_string_pretty(&snapshot)?;
            println!("{}", json);
        }
        "pretty" => print_pretty_snapshot(&snapshot),
        other => {
            return Err(SystemError::config_error(format!(
                "Unsupported format: {}. Use 'json' or 'pretty'",
                other
            ))
            .into());
        }
    }

    Ok(())
}

fn info_command() {
    print_host_info(&host_info());
}

fn print_host_info(host: &HostInfo) {
    println!("System Information:");
    println!("  OS: {} {}", host.os_name, host.os_version);
    println!("  Kernel: {}", host.kernel_version);
    println!("  Hostname: {}", host.hostname);
    println!("  Architecture: {}", host.architecture);
    println!("  Processor: {}", host.processor);
}

fn print_pretty_snapshot(snapshot: &MetricsSnapshot) {
    println!("System Snapshot ({})", os_name());
    println!("=================");

    match &snapshot.cpu {
        Some(cpu) => {
            println!("CPU:");
            println!("  Usage: {:.1}%", cpu.overall_percent);
            println!("  Cores: {}", cpu.core_percents.len());
            if let Some(freq) = &cpu.frequency {
                println!("  Frequency: {:.0} MHz", freq.current_mhz);
            }
        }
        None => println!("CPU: N/A"),
    }

    match &snapshot.memory {
        Some(mem) => {
            println!("Memory:");
            println!(
                "  Usage: {:.1}% ({}/{})",
                mem.percent,
                format_bytes(mem.used_bytes),
                format_bytes(mem.total_bytes)
            );
            if let Some(swap) = &mem.swap {
                println!(
                    "  Swap: {:.1}% of {}",
                    swap.percent,
                    format_bytes(swap.total_bytes)
                );
            }
        }
        None => println!("Memory: N/A"),
    }

    match &snapshot.disk_io {
        Some(disk) => {
            println!("Disk I/O:");
            println!(
                "  Read: {} ({} ops)",
                format_bytes(disk.read_bytes),
                disk.read_count
            );
            println!(
                "  Written: {} ({} ops)",
                format_bytes(disk.write_bytes),
                disk.write_count
            );
        }
        None => println!("Disk I/O: N/A"),
    }

    match &snapshot.network_io {
        Some(net) => {
            println!("Network I/O:");
            println!(
                "  Sent: {} ({} packets)",
                format_bytes(net.bytes_sent),
                net.packets_sent
            );
            println!(
                "  Received: {} ({} packets)",
                format_bytes(net.bytes_received),
                net.packets_received
            );
            println!("  Errors in/out: {}/{}", net.errors_in, net.errors_out);
        }
        None => println!("Network I/O: N/A"),
    }
}
