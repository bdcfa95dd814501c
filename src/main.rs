use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use lsblk_tree::{
    DeviceRecord, DeviceTree, FileSource, ReaderSource, format_iec,
    largest_unmounted_removable_partition, load_tree,
    mounted_removable_partition_with_most_available_space, mounted_removable_partitions,
    unmounted_removable_partitions,
};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Query {
    /// Every record at every depth
    All,
    /// Unmounted partitions on USB devices
    Unmounted,
    /// Mounted partitions on USB devices
    Mounted,
    /// Largest unmounted partition on a USB device
    Largest,
    /// Mounted USB partition with the most free space
    MostAvailable,
}

#[derive(Parser)]
#[command(name = "lsblk-tree")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Query a saved `lsblk -pabOJ` snapshot")]
struct Cli {
    /// Snapshot file; reads stdin when omitted
    #[arg(short, long)]
    input: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value_t = Query::All)]
    query: Query,

    /// Show sizes in binary (KiB, MiB, ...) units
    #[arg(long)]
    iec: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let tree = match &cli.input {
        Some(path) => load_tree(FileSource::new(path))
            .with_context(|| format!("Failed to load snapshot {}", path.display()))?,
        None => load_tree(ReaderSource::new(io::stdin().lock()))
            .context("Failed to load snapshot from stdin")?,
    };

    for record in run_query(&tree, cli.query) {
        print_record(record, cli.iec);
    }
    Ok(())
}

fn run_query(tree: &DeviceTree, query: Query) -> Vec<&DeviceRecord> {
    match query {
        Query::All => tree.walk().collect(),
        Query::Unmounted => unmounted_removable_partitions(tree),
        Query::Mounted => mounted_removable_partitions(tree),
        Query::Largest => largest_unmounted_removable_partition(tree).into_iter().collect(),
        Query::MostAvailable => mounted_removable_partition_with_most_available_space(tree)
            .into_iter()
            .collect(),
    }
}

fn print_record(record: &DeviceRecord, iec: bool) {
    let size = if iec {
        format_iec(record.size.exact_value())
    } else {
        record.size.human_readable().to_string()
    };
    println!("{:<24} {:>10} {}", record.path, size, record.mountpoint);
}
