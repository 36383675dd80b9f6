use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use glob::Pattern;
use invwire_tools::{
    decode_message_report, encode_inventory_message, format_report_pretty, inspect_message,
    parse_item, InspectReport,
};
use log::Level;

#[derive(Parser)]
#[command(
    name = "invwire-tools",
    version,
    about = "Inspect, decode and encode framed inventory messages"
)]
struct Cli {
    /// Raise the log level (repeat for more detail).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Inspect frame headers and inventory counts.
    Inspect {
        /// Path to a framed message, or a directory of them.
        message_path: PathBuf,
        /// Optional glob filter when inspecting a directory.
        #[arg(long)]
        glob: Option<String>,
        /// Network whose magic the frames must carry.
        #[arg(long, value_enum, default_value_t = NetworkArg::Mainnet)]
        network: NetworkArg,
    },
    /// Decode a framed inventory message.
    Decode {
        /// Path to the framed message.
        message_file: PathBuf,
        /// Network whose magic the frame must carry.
        #[arg(long, value_enum, default_value_t = NetworkArg::Mainnet)]
        network: NetworkArg,
        /// Output format.
        #[arg(long, value_enum, default_value_t = DecodeFormat::Json)]
        format: DecodeFormat,
    },
    /// Build and frame an inventory message.
    Encode {
        /// Message command: inv, getdata or notfound.
        #[arg(long)]
        command: String,
        /// Inventory item as TYPE:HASH; repeat for more items.
        #[arg(long = "item")]
        items: Vec<String>,
        /// Network magic to frame with.
        #[arg(long, value_enum, default_value_t = NetworkArg::Mainnet)]
        network: NetworkArg,
        /// Output file for the framed bytes.
        #[arg(long)]
        out: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum NetworkArg {
    Mainnet,
    Testnet3,
    Regtest,
    Signet,
}

impl From<NetworkArg> for wire::Network {
    fn from(arg: NetworkArg) -> Self {
        match arg {
            NetworkArg::Mainnet => Self::Mainnet,
            NetworkArg::Testnet3 => Self::Testnet3,
            NetworkArg::Regtest => Self::Regtest,
            NetworkArg::Signet => Self::Signet,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DecodeFormat {
    Json,
    Pretty,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let level = match cli.verbose {
        0 => Level::Warn,
        1 => Level::Info,
        2 => Level::Debug,
        _ => Level::Trace,
    };
    simple_logger::init_with_level(level).context("initialize logger")?;

    let pver = wire::PROTOCOL_VERSION;
    let limits = wire::Limits::default();

    match cli.command {
        Command::Inspect {
            message_path,
            glob,
            network,
        } => {
            let network = network.into();
            if message_path.is_dir() {
                for entry in collect_message_entries(&message_path, glob.as_deref())? {
                    let bytes = fs::read(&entry.path)
                        .with_context(|| format!("read message {}", entry.path.display()))?;
                    println!("== {} ({} bytes) ==", entry.path.display(), entry.size);
                    match inspect_message(&bytes, network, &limits, pver) {
                        Ok(report) => print_inspect_report(&report),
                        Err(err) => println!("error: {err:#}"),
                    }
                }
            } else {
                let bytes = fs::read(&message_path)
                    .with_context(|| format!("read message {}", message_path.display()))?;
                let report = inspect_message(&bytes, network, &limits, pver)?;
                print_inspect_report(&report);
            }
        }
        Command::Decode {
            message_file,
            network,
            format,
        } => {
            let bytes = fs::read(&message_file)
                .with_context(|| format!("read message {}", message_file.display()))?;
            let report = decode_message_report(&bytes, network.into(), &limits, pver)?;
            match format {
                DecodeFormat::Json => {
                    let json = serde_json::to_string_pretty(&report).context("serialize json")?;
                    println!("{json}");
                }
                DecodeFormat::Pretty => {
                    print!("{}", format_report_pretty(&report));
                }
            }
        }
        Command::Encode {
            command,
            items,
            network,
            out,
        } => {
            let items = items
                .iter()
                .map(|spec| parse_item(spec))
                .collect::<Result<Vec<_>>>()?;
            let bytes = encode_inventory_message(&command, &items, network.into(), pver)?;
            fs::write(&out, &bytes).with_context(|| format!("write {}", out.display()))?;
            println!("wrote {} bytes to {}", bytes.len(), out.display());
        }
    }
    Ok(())
}

struct MessageEntry {
    path: PathBuf,
    size: u64,
}

fn collect_message_entries(dir: &Path, glob: Option<&str>) -> Result<Vec<MessageEntry>> {
    let mut entries = Vec::new();
    let pattern = match glob {
        Some(value) => Some(Pattern::new(value).context("invalid glob pattern")?),
        None => None,
    };

    for entry in fs::read_dir(dir).with_context(|| format!("read dir {}", dir.display()))? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if let Some(pattern) = &pattern {
            let matches_path = pattern.matches_path(&path);
            let matches_name = path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| pattern.matches(name));
            if !matches_path && !matches_name {
                continue;
            }
        }
        let size = entry.metadata()?.len();
        entries.push(MessageEntry { path, size });
    }
    entries.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(entries)
}

fn print_inspect_report(report: &InspectReport) {
    println!(
        "network: {} command: {} checksum: {}",
        report.network, report.command, report.checksum
    );
    println!("payload_len: {} bytes", report.payload_len);
    match &report.inventory {
        Some(summary) => {
            println!("inventory: {} vectors", summary.count);
            for (inv_type, count) in &summary.by_type {
                println!("  {inv_type}: {count}");
            }
        }
        None => println!("inventory: n/a"),
    }
}
