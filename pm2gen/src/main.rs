use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;

use pm2gen::config::RuntimeConfig;
use pm2gen::writer::{self, Format};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Runtime config, built-in defaults are used when it does not exist
    #[arg(short, long, default_value = "pm2gen.toml")]
    config: PathBuf,

    /// Output file, stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Emit single-line JSON
    #[arg(long)]
    compact: bool,

    /// Validate the config and exit without writing anything
    #[arg(long)]
    check: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::try_init().unwrap_or_default();
    let args = Args::parse();

    let config = RuntimeConfig::from_toml(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;
    let table = config.table().context("invalid exchange table")?;
    let ecosystem = config.generator().generate(&table);

    if args.check {
        println!(
            "{} ok: {} exchanges, {} apps",
            args.config.display(),
            table.entries().len(),
            ecosystem.apps.len()
        );
        return Ok(());
    }

    writer::write(&ecosystem, args.format, !args.compact, args.output.as_deref())
        .context("writing ecosystem")?;
    Ok(())
}
