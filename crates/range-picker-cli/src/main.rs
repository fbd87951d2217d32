use std::fs;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Number;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use range_picker::guard::{decide, KeyStroke};
use range_picker::picker::{Picker, PickerConfig};
use range_picker::reconcile::PickerEvent;
use range_picker::unit::{available_units, verbose_label, Unit};

#[derive(Parser)]
#[command(
    name = "range-picker",
    version,
    about = "Drive the range-picker model from the command line"
)]
struct Cli {
    /// Enable debug logging (stderr)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the units a picker offers, with their labels
    Units {
        /// Comma-separated allow-list (default: full catalog)
        #[arg(long, value_delimiter = ',')]
        units: Option<Vec<Unit>>,
    },
    /// Print the display label of a unit
    Label {
        /// Unit tag, e.g. date-from-to
        unit: Unit,
    },
    /// Print whether the integer guard allows or cancels a keydown
    Key {
        /// KeyboardEvent.key value, e.g. "7", "Backspace", "e"
        key: String,
        /// Ctrl was held
        #[arg(long)]
        ctrl: bool,
    },
    /// Replay a JSON-lines event script and print every emitted model
    Replay {
        /// Event script (reads stdin if omitted)
        script: Option<PathBuf>,
        /// Picker config file (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Override minDuration
        #[arg(long, allow_hyphen_values = true)]
        min: Option<Number>,
        /// Override maxDuration
        #[arg(long, allow_hyphen_values = true)]
        max: Option<Number>,
        /// Override unitsOptions (comma-separated)
        #[arg(long, value_delimiter = ',')]
        units: Option<Vec<Unit>>,
    },
}

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Units { units } => {
            for unit in available_units(units.as_deref()) {
                writeln!(out, "{}\t{}", unit, verbose_label(unit))?;
            }
        }
        Commands::Label { unit } => {
            writeln!(out, "{}", verbose_label(unit))?;
        }
        Commands::Key { key, ctrl } => {
            let stroke = KeyStroke { key, ctrl };
            writeln!(out, "{}", decide(&stroke).as_str())?;
        }
        Commands::Replay {
            script,
            config,
            min,
            max,
            units,
        } => {
            let mut config = load_config(config.as_ref())?;
            if min.is_some() {
                config.min_duration = min;
            }
            if max.is_some() {
                config.max_duration = max;
            }
            if units.is_some() {
                config.units_options = units;
            }
            let reader = open_script(script.as_ref())?;
            replay(config, reader, &mut out)?;
        }
    }

    Ok(())
}

fn load_config(path: Option<&PathBuf>) -> Result<PickerConfig> {
    let Some(path) = path else {
        return Ok(PickerConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    PickerConfig::from_json_str(&text)
        .with_context(|| format!("Invalid config {}", path.display()))
}

fn open_script(path: Option<&PathBuf>) -> Result<Box<dyn BufRead>> {
    match path {
        Some(path) => {
            let file = fs::File::open(path)
                .with_context(|| format!("Failed to open script {}", path.display()))?;
            Ok(Box::new(BufReader::new(file)))
        }
        None => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .context("Failed to read stdin")?;
            Ok(Box::new(io::Cursor::new(input)))
        }
    }
}

/// Mount a picker, feed it every event in `script`, and write each emission
/// as one JSON line. Blank lines and `#` comments are skipped.
fn replay(config: PickerConfig, script: impl BufRead, out: &mut impl Write) -> Result<()> {
    let picker = Picker::new(config);
    let synced = picker.mount();
    let mut model = synced.model;
    if let Some(emitted) = synced.emission {
        writeln!(out, "{}", serde_json::to_string(&emitted)?)?;
    }

    for (index, line) in script.lines().enumerate() {
        let line_no = index + 1;
        let line = line.with_context(|| format!("Failed to read line {line_no}"))?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let value: serde_json::Value = serde_json::from_str(trimmed)
            .with_context(|| format!("Line {line_no}: not valid JSON"))?;
        let event =
            PickerEvent::from_json(&value).with_context(|| format!("Line {line_no}: bad event"))?;
        tracing::debug!(line = line_no, ?event, "replaying event");
        model = picker.handle(&model, event);
        writeln!(out, "{}", serde_json::to_string(&model)?)?;
    }

    Ok(())
}
