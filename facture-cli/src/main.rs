use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use facturation_lib::{
  amount_to_words, amount_to_words_or_sentinel, CompanySettings, DocumentSummary, Facture,
  FactureData,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "facture", about = "Totals and amount-in-words for factures and devis")]
struct Cli {
  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Spell an amount in French dirhams.
  Words {
    amount: String,

    /// Print "Invalid number" instead of failing.
    #[arg(long)]
    sentinel: bool,
  },

  /// Recompute item and document totals of a JSON payload.
  Totals {
    file: PathBuf,
  },

  /// Print the text of the document as it would be exported.
  Summary {
    file: PathBuf,

    #[arg(long)]
    settings: Option<PathBuf>,

    #[arg(long)]
    json: bool,
  },
}

fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();

  match cli.command {
    Command::Words { amount, sentinel } => {
      if sentinel {
        println!("{}", amount_to_words_or_sentinel(amount.as_str()));
      } else {
        let words = amount_to_words(amount.as_str())
          .with_context(|| format!("cannot spell amount '{amount}'"))?;
        println!("{words}");
      }
    }

    Command::Totals { file } => {
      let data = read_payload(&file)?.with_computed_totals();
      println!("{}", serde_json::to_string_pretty(&data)?);
    }

    Command::Summary { file, settings, json } => {
      let data = read_payload(&file)?.validated()?.with_computed_totals();
      let facture = Facture::from_data(None, data);

      let settings = match settings {
        Some(path) => read_settings(&path)?,
        None => CompanySettings::default(),
      };

      let summary = DocumentSummary::build(&facture, &settings)?;
      if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
      } else {
        println!("{summary}");
      }
      tracing::info!(file = %facture.export_file_name(), "export name");
    }
  }

  Ok(())
}

fn read_payload(path: &Path) -> anyhow::Result<FactureData> {
  let raw = std::fs::read_to_string(path)
    .with_context(|| format!("failed to read {}", path.display()))?;
  let data: FactureData = serde_json::from_str(&raw)
    .map_err(|e| anyhow::anyhow!("invalid document json in {}: {e}", path.display()))?;

  if data.items.is_empty() {
    anyhow::bail!("{} has no items", path.display());
  }

  Ok(data)
}

fn read_settings(path: &Path) -> anyhow::Result<CompanySettings> {
  let raw = std::fs::read_to_string(path)
    .with_context(|| format!("failed to read {}", path.display()))?;
  Ok(CompanySettings::from_json_str(&raw)?)
}
