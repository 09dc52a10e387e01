use std::path::{Path, PathBuf};

mod terminal;

use anyhow::Context;
use clap::{ArgAction, ValueEnum};
use docdeps::{
    Config, DependentFilter, DisplayRecord, Index, Qualifier, ReferenceKind, domain, load_documents,
};
use tracing::instrument;

use terminal::Colorize;

/// Configuration file read from the working directory when `--config` is not
/// given.
const DEFAULT_CONFIG: &str = "docdeps.toml";

#[derive(Debug, clap::Parser)]
#[command(
    version,
    about = "List the transitive reference dependencies of a document"
)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Path to a TOML configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Path to the JSON document collection (overrides the configuration)
    #[arg(short, long, value_name = "PATH")]
    documents: Option<PathBuf>,

    /// Follow normative references (takes precedence over --bibliographic)
    #[arg(short, long)]
    normative: bool,

    /// Follow bibliographic references
    #[arg(short, long)]
    bibliographic: bool,

    /// List the documents that depend on the given document instead
    #[arg(long)]
    dependents: bool,

    /// Only walk through dependents published by this group
    #[arg(long, value_name = "GROUP", requires = "dependents")]
    group: Option<String>,

    /// Ignore superseded dependents
    #[arg(long, requires = "dependents")]
    skip_superseded: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,

    /// Identifier of the document to start from
    doc_id: String,
}

/// Supported output formats.
#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum, Default)]
enum OutputFormat {
    /// One line per document
    #[default]
    Text,
    /// A JSON array of records
    Json,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        let config = self.load_config()?;
        let path = self
            .documents
            .clone()
            .unwrap_or_else(|| config.documents().to_path_buf());
        let kind = self.kind(&config);

        let documents = load_documents(&path)?;
        let index = Index::build(documents)
            .with_context(|| format!("invalid document collection {}", path.display()))?;

        let records = self.query(&index, kind)?;
        self.output.print(&records)
    }

    /// Normative wins when both kinds are requested.
    const fn kind(&self, config: &Config) -> ReferenceKind {
        if self.normative {
            ReferenceKind::Normative
        } else if self.bibliographic {
            ReferenceKind::Bibliographic
        } else {
            config.default_kind()
        }
    }

    #[instrument(level = "debug", skip(self, index))]
    fn query<'a>(
        &self,
        index: &'a Index,
        kind: ReferenceKind,
    ) -> anyhow::Result<Vec<DisplayRecord<'a>>> {
        let ids = if self.dependents {
            let filter = DependentFilter {
                group: self.group.clone(),
                skip_superseded: self.skip_superseded,
            };
            domain::dependents(index, &self.doc_id, kind, &filter)?
        } else {
            domain::dependencies(index, &self.doc_id, kind)?
        };

        Ok(domain::annotate(index, ids)?)
    }

    fn load_config(&self) -> anyhow::Result<Config> {
        if let Some(path) = &self.config {
            return Config::load(path)
                .map_err(anyhow::Error::msg)
                .with_context(|| format!("failed to load {}", path.display()));
        }

        Ok(Config::load(Path::new(DEFAULT_CONFIG)).unwrap_or_else(|e| {
            tracing::debug!("Failed to load config: {e}");
            Config::default()
        }))
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        // stdout carries the result lines
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

impl OutputFormat {
    fn print(self, records: &[DisplayRecord<'_>]) -> anyhow::Result<()> {
        match self {
            Self::Text => {
                for record in records {
                    println!("{}", text_line(record));
                }
            }
            Self::Json => println!("{}", serde_json::to_string_pretty(records)?),
        }
        Ok(())
    }
}

fn text_line(record: &DisplayRecord<'_>) -> String {
    let plain = DisplayRecord {
        qualifier: None,
        ..*record
    };
    match record.qualifier {
        None => plain.to_string(),
        Some(qualifier @ Qualifier::Superseded) => {
            format!("{plain} {}", qualifier.to_string().warning())
        }
        Some(qualifier @ Qualifier::Withdrawn) => {
            format!("{plain} {}", qualifier.to_string().dim())
        }
    }
}
