use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tabdoc::config::DocumenterConfig;
use tabdoc::interchange::is_supported;
use tabdoc::report::{ReportFormat, output_path};
use tabdoc::WorkbookDocumentation;

#[derive(Parser)]
#[command(about = "Document the data sources, calculations, worksheets, and dashboards of Tableau files.")]
struct Args {
    /// A .twb/.twbx/.tds/.tdsx file, or a directory of them.
    input: Option<PathBuf>,

    /// Directory for the generated reports (default: next to each input).
    #[arg(long, short)]
    output_dir: Option<PathBuf>,

    /// JSON configuration file.
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Report format.
    #[arg(long, value_enum)]
    format: Option<ReportFormat>,

    /// Suffix appended to each input's file stem.
    #[arg(long)]
    suffix: Option<String>,

    /// Cap on formula expansion passes (default: number of calculations + 1).
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    max_resolve_passes: Option<u32>,
}

impl Args {
    /// Flags win over the configuration file.
    fn into_config(self) -> Result<DocumenterConfig> {
        let mut config = match &self.config {
            Some(path) => DocumenterConfig::read_from_file(path)?,
            None => DocumenterConfig::default(),
        };
        if self.input.is_some() {
            config.input = self.input;
        }
        if self.output_dir.is_some() {
            config.output_dir = self.output_dir;
        }
        if let Some(format) = self.format {
            config.format = format;
        }
        if self.suffix.is_some() {
            config.output_suffix = self.suffix;
        }
        if let Some(passes) = self.max_resolve_passes {
            config.max_resolve_passes = Some(passes as usize);
        }
        Ok(config)
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(Args::parse()) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Returns `false` when some files in a directory could not be documented.
fn run(args: Args) -> Result<bool> {
    let config = args.into_config()?;
    let Some(input) = config.input.clone() else {
        bail!("no input given on the command line or in the configuration file");
    };

    if !input.is_dir() {
        document_file(&input, &config)?;
        return Ok(true);
    }

    let mut entries: Vec<PathBuf> = std::fs::read_dir(&input)
        .with_context(|| format!("reading {}", input.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && is_supported(path))
        .collect();
    entries.sort();

    let mut failed = 0;
    for path in &entries {
        if let Err(e) = document_file(path, &config) {
            tracing::error!("{e:#}");
            failed += 1;
        }
    }
    tracing::info!("Documented {} of {} files", entries.len() - failed, entries.len());
    Ok(failed == 0)
}

fn document_file(path: &Path, config: &DocumenterConfig) -> Result<()> {
    let documentation = WorkbookDocumentation::open(path, &config.extract_options())
        .with_context(|| format!("unable to process {}", path.display()))?;

    let out_dir = match &config.output_dir {
        Some(dir) => dir.clone(),
        None => path.parent().map(Path::to_path_buf).unwrap_or_default(),
    };
    let out_file = output_path(path, &out_dir, &config.suffix());
    tracing::info!("Writing to {}", out_file.display());

    let bytes = config.format.emitter().emit(&documentation.sheets())?;
    std::fs::write(&out_file, bytes).with_context(|| format!("writing {}", out_file.display()))?;

    for diagnostic in documentation.diagnostics().iter() {
        tracing::debug!("{}: {diagnostic}", path.display());
    }
    Ok(())
}
