//! Check command implementation - assemble an element file and report the result

use anyhow::Result;
use serde::Serialize;
use std::path::Path;

use seqcfg_core::align::AlignmentSettings;
use seqcfg_core::search::SearchSettings;
use seqcfg_core::{ConfigError, Configuration, ElementKind};

use crate::config::{Config, OutputFormat};
use crate::elements::{ElementFile, ElementSpec};
use crate::error::{CliError, CliResult};

/// Summary of an accepted configuration
#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub domain: &'static str,
    pub elements: Vec<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<serde_json::Value>,
}

pub fn execute(
    config: &Config,
    file: &Path,
    all_conflicts: bool,
    format: OutputFormat,
) -> Result<()> {
    log::info!("Checking element file: {}", file.display());

    let elements = ElementFile::load(file)?;
    log::info!(
        "Loaded {:?} file with {} elements",
        elements.domain(),
        elements.len()
    );

    let report_all = all_conflicts || config.check.report_all_conflicts;
    let report = check_file(&elements, report_all, config.check.show_settings)?;

    log::info!(
        "{} configuration accepted with {} elements",
        report.domain,
        report.elements.len()
    );

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => print_text_report(&report)?,
    }

    Ok(())
}

/// Assemble every element of `file` and summarize the resulting configuration
pub fn check_file(
    file: &ElementFile,
    report_all: bool,
    show_settings: bool,
) -> CliResult<CheckReport> {
    match file {
        ElementFile::Alignment { elements } => {
            let config = assemble(elements, report_all)?;
            let settings = if show_settings {
                let settings = AlignmentSettings::resolve(&config).map_err(rejected)?;
                Some(to_json(&settings)?)
            } else {
                None
            };
            Ok(report(&config, settings))
        }
        ElementFile::Search { elements } => {
            let config = assemble(elements, report_all)?;
            let settings = if show_settings {
                let settings = SearchSettings::resolve(&config).map_err(rejected)?;
                Some(to_json(&settings)?)
            } else {
                None
            };
            Ok(report(&config, settings))
        }
    }
}

/// Combine elements left to right.
///
/// Without `report_all` the first rejection ends the check. With it, rejected
/// elements are skipped and every conflict is collected before failing.
pub fn assemble<S: ElementSpec>(
    specs: &[S],
    report_all: bool,
) -> CliResult<Configuration<S::Kind>> {
    let domain = <S::Kind as ElementKind>::DOMAIN;
    let mut config = Configuration::new();
    let mut reasons = Vec::new();

    for (position, spec) in specs.iter().enumerate() {
        let index = position + 1;
        let kind = spec.kind();
        let piece = spec
            .build()
            .map_err(|err| CliError::element(index, kind.name().to_string(), err.to_string()))?;

        log::debug!("{}: adding element #{} `{}`", domain, index, kind);

        if report_all {
            let conflicts = config.conflicts(&piece);
            if !conflicts.is_empty() {
                reasons.extend(
                    conflicts
                        .iter()
                        .map(|err| format!("element #{}: {}", index, err)),
                );
                continue;
            }
        }

        config = config.combine(&piece).map_err(|err| {
            CliError::rejected(domain, vec![format!("element #{}: {}", index, err)])
        })?;
    }

    if !reasons.is_empty() {
        return Err(CliError::rejected(domain, reasons));
    }
    Ok(config)
}

fn rejected<K: ElementKind>(err: ConfigError<K>) -> CliError {
    CliError::rejected(K::DOMAIN, vec![err.to_string()])
}

fn report<K: ElementKind>(
    config: &Configuration<K>,
    settings: Option<serde_json::Value>,
) -> CheckReport {
    CheckReport {
        domain: K::DOMAIN,
        elements: config.iter().map(|element| element.element_kind().name()).collect(),
        settings,
    }
}

fn to_json<T: Serialize>(value: &T) -> CliResult<serde_json::Value> {
    serde_json::to_value(value)
        .map_err(|err| CliError::config(format!("JSON serialization error: {}", err)))
}

fn print_text_report(report: &CheckReport) -> Result<()> {
    println!(
        "✓ {} configuration is valid ({} elements)",
        report.domain,
        report.elements.len()
    );
    for (position, name) in report.elements.iter().enumerate() {
        println!("  #{} {}", position + 1, name);
    }
    if let Some(settings) = &report.settings {
        println!("\nResolved settings:");
        println!("{}", serde_json::to_string_pretty(settings)?);
    }
    Ok(())
}
