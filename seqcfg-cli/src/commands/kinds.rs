//! Kinds command implementation - list the registry of a domain

use anyhow::Result;
use serde::Serialize;

use seqcfg_core::align::AlignConfigId;
use seqcfg_core::search::SearchConfigId;
use seqcfg_core::ElementKind;

use crate::config::OutputFormat;
use crate::elements::Domain;

#[derive(Debug, Serialize)]
pub struct KindEntry {
    pub index: usize,
    pub name: &'static str,
    pub incompatible_with: Vec<&'static str>,
}

pub fn registry<K: ElementKind>() -> Vec<KindEntry> {
    K::all()
        .iter()
        .map(|&kind| KindEntry {
            index: kind.index(),
            name: kind.name(),
            incompatible_with: K::all()
                .iter()
                .filter(|&&other| other != kind && !kind.compatible(other))
                .map(|other| other.name())
                .collect(),
        })
        .collect()
}

pub fn execute(domain: Domain, format: OutputFormat) -> Result<()> {
    let entries = match domain {
        Domain::Alignment => registry::<AlignConfigId>(),
        Domain::Search => registry::<SearchConfigId>(),
    };
    log::debug!("{:?} registry has {} kinds", domain, entries.len());

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
        OutputFormat::Text => {
            for entry in &entries {
                if entry.incompatible_with.is_empty() {
                    println!("{:>2}  {}", entry.index, entry.name);
                } else {
                    println!(
                        "{:>2}  {} (excludes {})",
                        entry.index,
                        entry.name,
                        entry.incompatible_with.join(", ")
                    );
                }
            }
        }
    }

    Ok(())
}
