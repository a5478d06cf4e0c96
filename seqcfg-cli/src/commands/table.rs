//! Table command implementation - print a domain's compatibility matrix

use anyhow::Result;
use serde::Serialize;

use seqcfg_core::align::AlignConfigId;
use seqcfg_core::search::SearchConfigId;
use seqcfg_core::ElementKind;

use crate::config::OutputFormat;
use crate::elements::Domain;

/// Compatibility matrix with kind names attached
#[derive(Debug, Serialize)]
pub struct TableReport {
    pub domain: &'static str,
    pub kinds: Vec<&'static str>,
    pub rows: Vec<Vec<u8>>,
    pub incompatible: Vec<(&'static str, &'static str)>,
}

impl TableReport {
    pub fn for_kind<K: ElementKind>() -> Self {
        let table = K::compatibility_table();
        let kinds: Vec<_> = K::all().iter().map(|kind| kind.name()).collect();
        let incompatible = table
            .incompatible_pairs()
            .into_iter()
            .map(|(row, col)| (kinds[row], kinds[col]))
            .collect();

        Self {
            domain: K::DOMAIN,
            kinds,
            rows: table.rows().map(<[u8]>::to_vec).collect(),
            incompatible,
        }
    }

    pub fn for_domain(domain: Domain) -> Self {
        match domain {
            Domain::Alignment => Self::for_kind::<AlignConfigId>(),
            Domain::Search => Self::for_kind::<SearchConfigId>(),
        }
    }

    /// Matrix with row and column headers
    pub fn render(&self) -> String {
        let width = self.kinds.iter().map(|name| name.len()).max().unwrap_or(0);
        let mut out = format!("{:width$}", "", width = width);
        for column in 0..self.kinds.len() {
            out.push_str(&format!(" {:>3}", column));
        }
        out.push('\n');

        for (index, (name, cells)) in self.kinds.iter().zip(&self.rows).enumerate() {
            out.push_str(&format!("{:width$}", name, width = width));
            for (column, cell) in cells.iter().enumerate() {
                let mark = if column == index { "-" } else if *cell == 1 { "1" } else { "0" };
                out.push_str(&format!(" {:>3}", mark));
            }
            out.push_str(&format!("   [{}]\n", index));
        }
        out
    }
}

pub fn execute(domain: Domain, format: OutputFormat) -> Result<()> {
    log::debug!("Rendering compatibility table for {:?}", domain);
    let report = TableReport::for_domain(domain);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => {
            println!("{} compatibility (1 = may be combined)\n", report.domain);
            print!("{}", report.render());
            if report.incompatible.is_empty() {
                println!("\nAll distinct kinds are compatible");
            } else {
                println!("\nIncompatible pairs:");
                for (first, second) in &report.incompatible {
                    println!("  {} / {}", first, second);
                }
            }
        }
    }

    Ok(())
}
