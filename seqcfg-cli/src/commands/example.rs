//! Example command implementation - print a sample element file

use anyhow::Result;

use crate::elements::{Domain, ElementFile};

pub fn execute(domain: Domain) -> Result<()> {
    let example = ElementFile::example(domain).to_toml()?;
    print!("{}", example);
    Ok(())
}
