use std::path::Path;

use anyhow::{Result, bail};
use gridfit_core::GridfitConfig;

pub fn init(path: &str) -> Result<()> {
    let output = Path::new(path).join("gridfit.toml");
    if output.exists() {
        bail!("{} already exists", output.display());
    }

    std::fs::write(&output, GridfitConfig::scaffold().to_toml_string()?)?;
    println!("✓ Generated {}", output.display());
    Ok(())
}
