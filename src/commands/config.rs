use std::path::Path;

use anyhow::{Result, bail};
use coursecal_core::RewriteConfig;

pub fn run(path: Option<&Path>, init: bool) -> Result<()> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => RewriteConfig::config_path()?,
    };

    if !init {
        println!("{}", path.display());
        if !path.exists() {
            println!("(not created yet, built-in defaults apply; run `coursecal config --init`)");
        }
        return Ok(());
    }

    if path.exists() {
        bail!("Config file already exists at {}", path.display());
    }

    RewriteConfig::create_default_config(&path)?;
    println!("Created {}", path.display());

    Ok(())
}
