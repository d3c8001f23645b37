use anyhow::Context;
use blueprint_core::{config::Config, io, paths, store};
use std::path::Path;

pub fn run(root: &Path) -> anyhow::Result<()> {
    println!("Initializing blueprint in: {}", root.display());

    let dir = paths::blueprint_dir(root);
    io::ensure_dir(&dir).with_context(|| format!("failed to create {}", dir.display()))?;

    if paths::config_path(root).exists() {
        println!("  exists:  {}", paths::CONFIG_FILE);
    } else {
        Config::default()
            .save(root)
            .context("failed to write config.yaml")?;
        println!("  created: {}", paths::CONFIG_FILE);
    }

    if paths::data_path(root).exists() {
        println!("  exists:  {}", paths::DATA_FILE);
    } else {
        store::write_all(root, &store::Collections::default())
            .context("failed to seed record store")?;
        println!("  created: {}", paths::DATA_FILE);
    }

    let config = Config::load(root).context("failed to load config")?;
    if std::env::var(&config.generation.api_key_env).is_err() {
        println!(
            "\nSet {} before running `blueprint generate`.",
            config.generation.api_key_env
        );
    }
    Ok(())
}
