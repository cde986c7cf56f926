use crate::output::print_json;
use anyhow::Context;
use chronos_core::{config::Config, paths, store::Store};
use std::path::Path;

pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    let (config, created) = Config::init(root).context("failed to write config.yaml")?;
    let db_path = config.database_path(root);
    let db_existed = db_path.exists();
    Store::open(&db_path).with_context(|| format!("failed to open {}", db_path.display()))?;

    if json {
        return print_json(&serde_json::json!({
            "root": root,
            "config_created": created,
            "database": db_path,
        }));
    }

    println!("Initializing chronos in: {}", root.display());
    if created {
        println!("  created: {}", paths::CONFIG_FILE);
    } else {
        println!("  exists:  {}", paths::CONFIG_FILE);
    }
    let verb = if db_existed { "exists: " } else { "created:" };
    println!("  {verb} {}", db_path.display());

    for w in config.validate() {
        println!("  warning: {}", w.message);
    }
    Ok(())
}
