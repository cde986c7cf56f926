use anyhow::Context;
use chronos_core::config::Config;
use std::path::Path;

pub fn run(root: &Path, port: Option<u16>, bind: Option<&str>) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load config")?;
    let port = port.unwrap_or(config.server.port);
    let bind = bind.unwrap_or(&config.server.bind).to_string();

    let rt = tokio::runtime::Runtime::new()?;
    let root_buf = root.to_path_buf();
    rt.block_on(async move { chronos_server::serve(root_buf, &bind, port).await })
}
