use bizplan_core::config::Config;
use std::path::Path;

pub fn run(root: &Path, port: Option<u16>, open_browser: bool) -> anyhow::Result<()> {
    let config = Config::load_or_default(root)?;
    let port = port.unwrap_or(config.server.port);

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(bizplan_server::serve(root.to_path_buf(), port, open_browser))
}
