use anyhow::Context;
use bizplan_core::{config::Config, io, paths, storage::WIZARD_KEY, wizard::WizardProgress};
use std::path::Path;

pub fn run(root: &Path, name: Option<&str>) -> anyhow::Result<()> {
    let project_name = name.map(str::to_string).unwrap_or_else(|| {
        root.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "bizplan".to_string())
    });

    println!("Initializing bizplan in: {}", root.display());

    for p in [paths::bizplan_dir(root), paths::storage_dir(root)] {
        io::ensure_dir(&p).with_context(|| format!("failed to create {}", p.display()))?;
    }

    if !paths::is_initialized(root) {
        Config::new(&project_name)
            .save(root)
            .context("failed to write config.yaml")?;
        println!("  created: {}", paths::CONFIG_FILE);
    } else {
        println!("  exists:  {}", paths::CONFIG_FILE);
    }

    let wizard_path = paths::storage_path(root, WIZARD_KEY);
    let empty = serde_json::to_vec_pretty(&WizardProgress::new())?;
    if io::write_if_missing(&wizard_path, &empty).context("failed to write wizard storage")? {
        let shown = wizard_path.strip_prefix(root).unwrap_or(&wizard_path);
        println!("  created: {}", shown.display());
    }

    println!("\nbizplan initialized. Next: bizplan project create \"<name>\"");
    Ok(())
}
