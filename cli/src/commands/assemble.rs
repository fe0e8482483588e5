use anyhow::{Context, Result};
use muland_data::{Assembler, Config};

use super::{open_store, read_locations};

pub fn run(_cli: &crate::cli::Cli, args: &crate::cli::AssembleArgs) -> Result<()> {
    let config = Config::from_env()?;
    let out_dir = args.output.clone().unwrap_or_else(|| config.work_path.clone());

    let store = open_store(args.store.as_deref(), &config)?;
    let locations = read_locations(&args.locations)?;

    let assembler = Assembler::from_config(store, &config)
        .with_extended_tables(config.extended_tables || args.extended);
    let tables = assembler.assemble(&args.model, &locations)?;

    tables.write_to_dir(&out_dir)?;
    for table in tables.iter() {
        println!("{}\t{} record(s)", table.name(), table.len());
    }
    println!("[assemble] wrote {} table(s) to {}", tables.len(), out_dir.display());

    if let Some(path) = &args.json {
        std::fs::write(path, tables.to_json()?)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("[assemble] wrote {}", path.display());
    }
    Ok(())
}
