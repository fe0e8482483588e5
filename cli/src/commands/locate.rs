use anyhow::Result;
use muland_data::{Assembler, Config};

use super::{open_store, read_locations};

pub fn run(_cli: &crate::cli::Cli, args: &crate::cli::LocateArgs) -> Result<()> {
    let config = Config::from_env()?;
    let store = open_store(args.store.as_deref(), &config)?;
    let locations = read_locations(&args.locations)?;

    let zones = Assembler::new(store).locate(&args.model, &locations)?;

    println!("point_index,zone_id");
    for (index, zone) in zones.iter() {
        println!("{index},{zone}");
    }

    let missing = zones.missing(locations.len());
    if !missing.is_empty() {
        eprintln!("[locate] {} point(s) outside model coverage: {missing:?}", missing.len());
    }
    Ok(())
}
