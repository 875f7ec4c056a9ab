use crate::cli::{FibersArgs, FibersCommands};
use crate::data::DataManager;
use crate::error::Result;
use fiberlab::core::reference::table::{FiberRecord, FiberReferenceTable, Standard};
use std::path::PathBuf;
use tracing::info;

pub fn run(args: FibersArgs) -> Result<()> {
    match args.command {
        FibersCommands::List => handle_list()?,
        FibersCommands::Add {
            name,
            iso,
            aatcc,
            eu,
            canada,
        } => {
            let regains = [
                (Standard::Iso, iso),
                (Standard::Aatcc, aatcc),
                (Standard::Eu, eu),
                (Standard::Canada, canada),
            ];
            edit_table(|table| {
                let id = table.add(&name)?;
                for (standard, value) in regains {
                    if value.is_some() {
                        table.set_regain(id, standard, value)?;
                    }
                }
                println!("Added '{}' with id {}.", name.trim(), id);
                Ok(())
            })?;
        }
        FibersCommands::Set {
            id,
            standard,
            value,
        } => {
            edit_table(|table| {
                table.set_regain(id, standard, value)?;
                match value {
                    Some(v) => println!("Set {} regain of fiber {} to {}%.", standard, id, v),
                    None => println!("Cleared {} regain of fiber {}.", standard, id),
                }
                Ok(())
            })?;
        }
        FibersCommands::Rename { id, name } => {
            edit_table(|table| {
                table.rename(id, &name)?;
                println!("Renamed fiber {} to '{}'.", id, name.trim());
                Ok(())
            })?;
        }
        FibersCommands::Remove { id } => {
            edit_table(|table| {
                let removed = table.remove(id)?;
                println!("Removed '{}'.", removed.name);
                Ok(())
            })?;
        }
        FibersCommands::Reset => {
            let manager = DataManager::new()?;
            manager.save_table(&FiberReferenceTable::with_defaults())?;
            println!("Reference table reset to the built-in defaults.");
        }
        FibersCommands::Path => handle_path()?,
        FibersCommands::SetPath { path } => handle_set_path(path)?,
        FibersCommands::ResetPath => handle_reset_path()?,
    }
    Ok(())
}

fn edit_table(edit: impl FnOnce(&mut FiberReferenceTable) -> Result<()>) -> Result<()> {
    let manager = DataManager::new()?;
    let mut table = manager.load_table()?;
    edit(&mut table)?;
    manager.save_table(&table)
}

fn format_regain(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.2}", v))
}

fn format_record(record: &FiberRecord) -> String {
    format!(
        "{:>4}  {:<20} {:>8} {:>8} {:>8} {:>8}",
        record.id,
        record.name,
        format_regain(record.iso),
        format_regain(record.aatcc),
        format_regain(record.eu),
        format_regain(record.canada)
    )
}

fn handle_list() -> Result<()> {
    let manager = DataManager::new()?;
    let table = manager.load_table()?;
    println!(
        "{:>4}  {:<20} {:>8} {:>8} {:>8} {:>8}",
        "ID", "Fiber", "ISO", "AATCC", "EU", "CANADA"
    );
    for record in table.records() {
        println!("{}", format_record(record));
    }
    Ok(())
}

fn handle_path() -> Result<()> {
    let manager = DataManager::new()?;
    println!("{}", manager.get_data_path().display());
    Ok(())
}

fn handle_set_path(path: PathBuf) -> Result<()> {
    info!("Setting custom data path to: {:?}", &path);
    DataManager::set_custom_path(&path)?;
    println!("Data path set to: {}", path.display());
    Ok(())
}

fn handle_reset_path() -> Result<()> {
    info!("Resetting data path to default.");
    DataManager::reset_path()?;
    let manager = DataManager::new()?;
    println!(
        "Data path reset to default: {}",
        manager.get_data_path().display()
    );
    Ok(())
}
