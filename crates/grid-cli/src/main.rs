//! gridstore CLI
//!
//! Command-line driver for reading and editing gridstore files.

mod logging;

use clap::{Parser, Subcommand};
use grid_core::{
    column_letters, export_csv, import_csv, parse_row_number, scan_root, GridStore, StoreConfig,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gridstore")]
#[command(about = "Spreadsheet-style grid store on flat files", long_about = None)]
#[command(version)]
struct Cli {
    /// Directory holding the store files (default: working directory)
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// JSON config file; --root overrides its root
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Convert CRLF line endings before decoding
    #[arg(long, global = true)]
    crlf: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a store as a table
    Show {
        /// Store name
        name: String,

        /// Maximum number of rows to display
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Print one cell
    Cell {
        /// Store name
        name: String,

        /// Cell reference, e.g. B3
        reference: String,
    },

    /// Print one row (1-based)
    Row {
        /// Store name
        name: String,

        /// Row number
        #[arg(allow_hyphen_values = true)]
        row: String,
    },

    /// Append a row
    Append {
        /// Store name
        name: String,

        /// Field values; none appends a blank row
        fields: Vec<String>,
    },

    /// Truncate a store
    Clear {
        /// Store name
        name: String,
    },

    /// Blank out a row, keeping its position
    DeleteRow {
        /// Store name
        name: String,

        /// Row number
        #[arg(allow_hyphen_values = true)]
        row: String,
    },

    /// Remove a row and shift later rows up
    DeleteShift {
        /// Store name
        name: String,

        /// Row number
        #[arg(allow_hyphen_values = true)]
        row: String,
    },

    /// Rename a store file
    Rename {
        /// Current store name
        name: String,

        /// New store name
        new_name: String,
    },

    /// Overwrite a store with a copy of another store
    Copy {
        /// Store to overwrite
        name: String,

        /// Store to copy from
        #[arg(short, long)]
        from: String,
    },

    /// List stores under the root
    List,

    /// Export a store as standard CSV
    Export {
        /// Store name
        name: String,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Replace a store's content with a standard CSV file
    Import {
        /// Store name
        name: String,

        /// Input file path
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Print a store's grid as JSON
    Dump {
        /// Store name
        name: String,
    },
}

fn main() {
    logging::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> grid_core::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => StoreConfig::load(path)?,
        None => StoreConfig::default(),
    };
    if let Some(root) = cli.root {
        config.root = root;
    }
    if cli.crlf {
        config.normalize_line_endings = true;
    }

    match cli.command {
        Commands::Show { name, limit } => cmd_show(config, &name, limit),
        Commands::Cell { name, reference } => cmd_cell(config, &name, &reference),
        Commands::Row { name, row } => cmd_row(config, &name, &row),
        Commands::Append { name, fields } => cmd_append(config, &name, &fields),
        Commands::Clear { name } => GridStore::open_with(config, &name)?.clear(),
        Commands::DeleteRow { name, row } => cmd_delete(config, &name, &row, false),
        Commands::DeleteShift { name, row } => cmd_delete(config, &name, &row, true),
        Commands::Rename { name, new_name } => cmd_rename(config, &name, &new_name),
        Commands::Copy { name, from } => cmd_copy(config, &name, &from),
        Commands::List => cmd_list(&config),
        Commands::Export { name, output } => cmd_export(config, &name, &output),
        Commands::Import { name, input } => cmd_import(config, &name, &input),
        Commands::Dump { name } => cmd_dump(config, &name),
    }
}

fn cmd_show(config: StoreConfig, name: &str, limit: Option<usize>) -> grid_core::Result<()> {
    let store = GridStore::open_with(config, name)?;
    let grid = store.parse()?;

    println!("File: {}", store.filepath().display());
    println!("Rows: {}", grid.row_count());
    println!();

    // Print column letters as the header
    let header: Vec<String> = (0..grid.column_count()).map(column_letters).collect();
    println!("\t{}", header.join("\t"));
    println!("{}", "-".repeat((header.len() + 1) * 8));

    let row_limit = limit.unwrap_or(grid.row_count());
    for (i, row) in grid.rows.iter().take(row_limit).enumerate() {
        println!("{}\t{}", i + 1, row.join("\t"));
    }

    if grid.row_count() > row_limit {
        println!("... ({} more rows)", grid.row_count() - row_limit);
    }

    Ok(())
}

fn cmd_cell(config: StoreConfig, name: &str, reference: &str) -> grid_core::Result<()> {
    let store = GridStore::open_with(config, name)?;
    println!("{}", store.get_cell(reference)?);
    Ok(())
}

fn cmd_row(config: StoreConfig, name: &str, row: &str) -> grid_core::Result<()> {
    let row = parse_row_number(row)?;
    let store = GridStore::open_with(config, name)?;
    println!("{}", store.get_row(row)?.join("\t"));
    Ok(())
}

fn cmd_append(config: StoreConfig, name: &str, fields: &[String]) -> grid_core::Result<()> {
    let store = GridStore::open_with(config, name)?;
    if fields.is_empty() {
        store.append_row::<String>(None)?;
    } else {
        store.append_row(Some(fields))?;
    }
    println!("Appended 1 row to {}", store.filepath().display());
    Ok(())
}

fn cmd_delete(config: StoreConfig, name: &str, row: &str, shift: bool) -> grid_core::Result<()> {
    let row = parse_row_number(row)?;
    let store = GridStore::open_with(config, name)?;

    let grid = if shift {
        store.delete_row_and_shift(row)?
    } else {
        store.delete_row(row)?
    };

    println!(
        "Deleted row {} of {} ({} rows)",
        row,
        store.filepath().display(),
        grid.row_count()
    );
    Ok(())
}

fn cmd_rename(config: StoreConfig, name: &str, new_name: &str) -> grid_core::Result<()> {
    let mut store = GridStore::open_with(config, name)?;
    let old_path = store.filepath().to_path_buf();

    // A failed rename is not fatal and is already logged at warn level
    if let Ok(binding) = store.rename(new_name) {
        println!("Renamed {} to {}", old_path.display(), binding.path().display());
    }
    Ok(())
}

fn cmd_copy(config: StoreConfig, name: &str, from: &str) -> grid_core::Result<()> {
    let source = config.bind(from);
    let store = GridStore::open_with(config, name)?;

    store.copy_from_path(source.path())?;
    println!(
        "Copied {} to {}",
        source.path().display(),
        store.filepath().display()
    );
    Ok(())
}

fn cmd_list(config: &StoreConfig) -> grid_core::Result<()> {
    let entries = scan_root(config)?;

    println!("Stores in {} ({}):", config.root.display(), entries.len());
    for entry in &entries {
        println!("  {} ({} bytes)", entry.name, entry.size);
    }

    Ok(())
}

fn cmd_export(config: StoreConfig, name: &str, output: &PathBuf) -> grid_core::Result<()> {
    let store = GridStore::open_with(config, name)?;
    let rows = export_csv(&store, output)?;
    println!("Exported {} rows to {}", rows, output.display());
    Ok(())
}

fn cmd_import(config: StoreConfig, name: &str, input: &PathBuf) -> grid_core::Result<()> {
    let store = GridStore::open_with(config, name)?;
    let rows = import_csv(&store, input)?;
    println!("Imported {} rows into {}", rows, store.filepath().display());
    Ok(())
}

fn cmd_dump(config: StoreConfig, name: &str) -> grid_core::Result<()> {
    let store = GridStore::open_with(config, name)?;
    let json = serde_json::to_string_pretty(&store.parse()?)?;
    println!("{}", json);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_rename_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = StoreConfig::with_root(dir.path());

        cmd_rename(config.clone(), "data", "missing/dir/data").unwrap();
        assert!(dir.path().join("data.csv").exists());

        cmd_rename(config, "data", "renamed").unwrap();
        assert!(!dir.path().join("data.csv").exists());
        assert!(dir.path().join("renamed.csv").exists());
    }
}
