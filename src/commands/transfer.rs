use super::Outcome;
use crate::cli::TransferArgs;
use anyhow::{Context, Result};
use interchange::{ImportMode, Target};
use std::io::Write;
use store::RecordStore;

pub fn export(args: TransferArgs, store: &RecordStore, out: &mut dyn Write) -> Result<Outcome> {
    let snapshot = store.snapshot();
    let target = interchange::export(&snapshot, &args.path, args.only)
        .with_context(|| format!("Export to {} failed", args.path.display()))?;
    let what = match &target {
        Target::JsonSnapshot(_) | Target::CsvDirectory(_) => "all collections".to_string(),
        Target::JsonCollection(_, kind) | Target::CsvCollection(_, kind) => {
            kind.file_stem().to_string()
        }
    };
    writeln!(out, "Exported {what} to {}.", target.path().display())?;
    Ok(Outcome::Unchanged)
}

pub fn import(args: TransferArgs, store: &mut RecordStore, out: &mut dyn Write) -> Result<Outcome> {
    let outcome = interchange::import_into(store, &args.path, args.only)
        .with_context(|| format!("Import from {} failed", args.path.display()))?;
    match outcome.mode {
        ImportMode::Replaced => writeln!(
            out,
            "Replaced all records with {} from {}.",
            outcome.records,
            args.path.display()
        )?,
        ImportMode::Merged => writeln!(
            out,
            "Merged {} records from {}.",
            outcome.records,
            args.path.display()
        )?,
    }
    Ok(Outcome::Changed)
}
