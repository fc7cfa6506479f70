use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use relout_decode::{decode_json, group_relations};
use relout_model::{RelationSet, parse_dump};
use relout_report::{assemble_diagnostics, assemble_ic_violations};
use relout_table::build_pivot;

use crate::cli::DumpArgs;
use crate::summary::{print_buckets, print_pivot};

pub fn run_json(args: &DumpArgs) -> Result<()> {
    let set = load(&args.dump)?;
    let value = decode_json(&set).context("decode relation output")?;
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

pub fn run_diagnostics(args: &DumpArgs) -> Result<()> {
    let set = load(&args.dump)?;
    let diagnostics = assemble_diagnostics(&set);
    info!(count = diagnostics.len(), "assembled diagnostics");
    println!("{}", serde_json::to_string_pretty(&diagnostics)?);
    Ok(())
}

pub fn run_violations(args: &DumpArgs) -> Result<()> {
    let set = load(&args.dump)?;
    let violations = assemble_ic_violations(&set);
    info!(count = violations.len(), "assembled violations");
    println!("{}", serde_json::to_string_pretty(&violations)?);
    Ok(())
}

pub fn run_table(args: &DumpArgs) -> Result<()> {
    let set = load(&args.dump)?;
    let table = build_pivot(&set);
    print_pivot(&table);
    Ok(())
}

pub fn run_partition(args: &DumpArgs) -> Result<()> {
    let set = load(&args.dump)?;
    let buckets = group_relations(&set);
    print_buckets(&buckets);
    Ok(())
}

fn load(path: &Path) -> Result<RelationSet> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("read relation dump {}", path.display()))?;
    let set = parse_dump(&text).context("parse relation dump")?;
    info!(relations = set.len(), "loaded relation dump");
    Ok(set)
}
