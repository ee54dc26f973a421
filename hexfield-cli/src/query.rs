//! Query commands - run engine queries against a map file

use std::path::{Path as FsPath, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use serde_json::json;

use hexfield_core::{
    accessible_cells, attackable_cells, is_visible, movement_path, CellId, Grid, MapFile,
};

#[derive(Args)]
pub struct InfoArgs {
    /// Map JSON file
    #[arg(long, value_name = "FILE")]
    pub map: PathBuf,
}

#[derive(Args)]
pub struct PathArgs {
    /// Map JSON file
    #[arg(long, value_name = "FILE")]
    pub map: PathBuf,

    /// Source cell id
    #[arg(long)]
    pub from: CellId,

    /// Target cell id
    #[arg(long)]
    pub to: CellId,

    /// Output the result as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct ReachArgs {
    /// Map JSON file
    #[arg(long, value_name = "FILE")]
    pub map: PathBuf,

    /// Source cell id
    #[arg(long)]
    pub from: CellId,

    /// Movement budget
    #[arg(long)]
    pub range: f32,

    /// Output the result as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct LosArgs {
    /// Map JSON file
    #[arg(long, value_name = "FILE")]
    pub map: PathBuf,

    /// Source cell id
    #[arg(long)]
    pub from: CellId,

    /// Target cell id
    #[arg(long)]
    pub to: CellId,
}

#[derive(Args)]
pub struct AttackArgs {
    /// Map JSON file
    #[arg(long, value_name = "FILE")]
    pub map: PathBuf,

    /// Source cell id
    #[arg(long)]
    pub from: CellId,

    /// Minimum attack range
    #[arg(long, default_value = "1")]
    pub min: i32,

    /// Maximum attack range
    #[arg(long, default_value = "1")]
    pub max: i32,

    /// Output the result as JSON
    #[arg(long)]
    pub json: bool,
}

fn load_grid(path: &FsPath) -> Result<Grid> {
    let map = MapFile::load(path).with_context(|| format!("loading {}", path.display()))?;
    let grid = map.into_grid()?;
    tracing::debug!(cells = grid.len(), "map loaded");
    Ok(grid)
}

pub fn info(args: InfoArgs) -> Result<()> {
    let grid = load_grid(&args.map)?;

    println!("{} cells", grid.len());
    println!("{:>4} {:>8} {:>14} {:>10} {:>6} {:>9}", "id", "offset", "cube", "terrain", "sight", "neighbors");
    for cell in grid.cells() {
        let offset = cell.offset();
        let cube = cell.cube();
        println!(
            "{:>4} {:>8} {:>14} {:>10} {:>6} {:>9}",
            cell.id(),
            format!("{},{}", offset.column, offset.row),
            format!("{},{},{}", cube.x, cube.y, cube.z),
            format!("{:?}", cell.terrain()),
            if cell.blocks_sight() { "yes" } else { "no" },
            cell.neighbors().len(),
        );
    }
    Ok(())
}

pub fn path(args: PathArgs) -> Result<()> {
    let grid = load_grid(&args.map)?;
    let path = movement_path(&grid, args.from, args.to);

    if args.json {
        let cost = path.cost.is_finite().then_some(path.cost);
        println!("{}", json!({ "cells": path.cells, "cost": cost }));
        return Ok(());
    }

    if path.is_unreachable() {
        println!("{} -> {}: unreachable", args.from, args.to);
    } else {
        let cells: Vec<String> = path.cells.iter().map(|id| id.to_string()).collect();
        println!(
            "{} -> {}: {} ({} steps, cost {})",
            args.from,
            args.to,
            cells.join(" "),
            path.steps(),
            path.cost
        );
    }
    Ok(())
}

pub fn reach(args: ReachArgs) -> Result<()> {
    let grid = load_grid(&args.map)?;
    let reachable = accessible_cells(&grid, args.from, args.range);

    let mut entries: Vec<(CellId, f32)> = reachable.into_iter().collect();
    entries.sort_by_key(|&(id, _)| id);

    if args.json {
        let cells: Vec<_> = entries
            .iter()
            .map(|&(id, cost)| json!({ "cell": id, "cost": cost }))
            .collect();
        println!("{}", json!(cells));
        return Ok(());
    }

    println!(
        "{} cells reachable from {} within {}",
        entries.len(),
        args.from,
        args.range
    );
    for (id, cost) in entries {
        println!("{:>4}  cost {}", id, cost);
    }
    Ok(())
}

pub fn los(args: LosArgs) -> Result<()> {
    let grid = load_grid(&args.map)?;
    let visible = is_visible(&grid, args.from, args.to);
    println!(
        "{} -> {}: {}",
        args.from,
        args.to,
        if visible { "visible" } else { "not visible" }
    );
    Ok(())
}

pub fn attack(args: AttackArgs) -> Result<()> {
    let grid = load_grid(&args.map)?;
    let targets = attackable_cells(&grid, args.from, args.min, args.max);

    if args.json {
        println!("{}", json!(targets));
        return Ok(());
    }

    println!(
        "{} attackable cells from {} in range [{}, {}]",
        targets.len(),
        args.from,
        args.min,
        args.max
    );
    for id in targets {
        println!("{:>4}", id);
    }
    Ok(())
}
