//! hexstrike: load an ASCII hex board and print what each unit would target.
//!
//! ```text
//! hexstrike boards/standard.txt --range 2=3 --path 1 45
//! ```
//!
//! Set `RUST_LOG=debug` (or `trace`) to follow the searches.

use std::collections::HashMap;
use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use hexstrike_core::{Board, CharacterId, HexId};
use hexstrike_paths::{DEFAULT_MAX_SEARCH_LAYERS, SearchConfig, TargetMap, TargetingEngine};

/// Print closest-target maps and paths for a hex board
#[derive(Parser, Debug)]
#[command(name = "hexstrike")]
struct Args {
    /// Board file: one line per row, one token per column
    board: PathBuf,

    /// Attack range of a character, as CHARACTER=RANGE (repeatable)
    #[arg(long = "range", value_parser = parse_range)]
    ranges: Vec<(CharacterId, u32)>,

    /// Maximum movement layers explored for ranged units
    #[arg(long, default_value_t = DEFAULT_MAX_SEARCH_LAYERS)]
    max_layers: u32,

    /// Disable result caching
    #[arg(long)]
    no_cache: bool,

    /// Also print the shortest path between two hex ids
    #[arg(long, num_args = 2, value_names = ["FROM", "TO"])]
    path: Option<Vec<u32>>,
}

fn parse_range(s: &str) -> Result<(CharacterId, u32), String> {
    let (character, range) = s
        .split_once('=')
        .ok_or_else(|| format!("expected CHARACTER=RANGE, got {s:?}"))?;
    let character = character
        .trim()
        .parse()
        .map_err(|e| format!("bad character {character:?}: {e}"))?;
    let range = range
        .trim()
        .parse()
        .map_err(|e| format!("bad range {range:?}: {e}"))?;
    Ok((CharacterId(character), range))
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    let text = std::fs::read_to_string(&args.board)?;
    let name = args
        .board
        .file_stem()
        .map_or_else(|| "board".to_string(), |s| s.to_string_lossy().into_owned());
    let board = Board::from_ascii(&name, &text)?;

    let config = SearchConfig {
        max_search_layers: args.max_layers,
        ..SearchConfig::default()
    };
    let mut engine = TargetingEngine::new(board.preset().clone(), config)?;
    engine.set_caching_enabled(!args.no_cache);

    let ranges: HashMap<CharacterId, u32> = args.ranges.into_iter().collect();
    let tiles = board.occupied_tiles();

    println!("{}", board.to_ascii());
    println!();
    let enemies = engine.closest_enemy_map(&tiles, &ranges, Some(&board));
    print_map("ally", &enemies, &board);
    let allies = engine.closest_ally_map(&tiles, &ranges, Some(&board));
    print_map("enemy", &allies, &board);

    if let Some(ids) = args.path {
        let (from, to) = match ids.as_slice() {
            &[from, to] => (HexId(from), HexId(to)),
            _ => return Err("--path takes two hex ids".into()),
        };
        let preset = board.preset();
        let (Some(start), Some(goal)) = (preset.hex(from), preset.hex(to)) else {
            return Err(format!("--path: hex ids must be within 1..={}", preset.len()).into());
        };
        println!();
        match engine.find_path(start, goal, &board) {
            Some(path) => {
                let ids: Vec<String> = path
                    .iter()
                    .filter_map(|h| preset.id_of(*h))
                    .map(|id| id.to_string())
                    .collect();
                println!("path {from} -> {to} ({} steps): {}", path.len() - 1, ids.join(" "));
            }
            None => {
                log::warn!("no path from {from} to {to}");
                println!("path {from} -> {to}: unreachable");
            }
        }
    }

    log::debug!("cache: {:?}", engine.stats());
    Ok(())
}

fn print_map(side: &str, map: &TargetMap, board: &Board) {
    for tile in board.occupied_tiles() {
        if tile.team.map(|t| t.to_string()).as_deref() != Some(side) {
            continue;
        }
        let who = tile
            .occupant
            .map_or_else(|| "?".to_string(), |c| c.to_string());
        match map.get(&tile.id) {
            Some(info) => println!(
                "{side} {who} at {} -> {} at {} (move {})",
                tile.id, info.team, info.target, info.distance
            ),
            None => {
                log::warn!("{side} at {} has no reachable target", tile.id);
                println!("{side} {who} at {} -> none", tile.id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ranges() {
        assert_eq!(parse_range("2=3"), Ok((CharacterId(2), 3)));
        assert_eq!(parse_range(" 7 = 1 "), Ok((CharacterId(7), 1)));
        assert!(parse_range("2").is_err());
        assert!(parse_range("x=3").is_err());
        assert!(parse_range("2=-1").is_err());
    }

    #[test]
    fn parses_arguments() {
        let args = Args::try_parse_from([
            "hexstrike",
            "board.txt",
            "--range",
            "1=3",
            "--range",
            "2=2",
            "--no-cache",
            "--path",
            "1",
            "45",
        ])
        .unwrap();
        assert_eq!(args.ranges, vec![(CharacterId(1), 3), (CharacterId(2), 2)]);
        assert!(args.no_cache);
        assert_eq!(args.max_layers, DEFAULT_MAX_SEARCH_LAYERS);
        assert_eq!(args.path, Some(vec![1, 45]));
    }

    #[test]
    fn bundled_board_loads() {
        let text = include_str!("../boards/standard.txt");
        let board = Board::from_ascii("standard", text).unwrap();
        assert_eq!(board.preset().len(), 45);
        assert_eq!(board.occupied_tiles().len(), 6);
    }
}
