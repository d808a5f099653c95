//! Interactive selection menus and selection-expression parsing.
//!
//! Module and version choices are made from numbered menus. The selection
//! expression accepted at the prompt is the usual comma-and-range syntax:
//! `3`, `1,4`, `2-5`, or `all`. Parsing is forgiving: reversed ranges are
//! swapped and out-of-range or unparseable pieces are dropped. A selection
//! mistake never ends the run; the prompt just asks again.

use anyhow::Result;
use colored::Colorize;
use std::collections::BTreeSet;
use std::io::{self, Write};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::core::HelmweaveError;

/// Parse a selection expression into sorted, deduplicated 1-based indices.
///
/// Matching is case-insensitive and whitespace-tolerant. An empty input
/// selects nothing; `all` selects `1..=max`. Comma-separated entries are
/// either single numbers or `a-b` ranges; reversed ranges are swapped and
/// ranges are clamped to `max`. Entries that do not parse, or fall outside
/// `1..=max`, are dropped silently.
#[must_use]
pub fn parse_selection(input: &str, max: usize) -> Vec<usize> {
    let input = input.trim().to_lowercase();
    if input.is_empty() {
        return Vec::new();
    }
    if input == "all" {
        return (1..=max).collect();
    }

    let mut selected = BTreeSet::new();
    for part in input.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        if let Some((lo, hi)) = part.split_once('-') {
            let (Ok(lo), Ok(hi)) = (lo.trim().parse::<usize>(), hi.trim().parse::<usize>()) else {
                continue;
            };
            let (lo, hi) = if lo > hi { (hi, lo) } else { (lo, hi) };
            for index in lo.max(1)..=hi.min(max) {
                selected.insert(index);
            }
        } else if let Ok(index) = part.parse::<usize>() {
            if (1..=max).contains(&index) {
                selected.insert(index);
            }
        }
    }
    selected.into_iter().collect()
}

/// Present a numbered menu and read a selection from async stdin.
///
/// Returns 1-based indices into `items`. Empty or invalid input re-prompts;
/// with `single` set, the answer must be exactly one number. An empty `items`
/// slice returns an empty selection without prompting at all. Callers are
/// expected to have verified stdin is a terminal; if the stream still ends
/// mid-prompt the error is the same [`HelmweaveError::NonInteractive`] that
/// check would have produced.
pub async fn prompt_choose(prompt: &str, items: &[String], single: bool) -> Result<Vec<usize>> {
    if items.is_empty() {
        return Ok(Vec::new());
    }

    let mut reader = BufReader::new(tokio::io::stdin());
    loop {
        println!();
        println!("{}", prompt.bold());
        for (index, item) in items.iter().enumerate() {
            println!("  {}) {item}", index + 1);
        }
        print!("Select number(s): ");
        io::stdout().flush()?;

        let mut raw = String::new();
        if reader.read_line(&mut raw).await? == 0 {
            return Err(HelmweaveError::NonInteractive {
                operation: "menu selection".to_string(),
            }
            .into());
        }
        let raw = raw.trim();
        if raw.is_empty() {
            println!("{}", "No selection provided. Please try again.".yellow());
            continue;
        }

        let selection = if single {
            match raw.parse::<usize>() {
                Ok(index) if (1..=items.len()).contains(&index) => vec![index],
                _ => Vec::new(),
            }
        } else {
            parse_selection(raw, items.len())
        };

        if selection.is_empty() {
            println!("{}", "Invalid selection. Please try again.".yellow());
            continue;
        }
        return Ok(selection);
    }
}
