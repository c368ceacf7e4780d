//! Command-line argument parsing for the `carve` tool
//!
//! Supports:
//! - Picking a position by offset, line, or line and column
//! - Narrowing with one or more patterns, each searched after the previous
//! - One edit per run, optionally repeated over every match
//! - Dry runs that print the result instead of writing it

use clap::{ArgGroup, Parser};
use std::path::PathBuf;

use crate::action::Action;
use crate::expr::Expr;

/// Structural edits on a single file
#[derive(Parser, Debug)]
#[command(name = "carve", version, about = "Structural edits on a single file")]
#[command(group(ArgGroup::new("position").args(["at", "line", "grid"])))]
#[command(group(
    ArgGroup::new("edit")
        .required(true)
        .args(["insert", "append", "replace", "delete"])
))]
pub struct CliArgs {
    /// File to edit
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Start at byte offset N (negative counts back from the end)
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    pub at: Option<isize>,

    /// Start at the beginning of line N (negative counts back from the last line)
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    pub line: Option<isize>,

    /// Start at LINE:COLUMN (1-based line, 0-based column)
    #[arg(long, value_name = "LINE:COLUMN")]
    pub grid: Option<String>,

    /// Select the first match of RE; repeat to search after the previous match
    #[arg(long = "pattern", value_name = "RE")]
    pub patterns: Vec<String>,

    /// Insert TEXT before the selection
    #[arg(long, value_name = "TEXT")]
    pub insert: Option<String>,

    /// Insert TEXT after the selection
    #[arg(long, value_name = "TEXT")]
    pub append: Option<String>,

    /// Replace the selection with TEXT (`$n` expands to pattern group n)
    #[arg(long, value_name = "TEXT")]
    pub replace: Option<String>,

    /// Delete the selection
    #[arg(long)]
    pub delete: bool,

    /// Apply the edit to every match of the last pattern
    #[arg(long)]
    pub all: bool,

    /// Start from an empty buffer if FILE does not exist
    #[arg(long)]
    pub create: bool,

    /// Print the edited buffer instead of writing it
    #[arg(long)]
    pub dry_run: bool,

    /// Print a JSON report of the outcome
    #[arg(long)]
    pub json: bool,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// What a run does, derived from CLI arguments
#[derive(Debug, Clone)]
pub struct EditPlan {
    pub path: PathBuf,
    pub create: bool,
    /// Evaluated against the whole buffer
    pub target: Expr,
    pub action: Action,
    pub dry_run: bool,
    pub json: bool,
}

impl CliArgs {
    /// Convert parsed CLI args into an edit plan
    pub fn into_plan(self) -> Result<EditPlan, String> {
        let position = self.position()?;
        let mut patterns = self
            .patterns
            .iter()
            .map(|source| {
                Expr::pattern(source).map_err(|e| format!("Invalid pattern {:?}: {}", source, e))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let action = match (self.insert, self.append, self.replace, self.delete) {
            (Some(text), None, None, false) => Action::insert(text),
            (None, Some(text), None, false) => Action::append(text),
            (None, None, Some(text), false) => Action::replace(text),
            (None, None, None, true) => Action::delete(),
            _ => return Err("Exactly one of --insert, --append, --replace, --delete".to_string()),
        };

        let (target, action) = if self.all {
            let last = patterns
                .pop()
                .ok_or_else(|| "--all requires at least one --pattern".to_string())?;
            let scope = match chain(position, patterns) {
                // Everything from the end of the anchor to the end of the buffer
                Some(anchor) => Expr::span(
                    Expr::after(anchor, Expr::StartRelChar(0)),
                    Expr::EndRelChar(0),
                ),
                None => whole_buffer(),
            };
            (scope, Action::repeat(last, action))
        } else {
            let target = chain(position, patterns).unwrap_or_else(whole_buffer);
            (target, action)
        };

        Ok(EditPlan {
            path: self.file,
            create: self.create,
            target,
            action,
            dry_run: self.dry_run,
            json: self.json,
        })
    }

    fn position(&self) -> Result<Option<Expr>, String> {
        if let Some(offset) = self.at {
            return Ok(Some(Expr::Char(offset)));
        }
        if let Some(line) = self.line {
            return Ok(Some(Expr::Line(line)));
        }
        match &self.grid {
            Some(grid) => {
                let (line, column) = parse_grid(grid)?;
                Ok(Some(Expr::Grid { line, column }))
            }
            None => Ok(None),
        }
    }
}

/// `LINE:COLUMN`
fn parse_grid(s: &str) -> Result<(usize, usize), String> {
    let invalid = || format!("Invalid --grid {:?}, expected LINE:COLUMN", s);
    let (line, column) = s.split_once(':').ok_or_else(invalid)?;
    let line = line.trim().parse().map_err(|_| invalid())?;
    let column = column.trim().parse().map_err(|_| invalid())?;
    Ok((line, column))
}

/// Each expression is searched for after the previous one's result
fn chain(position: Option<Expr>, patterns: Vec<Expr>) -> Option<Expr> {
    position
        .into_iter()
        .chain(patterns)
        .reduce(|anchor, next| Expr::after(anchor, next))
}

fn whole_buffer() -> Expr {
    Expr::span(Expr::StartRelChar(0), Expr::EndRelChar(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::GapBuffer;
    use crate::selection::Range;

    fn plan(args: &[&str]) -> Result<EditPlan, String> {
        let mut argv = vec!["carve"];
        argv.extend_from_slice(args);
        CliArgs::try_parse_from(argv)
            .map_err(|e| e.to_string())?
            .into_plan()
    }

    fn run(args: &[&str], text: &str) -> String {
        let plan = plan(args).unwrap();
        let mut buffer = GapBuffer::from_text(text);
        let target = plan.target.eval(&buffer, &Range::whole()).unwrap();
        plan.action.execute(&mut buffer, &target).unwrap();
        buffer.to_string()
    }

    #[test]
    fn test_action_is_required() {
        assert!(plan(&["file.txt"]).is_err());
    }

    #[test]
    fn test_only_one_action_allowed() {
        assert!(plan(&["file.txt", "--insert", "a", "--delete"]).is_err());
    }

    #[test]
    fn test_only_one_position_allowed() {
        assert!(plan(&["file.txt", "--at", "1", "--line", "2", "--delete"]).is_err());
    }

    #[test]
    fn test_all_requires_pattern() {
        let err = plan(&["file.txt", "--all", "--delete"]).unwrap_err();
        assert!(err.contains("--pattern"));
    }

    #[test]
    fn test_bad_pattern_is_reported() {
        let err = plan(&["file.txt", "--pattern", "(", "--delete"]).unwrap_err();
        assert!(err.contains("Invalid pattern"));
    }

    #[test]
    fn test_parse_grid() {
        assert_eq!(parse_grid("3:4"), Ok((3, 4)));
        assert!(parse_grid("3").is_err());
        assert!(parse_grid("a:1").is_err());
    }

    #[test]
    fn test_no_selection_replaces_whole_buffer() {
        assert_eq!(run(&["f", "--replace", "new"], "old text"), "new");
    }

    #[test]
    fn test_insert_at_line() {
        assert_eq!(run(&["f", "--line", "2", "--insert", "> "], "a\nb\n"), "a\n> b\n");
    }

    #[test]
    fn test_negative_offset() {
        assert_eq!(run(&["f", "--at", "-1", "--insert", "!"], "abc"), "ab!c");
    }

    #[test]
    fn test_patterns_chain_after_each_other() {
        let out = run(
            &["f", "--pattern", "b", "--pattern", "a", "--replace", "A"],
            "a b a",
        );
        assert_eq!(out, "a b A");
    }

    #[test]
    fn test_all_after_position() {
        let out = run(
            &["f", "--line", "2", "--pattern", "x", "--all", "--replace", "y"],
            "xx\nxx\n",
        );
        assert_eq!(out, "xx\nyy\n");
    }

    #[test]
    fn test_replace_with_capture_template() {
        let out = run(
            &["f", "--pattern", "(\\w+)=(\\w+)", "--all", "--replace", "$2=$1"],
            "a=1 b=2",
        );
        assert_eq!(out, "1=a 2=b");
    }
}
