#[cfg(feature = "dhat-heap")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

use std::io::Write;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use carve::cli::{CliArgs, EditPlan};
use carve::error::{EditResult, ResultCode};
use carve::session::{Origin, Session};
use carve::EditorConfig;

/// Printed with `--json`
#[derive(Debug, Serialize)]
struct Report {
    code: ResultCode,
    length: Option<usize>,
    written: bool,
}

fn main() -> Result<ExitCode> {
    #[cfg(feature = "dhat-heap")]
    let _profiler = dhat::Profiler::new_heap();

    let args = CliArgs::parse();
    let file_logging = carve::tracing::init(args.verbose);
    tracing::debug!(file_logging, "logging initialized");

    let plan = args.into_plan().map_err(anyhow::Error::msg)?;
    let mut session = Session::new(EditorConfig::load());

    let outcome = run(&mut session, &plan);
    let code = ResultCode::of(&outcome);
    tracing::debug!(%code, "edit finished");

    if plan.json {
        let report = Report {
            code,
            length: session.active().map(|buffer| buffer.len()),
            written: matches!(outcome, Ok(true)),
        };
        println!("{}", serde_json::to_string(&report)?);
    } else if let Err(err) = &outcome {
        eprintln!("carve: {}: {}", plan.path.display(), err);
    } else if plan.dry_run {
        if let Some(buffer) = session.active() {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(&buffer.contents())
                .context("Failed to write to stdout")?;
            stdout.flush()?;
        }
    }

    Ok(exit_code(code))
}

fn exit_code(code: ResultCode) -> ExitCode {
    if code.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Open, edit and (unless dry-running) write back. Returns whether the file
/// was written.
fn run(session: &mut Session, plan: &EditPlan) -> EditResult<bool> {
    session.open(&plan.path, plan.create)?;
    let target = session.apply(&plan.target, &plan.action, Origin::WholeBuffer)?;
    tracing::debug!(?target, "applied edit");
    if plan.dry_run {
        return Ok(false);
    }
    Ok(session.write_all()? > 0)
}
