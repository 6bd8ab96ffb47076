use crate::output::print_json;
use anyhow::Context;
use chrono::NaiveDateTime;
use forge_core::dates::parse_instant;
use forge_core::{ForgeWindow, LifecyclePhase};
use serde::Serialize;

#[derive(Serialize)]
struct PhaseReport {
    #[serde(flatten)]
    window: ForgeWindow,
    open_ended: bool,
    /// Absent when classified against the system clock.
    #[serde(skip_serializing_if = "Option::is_none")]
    now: Option<NaiveDateTime>,
    phase: LifecyclePhase,
}

pub fn run(
    start: Option<&str>,
    end: Option<&str>,
    now: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let window = ForgeWindow::parse(start, end).context("invalid forge window")?;
    let (now, phase) = match now {
        Some(s) => {
            let at = parse_instant(s).context("invalid --now")?;
            (Some(at), window.phase_at(at))
        }
        None => (None, window.phase_now()),
    };

    if json {
        print_json(&PhaseReport {
            window,
            open_ended: window.is_open_ended(),
            now,
            phase,
        })?;
    } else {
        println!("{phase}");
    }
    Ok(())
}
