use crate::output::{print_json, print_table};
use anyhow::Context;
use clap::ValueEnum;
use forge_core::config::Config;
use forge_core::sidebar::{use_sidebar, SidebarHandle, SidebarProvider, SidebarState};
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SidebarOp {
    /// Invert the current state
    Toggle,
    /// Set collapsed = true
    Collapse,
    /// Set collapsed = false
    Expand,
}

impl SidebarOp {
    fn as_str(self) -> &'static str {
        match self {
            SidebarOp::Toggle => "toggle",
            SidebarOp::Collapse => "collapse",
            SidebarOp::Expand => "expand",
        }
    }

    fn apply(self, sidebar: &SidebarHandle) -> forge_core::Result<()> {
        match self {
            SidebarOp::Toggle => sidebar.toggle(),
            SidebarOp::Collapse => sidebar.set_collapsed(true),
            SidebarOp::Expand => sidebar.set_collapsed(false),
        }
    }
}

#[derive(Serialize)]
struct Step {
    op: &'static str,
    #[serde(flatten)]
    state: SidebarState,
}

#[derive(Serialize)]
struct SidebarReport {
    viewport_width: Option<u32>,
    breakpoint: u32,
    collapsed: bool,
    steps: Vec<Step>,
}

pub fn run(
    root: &Path,
    width: Option<u32>,
    breakpoint: Option<u32>,
    ops: &[SidebarOp],
    json: bool,
) -> anyhow::Result<()> {
    let mut config = Config::load_or_default(root).context("failed to load config")?;
    if let Some(bp) = breakpoint {
        config.layout.collapse_breakpoint = bp;
    }

    let provider = config.mount_sidebar(width);
    let report = replay(&provider, ops)?;
    provider.unmount();

    let report = SidebarReport {
        viewport_width: width,
        breakpoint: config.layout.collapse_breakpoint,
        collapsed: report.last().map(|s| s.state.collapsed()).unwrap_or_default(),
        steps: report,
    };

    if json {
        print_json(&report)?;
    } else {
        let rows = report
            .steps
            .iter()
            .map(|s| vec![s.op.to_string(), s.state.collapsed().to_string()])
            .collect();
        print_table(&["STEP", "COLLAPSED"], rows);
    }
    Ok(())
}

fn replay(provider: &SidebarProvider, ops: &[SidebarOp]) -> anyhow::Result<Vec<Step>> {
    let handle = provider.handle();
    let sidebar = use_sidebar(Some(&handle))?;

    let mut steps = vec![Step {
        op: "mount",
        state: sidebar.snapshot()?,
    }];
    for op in ops {
        op.apply(&sidebar)
            .with_context(|| format!("sidebar {} failed", op.as_str()))?;
        steps.push(Step {
            op: op.as_str(),
            state: sidebar.snapshot()?,
        });
    }
    Ok(steps)
}
