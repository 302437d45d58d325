//! Entry point for the hxs binary.

mod args;
mod tracing_setup;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use helix_switcher::memory::{MemoryHost, Session};
use helix_switcher::{
    AppConfig, HostEditor, SelectionRequest, SurfaceId, SurfaceInfo, SwitcherController,
    SwitcherEvent, ViewRegistry,
};

/// Surface id reported for the list, standing in for a real quick panel.
const LIST_SURFACE: SurfaceId = SurfaceId(0);

fn main() -> Result<()> {
    let args = args::Args::parse();

    let config = match &args.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load_default().unwrap_or_else(|err| {
            eprintln!("Warning: {err}");
            eprintln!("Using default configuration");
            AppConfig::default()
        }),
    };

    tracing_setup::init(&config.logging);

    log::info!("Starting hxs");

    let session = Session::load_from(&args.session)
        .with_context(|| format!("loading session {}", args.session.display()))?;
    let mut host = MemoryHost::from_session(session, config.switcher);
    let mut switcher = SwitcherController::new(Arc::new(ViewRegistry::new()));

    switcher.run(&mut host, args.mode);
    let Some(request) = host.last_request().cloned() else {
        report("No views to switch to");
        return Ok(());
    };
    switcher.handle(
        &mut host,
        SwitcherEvent::SurfaceActivated(SurfaceInfo {
            id: LIST_SURFACE,
            is_widget: true,
        }),
    );
    print_entries(&request);

    for &index in &args.highlights {
        switcher.handle(&mut host, SwitcherEvent::Highlight(Some(index)));
        report(&format!("preview {index}: {}", focus_line(&host)));
    }

    if let Some(selection) = args.selection() {
        switcher.handle(&mut host, SwitcherEvent::Select(selection));
        let verb = if selection.is_some() { "picked" } else { "cancelled" };
        report(&format!("{verb}: {}", focus_line(&host)));
    }

    Ok(())
}

fn focus_line(host: &MemoryHost) -> String {
    match host.active_view() {
        Some(view) => format!("{} in {}", view.id, view.group),
        None => format!("no view in {}", host.active_group()),
    }
}

#[allow(clippy::print_stdout)]
fn report(line: &str) {
    println!("{line}");
}

#[allow(clippy::print_stdout)]
fn print_entries(request: &SelectionRequest) {
    for (index, entry) in request.entries.iter().enumerate() {
        let cursor = if index == request.initial_index { '>' } else { ' ' };
        if entry.path_hint.is_empty() {
            println!("{cursor} {index:>3}  {}", entry.label);
        } else {
            println!("{cursor} {index:>3}  {}  {}", entry.label, entry.path_hint);
        }
    }
}
