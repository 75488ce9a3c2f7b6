use colored::*;

use crate::chart::find_slot;
use crate::dispatch::{RenderReport, SlotStatus};
use crate::ui::UiState;

const SLOT_COLUMN: usize = 20;

fn style_label(label: &str) -> ColoredString {
    label.bold()
}

pub(crate) fn print_error(msg: &str) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

pub(crate) fn print_warning(msg: &str) {
    eprintln!("{}: {}", "warning".yellow().bold(), msg);
}

fn print_separator(width: usize) {
    println!("{}", "-".repeat(width));
}

pub(crate) fn format_status(status: &SlotStatus) -> ColoredString {
    match status {
        SlotStatus::Drawn(kind) => kind.name().green(),
        SlotStatus::Fallback(kind) => format!("{} (fallback)", kind).yellow(),
        SlotStatus::Placeholder => "placeholder".dimmed(),
        SlotStatus::Failed(_) => "failed".red().bold(),
        SlotStatus::NotReached => "not reached".red(),
    }
}

/// Per-slot summary table
pub(crate) fn print_report(report: &RenderReport, quiet: bool) {
    println!("[Slots]");
    print_separator(SLOT_COLUMN + 32);
    for outcome in &report.outcomes {
        let title = find_slot(outcome.slot_id).map(|s| s.title).unwrap_or("");
        print!(
            "{:<width$} {}",
            style_label(outcome.slot_id),
            format_status(&outcome.status),
            width = SLOT_COLUMN
        );
        if !quiet {
            print!("  {}", title.dimmed());
        }
        println!();
        if let SlotStatus::Failed(reason) = &outcome.status {
            println!("{:<width$} {}", "", reason.red(), width = SLOT_COLUMN);
        }
    }
    print_separator(SLOT_COLUMN + 32);
    println!(
        "Drawn: {}/{}",
        report.drawn(),
        report.outcomes.len()
    );
}

pub(crate) fn print_prefs(ui: &UiState) {
    let on_off = |on: bool| if on { "on".green() } else { "off".dimmed() };
    println!("{:<18} {}", style_label("sidebar-collapsed"), on_off(ui.sidebar_collapsed()));
    println!("{:<18} {}", style_label("dark-mode"), on_off(ui.dark_mode()));
}

pub(crate) fn print_legend() {
    println!("bar, bubble, radar, ...: chart drawn from the payload");
    println!("fallback: data too thin for the primary chart, a simpler chart was drawn");
    println!("placeholder: no usable data for this slot");
    println!("not reached: rendering stopped early after a failure");
}
