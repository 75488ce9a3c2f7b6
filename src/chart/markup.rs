//! Pre-rendered markup for the word cloud, heat map and placeholders

use maud::{Markup, html};

use super::ChartSlot;
use crate::shaping::{CloudWord, HeatGrid};
use crate::style::StyleConfig;

pub(super) fn word_cloud(words: &[CloudWord]) -> Markup {
    html! {
        div class="word-cloud" {
            @for word in words {
                span
                    class="cloud-word"
                    style=(format!(
                        "font-size: {:.1}px; color: {}; font-weight: {};",
                        word.font_size,
                        word.color,
                        if word.bold { "bold" } else { "normal" }
                    ))
                { (word.text) }
                " "
            }
        }
    }
}

pub(super) fn heat_map(grid: &HeatGrid) -> Markup {
    html! {
        table class="heat-map" {
            caption { (format!("Busiest hour: {} emails", grid.max)) }
            thead {
                tr {
                    th {}
                    @for hour in 0..24 {
                        th { (format!("{:02}", hour)) }
                    }
                }
            }
            tbody {
                @for row in &grid.rows {
                    tr {
                        th { (row.day) }
                        @for cell in &row.cells {
                            td
                                style=(format!("background-color: {};", cell.color))
                                data-intensity=(format!("{:.2}", cell.intensity))
                                title=(format!("{} {:02}:00 - {} emails", row.day, cell.hour, cell.value))
                            {}
                        }
                    }
                }
            }
        }
    }
}

pub(super) fn placeholder(slot: &ChartSlot, style: &StyleConfig) -> Markup {
    html! {
        div class="chart-placeholder" style=(format!("color: {};", style.muted_text_color)) {
            div class="placeholder-icon" { (slot.icon) }
            p class="placeholder-title" { (slot.empty_title) }
            p class="placeholder-hint" { (slot.empty_hint) }
        }
    }
}
