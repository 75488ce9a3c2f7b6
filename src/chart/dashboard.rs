//! Dashboard page backend: collects drawn slots and writes one HTML document

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use maud::{DOCTYPE, Markup, PreEscaped, html};
use tracing::{debug, info};

use super::{ChartBackend, ChartSlot, DrawHandle, RenderError, SLOTS, echarts, markup};
use crate::shaping::Encoding;
use crate::style::StyleConfig;
use crate::ui::{DARK_MODE_KEY, DEBOUNCE_QUIET_MS, SIDEBAR_COLLAPSED_KEY, Theme, UiState};

const ECHARTS_SRC: &str = "https://cdn.jsdelivr.net/npm/echarts@5/dist/echarts.min.js";

/// What a slot shows on the page
#[derive(Debug, Clone)]
enum Panel {
    /// Options for both themes so the page can switch without a re-render
    Echarts { light: String, dark: String },
    Markup(Markup),
    Placeholder(Markup),
}

/// Backend that renders every slot into a single dashboard document
#[derive(Debug, Default)]
pub(crate) struct DashboardBackend {
    panels: HashMap<&'static str, Panel>,
    image_dir: Option<PathBuf>,
    exported: Vec<PathBuf>,
}

impl DashboardBackend {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Also export ECharts slots as `<dir>/<slot-id>.png`
    pub(crate) fn with_image_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.image_dir = Some(dir.into());
        self
    }

    /// Images written so far
    pub(crate) fn exported_images(&self) -> &[PathBuf] {
        &self.exported
    }

    /// Render the whole page as a projection of `ui`
    pub(crate) fn page(&self, ui: &UiState) -> Markup {
        let style = StyleConfig::for_theme(ui.theme);
        let light = StyleConfig::light();
        let dark = StyleConfig::dark();

        html! {
            (DOCTYPE)
            html lang="en" {
                head {
                    meta charset="utf-8";
                    meta name="viewport" content="width=device-width, initial-scale=1";
                    title { "Email Report Dashboard" }
                    script src=(ECHARTS_SRC) {}
                    style { (PreEscaped(stylesheet(&light, &dark))) }
                }
                body class=(ui.body_class()) {
                    aside id="sidebar" {
                        button id="sidebar-toggle" type="button" title="Toggle sidebar" { "\u{2630}" }
                        nav {
                            @for slot in &SLOTS {
                                a href=(format!("#{}", slot.slot_id)) { (slot.title) }
                            }
                        }
                        button id="dark-mode-toggle" type="button" title="Toggle dark mode" { "\u{25D0}" }
                    }
                    main {
                        @for slot in &SLOTS {
                            section class="card" id=(slot.slot_id) {
                                (self.panel_markup(slot, &style))
                            }
                        }
                    }
                    script { (PreEscaped(self.init_script(&style))) }
                }
            }
        }
    }

    /// Write the page to `path`
    pub(crate) fn write_page(&self, path: &Path, ui: &UiState) -> Result<(), RenderError> {
        let page = self.page(ui).into_string();
        std::fs::write(path, &page)?;
        info!(path = %path.display(), bytes = page.len(), "dashboard written");
        Ok(())
    }

    fn panel_markup(&self, slot: &ChartSlot, style: &StyleConfig) -> Markup {
        match self.panels.get(slot.slot_id) {
            Some(Panel::Echarts { .. }) => html! {
                div class="chart" id=(chart_element_id(slot)) {}
            },
            Some(Panel::Markup(body)) => html! {
                h2 { (slot.title) }
                (body)
            },
            Some(Panel::Placeholder(body)) => html! {
                h2 { (slot.title) }
                (body)
            },
            // Not reached by the last render
            None => html! {
                h2 { (slot.title) }
                (markup::placeholder(slot, style))
            },
        }
    }

    fn init_script(&self, style: &StyleConfig) -> String {
        let charts = SLOTS
            .iter()
            .filter_map(|slot| match self.panels.get(slot.slot_id) {
                Some(Panel::Echarts { light, dark }) => Some(format!(
                    r#"  charts.push({{
    chart: echarts.init(document.getElementById("{}")),
    light: common({}),
    dark: common({}),
  }});"#,
                    chart_element_id(slot),
                    light,
                    dark,
                )),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            r#"(function() {{
  const charts = [];
  const common = (option) => {{
    option.animationDuration = {animation};
    option.textStyle = {{ fontFamily: {font:?} }};
    return option;
  }};
{charts}

  const KEYS = {{ sidebar: "{sidebar_key}", dark: "{dark_key}" }};
  const load = (key) => localStorage.getItem(key) === "true";
  let state = {{ sidebarCollapsed: load(KEYS.sidebar), darkMode: load(KEYS.dark) }};

  function project(s) {{
    document.body.classList.toggle("sidebar-collapsed", s.sidebarCollapsed);
    document.body.classList.toggle("dark-mode", s.darkMode);
    charts.forEach((c) => c.chart.setOption(s.darkMode ? c.dark : c.light, true));
  }}

  function transition(s, event) {{
    switch (event) {{
      case "toggle-sidebar": return {{ ...s, sidebarCollapsed: !s.sidebarCollapsed }};
      case "toggle-dark-mode": return {{ ...s, darkMode: !s.darkMode }};
      default: return s;
    }}
  }}

  function dispatch(event) {{
    state = transition(state, event);
    localStorage.setItem(KEYS.sidebar, String(state.sidebarCollapsed));
    localStorage.setItem(KEYS.dark, String(state.darkMode));
    project(state);
  }}

  if (localStorage.getItem(KEYS.sidebar) === null) state.sidebarCollapsed = document.body.classList.contains("sidebar-collapsed");
  if (localStorage.getItem(KEYS.dark) === null) state.darkMode = document.body.classList.contains("dark-mode");
  project(state);

  document.getElementById("sidebar-toggle").addEventListener("click", () => dispatch("toggle-sidebar"));
  document.getElementById("dark-mode-toggle").addEventListener("click", () => dispatch("toggle-dark-mode"));

  let resizeTimer = null;
  window.addEventListener("resize", () => {{
    clearTimeout(resizeTimer);
    resizeTimer = setTimeout(() => charts.forEach((c) => c.chart.resize()), {quiet});
  }});
}})();"#,
            animation = style.animation_ms,
            font = style.font_family,
            charts = charts,
            sidebar_key = SIDEBAR_COLLAPSED_KEY,
            dark_key = DARK_MODE_KEY,
            quiet = DEBOUNCE_QUIET_MS,
        )
    }
}

fn chart_element_id(slot: &ChartSlot) -> String {
    format!("chart-{}", slot.slot_id)
}

fn stylesheet(light: &StyleConfig, dark: &StyleConfig) -> String {
    format!(
        r#"body {{ margin: 0; display: flex; font-family: {font}; background: {bg}; color: {fg}; }}
body.dark-mode {{ background: {dark_bg}; color: {dark_fg}; }}
#sidebar {{ width: 220px; padding: 1rem; transition: width 0.3s ease; overflow: hidden; }}
#sidebar nav a {{ display: block; padding: 0.25rem 0; color: inherit; text-decoration: none; }}
body.sidebar-collapsed #sidebar {{ width: 48px; }}
body.sidebar-collapsed #sidebar nav {{ display: none; }}
main {{ flex: 1; display: grid; grid-template-columns: repeat(auto-fill, minmax(460px, 1fr)); gap: 1rem; padding: 1rem; }}
.card {{ background: {card}; border-radius: 8px; padding: 1rem; min-height: 380px; animation: fade-in 0.4s ease; }}
body.dark-mode .card {{ background: {dark_card}; }}
.card h2 {{ font-size: {title_size}px; text-align: center; margin: 0 0 1rem; }}
.chart {{ width: 100%; height: 360px; }}
.chart-placeholder {{ text-align: center; padding-top: 80px; }}
.placeholder-icon {{ font-size: 48px; }}
.placeholder-title {{ font-weight: bold; margin: 0.5rem 0 0.25rem; }}
.placeholder-hint {{ margin: 0; font-size: {label_size}px; }}
.word-cloud {{ display: flex; flex-wrap: wrap; justify-content: center; align-items: center; gap: 0.5rem 1rem; }}
.heat-map {{ border-collapse: separate; border-spacing: 2px; font-size: 10px; margin: 0 auto; }}
.heat-map td {{ width: 14px; height: 14px; border-radius: 2px; }}
@keyframes fade-in {{ from {{ opacity: 0; }} to {{ opacity: 1; }} }}
"#,
        font = light.font_family,
        bg = light.background,
        fg = light.text_color,
        dark_bg = dark.background,
        dark_fg = dark.text_color,
        card = light.card_background,
        dark_card = dark.card_background,
        title_size = light.title_font_size,
        label_size = light.label_font_size,
    )
}

impl ChartBackend for DashboardBackend {
    fn draw(
        &mut self,
        slot: &ChartSlot,
        encoding: &Encoding,
        style: &StyleConfig,
    ) -> Result<DrawHandle, RenderError> {
        let panel = match encoding {
            Encoding::WordCloud(words) => Panel::Markup(markup::word_cloud(words)),
            Encoding::HeatMap(grid) => Panel::Markup(markup::heat_map(grid)),
            _ => {
                let build = |style: &StyleConfig| {
                    echarts::build_chart(slot, encoding, style).ok_or_else(|| {
                        RenderError::Chart(format!("no chart builder for {}", encoding.kind()))
                    })
                };

                if let Some(dir) = &self.image_dir {
                    let path = dir.join(format!("{}.png", slot.slot_id));
                    echarts::save_png(&build(style)?, style, &path.to_string_lossy())?;
                    debug!(slot = slot.slot_id, path = %path.display(), "chart image saved");
                    self.exported.push(path);
                }

                Panel::Echarts {
                    light: echarts::chart_options(&build(&StyleConfig::for_theme(Theme::Light))?),
                    dark: echarts::chart_options(&build(&StyleConfig::for_theme(Theme::Dark))?),
                }
            }
        };

        self.panels.insert(slot.slot_id, panel);
        Ok(DrawHandle {
            slot_id: slot.slot_id,
            kind: encoding.kind(),
        })
    }

    fn placeholder(&mut self, slot: &ChartSlot, style: &StyleConfig) {
        self.panels
            .insert(slot.slot_id, Panel::Placeholder(markup::placeholder(slot, style)));
    }
}
