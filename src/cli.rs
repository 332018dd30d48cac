//! Command line front end: run the detection pipeline over plain text.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Result, bail};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use crate::analysis::{find_candidates, normalize};
use crate::config::{Settings, SettingsStore};
use crate::domain::{DurationDescription, WageSummary, WageType, describe};
use crate::engine::{HoverEngine, MoveOutcome, PointerMove, RecordingRenderer};
use crate::page::StaticPage;
use crate::utils::format_price;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Translate prices into hours of work", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub settings: SettingsArgs,

    /// Print JSON instead of human readable lines
    #[arg(long, global = true, default_value_t = false)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Settings file plus per-field overrides applied on top of it.
#[derive(Args, Debug, Clone, Default)]
pub struct SettingsArgs {
    /// JSON settings file (missing file means defaults)
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,

    #[arg(long, global = true)]
    pub wage_type: Option<WageType>,

    #[arg(long, global = true)]
    pub wage: Option<f64>,

    #[arg(long, global = true)]
    pub hours_per_week: Option<f64>,

    #[arg(long, global = true)]
    pub take_home_percent: Option<f64>,

    /// Log per-scan diagnostics
    #[arg(long, global = true, default_value_t = false)]
    pub debug: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List every price in TEXT with its time cost
    Scan { text: String },
    /// Lay TEXT out on a character grid and hover at (X, Y)
    Hover {
        text: String,
        #[arg(allow_negative_numbers = true)]
        x: f64,
        #[arg(allow_negative_numbers = true)]
        y: f64,
    },
    /// Time cost of a single amount
    Describe { amount: f64 },
    /// Effective hourly rate and net annual pay
    Summary,
    /// Write the resolved settings (file plus overrides) back to --settings
    Save,
}

impl SettingsArgs {
    /// File-backed when `--settings` is given, defaults otherwise.
    pub fn store(&self) -> SettingsStore {
        match &self.settings {
            Some(path) => SettingsStore::open(path),
            None => SettingsStore::in_memory(Settings::default()),
        }
    }

    pub fn apply_overrides(&self, mut settings: Settings) -> Settings {
        if let Some(wage_type) = self.wage_type {
            settings.wage_type = wage_type;
        }
        if let Some(wage) = self.wage {
            settings.wage = wage;
        }
        if let Some(hours) = self.hours_per_week {
            settings.hours_per_week = hours;
        }
        if let Some(percent) = self.take_home_percent {
            settings.take_home_percent = percent;
        }
        settings.debug_enabled |= self.debug;
        settings
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SummaryReport {
    pub wage_label: &'static str,
    pub wage: f64,
    pub summary: Option<WageSummary>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScanRow {
    pub currency: String,
    pub raw_amount: String,
    pub suffix: Option<String>,
    pub start_offset: usize,
    pub end_offset: usize,
    pub value: Option<f64>,
    pub description: Option<DurationDescription>,
}

/// Every candidate in `text`, including those that fail to normalize.
pub fn scan_rows(text: &str, settings: &Settings) -> Vec<ScanRow> {
    let rate = settings.effective_hourly_rate();
    find_candidates(text)
        .map(|candidate| {
            let value = normalize(&candidate.raw_amount, candidate.suffix.as_deref()).ok();
            ScanRow {
                description: value.and_then(|v| describe(v.value(), rate)),
                value: value.map(|v| v.value()),
                currency: candidate.currency,
                raw_amount: candidate.raw_amount,
                suffix: candidate.suffix,
                start_offset: candidate.start_offset,
                end_offset: candidate.end_offset,
            }
        })
        .collect()
}

/// One pointer-move plus its frame through the engine. Returns the renderer log.
pub fn hover_once(text: &str, x: f64, y: f64, settings: Settings) -> RecordingRenderer {
    let page = StaticPage::from_text(text);
    let mut engine = HoverEngine::new(Arc::new(settings), RecordingRenderer::new());
    if engine.on_pointer_move(PointerMove::new(x, y, page.path_at(x, y)))
        == MoveOutcome::FrameRequested
    {
        engine.on_frame(&page);
    }
    log::debug!("hover stats: {:?}", engine.stats());
    engine.renderer().clone()
}

/// Execute `cli` and return what should be printed.
pub fn run(cli: &Cli) -> Result<String> {
    let store = cli.settings.store();
    let settings = cli.settings.apply_overrides((*store.snapshot()).clone());
    log::debug!("resolved settings: {settings:?}");

    match &cli.command {
        Command::Scan { text } => {
            let rows = scan_rows(text, &settings);
            if cli.json {
                return Ok(serde_json::to_string_pretty(&rows)?);
            }
            if rows.is_empty() {
                return Ok("no prices found".to_string());
            }
            let lines: Vec<String> = rows.iter().map(scan_line).collect();
            Ok(lines.join("\n"))
        }
        Command::Hover { text, x, y } => {
            if text.trim().is_empty() {
                bail!("nothing to hover over: text is empty");
            }
            let rendered = hover_once(text, *x, *y, settings);
            if cli.json {
                return Ok(serde_json::to_string_pretty(&rendered.commands)?);
            }
            Ok(match rendered.last() {
                Some(crate::engine::RenderCommand::Show {
                    description, price, ..
                }) => format!("{}: {}", price, description_line(description)),
                _ => "no price under the pointer".to_string(),
            })
        }
        Command::Describe { amount } => {
            let description = describe(*amount, settings.effective_hourly_rate());
            if cli.json {
                return Ok(serde_json::to_string_pretty(&description)?);
            }
            Ok(match description {
                Some(d) => description_line(&d),
                None => "no description (check amount and wage)".to_string(),
            })
        }
        Command::Summary => {
            let report = SummaryReport {
                wage_label: settings.wage_type.wage_label(),
                wage: settings.wage,
                summary: settings.wage_config().summary(),
            };
            if cli.json {
                return Ok(serde_json::to_string_pretty(&report)?);
            }
            let wage_line = format!("{}: {}", report.wage_label, format_price(report.wage));
            Ok(match report.summary {
                Some(s) => format!("{wage_line}\n{}\n{}", s.hourly_line(), s.annual_line()),
                None => format!("{wage_line}\nset a wage to see your summary"),
            })
        }
        Command::Save => {
            let Some(path) = &cli.settings.settings else {
                bail!("save needs --settings <FILE>");
            };
            store.update(settings)?;
            // Echo what a fresh read of the file now yields
            let saved = store.reload();
            log::info!("settings saved to {}", path.display());
            Ok(serde_json::to_string_pretty(&*saved)?)
        }
    }
}

fn scan_line(row: &ScanRow) -> String {
    let label = format!(
        "{}{}{}",
        row.currency,
        row.raw_amount,
        row.suffix.as_deref().unwrap_or("")
    );
    match (row.value, &row.description) {
        (Some(value), Some(d)) => {
            format!("{label} = {} -> {}", format_price(value), description_line(d))
        }
        (Some(value), None) => format!("{label} = {}", format_price(value)),
        (None, _) => format!("{label} (unparseable)"),
    }
}

fn description_line(d: &DurationDescription) -> String {
    if d.secondary.is_empty() {
        d.primary.clone()
    } else {
        format!("{} ({})", d.primary, d.secondary)
    }
}
