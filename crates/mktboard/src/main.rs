//! mktboard - Marketing Analytics Dashboard

mod cli;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
use mktboard_core::analytics::{platform_totals, top_countries, traffic_shares};
use mktboard_core::export::{export_analytics_to_json, export_posts_to_csv, export_timeline_to_csv};
use mktboard_core::view::{summary_cards, RawDataView};
use mktboard_core::{
    build_calendar, Action, ActivityLookup, AnalyticsData, DashboardConfig, DashboardState,
    DateRange, GeneratorConfig, Granularity, HeatmapSelection, PlatformFilter, Tab,
};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "mktboard",
    version,
    about = "Marketing Analytics Dashboard",
    long_about = "Terminal dashboard for the marketing analytics feed.\n\
                  \n\
                  Shows sales, traffic, social posts and a marketing-activity heat-map\n\
                  from an exported analyticsData JSON file, or from synthetic data\n\
                  when no file is configured.\n\
                  \n\
                  Examples:\n\
                    mktboard                                   # Overview cards (default)\n\
                    mktboard table --range 7d                  # Last 7 days, newest first\n\
                    mktboard table --start 2026-01-01 --end 2026-01-10\n\
                    mktboard heatmap --view quarter            # Quarter heat-map\n\
                    mktboard heatmap --year 2025 --month 12    # A specific month\n\
                    mktboard social --platform tiktok          # TikTok posts only\n\
                    mktboard weekly --json                     # Any panel as JSON\n\
                    mktboard export --format csv -o out.csv    # Raw data as CSV\n\
                    mktboard generate --days 90 --seed 7 -o data.json\n\
                  \n\
                  Environment Variables:\n\
                    MKTBOARD_DATA                              # analyticsData JSON file\n\
                    MKTBOARD_CONFIG                            # Config file path\n\
                    MKTBOARD_NO_COLOR                          # Disable ANSI colors\n\
                    MKTBOARD_LOG                               # Log filter (e.g. debug)"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Exported analyticsData JSON file (default: synthetic data)
    #[arg(long, global = true, env = "MKTBOARD_DATA")]
    data: Option<PathBuf>,

    /// Config file (default: <config dir>/mktboard/config.json)
    #[arg(long, global = true, env = "MKTBOARD_CONFIG")]
    config: Option<PathBuf>,

    /// Disable ANSI colors (log-friendly)
    #[arg(long, global = true, env = "MKTBOARD_NO_COLOR")]
    no_color: bool,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum ViewArg {
    Month,
    Quarter,
    Year,
}

impl From<ViewArg> for Granularity {
    fn from(v: ViewArg) -> Self {
        match v {
            ViewArg::Month => Granularity::Month,
            ViewArg::Quarter => Granularity::Quarter,
            ViewArg::Year => Granularity::Year,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ExportFormat {
    /// Raw-data table as CSV
    Csv,
    /// Social posts as CSV
    Posts,
    /// Full analyticsData JSON
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Overview cards: revenue, orders, visitors, posts
    Summary,
    /// Raw daily data for a range, newest first
    Table {
        /// Lookback: 7d, 30d, 60d, 90d or all
        #[arg(long, short = 'r', default_value = "30d")]
        range: String,
        /// Custom range start (YYYY-MM-DD), requires --end
        #[arg(long)]
        start: Option<String>,
        /// Custom range end (YYYY-MM-DD), requires --start
        #[arg(long)]
        end: Option<String>,
    },
    /// Marketing-activity heat-map calendar
    Heatmap {
        /// Year (default: year of the latest data)
        #[arg(long)]
        year: Option<i32>,
        /// Month 1-12 (default: month of the latest data)
        #[arg(long)]
        month: Option<u32>,
        /// Granularity (default from config)
        #[arg(long, value_enum)]
        view: Option<ViewArg>,
        /// Move this many periods forward (negative: back)
        #[arg(long, allow_hyphen_values = true, default_value = "0")]
        shift: i32,
    },
    /// Social media posts with engagement and impact
    Social {
        /// Platform filter: all, instagram, tiktok, pinterest, facebook, youtube
        #[arg(long, short = 'p', default_value = "all")]
        platform: String,
        /// Max posts
        #[arg(long, short = 'n', default_value = "20")]
        limit: usize,
    },
    /// Weekly marketing activity rollup
    Weekly,
    /// Traffic sources with share of sessions
    Traffic,
    /// Countries by revenue
    Countries {
        /// Number of countries
        #[arg(long, short = 'n', default_value = "10")]
        top: usize,
    },
    /// Export data to a file
    Export {
        #[arg(long, short = 'f', value_enum, default_value = "csv")]
        format: ExportFormat,
        /// Destination file
        #[arg(long, short = 'o')]
        output: PathBuf,
        /// Lookback for CSV export: 7d, 30d, 60d, 90d or all
        #[arg(long, short = 'r', default_value = "all")]
        range: String,
    },
    /// Generate a synthetic analyticsData JSON file
    Generate {
        /// Days of timeline
        #[arg(long, default_value = "60")]
        days: usize,
        /// Last day (YYYY-MM-DD, default: today)
        #[arg(long)]
        end: Option<String>,
        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,
        /// Destination file
        #[arg(long, short = 'o')]
        output: PathBuf,
    },
    /// Show the effective configuration
    Config {
        /// Write the default config file if none exists
        #[arg(long)]
        init: bool,
    },
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_env("MKTBOARD_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config_path = cli.config.clone().or_else(DashboardConfig::default_path);
    let config = config_path
        .as_deref()
        .map(DashboardConfig::load)
        .unwrap_or_default();

    let output = Output {
        json: cli.json,
        no_color: cli.no_color,
    };
    let today = Local::now().date_naive();

    match cli.command.unwrap_or(Command::Summary) {
        Command::Generate {
            days,
            end,
            seed,
            output,
        } => run_generate(&config, days, end, seed, &output),
        Command::Config { init } => run_config(&config, config_path.as_deref(), init),
        command => {
            let data = load_data(cli.data.as_deref(), &config, today)?;
            let mut state = DashboardState::new(data.latest_date().unwrap_or(today));
            run_panel(command, &data, &mut state, config.default_view, output)
        }
    }
}

/// Exported file when one is configured, synthetic data otherwise
fn load_data(
    data: Option<&Path>,
    config: &DashboardConfig,
    today: NaiveDate,
) -> Result<AnalyticsData> {
    match data.or(config.data_file.as_deref()) {
        Some(path) => AnalyticsData::load(path)
            .with_context(|| format!("Failed to load analytics data from {}", path.display())),
        None => {
            tracing::info!(days = config.lookback_days, "No data file, using synthetic data");
            Ok(AnalyticsData::demo(
                today,
                config.lookback_days,
                &config.generator(),
                config.correlation_window_days,
            ))
        }
    }
}

/// Rendering flags shared by every panel
#[derive(Clone, Copy)]
struct Output {
    json: bool,
    no_color: bool,
}

/// Heat-map selection from the command-line flags
///
/// Unset flags fall back to `anchor` (the month the dashboard opened on) and
/// the configured view. The view is settled before the month so a quarter
/// default never snaps an explicit month in month view.
fn heatmap_selection(
    anchor: HeatmapSelection,
    default_view: Granularity,
    year: Option<i32>,
    month: Option<u32>,
    view: Option<ViewArg>,
) -> HeatmapSelection {
    HeatmapSelection::new(
        year.unwrap_or(anchor.year),
        month.unwrap_or(anchor.month),
        view.map(Granularity::from).unwrap_or(default_view),
    )
}

fn run_panel(
    command: Command,
    data: &AnalyticsData,
    state: &mut DashboardState,
    default_view: Granularity,
    output: Output,
) -> Result<()> {
    let Output { json, no_color } = output;
    match command {
        Command::Summary => {
            state.handle(Action::SelectTab(Tab::Overview));
            if !json {
                print_header(data);
            }
            println!("{}", cli::format_summary(&summary_cards(&data.summary), json, no_color));
        }
        Command::Table { range, start, end } => {
            state.handle(Action::SelectTab(Tab::Data));
            let range = if start.is_some() || end.is_some() {
                DateRange::custom(start.as_deref(), end.as_deref())
            } else {
                DateRange::parse(&range)
            };
            match range {
                Ok(range) => {
                    state.handle(Action::SetRange(range));
                }
                // Validation problems are shown to the user; nothing is filtered
                Err(e) if e.is_validation() => {
                    eprintln!("{}", e);
                    return Ok(());
                }
                Err(e) => return Err(e.into()),
            }
            let view = RawDataView::build(&data.timeline, &state.range);
            println!("{}", cli::format_raw_table(&view, json, no_color));
        }
        Command::Heatmap {
            year,
            month,
            view,
            shift,
        } => {
            state.handle(Action::SelectTab(Tab::Heatmap));
            let selection = heatmap_selection(state.heatmap, default_view, year, month, view);
            state.handle(Action::HeatmapSelect(selection));
            state.handle(Action::HeatmapShift(shift));

            let lookup = ActivityLookup::from_timeline(&data.timeline);
            let calendar = build_calendar(&state.heatmap, &lookup);
            println!("{}", cli::format_heatmap(&calendar, json, no_color));
        }
        Command::Social { platform, limit } => {
            state.handle(Action::SelectTab(Tab::Social));
            state.handle(Action::FilterPlatform(PlatformFilter::parse(&platform)));
            let mut posts = state.platform_filter.apply(&data.social_posts);
            if !json {
                println!(
                    "{}\n",
                    cli::format_platform_totals(&platform_totals(&data.social_posts), no_color)
                );
            }
            posts.truncate(limit);
            println!("{}", cli::format_posts(&posts, json, no_color));
        }
        Command::Weekly => {
            state.handle(Action::SelectTab(Tab::Overview));
            println!("{}", cli::format_weekly(&data.weekly_data, json, no_color));
        }
        Command::Traffic => {
            state.handle(Action::SelectTab(Tab::Traffic));
            let shares = traffic_shares(&data.traffic_sources);
            println!("{}", cli::format_traffic(&shares, json, no_color));
        }
        Command::Countries { top } => {
            state.handle(Action::SelectTab(Tab::Geography));
            let countries = top_countries(&data.countries, top);
            println!("{}", cli::format_countries(&countries, json, no_color));
        }
        Command::Export {
            format,
            output,
            range,
        } => run_export(data, format, &output, &range)?,
        // Dispatched from main without loading data
        Command::Generate { .. } | Command::Config { .. } => {}
    }

    tracing::debug!(tab = state.active_tab.name(), "Rendered panel");
    Ok(())
}

fn print_header(data: &AnalyticsData) {
    println!("mktboard - Marketing Analytics");
    println!("==============================");
    if let Some(range) = &data.date_range {
        println!("{} to {} ({} days)", range.start, range.end, data.timeline.len());
    }
    println!();
}

fn run_export(data: &AnalyticsData, format: ExportFormat, output: &Path, range: &str) -> Result<()> {
    match format {
        ExportFormat::Csv => {
            let range = DateRange::parse(range)?;
            let view = RawDataView::build(&data.timeline, &range);
            export_timeline_to_csv(&view, output)?;
            println!("Exported {} days to {}", view.rows.len(), output.display());
        }
        ExportFormat::Posts => {
            let posts: Vec<_> = data.social_posts.iter().collect();
            export_posts_to_csv(&posts, output)?;
            println!("Exported {} posts to {}", posts.len(), output.display());
        }
        ExportFormat::Json => {
            export_analytics_to_json(data, output)?;
            println!(
                "Exported {} days, {} posts to {}",
                data.timeline.len(),
                data.social_posts.len(),
                output.display()
            );
        }
    }
    Ok(())
}

fn run_generate(
    config: &DashboardConfig,
    days: usize,
    end: Option<String>,
    seed: Option<u64>,
    output: &Path,
) -> Result<()> {
    let end = match end {
        Some(s) => NaiveDate::parse_from_str(&s, "%Y-%m-%d")
            .with_context(|| format!("Invalid end date '{}' (expected YYYY-MM-DD)", s))?,
        None => Local::now().date_naive(),
    };
    let generator = GeneratorConfig {
        seed: seed.or(config.seed),
        ..config.generator()
    };

    let data = AnalyticsData::demo(end, days, &generator, config.correlation_window_days);
    export_analytics_to_json(&data, output)?;
    println!(
        "Generated {} days ending {} ({} posts) -> {}",
        data.timeline.len(),
        end,
        data.social_posts.len(),
        output.display()
    );
    Ok(())
}

fn run_config(config: &DashboardConfig, path: Option<&Path>, init: bool) -> Result<()> {
    let path = path.context("Could not determine config directory")?;

    if init {
        if path.exists() {
            println!("Config already exists at: {}", path.display());
        } else {
            config.save(path)?;
            println!("Wrote default config to: {}", path.display());
        }
    }

    println!("Config file: {}", path.display());
    println!(
        "{}",
        serde_json::to_string_pretty(config).context("Failed to serialize config")?
    );
    Ok(())
}
