use analytics::{PeriodAnalysis, PeriodComparator, PriceStore, Report};
use clap::{Parser, Subcommand};
use comfy_table::{presets::UTF8_FULL, Table};
use configuration::ConfigArgs;
use core_types::Period;
use database::{connect, run_migrations, DbRepository};
use rust_decimal::Decimal;
use std::sync::Arc;

/// The main entry point for the Stockscope application.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command-line arguments
    let cli = Cli::parse();

    let config = cli.config.load()?;
    let _guard = configuration::init_tracing(&config.logging);

    // Execute the appropriate command
    match cli.command {
        Commands::Serve => web_server::run_server(&config).await?,
        Commands::Migrate => {
            let pool = connect(&config.database).await?;
            run_migrations(&pool).await?;
            tracing::info!("Migrations applied; exiting.");
        }
        Commands::Analyze(args) => {
            let pool = connect(&config.database).await?;
            let store: Arc<dyn PriceStore> = Arc::new(DbRepository::new(pool));
            let comparator = PeriodComparator::new(store);
            let report = comparator.analyze(&args.symbol, &args.from, &args.to).await?;

            if args.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", render_report(&report));
            }
        }
    }

    Ok(())
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Daily price analytics for tracked instruments.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    config: ConfigArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API.
    Serve,
    /// Apply database migrations and exit.
    Migrate,
    /// Compare a date window with the windows before and after it.
    Analyze(AnalyzeArgs),
}

#[derive(Parser)]
struct AnalyzeArgs {
    /// The instrument symbol (case-insensitive).
    #[arg(long)]
    symbol: String,

    /// Window start (format: YYYY-MM-DD).
    #[arg(long)]
    from: String,

    /// Window end (format: YYYY-MM-DD).
    #[arg(long)]
    to: String,

    /// Print the raw JSON report instead of a table.
    #[arg(long)]
    json: bool,
}

// ==============================================================================
// Report Rendering
// ==============================================================================

fn format_profit(profit: Option<Decimal>) -> String {
    profit.map_or_else(|| "n/a".to_string(), |p| p.normalize().to_string())
}

fn period_row(period: Period, analysis: &PeriodAnalysis) -> Vec<String> {
    let buy = &analysis.extremes.best_buying_price;
    let sell = &analysis.extremes.best_selling_price;
    vec![
        period.to_string(),
        format!("{} @ {}", buy.date, buy.closing_price.normalize()),
        format!("{} @ {}", sell.date, sell.closing_price.normalize()),
        format_profit(analysis.extremes.profit),
        analysis.multy_trade_max_profit.normalize().to_string(),
    ]
}

/// Renders a report as a table with one row per period that had data.
fn render_report(report: &Report) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec![
        "Period",
        "Best buy",
        "Best sell",
        "Profit",
        "Multi-trade profit",
    ]);

    for period in [Period::Previous, Period::Current, Period::Next] {
        if let Some(analysis) = report.analysis.period(period) {
            table.add_row(period_row(period, analysis));
        }
    }

    let higher = if report.higher_profit_symbols.is_empty() {
        "none".to_string()
    } else {
        report.higher_profit_symbols.join(", ")
    };

    format!(
        "{} {} to {}\n{}\nHigher multi-trade profit: {}",
        report.metadata.symbol, report.metadata.start_date, report.metadata.end_date, table, higher
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use analytics::{Analysis, ExtremesResult, PricePoint, ReportMetadata};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 1, d).unwrap()
    }

    fn analysis(buy: Decimal, sell: Decimal, multi: Decimal) -> PeriodAnalysis {
        PeriodAnalysis {
            extremes: ExtremesResult {
                best_buying_price: PricePoint { date: day(2), closing_price: buy },
                best_selling_price: PricePoint { date: day(3), closing_price: sell },
                profit: sell.checked_sub(buy),
            },
            multy_trade_max_profit: multi,
        }
    }

    #[test]
    fn table_lists_present_periods_and_higher_symbols() {
        let report = Report {
            analysis: Analysis {
                current_period: analysis(dec!(8.50), dec!(13), dec!(4.5)),
                previous_period: None,
                next_period: Some(analysis(dec!(12.5), dec!(15), dec!(2.5))),
            },
            higher_profit_symbols: vec!["xyz".to_string()],
            metadata: ReportMetadata {
                symbol: "ABC".to_string(),
                start_date: day(1),
                end_date: day(3),
            },
        };

        let rendered = render_report(&report);
        assert!(rendered.starts_with("ABC 2020-01-01 to 2020-01-03"));
        assert!(rendered.contains("current"));
        assert!(rendered.contains("next"));
        assert!(!rendered.contains("previous"));
        assert!(rendered.contains("2020-01-02 @ 8.5"));
        assert!(rendered.ends_with("Higher multi-trade profit: xyz"));
    }

    #[test]
    fn missing_profit_renders_as_not_available() {
        assert_eq!(format_profit(None), "n/a");
        assert_eq!(format_profit(Some(dec!(4.50))), "4.5");
    }
}
