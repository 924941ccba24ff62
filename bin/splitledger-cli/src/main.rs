mod settings;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use settings::Settings;
use splitledger_core::domain::{format_amount, format_signed};
use splitledger_core::report::TrendPeriod;
use splitledger_core::{
    BalanceStatus, CategoryFilter, DateRange, ExpenseFilter, LedgerEngine, LedgerSnapshot,
    ParticipantId, PeopleFilter, ReportContext,
};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Shared-expense balances and settlements from a ledger snapshot
#[derive(Parser)]
#[command(name = "splitledger", version)]
struct Cli {
    /// Ledger snapshot (JSON)
    #[arg(short, long)]
    ledger: PathBuf,

    /// Configuration file (defaults to ./splitledger.toml if present)
    #[arg(short, long)]
    config: Option<String>,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,

    #[command(flatten)]
    selection: Selection,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct Selection {
    /// Workspace to report on
    #[arg(short, long)]
    workspace: Option<String>,

    /// First day of the period (YYYY-MM-DD)
    #[arg(long, requires = "to")]
    from: Option<NaiveDate>,

    /// Last day of the period (YYYY-MM-DD)
    #[arg(long, requires = "from")]
    to: Option<NaiveDate>,

    /// Only expenses shared by all of these participants
    #[arg(long = "with-all", value_delimiter = ',')]
    exact_match: Vec<String>,

    /// Only expenses shared by any of these participants
    #[arg(long = "with-any", value_delimiter = ',')]
    any_match: Vec<String>,

    /// Drop expenses these participants paid for or share
    #[arg(long = "without", value_delimiter = ',')]
    exclude: Vec<String>,

    /// Only expenses paid by these participants
    #[arg(long = "paid-by", value_delimiter = ',')]
    paid_by: Vec<String>,

    /// Only these categories
    #[arg(long = "category", value_delimiter = ',')]
    include_categories: Vec<String>,

    /// Drop these categories
    #[arg(long = "skip-category", value_delimiter = ',')]
    exclude_categories: Vec<String>,
}

#[derive(Subcommand)]
enum Command {
    /// Net balance per participant
    Balances,
    /// Transfers that settle all balances
    Settle {
        /// Only transfers paid or received by this participant
        #[arg(long)]
        participant: Option<String>,
    },
    /// Full analytics report
    Report,
    /// Spend per day, week or month
    Trend {
        #[arg(long, default_value = "month")]
        period: TrendPeriod,
    },
}

impl Selection {
    fn context(&self) -> Result<ReportContext> {
        let ids = |raw: &[String]| -> Vec<ParticipantId> {
            raw.iter().map(|id| ParticipantId::new(id.as_str())).collect()
        };

        let date_range = match (self.from, self.to) {
            (Some(from), Some(to)) => Some(DateRange::new(from, to)?),
            _ => None,
        };

        let filter = ExpenseFilter {
            people: PeopleFilter {
                exact_match: ids(&self.exact_match),
                any_match: ids(&self.any_match),
                exclude: ids(&self.exclude),
                paid_by: ids(&self.paid_by),
            },
            categories: CategoryFilter {
                include: self.include_categories.iter().map(|c| c.as_str().into()).collect(),
                exclude: self.exclude_categories.iter().map(|c| c.as_str().into()).collect(),
            },
            date_range,
        };

        let mut context = ReportContext::new().with_filter(filter);
        if let Some(workspace) = &self.workspace {
            context = context.with_workspace(workspace.as_str());
        }
        Ok(context)
    }
}

fn init_logging(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_ledger(path: &PathBuf) -> Result<LedgerSnapshot> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read ledger {}", path.display()))?;
    let ledger: LedgerSnapshot = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse ledger {}", path.display()))?;
    debug!(
        "Loaded {} participants and {} expenses",
        ledger.participants.len(),
        ledger.expenses.len()
    );
    Ok(ledger)
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let settings = Settings::load(cli.config.as_deref())?;
    init_logging(&settings.log_level);

    let engine = LedgerEngine::new(settings.engine_config())?;
    let ledger = load_ledger(&cli.ledger)?;
    let context = cli.selection.context()?;
    let symbol = engine.config().currency_symbol.as_str();
    let epsilon = engine.config().epsilon;

    info!("Using {} settler", engine.settler_name());

    match cli.command {
        Command::Balances => {
            let report = engine.run(&ledger, &context)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report.balances)?);
                return Ok(());
            }
            for balance in &report.balances.balances {
                let status = match balance.status(epsilon) {
                    BalanceStatus::Owed => "is owed",
                    BalanceStatus::Owes => "owes",
                    BalanceStatus::Settled => "settled",
                };
                println!(
                    "{:<20} paid {:>12}  owed {:>12}  net {:>12}  ({})",
                    balance.name,
                    format_amount(balance.total_paid, symbol),
                    format_amount(balance.total_owed, symbol),
                    format_signed(balance.balance, symbol),
                    status
                );
            }
        }
        Command::Settle { participant } => {
            let report = engine.run(&ledger, &context)?;
            let selected = participant.as_deref().map(ParticipantId::new);
            let transfers = match &selected {
                Some(id) => report.settlement.involving(id),
                None => report.settlement.transfers.iter().collect(),
            };
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&transfers)?);
                return Ok(());
            }
            if transfers.is_empty() {
                println!("All settled up.");
            }
            for (n, transfer) in transfers.iter().enumerate() {
                println!(
                    "{}. {} owes {}: {}",
                    n + 1,
                    transfer.from,
                    transfer.to,
                    format_amount(transfer.amount, symbol)
                );
            }
            println!(
                "Total: {} in {} transaction(s)",
                format_amount(transfers.iter().map(|t| t.amount).sum(), symbol),
                transfers.len()
            );
            if let Some(rank) = selected.as_ref().and_then(|id| report.leaderboard.rank_of(id)) {
                println!(
                    "Rank {} of {} by amount paid",
                    rank,
                    report.leaderboard.rankings.len()
                );
            }
            if !report.settlement.is_consistent(epsilon) {
                eprintln!(
                    "warning: balances sum to {}, some expenses reference people outside this selection",
                    format_signed(report.settlement.net_imbalance, symbol)
                );
            }
            for residual in &report.settlement.unsettled {
                eprintln!(
                    "note: {} left with {} unmatched",
                    residual.name,
                    format_signed(residual.amount, symbol)
                );
            }
        }
        Command::Report => {
            let report = engine.run(&ledger, &context)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
                return Ok(());
            }
            let summary = &report.summary;
            println!("Total spent:      {}", format_amount(summary.total_spent, symbol));
            println!("Expenses:         {}", summary.expense_count);
            println!("Average per day:  {}", format_amount(summary.average_per_day, symbol));
            println!("Average per head: {}", format_amount(summary.average_per_person, symbol));
            println!("Fairness score:   {:.1}", summary.fairness_score);
            if let Some(category) = &summary.most_expensive_category {
                println!("Top category:     {} ({})", category.name, format_amount(category.total, symbol));
            }

            println!("\nCategories:");
            for category in &report.categories {
                let leader = report
                    .leaderboard
                    .category_leader(&category.category_id)
                    .map(|(person, _)| format!("  led by {}", person.name))
                    .unwrap_or_default();
                println!(
                    "  {:<20} {:>12}  {:>6.1}%  {} expense(s){}",
                    category.name,
                    format_amount(category.total, symbol),
                    category.percentage,
                    category.count,
                    leader
                );
            }

            println!("\nTop payers:");
            for (rank, person) in report
                .leaderboard
                .top_payers(engine.config().top_payers)
                .iter()
                .enumerate()
            {
                println!("  {}. {:<20} {}", rank + 1, person.name, format_amount(person.total_paid, symbol));
            }
            if let Some(person) = report.leaderboard.most_generous() {
                println!("  Most generous:  {}", person.name);
            }
            if let Some(person) = report.leaderboard.biggest_spender() {
                println!(
                    "  Biggest spend:  {} ({})",
                    person.name,
                    format_amount(person.highest_expense, symbol)
                );
            }
            if let Some(person) = report.leaderboard.lowest_active_payer() {
                println!(
                    "  Lowest payer:   {} ({})",
                    person.name,
                    format_amount(person.total_paid, symbol)
                );
            }

            println!("\nCost per person:");
            for cost in &report.costs {
                println!("  {:<20} {}", cost.name, format_amount(cost.total_cost, symbol));
            }

            println!("\nMost expensive days:");
            for day in &report.top_days {
                println!("  {}  {}  ({} expense(s))", day.date, format_amount(day.total, symbol), day.count);
            }
        }
        Command::Trend { period } => {
            let buckets = engine.trend(&ledger, &context, period)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&buckets)?);
                return Ok(());
            }
            for bucket in &buckets {
                println!("{:<16} {}", bucket.label, format_amount(bucket.amount, symbol));
            }
        }
    }

    Ok(())
}
