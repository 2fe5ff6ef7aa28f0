//! QSurv daemon — entry point and CLI for the survey-rewards ledger.

use clap::Parser;
use std::path::PathBuf;

use qsurv_node::{init_logging, LedgerNode, LogFormat, NodeConfig};
use qsurv_types::{QuAmount, SurveyId, WalletAddress};

#[derive(Parser)]
#[command(name = "qsurv-daemon", about = "QSurv survey-rewards ledger daemon")]
struct Cli {
    /// Path of the ledger blob.
    /// When a config file is provided, defaults to the file's value.
    #[arg(long, env = "QSURV_LEDGER_PATH")]
    ledger: Option<PathBuf>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "QSURV_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "QSURV_LOG_FORMAT")]
    log_format: Option<String>,

    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long, env = "QSURV_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Lock QU into a survey's escrow account.
    Fund {
        survey: String,
        amount: u64,
        /// Funding wallet recorded on the FUND transaction.
        #[arg(long)]
        from: String,
    },
    /// Pay a respondent from a survey's escrow.
    Payout {
        survey: String,
        amount: u64,
        /// Respondent wallet address.
        #[arg(long)]
        to: String,
        /// Referrer wallet: earns a reward from the treasury when funded.
        #[arg(long)]
        referrer: Option<String>,
    },
    /// Add QU to a wallet's staking balance.
    Stake { address: String, amount: u64 },
    /// Withdraw QU from a wallet's staking balance.
    Unstake { address: String, amount: u64 },
    /// Show a wallet's staking balance, tier, and lifetime earnings.
    Staking { address: String },
    /// Show a survey's escrow balance and transaction history.
    State { survey: String },
    /// Close a survey so further payouts are rejected.
    Close { survey: String },
    /// Show ledger-wide totals.
    Summary,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let file_config: Option<NodeConfig> = match &cli.config {
        Some(path) => Some(NodeConfig::from_toml_file(path)?),
        None => None,
    };

    let mut config = file_config.unwrap_or_default();
    if let Some(ledger) = cli.ledger {
        config.ledger_path = ledger;
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    if let Some(format) = cli.log_format {
        config.log_format = format;
    }

    init_logging(config.log_format.parse::<LogFormat>()?, &config.log_level);

    let node = LedgerNode::open(config)?;
    let engine = node.engine();

    match cli.command {
        Command::Fund {
            survey,
            amount,
            from,
        } => {
            let tx = engine.lock_funds(
                &SurveyId::from(survey),
                QuAmount::new(amount),
                &WalletAddress::new(from),
            )?;
            println!("funded: tx {tx}");
        }
        Command::Payout {
            survey,
            amount,
            to,
            referrer,
        } => {
            let referrer = referrer.map(WalletAddress::new);
            let receipt = engine.payout(
                &SurveyId::from(survey),
                QuAmount::new(amount),
                &WalletAddress::new(to),
                referrer.as_ref(),
            )?;
            println!("paid out: tx {}", receipt.tx_hash);
            if !receipt.bonus.is_zero() {
                println!("staking bonus: {}", receipt.bonus);
            }
            if !receipt.referral.is_zero() {
                println!("referral reward: {}", receipt.referral);
            }
        }
        Command::Stake { address, amount } => {
            let tier = engine.stake_funds(&WalletAddress::new(address), QuAmount::new(amount))?;
            println!("staked: tier is now {tier}");
        }
        Command::Unstake { address, amount } => {
            let tier = engine.unstake_funds(&WalletAddress::new(address), QuAmount::new(amount))?;
            println!("unstaked: tier is now {tier}");
        }
        Command::Staking { address } => {
            let address = WalletAddress::new(address);
            let account = engine.user_staking(&address)?;
            let earnings = engine.user_earnings(&address)?;
            println!("staking balance: {}", account.staking_balance);
            println!("tier: {}", account.tier);
            println!("total earnings: {}", earnings);
        }
        Command::State { survey } => {
            let account = engine.contract_state(&SurveyId::from(survey))?;
            println!("balance: {}", account.balance);
            println!("active: {}", account.is_active);
            println!("transactions: {}", account.transactions.len());
            for tx in &account.transactions {
                let from = tx.from.as_ref().map(|a| a.as_str()).unwrap_or("-");
                let to = tx.to.as_ref().map(|a| a.as_str()).unwrap_or("-");
                println!(
                    "  {} {} {} {} -> {}",
                    tx.timestamp.to_rfc3339(),
                    tx.kind,
                    tx.amount,
                    from,
                    to
                );
            }
        }
        Command::Close { survey } => {
            engine.close_survey(&SurveyId::from(survey))?;
            println!("closed");
        }
        Command::Summary => {
            let summary = engine.summary()?;
            println!("surveys: {}", summary.surveys);
            println!("users: {}", summary.users);
            println!("transactions: {}", summary.transactions);
            println!("total escrow: {}", summary.total_escrow);
            println!("treasury: {}", summary.treasury_balance);
        }
    }

    Ok(())
}
