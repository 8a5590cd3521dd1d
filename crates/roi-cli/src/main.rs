use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use roi_application::{CalculationTrigger, ChatSession, SelectionUseCase};
use roi_core::catalog;
use roi_core::session::{AgentMode, CompanyProfile};
use roi_infrastructure::{ConfigService, JsonFileSessionStore, RoiPaths};
use roi_interaction::{CalculationApiClient, ChatApiAgent};

mod render;
mod repl;

#[derive(Parser)]
#[command(name = "roi")]
#[command(about = "ROI First - build an ROI business case by chatting with an agent", long_about = None)]
struct Cli {
    /// Directory holding config.toml and session.json (defaults to the platform directories)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Log request/response flow to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the processes available for a business case
    Systems,
    /// Select a process and company, then chat with the ROI agent
    Chat(ChatArgs),
    /// Show the last calculation result
    Results,
    /// Forget the current case (selection, collected data and results)
    NewCase,
}

#[derive(Args)]
struct ChatArgs {
    /// Process identifier (see `roi systems`)
    #[arg(long)]
    system: String,

    /// Agent style: guided or expert
    #[arg(long, default_value = "guided")]
    mode: AgentMode,

    /// Company name
    #[arg(long)]
    company: String,

    /// Company size bucket (1-50, 51-200, 201-500, 501-1000, 1000+)
    #[arg(long)]
    size: String,

    /// Primary sector code
    #[arg(long)]
    sector: String,

    /// Secondary sector code (up to two)
    #[arg(long = "secondary")]
    secondary: Vec<String>,
}

fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "roi=debug" } else { "roi=warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn open_store(paths: &RoiPaths) -> Result<Arc<JsonFileSessionStore>> {
    let path = paths.session_file()?;
    let store = JsonFileSessionStore::open(&path)
        .await
        .with_context(|| format!("Failed to open session store at {}", path.display()))?;
    Ok(Arc::new(store))
}

fn list_systems() {
    println!("{}", "Available business cases".bright_magenta().bold());
    for (system, listing) in catalog::listed() {
        println!(
            "  {} {} {}",
            format!("{:<30}", system.id).bright_cyan(),
            listing.title.bold(),
            format!("- {}", listing.description).bright_black()
        );
    }
}

async fn chat(paths: &RoiPaths, args: ChatArgs) -> Result<()> {
    let config = ConfigService::new(paths.clone()).load()?;
    let store = open_store(paths).await?;

    let selection = SelectionUseCase::new(store.clone());
    selection.select_system(&args.system).await?;
    let profile = CompanyProfile::new(args.company, args.size, args.sector, args.secondary)?;
    let route = selection.choose_agent(args.mode, profile).await?;
    tracing::debug!("[roi] Navigating to {}", route);

    let agent = Arc::new(ChatApiAgent::from_config(&config)?);
    let calculator = Arc::new(CalculationApiClient::from_config(&config)?);
    let trigger = CalculationTrigger::new(calculator, store.clone());

    let session = ChatSession::open(store, agent, trigger).await?;
    repl::run(session).await
}

async fn results(paths: &RoiPaths) -> Result<()> {
    let store = open_store(paths).await?;
    match SelectionUseCase::new(store).load_results().await? {
        Some(result) => render::print_result(&result),
        None => println!("{}", "No calculation results yet.".bright_black()),
    }
    Ok(())
}

async fn new_case(paths: &RoiPaths) -> Result<()> {
    let store = open_store(paths).await?;
    let route = SelectionUseCase::new(store).new_case().await?;
    println!("{}", "Started a new case.".bright_green());
    tracing::debug!("[roi] Navigating to {}", route);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let paths = match cli.data_dir {
        Some(dir) => RoiPaths::with_root(dir),
        None => RoiPaths::new(),
    };

    match cli.command {
        Commands::Systems => list_systems(),
        Commands::Chat(args) => chat(&paths, args).await?,
        Commands::Results => results(&paths).await?,
        Commands::NewCase => new_case(&paths).await?,
    }

    Ok(())
}
