use std::io::Write as _;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, Instrument};

use stockroom::abilities::{AbilityBrowser, HttpAbilityApi};
use stockroom::app_system::{setup_tracing, StoreSystem};
use stockroom::config::Config;
use stockroom::dashboard::InventoryDashboard;
use stockroom::inventory::{format_price, InventoryError};
use stockroom::shell::{self, ShellCommand};

#[derive(Parser)]
#[command(name = "stockroom", version, about = "Product inventory and ability browser")]
struct Cli {
    /// Config file to read instead of ~/.config/stockroom/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive inventory session over stdin
    Inventory,
    /// List abilities and optionally show one ability's effects
    Abilities {
        /// Case-sensitive substring filter on ability names
        #[arg(long)]
        search: Option<String>,
        /// Ability name whose detail to fetch
        #[arg(long)]
        select: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("failed to load configuration")?;

    setup_tracing(&config.log_filter);

    match cli.command {
        Command::Inventory => run_inventory(&config).await,
        Command::Abilities { search, select } => {
            let span = tracing::info_span!("abilities");
            run_abilities(&config, search, select).instrument(span).await
        }
    }
}

async fn run_inventory(config: &Config) -> Result<()> {
    info!("Starting inventory session");

    let system = StoreSystem::new();
    let mut dashboard = InventoryDashboard::new(system.inventory_client.clone(), config);
    // Slack on top of the debounce window before giving up on a settled update.
    let settle_wait = config.search_debounce + Duration::from_millis(200);

    println!("{}", shell::HELP);
    print_visible(&dashboard).await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let command = match line.parse::<ShellCommand>() {
            Ok(command) => command,
            Err(message) => {
                println!("{message}");
                continue;
            }
        };

        match dispatch(&mut dashboard, command, settle_wait).await {
            Ok(true) => {}
            Ok(false) => break,
            Err(e @ InventoryError::ServiceUnavailable(_)) => return Err(e.into()),
            Err(e) => println!("{e}"),
        }
    }

    drop(dashboard);
    system.shutdown().await.map_err(anyhow::Error::msg)?;
    info!("Inventory session ended");
    Ok(())
}

/// Runs one command. `Ok(false)` ends the session.
async fn dispatch(
    dashboard: &mut InventoryDashboard,
    command: ShellCommand,
    settle_wait: Duration,
) -> Result<bool, InventoryError> {
    match command {
        ShellCommand::List => print_visible(dashboard).await?,
        ShellCommand::Search(text) => {
            let mut settled = dashboard.subscribe_search();
            settled.mark_unchanged();
            dashboard.type_search(text);
            // An unchanged term is never republished, so this may time out.
            let _ = tokio::time::timeout(settle_wait, settled.changed()).await;
            print_visible(dashboard).await?;
        }
        ShellCommand::Sort(sort) => {
            dashboard.set_sort(sort);
            print_visible(dashboard).await?;
        }
        ShellCommand::Add { name, price, stock } => {
            dashboard.open_add();
            dashboard.set_name(name);
            dashboard.type_price(&price);
            dashboard.set_stock(stock);
            submit(dashboard).await?;
        }
        ShellCommand::Edit {
            id,
            name,
            price,
            stock,
        } => {
            dashboard.open_edit(id).await?;
            if let Some(name) = name {
                dashboard.set_name(name);
            }
            if let Some(price) = price {
                dashboard.type_price(&price);
            }
            if let Some(stock) = stock {
                dashboard.set_stock(stock);
            }
            submit(dashboard).await?;
        }
        ShellCommand::Delete(id) => {
            let product = dashboard.request_delete(id).await?;
            println!("delete #{} {}? (yes/no)", product.id, product.name);
        }
        ShellCommand::Confirm => match dashboard.confirm_delete().await? {
            Some(product) => println!("deleted #{} {}", product.id, product.name),
            None => println!("nothing to confirm"),
        },
        ShellCommand::Cancel => {
            if dashboard.pending_delete().is_some() {
                dashboard.cancel_delete();
                println!("kept");
            }
        }
        ShellCommand::Help => println!("{}", shell::HELP),
        ShellCommand::Quit => return Ok(false),
    }
    Ok(true)
}

async fn submit(dashboard: &mut InventoryDashboard) -> Result<(), InventoryError> {
    let price = dashboard
        .form()
        .map(|form| form.price_display().to_string())
        .unwrap_or_default();

    let result = dashboard.submit().await;
    // Each shell line is a whole dialog session.
    dashboard.close_form();

    match result {
        Ok(product) => {
            println!(
                "saved #{} {} ({})",
                product.id,
                product.name,
                format_price(product.price, dashboard.locale())
            );
            Ok(())
        }
        Err(InventoryError::Validation(errors)) => {
            println!("not saved (price field showed '{price}'):");
            println!("{}", shell::render_errors(&errors));
            Ok(())
        }
        Err(e) => Err(e),
    }
}

async fn print_visible(dashboard: &InventoryDashboard) -> Result<(), InventoryError> {
    let rows = dashboard.visible().await?;
    println!(
        "[search: '{}', sort: {}]",
        dashboard.settled_search(),
        dashboard.sort()
    );
    println!("{}", shell::render_products(&rows, dashboard.locale()));
    Ok(())
}

async fn run_abilities(config: &Config, search: Option<String>, select: Option<String>) -> Result<()> {
    let api = HttpAbilityApi::new(&config.api_base_url).context("failed to build HTTP client")?;
    let mut browser = AbilityBrowser::new(api);

    browser.load().await;
    if let Some(error) = browser.error() {
        anyhow::bail!("{error}");
    }

    if let Some(search) = search {
        browser.set_search(search);
    }
    let filtered = browser.filtered();
    if filtered.is_empty() {
        println!("{}", shell::EMPTY_ABILITIES);
    }
    for ability in filtered {
        println!("{}", ability.name);
    }

    let Some(name) = select else {
        return Ok(());
    };
    let Some(ability) = browser.find(&name).cloned() else {
        println!("no ability named '{name}'");
        return Ok(());
    };

    browser.select(ability).await;
    match browser.detail() {
        Some(detail) => {
            println!();
            println!("{}", detail.name);
            let effects = detail.english_effects();
            if effects.is_empty() {
                println!("  (no English effect text)");
            }
            for effect in effects {
                println!("  {effect}");
            }
        }
        None => println!("no detail available for '{name}'"),
    }
    Ok(())
}
