//! # expense-client
//!
//! Signs in, runs one command against the expense API and signs out.

use anyhow::{bail, Context};
use clap::Parser;

use expense_client::app::{App, AppEvent};
use expense_client::cli::{self, BalanceAction, Cli, Commands};
use expense_client::config::ClientConfig;
use expense_client::debug;
use expense_client::services::api::CardDraft;
use shared::{format_currency, Summary};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    debug::init();

    let mut config = ClientConfig::from_env();
    if let Some(url) = &cli.api_url {
        config = config.with_api_url(url.clone());
    }
    tracing::info!(base_url = %config.base_url(), "Starting expense client");

    let app = App::new(&config).context("Failed to build HTTP client")?;

    let (Some(username), Some(password)) = (cli.username.as_deref(), cli.password.as_deref())
    else {
        bail!("Informe usuário e senha (--username/--password ou EXPENSES_USERNAME/EXPENSES_PASSWORD)");
    };

    let signed_in = match cli.command {
        Commands::Register => app.register(username, password).await,
        _ => app.login(username, password).await,
    };
    if let Err(e) = signed_in {
        report_events(&app);
        bail!("{}", e);
    }

    let outcome = run(&app, cli.command).await;
    report_events(&app);
    app.logout().await;
    outcome
}

async fn run(app: &App, command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Summary | Commands::Register => {
            print_summary(app.snapshot().view.summary.as_ref());
        }
        Commands::Cards(filters) => {
            let cards = app.set_filters(filters.to_filters()).await?;
            println!("{}", cli::render_cards(&cards));
        }
        Commands::Card { id } => {
            let card = app.load_card(id).await?;
            println!("{}", cli::render_card_row(&card));
        }
        Commands::Balance { action: None } => match app.snapshot().view.balance {
            Some(balance) => println!("Saldo líquido: {}", format_currency(balance.net_balance)),
            None => println!("Saldo não carregado."),
        },
        Commands::Balance {
            action: Some(BalanceAction::Set { value }),
        } => {
            let balance = app.save_balance(&value).await?;
            println!("Saldo líquido: {}", format_currency(balance.net_balance));
            print_summary(app.snapshot().view.summary.as_ref());
        }
        Commands::Add(args) => {
            let card = app.submit_card(None, &args.to_draft()).await?;
            println!("Criado: {}", cli::render_card_row(&card));
        }
        Commands::Edit { id, changes } => {
            let current = app.load_card(id).await?;
            let draft = changes.apply(CardDraft::from_card(&current));
            let card = app.submit_card(Some(id), &draft).await?;
            println!("Atualizado: {}", cli::render_card_row(&card));
        }
        Commands::Delete { id } => {
            app.delete_card(id).await?;
            println!("Despesa #{} excluída.", id);
        }
        Commands::Export { file } => {
            let bytes = app.export_spreadsheet().await?;
            tokio::fs::write(&file, &bytes)
                .await
                .with_context(|| format!("Failed to write {}", file.display()))?;
            println!("Planilha salva em {} ({} bytes).", file.display(), bytes.len());
        }
    }
    Ok(())
}

fn print_summary(summary: Option<&Summary>) {
    match summary {
        Some(summary) => println!("{}", cli::render_summary(summary)),
        None => println!("Resumo indisponível."),
    }
}

/// Print errors published in the background (e.g. a refresh that failed)
fn report_events(app: &App) {
    for event in app.drain_events() {
        if let AppEvent::Error(message) = event {
            eprintln!("erro: {}", message);
        }
    }
}
