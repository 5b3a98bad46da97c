use std::path::PathBuf;

use anyhow::{anyhow, bail, Result};
use expense_sync::config::SyncConfig;
use expense_sync::domain::{
    AddExpenseOutcome, Expense, ExpenseSyncService, RetrySyncOutcome, SessionContext,
    SyncWarning,
};
use expense_sync::{initialize_app, AppState};
use log::info;
use shared::Category;

const USAGE: &str = "\
Usage: expense-sync [--config PATH] <command>

Commands:
  login EMAIL PASSWORD
  register NAME EMAIL PASSWORD CONFIRM
  logout
  list
  add TITLE AMOUNT CATEGORY
  delete ID
  sync
  summary";

enum Command {
    Login { email: String, password: String },
    Register { full_name: String, email: String, password: String, confirm_password: String },
    Logout,
    List,
    Add { title: String, amount: String, category: Category },
    Delete { id: String },
    Sync,
    Summary,
}

struct CliArgs {
    config_path: Option<PathBuf>,
    command: Command,
}

fn parse_args(args: Vec<String>) -> Result<CliArgs> {
    let mut config_path = None;
    let mut rest = Vec::new();
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        if arg == "--config" {
            let path = iter.next().ok_or_else(|| anyhow!("--config needs a path"))?;
            config_path = Some(PathBuf::from(path));
        } else {
            rest.push(arg);
        }
    }

    let command = match rest.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
        ["login", email, password] => Command::Login {
            email: email.to_string(),
            password: password.to_string(),
        },
        ["register", full_name, email, password, confirm_password] => Command::Register {
            full_name: full_name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            confirm_password: confirm_password.to_string(),
        },
        ["logout"] => Command::Logout,
        ["list"] => Command::List,
        ["add", title, amount, category] => Command::Add {
            title: title.to_string(),
            amount: amount.to_string(),
            category: category.parse()?,
        },
        ["delete", id] => Command::Delete { id: id.to_string() },
        ["sync"] => Command::Sync,
        ["summary"] => Command::Summary,
        _ => bail!("{}", USAGE),
    };

    Ok(CliArgs {
        config_path,
        command,
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = parse_args(std::env::args().skip(1).collect())?;
    let config_path = match args.config_path {
        Some(path) => path,
        None => SyncConfig::default_path()?,
    };
    let config = SyncConfig::load_or_create(&config_path)?.with_env_overrides();

    info!("Starting expense-sync against {}", config.api_base_url);
    let app_state = initialize_app(&config)?;

    match args.command {
        Command::Login { email, password } => {
            let session = app_state.auth_service.login(&email, &password).await?;
            println!("Logged in as {} (id {})", session.full_name, session.user_id);
        }
        Command::Register {
            full_name,
            email,
            password,
            confirm_password,
        } => {
            let message = app_state
                .auth_service
                .register(&full_name, &email, &password, &confirm_password)
                .await?;
            println!("{}", message.unwrap_or_else(|| "Account created".to_string()));
        }
        Command::Logout => {
            app_state.auth_service.logout().await?;
            println!("Logged out");
        }
        Command::List => {
            let service = open_collection(&app_state).await?;
            print_expenses(&service.expenses().await);
            println!("Total: {:.2}", service.total_amount().await);
        }
        Command::Add {
            title,
            amount,
            category,
        } => {
            let service = open_collection(&app_state).await?;
            let outcome = service.add_expense(&title, &amount, category).await?;
            print_added(&outcome);
        }
        Command::Delete { id } => {
            let service = open_collection(&app_state).await?;
            let outcome = service.delete_expense(&id).await;
            match &outcome.removed {
                Some(expense) => println!("Deleted '{}'", expense.title),
                None => println!("No expense with id {}", id),
            }
            print_warnings(&outcome.warnings);
        }
        Command::Sync => {
            let service = open_collection(&app_state).await?;
            match service.retry_sync().await {
                RetrySyncOutcome::Offline { unsynced_count } => {
                    println!("Still offline; {} expense(s) waiting to sync", unsynced_count)
                }
                RetrySyncOutcome::Completed {
                    pushed,
                    reloaded,
                    unsynced_count,
                    warnings,
                } => {
                    println!(
                        "Synced {} expense(s){}; {} still pending",
                        pushed,
                        if reloaded { " and reloaded from server" } else { "" },
                        unsynced_count
                    );
                    print_warnings(&warnings);
                }
            }
        }
        Command::Summary => {
            let service = open_collection(&app_state).await?;
            let summary = service.summary().await;
            println!(
                "{} expense(s), total {:.2}, {} unsynced",
                summary.count, summary.total_amount, summary.unsynced_count
            );
            for (category, amount) in summary.by_category {
                println!("  {:<12} {:>10.2}", category.as_str(), amount);
            }
        }
    }

    Ok(())
}

/// Reconciler for the stored session, initialized and ready for use
async fn open_collection(app_state: &AppState) -> Result<ExpenseSyncService> {
    let session: SessionContext = app_state
        .auth_service
        .restore_session()
        .await
        .ok_or_else(|| anyhow!("Not logged in. Run `expense-sync login EMAIL PASSWORD` first"))?;

    let service = app_state.sync_service(session);
    let outcome = service.initialize().await;
    // Offline is shown once by the status line below
    let warnings: Vec<SyncWarning> = outcome
        .warnings
        .into_iter()
        .filter(|w| *w != SyncWarning::Offline)
        .collect();
    if !outcome.online {
        println!("(offline: showing data saved on this device)");
    }
    if outcome.pushed > 0 {
        println!("Synced {} pending expense(s)", outcome.pushed);
    }
    print_warnings(&warnings);
    Ok(service)
}

fn print_added(outcome: &AddExpenseOutcome) {
    let state = if outcome.expense.synced {
        "synced"
    } else {
        "saved locally"
    };
    println!(
        "Added '{}' {:.2} ({}), {}",
        outcome.expense.title, outcome.expense.amount, outcome.expense.category, state
    );
    print_warnings(&outcome.warnings);
}

fn print_expenses(expenses: &[Expense]) {
    if expenses.is_empty() {
        println!("No expenses yet");
        return;
    }
    for expense in expenses {
        println!(
            "{} {:<10} {:<24} {:>10.2} {:<10} {}",
            if expense.synced { " " } else { "*" },
            expense.date,
            expense.title,
            expense.amount,
            expense.category.as_str(),
            expense.id
        );
    }
}

fn print_warnings(warnings: &[SyncWarning]) {
    for warning in warnings {
        eprintln!("{}: {}", warning_label(warning), warning);
    }
}

/// Connectivity trouble clears up by itself on a later `sync`; the rest needs a look
fn warning_label(warning: &SyncWarning) -> &'static str {
    if warning.is_connectivity() {
        "offline"
    } else {
        "warning"
    }
}
