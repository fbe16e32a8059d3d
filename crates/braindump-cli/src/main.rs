use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::str::FromStr;
use std::sync::Arc;

use chrono::Utc;
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use colored::Colorize;
use uuid::Uuid;

use braindump_core::{Assistant, BrainDumpError, Config, Outcome, Result, Store};

mod args;
use args::{Cli, Commands, ConfigAction, Shell};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = run(cli);
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report_error(&e);
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let base_dir = resolve_base_dir(cli.base_dir)?;

    // Commands that do not touch the store.
    match &cli.command {
        Commands::Completions { shell } => {
            handle_completions(*shell);
            return Ok(());
        }
        Commands::Config { action } => return handle_config(action, &base_dir),
        Commands::About => {
            handle_about();
            return Ok(());
        }
        _ => {}
    }

    let config = Config::load(&base_dir)?;
    let user = cli.user.unwrap_or_else(|| config.user.name.clone());
    let store = Arc::new(Store::at_path(config.store_path(&base_dir))?);
    let assistant = Assistant::new(store);

    match cli.command {
        Commands::Note { text } => handle_note(&assistant, &user, &text),
        Commands::Newcat { name, keywords } => {
            handle_newcat(&assistant, &user, &name, &keywords)
        }
        Commands::Categories => handle_categories(&assistant, &user),
        Commands::List => handle_list(&assistant, &user),
        Commands::Recat { entry_id } => handle_recat(&assistant, &user, &entry_id),
        Commands::Apply { token } => handle_apply(&assistant, &user, &token),
        Commands::Cancel { token } => handle_cancel(&assistant, &user, &token),
        Commands::Export { dest } => handle_export(&assistant, dest.as_deref()),
        Commands::Completions { .. } | Commands::Config { .. } | Commands::About => {
            unreachable!("handled above")
        }
    }
}

fn resolve_base_dir(cli_base_dir: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = cli_base_dir {
        return Ok(dir);
    }
    dirs::home_dir()
        .map(|home| home.join(".braindump"))
        .ok_or(BrainDumpError::HomeNotFound)
}

/// Boundary error policy: validation messages verbatim, reference failures
/// generic, authorization failures generic with no detail, the rest as-is.
fn report_error(e: &BrainDumpError) {
    let msg = match e {
        e if e.is_user_facing() => e.to_string(),
        BrainDumpError::EntryNotFound { .. }
        | BrainDumpError::CategoryNotFound { .. }
        | BrainDumpError::BadToken { .. } => {
            "That entry or option is no longer available.".to_string()
        }
        BrainDumpError::NotEntryOwner => "Nothing to do.".to_string(),
        e => e.to_string(),
    };
    eprintln!("{} {}", "[ERROR]".red().bold(), msg);
}

fn handle_note(assistant: &Assistant, user: &str, text: &[String]) -> Result<()> {
    let text = text.join(" ");
    if text.trim().is_empty() {
        eprintln!("{} Nothing to save.", "[WARN]".yellow().bold());
        return Ok(());
    }

    let entry = assistant.classify_and_store(user, &text, Utc::now())?;
    println!("Saved under {}.", entry.category.cyan().bold());
    println!(
        "{}",
        format!("  change category: braindump recat {}", entry.id).dimmed()
    );
    Ok(())
}

fn handle_newcat(assistant: &Assistant, user: &str, name: &str, keywords: &str) -> Result<()> {
    assistant.define_category(user, name, keywords)?;
    println!("Category {} saved.", name.cyan().bold());
    Ok(())
}

fn handle_categories(assistant: &Assistant, user: &str) -> Result<()> {
    let (defaults, custom) = assistant.list_categories_for(user);

    println!("{}", "Available categories:".cyan().bold());
    for name in defaults {
        println!("  {}", name);
    }
    for name in custom {
        println!("  {} {}", name, "(custom)".dimmed());
    }
    Ok(())
}

fn handle_list(assistant: &Assistant, user: &str) -> Result<()> {
    let entries = assistant.list_entries(user);
    if entries.is_empty() {
        println!("You have no entries yet.");
        return Ok(());
    }

    for entry in entries {
        println!(
            "{} {}",
            format!("[{}]", entry.category).cyan(),
            entry.text
        );
        println!(
            "   {}",
            format!("{}  {}", entry.id, entry.created_at.format("%Y-%m-%d %H:%M")).dimmed()
        );
    }
    Ok(())
}

fn handle_recat(assistant: &Assistant, user: &str, entry_id: &str) -> Result<()> {
    let id = Uuid::from_str(entry_id).map_err(|_| BrainDumpError::BadToken {
        token: entry_id.to_string(),
    })?;

    let prompt = assistant.begin_reassignment(user, id)?;

    println!("{}", "Pick a new category:".cyan().bold());
    for (name, token) in &prompt.options {
        println!("  {:<12} braindump apply '{}'", name, token.encode());
    }
    println!(
        "  {:<12} braindump cancel '{}'",
        "Cancel".dimmed(),
        prompt.cancel.encode()
    );
    Ok(())
}

fn handle_apply(assistant: &Assistant, user: &str, token: &str) -> Result<()> {
    match assistant.apply_reassignment(user, token)? {
        Outcome::Reassigned(category) => {
            println!("Moved to {}.", category.cyan().bold());
        }
        Outcome::Cancelled => println!("Prompt dismissed."),
    }
    Ok(())
}

fn handle_cancel(assistant: &Assistant, user: &str, token: &str) -> Result<()> {
    assistant.cancel_reassignment(user, token)?;
    println!("Prompt dismissed.");
    Ok(())
}

fn handle_export(assistant: &Assistant, dest: Option<&Path>) -> Result<()> {
    let source = assistant.store_path();
    if !source.exists() {
        println!("Nothing to export yet.");
        return Ok(());
    }

    let dest = dest
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("braindump-export.json"));
    fs::copy(source, &dest)?;
    println!("Exported to {}.", dest.display().to_string().cyan());
    Ok(())
}

fn handle_config(action: &ConfigAction, base_dir: &Path) -> Result<()> {
    match action {
        ConfigAction::Get { key } => {
            let config = Config::load(base_dir)?;
            match config.get(key) {
                Some(value) => println!("{}", value),
                None => {
                    return Err(BrainDumpError::ConfigKeyNotFound {
                        key: key.clone(),
                    })
                }
            }
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load(base_dir)?;
            config.set(key, value)?;
            config.save(base_dir)?;
            println!("{} = {}", key, value);
        }
        ConfigAction::List => {
            let config = Config::load(base_dir)?;
            for (key, value) in config.list() {
                println!("{} = {}", key, value);
            }
        }
        ConfigAction::Init => {
            let path = Config::init(base_dir)?;
            println!("Config written to {}", path.display());
        }
        ConfigAction::Path => {
            println!("{}", Config::path(base_dir).display());
        }
    }
    Ok(())
}

fn handle_about() {
    println!("{}", "braindump".cyan().bold());
    println!("Dump anything on your mind; it gets filed automatically.");
    println!();
    println!("Notes matching a keyword land in Tasks, Ideas, Journal or Quotes;");
    println!("everything else goes to Unsorted. Add your own categories with");
    println!("`braindump newcat` and move notes afterwards with `braindump recat`.");
    println!();
    println!(
        "{}",
        "If braindump helps you, consider a coffee: https://ko-fi.com/braindump".dimmed()
    );
}

fn handle_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    let mut out = io::stdout();
    match shell {
        Shell::Bash => generate(clap_complete::shells::Bash, &mut cmd, name, &mut out),
        Shell::Zsh => generate(clap_complete::shells::Zsh, &mut cmd, name, &mut out),
        Shell::Fish => generate(clap_complete::shells::Fish, &mut cmd, name, &mut out),
        Shell::PowerShell => {
            generate(clap_complete::shells::PowerShell, &mut cmd, name, &mut out)
        }
        Shell::Elvish => generate(clap_complete::shells::Elvish, &mut cmd, name, &mut out),
    }
}
