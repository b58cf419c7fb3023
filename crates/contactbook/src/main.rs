//! `contactbook` - CLI for the contact book
//!
//! Starts the interactive assistant by default; subcommands give one-shot
//! access to the saved book for scripts.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::io;

use anyhow::{bail, Context, Result};
use chrono::Local;
use clap::Parser;

use contactbook::cli::{BirthdaysCommand, Cli, Command, ConfigCommand, ExecCommand, ShowCommand};
use contactbook::{init_logging, open_store, Config, Shell};

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    match &cli.command {
        None | Some(Command::Shell) => run_shell(&load_config(&cli)?),
        Some(Command::Exec(cmd)) => run_exec(&load_config(&cli)?, cmd),
        Some(Command::List(cmd)) => handle_list(&load_config(&cli)?, cmd.json),
        Some(Command::Show(cmd)) => handle_show(&load_config(&cli)?, cmd),
        Some(Command::Birthdays(cmd)) => handle_birthdays(&load_config(&cli)?, cmd),
        Some(Command::Config(cmd)) => handle_config(&cli, cmd),
    }
}

fn load_config(cli: &Cli) -> Result<Config> {
    cli.load_config().context("loading configuration")
}

fn open_shell(config: &Config) -> Result<Shell> {
    let path = config.store_path();
    let store =
        open_store(config).with_context(|| format!("opening contact store {}", path.display()))?;
    let shell = Shell::open(store, config.reminder_policy())
        .with_context(|| format!("loading contacts from {}", path.display()))?;
    Ok(shell.with_autosave(config.storage.autosave))
}

fn run_shell(config: &Config) -> Result<()> {
    let mut shell = open_shell(config)?;
    shell
        .run(io::stdin().lock(), io::stdout().lock())
        .context("assistant session failed")?;
    Ok(())
}

fn run_exec(config: &Config, cmd: &ExecCommand) -> Result<()> {
    let mut shell = open_shell(config)?;
    let command = contactbook::Command::parse(&cmd.line())?;
    let reply = shell.execute(&command)?;
    shell.persist().context("saving contacts")?;

    println!("{}", reply.text());
    Ok(())
}

fn handle_list(config: &Config, json: bool) -> Result<()> {
    let shell = open_shell(config)?;
    let book = shell.book();

    if json {
        let contacts: Vec<_> = book.contacts().collect();
        println!("{}", serde_json::to_string_pretty(&contacts)?);
    } else if book.is_empty() {
        println!("No contacts found.");
    } else {
        for contact in book.contacts() {
            println!("{contact}");
        }
    }
    Ok(())
}

fn handle_show(config: &Config, cmd: &ShowCommand) -> Result<()> {
    let shell = open_shell(config)?;
    let contact = shell.book().get(&cmd.name)?;

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(contact)?);
    } else {
        println!("{contact}");
    }
    Ok(())
}

fn handle_birthdays(config: &Config, cmd: &BirthdaysCommand) -> Result<()> {
    let shell = open_shell(config)?;
    let mut policy = config.reminder_policy();
    if let Some(days) = cmd.days {
        policy.window_days = days;
    }

    let today = Local::now().date_naive();
    let reminders = shell.book().upcoming_birthdays(today, policy);

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&reminders)?);
    } else if reminders.is_empty() {
        println!(
            "No upcoming birthdays in the next {} days.",
            policy.window_days
        );
    } else {
        println!("Upcoming birthdays:");
        for reminder in &reminders {
            println!("  {reminder}");
        }
    }
    Ok(())
}

fn handle_config(cli: &Cli, cmd: &ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            let config = load_config(cli)?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Path:               {}", config.store_path().display());
                println!("  Format:             {}", config.storage.format);
                println!("  Autosave:           {}", config.storage.autosave);
                println!();
                println!("[Reminders]");
                println!("  Window (days):      {}", config.reminders.window_days);
                println!("  Roll weekends:      {}", config.reminders.roll_weekends);
            }
        }
        ConfigCommand::Path => {
            println!("{}", cli.config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.clone().unwrap_or_else(|| cli.config_path());
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => bail!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
