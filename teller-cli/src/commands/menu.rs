//! Menu command - the interactive banking session
//!
//! Every action goes through `Ledger` / `AccountHandle`. Ledger failures are
//! expected outcomes: they are printed, logged by kind, and the menu carries on.

use std::str::FromStr;
use std::sync::Arc;

use anyhow::Result;
use dialoguer::{Input, Password, Select};
use rust_decimal::Decimal;

use super::{get_context, get_logger, log_event};
use crate::output;
use teller_core::config::Config;
use teller_core::services::{Ledger, DEMO_ACCOUNTS};
use teller_core::{AccountHandle, Error, LogEvent, LoggingService, OperationResult};

const MAIN_ITEMS: [&str; 3] = ["Register", "Login", "Exit"];

const USER_ITEMS: [&str; 7] = [
    "Deposit",
    "Withdraw",
    "Transfer",
    "Check Balance",
    "View Transaction History",
    "Export Statement (JSON)",
    "Logout",
];

pub fn run() -> Result<()> {
    let context = get_context()?;
    let logger = get_logger();
    log_event(&logger, LogEvent::new("session_started").with_command("menu"));

    let shell = Shell {
        config: context.config,
        ledger: context.ledger,
        logger,
    };

    if shell.config.demo_mode {
        shell.print_demo_accounts();
    }

    shell.main_menu()?;

    log_event(&shell.logger, LogEvent::new("session_ended").with_command("menu"));
    Ok(())
}

/// Parse an amount typed by the user
///
/// Only checks that it is a number; sign and precision are the ledger's call.
fn parse_amount(input: &str) -> Option<Decimal> {
    Decimal::from_str(input.trim()).ok()
}

/// Account statement wrapped in the standard JSON envelope
fn statement_json(account: &AccountHandle) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&OperationResult::ok(account.snapshot()))
}

struct Shell {
    config: Config,
    ledger: Arc<Ledger>,
    logger: Option<LoggingService>,
}

impl Shell {
    fn main_menu(&self) -> Result<()> {
        loop {
            output::heading("Welcome to the Online Banking System");
            let choice = Select::new()
                .with_prompt("Choose an option")
                .items(&MAIN_ITEMS)
                .default(0)
                .interact()?;

            match choice {
                0 => self.register()?,
                1 => self.login()?,
                _ => {
                    println!("Thank you for using the Online Banking System. Have a nice day!");
                    return Ok(());
                }
            }
        }
    }

    fn user_menu(&self, account: &AccountHandle) -> Result<()> {
        loop {
            output::heading("User Menu");
            let choice = Select::new()
                .with_prompt("Choose an option")
                .items(&USER_ITEMS)
                .default(0)
                .interact()?;

            match choice {
                0 => self.deposit(account)?,
                1 => self.withdraw(account)?,
                2 => self.transfer(account)?,
                3 => self.show_balance(account),
                4 => self.show_history(account),
                5 => self.export_statement(account)?,
                _ => {
                    println!("Logging out...");
                    log_event(&self.logger, LogEvent::new("logout").with_command("logout"));
                    return Ok(());
                }
            }
        }
    }

    fn register(&self) -> Result<()> {
        let policy = &self.config.account_policy;

        let name: String = Input::new().with_prompt("Enter your name").interact_text()?;

        let account_id: String = Input::new()
            .with_prompt(format!(
                "Enter a new account number ({} characters)",
                policy.account_id_length
            ))
            .interact_text()?;
        if let Err(msg) = policy.check_account_id(&account_id) {
            output::error(&format!("{} Please try again.", msg));
            log_event(
                &self.logger,
                LogEvent::new("register_rejected").with_command("register").with_error(msg),
            );
            return Ok(());
        }

        let password = Password::new()
            .with_prompt(format!("Set a password ({} characters)", policy.password_length))
            .interact()?;
        if let Err(msg) = policy.check_password(&password) {
            output::error(&format!("{} Please try again.", msg));
            log_event(
                &self.logger,
                LogEvent::new("register_rejected").with_command("register").with_error(msg),
            );
            return Ok(());
        }

        match self.ledger.register(&name, &account_id, &password) {
            Ok(_) => {
                output::success("Account created successfully!");
                log_event(&self.logger, LogEvent::new("account_registered").with_command("register"));
            }
            Err(e) => self.report("register", &e),
        }
        Ok(())
    }

    fn login(&self) -> Result<()> {
        let account_id: String = Input::new()
            .with_prompt("Enter your account number")
            .interact_text()?;
        let password = Password::new().with_prompt("Enter your password").interact()?;

        match self.ledger.authenticate(&account_id, &password) {
            Ok(account) => {
                output::success("Login successful!");
                log_event(&self.logger, LogEvent::new("login_succeeded").with_command("login"));
                self.user_menu(&account)?;
            }
            Err(e) => self.report("login", &e),
        }
        Ok(())
    }

    fn deposit(&self, account: &AccountHandle) -> Result<()> {
        let Some(amount) = self.prompt_amount("Enter amount to deposit")? else {
            return Ok(());
        };

        match account.deposit(amount) {
            Ok(balance) => {
                output::success(&format!(
                    "Deposit successful! Current balance: {}",
                    output::money(&self.config.currency, balance)
                ));
                log_event(&self.logger, LogEvent::new("deposit_completed").with_command("deposit"));
            }
            Err(e) => self.report("deposit", &e),
        }
        Ok(())
    }

    fn withdraw(&self, account: &AccountHandle) -> Result<()> {
        let Some(amount) = self.prompt_amount("Enter amount to withdraw")? else {
            return Ok(());
        };

        match account.withdraw(amount) {
            Ok(balance) => {
                output::success(&format!(
                    "Withdrawal successful! Current balance: {}",
                    output::money(&self.config.currency, balance)
                ));
                log_event(&self.logger, LogEvent::new("withdraw_completed").with_command("withdraw"));
            }
            Err(e) => self.report("withdraw", &e),
        }
        Ok(())
    }

    fn transfer(&self, account: &AccountHandle) -> Result<()> {
        let recipient_id: String = Input::new()
            .with_prompt("Enter recipient account number")
            .interact_text()?;

        let Some(recipient) = self.ledger.find_by_id(&recipient_id) else {
            output::error("Recipient account not found.");
            log_event(
                &self.logger,
                LogEvent::new("transfer_failed")
                    .with_command("transfer")
                    .with_ledger_error(&Error::AccountNotFound(recipient_id)),
            );
            return Ok(());
        };

        let Some(amount) = self.prompt_amount("Enter amount to transfer")? else {
            return Ok(());
        };

        match self.ledger.transfer_between(account, &recipient, amount) {
            Ok(receipt) => {
                output::success(&format!(
                    "Transfer successful! Current balance: {}",
                    output::money(&self.config.currency, receipt.from_balance)
                ));
                log_event(&self.logger, LogEvent::new("transfer_completed").with_command("transfer"));
            }
            Err(e) => self.report("transfer", &e),
        }
        Ok(())
    }

    fn show_balance(&self, account: &AccountHandle) {
        println!(
            "Current balance: {}",
            output::money(&self.config.currency, account.balance())
        );
    }

    fn show_history(&self, account: &AccountHandle) {
        let history = account.history_snapshot();
        println!("Transaction History for {}:", account.account_id());

        if history.is_empty() {
            output::info("No transactions yet.");
            return;
        }

        let mut table = output::table(&["#", "Time", "Details"]);
        for (i, record) in history.iter().enumerate() {
            table.add_row(vec![
                (i + 1).to_string(),
                record.recorded_at.format("%Y-%m-%d %H:%M:%S").to_string(),
                record.describe(&self.config.currency),
            ]);
        }
        println!("{}", table);
    }

    /// Print the account's snapshot as JSON
    fn export_statement(&self, account: &AccountHandle) -> Result<()> {
        println!("{}", statement_json(account)?);
        log_event(&self.logger, LogEvent::new("statement_exported").with_command("statement"));
        Ok(())
    }

    /// Ask for an amount; `None` if the input wasn't a number
    fn prompt_amount(&self, prompt: &str) -> Result<Option<Decimal>> {
        let raw: String = Input::new().with_prompt(prompt).interact_text()?;
        let amount = parse_amount(&raw);
        if amount.is_none() {
            output::error("Invalid amount. Please enter a number such as 250.00");
        }
        Ok(amount)
    }

    /// Show a ledger failure and log it by kind
    fn report(&self, action: &str, error: &Error) {
        output::error(&error.to_string());
        log_event(
            &self.logger,
            LogEvent::new(format!("{}_failed", action))
                .with_command(action)
                .with_ledger_error(error),
        );
    }

    fn print_demo_accounts(&self) {
        output::warning("Demo mode is ON. Sample accounts:");
        let mut table = output::table(&["Name", "Account number", "Password", "Balance"]);
        for demo in &DEMO_ACCOUNTS {
            let balance = self
                .ledger
                .find_by_id(demo.account_id)
                .map(|account| output::money(&self.config.currency, account.balance()))
                .unwrap_or_default();
            table.add_row(vec![
                demo.holder_name.to_string(),
                demo.account_id.to_string(),
                demo.password.to_string(),
                balance,
            ]);
        }
        println!("{}", table);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use teller_core::CredentialScheme;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount(" 250.50 "), Some(Decimal::new(25050, 2)));
        assert_eq!(parse_amount("100"), Some(Decimal::new(100, 0)));
        // Sign and scale are left for the ledger to reject
        assert_eq!(parse_amount("-5"), Some(Decimal::new(-5, 0)));
        assert_eq!(parse_amount("abc"), None);
        assert_eq!(parse_amount(""), None);
    }

    #[test]
    fn test_statement_json() {
        let ledger = Ledger::new(CredentialScheme::LegacyShift { offset: 3 }, 2);
        let account = ledger.register("Asha", "11111111111", "pass1234").unwrap();
        account.deposit(Decimal::new(5000, 2)).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&statement_json(&account).unwrap()).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["data"]["account_id"], "11111111111");
        assert_eq!(value["data"]["history"].as_array().map(Vec::len), Some(1));
        assert!(value["data"]["created_at"].is_string());
        assert!(!value.to_string().contains("pass1234"));
    }
}
