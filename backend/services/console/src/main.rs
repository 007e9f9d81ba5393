mod client;
mod dashboard;

use std::process::ExitCode;

use chrono::Local;
use clap::{Parser, Subcommand};
use profileera_common::types::LeadSubmission;

use crate::client::{ClientError, ConsoleClient, ConsoleClientConfig};
use crate::dashboard::{filter_leads, render_lead, stats};

#[derive(Debug, Parser)]
#[command(name = "profileera-console", version, about = "ProfileEra lead console")]
struct Cli {
    /// Base URL of the lead backend.
    #[arg(
        long,
        global = true,
        env = "PROFILEERA_API_URL",
        default_value = "http://localhost:5000"
    )]
    api_url: String,

    /// Admin API key returned by `login`.
    #[arg(long, global = true, env = "PROFILEERA_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    #[arg(long, global = true, default_value_t = 15)]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Submit the lead form.
    Submit {
        #[arg(long)]
        name: String,
        #[arg(long)]
        contact: String,
        #[arg(long)]
        linkedin: Option<String>,
        #[arg(long)]
        naukri: Option<String>,
    },
    /// Exchange admin credentials for the API key.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "PROFILEERA_ADMIN_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Check that the configured API key is accepted.
    Verify,
    /// List leads, newest first.
    List {
        /// Keep leads whose name or contact contains this text.
        #[arg(long, short)]
        search: Option<String>,
    },
    /// Show a single lead.
    Show { id: String },
    /// Delete a lead.
    Delete { id: String },
    /// Lead totals for the dashboard.
    Stats,
}

#[tokio::main]
async fn main() -> ExitCode {
    profileera_config::init_tracing("warn");
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report(&e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), ClientError> {
    let client = ConsoleClient::new(ConsoleClientConfig {
        base_url: cli.api_url,
        api_key: cli.api_key,
        timeout_secs: cli.timeout_secs,
    })?;

    match cli.command {
        Command::Submit {
            name,
            contact,
            linkedin,
            naukri,
        } => {
            let submission = LeadSubmission {
                name: Some(name),
                contact: Some(contact),
                linkedin,
                naukri,
            };
            let created = client.submit_lead(&submission).await?;
            println!("{} (id {})", created.message, created.lead_id);
        }
        Command::Login { email, password } => {
            let resp = client.login(&email, &password).await?;
            println!("{}", resp.message);
            println!("{}", resp.api_key);
        }
        Command::Verify => {
            println!("{}", client.verify().await?.message);
        }
        Command::List { search } => {
            let leads = client.list_leads().await?;
            let shown = filter_leads(&leads, search.as_deref().unwrap_or_default());
            tracing::debug!(total = leads.len(), shown = shown.len(), "fetched leads");
            if shown.is_empty() {
                println!("No leads found");
            }
            for lead in shown {
                println!("{}", render_lead(lead));
            }
        }
        Command::Show { id } => {
            println!("{}", render_lead(&client.get_lead(&id).await?));
        }
        Command::Delete { id } => {
            println!("{}", client.delete_lead(&id).await?.message);
        }
        Command::Stats => {
            let leads = client.list_leads().await?;
            let s = stats(&leads, &Local::now());
            println!("Total leads: {}", s.total);
            println!("New today:   {}", s.new_today);
        }
    }

    Ok(())
}

fn report(err: &ClientError) {
    match err {
        ClientError::InvalidLead(fields) => {
            eprintln!("Please fix the following:");
            for (field, message) in fields.iter() {
                eprintln!("  {}: {message}", field.as_str());
            }
        }
        other => eprintln!("error: {other}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_list_with_search() {
        let cli = Cli::try_parse_from([
            "profileera-console",
            "--api-url",
            "http://api.test",
            "list",
            "--search",
            "asha",
        ])
        .unwrap();
        assert_eq!(cli.api_url, "http://api.test");
        match cli.command {
            Command::List { search } => assert_eq!(search.as_deref(), Some("asha")),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn submit_requires_contact() {
        let result = Cli::try_parse_from(["profileera-console", "submit", "--name", "Asha"]);
        assert!(result.is_err());
    }

    #[test]
    fn global_key_after_subcommand() {
        let cli =
            Cli::try_parse_from(["profileera-console", "verify", "--api-key", "k1"]).unwrap();
        assert_eq!(cli.api_key.as_deref(), Some("k1"));
    }
}
