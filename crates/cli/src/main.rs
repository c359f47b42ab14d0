//! Scoring CLI - Command-line client for the Scoring API

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use serde_json::{json, Map, Value};
use std::sync::Arc;
use tabled::{Table, Tabled};

use scoring_core::application::{Authenticator, Settings};
use scoring_core::port::time_provider::SystemTimeProvider;

const DEFAULT_URL: &str = "http://127.0.0.1:8080/method";

#[derive(Parser)]
#[command(name = "scoring")]
#[command(about = "Scoring API CLI", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Method endpoint URL
    #[arg(long, env = "SCORING_URL", default_value = DEFAULT_URL)]
    url: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the token the server expects for a login
    Token {
        #[arg(long)]
        login: String,

        #[arg(long)]
        account: Option<String>,
    },

    /// Request an online score
    Score {
        #[arg(long)]
        login: String,

        #[arg(long)]
        account: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        first_name: Option<String>,

        #[arg(long)]
        last_name: Option<String>,

        /// DD.MM.YYYY
        #[arg(long)]
        birthday: Option<String>,

        /// 0 unknown, 1 male, 2 female
        #[arg(long)]
        gender: Option<u8>,
    },

    /// Request interests for a list of clients
    Interests {
        #[arg(long)]
        login: String,

        #[arg(long)]
        account: Option<String>,

        /// Comma separated client ids
        #[arg(long, value_delimiter = ',', required = true)]
        ids: Vec<u64>,

        /// DD.MM.YYYY
        #[arg(long)]
        date: Option<String>,
    },
}

#[derive(Tabled)]
struct InterestsRow {
    client_id: String,
    interests: String,
}

fn authenticator() -> Result<Authenticator> {
    let settings = Settings::from_env().context("Invalid scoring settings")?;
    Ok(Authenticator::new(
        Arc::new(settings),
        Arc::new(SystemTimeProvider),
    ))
}

fn envelope(
    auth: &Authenticator,
    account: Option<String>,
    login: String,
    method: &str,
    arguments: Map<String, Value>,
) -> Value {
    let token = auth.expected_token(account.as_deref(), &login);
    let mut body = Map::new();
    if let Some(account) = account {
        body.insert("account".into(), Value::String(account));
    }
    body.insert("login".into(), Value::String(login));
    body.insert("method".into(), Value::String(method.into()));
    body.insert("token".into(), Value::String(token));
    body.insert("arguments".into(), Value::Object(arguments));
    Value::Object(body)
}

/// Insert only the values that were given
fn put<T: Into<Value>>(args: &mut Map<String, Value>, key: &str, value: Option<T>) {
    if let Some(value) = value {
        args.insert(key.to_string(), value.into());
    }
}

async fn call_method(url: &str, body: &Value) -> Result<Value> {
    let client = reqwest::Client::new();
    let reply: Value = client
        .post(url)
        .json(body)
        .send()
        .await
        .context("Failed to connect to scoring API")?
        .json()
        .await
        .context("Failed to parse response")?;

    if let Some(response) = reply.get("response") {
        return Ok(response.clone());
    }

    let code = reply.get("code").cloned().unwrap_or(Value::Null);
    let error = reply.get("error").cloned().unwrap_or(Value::Null);
    match error {
        Value::String(msg) => anyhow::bail!("API error ({}): {}", code, msg),
        other => anyhow::bail!("API error ({}): {}", code, other),
    }
}

fn interests_rows(response: &Value) -> Vec<InterestsRow> {
    response
        .as_object()
        .map(|clients| {
            clients
                .iter()
                .map(|(id, interests)| InterestsRow {
                    client_id: id.clone(),
                    interests: interests
                        .as_array()
                        .map(|items| {
                            items
                                .iter()
                                .filter_map(Value::as_str)
                                .collect::<Vec<_>>()
                                .join(", ")
                        })
                        .unwrap_or_default(),
                })
                .collect()
        })
        .unwrap_or_default()
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let auth = authenticator()?;

    match cli.command {
        Commands::Token { login, account } => {
            println!("{}", auth.expected_token(account.as_deref(), &login));
        }

        Commands::Score {
            login,
            account,
            phone,
            email,
            first_name,
            last_name,
            birthday,
            gender,
        } => {
            let mut args = Map::new();
            put(&mut args, "phone", phone);
            put(&mut args, "email", email);
            put(&mut args, "first_name", first_name);
            put(&mut args, "last_name", last_name);
            put(&mut args, "birthday", birthday);
            put(&mut args, "gender", gender);

            let body = envelope(&auth, account, login, "online_score", args);
            let response = call_method(&cli.url, &body).await?;

            println!(
                "{} {}",
                "Score:".cyan().bold(),
                response.get("score").unwrap_or(&json!(null))
            );
        }

        Commands::Interests {
            login,
            account,
            ids,
            date,
        } => {
            let mut args = Map::new();
            args.insert("client_ids".into(), json!(ids));
            put(&mut args, "date", date);

            let body = envelope(&auth, account, login, "clients_interests", args);
            let response = call_method(&cli.url, &body).await?;

            let rows = interests_rows(&response);
            if rows.is_empty() {
                println!("{}", "No interests returned".yellow());
            } else {
                println!("{}", Table::new(rows));
            }
        }
    }

    Ok(())
}
