use std::{io::Read, path::PathBuf, process::ExitCode, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{
    Document, HttpPageReloader, HttpTransport, Notifier, SubmitInterceptor, SubmitOutcome,
    TweetForm, TWEET_FORM_ID,
};
use shared::domain::Username;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;

use config::{load_settings, resolve_urls, DEFAULT_CONFIG_FILE};

/// Post a tweet to a Dwitter server.
#[derive(Parser, Debug)]
#[command(name = "dwitter-post")]
struct Args {
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,
    #[arg(long)]
    server_url: Option<String>,
    #[arg(long)]
    user: Option<String>,
    /// Page fetched again after a successful post.
    #[arg(long)]
    page_url: Option<String>,
    /// Draft text; read from stdin when omitted.
    text: Option<String>,
}

struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn alert(&self, message: &str) {
        eprintln!("{message}");
    }
}

fn read_draft(text: Option<String>) -> Result<String> {
    if let Some(text) = text {
        return Ok(text);
    }
    let mut raw = String::new();
    std::io::stdin()
        .read_to_string(&mut raw)
        .context("failed to read draft from stdin")?;
    Ok(raw.trim_end_matches(['\n', '\r']).to_string())
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    let args = Args::parse();

    let mut settings = load_settings(&args.config);
    if let Some(v) = args.server_url {
        settings.server_url = v;
    }
    if let Some(v) = args.user {
        settings.user = Some(v);
    }
    if let Some(v) = args.page_url {
        settings.page_url = Some(v);
    }

    let user = settings
        .user
        .clone()
        .context("no user configured; pass --user or set DWITTER_USER")?;
    let user = Username::parse(user)?;
    let (server_url, page_url) = resolve_urls(&settings)?;
    let draft = read_draft(args.text)?;

    let mut document = Document::loading();
    document.insert_form(TweetForm::new(TWEET_FORM_ID).with_text(draft));
    document.finish_loading();

    info!(%user, server = %server_url, "posting tweet");
    let listener = SubmitInterceptor::new(
        user,
        Arc::new(HttpTransport::new(server_url)),
        Arc::new(TerminalNotifier),
        Arc::new(HttpPageReloader::new(page_url)),
    )
    .attach(&document)?;

    let mut event = document
        .submit(TWEET_FORM_ID)
        .context("tweet form disappeared before submit")?;
    let code = match listener.handle(&mut event).await {
        SubmitOutcome::Posted | SubmitOutcome::Ignored => ExitCode::SUCCESS,
        SubmitOutcome::Rejected(_) => ExitCode::from(1),
        SubmitOutcome::Failed(_) => ExitCode::from(2),
    };
    Ok(code)
}
