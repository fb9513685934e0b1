use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use reqwest::header::{CONTENT_TYPE, COOKIE, HeaderMap, HeaderName, HeaderValue};
use slots::menu::{self, EditMenu, MenuEntry};
use slots::render::plain_text;
use slots::{AssignRequest, Cell, CellDataset, CellError, OptionCatalog, ParseError, SaveFailure, SaveOutcome};
use tracing_subscriber::EnvFilter;

#[cfg(test)]
#[path = "main_test.rs"]
mod main_test;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("missing save endpoint; pass --assign-url or set SLOTGRID_ASSIGN_URL")]
    MissingAssignUrl,
    #[error("missing CSRF token; pass --csrf-token or set SLOTGRID_CSRF_TOKEN")]
    MissingCsrfToken,
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
    #[error("invalid header name: {0}")]
    InvalidHeaderName(#[from] reqwest::header::InvalidHeaderName),
    #[error("save failed: {}", .0.alert_message())]
    Save(#[from] SaveFailure),
    #[error(transparent)]
    Cell(#[from] CellError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("could not read {}: {source}", path.display())]
    ReadOptions {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "slotgrid", about = "Inspect and save slot-grid cell assignments")]
struct Cli {
    /// Save endpoint, as rendered into the page's `assign-url` block.
    #[arg(long, env = "SLOTGRID_ASSIGN_URL")]
    assign_url: Option<String>,

    #[arg(long, env = "SLOTGRID_CSRF_TOKEN")]
    csrf_token: Option<String>,

    /// Raw `Cookie` header value for an authenticated session.
    #[arg(long, env = "SLOTGRID_SESSION_COOKIE")]
    session_cookie: Option<String>,

    #[arg(long, default_value_t = 30_000)]
    timeout_ms: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Save one assignment through the endpoint the widget uses.
    Assign(AssignArgs),
    /// Render a cell from raw attribute values without touching the network.
    Preview(PreviewArgs),
}

#[derive(Args, Debug)]
struct AssignArgs {
    #[arg(long)]
    slot_id: i64,

    #[arg(long)]
    student_id: i64,

    /// Menu value: `0` to unassign, `<id>`, or `<id>-locked`.
    choice: String,
}

#[derive(Args, Debug)]
struct PreviewArgs {
    /// JSON file shaped like the page's `all-options` block.
    #[arg(long)]
    options: PathBuf,

    #[arg(long)]
    slot_id: Option<String>,

    #[arg(long)]
    student_id: Option<String>,

    #[arg(long)]
    current_item_id: Option<String>,

    #[arg(long)]
    locked: Option<String>,

    #[arg(long)]
    preferred_options: Option<String>,

    #[arg(long)]
    remaining_options: Option<String>,

    #[arg(long)]
    allow_locking: Option<String>,

    /// Also pick this menu value and print the request that would be sent.
    #[arg(long)]
    choose: Option<String>,
}

impl PreviewArgs {
    fn dataset(&self) -> CellDataset {
        CellDataset {
            slot_id: self.slot_id.clone(),
            student_id: self.student_id.clone(),
            current_item_id: self.current_item_id.clone(),
            locked: self.locked.clone(),
            preferred_options: self.preferred_options.clone(),
            remaining_options: self.remaining_options.clone(),
            allow_locking: self.allow_locking.clone(),
        }
    }
}

#[derive(Debug, Clone)]
struct SaveContext {
    assign_url: String,
    csrf_token: String,
    session_cookie: Option<String>,
    timeout: Duration,
}

impl SaveContext {
    fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        Ok(Self {
            assign_url: cli.assign_url.clone().ok_or(CliError::MissingAssignUrl)?,
            csrf_token: cli.csrf_token.clone().ok_or(CliError::MissingCsrfToken)?,
            session_cookie: cli.session_cookie.clone(),
            timeout: Duration::from_millis(cli.timeout_ms),
        })
    }

    fn headers(&self) -> Result<HeaderMap, CliError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(HeaderName::try_from(slots::CSRF_HEADER)?, HeaderValue::from_str(&self.csrf_token)?);
        if let Some(cookie) = &self.session_cookie {
            headers.insert(COOKIE, HeaderValue::from_str(cookie)?);
        }
        Ok(headers)
    }
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match &cli.command {
        Command::Assign(args) => run_assign(&SaveContext::from_cli(&cli)?, args).await,
        Command::Preview(args) => run_preview(args),
    }
}

async fn run_assign(ctx: &SaveContext, args: &AssignArgs) -> Result<(), CliError> {
    let choice = menu::decode_choice(&args.choice)?;
    let request = AssignRequest::new(args.slot_id, args.student_id, choice);
    tracing::info!(
        slot_id = request.slot_id,
        student_id = request.student_id,
        option_id = ?request.option_id,
        admin_lock = request.admin_lock,
        "saving assignment"
    );

    let outcome = match tokio::time::timeout(ctx.timeout, post_assignment(ctx, &request)).await {
        Ok(outcome) => outcome?,
        Err(_) => SaveOutcome::Failure(SaveFailure::TimedOut(ctx.timeout)),
    };

    match outcome {
        SaveOutcome::Success { .. } => {
            println!("{}", describe_saved(&request));
            Ok(())
        }
        SaveOutcome::Failure(failure) => {
            tracing::warn!(code = ?failure.code(), "save rejected: {failure}");
            Err(failure.into())
        }
    }
}

async fn post_assignment(ctx: &SaveContext, request: &AssignRequest) -> Result<SaveOutcome, CliError> {
    let client = reqwest::Client::new();
    let body = serde_json::to_string(request)?;
    let response = client
        .post(&ctx.assign_url)
        .headers(ctx.headers()?)
        .body(body)
        .send()
        .await?;
    let status = response.status().as_u16();
    let text = response.text().await?;
    Ok(SaveOutcome::from_response(request, status, &text))
}

fn describe_saved(request: &AssignRequest) -> String {
    let target = match request.option_id {
        None => "unassigned".to_owned(),
        Some(id) if request.admin_lock => format!("option {id} (locked)"),
        Some(id) => format!("option {id}"),
    };
    format!("saved: slot {} student {} -> {target}", request.slot_id, request.student_id)
}

fn run_preview(args: &PreviewArgs) -> Result<(), CliError> {
    let catalog = read_catalog(&args.options)?;
    let mut cell = Cell::from_dataset(&args.dataset(), Arc::new(catalog))?;

    println!("{}", plain_text(&cell.at_rest_glyphs()));
    for line in menu_lines(&cell.edit_menu()) {
        println!("{line}");
    }

    if let Some(value) = &args.choose {
        cell.begin_edit();
        let request = cell.choose(value)?;
        println!("{}", serde_json::to_string_pretty(&request)?);
    }
    Ok(())
}

fn read_catalog(path: &Path) -> Result<OptionCatalog, CliError> {
    let raw = std::fs::read_to_string(path).map_err(|source| CliError::ReadOptions {
        path: path.to_owned(),
        source,
    })?;
    Ok(OptionCatalog::from_json(&raw)?)
}

/// Text form of the edit menu; `*` marks the pre-selected entry.
fn menu_lines(menu: &EditMenu) -> Vec<String> {
    let mut lines = vec![entry_line(&menu.unassigned)];
    for group in &menu.groups {
        lines.push(format!("{}:", group.label));
        lines.extend(group.entries.iter().map(|entry| format!("  {}", entry_line(entry))));
    }
    lines
}

fn entry_line(entry: &MenuEntry) -> String {
    let mark = if entry.selected { '*' } else { ' ' };
    format!("{mark} {} [{}]", entry.text, entry.value)
}
