//! Terminal front end for FutureJoy.
//!
//! A line-oriented shell over the library: each typed command becomes an
//! [`Intent`] sent to the view-model task, after which the list is re-rendered
//! from the latest published snapshot.
//!
//! # Architecture
//!
//! ```text
//! stdin lines → parse_command → RuntimeHandle::dispatch → view-model task
//!                                                              │
//! stdout  ←  render(ListViewModel, sponsored items)  ←  watch snapshot
//! ```
//!
//! # Usage
//!
//! ```text
//! futurejoy [--config <path>] [key=value ...]
//! ```
//!
//! # Commands
//!
//! List:
//! - `future` / `past`: Switch filter
//! - `show <n>`: Details and live countdown for row `n`
//! - `archive`, `refresh`
//!
//! Create / edit:
//! - `new`: Open the form, `close` to dismiss
//! - `add <title> | <emoji> | <YYYY-MM-DD[ HH:MM]> [| location | category | notes]`
//! - `edit <n> <field> <value>`: field is title, emoji, date, location, category or notes
//!
//! Delete:
//! - `delete <n>`: Ask to delete row `n`; in selection mode `delete` asks to
//!   delete the selection
//! - `select` / `done`: Enter / leave selection mode
//! - `toggle <n> [<n> ...]`: Select or unselect rows
//! - `yes` / `no`: Confirm / cancel the pending delete
//!
//! `help` lists commands, `quit` exits.

#![allow(clippy::multiple_crate_versions)]

use chrono::{Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use futurejoy::ads::{AdSupplyCache, SponsoredItem};
use futurejoy::app::{EventDraft, EventUpdate, Intent, ListFilter, ToastStyle};
use futurejoy::observability::init_tracing;
use futurejoy::runtime::{self, RuntimeHandle};
use futurejoy::ui::{render, ListViewModel, RenderOptions, Row};
use futurejoy::{Config, FutureJoyError, Result};
use std::collections::BTreeMap;
use std::io::Write as _;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

const HELP: &str = "\
Commands:
  future | past                 switch list
  show <n>                      event details and countdown
  new | close                   open / close the create form
  add <title> | <emoji> | <YYYY-MM-DD[ HH:MM]> [| location | category | notes]
  edit <n> <field> <value>      field: title emoji date location category notes
  delete <n>                    ask to delete one event
  select | done                 enter / leave selection mode
  toggle <n> [<n> ...]          select rows (selection mode)
  delete                        ask to delete the selection (selection mode)
  yes | no                      confirm / cancel a pending delete
  archive | refresh             re-run archival / reload
  quit";

/// Parsed command line.
#[derive(Debug, Default)]
struct Args {
    config_path: Option<PathBuf>,
    overrides: BTreeMap<String, String>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> std::result::Result<Args, String> {
    let mut parsed = Args::default();

    while let Some(arg) = args.next() {
        if arg == "--config" {
            let path = args.next().ok_or("--config needs a path")?;
            parsed.config_path = Some(PathBuf::from(path));
        } else if let Some((key, value)) = arg.split_once('=') {
            parsed.overrides.insert(key.to_string(), value.to_string());
        } else {
            return Err(format!("unexpected argument: {arg}"));
        }
    }
    Ok(parsed)
}

fn load_config(args: &Args) -> Result<Config> {
    let base = match &args.config_path {
        Some(path) => Config::load(path)?,
        None => {
            let default = Config::default_path();
            if default.exists() {
                Config::load(&default)?
            } else {
                Config::default()
            }
        }
    };
    Ok(base.with_overrides(&args.overrides))
}

/// What a line of input asks for.
#[derive(Debug, PartialEq)]
enum Command {
    Intents(Vec<Intent>),
    Show(usize),
    Help,
    Quit,
    Invalid(String),
}

fn parse_command(line: &str, view: &ListViewModel, selection_mode: bool) -> Command {
    let line = line.trim();
    let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();

    let row_id = |text: &str| -> std::result::Result<uuid::Uuid, String> {
        let number: usize = text.parse().map_err(|_| format!("not a row number: {text}"))?;
        view.item(number)
            .map(|item| item.id)
            .ok_or_else(|| format!("no row {number}"))
    };
    let one = |intent: Intent| Command::Intents(vec![intent]);

    match word.to_ascii_lowercase().as_str() {
        "" => Command::Intents(Vec::new()),
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        "future" | "past" | "upcoming" | "archived" => match word.parse::<ListFilter>() {
            Ok(filter) => one(Intent::SetFilter(filter)),
            Err(e) => Command::Invalid(e),
        },
        "refresh" => one(Intent::Refresh),
        "archive" => one(Intent::ArchivePast),
        "new" => one(Intent::OpenComposer),
        "close" => one(Intent::CloseComposer),
        "add" => match parse_draft(rest) {
            Ok(draft) => one(Intent::Create(draft)),
            Err(e) => Command::Invalid(e),
        },
        "edit" => match parse_edit(rest, &row_id) {
            Ok(intent) => one(intent),
            Err(e) => Command::Invalid(e),
        },
        "show" => match rest.parse::<usize>() {
            Ok(n) if view.item(n).is_some() => Command::Show(n),
            _ => Command::Invalid(format!("no row {rest}")),
        },
        "delete" if selection_mode && rest.is_empty() => one(Intent::ConfirmDeleteSelected),
        "delete" => match row_id(rest) {
            Ok(id) => one(Intent::ConfirmDelete(id)),
            Err(e) => Command::Invalid(e),
        },
        "select" => one(Intent::EnterSelectionMode),
        "done" => one(Intent::ExitSelectionMode),
        "toggle" => {
            let ids: std::result::Result<Vec<_>, _> = rest.split_whitespace().map(row_id).collect();
            match ids {
                Ok(ids) if !ids.is_empty() => Command::Intents(ids.into_iter().map(Intent::ToggleSelection).collect()),
                Ok(_) => Command::Invalid("toggle needs row numbers".to_string()),
                Err(e) => Command::Invalid(e),
            }
        }
        "yes" | "y" => one(Intent::DeleteConfirmed),
        "no" | "n" => one(Intent::CancelDelete),
        other => Command::Invalid(format!("unknown command: {other} (try help)")),
    }
}

fn parse_date(text: &str) -> std::result::Result<chrono::DateTime<Utc>, String> {
    let text = text.trim();
    let naive = NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M")
        .or_else(|_| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d").map(|d| d.and_time(chrono::NaiveTime::MIN))
        })
        .map_err(|_| format!("Use YYYY-MM-DD or YYYY-MM-DD HH:MM for the date, not \"{text}\""))?;
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
        .ok_or_else(|| format!("{text} does not exist in the local time zone"))
}

fn parse_draft(rest: &str) -> std::result::Result<EventDraft, String> {
    let fields: Vec<&str> = rest.split('|').map(str::trim).collect();
    if fields.len() < 3 {
        return Err("add needs: <title> | <emoji> | <date>".to_string());
    }

    let mut draft = EventDraft::new(fields[0], fields[1], parse_date(fields[2])?);
    if let Some(location) = fields.get(3) {
        draft = draft.with_location(*location);
    }
    if let Some(category) = fields.get(4) {
        draft = draft.with_category(*category);
    }
    if let Some(notes) = fields.get(5) {
        draft = draft.with_notes(*notes);
    }
    Ok(draft)
}

fn parse_edit(
    rest: &str,
    row_id: &dyn Fn(&str) -> std::result::Result<uuid::Uuid, String>,
) -> std::result::Result<Intent, String> {
    let mut parts = rest.splitn(3, char::is_whitespace);
    let (Some(row), Some(field)) = (parts.next(), parts.next()) else {
        return Err("edit needs: <n> <field> <value>".to_string());
    };
    let id = row_id(row)?;
    let value = parts.next().unwrap_or("").trim().to_string();
    let optional = (!value.is_empty()).then(|| value.clone());

    let mut changes = EventUpdate::default();
    match field {
        "title" => changes.title = Some(value),
        "emoji" => changes.emoji = Some(value),
        "date" => changes.date = Some(parse_date(&value)?),
        "location" => changes.location = Some(optional),
        "category" => changes.category = Some(optional),
        "notes" => changes.notes = Some(optional),
        other => return Err(format!("cannot edit {other}")),
    }
    Ok(Intent::Update { id, changes })
}

struct Shell {
    handle: RuntimeHandle,
    ads: AdSupplyCache,
    sponsored: BTreeMap<usize, SponsoredItem>,
    options: RenderOptions,
}

impl Shell {
    fn view(&self) -> ListViewModel {
        let snapshot = self.handle.snapshot();
        ListViewModel::compute(&snapshot, Local::now().date_naive(), self.ads.settings().interval)
    }

    async fn fill_sponsored_slots(&mut self, view: &ListViewModel) {
        for row in &view.rows {
            if let Row::Sponsored { slot } = row {
                if !self.sponsored.contains_key(slot) {
                    if let Some(item) = self.ads.get_item().await {
                        self.sponsored.insert(*slot, item);
                    }
                }
            }
        }
    }

    async fn redraw(&mut self) {
        let view = self.view();
        self.fill_sponsored_slots(&view).await;
        print!("{}", render(&view, &self.sponsored, self.options));
    }

    fn show(&self, number: usize) {
        let snapshot = self.handle.snapshot();
        let view = self.view();
        let Some(event) = view
            .item(number)
            .and_then(|item| snapshot.events.iter().find(|e| e.id == item.id))
        else {
            return;
        };

        let left = event.time_remaining(Utc::now());
        println!("{} {}", event.emoji, event.title);
        println!("  {}", event.local_day().format("%A, %B %-d, %Y"));
        for (label, value) in [
            ("Location", &event.location),
            ("Category", &event.category),
            ("Notes", &event.notes),
        ] {
            if let Some(value) = value {
                println!("  {label}: {value}");
            }
        }
        println!(
            "  {} days  {:02} hours  {:02} minutes  {:02} seconds",
            left.days, left.hours, left.minutes, left.seconds
        );
    }
}

fn prompt() {
    print!("> ");
    let _ = std::io::stdout().flush();
}

async fn run(args: Args) -> Result<()> {
    let config = load_config(&args)?;
    init_tracing(&config);
    tracing::info!(data_dir = ?config.resolved_data_dir(), "starting futurejoy");

    let vm = futurejoy::initialize(&config)?;
    let (handle, task) = runtime::spawn(vm);

    let cols = std::env::var("COLUMNS")
        .ok()
        .and_then(|c| c.parse().ok())
        .unwrap_or(80);
    let options = if std::env::var_os("NO_COLOR").is_some() {
        RenderOptions::plain(cols)
    } else {
        RenderOptions::colored(cols)
    };

    let mut shell = Shell {
        handle,
        ads: AdSupplyCache::new(Arc::new(config.house_ad_source()), config.ad_settings()),
        sponsored: BTreeMap::new(),
        options,
    };

    shell.redraw().await;
    prompt();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let view = shell.view();
        let selection_mode = shell.handle.snapshot().selection_mode;

        match parse_command(&line, &view, selection_mode) {
            Command::Quit => break,
            Command::Help => println!("{HELP}"),
            Command::Show(n) => shell.show(n),
            Command::Invalid(message) => {
                shell
                    .handle
                    .dispatch(Intent::PresentToast {
                        message,
                        style: ToastStyle::Error,
                        duration: None,
                    })
                    .await?;
                shell.redraw().await;
            }
            Command::Intents(intents) => {
                for intent in intents {
                    shell.handle.dispatch(intent).await?;
                }
                shell.redraw().await;
            }
        }
        prompt();
    }

    drop(shell);
    task.await
        .map_err(|e| FutureJoyError::Runtime(format!("view-model task failed: {e}")))?;
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("futurejoy: {message}");
            eprintln!("usage: futurejoy [--config <path>] [key=value ...]");
            return ExitCode::from(2);
        }
    };

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "futurejoy exited with an error");
            eprintln!("futurejoy: {e}");
            ExitCode::FAILURE
        }
    }
}
