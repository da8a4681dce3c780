//! CLI binary for edgequake-pdfchat.
//!
//! A thin shim over the library crate: maps CLI flags to `ChatConfig`, loads
//! one PDF into a `ChatSession`, then answers `--question` arguments or runs
//! an interactive prompt.

use anyhow::{Context, Result};
use clap::Parser;
use edgequake_pdfchat::pipeline::input::resolve_input;
use edgequake_pdfchat::{
    inspect, ChatConfig, ChatSession, Locale, MarkupRenderer, Messages, PlainTextRenderer,
    QueryOutcome, Rejection, SafeHtmlRenderer, Sender, SessionObserver, UploadOutcome,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

// ── CLI observer using indicatif ─────────────────────────────────────────────

/// Shows a spinner while a document is read or a question is answered.
struct CliObserver {
    messages: &'static Messages,
    spinner: Mutex<Option<ProgressBar>>,
}

impl CliObserver {
    fn new(messages: &'static Messages) -> Arc<Self> {
        Arc::new(Self {
            messages,
            spinner: Mutex::new(None),
        })
    }

    fn start(&self, prefix: &str, msg: String) {
        let bar = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);
        bar.set_style(style);
        bar.set_prefix(prefix.to_string());
        bar.set_message(msg);
        bar.enable_steady_tick(Duration::from_millis(80));

        if let Ok(mut slot) = self.spinner.lock() {
            if let Some(old) = slot.replace(bar) {
                old.finish_and_clear();
            }
        }
    }

    fn stop(&self) {
        if let Ok(mut slot) = self.spinner.lock() {
            if let Some(bar) = slot.take() {
                bar.finish_and_clear();
            }
        }
    }
}

impl SessionObserver for CliObserver {
    fn on_extraction_start(&self, name: &str) {
        self.start("Reading", self.messages.reading_notice(name));
    }

    fn on_extraction_complete(&self, name: &str, pages: usize, chars: usize) {
        self.stop();
        eprintln!(
            "{} {}  {}",
            green("✔"),
            bold(name),
            dim(&format!("{pages} pages, {chars} chars")),
        );
    }

    fn on_extraction_error(&self, name: &str, error: &str) {
        self.stop();
        eprintln!(
            "{} {}  {}",
            red("✘"),
            bold(name),
            self.messages.extraction_failed
        );
        eprintln!("  {}", dim(error));
    }

    fn on_query_start(&self, _query: &str) {
        self.start("Asking", self.messages.analysing_notice.to_string());
    }

    fn on_answer(&self, _chars: usize) {
        self.stop();
    }

    fn on_generation_error(&self, error: &str) {
        self.stop();
        eprintln!("{} {}", red("✘"), dim(error));
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Interactive chat about a document
  pdfchat policy.pdf

  # One question, answer on stdout
  pdfchat policy.pdf -q "What is the leave policy?"

  # Several questions, transcript as JSON
  pdfchat policy.pdf -q "Who approves leave?" -q "How many days?" --json

  # Myanmar messages and grounding prompt
  pdfchat --locale my notice.pdf

  # From a URL, with a specific model
  pdfchat --provider openai --model gpt-4.1-mini https://example.com/handbook.pdf

  # Inspect PDF metadata (no API key needed)
  pdfchat --inspect-only policy.pdf

INTERACTIVE COMMANDS:
  /open <path|url>   Load another document (clears the conversation)
  /transcript        Print the conversation so far
  /help              Show these commands
  /quit              Exit

ENVIRONMENT VARIABLES:
  GEMINI_API_KEY          Google Gemini API key (default model gemini-2.5-flash)
  OPENAI_API_KEY          OpenAI API key
  ANTHROPIC_API_KEY       Anthropic API key
  EDGEQUAKE_LLM_PROVIDER  Override provider (gemini, openai, anthropic, ollama)
  EDGEQUAKE_MODEL         Override model ID
  PDFIUM_LIB_PATH         Path to libpdfium (otherwise ./ and the system paths)
"#;

const INTERACTIVE_HELP: &str = "\
  /open <path|url>   load another document
  /transcript        print the conversation so far
  /help              show this help
  /quit              exit";

/// Ask questions about a PDF and get answers grounded in its text.
#[derive(Parser, Debug)]
#[command(
    name = "pdfchat",
    version,
    about = "Ask questions about a PDF and get answers grounded in its text",
    long_about = "Load a PDF (local file or URL), then ask questions about it. Every answer \
comes from one LLM call that sees the whole document text and is instructed to answer only \
from it. Supports Google Gemini, OpenAI, Anthropic, Azure OpenAI and OpenAI-compatible \
endpoints (Ollama, LM Studio, vLLM).",
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Local PDF file path or HTTP/HTTPS URL.
    input: Option<String>,

    /// Ask this question and exit (repeatable). Without it, start an interactive prompt.
    #[arg(short = 'q', long = "question")]
    questions: Vec<String>,

    /// LLM model ID (e.g. gemini-2.5-flash, gpt-4.1-mini, claude-sonnet-4-20250514).
    #[arg(long, env = "EDGEQUAKE_MODEL")]
    model: Option<String>,

    /// LLM provider: gemini, openai, anthropic, azure, ollama.
    #[arg(
        long,
        env = "EDGEQUAKE_PROVIDER",
        long_help = "LLM provider. Auto-detected from API key env vars if not set.\n\
          Supported: gemini, openai, anthropic, azure, mistral, ollama, lmstudio."
    )]
    provider: Option<String>,

    /// Language of messages and the built-in prompt: en, my.
    #[arg(long, env = "PDFCHAT_LOCALE", default_value = "en", value_parser = parse_locale)]
    locale: Locale,

    /// PDF user password for encrypted documents.
    #[arg(long, env = "PDFCHAT_PASSWORD")]
    password: Option<String>,

    /// Text file with a custom grounding prompt; must contain {document} once.
    #[arg(long, env = "PDFCHAT_PROMPT_TEMPLATE")]
    prompt_template: Option<PathBuf>,

    /// LLM temperature (0.0–2.0).
    #[arg(long, env = "PDFCHAT_TEMPERATURE", default_value_t = 0.2)]
    temperature: f32,

    /// Max LLM output tokens per answer.
    #[arg(long, env = "PDFCHAT_MAX_TOKENS", default_value_t = 4096)]
    max_tokens: usize,

    /// HTTP download timeout in seconds.
    #[arg(long, env = "PDFCHAT_DOWNLOAD_TIMEOUT", default_value_t = 120)]
    download_timeout: u64,

    /// Print the final transcript as JSON on stdout.
    #[arg(long, env = "PDFCHAT_JSON")]
    json: bool,

    /// Render answers as sanitised HTML instead of plain text.
    #[arg(long, env = "PDFCHAT_HTML")]
    html: bool,

    /// Disable spinners.
    #[arg(long, env = "PDFCHAT_NO_PROGRESS")]
    no_progress: bool,

    /// Print PDF metadata only, no questions.
    #[arg(long)]
    inspect_only: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "PDFCHAT_VERBOSE")]
    verbose: bool,

    /// Suppress all output except answers and errors.
    #[arg(long, env = "PDFCHAT_QUIET")]
    quiet: bool,
}

fn parse_locale(s: &str) -> std::result::Result<Locale, String> {
    Locale::from_tag(s).ok_or_else(|| format!("unknown locale '{s}' (expected en or my)"))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // INFO-level library logs would interleave with the spinner.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    let config = build_config(&cli, show_progress).await?;

    // ── Inspect-only mode ────────────────────────────────────────────────
    if cli.inspect_only {
        let input = cli
            .input
            .as_deref()
            .context("--inspect-only needs a PDF path or URL")?;
        let info = inspect(input, &config)
            .await
            .context("Failed to inspect PDF")?;

        if cli.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&info).context("Failed to serialize metadata")?
            );
        } else {
            println!("File:         {}", input);
            if let Some(ref t) = info.title {
                println!("Title:        {}", t);
            }
            if let Some(ref a) = info.author {
                println!("Author:       {}", a);
            }
            if let Some(ref s) = info.subject {
                println!("Subject:      {}", s);
            }
            println!("Pages:        {}", info.page_count);
            println!("PDF Version:  {}", info.pdf_version);
            if let Some(ref p) = info.producer {
                println!("Producer:     {}", p);
            }
            if let Some(ref c) = info.creator {
                println!("Creator:      {}", c);
            }
        }
        return Ok(());
    }

    let renderer: Box<dyn MarkupRenderer> = if cli.html {
        Box::new(SafeHtmlRenderer)
    } else {
        Box::new(PlainTextRenderer)
    };
    let ui = Frontend {
        cli: &cli,
        renderer,
        show_progress,
    };
    let mut session = ChatSession::new(config);

    if let Some(ref input) = cli.input {
        let ready = open_document(&mut session, input, &ui).await?;
        if !ready && !cli.questions.is_empty() {
            anyhow::bail!(
                "{}",
                session.last_error().unwrap_or("Could not read the document")
            );
        }
    }

    // ── One-shot questions ───────────────────────────────────────────────
    if !cli.questions.is_empty() {
        if cli.input.is_none() {
            anyhow::bail!("--question needs a PDF path or URL");
        }
        for question in &cli.questions {
            ask_question(&mut session, question, &ui).await;
        }
    } else {
        interactive(&mut session, &ui).await?;
    }

    if cli.json {
        let out = serde_json::json!({
            "document": session.document().map(|d| d.name.clone()),
            "pages": session.document().map(|d| d.page_count),
            "transcript": session.transcript(),
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&out).context("Failed to serialise transcript")?
        );
    }

    Ok(())
}

/// Output settings shared by every printing helper.
struct Frontend<'a> {
    cli: &'a Cli,
    renderer: Box<dyn MarkupRenderer>,
    /// The spinner observer is installed and reports progress and failures.
    show_progress: bool,
}

/// Map CLI args to `ChatConfig`.
async fn build_config(cli: &Cli, show_progress: bool) -> Result<ChatConfig> {
    let mut builder = ChatConfig::builder()
        .locale(cli.locale)
        .temperature(cli.temperature)
        .max_tokens(cli.max_tokens)
        .download_timeout_secs(cli.download_timeout);

    if let Some(ref model) = cli.model {
        builder = builder.model(model);
    }
    if let Some(ref provider) = cli.provider {
        builder = builder.provider_name(provider);
    }
    if let Some(ref password) = cli.password {
        builder = builder.password(password);
    }
    if let Some(ref path) = cli.prompt_template {
        let template = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read prompt template from {:?}", path))?;
        builder = builder.prompt_template(template);
    }
    if show_progress {
        builder = builder.observer(CliObserver::new(cli.locale.messages()));
    }

    builder.build().context("Invalid configuration")
}

/// Load `input` into the session. Returns whether the document is ready.
async fn open_document(session: &mut ChatSession, input: &str, ui: &Frontend<'_>) -> Result<bool> {
    let resolved = resolve_input(input, ui.cli.download_timeout)
        .await
        .with_context(|| format!("Failed to load '{}'", input))?;

    match session.submit_file(&resolved.bytes, &resolved.name).await {
        Ok(UploadOutcome::Ready { .. }) => {
            if !ui.cli.json {
                if let Some(last) = session.transcript().last() {
                    print_exchange(last.sender, &last.text, ui.renderer.as_ref());
                }
            }
            Ok(true)
        }
        Ok(UploadOutcome::Failed { error, .. }) => {
            // With a spinner the observer has already reported it.
            if !ui.cli.quiet && !ui.show_progress {
                eprintln!(
                    "{} {}",
                    red("✘"),
                    session.last_error().unwrap_or_default()
                );
                eprintln!("  {}", dim(&error.to_string()));
            }
            Ok(false)
        }
        Err(rejection) => {
            eprintln!("{} {}", red("✘"), rejection);
            Ok(false)
        }
    }
}

/// Ask one question and print the assistant's reply.
async fn ask_question(session: &mut ChatSession, question: &str, ui: &Frontend<'_>) {
    match session.submit_query(question).await {
        Ok(outcome) => {
            if ui.cli.json {
                return;
            }
            if let Some(last) = session.transcript().last() {
                print_exchange(last.sender, &last.text, ui.renderer.as_ref());
            }
            if let QueryOutcome::Failed { .. } = outcome {
                if let Some(err) = session.last_error() {
                    eprintln!("{} {}", red("!"), err);
                }
            }
        }
        Err(Rejection::NoDocument) => {
            eprintln!("{}", dim(session.messages().upload_prompt));
        }
        Err(Rejection::EmptyQuery) => {}
        Err(rejection) => eprintln!("{} {}", red("✘"), rejection),
    }
}

/// One line of interactive input.
#[derive(Debug, PartialEq, Eq)]
enum Command<'a> {
    Quit,
    Help,
    Transcript,
    Open(&'a str),
    OpenUsage,
    /// A question, exactly as typed.
    Ask(&'a str),
}

fn parse_line(raw: &str) -> Command<'_> {
    let trimmed = raw.trim();
    let (cmd, arg) = trimmed
        .split_once(char::is_whitespace)
        .map_or((trimmed, ""), |(c, a)| (c, a.trim()));
    match cmd {
        "/quit" | "/exit" => Command::Quit,
        "/help" => Command::Help,
        "/transcript" => Command::Transcript,
        "/open" if arg.is_empty() => Command::OpenUsage,
        "/open" => Command::Open(arg),
        _ => Command::Ask(raw),
    }
}

/// Read questions and commands from stdin until EOF or `/quit`.
async fn interactive(session: &mut ChatSession, ui: &Frontend<'_>) -> Result<()> {
    let messages = session.messages();
    if !ui.cli.quiet {
        let hint = if session.can_accept_query() {
            messages.query_placeholder
        } else {
            messages.upload_prompt
        };
        eprintln!("{}  {}", dim(hint), dim("(/help for commands)"));
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        eprint!("{} ", cyan("›"));
        let Some(line) = lines.next_line().await.context("Failed to read stdin")? else {
            break;
        };

        match parse_line(&line) {
            Command::Quit => break,
            Command::Help => eprintln!("{INTERACTIVE_HELP}"),
            Command::Transcript => {
                for exchange in session.transcript() {
                    print_exchange(exchange.sender, &exchange.text, ui.renderer.as_ref());
                }
            }
            Command::OpenUsage => eprintln!("{}", dim("usage: /open <path|url>")),
            Command::Open(target) => {
                if let Err(e) = open_document(session, target, ui).await {
                    eprintln!("{} {:#}", red("✘"), e);
                }
            }
            Command::Ask(question) => ask_question(session, question, ui).await,
        }
    }
    Ok(())
}

fn print_exchange(sender: Sender, text: &str, renderer: &dyn MarkupRenderer) {
    let label = match sender {
        Sender::User => bold("You:"),
        Sender::Assistant => cyan("Assistant:"),
    };
    println!("{label}\n{}\n", renderer.render(text).trim_end());
}
