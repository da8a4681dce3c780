//! End-to-end integration tests for edgequake-pdfchat.
//!
//! These tests use real PDF files in `./test_cases/`, a real pdfium library
//! and, for the question tests, live LLM API calls. They are gated behind the
//! `E2E_ENABLED` environment variable so they do not run in CI unless
//! explicitly requested.
//!
//! Run with:
//!   PDFIUM_LIB_PATH=/path/to/libpdfium.so E2E_ENABLED=1 cargo test --test e2e -- --nocapture
//!
//! To restrict to a specific test:
//!   E2E_ENABLED=1 cargo test --test e2e test_inspect -- --nocapture

use edgequake_pdfchat::{
    ask, inspect, ChatConfig, ChatSession, DocumentStatus, GenerationError, LlmAnswerGenerator,
    NoopObserver, PdfChatError, PdfiumExtractor, QueryOutcome, SessionObserver, UploadOutcome,
};
use std::path::PathBuf;
use std::sync::Arc;

// ── Test helpers ─────────────────────────────────────────────────────────────

fn test_cases_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("test_cases")
}

/// Skip this test if E2E_ENABLED is not set *or* no PDF file at `path`.
macro_rules! e2e_skip_unless_ready {
    ($path:expr) => {{
        if std::env::var("E2E_ENABLED").is_err() {
            println!("SKIP: set E2E_ENABLED=1 to run e2e tests");
            return;
        }
        let p: PathBuf = $path;
        if !p.exists() {
            println!("SKIP: test file not found: {}", p.display());
            return;
        }
        p
    }};
}

fn has_llm_key() -> bool {
    ["GEMINI_API_KEY", "OPENAI_API_KEY", "ANTHROPIC_API_KEY"]
        .iter()
        .any(|k| std::env::var(k).map(|v| !v.is_empty()).unwrap_or(false))
}

/// Count `--- Page N ---` markers and check they run 1..=N.
fn assert_markers_ascending(text: &str, expected: usize) {
    let pages: Vec<usize> = text
        .lines()
        .filter_map(|l| l.strip_prefix("--- Page ")?.strip_suffix(" ---")?.parse().ok())
        .collect();
    assert_eq!(pages, (1..=expected).collect::<Vec<_>>());
}

// ── Inspect tests (no LLM, instant) ──────────────────────────────────────────

#[tokio::test]
async fn test_inspect_arxiv_paper() {
    let path = e2e_skip_unless_ready!(test_cases_dir().join("attention_is_all_you_need.pdf"));

    let info = inspect(path.to_str().unwrap(), &ChatConfig::default())
        .await
        .expect("inspect() should succeed");

    assert_eq!(info.page_count, 15, "Attention paper should have 15 pages");
    assert!(!info.pdf_version.is_empty());

    println!("Metadata: {:?}", info);
}

#[tokio::test]
async fn test_inspect_nonexistent() {
    if std::env::var("E2E_ENABLED").is_err() {
        println!("SKIP");
        return;
    }

    let result = inspect("/definitely/not/a/real/file.pdf", &ChatConfig::default()).await;
    assert!(matches!(result, Err(PdfChatError::FileNotFound { .. })));
}

// ── Extraction with pdfium (no LLM) ──────────────────────────────────────────

/// Upload through the real extractor; the generator is never called.
#[tokio::test]
async fn test_pdfium_extraction_marks_every_page() {
    let path = e2e_skip_unless_ready!(test_cases_dir().join("attention_is_all_you_need.pdf"));
    let bytes = std::fs::read(&path).unwrap();

    let config = ChatConfig::default();
    let mut session = ChatSession::with_collaborators(
        config.clone(),
        Arc::new(PdfiumExtractor::default()),
        Arc::new(LlmAnswerGenerator::new(config)),
    );

    let outcome = session
        .submit_file(&bytes, "attention_is_all_you_need.pdf")
        .await
        .unwrap();
    assert_eq!(outcome, UploadOutcome::Ready { pages: 15 });

    let doc = session.document().unwrap();
    assert_markers_ascending(&doc.full_text, 15);
    assert!(doc.full_text.contains("Attention"));
    assert_eq!(session.transcript().len(), 1);
}

#[tokio::test]
async fn test_truncated_pdf_is_reported_not_panicked() {
    let path = e2e_skip_unless_ready!(test_cases_dir().join("attention_is_all_you_need.pdf"));
    let mut bytes = std::fs::read(&path).unwrap();
    bytes.truncate(2048);

    let mut session = ChatSession::new(ChatConfig::default());
    let outcome = session.submit_file(&bytes, "truncated.pdf").await.unwrap();

    assert!(matches!(outcome, UploadOutcome::Failed { clear_input: true, .. }));
    assert_eq!(session.document_status(), DocumentStatus::Failed);
    assert!(session.last_error().is_some());
}

// ── Question tests (need LLM API) ────────────────────────────────────────────

#[tokio::test]
async fn test_ask_arxiv_question() {
    let path = e2e_skip_unless_ready!(test_cases_dir().join("attention_is_all_you_need.pdf"));
    if !has_llm_key() {
        println!("SKIP: no LLM API key set");
        return;
    }

    let answer = ask(
        path.to_str().unwrap(),
        "How many attention heads does the base Transformer model use?",
        &ChatConfig::default(),
    )
    .await
    .expect("ask() should succeed");

    assert!(!answer.fallback);
    assert!(answer.answer.contains('8'), "answer: {}", answer.answer);
    println!("--- ANSWER ---\n{}\n--- END ---", answer.answer);
}

#[tokio::test]
async fn test_session_multi_turn() {
    let path = e2e_skip_unless_ready!(test_cases_dir().join("attention_is_all_you_need.pdf"));
    if !has_llm_key() {
        println!("SKIP: no LLM API key set");
        return;
    }
    let bytes = std::fs::read(&path).unwrap();

    let mut session = ChatSession::new(ChatConfig::default());
    session.submit_file(&bytes, "attention.pdf").await.unwrap();

    for q in ["What is the paper's title?", "Which dataset is used for English-German?"] {
        let outcome = session.submit_query(q).await.unwrap();
        assert_eq!(outcome, QueryOutcome::Answered);
    }
    assert_eq!(session.transcript().len(), 5);
}

/// An unknown provider surfaces on the first question, not at construction.
#[tokio::test]
async fn test_unknown_provider_fails_lazily() {
    let path = e2e_skip_unless_ready!(test_cases_dir().join("attention_is_all_you_need.pdf"));
    let bytes = std::fs::read(&path).unwrap();

    let config = ChatConfig::builder()
        .provider_name("no-such-provider")
        .build()
        .expect("building a config never contacts a provider");
    let mut session = ChatSession::new(config);
    session.submit_file(&bytes, "attention.pdf").await.unwrap();

    let outcome = session.submit_query("Title?").await.unwrap();
    assert!(matches!(
        outcome,
        QueryOutcome::Failed {
            error: GenerationError::ProviderNotConfigured { .. }
        }
    ));
    assert_eq!(session.document_status(), DocumentStatus::Ready);
}

// ── Observer API tests (no LLM calls, always run) ────────────────────────────

/// `Arc<dyn SessionObserver>` must be movable into a spawned task.
#[tokio::test]
async fn test_observer_send_in_tokio_spawn() {
    use std::sync::Mutex;

    struct ErrorLogger {
        log: Arc<Mutex<Vec<String>>>,
    }

    impl SessionObserver for ErrorLogger {
        fn on_generation_error(&self, error: &str) {
            self.log.lock().unwrap().push(error.to_string());
        }
    }

    let log = Arc::new(Mutex::new(vec![]));
    let observer: Arc<dyn SessionObserver> = Arc::new(ErrorLogger {
        log: Arc::clone(&log),
    });

    tokio::spawn(async move {
        observer.on_generation_error("LLM API error: timeout");
    })
    .await
    .expect("spawn must succeed");

    assert_eq!(*log.lock().unwrap(), vec!["LLM API error: timeout"]);
}

#[test]
fn test_noop_observer_is_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<NoopObserver>();
    assert_send_sync::<ChatSession>();

    let observer: Arc<dyn SessionObserver> = Arc::new(NoopObserver);
    observer.on_extraction_error("a.pdf", "corrupt");
}

#[test]
fn test_config_accepts_provider_without_network() {
    let config = ChatConfig::builder()
        .provider_name("gemini")
        .model("gemini-2.5-flash")
        .max_tokens(2048)
        .build()
        .expect("builder must succeed");

    assert_eq!(config.provider_name.as_deref(), Some("gemini"));
    assert_eq!(config.max_tokens, 2048);
}
