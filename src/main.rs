use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use tandem_sessions::{
    CaptureDevice, EngineConfig, LocalArtifactStore, ProgressTracker, PromptCatalog,
    PromptSelector, ScriptedBackend, SessionController, Template,
};

/// Demo driver: runs one scripted prompt/record/save cycle against the
/// local artifact store and prints the persisted artifact.
#[derive(Debug, Parser)]
#[command(name = "tandem-sessions", about = "Guided couple-session engine")]
struct Args {
    /// Session template: date-night, deep-dive, or journey
    #[arg(long, default_value = "date-night")]
    template: String,

    /// Config file (e.g. config/tandem-sessions)
    #[arg(long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let cfg = match &args.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };

    let template = match args.template.as_str() {
        "date-night" => Template::DateNight,
        "deep-dive" => Template::DeepDive,
        "journey" => Template::Journey,
        other => anyhow::bail!("unknown template: {other}"),
    };

    info!("tandem-sessions v0.1.0");
    info!("media spool: {}", cfg.store.media_dir);

    let store = Arc::new(LocalArtifactStore::new(&cfg.store.media_dir)?);

    // Canned capture so the demo runs without camera hardware.
    let backend = ScriptedBackend::with_chunks(vec![vec![0u8; 4096]; 3]);
    let capture = CaptureDevice::with_tick(
        Box::new(backend),
        Duration::from_millis(cfg.capture.tick_interval_ms),
    );

    let selector = PromptSelector::new(PromptCatalog::builtin());
    let tracker = ProgressTracker::new(cfg.thresholds.clone());

    let mut session = SessionController::new(selector, capture, store, tracker);

    session.choose_template(template)?;
    if template == Template::Journey {
        session.begin_journey()?;
    }

    if let Some(prompt) = &session.state().current_prompt {
        info!("prompt: \"{}\"", prompt.text);
    }

    session.answer_with_video().await?;
    session.stop_recording().await?;
    session.set_note("Logged from the demo driver")?;

    let outcome = session.save().await?;
    info!("saved artifact {}", outcome.artifact.id);
    if let Some(progress) = outcome.progress {
        info!("phase progress: {}/{}", progress.count, progress.goal);
    }

    println!("{}", serde_json::to_string_pretty(&outcome.artifact)?);

    session.exit();

    Ok(())
}
