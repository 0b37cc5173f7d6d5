//! Application entry point — record from the default microphone, then
//! transcribe.
//!
//! # Startup sequence
//!
//! 1. Initialise logging.
//! 2. Load [`AppConfig`] from disk (returns default on first run) and
//!    create the settings/models/recordings directories.
//! 3. Load the Whisper model and vocabulary into a [`Transcriber`].
//! 4. Start a capture session; stop it when the user presses Enter (or
//!    after the 30-second session buffer fills).
//! 5. Transcribe the saved WAV and print the text.

use std::io::BufRead;
use std::sync::Arc;

use anyhow::{bail, Result};

use voice_capture::{
    audio::{CpalSource, WavSink},
    capture::Recorder,
    config::{AppConfig, AppPaths},
    listener::Listener,
    stt::Transcriber,
};

// ---------------------------------------------------------------------------
// Terminal listener
// ---------------------------------------------------------------------------

/// Forwards session updates to the terminal and logs the realtime windows.
struct TerminalListener;

impl Listener for TerminalListener {
    fn on_update_received(&self, message: &str) {
        println!("{message}");
    }

    fn on_data_received(&self, samples: &[f32]) {
        let rms = (samples.iter().map(|s| s * s).sum::<f32>() / samples.len().max(1) as f32).sqrt();
        log::info!("realtime window: {} samples, rms {rms:.4}", samples.len());
    }
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::load()?;
    let paths = AppPaths::new();
    paths.ensure_dirs()?;

    let model_path = paths.models_dir.join(&config.stt.model_file);
    let vocab_path = paths.models_dir.join(&config.stt.vocab_file);

    let mut transcriber = Transcriber::with_whisper();
    if !transcriber.initialize(&model_path, &vocab_path, config.stt.multilingual) {
        bail!(
            "could not load model {} / vocabulary {} — place the files in {}",
            model_path.display(),
            vocab_path.display(),
            paths.models_dir.display()
        );
    }

    let output_path = paths.recordings_dir.join(&config.capture.output_file);
    let mut recorder = Recorder::new(output_path.clone());
    recorder.start(
        Box::new(CpalSource::new()),
        Arc::new(TerminalListener),
        Arc::new(WavSink),
    );

    println!("Press Enter to stop recording …");
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;

    recorder.stop();

    println!("Transcribing …");
    let text = transcriber.transcribe_file(&output_path)?;
    println!("{text}");

    Ok(())
}
