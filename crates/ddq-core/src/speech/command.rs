//! Speech engine driving an `espeak-ng`-compatible command

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use tokio::process::{Child, Command};

use super::{SpeechEngine, SpeechOutcome, Utterance};
use crate::error::{Error, Result};
use crate::models::Voice;
use crate::util::compact_text;

/// Speech command used when none is configured
pub const DEFAULT_SPEECH_COMMAND: &str = "espeak-ng";

const BASE_WORDS_PER_MINUTE: f32 = 175.0;
const BASE_PITCH: f32 = 50.0;
const BASE_AMPLITUDE: f32 = 100.0;
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Speaks by spawning one command process per utterance
#[derive(Debug)]
pub struct CommandSpeechEngine {
    program: PathBuf,
    active: Mutex<Option<Child>>,
    cancelled: AtomicBool,
}

impl CommandSpeechEngine {
    /// Engine for `program` if it can be found, `None` when speech is unsupported
    #[must_use]
    pub fn detect(program: &str) -> Option<Self> {
        let Some(path) = find_executable(program) else {
            tracing::warn!("Speech command '{}' not found; speech disabled", program);
            return None;
        };
        tracing::debug!("Using speech command {}", path.display());
        Some(Self::new(path))
    }

    /// Engine for an explicit program path
    #[must_use]
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            active: Mutex::new(None),
            cancelled: AtomicBool::new(false),
        }
    }

    fn lock_active(&self) -> Result<std::sync::MutexGuard<'_, Option<Child>>> {
        self.active
            .lock()
            .map_err(|_| Error::Speech("speech process lock poisoned".to_string()))
    }
}

impl SpeechEngine for CommandSpeechEngine {
    async fn voices(&self) -> Result<Vec<Voice>> {
        let output = Command::new(&self.program)
            .arg("--voices")
            .stdin(Stdio::null())
            .output()
            .await?;

        if !output.status.success() {
            return Err(Error::Speech(format!(
                "listing voices failed: {}",
                compact_text(&String::from_utf8_lossy(&output.stderr))
            )));
        }

        Ok(parse_voice_list(&String::from_utf8_lossy(&output.stdout)))
    }

    async fn start(&self, utterance: &Utterance) -> Result<()> {
        self.cancel();

        let mut command = Command::new(&self.program);
        command
            .args(command_args(utterance))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true);

        let child = command
            .spawn()
            .map_err(|error| Error::Speech(format!("failed to start speech: {error}")))?;

        self.cancelled.store(false, Ordering::SeqCst);
        *self.lock_active()? = Some(child);
        tracing::debug!("Speaking: {}", compact_text(&utterance.text));
        Ok(())
    }

    fn cancel(&self) {
        let Ok(mut active) = self.active.lock() else {
            return;
        };
        if let Some(mut child) = active.take() {
            self.cancelled.store(true, Ordering::SeqCst);
            if let Err(error) = child.start_kill() {
                tracing::debug!("Speech process already gone: {}", error);
            }
            tracing::debug!("Cancelled active utterance");
        }
    }

    async fn finished(&self) -> SpeechOutcome {
        loop {
            {
                let mut active = match self.lock_active() {
                    Ok(active) => active,
                    Err(error) => return SpeechOutcome::Failed(error.to_string()),
                };
                let Some(child) = active.as_mut() else {
                    return SpeechOutcome::Cancelled;
                };
                match child.try_wait() {
                    Ok(Some(status)) => {
                        active.take();
                        return if status.success() {
                            SpeechOutcome::Completed
                        } else if self.cancelled.load(Ordering::SeqCst) {
                            SpeechOutcome::Cancelled
                        } else {
                            SpeechOutcome::Failed(format!("speech command exited with {status}"))
                        };
                    }
                    Ok(None) => {}
                    Err(error) => {
                        active.take();
                        return SpeechOutcome::Failed(error.to_string());
                    }
                }
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }
}

/// Command-line arguments for an utterance
fn command_args(utterance: &Utterance) -> Vec<String> {
    let mut args = vec![
        "-s".to_string(),
        scaled(BASE_WORDS_PER_MINUTE, utterance.rate).to_string(),
        "-p".to_string(),
        scaled(BASE_PITCH, utterance.pitch).min(99).to_string(),
        "-a".to_string(),
        scaled(BASE_AMPLITUDE, utterance.volume).min(200).to_string(),
    ];
    if let Some(voice) = &utterance.voice {
        args.push("-v".to_string());
        args.push(voice.lang.clone());
    }
    args.push("--".to_string());
    args.push(utterance.text.clone());
    args
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn scaled(base: f32, factor: f32) -> u32 {
    (f64::from(base) * f64::from(factor.max(0.0))).round() as u32
}

/// Parse `--voices` output: a header line, then
/// `Pty Language Age/Gender VoiceName File Other...` rows
fn parse_voice_list(output: &str) -> Vec<Voice> {
    output
        .lines()
        .skip(1)
        .filter_map(|line| {
            let fields: Vec<&str> = line.split_whitespace().collect();
            match fields.as_slice() {
                [_, lang, _, name, ..] => Some(Voice::new(*name, *lang)),
                _ => None,
            }
        })
        .collect()
}

fn find_executable(program: &str) -> Option<PathBuf> {
    let candidate = Path::new(program);
    if candidate.components().count() > 1 {
        return candidate.is_file().then(|| candidate.to_path_buf());
    }

    let paths = std::env::var_os("PATH")?;
    std::env::split_paths(&paths)
        .flat_map(|dir| {
            let plain = dir.join(program);
            let exe = dir.join(format!("{program}.exe"));
            [plain, exe]
        })
        .find(|path| path.is_file())
}
