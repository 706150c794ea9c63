use std::{
    process::{Command, Stdio},
    sync::mpsc,
    thread,
};

use rps_engine::{Cue, CueSink};

/// Forwards cues to a worker thread so that slow speech never stalls the game.
///
/// The worker logs every cue and, when a speech command is configured, runs it
/// once per spoken cue with the phrase as the last argument. The worker exits
/// when the sink is dropped.
#[derive(Debug)]
pub struct ChannelCueSink {
    tx: mpsc::Sender<Cue>,
}

impl ChannelCueSink {
    pub fn spawn(speech_command: Option<String>) -> Self {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || cue_worker(&rx, speech_command.as_deref()));
        Self { tx }
    }
}

impl CueSink for ChannelCueSink {
    fn emit(&mut self, cue: Cue) {
        if self.tx.send(cue).is_err() {
            log::debug!("cue worker has stopped, dropping {cue:?}");
        }
    }
}

fn cue_worker(rx: &mpsc::Receiver<Cue>, speech_command: Option<&str>) {
    while let Ok(cue) = rx.recv() {
        log::debug!("cue: {cue:?}");
        if let (Some(command), Some(text)) = (speech_command, utterance(cue)) {
            speak(command, &text);
        }
    }
}

/// Text spoken for a cue, if any.
fn utterance(cue: Cue) -> Option<String> {
    match cue {
        Cue::Click => None,
        Cue::Win => Some("You win!".to_owned()),
        Cue::Lose => Some("Computer wins".to_owned()),
        Cue::Draw => Some("Draw".to_owned()),
        Cue::Say(phrase) => Some(phrase.to_string()),
    }
}

fn speak(command: &str, text: &str) {
    let mut words = command.split_whitespace();
    let Some(program) = words.next() else {
        return;
    };
    let status = Command::new(program)
        .args(words)
        .arg(text)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();
    match status {
        Ok(status) if !status.success() => log::debug!("{program} exited with {status}"),
        Ok(_) => {}
        Err(e) => log::debug!("speech command {program:?} unavailable: {e}"),
    }
}
