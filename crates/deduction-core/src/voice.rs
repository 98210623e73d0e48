//! Voice I/O seam
//!
//! Speech recognition, synthesis and the NLU classifier are host concerns. The
//! engine only sees a [`VoiceChannel`]: it speaks an utterance and waits for it
//! to finish, or it listens and gets back either a classified utterance or
//! silence.

use async_trait::async_trait;
use std::collections::VecDeque;

use crate::nlu::NluResult;
use crate::{DeductionError, Result};

/// What came back from one listen turn
#[derive(Debug, Clone, PartialEq)]
pub enum Heard {
    /// An utterance was recognised and classified
    Recognised { transcript: String, nlu: NluResult },
    /// The no-input timeout elapsed
    NoInput,
}

impl Heard {
    pub fn said(transcript: impl Into<String>, nlu: NluResult) -> Self {
        Heard::Recognised {
            transcript: transcript.into(),
            nlu,
        }
    }
}

/// Speech channel between the engine and the player
#[async_trait]
pub trait VoiceChannel: Send {
    /// Resolves once recognition and synthesis are ready
    async fn prepare(&mut self) -> Result<()>;

    /// Resolves when the host signals the game should begin
    async fn wait_for_start(&mut self) -> Result<()>;

    /// Speak an utterance, resolving once it has been played
    async fn speak(&mut self, utterance: &str) -> Result<()>;

    /// Listen for one utterance
    async fn listen(&mut self) -> Result<Heard>;
}

/// Voice channel that replays a fixed script
///
/// Every spoken utterance is recorded. Listening past the end of the script is
/// reported as a transport error, which ends the game.
#[derive(Debug, Default)]
pub struct ScriptedVoice {
    script: VecDeque<Heard>,
    spoken: Vec<String>,
    listens: usize,
}

impl ScriptedVoice {
    pub fn new(script: impl IntoIterator<Item = Heard>) -> Self {
        Self {
            script: script.into_iter().collect(),
            spoken: Vec::new(),
            listens: 0,
        }
    }

    /// Queue a recognised utterance
    pub fn say(mut self, transcript: impl Into<String>, nlu: NluResult) -> Self {
        self.script.push_back(Heard::said(transcript, nlu));
        self
    }

    /// Queue a no-input timeout
    pub fn silence(mut self) -> Self {
        self.script.push_back(Heard::NoInput);
        self
    }

    /// Everything spoken so far, in order
    pub fn spoken(&self) -> &[String] {
        &self.spoken
    }

    /// Whether any spoken utterance contains `needle`
    pub fn has_spoken(&self, needle: &str) -> bool {
        self.spoken.iter().any(|s| s.contains(needle))
    }

    /// Number of spoken utterances containing `needle`
    pub fn count_spoken(&self, needle: &str) -> usize {
        self.spoken.iter().filter(|s| s.contains(needle)).count()
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }

    pub fn listens(&self) -> usize {
        self.listens
    }
}

#[async_trait]
impl VoiceChannel for ScriptedVoice {
    async fn prepare(&mut self) -> Result<()> {
        Ok(())
    }

    async fn wait_for_start(&mut self) -> Result<()> {
        Ok(())
    }

    async fn speak(&mut self, utterance: &str) -> Result<()> {
        self.spoken.push(utterance.to_string());
        Ok(())
    }

    async fn listen(&mut self) -> Result<Heard> {
        self.listens += 1;
        self.script
            .pop_front()
            .ok_or_else(|| DeductionError::Voice("script exhausted".to_string()))
    }
}
