//! Terminal stand-in for the speech channel
//!
//! Utterances are printed to stdout and player turns are typed lines on stdin.
//! An empty line, or no line before the no-input timeout, counts as silence.

use async_trait::async_trait;
use deduction_core::{DeductionError, Heard, Result, VoiceChannel};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin, Stdout};

use crate::nlu::KeywordClassifier;

pub struct TerminalVoice {
    classifier: KeywordClassifier,
    no_input_timeout: Duration,
    lines: Lines<BufReader<Stdin>>,
    stdout: Stdout,
}

impl TerminalVoice {
    pub fn new(classifier: KeywordClassifier, no_input_timeout: Duration) -> Self {
        Self {
            classifier,
            no_input_timeout,
            lines: BufReader::new(tokio::io::stdin()).lines(),
            stdout: tokio::io::stdout(),
        }
    }

    async fn write(&mut self, text: &str) -> Result<()> {
        self.stdout.write_all(text.as_bytes()).await?;
        self.stdout.flush().await?;
        Ok(())
    }

    async fn next_line(&mut self) -> Result<String> {
        self.lines
            .next_line()
            .await?
            .ok_or_else(|| DeductionError::Voice("input closed".to_string()))
    }
}

#[async_trait]
impl VoiceChannel for TerminalVoice {
    async fn prepare(&mut self) -> Result<()> {
        tracing::debug!(
            timeout_ms = self.no_input_timeout.as_millis() as u64,
            "Terminal voice ready"
        );
        Ok(())
    }

    async fn wait_for_start(&mut self) -> Result<()> {
        self.write("Press Enter to start the game.\n").await?;
        self.next_line().await?;
        Ok(())
    }

    async fn speak(&mut self, utterance: &str) -> Result<()> {
        self.write(&format!("\n🕵  {}\n", utterance)).await
    }

    async fn listen(&mut self) -> Result<Heard> {
        self.write("> ").await?;

        let line = match tokio::time::timeout(self.no_input_timeout, self.next_line()).await {
            Ok(line) => line?,
            Err(_) => {
                self.write("\n").await?;
                return Ok(Heard::NoInput);
            }
        };

        let transcript = line.trim();
        if transcript.is_empty() {
            return Ok(Heard::NoInput);
        }

        let nlu = self.classifier.classify(transcript);
        tracing::debug!(transcript, top_intent = %nlu.top_intent, "Classified input");
        Ok(Heard::said(transcript, nlu))
    }
}
