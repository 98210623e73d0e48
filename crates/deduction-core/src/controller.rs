//! Dialogue turn controller
//!
//! Drives one game over a [`VoiceChannel`]: setup questions, scenario
//! generation, the main evidence loop and the solve loop, with low-confidence
//! interpretations routed through a yes/no confirmation. Every turn speaks,
//! listens once and decides which region runs next.
//!
//! Nothing the player says is fatal. Silence, unrecognised intents and
//! impossible guesses are recorded as [`TurnSignal`]s and turned into
//! reprompts; only transport failures from the voice channel end a run early.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::catalog::CaseFile;
use crate::config::EngineConfig;
use crate::confirmation::{ConfirmationRequest, ConfirmationStep, PendingAction};
use crate::guess::Guess;
use crate::nlu::{Intent, NluResult, AFFIRMATIVE, NEGATIVE};
use crate::prompts;
use crate::puzzle::{generate_scenario, Difficulty};
use crate::resolver;
use crate::scoring::{GameReport, Outcome};
use crate::session::Session;
use crate::voice::{Heard, VoiceChannel};
use crate::Result;

/// Recoverable gameplay events
#[derive(Debug, Clone, PartialEq)]
pub enum TurnSignal {
    NoInputTimeout,
    NoIntentRecognized,
    LowIntentConfidence { intent: String, confidence: f64 },
    LowEntityConfidence { confidence: f64 },
    InvalidGuessCombination(Guess),
    ConfirmationExhausted,
    /// Recognised, but nothing to act on; falls through to the main loop
    Unmatched { intent: String },
}

/// Gameplay loop a turn belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Main,
    Solve,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Main,
    Solve,
    Final(Outcome),
}

impl From<Region> for Step {
    fn from(region: Region) -> Self {
        match region {
            Region::Main => Step::Main,
            Region::Solve => Step::Solve,
        }
    }
}

/// A setup question and its reprompts
struct Question {
    prompt: &'static str,
    silence: &'static str,
    unclear: &'static str,
    invalid: &'static str,
}

const INSTRUCTIONS_QUESTION: Question = Question {
    prompt: prompts::ASK_INSTRUCTIONS,
    silence: prompts::YES_NO_SILENCE,
    unclear: prompts::INSTRUCTIONS_UNCLEAR,
    invalid: prompts::INSTRUCTIONS_UNCLEAR,
};

const SETTINGS_QUESTION: Question = Question {
    prompt: prompts::ASK_SETTINGS,
    silence: prompts::YES_NO_SILENCE,
    unclear: prompts::YES_NO_UNCLEAR,
    invalid: prompts::YES_NO_INVALID,
};

const SUSPECT_COUNT_QUESTION: Question = Question {
    prompt: prompts::ASK_SUSPECT_COUNT,
    silence: prompts::NUMBER_SILENCE,
    unclear: prompts::NUMBER_UNCLEAR,
    invalid: prompts::NUMBER_INVALID,
};

const SUSPECT_SIZE_QUESTION: Question = Question {
    prompt: prompts::ASK_SUSPECT_SIZE,
    silence: prompts::NUMBER_SILENCE,
    unclear: prompts::NUMBER_UNCLEAR,
    invalid: prompts::NUMBER_INVALID,
};

fn yes_no(category: &str) -> Option<bool> {
    match category {
        AFFIRMATIVE => Some(true),
        NEGATIVE => Some(false),
        _ => None,
    }
}

fn difficulty_level(category: &str) -> Option<usize> {
    category
        .trim()
        .parse()
        .ok()
        .filter(|n| Difficulty::ALLOWED.contains(n))
}

/// Owns the voice channel and the random source for one game
pub struct DialogueController<V, R> {
    voice: V,
    rng: R,
    config: EngineConfig,
    case: CaseFile,
    signals: Vec<TurnSignal>,
}

impl<V: VoiceChannel> DialogueController<V, StdRng> {
    /// Controller seeded from `config.seed`, or from entropy when unset
    pub fn seeded(voice: V, config: EngineConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::new(voice, rng, config)
    }
}

impl<V: VoiceChannel, R: Rng> DialogueController<V, R> {
    pub fn new(voice: V, rng: R, config: EngineConfig) -> Self {
        Self {
            voice,
            rng,
            config,
            case: CaseFile::builtin(),
            signals: Vec::new(),
        }
    }

    /// Play with a custom case file instead of the built-in one
    pub fn with_case_file(mut self, case: CaseFile) -> Self {
        self.case = case;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn voice(&self) -> &V {
        &self.voice
    }

    pub fn into_voice(self) -> V {
        self.voice
    }

    /// Every gameplay signal raised so far
    pub fn signals(&self) -> &[TurnSignal] {
        &self.signals
    }

    /// Run a complete game: setup, generation, play
    pub async fn run(&mut self) -> Result<GameReport> {
        self.voice.prepare().await?;
        self.voice.wait_for_start().await?;
        self.voice.speak(prompts::WELCOME).await?;

        let difficulty = self.setup().await?;
        let mut session = self.generate_session(difficulty)?;
        self.play(&mut session).await
    }

    /// Ask the setup questions and settle on a difficulty
    pub async fn setup(&mut self) -> Result<Difficulty> {
        let setup = self.config.setup;

        if setup.offer_instructions && self.ask(&INSTRUCTIONS_QUESTION, false, yes_no).await? {
            self.voice.speak(prompts::BEGINNER_INSTRUCTIONS).await?;
        }

        let mut difficulty = self.config.difficulty;
        if setup.offer_settings && self.ask(&SETTINGS_QUESTION, false, yes_no).await? {
            let fallback = Difficulty::default();
            let suspects = self
                .ask(&SUSPECT_COUNT_QUESTION, fallback.suspects, difficulty_level)
                .await?;
            let size = self
                .ask(&SUSPECT_SIZE_QUESTION, fallback.size, difficulty_level)
                .await?;
            difficulty = Difficulty::new(suspects, size)?;
        }

        tracing::info!(
            "Difficulty set: {} suspects, {} items each",
            difficulty.suspects,
            difficulty.size
        );
        Ok(difficulty)
    }

    /// Deal a fresh scenario and open a session on it
    pub fn generate_session(&mut self, difficulty: Difficulty) -> Result<Session> {
        let scenario = generate_scenario(
            &self.case.means,
            &self.case.clues,
            difficulty,
            &mut self.rng,
        )?;
        Ok(Session::new(scenario, difficulty, &self.case))
    }

    /// Introduce the case and run the gameplay loops until it is closed
    pub async fn play(&mut self, session: &mut Session) -> Result<GameReport> {
        let location = session.crime_scene().unwrap_or(resolver::NOT_RELEVANT).to_string();
        self.voice
            .speak(&prompts::introduction(&location, session.suspects()))
            .await?;

        let mut step = Step::Main;
        let outcome = loop {
            step = match step {
                Step::Main => self.main_turn(session).await?,
                Step::Solve => self.solve_turn(session).await?,
                Step::Final(outcome) => break outcome,
            };
        };

        tracing::info!(
            "Case closed: {} ({:?}, score {})",
            session.id,
            outcome,
            outcome.score()
        );

        Ok(GameReport {
            session_id: session.id.clone(),
            started_at: session.created_at,
            outcome,
            queries: session.query_count(),
            solves: session.solve_count(),
            knowledge: session.knowledge().to_vec(),
        })
    }

    /// One confirmable setup question
    ///
    /// Reprompts and repeats the question until `accept` maps the first
    /// entity to a value. With `setup.max_attempts` set, gives up after that
    /// many failures and returns `default`.
    async fn ask<T, F>(&mut self, question: &Question, default: T, accept: F) -> Result<T>
    where
        F: Fn(&str) -> Option<T>,
    {
        self.voice.speak(question.prompt).await?;
        let mut failures = 0u32;

        loop {
            let reprompt = match self.voice.listen().await? {
                Heard::NoInput => {
                    self.signal(TurnSignal::NoInputTimeout);
                    question.silence
                }
                Heard::Recognised { nlu, .. } => match self.entity_answer(&nlu) {
                    Some(category) => match accept(&category) {
                        Some(value) => return Ok(value),
                        None => question.invalid,
                    },
                    None => question.unclear,
                },
            };

            failures += 1;
            if let Some(max) = self.config.setup.max_attempts {
                if failures >= max {
                    tracing::warn!(
                        "Setup question unanswered after {} attempts, using default",
                        failures
                    );
                    return Ok(default);
                }
            }

            self.voice.speak(reprompt).await?;
            self.voice.speak(question.prompt).await?;
        }
    }

    /// First entity, if it clears the entity threshold
    fn entity_answer(&mut self, nlu: &NluResult) -> Option<String> {
        let confidence = nlu.entity_confidence()?;
        if confidence < self.config.thresholds.entity {
            self.signal(TurnSignal::LowEntityConfidence { confidence });
            return None;
        }
        nlu.first_entity().map(str::to_string)
    }

    async fn main_turn(&mut self, session: &mut Session) -> Result<Step> {
        if self.config.limits.queries_exhausted(session.query_count()) {
            self.voice.speak(prompts::OUT_OF_TIME).await?;
            return Ok(Step::Solve);
        }

        let suggestions = session.suggest_evidence(2, &mut self.rng);
        let prompt = prompts::evidence_prompt(&suggestions, &mut self.rng);
        self.voice.speak(&prompt).await?;

        let (transcript, nlu) = match self.voice.listen().await? {
            Heard::NoInput => return self.no_input().await,
            Heard::Recognised { transcript, nlu } => (transcript, nlu),
        };

        if !nlu.has_intents() {
            self.signal(TurnSignal::NoIntentRecognized);
            self.voice.speak(prompts::NO_INTENT).await?;
            return Ok(Step::Main);
        }

        let Some(intent) = nlu.parsed_intent() else {
            self.signal(TurnSignal::Unmatched {
                intent: nlu.top_intent.clone(),
            });
            return Ok(Step::Main);
        };

        if let Intent::Evidence(category) = intent {
            if !session.is_available(category) {
                self.signal(TurnSignal::Unmatched {
                    intent: nlu.top_intent.clone(),
                });
                return Ok(Step::Main);
            }
        }

        self.act_on_intent(session, intent, &nlu, transcript, Region::Main)
            .await
    }

    async fn solve_turn(&mut self, session: &mut Session) -> Result<Step> {
        let prompt = prompts::solve_prompt(&mut self.rng);
        self.voice.speak(&prompt).await?;

        let (transcript, nlu) = match self.voice.listen().await? {
            Heard::NoInput => return self.no_input().await,
            Heard::Recognised { transcript, nlu } => (transcript, nlu),
        };

        let Some(((first, second), combined)) = nlu.entity_pair() else {
            return match nlu.parsed_intent() {
                Some(intent) if intent.is_side_query() => {
                    self.act_on_intent(session, intent, &nlu, transcript, Region::Solve)
                        .await
                }
                _ => {
                    self.voice.speak(prompts::GUESS_NEEDS_TWO).await?;
                    Ok(Step::Solve)
                }
            };
        };
        let guess = Guess::new(first, second);

        if !session.is_valid_guess(&guess) {
            self.voice
                .speak(&prompts::impossible_guess(&guess.first, &guess.second))
                .await?;
            self.signal(TurnSignal::InvalidGuessCombination(guess));
            return Ok(Step::Solve);
        }

        if combined < self.config.thresholds.guess_combined {
            self.signal(TurnSignal::LowEntityConfidence { confidence: combined });
            session.store_guess(guess.clone());
            let request = ConfirmationRequest::new(PendingAction::ResolveGuess(guess), transcript);
            return self.confirm(session, request, Region::Solve).await;
        }

        self.resolve_guess(session, guess).await
    }

    /// Carry out an intent, or confirm it first when confidence is low
    async fn act_on_intent(
        &mut self,
        session: &mut Session,
        intent: Intent,
        nlu: &NluResult,
        transcript: String,
        resume: Region,
    ) -> Result<Step> {
        let confidence = nlu.intent_confidence().unwrap_or(0.0);
        let action = PendingAction::from_intent(intent);

        if confidence < self.config.thresholds.intent {
            self.signal(TurnSignal::LowIntentConfidence {
                intent: intent.name().to_string(),
                confidence,
            });
            let request = ConfirmationRequest::new(action, transcript);
            return self.confirm(session, request, resume).await;
        }

        self.perform(session, action, resume).await
    }

    async fn confirm(
        &mut self,
        session: &mut Session,
        mut request: ConfirmationRequest,
        resume: Region,
    ) -> Result<Step> {
        let max_retries = self.config.limits.max_confirmation_retries;

        loop {
            self.voice.speak(&request.question()).await?;

            let nlu = match self.voice.listen().await? {
                Heard::NoInput => {
                    session.clear_guess();
                    return self.no_input().await;
                }
                Heard::Recognised { nlu, .. } => nlu,
            };

            match request.answer(&nlu, max_retries) {
                ConfirmationStep::Confirmed(action) => {
                    tracing::debug!(action = ?action, "Confirmed");
                    return self.perform(session, action, resume).await;
                }
                ConfirmationStep::Declined { transcript } => {
                    session.clear_guess();
                    self.voice.speak(&prompts::misheard(&transcript)).await?;
                    return Ok(resume.into());
                }
                ConfirmationStep::Retry => {
                    self.voice.speak(prompts::CONFIRM_UNCLEAR).await?;
                }
                ConfirmationStep::Exhausted => {
                    session.clear_guess();
                    self.signal(TurnSignal::ConfirmationExhausted);
                    self.voice.speak(prompts::CONFIRM_UNCLEAR).await?;
                    return Ok(Step::Main);
                }
            }
        }
    }

    async fn perform(
        &mut self,
        session: &mut Session,
        action: PendingAction,
        resume: Region,
    ) -> Result<Step> {
        match action {
            PendingAction::DeliverEvidence(category) => {
                match session.deliver_evidence(category, &self.case) {
                    Some(delivery) => {
                        self.voice
                            .speak(&prompts::evidence_answer(delivery.category, &delivery.answer))
                            .await?;
                        Ok(Step::Main)
                    }
                    // already asked about while the confirmation was pending
                    None => Ok(resume.into()),
                }
            }
            PendingAction::ShowSuspects => {
                self.voice
                    .speak(&prompts::suspects_listing(session.suspects()))
                    .await?;
                Ok(resume.into())
            }
            PendingAction::ShowKnown => {
                self.voice
                    .speak(&prompts::known_evidence(session.knowledge()))
                    .await?;
                Ok(resume.into())
            }
            PendingAction::ShowInstructions => {
                self.voice.speak(prompts::MIDGAME_INSTRUCTIONS).await?;
                Ok(resume.into())
            }
            PendingAction::SolveCase => Ok(Step::Solve),
            PendingAction::ResolveGuess(guess) => {
                session.clear_guess();
                self.resolve_guess(session, guess).await
            }
        }
    }

    async fn resolve_guess(&mut self, session: &mut Session, guess: Guess) -> Result<Step> {
        let limits = self.config.limits;

        if session.is_correct_guess(&guess) {
            let score = limits.score(session.query_count(), session.solve_count());
            self.voice
                .speak(&prompts::correct_guess(&guess.first, &guess.second, score))
                .await?;
            return Ok(Step::Final(Outcome::Solved { score }));
        }

        let misses = session.record_miss();
        self.voice
            .speak(&prompts::incorrect_guess(&guess.first, &guess.second))
            .await?;
        tracing::debug!(session = %session.id, misses, "Incorrect guess");

        if limits.solves_exhausted(misses) {
            self.voice.speak(prompts::CASE_COLD).await?;
            return Ok(Step::Final(Outcome::CaseCold));
        }
        Ok(Step::Solve)
    }

    async fn no_input(&mut self) -> Result<Step> {
        self.signal(TurnSignal::NoInputTimeout);
        self.voice.speak(prompts::NO_INPUT_NUDGE).await?;
        Ok(Step::Main)
    }

    fn signal(&mut self, signal: TurnSignal) {
        match &signal {
            TurnSignal::ConfirmationExhausted => {
                tracing::warn!("Confirmation abandoned after repeated unclear answers")
            }
            other => tracing::debug!(signal = ?other, "Turn signal"),
        }
        self.signals.push(signal);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voice::ScriptedVoice;

    fn answer(entity: &str) -> NluResult {
        NluResult::intent("none", 0.9).with_entity(entity, 0.95)
    }

    fn controller(
        voice: ScriptedVoice,
        config: EngineConfig,
    ) -> DialogueController<ScriptedVoice, StdRng> {
        DialogueController::new(voice, StdRng::seed_from_u64(5), config)
    }

    #[tokio::test]
    async fn test_setup_with_reprompts() {
        let voice = ScriptedVoice::default()
            .say("yes please", answer(AFFIRMATIVE))
            .silence()
            .say("sure", answer(AFFIRMATIVE))
            .say("seven", answer("7"))
            .say("three", answer("3"))
            .say("mumble", NluResult::intent("none", 0.9))
            .say("four", answer("4"));
        let mut controller = controller(voice, EngineConfig::default());

        let difficulty = controller.setup().await.unwrap();
        assert_eq!(difficulty, Difficulty { suspects: 3, size: 4 });

        let voice = controller.voice();
        assert!(voice.has_spoken(prompts::BEGINNER_INSTRUCTIONS));
        assert!(voice.has_spoken(prompts::YES_NO_SILENCE));
        assert!(voice.has_spoken(prompts::NUMBER_INVALID));
        assert!(voice.has_spoken(prompts::NUMBER_UNCLEAR));
        assert_eq!(voice.remaining(), 0);
    }

    #[tokio::test]
    async fn test_setup_declined_keeps_configured_difficulty() {
        let voice = ScriptedVoice::default()
            .say("no", answer(NEGATIVE))
            .say("no", answer(NEGATIVE));
        let config = EngineConfig::default().with_difficulty(Difficulty { suspects: 4, size: 2 });
        let mut controller = controller(voice, config);

        let difficulty = controller.setup().await.unwrap();
        assert_eq!(difficulty, Difficulty { suspects: 4, size: 2 });
        assert!(!controller.voice().has_spoken(prompts::BEGINNER_INSTRUCTIONS));
    }

    #[tokio::test]
    async fn test_setup_attempt_bound_falls_back_to_defaults() {
        let voice = ScriptedVoice::default()
            .silence()
            .say("maybe", answer("maybe"));
        let mut config = EngineConfig::default();
        config.setup.max_attempts = Some(1);
        let mut controller = controller(voice, config);

        let difficulty = controller.setup().await.unwrap();
        assert_eq!(difficulty, Difficulty::default());
        assert!(!controller.voice().has_spoken(prompts::BEGINNER_INSTRUCTIONS));
        assert_eq!(controller.voice().remaining(), 0);
    }

    #[tokio::test]
    async fn test_low_confidence_setup_answer_is_unclear() {
        let voice = ScriptedVoice::default()
            .say("yeah", NluResult::intent("none", 0.9).with_entity(AFFIRMATIVE, 0.4))
            .say("yes", answer(AFFIRMATIVE));
        let mut config = EngineConfig::default();
        config.setup.offer_settings = false;
        let mut controller = controller(voice, config);

        controller.setup().await.unwrap();
        assert!(controller.voice().has_spoken(prompts::INSTRUCTIONS_UNCLEAR));
        assert!(controller.voice().has_spoken(prompts::BEGINNER_INSTRUCTIONS));
        assert!(matches!(
            controller.signals(),
            [TurnSignal::LowEntityConfidence { .. }]
        ));
    }

    #[tokio::test]
    async fn test_settings_question_repeated_after_unclear_answer() {
        let voice = ScriptedVoice::default()
            .say("hmm", NluResult::intent("none", 0.9))
            .say("no", answer(NEGATIVE));
        let mut config = EngineConfig::default();
        config.setup.offer_instructions = false;
        let mut controller = controller(voice, config);

        let difficulty = controller.setup().await.unwrap();
        assert_eq!(difficulty, Difficulty::default());
        let voice = controller.voice();
        assert_eq!(voice.count_spoken(prompts::ASK_SETTINGS), 2);
        assert!(voice.has_spoken(prompts::YES_NO_UNCLEAR));
        assert_eq!(voice.remaining(), 0);
    }

    #[test]
    fn test_difficulty_level_parsing() {
        assert_eq!(difficulty_level("3"), Some(3));
        assert_eq!(difficulty_level(" 2 "), Some(2));
        assert_eq!(difficulty_level("5"), None);
        assert_eq!(difficulty_level("two"), None);
    }
}
