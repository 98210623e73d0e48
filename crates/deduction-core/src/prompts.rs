//! Fixed and templated utterances spoken by the detective partner

use rand::seq::SliceRandom;
use rand::Rng;

use crate::catalog::EvidenceCategory;
use crate::puzzle::Suspect;

pub const WELCOME: &str = "Welcome to Dialogue Deduction: a game where circumstance forces you to work \
with your dialogue system partner to solve a murder using only your voice.";

pub const ASK_INSTRUCTIONS: &str = "Do you want the beginner's instructions?";
pub const INSTRUCTIONS_UNCLEAR: &str = "I couldn't quite catch a yes or no type of answer.";

pub const ASK_SETTINGS: &str = "Do you want to change any settings? The default difficulty is the easiest: \
2 suspects, each tied to only 2 means and 2 clues.";
pub const YES_NO_SILENCE: &str = "I didn't hear anything. Please give a yes or no type of answer.";
pub const YES_NO_UNCLEAR: &str = "I didn't quite catch that. Please give a yes or no type of answer.";
pub const YES_NO_INVALID: &str = "Please give a yes or no type of answer.";

pub const ASK_SUSPECT_COUNT: &str = "How many suspects do you want in the game? \
Valid answers are 2, 3, and 4, where higher is more difficult.";
pub const ASK_SUSPECT_SIZE: &str = "How many means and clues do you want per suspect? \
Valid answers are 2, 3, and 4, where higher is more difficult.";
pub const NUMBER_SILENCE: &str = "I didn't hear anything.";
pub const NUMBER_UNCLEAR: &str = "I didn't quite catch that.";
pub const NUMBER_INVALID: &str = "I didn't catch a valid answer.";

pub const BEGINNER_INSTRUCTIONS: &str = "You are a detective called in to solve a murder. \
Your partner is already at the scene, and its location is your first piece of evidence. \
Each suspect is tied to a list of possible means of murder and a list of incriminating clues, and you will hear these lists at the start. \
To win, name the hidden combination of one means and one clue. Both always come from the same suspect. \
At most points in the game you can: \
one, ask about a piece of evidence, such as the cause of death. Your partner will suggest some, but anything asked about before is fair game. \
After four pieces of evidence you will be pressed to solve the case. \
Two, ask to solve the case early and guess a means and a clue. After two wrong guesses the case goes cold and you lose. \
Three, ask about the suspects to hear their lists again. \
Four, ask what we know so far to hear the evidence again. Neither of these affects your score. \
Five, ask for instructions to hear a short summary. \
Evidence often fits several items, so triangulate. Fewer questions and fewer guesses give a better score, up to 6. \
Stay silent at any point to get back to the main part of the game. Good luck!";

pub const MIDGAME_INSTRUCTIONS: &str = "To win, guess the correct combination of one means and one clue tied to the same suspect. \
You can ask about a piece of evidence when prompted, ask to solve the case, ask about the suspects, \
or ask what we know so far. Stay silent to get back to the main part of the game. Good luck!";

pub const NO_INPUT_NUDGE: &str = "You there detective? Let's focus!";
pub const NO_INTENT: &str = "I didn't quite catch your intention there. \
You can ask for a new piece of evidence, ask what we already know, ask to solve the case, \
ask about the suspects, or ask for instructions.";

pub const OUT_OF_TIME: &str = "Detective, we have no more time to consider new evidence and must try to finish this!";

pub const GUESS_NEEDS_TWO: &str = "Guesses must be two items. Let's try again.";
pub const CONFIRM_UNCLEAR: &str = "I didn't hear an affirmation or a negation.";
pub const CASE_COLD: &str = "Dangit, it seems the case has gone cold! Hopefully we get the next one. Your final score is 0.";

const QUERY_LINES: [&str; 5] = [
    "What piece of evidence do you think will best solve this case? What about",
    "What do you want to focus on? Perhaps",
    "What do you think will be most relevant? Maybe",
    "What evidence do you think is most important? May I suggest",
    "Which proof do you think best pins down the murderer? I think perhaps",
];

const SOLVE_LINES: [&str; 4] = [
    "Let's solve this case!",
    "Let's catch that killer!",
    "I know you've got it!",
    "We'll get them now!",
];

/// Evidence prompt with up to two suggested categories
pub fn evidence_prompt<R: Rng + ?Sized>(suggestions: &[EvidenceCategory], rng: &mut R) -> String {
    let line = QUERY_LINES.choose(rng).copied().unwrap_or(QUERY_LINES[0]);
    match suggestions {
        [] => line.trim_end_matches(|c: char| c.is_alphabetic() || c == ' ').to_string(),
        [only] => format!("{} {}?", line, only),
        [first, second, ..] => format!("{} {} or {}?", line, first, second),
    }
}

pub const SOLVE_QUESTION: &str = "Which clue and means of murder do you want to guess?";

pub fn solve_prompt<R: Rng + ?Sized>(rng: &mut R) -> String {
    let line = SOLVE_LINES.choose(rng).copied().unwrap_or(SOLVE_LINES[0]);
    format!("{} {}", line, SOLVE_QUESTION)
}

pub fn evidence_answer(category: EvidenceCategory, answer: &str) -> String {
    format!("The {} was {}.", category, answer)
}

pub fn suspects_listing(suspects: &[Suspect]) -> String {
    suspects
        .iter()
        .enumerate()
        .map(|(i, s)| {
            format!(
                "Suspect {} is tied to these means: {}, and these clues: {}.",
                i + 1,
                s.means.join(", "),
                s.clues.join(", ")
            )
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn known_evidence(knowledge: &[String]) -> String {
    format!("What we know so far is that {}.", knowledge.join(", "))
}

pub fn introduction(location: &str, suspects: &[Suspect]) -> String {
    format!(
        "Hello detective. Sorry to disturb your vacation, but there's been a murder and we need your help! \
Since you can only join by voice message, we have to make the best of the situation. \
I'm at the scene of the crime as we speak, which is the {} at Deduction Street 18. \
I have taken some notes on the evidence but don't quite know where to start. {}",
        location,
        suspects_listing(suspects)
    )
}

pub fn impossible_guess(a: &str, b: &str) -> String {
    format!(
        "{} and {} is not possible! Guesses must be one means of murder and one clue from the same suspect. Let's try again.",
        a, b
    )
}

pub fn correct_guess(a: &str, b: &str, score: u32) -> String {
    format!(
        "{} and {}? That's correct! Nice work detective! Your final score is {}.",
        a, b, score
    )
}

pub fn incorrect_guess(a: &str, b: &str) -> String {
    format!("{} and {}? That's incorrect!", a, b)
}

pub fn misheard(transcript: &str) -> String {
    format!("I see. I inferred from what I thought I heard, which was {}.", transcript)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_evidence_prompt_mentions_suggestions() {
        let mut rng = StdRng::seed_from_u64(1);
        let prompt = evidence_prompt(
            &[EvidenceCategory::Motive, EvidenceCategory::Weather],
            &mut rng,
        );
        assert!(prompt.ends_with("motive or weather?"));

        let single = evidence_prompt(&[EvidenceCategory::Motive], &mut rng);
        assert!(single.ends_with(" motive?"));
    }

    #[test]
    fn test_suspects_listing() {
        let suspects = vec![
            Suspect { means: vec!["belt".into(), "wine".into()], clues: vec!["diary".into(), "dust".into()] },
            Suspect { means: vec!["punch".into(), "scarf".into()], clues: vec!["menu".into(), "juice".into()] },
        ];
        let text = suspects_listing(&suspects);
        assert!(text.starts_with("Suspect 1 is tied to these means: belt, wine, and these clues: diary, dust."));
        assert!(text.contains("Suspect 2 is tied to these means: punch, scarf"));
    }

    #[test]
    fn test_known_evidence_joins_facts() {
        let facts = vec!["location was kitchen".to_string(), "motive was revenge".to_string()];
        assert_eq!(
            known_evidence(&facts),
            "What we know so far is that location was kitchen, motive was revenge."
        );
    }
}
