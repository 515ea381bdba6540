use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, Error};

/// The feelings a search query can be mapped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Emotion {
    Sadness,
    Happiness,
    Anxiety,
    Guidance,
    Patience,
    Forgiveness,
    Strength,
    Gratitude,
    Fear,
    Hope,
}

/// Keyword groups in match priority. The first group with any substring hit wins,
/// so overlapping words resolve by position rather than by best match.
const KEYWORDS: [(Emotion, &[&str]); 10] = [
    (Emotion::Sadness, &["sad", "depressed", "unhappy", "cry"]),
    (Emotion::Happiness, &["happy", "joy", "celebrate", "blessed"]),
    (Emotion::Anxiety, &["anxious", "worry", "stress", "panic"]),
    (Emotion::Guidance, &["guid", "help", "direction", "path"]),
    (Emotion::Patience, &["patient", "wait", "persever", "endur"]),
    (Emotion::Forgiveness, &["forgiv", "mistake", "sorry", "sin"]),
    (Emotion::Strength, &["strong", "weak", "power", "courage"]),
    (Emotion::Gratitude, &["thank", "grateful", "blessing", "appreciate"]),
    (Emotion::Fear, &["fear", "scared", "afraid", "terror"]),
    (Emotion::Hope, &["hope", "future", "optimistic", "better"]),
];

impl Emotion {
    pub fn all() -> Vec<Emotion> {
        KEYWORDS.iter().map(|(emotion, _)| *emotion).collect()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Sadness => "sadness",
            Emotion::Happiness => "happiness",
            Emotion::Anxiety => "anxiety",
            Emotion::Guidance => "guidance",
            Emotion::Patience => "patience",
            Emotion::Forgiveness => "forgiveness",
            Emotion::Strength => "strength",
            Emotion::Gratitude => "gratitude",
            Emotion::Fear => "fear",
            Emotion::Hope => "hope",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Emotion::Sadness => "Sadness",
            Emotion::Happiness => "Happiness",
            Emotion::Anxiety => "Anxiety",
            Emotion::Guidance => "Guidance",
            Emotion::Patience => "Patience",
            Emotion::Forgiveness => "Forgiveness",
            Emotion::Strength => "Strength",
            Emotion::Gratitude => "Gratitude",
            Emotion::Fear => "Fear",
            Emotion::Hope => "Hope",
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Emotion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Emotion::all()
            .into_iter()
            .find(|emotion| emotion.as_str() == wanted)
            .ok_or_else(|| anyhow!("Unknown emotion '{}'", s))
    }
}

/// Map free text to an emotion. Falls back to guidance when nothing matches.
pub fn classify(text: &str) -> Emotion {
    let lower = text.to_lowercase();

    KEYWORDS
        .iter()
        .find(|(_, words)| words.iter().any(|word| lower.contains(word)))
        .map(|(emotion, _)| *emotion)
        .unwrap_or(Emotion::Guidance)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sadness_keywords() {
        assert_eq!(classify("I am so sad today"), Emotion::Sadness);
        assert_eq!(classify("feeling DEPRESSED"), Emotion::Sadness);
        assert_eq!(classify("I just want to cry"), Emotion::Sadness);
    }

    #[test]
    fn test_unhappy_is_sadness_not_happiness() {
        assert_eq!(classify("I'm unhappy"), Emotion::Sadness);
    }

    #[test]
    fn test_anxious_scenario() {
        assert_eq!(classify("I feel anxious about tomorrow"), Emotion::Anxiety);
    }

    #[test]
    fn test_no_match_defaults_to_guidance() {
        assert_eq!(classify("the weather is mild"), Emotion::Guidance);
        assert_eq!(classify(""), Emotion::Guidance);
    }

    #[test]
    fn test_priority_order_resolves_overlap() {
        // "sad" and "afraid" both present: sadness is checked first
        assert_eq!(classify("sad and afraid"), Emotion::Sadness);
        // "help" beats "courage" because guidance precedes strength
        assert_eq!(classify("help me find courage"), Emotion::Guidance);
        // "blessing" contains "sin", and forgiveness precedes gratitude
        assert_eq!(classify("counting every blessing"), Emotion::Forgiveness);
    }

    #[test]
    fn test_each_group_reachable() {
        assert_eq!(classify("let's celebrate"), Emotion::Happiness);
        assert_eq!(classify("I need to persevere"), Emotion::Patience);
        assert_eq!(classify("I made a mistake"), Emotion::Forgiveness);
        assert_eq!(classify("I feel weak"), Emotion::Strength);
        assert_eq!(classify("thank you"), Emotion::Gratitude);
        assert_eq!(classify("I'm scared"), Emotion::Fear);
        assert_eq!(classify("optimistic about things"), Emotion::Hope);
    }

    #[test]
    fn test_from_str_round_trips_labels() {
        for emotion in Emotion::all() {
            assert_eq!(emotion.as_str().parse::<Emotion>().unwrap(), emotion);
        }
        assert_eq!(" Fear ".parse::<Emotion>().unwrap(), Emotion::Fear);
        assert!("boredom".parse::<Emotion>().is_err());
    }

    #[test]
    fn test_all_is_priority_order() {
        let all = Emotion::all();
        assert_eq!(all.len(), 10);
        assert_eq!(all[0], Emotion::Sadness);
        assert_eq!(all[9], Emotion::Hope);
    }
}
