use rand::Rng;

use crate::emotion::Emotion;

/// A chapter suggested for a feeling, with the reason it was picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recommendation {
    pub id: u32,
    pub name: &'static str,
    pub name_arabic: &'static str,
    pub translation: &'static str,
    pub reason: &'static str,
}

const fn rec(
    id: u32,
    name: &'static str,
    name_arabic: &'static str,
    translation: &'static str,
    reason: &'static str,
) -> Recommendation {
    Recommendation { id, name, name_arabic, translation, reason }
}

const SADNESS: [Recommendation; 3] = [
    rec(93, "Ad-Duhaa", "الضحى", "The Morning Hours", "Brings hope after hardship"),
    rec(94, "Ash-Sharh", "الشرح", "The Relief", "Comfort and relief"),
    rec(12, "Yusuf", "يوسف", "Joseph", "Story of patience and overcoming hardship"),
];

const HAPPINESS: [Recommendation; 3] = [
    rec(55, "Ar-Rahman", "الرحمن", "The Beneficent", "Celebrates Allah's blessings"),
    rec(1, "Al-Fatihah", "الفاتحة", "The Opener", "Gratitude and praise"),
    rec(87, "Al-A'la", "الأعلى", "The Most High", "Glorifies Allah's greatness"),
];

const ANXIETY: [Recommendation; 3] = [
    rec(2, "Al-Baqarah", "البقرة", "The Cow", "Brings peace and security"),
    rec(113, "Al-Falaq", "الفلق", "The Daybreak", "Protection from evil"),
    rec(114, "An-Nas", "الناس", "Mankind", "Seeking refuge in Allah"),
];

const GUIDANCE: [Recommendation; 3] = [
    rec(1, "Al-Fatihah", "الفاتحة", "The Opener", "The path of guidance"),
    rec(36, "Ya-Sin", "يس", "Ya Sin", "Heart of the Quran"),
    rec(67, "Al-Mulk", "الملك", "The Sovereignty", "Purpose and meaning"),
];

const PATIENCE: [Recommendation; 3] = [
    rec(2, "Al-Baqarah", "البقرة", "The Cow", "Teaches patience and perseverance"),
    rec(3, "Ali 'Imran", "آل عمران", "Family of Imran", "Steadfastness in faith"),
    rec(103, "Al-'Asr", "العصر", "The Declining Day", "Value of patience and time"),
];

const FORGIVENESS: [Recommendation; 3] = [
    rec(3, "Ali 'Imran", "آل عمران", "Family of Imran", "Allah's mercy and forgiveness"),
    rec(39, "Az-Zumar", "الزمر", "The Troops", "Seeking forgiveness"),
    rec(110, "An-Nasr", "النصر", "The Divine Support", "Forgiveness and victory"),
];

const STRENGTH: [Recommendation; 3] = [
    rec(67, "Al-Mulk", "الملك", "The Sovereignty", "Strength through faith"),
    rec(48, "Al-Fath", "الفتح", "The Victory", "Divine strength and support"),
    rec(57, "Al-Hadid", "الحديد", "The Iron", "Strength and resilience"),
];

const GRATITUDE: [Recommendation; 3] = [
    rec(55, "Ar-Rahman", "الرحمن", "The Beneficent", "Counting blessings"),
    rec(16, "An-Nahl", "النحل", "The Bee", "Gratitude for creation"),
    rec(14, "Ibrahim", "ابراهيم", "Abraham", "Thankfulness and blessings"),
];

const FEAR: [Recommendation; 3] = [
    rec(113, "Al-Falaq", "الفلق", "The Daybreak", "Protection from fear"),
    rec(114, "An-Nas", "الناس", "Mankind", "Refuge from fear"),
    rec(23, "Al-Mu'minun", "المؤمنون", "The Believers", "Overcoming fear through faith"),
];

const HOPE: [Recommendation; 3] = [
    rec(93, "Ad-Duhaa", "الضحى", "The Morning Hours", "Hope after darkness"),
    rec(94, "Ash-Sharh", "الشرح", "The Relief", "Relief and hope"),
    rec(92, "At-Tin", "التين", "The Fig", "Human dignity and hope"),
];

pub fn recommendations_for(emotion: Emotion) -> &'static [Recommendation; 3] {
    match emotion {
        Emotion::Sadness => &SADNESS,
        Emotion::Happiness => &HAPPINESS,
        Emotion::Anxiety => &ANXIETY,
        Emotion::Guidance => &GUIDANCE,
        Emotion::Patience => &PATIENCE,
        Emotion::Forgiveness => &FORGIVENESS,
        Emotion::Strength => &STRENGTH,
        Emotion::Gratitude => &GRATITUDE,
        Emotion::Fear => &FEAR,
        Emotion::Hope => &HOPE,
    }
}

const GREETINGS: [&str; 3] = [
    "I understand you're looking for guidance. Let me help you find the perfect Surah for your situation.",
    "Based on what you're feeling, I can recommend some beautiful Surahs that will bring you comfort.",
    "I'm here to help you find the right verses for your emotional state.",
];

const CLOSINGS: [&str; 3] = [
    "May these verses bring you peace and guidance in your time of need.",
    "I hope these recommendations resonate with your heart and bring you comfort.",
    "These Surahs are known to help with situations like yours. May they be a source of strength.",
];

/// Build the advisor message shown above the cards. Indices wrap around.
pub fn compose_message(greeting_idx: usize, closing_idx: usize) -> String {
    format!(
        "{} {}",
        GREETINGS[greeting_idx % GREETINGS.len()],
        CLOSINGS[closing_idx % CLOSINGS.len()]
    )
}

pub fn advisor_message() -> String {
    let mut rng = rand::rng();
    compose_message(
        rng.random_range(0..GREETINGS.len()),
        rng.random_range(0..CLOSINGS.len()),
    )
}
