use serde::{Deserialize, Serialize};

use crate::recommendation::Recommendation;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TranslatedName {
    pub language_name: String,
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Chapter {
    pub id: u32,
    pub name_simple: String,
    pub name_arabic: String,
    pub translated_name: TranslatedName,
    pub verses_count: u32,
    pub revelation_place: String,
}

impl Chapter {
    /// "Meccan" for makkah, "Medinan" for anything else.
    pub fn revelation_label(&self) -> &'static str {
        revelation_label(&self.revelation_place)
    }
}

pub fn revelation_label(place: &str) -> &'static str {
    if place == "makkah" {
        "Meccan"
    } else {
        "Medinan"
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct WordTranslation {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub language_name: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Word {
    pub id: u64,
    pub position: u32,
    #[serde(default)]
    pub text: String,
    pub char_type_name: String,
    #[serde(default)]
    pub translation: Option<WordTranslation>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Verse {
    pub id: u64,
    pub verse_number: u32,
    pub verse_key: String,
    #[serde(default)]
    pub words: Vec<Word>,
}

impl Verse {
    /// Word-by-word translation, skipping end-of-verse markers.
    pub fn translation_text(&self) -> String {
        self.words
            .iter()
            .filter(|word| word.char_type_name != "end")
            .filter_map(|word| word.translation.as_ref()?.text.as_deref())
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Header of the modal: whichever names we had when the chapter was opened,
/// plus verse count and revelation place.
#[derive(Debug, Clone, PartialEq)]
pub struct SurahHeader {
    pub id: u32,
    pub name: String,
    pub name_arabic: String,
    pub translation: String,
    pub verses_count: u32,
    pub revelation_place: String,
}

impl SurahHeader {
    pub fn revelation_label(&self) -> &'static str {
        revelation_label(&self.revelation_place)
    }
}

impl From<&Chapter> for SurahHeader {
    fn from(chapter: &Chapter) -> Self {
        Self {
            id: chapter.id,
            name: chapter.name_simple.clone(),
            name_arabic: chapter.name_arabic.clone(),
            translation: chapter.translated_name.name.clone(),
            verses_count: chapter.verses_count,
            revelation_place: chapter.revelation_place.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SurahContent {
    pub header: SurahHeader,
    pub verses: Vec<Verse>,
}

impl SurahContent {
    /// Note shown when the API returned fewer verses than the chapter holds.
    pub fn partial_note(&self) -> Option<String> {
        let shown = self.verses.len();
        let total = self.header.verses_count as usize;
        (shown < total).then(|| format!("Showing first {} verses of {}", shown, total))
    }
}

/// Verses shown when the fetch fails; one placeholder word each.
const FALLBACK_VERSES: u32 = 7;

fn chapter(
    id: u32,
    name_simple: &str,
    name_arabic: &str,
    translated: &str,
    verses_count: u32,
    revelation_place: &str,
) -> Chapter {
    Chapter {
        id,
        name_simple: name_simple.to_string(),
        name_arabic: name_arabic.to_string(),
        translated_name: TranslatedName {
            language_name: "english".to_string(),
            name: translated.to_string(),
        },
        verses_count,
        revelation_place: revelation_place.to_string(),
    }
}

pub fn fallback_chapters() -> Vec<Chapter> {
    vec![
        chapter(1, "Al-Fatihah", "الفاتحة", "The Opener", 7, "makkah"),
        chapter(2, "Al-Baqarah", "البقرة", "The Cow", 286, "madinah"),
        chapter(3, "Ali 'Imran", "آل عمران", "Family of Imran", 200, "madinah"),
        chapter(4, "An-Nisa", "النساء", "The Women", 176, "madinah"),
        chapter(5, "Al-Ma'idah", "المائدة", "The Table Spread", 120, "madinah"),
    ]
}

pub fn fallback_verses(chapter_id: u32, source_name: &str, count: u32) -> Vec<Verse> {
    (1..=count)
        .map(|n| Verse {
            id: n as u64,
            verse_number: n,
            verse_key: format!("{}:{}", chapter_id, n),
            words: vec![Word {
                id: 1,
                position: 1,
                text: "ﭑ".to_string(),
                char_type_name: "word".to_string(),
                translation: Some(WordTranslation {
                    text: Some(format!("Verse {} from {}", n, source_name)),
                    language_name: "english".to_string(),
                }),
            }],
        })
        .collect()
}

/// Placeholder content for a chapter picked from the chapter list.
pub fn fallback_chapter_content(chapter: &Chapter) -> SurahContent {
    let count = chapter.verses_count.min(FALLBACK_VERSES);
    SurahContent {
        header: SurahHeader::from(chapter),
        verses: fallback_verses(chapter.id, &chapter.translated_name.name, count),
    }
}

/// Placeholder content for a recommendation card. Verse count and place are unknown
/// here, so the header claims seven Meccan verses.
pub fn fallback_recommendation_content(rec: &Recommendation) -> SurahContent {
    SurahContent {
        header: SurahHeader {
            id: rec.id,
            name: rec.name.to_string(),
            name_arabic: rec.name_arabic.to_string(),
            translation: rec.translation.to_string(),
            verses_count: FALLBACK_VERSES,
            revelation_place: "makkah".to_string(),
        },
        verses: fallback_verses(rec.id, rec.translation, FALLBACK_VERSES),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(char_type: &str, text: Option<&str>) -> Word {
        Word {
            id: 1,
            position: 1,
            text: String::new(),
            char_type_name: char_type.to_string(),
            translation: Some(WordTranslation {
                text: text.map(str::to_string),
                language_name: "english".to_string(),
            }),
        }
    }

    #[test]
    fn test_translation_text_skips_end_markers() {
        let verse = Verse {
            id: 1,
            verse_number: 1,
            verse_key: "1:1".to_string(),
            words: vec![
                word("word", Some("In (the) name")),
                word("word", Some("(of) Allah")),
                word("end", Some("(1)")),
            ],
        };
        assert_eq!(verse.translation_text(), "In (the) name (of) Allah");
    }

    #[test]
    fn test_translation_text_tolerates_missing_translations() {
        let mut bare = word("word", None);
        bare.translation = None;
        let verse = Verse {
            id: 2,
            verse_number: 2,
            verse_key: "1:2".to_string(),
            words: vec![bare, word("word", None), word("word", Some("praise"))],
        };
        assert_eq!(verse.translation_text(), "praise");
    }

    #[test]
    fn test_deserializes_api_verse() {
        let json = r#"{
            "id": 1, "verse_number": 1, "verse_key": "1:1",
            "words": [
                {"id": 1, "position": 1, "text": "بِسْمِ", "char_type_name": "word",
                 "translation": {"text": "In (the) name", "language_name": "english"}},
                {"id": 5, "position": 5, "text": "١", "char_type_name": "end",
                 "translation": {"text": "(1)", "language_name": "english"}}
            ]
        }"#;
        let verse: Verse = serde_json::from_str(json).unwrap();
        assert_eq!(verse.words.len(), 2);
        assert_eq!(verse.translation_text(), "In (the) name");
    }

    #[test]
    fn test_fallback_chapters() {
        let chapters = fallback_chapters();
        assert_eq!(chapters.len(), 5);
        assert_eq!(chapters[0].name_simple, "Al-Fatihah");
        assert_eq!(chapters[0].revelation_label(), "Meccan");
        assert_eq!(chapters[1].revelation_label(), "Medinan");
        assert_eq!(chapters[4].id, 5);
    }

    #[test]
    fn test_fallback_chapter_content_caps_at_seven() {
        let chapters = fallback_chapters();

        let fatihah = fallback_chapter_content(&chapters[0]);
        assert_eq!(fatihah.verses.len(), 7);

        let baqarah = fallback_chapter_content(&chapters[1]);
        assert_eq!(baqarah.verses.len(), 7);
        assert_eq!(baqarah.header.verses_count, 286);
        assert_eq!(baqarah.verses[2].verse_key, "2:3");
        assert_eq!(baqarah.verses[2].translation_text(), "Verse 3 from The Cow");
        assert_eq!(
            baqarah.partial_note().as_deref(),
            Some("Showing first 7 verses of 286")
        );
    }

    #[test]
    fn test_fallback_chapter_content_short_chapter() {
        let mut short = fallback_chapters().remove(0);
        short.verses_count = 3;
        let content = fallback_chapter_content(&short);
        assert_eq!(content.verses.len(), 3);
        assert!(content.partial_note().is_none());
    }

    #[test]
    fn test_fallback_recommendation_content() {
        let rec = crate::recommendation::recommendations_for(crate::emotion::Emotion::Fear)[2];
        let content = fallback_recommendation_content(&rec);
        assert_eq!(content.header.id, 23);
        assert_eq!(content.header.verses_count, 7);
        assert_eq!(content.header.revelation_label(), "Meccan");
        assert_eq!(content.verses[0].translation_text(), "Verse 1 from The Believers");
        assert!(content.partial_note().is_none());
    }
}
