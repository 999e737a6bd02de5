use whatlang::{Lang, detect};

use crate::text::truncate_chars;

/// Detection runs on a bounded prefix of the cleaned text; whole-page
/// detection buys no accuracy for its cost.
const SAMPLE_CHARS: usize = 2000;
const MIN_CONFIDENCE: f64 = 0.25;
const MIN_TEXT_LENGTH: usize = 50;

/// Best-effort language detection. Returns `None` for short or ambiguous
/// input rather than guessing; an unknown language is never an error.
pub(crate) fn detect_language(text: &str) -> Option<String> {
    let sample = truncate_chars(text, SAMPLE_CHARS);
    if sample.trim().len() < MIN_TEXT_LENGTH {
        return None;
    }

    match detect(sample) {
        Some(info) if info.confidence() >= MIN_CONFIDENCE => Some(lang_to_code(info.lang())),
        _ => None,
    }
}

fn lang_to_code(lang: Lang) -> String {
    match lang {
        Lang::Eng => "en".to_string(),
        Lang::Spa => "es".to_string(),
        Lang::Fra => "fr".to_string(),
        Lang::Deu => "de".to_string(),
        Lang::Por => "pt".to_string(),
        Lang::Ita => "it".to_string(),
        Lang::Nld => "nl".to_string(),
        Lang::Rus => "ru".to_string(),
        Lang::Cmn => "zh".to_string(),
        Lang::Jpn => "ja".to_string(),
        Lang::Kor => "ko".to_string(),
        Lang::Ara => "ar".to_string(),
        Lang::Hin => "hi".to_string(),
        Lang::Tur => "tr".to_string(),
        Lang::Vie => "vi".to_string(),
        Lang::Pol => "pl".to_string(),
        other => format!("{other:?}").to_lowercase(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_english() {
        let text = "This is a test of the English language detection system. It should work well.";
        assert_eq!(detect_language(text), Some("en".to_string()));
    }

    #[test]
    fn detects_spanish() {
        let text = "Esto es una prueba del sistema de detección de idiomas en español. Debería funcionar bien.";
        assert_eq!(detect_language(text), Some("es".to_string()));
    }

    #[test]
    fn detects_hindi() {
        let text = "यह हिंदी भाषा की पहचान प्रणाली का एक परीक्षण है। इसे अच्छी तरह काम करना चाहिए। भाषा पहचान उपयोगी है।";
        assert_eq!(detect_language(text), Some("hi".to_string()));
    }

    #[test]
    fn short_text_returns_none() {
        assert_eq!(detect_language("Short"), None);
        assert_eq!(detect_language(""), None);
    }

    #[test]
    fn symbol_soup_returns_none() {
        let text =
            "1 2 3 4 5 6 7 8 9 0 ! @ # $ % ^ & * ( ) - = + [ ] { } | \\ : ; \" ' < > , . ? /";
        assert_eq!(detect_language(text), None);
    }
}
