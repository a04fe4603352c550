//! Schema validation for repaired JSON values.
//!
//! Deserialization is deliberately lenient (`#[serde(default)]` on raw
//! shapes) so that a model omitting an optional field does not fail the
//! parse; the conversion functions then enforce the real invariants and
//! raise `CourseError::Validation` with a field-level message.

use coursekit_core::{
    ChapterNotes, ChapterSpec, CourseError, CourseOutline, DifficultyGuidance, Flashcard,
    KeyPoint, QuizQuestion, Result,
};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Default, Deserialize)]
struct RawOutline {
    #[serde(default)]
    title: String,
    #[serde(default)]
    summary: String,
    #[serde(default)]
    chapters: Vec<RawChapter>,
}

#[derive(Debug, Default, Deserialize)]
struct RawChapter {
    #[serde(default)]
    title: String,
    #[serde(default)]
    summary: String,
    #[serde(default)]
    content: Option<String>,
}

/// Validate a parsed outline: non-empty title, at least one chapter, and
/// a non-empty title and summary on every chapter.
pub fn outline_from_value(value: Value) -> Result<CourseOutline> {
    let raw: RawOutline = serde_json::from_value(value)
        .map_err(|e| CourseError::Validation(format!("outline shape mismatch: {e}")))?;

    if raw.title.trim().is_empty() {
        return Err(CourseError::Validation("outline title is empty".into()));
    }
    if raw.chapters.is_empty() {
        return Err(CourseError::Validation("outline has no chapters".into()));
    }
    let mut chapters = Vec::with_capacity(raw.chapters.len());
    for (i, chapter) in raw.chapters.into_iter().enumerate() {
        if chapter.title.trim().is_empty() {
            return Err(CourseError::Validation(format!("chapter {} has an empty title", i + 1)));
        }
        if chapter.summary.trim().is_empty() {
            return Err(CourseError::Validation(format!(
                "chapter {} has an empty summary",
                i + 1
            )));
        }
        chapters.push(ChapterSpec {
            title: chapter.title,
            summary: chapter.summary,
            content: chapter.content,
        });
    }

    Ok(CourseOutline { title: raw.title, summary: raw.summary, chapters })
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawNotes {
    #[serde(default)]
    summary: String,
    #[serde(default)]
    key_points: Vec<RawKeyPoint>,
    #[serde(default)]
    examples: Vec<Value>,
    #[serde(default)]
    quiz: Vec<Value>,
    #[serde(default)]
    difficulty_guidance: RawGuidance,
}

#[derive(Debug, Default, Deserialize)]
struct RawKeyPoint {
    #[serde(default)]
    point: String,
    #[serde(default)]
    explanation: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawGuidance {
    #[serde(default)]
    general: String,
    #[serde(default)]
    challenging_topics: Vec<String>,
}

/// Validate chapter notes: non-empty summary and at least two complete
/// key points. Absent difficulty guidance is synthesized, never empty.
pub fn notes_from_value(value: Value) -> Result<ChapterNotes> {
    let raw: RawNotes = serde_json::from_value(value)
        .map_err(|e| CourseError::Validation(format!("notes shape mismatch: {e}")))?;

    if raw.summary.trim().is_empty() {
        return Err(CourseError::Validation("notes summary is empty".into()));
    }
    if raw.key_points.len() < 2 {
        return Err(CourseError::Validation(format!(
            "notes need at least 2 key points, got {}",
            raw.key_points.len()
        )));
    }
    let mut key_points = Vec::with_capacity(raw.key_points.len());
    for (i, kp) in raw.key_points.into_iter().enumerate() {
        if kp.point.trim().is_empty() || kp.explanation.trim().is_empty() {
            return Err(CourseError::Validation(format!("key point {} is incomplete", i + 1)));
        }
        key_points.push(KeyPoint { point: kp.point, explanation: kp.explanation });
    }

    let general = if raw.difficulty_guidance.general.trim().is_empty() {
        "Work through the material in order and revisit earlier sections as needed.".to_string()
    } else {
        raw.difficulty_guidance.general
    };

    Ok(ChapterNotes {
        summary: raw.summary,
        key_points,
        examples: raw.examples,
        quiz: raw.quiz,
        difficulty_guidance: DifficultyGuidance {
            general,
            challenging_topics: raw.difficulty_guidance.challenging_topics,
        },
    })
}

#[derive(Debug, Default, Deserialize)]
struct RawFlashcard {
    #[serde(default)]
    front: String,
    #[serde(default)]
    back: String,
}

/// Validate a flashcard set. Accepts a top-level array or an object
/// wrapping one under `"flashcards"`. All-or-nothing: one malformed card
/// rejects the whole set.
pub fn flashcards_from_value(value: Value) -> Result<Vec<Flashcard>> {
    let items = unwrap_list(value, "flashcards")?;
    if items.is_empty() {
        return Err(CourseError::Validation("flashcard set is empty".into()));
    }
    let mut cards = Vec::with_capacity(items.len());
    for (i, item) in items.into_iter().enumerate() {
        let raw: RawFlashcard = serde_json::from_value(item)
            .map_err(|e| CourseError::Validation(format!("flashcard {}: {e}", i + 1)))?;
        if raw.front.trim().is_empty() || raw.back.trim().is_empty() {
            return Err(CourseError::Validation(format!(
                "flashcard {} has an empty front or back",
                i + 1
            )));
        }
        cards.push(Flashcard { front: raw.front, back: raw.back });
    }
    Ok(cards)
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawQuizQuestion {
    #[serde(default)]
    prompt: String,
    #[serde(default)]
    options: Vec<String>,
    #[serde(default)]
    correct_answer: String,
    #[serde(default)]
    explanation: String,
}

/// Validate a quiz question set. Accepts a top-level array or an object
/// wrapping one under `"questions"`. Every question needs all four
/// fields and exactly four options; whether `correct_answer` appears in
/// `options` is not checked.
pub fn quiz_from_value(value: Value) -> Result<Vec<QuizQuestion>> {
    let items = unwrap_list(value, "questions")?;
    if items.is_empty() {
        return Err(CourseError::Validation("quiz question set is empty".into()));
    }
    let mut questions = Vec::with_capacity(items.len());
    for (i, item) in items.into_iter().enumerate() {
        let raw: RawQuizQuestion = serde_json::from_value(item)
            .map_err(|e| CourseError::Validation(format!("quiz question {}: {e}", i + 1)))?;
        if raw.prompt.trim().is_empty() {
            return Err(CourseError::Validation(format!("quiz question {} has no prompt", i + 1)));
        }
        if raw.options.len() != 4 {
            return Err(CourseError::Validation(format!(
                "quiz question {} has {} options, expected 4",
                i + 1,
                raw.options.len()
            )));
        }
        if raw.correct_answer.trim().is_empty() || raw.explanation.trim().is_empty() {
            return Err(CourseError::Validation(format!(
                "quiz question {} is missing its answer or explanation",
                i + 1
            )));
        }
        questions.push(QuizQuestion {
            prompt: raw.prompt,
            options: raw.options,
            correct_answer: raw.correct_answer,
            explanation: raw.explanation,
        });
    }
    Ok(questions)
}

/// Extract the summary text from a `{"summary": ...}` object or a bare
/// JSON string.
pub fn summary_from_value(value: Value) -> Result<String> {
    let summary = match value {
        Value::String(text) => text,
        Value::Object(mut map) => match map.remove("summary") {
            Some(Value::String(text)) => text,
            _ => {
                return Err(CourseError::Validation(
                    "summary object is missing a \"summary\" string".into(),
                ));
            }
        },
        other => {
            return Err(CourseError::Validation(format!(
                "expected a summary object or string, got {other}"
            )));
        }
    };
    if summary.trim().is_empty() {
        return Err(CourseError::Validation("summary is empty".into()));
    }
    Ok(summary)
}

fn unwrap_list(value: Value, wrapper_key: &str) -> Result<Vec<Value>> {
    match value {
        Value::Array(items) => Ok(items),
        Value::Object(mut map) => match map.remove(wrapper_key) {
            Some(Value::Array(items)) => Ok(items),
            _ => Err(CourseError::Validation(format!(
                "expected an array or an object with a \"{wrapper_key}\" array"
            ))),
        },
        other => Err(CourseError::Validation(format!("expected an array, got {other}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_outline_passes() {
        let value = json!({
            "title": "Graph Theory",
            "summary": "Paths, cycles, and coloring",
            "chapters": [
                {"title": "Paths", "summary": "Walks and trails"},
                {"title": "Cycles", "summary": "Closed walks"}
            ]
        });
        let outline = outline_from_value(value).unwrap();
        assert_eq!(outline.chapters.len(), 2);
    }

    #[test]
    fn test_outline_without_chapters_is_rejected() {
        let value = json!({"title": "Empty", "summary": "Nothing", "chapters": []});
        let err = outline_from_value(value).unwrap_err();
        assert!(matches!(err, CourseError::Validation(_)));
    }

    #[test]
    fn test_outline_with_blank_chapter_title_is_rejected() {
        let value = json!({
            "title": "Graph Theory",
            "summary": "s",
            "chapters": [{"title": "  ", "summary": "Walks"}]
        });
        assert!(outline_from_value(value).is_err());
    }

    #[test]
    fn test_notes_synthesize_missing_guidance() {
        let value = json!({
            "summary": "A summary",
            "keyPoints": [
                {"point": "A", "explanation": "a"},
                {"point": "B", "explanation": "b"}
            ]
        });
        let notes = notes_from_value(value).unwrap();
        assert!(!notes.difficulty_guidance.general.is_empty());
    }

    #[test]
    fn test_notes_require_two_key_points() {
        let value = json!({
            "summary": "A summary",
            "keyPoints": [{"point": "only one", "explanation": "e"}],
            "difficultyGuidance": {"general": "g"}
        });
        let err = notes_from_value(value).unwrap_err();
        assert!(err.to_string().contains("at least 2 key points"));
    }

    #[test]
    fn test_flashcards_accept_wrapped_object() {
        let value = json!({"flashcards": [{"front": "Q", "back": "A"}]});
        let cards = flashcards_from_value(value).unwrap();
        assert_eq!(cards.len(), 1);
    }

    #[test]
    fn test_flashcards_are_all_or_nothing() {
        let value = json!([
            {"front": "Q1", "back": "A1"},
            {"front": "Q2", "back": ""}
        ]);
        assert!(flashcards_from_value(value).is_err());
    }

    #[test]
    fn test_empty_flashcard_set_is_rejected() {
        assert!(flashcards_from_value(json!([])).is_err());
    }

    #[test]
    fn test_quiz_requires_exactly_four_options() {
        let value = json!([{
            "prompt": "Pick one",
            "options": ["a", "b", "c"],
            "correctAnswer": "a",
            "explanation": "because"
        }]);
        let err = quiz_from_value(value).unwrap_err();
        assert!(err.to_string().contains("expected 4"));
    }

    #[test]
    fn test_quiz_does_not_enforce_answer_membership() {
        let value = json!([{
            "prompt": "Pick one",
            "options": ["a", "b", "c", "d"],
            "correctAnswer": "B",
            "explanation": "letter answers happen"
        }]);
        let questions = quiz_from_value(value).unwrap();
        assert_eq!(questions[0].correct_answer, "B");
    }

    #[test]
    fn test_summary_from_object_and_string() {
        assert_eq!(summary_from_value(json!({"summary": "text"})).unwrap(), "text");
        assert_eq!(summary_from_value(json!("bare")).unwrap(), "bare");
        assert!(summary_from_value(json!({"summary": "  "})).is_err());
        assert!(summary_from_value(json!(42)).is_err());
    }
}
