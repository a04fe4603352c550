//! Canned fallback content used when generation is exhausted or the
//! failure is classified as unrecoverable.
//!
//! Course outlines come from an ordered keyword table of curated
//! templates; chapter notes, flashcards, and quiz questions come from
//! short generic template lists cycled by index. The caller decides per
//! content type whether to substitute fallback content, usually gated
//! on [`should_use_fallback`].

use coursekit_core::{
    ChapterNotes, CourseError, CourseOutline, DifficultyGuidance, Flashcard, KeyPoint,
    QuizQuestion,
};

struct OutlineTemplate {
    key: &'static str,
    title: &'static str,
    summary: &'static str,
    chapters: [(&'static str, &'static str); 4],
}

/// Ordered: `best_match` scans this table front to back.
const OUTLINE_TEMPLATES: &[OutlineTemplate] = &[
    OutlineTemplate {
        key: "programming",
        title: "{topic}: From Fundamentals to Practice",
        summary: "A structured path through {topic}, starting with core concepts and building toward writing and debugging real programs.",
        chapters: [
            ("Core Concepts and Syntax", "Variables, types, control flow, and the basic building blocks."),
            ("Functions and Data Structures", "Organizing logic into functions and choosing the right data structures."),
            ("Working with Real Programs", "Reading, writing, and debugging programs of meaningful size."),
            ("Practice and Next Steps", "Exercises, common pitfalls, and where to go from here."),
        ],
    },
    OutlineTemplate {
        key: "mathematics",
        title: "{topic}: Concepts and Problem Solving",
        summary: "A course on {topic} that pairs each concept with worked problems and practice.",
        chapters: [
            ("Foundations and Notation", "The definitions and notation everything else builds on."),
            ("Core Techniques", "The main methods and when to apply each one."),
            ("Worked Problems", "Step-by-step solutions to representative problems."),
            ("Applications and Review", "Where the ideas show up in practice, plus a consolidated review."),
        ],
    },
    OutlineTemplate {
        key: "science",
        title: "{topic}: Principles and Experiments",
        summary: "An evidence-first tour of {topic}: the key principles, how we know them, and what they predict.",
        chapters: [
            ("Key Principles", "The central ideas and the vocabulary used to discuss them."),
            ("Evidence and Experiments", "The observations and experiments behind the principles."),
            ("Models and Predictions", "Using the principles to explain and predict phenomena."),
            ("Frontiers and Open Questions", "What is still debated or unknown."),
        ],
    },
    OutlineTemplate {
        key: "history",
        title: "{topic}: Events, Causes, and Consequences",
        summary: "A chronological study of {topic} focusing on causes, turning points, and lasting effects.",
        chapters: [
            ("Background and Context", "The world before: conditions that set the stage."),
            ("Key Events and Figures", "The decisive moments and the people behind them."),
            ("Causes and Consequences", "Why events unfolded as they did and what changed."),
            ("Legacy and Interpretation", "How the period is remembered and debated today."),
        ],
    },
    OutlineTemplate {
        key: "language",
        title: "{topic}: A Practical Course",
        summary: "A practical course in {topic} balancing vocabulary, grammar, and real usage.",
        chapters: [
            ("Essential Vocabulary", "High-frequency words and phrases to build on."),
            ("Grammar Foundations", "The structures needed to form correct sentences."),
            ("Listening and Speaking", "Understanding and producing the language in conversation."),
            ("Reading and Writing", "Working with written texts at an appropriate level."),
        ],
    },
];

const FLASHCARD_TEMPLATES: &[(&str, &str)] = &[
    ("What is the main idea of chapter?", "Chapter introduces the core concepts of subject area and how they fit together."),
    ("Name one key concept from chapter.", "A central concept in subject area covered by this chapter."),
    ("Why does chapter matter for subject area?", "It builds the foundation that later material in subject area depends on."),
    ("How would you apply what chapter covers?", "Work through an example in subject area using the chapter's main technique."),
    ("What should you review after chapter?", "Revisit the key terms and try explaining subject area concepts in your own words."),
];

struct QuizTemplate {
    prompt: &'static str,
    options: [&'static str; 4],
    correct_answer: &'static str,
    explanation: &'static str,
}

const QUIZ_TEMPLATES: &[QuizTemplate] = &[
    QuizTemplate {
        prompt: "What is the best way to study chapter?",
        options: [
            "Read it once quickly",
            "Work through it actively with notes and examples",
            "Skip it entirely",
            "Memorize it word for word",
        ],
        correct_answer: "Work through it actively with notes and examples",
        explanation: "Active engagement with subject area material leads to better retention than passive reading.",
    },
    QuizTemplate {
        prompt: "Which habit most improves long-term retention of chapter?",
        options: [
            "Cramming the night before",
            "Spaced review over several days",
            "Reading silently without notes",
            "Highlighting every sentence",
        ],
        correct_answer: "Spaced review over several days",
        explanation: "Spacing reviews of subject area content strengthens recall far more than massed practice.",
    },
    QuizTemplate {
        prompt: "After finishing chapter, what is a good self-check?",
        options: [
            "Explaining the main ideas in your own words",
            "Counting the pages you read",
            "Moving on immediately",
            "Re-reading the table of contents",
        ],
        correct_answer: "Explaining the main ideas in your own words",
        explanation: "Self-explanation exposes gaps in understanding of subject area quickly.",
    },
];

/// Exact lowercase key match first, else the first key where either
/// string contains the other, else none. Table order decides ties.
pub fn best_match<'a>(topic: &str, keys: impl Iterator<Item = &'a str>) -> Option<&'a str> {
    let topic = topic.trim().to_lowercase();
    let keys: Vec<&str> = keys.collect();

    for key in &keys {
        if key.to_lowercase() == topic {
            return Some(key);
        }
    }
    for key in &keys {
        let key_lower = key.to_lowercase();
        if topic.contains(&key_lower) || key_lower.contains(&topic) {
            return Some(key);
        }
    }
    None
}

fn difficulty_prefix(difficulty_level: &str) -> &'static str {
    match difficulty_level.to_lowercase().as_str() {
        "intermediate" => "Understanding",
        "advanced" => "Advanced",
        _ => "Introduction to",
    }
}

/// Canned course outline: a curated keyed template when the topic
/// matches one, otherwise a generic 4-chapter outline whose title uses
/// the difficulty prefix and the literal topic string.
pub fn fallback_course_outline(topic: &str, difficulty_level: &str) -> CourseOutline {
    if let Some(key) = best_match(topic, OUTLINE_TEMPLATES.iter().map(|t| t.key)) {
        let template = OUTLINE_TEMPLATES.iter().find(|t| t.key == key).unwrap();
        let mut outline = CourseOutline::new(
            template.title.replace("{topic}", topic),
            template.summary.replace("{topic}", topic),
        );
        for (title, summary) in template.chapters {
            outline = outline.with_chapter(title, summary);
        }
        return outline;
    }

    let prefix = difficulty_prefix(difficulty_level);
    CourseOutline::new(
        format!("{prefix} {topic}"),
        format!("A structured {difficulty_level} course covering the essentials of {topic}."),
    )
    .with_chapter(
        format!("Getting Started with {topic}"),
        format!("The core vocabulary and ideas of {topic}."),
    )
    .with_chapter(
        "Core Concepts",
        format!("The main concepts every student of {topic} needs."),
    )
    .with_chapter(
        "Practical Applications",
        format!("Applying {topic} to realistic problems and examples."),
    )
    .with_chapter(
        "Review and Further Study",
        format!("Consolidating what you learned about {topic} and where to go next."),
    )
}

/// Generic chapter notes satisfying the notes invariants.
pub fn fallback_chapter_notes(chapter_title: &str, topic: &str) -> ChapterNotes {
    ChapterNotes {
        summary: format!(
            "This chapter, {chapter_title}, covers an essential part of {topic}. \
             Detailed notes could not be generated automatically; use the key points \
             below as a study guide."
        ),
        key_points: vec![
            KeyPoint {
                point: format!("Understand the role of {chapter_title}"),
                explanation: format!(
                    "Identify how {chapter_title} fits into the broader study of {topic}."
                ),
            },
            KeyPoint {
                point: "Learn the key terminology".to_string(),
                explanation: format!(
                    "List and define the main terms introduced in {chapter_title}."
                ),
            },
            KeyPoint {
                point: "Practice with examples".to_string(),
                explanation: format!(
                    "Work through at least two examples related to {chapter_title} on your own."
                ),
            },
        ],
        examples: vec![],
        quiz: vec![],
        difficulty_guidance: DifficultyGuidance {
            general: format!(
                "Take {chapter_title} at your own pace and revisit earlier chapters of \
                 {topic} whenever something feels unfamiliar."
            ),
            challenging_topics: vec![],
        },
    }
}

/// `count` generic flashcards, cycling the template list by index and
/// substituting the chapter and topic names case-insensitively.
pub fn fallback_flashcards(chapter_title: &str, topic: &str, count: u32) -> Vec<Flashcard> {
    (0..count as usize)
        .map(|i| {
            let (front, back) = FLASHCARD_TEMPLATES[i % FLASHCARD_TEMPLATES.len()];
            Flashcard {
                front: substitute(front, chapter_title, topic),
                back: substitute(back, chapter_title, topic),
            }
        })
        .collect()
}

/// `count` generic quiz questions, cycling the template list by index
/// and substituting the chapter and topic names case-insensitively.
pub fn fallback_quiz(chapter_title: &str, topic: &str, count: u32) -> Vec<QuizQuestion> {
    (0..count as usize)
        .map(|i| {
            let template = &QUIZ_TEMPLATES[i % QUIZ_TEMPLATES.len()];
            QuizQuestion {
                prompt: substitute(template.prompt, chapter_title, topic),
                options: template
                    .options
                    .iter()
                    .map(|option| substitute(option, chapter_title, topic))
                    .collect(),
                correct_answer: substitute(template.correct_answer, chapter_title, topic),
                explanation: substitute(template.explanation, chapter_title, topic),
            }
        })
        .collect()
}

/// Whether canned content should replace a failed generation: the error
/// message names a known-unrecoverable condition, or the caller already
/// retried at least 3 times.
pub fn should_use_fallback(error: &CourseError, retry_count: u32) -> bool {
    const TRIGGERS: &[&str] = &[
        "rate limit",
        "quota exceeded",
        "service unavailable",
        "timeout",
        "network error",
        "parse error",
    ];
    let message = error.to_string().to_lowercase();
    TRIGGERS.iter().any(|trigger| message.contains(trigger)) || retry_count >= 3
}

fn substitute(template: &str, chapter_title: &str, topic: &str) -> String {
    let replaced = replace_ignore_case(template, "chapter", chapter_title);
    replace_ignore_case(&replaced, "subject area", topic)
}

/// Replace every case-insensitive occurrence of `needle` in `haystack`.
/// Offsets come from the original string's char boundaries: the second
/// substitution pass runs over text already containing a model-supplied
/// title, where lowercasing may change byte length.
fn replace_ignore_case(haystack: &str, needle: &str, replacement: &str) -> String {
    let needle_lower: Vec<char> = needle.chars().flat_map(char::to_lowercase).collect();
    let mut out = String::with_capacity(haystack.len());
    let mut rest = haystack;

    while let Some((start, end)) = find_ignore_case(rest, &needle_lower) {
        out.push_str(&rest[..start]);
        out.push_str(replacement);
        rest = &rest[end..];
    }
    out.push_str(rest);
    out
}

/// Byte range of the first match of `needle_lower` in `haystack`,
/// comparing lowercase char sequences pairwise. A match must cover
/// whole haystack chars; one whose lowercase expansion runs past the
/// needle is rejected.
fn find_ignore_case(haystack: &str, needle_lower: &[char]) -> Option<(usize, usize)> {
    if needle_lower.is_empty() {
        return None;
    }
    'starts: for (start, _) in haystack.char_indices() {
        let mut matched = 0;
        for (offset, ch) in haystack[start..].char_indices() {
            for lowered in ch.to_lowercase() {
                if matched >= needle_lower.len() || needle_lower[matched] != lowered {
                    continue 'starts;
                }
                matched += 1;
            }
            if matched == needle_lower.len() {
                return Some((start, start + offset + ch.len_utf8()));
            }
        }
    }
    None
}
