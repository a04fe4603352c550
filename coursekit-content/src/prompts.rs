//! Fixed prompt templates for each content operation.
//!
//! Every template instructs the model to answer with pure JSON matching
//! a documented shape, with no markdown fences and no surrounding prose.
//! The repair parser copes when models ignore that anyway.

/// Prompt for the course outline.
pub fn outline_prompt(topic: &str, study_type: &str, difficulty_level: &str) -> String {
    format!(
        "Create a course outline for the topic \"{topic}\".\n\
         Study type: {study_type}. Difficulty level: {difficulty_level}.\n\n\
         Respond with pure JSON only, no markdown fences, no explanation:\n\
         {{\n  \"title\": \"course title\",\n  \"summary\": \"2-3 sentence course summary\",\n  \
         \"chapters\": [\n    {{\"title\": \"chapter title\", \"summary\": \"1-2 sentence chapter summary\"}}\n  ]\n}}\n\n\
         Produce between 3 and 6 chapters, ordered from foundational to advanced. \
         Every chapter must have a non-empty title and summary."
    )
}

/// Prompt for structured notes covering one chapter.
pub fn notes_prompt(
    chapter_title: &str,
    chapter_summary: &str,
    topic: &str,
    difficulty_level: &str,
) -> String {
    format!(
        "Write detailed study notes for the chapter \"{chapter_title}\" of a course on \
         \"{topic}\" (difficulty: {difficulty_level}).\n\
         Chapter summary: {chapter_summary}\n\n\
         Respond with pure JSON only, no markdown fences, no explanation:\n\
         {{\n  \"summary\": \"paragraph summarizing the chapter\",\n  \
         \"keyPoints\": [\n    {{\"point\": \"concept name\", \"explanation\": \"why it matters and how it works\"}}\n  ],\n  \
         \"examples\": [\"worked example or illustration\"],\n  \"quiz\": [],\n  \
         \"difficultyGuidance\": {{\n    \"general\": \"advice for learners at this level\",\n    \
         \"challengingTopics\": [\"topic learners commonly struggle with\"]\n  }}\n}}\n\n\
         Include at least 4 key points."
    )
}

/// Prompt for a batch of flashcards tied to one chapter.
pub fn flashcards_prompt(chapter_title: &str, topic: &str, count: u32) -> String {
    format!(
        "Create {count} flashcards for the chapter \"{chapter_title}\" of a course on \
         \"{topic}\".\n\n\
         Respond with pure JSON only, no markdown fences, no explanation:\n\
         [\n  {{\"front\": \"question or term\", \"back\": \"answer or definition\"}}\n]\n\n\
         Every flashcard must have a non-empty front and back."
    )
}

/// Prompt for a batch of multiple-choice quiz questions.
pub fn quiz_prompt(chapter_title: &str, topic: &str, count: u32) -> String {
    format!(
        "Create {count} multiple-choice quiz questions for the chapter \"{chapter_title}\" \
         of a course on \"{topic}\".\n\n\
         Respond with pure JSON only, no markdown fences, no explanation:\n\
         [\n  {{\n    \"prompt\": \"the question\",\n    \
         \"options\": [\"option A\", \"option B\", \"option C\", \"option D\"],\n    \
         \"correctAnswer\": \"the correct option text\",\n    \
         \"explanation\": \"why that answer is correct\"\n  }}\n]\n\n\
         Every question must have exactly 4 options."
    )
}

/// Prompt for the final course summary, rendered from the chapter list.
pub fn summary_prompt(course_title: &str, chapter_titles: &[String]) -> String {
    let chapters = chapter_titles
        .iter()
        .enumerate()
        .map(|(i, title)| format!("{}. {title}", i + 1))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "Write a final summary for the completed course \"{course_title}\" with these \
         chapters:\n{chapters}\n\n\
         Respond with pure JSON only, no markdown fences, no explanation:\n\
         {{\"summary\": \"3-4 sentence summary of what the course covers\"}}"
    )
}
