//! Prompt templates for exam generation

use crate::exam::blueprint::{ExamKind, GenerationRequest, SectionLayout};

/// Templates for asking a chat model to write an exam
pub struct ExamPromptTemplate;

impl ExamPromptTemplate {
    /// System prompt for the generation request
    pub fn system() -> &'static str {
        "You are a specialized Japanese exam generator that outputs pure JSON."
    }

    /// User prompt describing the exam structure and output schema
    pub fn generation_prompt(request: &GenerationRequest) -> String {
        format!(
            r#"
You are a professional Japanese teacher. Create a mock {kind} ({level}) exam.
Strictly follow this structure:
{structure}

[Output Requirements]
Return a JSON array where each object contains:
- section: The section name (e.g., "Kanji", "Grammar", "Reading", "Listening")
- content: The main text (For Listening, this MUST be the full Japanese dialogue transcript, repeated identically for every question of the same dialogue)
- question: The specific question
- options: [A, B, C, D] (A JSON array of four full Japanese answer choices (e.g., ["バスで","電車で","自転車で","車で"]))
- answer: Correct letter
- note: Brief explanation

IMPORTANT: Output ONLY the raw JSON array.
"#,
            kind = request.kind,
            level = request.level,
            structure = Self::structure(request.kind, &request.layout),
        )
    }

    /// Numbered section list for the requested layout
    pub fn structure(kind: ExamKind, layout: &SectionLayout) -> String {
        let listening = format!(
            "Listening: {} dialogue scenarios, {} questions each ({} q's total)",
            layout.listening.groups,
            layout.listening.per_group,
            layout.listening.total()
        );
        let reading = format!(
            "{} short passages ({} q's each), {} long passage ({} q's)",
            layout.reading_short.groups,
            layout.reading_short.per_group,
            layout.reading_long.groups,
            layout.reading_long.per_group
        );

        match kind {
            ExamKind::Jlpt => format!(
                "1. Language Knowledge: Kanji ({} q's), Vocabulary ({} q's), Grammar ({} q's)\n\
                 2. Reading: {}\n\
                 3. {}",
                layout.kanji.unwrap_or(0),
                layout.vocabulary.unwrap_or(0),
                layout.grammar,
                reading,
                listening
            ),
            ExamKind::Jpt => format!(
                "1. {}\n\
                 2. Reading & Grammar: {}, {} grammar questions",
                listening, reading, layout.grammar
            ),
        }
    }
}
