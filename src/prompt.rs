//! Prompt assembly.
//!
//! Pure string construction, no I/O. Two templates share the same
//! fixed instruction block and question placement; the grounded one
//! additionally lists the retrieved documents, each verbatim, before
//! the static section context.

use crate::content::texts;
use crate::section::Section;

/// Build the full instruction text for one generation request.
pub fn assemble(
    user_message: &str,
    section: Section,
    section_content: &str,
    grounding_docs: &[String],
) -> String {
    let mut prompt = String::from("Ты помощник по D&D для новичков.\n\n");

    if !grounding_docs.is_empty() {
        prompt.push_str("СПРАВОЧНЫЕ МАТЕРИАЛЫ ПО ВОПРОСУ:\n");
        for (i, doc) in grounding_docs.iter().enumerate() {
            prompt.push_str(&format!("{}. {}\n", i + 1, doc));
        }
        prompt.push('\n');
    }

    prompt.push_str(&format!(
        "КОНТЕКСТ ТЕКУЩЕГО РАЗДЕЛА \"{}\":\n{}\n\n---\n\n",
        section.as_str(),
        section_content
    ));
    prompt.push_str(texts::PROMPT_INSTRUCTIONS);
    prompt.push_str(&format!(
        "\n\nВОПРОС ПОЛЬЗОВАТЕЛЯ:\n{}\n\nОТВЕТ:",
        user_message
    ));

    prompt
}
