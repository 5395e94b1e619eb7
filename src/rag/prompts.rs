//! Prompt template for document question answering

/// What the model is told to answer when the context does not cover the question
pub const NOT_IN_CONTEXT_ANSWER: &str = "The answer is not available in the context.";

/// Build the grounded question-answering prompt
pub fn build_prompt(context: &str, question: &str) -> String {
    format!(
        r#"Answer the question as detailed as possible from the provided context. If the answer contains any structured data like tables or lists, respond in the same format.
If the answer is not in the provided context, just say, "{NOT_IN_CONTEXT_ANSWER}" Do not provide a wrong answer.

Context:
{context}

Question:
{question}
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_contains_context_and_question() {
        let prompt = build_prompt("Rust was first released in 2015.", "When was Rust released?");

        let context_pos = prompt.find("Context:\nRust was first released in 2015.").unwrap();
        let question_pos = prompt.find("Question:\nWhen was Rust released?").unwrap();
        assert!(context_pos < question_pos);
    }

    #[test]
    fn test_prompt_keeps_grounding_instructions() {
        let prompt = build_prompt("", "q");
        assert!(prompt.contains("\"The answer is not available in the context.\""));
        assert!(prompt.contains("Do not provide a wrong answer."));
        assert!(prompt.contains("tables or lists"));
    }
}
