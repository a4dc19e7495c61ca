//! Prompt composition for retrieval-augmented answers.

use cohort_ollama::ChatMessage;

use crate::ranker::ScoredMatch;

/// Render matches as a bullet list, one `- text` line each, in ranked order.
pub fn build_context(matches: &[ScoredMatch]) -> String {
    matches
        .iter()
        .map(|m| format!("- {}", m.record.text))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Fill the answer template with `context` and the literal `question`.
///
/// The context is not truncated.
pub fn build_prompt(context: &str, question: &str) -> String {
    format!(
        "Use the provided context to answer the question.\n\nContext:\n{context}\n\nQuestion: {question}"
    )
}

/// The transcript sent to the chat model: system instruction, then the prompt.
pub fn build_messages(system_prompt: &str, context: &str, question: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(system_prompt),
        ChatMessage::user(build_prompt(context, question)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ranker::rank_top_k;
    use crate::store::VectorStore;
    use cohort_ollama::Role;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_context_lists_matches_in_rank_order() {
        let mut store = VectorStore::new();
        store.insert("cats are mammals", vec![0.0, 1.0], "m").unwrap();
        store.insert("the sky is blue", vec![1.0, 0.0], "m").unwrap();

        let matches = rank_top_k(&[1.0, 0.1], &store.all(), 2);
        assert_eq!(
            build_context(&matches),
            "- the sky is blue\n- cats are mammals"
        );
    }

    #[test]
    fn test_empty_context() {
        assert_eq!(build_context(&[]), "");
    }

    #[test]
    fn test_prompt_template() {
        let prompt = build_prompt("- the sky is blue", "what color is the sky");
        assert_eq!(
            prompt,
            "Use the provided context to answer the question.\n\n\
             Context:\n- the sky is blue\n\n\
             Question: what color is the sky"
        );
    }

    #[test]
    fn test_messages() {
        let messages = build_messages("be brief", "", "why?");
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[0].content, "be brief");
        assert_eq!(messages[1].role, Role::User);
        assert!(messages[1].content.ends_with("Question: why?"));
    }
}
