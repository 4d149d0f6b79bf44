//! Fixed instructions sent with every whiteboard photo.

use serde_json::{json, Value};

use whiteboard_core::to_indented_json;

pub const SYSTEM_PROMPT: &str = "\
You are a didactic AI assistant for university teaching.

Your task:
- Recognize the content of a lecture whiteboard
- Identify topics, text, mathematical formulas and diagrams
- Structure everything logically and in a learner-friendly way
- Respond exclusively with valid JSON";

/// Example of the JSON shape the model is asked to return.
pub fn schema_example() -> Value {
    json!({
        "topic": "string",
        "sections": [
            {
                "title": "string",
                "content_type": "text | formula | diagram",
                "content": "string",
                "key_points": ["string"]
            }
        ],
        "flashcards": [
            {
                "question": "string",
                "answer": "string"
            }
        ],
        "summary": "string"
    })
}

/// Text block that accompanies the image in the user turn.
pub fn user_instruction() -> String {
    let schema = to_indented_json(&schema_example()).unwrap_or_default();
    format!(
        "Analyze this photo of a lecture whiteboard and structure its content \
         according to the following JSON schema:\n\n{schema}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instruction_embeds_every_key() {
        let text = user_instruction();
        for key in ["topic", "sections", "content_type", "key_points", "flashcards", "summary"] {
            assert!(text.contains(key), "missing {key}");
        }
        assert!(text.contains("text | formula | diagram"));
    }

    #[test]
    fn schema_example_uses_four_space_indent() {
        let text = user_instruction();
        assert!(text.contains("\n    \"topic\": \"string\""));
        assert!(text.contains("\n            \"question\": \"string\""));
        assert!(!text.contains("\n  \"topic\""));
    }
}
