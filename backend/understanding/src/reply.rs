//! Turning raw model reply text into validated notes.

use serde_json::Value;
use tracing::debug;

use whiteboard_core::{validate_analysis, AnalysisResult, NotesError, Result};

use crate::fence::{extract_fenced_block, strip_code_fences};

/// Parse a model reply into an [`AnalysisResult`].
///
/// Fences are stripped first. If that does not yield JSON and the reply wraps
/// a fenced block in prose, the block is tried instead; the first parse error
/// is reported when neither works.
pub fn parse_analysis(raw: &str) -> Result<AnalysisResult> {
    let value = match serde_json::from_str::<Value>(strip_code_fences(raw)) {
        Ok(value) => value,
        Err(err) => match extract_fenced_block(raw).map(|block| serde_json::from_str::<Value>(block)) {
            Some(Ok(value)) => {
                debug!("Reply had prose around its fenced block");
                value
            }
            _ => return Err(NotesError::MalformedJson(err)),
        },
    };

    validate_analysis(&value)?;
    Ok(serde_json::from_value(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use whiteboard_core::ContentType;

    #[test]
    fn parses_fenced_reply() {
        let raw = "```json\n{\"topic\":\"X\",\"sections\":[],\"flashcards\":[],\"summary\":\"Y\"}\n```";
        let result = parse_analysis(raw).unwrap();
        assert_eq!(
            result,
            AnalysisResult {
                topic: "X".into(),
                sections: vec![],
                flashcards: vec![],
                summary: "Y".into(),
            }
        );
    }

    #[test]
    fn parses_unfenced_reply() {
        let raw = r#"{"topic":"A","sections":[],"flashcards":[],"summary":"B"}"#;
        let result = parse_analysis(raw).unwrap();
        assert_eq!(result.topic, "A");
        assert_eq!(result.summary, "B");
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            serde_json::from_str::<Value>(raw).unwrap()
        );
    }

    #[test]
    fn parses_sections_and_cards() {
        let raw = r#"{
            "topic": "Linear algebra",
            "sections": [{
                "title": "Eigenvalues",
                "content_type": "formula",
                "content": "Av = λv",
                "key_points": ["v ≠ 0", "det(A - λI) = 0"]
            }],
            "flashcards": [{"question": "Define eigenvector", "answer": "Non-zero v with Av = λv"}],
            "summary": "Eigen decomposition basics"
        }"#;
        let result = parse_analysis(raw).unwrap();
        assert_eq!(result.sections[0].content_type, ContentType::Formula);
        assert_eq!(result.sections[0].key_points.len(), 2);
        assert_eq!(result.flashcards[0].answer, "Non-zero v with Av = λv");
    }

    #[test]
    fn parses_fenced_block_inside_prose() {
        let raw = "Sure! Here you go:\n```json\n{\"topic\":\"T\",\"sections\":[],\"flashcards\":[],\"summary\":\"S\"}\n```";
        assert_eq!(parse_analysis(raw).unwrap().topic, "T");
    }

    #[test]
    fn broken_block_in_prose_reports_whole_reply_error() {
        let err = parse_analysis("Here you go:\n```json\n{\"topic\": \n```").unwrap_err();
        match err {
            NotesError::MalformedJson(e) => assert_eq!((e.line(), e.column()), (1, 1)),
            other => panic!("expected malformed json, got {other:?}"),
        }
    }

    #[test]
    fn refusal_is_malformed_json() {
        let err = parse_analysis("Sorry, I cannot process this.").unwrap_err();
        assert!(matches!(err, NotesError::MalformedJson(_)));
    }

    #[test]
    fn quoted_refusal_fails_schema() {
        let err = parse_analysis("\"Sorry, I cannot process this.\"").unwrap_err();
        match err {
            NotesError::Schema(violation) => assert_eq!(violation.path, "$"),
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn truncated_json_is_malformed() {
        let err = parse_analysis("{\"topic\":\"T\",\"sections\":[{\"title\":").unwrap_err();
        assert!(matches!(err, NotesError::MalformedJson(_)));
    }

    #[test]
    fn missing_key_is_schema_error() {
        let err = parse_analysis(r#"{"topic":"A","sections":[],"summary":"B"}"#).unwrap_err();
        match err {
            NotesError::Schema(violation) => assert_eq!(violation.path, "flashcards"),
            other => panic!("expected schema error, got {other:?}"),
        }
    }
}
