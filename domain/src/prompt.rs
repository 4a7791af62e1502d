//! Prompt sent to the model for a summary request.

use crate::language::Language;
use crate::validation::SummaryRequest;

/// Builds the single user prompt asking the model for a structured JSON summary.
pub fn build_prompt(request: &SummaryRequest) -> String {
    format!(
        r#"Analyze the following call transcript and provide a structured summary in JSON format.
{language_instruction}
TRANSCRIPT:
{transcript}

Please respond with ONLY valid JSON (no markdown, no code blocks) with this exact structure:
{{
  "executive": "Brief 1-2 sentence summary of the key issue",
  "detailed": "Comprehensive 3-5 paragraph analysis of the complaint, resolution discussion, and outcome",
  "keyMetrics": {{
    "issueCategory": "e.g., Billing, Technical Support, Refund, etc.",
    "sentiment": "positive|neutral|negative",
    "resolutionStatus": "resolved|escalated|pending",
    "callDuration": "HH:MM:SS format",
    "agentName": "if mentioned"
  }},
  "sentiment": "positive|neutral|negative",
  "confidenceScore": 0.95
}}

Omit "callDuration" and "agentName" if they cannot be determined from the transcript.
"confidenceScore" is a number between 0 and 1."#,
        language_instruction = language_instruction(request.language),
        transcript = request.transcript,
    )
}

fn language_instruction(language: Language) -> String {
    match language {
        Language::En => String::new(),
        other => format!(
            "\nThe transcript is in {name}. Write \"executive\" and \"detailed\" in {name}. \
             Keep all JSON keys and the sentiment and resolutionStatus values in English.\n",
            name = other.display_name()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(language: Language) -> SummaryRequest {
        SummaryRequest {
            complaint_id: "CMP-1".to_string(),
            transcript: "Customer: my router keeps dropping the connection every hour."
                .to_string(),
            language,
        }
    }

    #[test]
    fn prompt_embeds_transcript_and_json_shape() {
        let prompt = build_prompt(&request(Language::En));

        assert!(prompt.contains("TRANSCRIPT:\nCustomer: my router keeps dropping"));
        assert!(prompt.contains(r#""keyMetrics": {"#));
        assert!(prompt.contains(r#""confidenceScore": 0.95"#));
        assert!(prompt.contains("ONLY valid JSON"));
    }

    #[test]
    fn english_prompt_has_no_language_instruction() {
        let prompt = build_prompt(&request(Language::En));

        assert!(!prompt.contains("The transcript is in"));
    }

    #[test]
    fn other_languages_ask_for_prose_in_that_language() {
        let prompt = build_prompt(&request(Language::Es));

        assert!(prompt.contains("The transcript is in Spanish."));
        assert!(prompt.contains(r#"Write "executive" and "detailed" in Spanish."#));
        assert!(prompt.contains("Keep all JSON keys"));
    }
}
