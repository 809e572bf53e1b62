/// Keyword-based distress classification of audio transcripts
use crate::constants::{EMERGENCY_KEYWORDS, KEYWORD_MATCH_CONFIDENCE, NO_MATCH_CONFIDENCE};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ThreatLevel {
    Critical,
    None,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DistressAssessment {
    pub level: ThreatLevel,
    pub confidence: f64,
    pub keywords: Vec<String>,
    pub reasoning: String,
}

/// Classifies a transcript by scanning for a fixed set of distress keywords.
///
/// Matching is case-insensitive substring search. Any hit is treated as
/// critical; there is no graded scale between the two outcomes.
pub fn classify_transcript(transcript: &str) -> DistressAssessment {
    let lowered = transcript.to_lowercase();
    let keywords: Vec<String> = EMERGENCY_KEYWORDS
        .iter()
        .filter(|keyword| lowered.contains(&keyword.to_lowercase()))
        .map(|keyword| keyword.to_string())
        .collect();

    if keywords.is_empty() {
        DistressAssessment {
            level: ThreatLevel::None,
            confidence: NO_MATCH_CONFIDENCE,
            keywords,
            reasoning: "No distress keywords detected in transcript".to_string(),
        }
    } else {
        DistressAssessment {
            level: ThreatLevel::Critical,
            confidence: KEYWORD_MATCH_CONFIDENCE,
            reasoning: format!("Distress keywords detected: {}", keywords.join(", ")),
            keywords,
        }
    }
}
