//! Splitting report text into one fragment per claim

use crate::error::ExtractorError;
use eobscan_domain::{FragmentRejection, RejectionReason};
use regex::Regex;
use tracing::debug;

const EXCERPT_CHARS: usize = 80;

/// One region of the report between two plan-name landmarks
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    /// A fragment to be parsed into a claim
    Fragment {
        /// Position in the document (0-based)
        index: usize,
        /// Fragment text, starting with its landmark
        text: &'a str,
    },
    /// A fragment dropped before parsing
    Rejected(FragmentRejection),
}

/// Splits text at plan-name landmarks
pub struct ClaimSegmenter {
    landmark: Regex,
    policy_markers: Vec<String>,
}

impl ClaimSegmenter {
    /// Create a segmenter for the given landmarks and policy markers
    pub fn new(landmarks: &[String], policy_markers: &[String]) -> Result<Self, ExtractorError> {
        // Longer landmarks first so a landmark that prefixes another never wins
        let mut ordered: Vec<&String> = landmarks.iter().collect();
        ordered.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

        let pattern = ordered
            .iter()
            .map(|l| regex::escape(l))
            .collect::<Vec<_>>()
            .join("|");
        let landmark = Regex::new(&pattern)
            .map_err(|e| ExtractorError::Config(format!("invalid landmark pattern: {}", e)))?;

        Ok(Self {
            landmark,
            policy_markers: policy_markers.to_vec(),
        })
    }

    /// Split `text` into segments in document order
    ///
    /// Text before the first landmark (cover letter, page header) is dropped.
    pub fn segment<'a>(&self, text: &'a str) -> Vec<Segment<'a>> {
        let matches: Vec<(usize, usize)> = self
            .landmark
            .find_iter(text)
            .map(|m| (m.start(), m.end()))
            .collect();

        debug!("Found {} plan-name landmarks", matches.len());

        matches
            .iter()
            .enumerate()
            .map(|(index, &(start, landmark_end))| {
                let end = matches.get(index + 1).map(|&(next, _)| next).unwrap_or(text.len());
                let fragment = &text[start..end];

                if self.policy_markers.iter().any(|m| fragment.contains(m.as_str())) {
                    return Segment::Rejected(rejection(index, RejectionReason::PolicyFilter, fragment));
                }
                if text[landmark_end..end].trim().is_empty() {
                    return Segment::Rejected(rejection(index, RejectionReason::EmptyFragment, fragment));
                }
                Segment::Fragment { index, text: fragment }
            })
            .collect()
    }
}

/// Build a rejection record with a short excerpt of the fragment
pub fn rejection(fragment_index: usize, reason: RejectionReason, fragment: &str) -> FragmentRejection {
    let excerpt = fragment
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .unwrap_or("")
        .chars()
        .take(EXCERPT_CHARS)
        .collect();
    FragmentRejection {
        fragment_index,
        reason,
        excerpt,
    }
}
