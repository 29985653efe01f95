// file: src/extractor/questions.rs
// description: splits raw document text into numbered question segments
// reference: single forward scan over line starts, no backtracking

use crate::extractor::patterns::{LineMarker, find_marks, marker_at};
use crate::models::{ExtractedQuestion, QuestionNumber};

/// Stateless question splitter.
///
/// A question starts at any line whose first token is a run of ASCII digits
/// directly followed by whitespace, `.` or `)`. Its body runs up to the next
/// such line. Numbers inside a line never start a question, but a wrapped
/// line that happens to begin with a figure ("20 firms surveyed") does.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuestionExtractor;

impl QuestionExtractor {
    pub fn new() -> Self {
        Self
    }

    pub fn extract(&self, text: &str) -> Vec<ExtractedQuestion> {
        let markers = self.find_markers(text);
        let mut questions = Vec::with_capacity(markers.len());

        for (index, (line_start, marker)) in markers.iter().enumerate() {
            let end = markers
                .get(index + 1)
                .map(|(next_start, _)| *next_start)
                .unwrap_or(text.len());

            let content = text[marker.content_start..end].trim().to_string();
            let marks = find_marks(&content);

            questions.push(ExtractedQuestion {
                question_number: QuestionNumber::new(&text[*line_start..marker.number_end]),
                sequence_order: questions.len() as u32,
                content,
                marks,
            });
        }

        questions
    }

    fn find_markers(&self, text: &str) -> Vec<(usize, LineMarker)> {
        let line_starts = std::iter::once(0).chain(
            text.bytes()
                .enumerate()
                .filter(|(_, b)| *b == b'\n')
                .map(|(i, _)| i + 1),
        );

        line_starts
            .filter_map(|start| marker_at(text, start).map(|marker| (start, marker)))
            .collect()
    }
}

pub fn extract_questions(text: &str) -> Vec<ExtractedQuestion> {
    QuestionExtractor::new().extract(text)
}
