// file: src/viewer/layout.rs
// description: checks a paper tree and orders it for display
// reference: question and content ordering by sequence_order

use crate::error::{PaperError, Result};
use crate::models::{ContentRecord, PaperRecord, PaperTree, QuestionRecord};

#[derive(Debug)]
pub struct OrderedQuestion<'a> {
    pub question: &'a QuestionRecord,
    pub content: Vec<&'a ContentRecord>,
}

#[derive(Debug)]
pub struct OrderedPaper<'a> {
    pub paper: &'a PaperRecord,
    pub questions: Vec<OrderedQuestion<'a>>,
}

/// Borrows the tree in display order. The viewer does its own ordering and
/// never trusts the order it was handed.
pub fn order_tree(tree: &PaperTree) -> Result<OrderedPaper<'_>> {
    if tree.paper.id.trim().is_empty() {
        return Err(PaperError::Presentation("paper has no id".to_string()));
    }

    let mut questions = Vec::with_capacity(tree.questions.len());

    for node in &tree.questions {
        if node.question.paper_id != tree.paper.id {
            return Err(PaperError::Presentation(format!(
                "question {} belongs to paper {}, not {}",
                node.question.id, node.question.paper_id, tree.paper.id
            )));
        }

        if let Some(stray) = node
            .content
            .iter()
            .find(|c| c.question_id != node.question.id)
        {
            return Err(PaperError::Presentation(format!(
                "content {} belongs to question {}, not {}",
                stray.id, stray.question_id, node.question.id
            )));
        }

        let mut content: Vec<&ContentRecord> = node.content.iter().collect();
        content.sort_by_key(|c| c.sequence_order);

        questions.push(OrderedQuestion {
            question: &node.question,
            content,
        });
    }

    questions.sort_by_key(|q| q.question.sequence_order);

    Ok(OrderedPaper {
        paper: &tree.paper,
        questions,
    })
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::models::{ContentRecord, PaperRecord, PaperTree, QuestionRecord, QuestionTree};

    pub fn question(id: &str, number: &str, order: u32, marks: Option<u64>, texts: &[&str]) -> QuestionTree {
        QuestionTree {
            question: QuestionRecord {
                id: id.to_string(),
                paper_id: "p1".to_string(),
                question_number: number.to_string(),
                sequence_order: order,
                marks,
            },
            content: texts
                .iter()
                .enumerate()
                .map(|(i, t)| ContentRecord::plain_text(format!("{id}-c{i}"), id.to_string(), i as u32, *t))
                .collect(),
        }
    }

    pub fn tree(questions: Vec<QuestionTree>) -> PaperTree {
        PaperTree {
            paper: PaperRecord {
                id: "p1".to_string(),
                title: "AQA Economics A-Level Paper 1 - June 2023".to_string(),
                exam_board: "AQA".to_string(),
                subject: "Economics".to_string(),
                level: "A-Level".to_string(),
                year: 2023,
                session: "June".to_string(),
                paper_number: 1,
                total_marks: Some(80),
                uploaded_at: "2024-01-01T00:00:00+00:00".to_string(),
            },
            questions,
        }
    }
}
