// file: src/viewer/text.rs
// description: plain terminal rendering of a paper tree

use crate::error::Result;
use crate::models::{ContentType, PaperTree};
use crate::viewer::layout::order_tree;
use std::fmt::Write;

#[derive(Debug, Clone, Copy)]
pub struct TextViewer {
    pub width: usize,
}

impl Default for TextViewer {
    fn default() -> Self {
        Self { width: 80 }
    }
}

impl TextViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&self, tree: &PaperTree) -> Result<String> {
        let ordered = order_tree(tree)?;
        let paper = ordered.paper;
        let rule = "=".repeat(self.width);
        let mut out = String::new();

        let _ = writeln!(out, "{}", rule);
        let _ = writeln!(out, "{}", paper.title);
        let _ = writeln!(out, "{} | {} | {}", paper.exam_board, paper.subject, paper.level);
        let _ = writeln!(out, "{} {} - Paper {}", paper.session, paper.year, paper.paper_number);
        if let Some(total) = paper.total_marks {
            let _ = writeln!(out, "Total: {} marks", total);
        }
        if let Some(found) = tree.marks_found() {
            let _ = writeln!(out, "Marks found: {}", found);
        }
        let _ = writeln!(out, "{}", rule);

        for node in &ordered.questions {
            let question = node.question;
            out.push('\n');
            match question.marks {
                Some(marks) => {
                    let _ = writeln!(out, "Question {}  [{} marks]", question.question_number, marks);
                }
                None => {
                    let _ = writeln!(out, "Question {}", question.question_number);
                }
            }

            for item in &node.content {
                match item.content_type {
                    ContentType::Text => {
                        for line in item.text.as_deref().unwrap_or_default().lines() {
                            let _ = writeln!(out, "    {}", line);
                        }
                    }
                    _ => {
                        if let Some(url) = item.image_url.as_deref() {
                            let _ = writeln!(out, "    [{}: {}]", item.content_type.as_str(), url);
                        }
                    }
                }
            }
        }

        Ok(out)
    }
}
