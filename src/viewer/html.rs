// file: src/viewer/html.rs
// description: renders a paper tree as a standalone HTML page
// reference: paper header, question blocks, content elements in sequence order

use crate::error::Result;
use crate::models::{ContentRecord, ContentType, PaperTree};
use crate::viewer::layout::{OrderedQuestion, order_tree};
use std::fmt::Write;

const STYLE: &str = r#"
body { font-family: Georgia, serif; max-width: 52rem; margin: 2rem auto; padding: 0 1rem; color: #1f2328; }
.paper-header { border-bottom: 2px solid #1f2328; margin-bottom: 1.5rem; }
.paper-metadata span { display: block; color: #57606a; }
.question-container { position: relative; margin: 1.5rem 0; padding: 1rem; border: 1px solid #d0d7de; border-radius: 6px; }
.question-header { display: flex; justify-content: space-between; font-weight: bold; margin-bottom: .5rem; }
.question-text { white-space: pre-wrap; }
.question-image { max-width: 100%; height: auto; }
"#;

#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlViewer {
    /// Position content absolutely when stored layout coordinates exist.
    pub preserve_layout: bool,
}

impl HtmlViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_layout(mut self, preserve_layout: bool) -> Self {
        self.preserve_layout = preserve_layout;
        self
    }

    pub fn render(&self, tree: &PaperTree) -> Result<String> {
        let ordered = order_tree(tree)?;
        let paper = ordered.paper;
        let mut out = String::with_capacity(4096);

        let _ = write!(
            out,
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n<style>{}</style>\n</head>\n<body>\n<div class=\"paper-viewer\">\n",
            escape_html(&paper.title),
            STYLE
        );

        let _ = write!(
            out,
            "<div class=\"paper-header\">\n<h1 class=\"paper-title\">{}</h1>\n<div class=\"paper-metadata\">\n<span>{} | {} | {}</span>\n<span>{} {} - Paper {}</span>\n",
            escape_html(&paper.title),
            escape_html(&paper.exam_board),
            escape_html(&paper.subject),
            escape_html(&paper.level),
            escape_html(&paper.session),
            paper.year,
            paper.paper_number
        );
        if let Some(total) = paper.total_marks {
            let _ = writeln!(out, "<span class=\"total-marks\">Total: {} marks</span>", total);
        }
        if let Some(found) = tree.marks_found() {
            let _ = writeln!(out, "<span class=\"marks-found\">Marks found: {}</span>", found);
        }
        out.push_str("</div>\n</div>\n<div class=\"questions-list\">\n");

        for question in &ordered.questions {
            self.render_question(&mut out, question);
        }

        out.push_str("</div>\n</div>\n</body>\n</html>\n");
        Ok(out)
    }

    fn render_question(&self, out: &mut String, node: &OrderedQuestion<'_>) {
        let question = node.question;

        let _ = write!(
            out,
            "<div class=\"question-container\" id=\"q-{}\">\n<div class=\"question-header\">\n<span class=\"question-number\">Question {}</span>\n",
            escape_html(&question.id),
            escape_html(&question.question_number)
        );
        if let Some(marks) = question.marks {
            let _ = writeln!(out, "<span class=\"marks\">[{} marks]</span>", marks);
        }
        out.push_str("</div>\n<div class=\"question-content\">\n");

        for item in &node.content {
            if let Some(element) = self.render_content(item) {
                out.push_str(&element);
                out.push('\n');
            }
        }

        out.push_str("</div>\n</div>\n");
    }

    fn render_content(&self, item: &ContentRecord) -> Option<String> {
        let style = self.style_for(item);

        match item.content_type {
            ContentType::Text => Some(format!(
                "<span class=\"question-text\"{}>{}</span>",
                style,
                escape_html(item.text.as_deref().unwrap_or_default())
            )),
            ContentType::Image | ContentType::Diagram | ContentType::Table => {
                let url = item.image_url.as_deref()?;
                let (fallback_w, fallback_h, fallback_alt) = match item.content_type {
                    ContentType::Image => (400, 300, "Question image"),
                    _ => (500, 400, "Diagram"),
                };

                Some(format!(
                    "<div class=\"question-image-wrapper\"{}><img class=\"question-image\" src=\"{}\" alt=\"{}\" width=\"{}\" height=\"{}\"></div>",
                    style,
                    escape_html(url),
                    escape_html(item.alt_text.as_deref().unwrap_or(fallback_alt)),
                    item.image_width.unwrap_or(fallback_w),
                    item.image_height.unwrap_or(fallback_h)
                ))
            }
            ContentType::Equation => None,
        }
    }

    fn style_for(&self, item: &ContentRecord) -> String {
        let mut rules = Vec::new();

        if let Some(size) = item.font_size {
            rules.push(format!("font-size: {}px", size));
        }
        if let Some(family) = item.font_family.as_deref() {
            rules.push(format!("font-family: {}", family));
        }
        if item.is_bold {
            rules.push("font-weight: bold".to_string());
        }
        if item.is_italic {
            rules.push("font-style: italic".to_string());
        }
        if self.preserve_layout
            && let (Some(x), Some(y)) = (item.x, item.y)
        {
            rules.push(format!("position: absolute; left: {}px; top: {}px", x, y));
        }

        if rules.is_empty() {
            String::new()
        } else {
            format!(" style=\"{}\"", escape_html(&rules.join("; ")))
        }
    }
}

pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewer::layout::fixtures::{question, tree};

    #[test]
    fn test_renders_header_and_questions_in_order() {
        let tree = tree(vec![
            question("q2", "3", 1, None, &["Evaluate the policy."]),
            question("q1", "1", 0, Some(5), &["Explain inflation. [5 marks]"]),
        ]);

        let html = HtmlViewer::new().render(&tree).unwrap();

        assert!(html.contains("<h1 class=\"paper-title\">AQA Economics A-Level Paper 1 - June 2023</h1>"));
        assert!(html.contains("AQA | Economics | A-Level"));
        assert!(html.contains("June 2023 - Paper 1"));
        assert!(html.contains("Total: 80 marks"));
        assert!(html.contains("[5 marks]</span>"));
        assert!(html.contains("Marks found: 5</span>"));

        let first = html.find("Question 1<").unwrap();
        let second = html.find("Question 3<").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_text_is_escaped() {
        let tree = tree(vec![question("q1", "1", 0, None, &["If P < MC & <script>"])]);
        let html = HtmlViewer::new().render(&tree).unwrap();

        assert!(html.contains("If P &lt; MC &amp; &lt;script&gt;"));
        assert!(!html.contains("<script>"));
        assert!(!html.contains("Marks found"));
    }

    #[test]
    fn test_image_without_url_is_omitted() {
        let mut q = question("q1", "1", 0, None, &["Look at Figure 1"]);
        let mut image = q.content[0].clone();
        image.id = "img".to_string();
        image.sequence_order = 1;
        image.content_type = ContentType::Image;
        image.text = None;
        q.content.push(image.clone());

        let html = HtmlViewer::new().render(&tree(vec![q.clone()])).unwrap();
        assert!(!html.contains("<img"));

        image.image_url = Some("https://cdn.example/fig1.png".to_string());
        q.content[1] = image;
        let html = HtmlViewer::new().render(&tree(vec![q])).unwrap();
        assert!(html.contains("src=\"https://cdn.example/fig1.png\""));
        assert!(html.contains("alt=\"Question image\""));
    }

    #[test]
    fn test_layout_positions_only_when_enabled() {
        let mut q = question("q1", "1", 0, None, &["Positioned"]);
        q.content[0].x = Some(72.0);
        q.content[0].y = Some(144.5);

        let plain = HtmlViewer::new().render(&tree(vec![q.clone()])).unwrap();
        assert!(!plain.contains("position: absolute"));

        let laid_out = HtmlViewer::new().with_layout(true).render(&tree(vec![q])).unwrap();
        assert!(laid_out.contains("left: 72px; top: 144.5px"));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a\"b'c"), "a&quot;b&#39;c");
    }
}
