// file: src/api/pages.rs
// description: static upload form and html error page

use crate::viewer::html::escape_html;
use axum::http::StatusCode;

/// Collects the paper metadata, posts it with the PDF to `/api/upload` and
/// links to the stored paper.
pub const UPLOAD_PAGE_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Upload exam paper</title>
<style>
body { font-family: Georgia, serif; max-width: 36rem; margin: 2rem auto; padding: 0 1rem; }
label { display: block; margin-top: .75rem; }
input, select { width: 100%; padding: .4rem; }
button { margin-top: 1rem; padding: .5rem 1rem; }
#result { margin-top: 1rem; white-space: pre-wrap; }
</style>
</head>
<body>
<h1>Upload exam paper</h1>
<form id="upload">
<label>PDF file <input type="file" name="file" accept="application/pdf,.pdf" required></label>
<label>Exam board <input name="examBoard" value="AQA" required></label>
<label>Subject <input name="subject" value="Economics"></label>
<label>Level <input name="level" value="A-Level"></label>
<label>Year <input name="year" type="number" min="2000" max="2030" value="2023" required></label>
<label>Session
<select name="session"><option>June</option><option>November</option><option>January</option></select>
</label>
<label>Paper number <input name="paperNumber" type="number" min="1" max="3" value="1" required></label>
<label>Total marks <input name="totalMarks" type="number" min="0"></label>
<button type="submit">Upload</button>
</form>
<div id="result"></div>
<script>
document.getElementById("upload").addEventListener("submit", async (event) => {
  event.preventDefault();
  const form = new FormData(event.target);
  const totalMarks = form.get("totalMarks");
  const metadata = {
    examBoard: form.get("examBoard"),
    subject: form.get("subject"),
    level: form.get("level"),
    year: Number(form.get("year")),
    session: form.get("session"),
    paperNumber: Number(form.get("paperNumber")),
    totalMarks: totalMarks ? Number(totalMarks) : null,
  };
  const body = new FormData();
  body.append("file", form.get("file"));
  body.append("metadata", JSON.stringify(metadata));

  const result = document.getElementById("result");
  result.textContent = "Processing...";
  const response = await fetch("/api/upload", { method: "POST", body });
  const json = await response.json();
  if (!response.ok) {
    result.textContent = "Upload failed: " + json.detail;
    return;
  }
  result.innerHTML = "";
  const link = document.createElement("a");
  link.href = "/papers/" + json.paperId;
  link.textContent = json.message + " in " + json.processingTime + "s. View paper";
  result.appendChild(link);
});
</script>
</body>
</html>
"#;

pub fn error_page(status: StatusCode, detail: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{code}</title>\n</head>\n<body>\n<h1>{code}</h1>\n<p class=\"error-detail\">{detail}</p>\n<p><a href=\"/\">Upload a paper</a></p>\n</body>\n</html>\n",
        code = status,
        detail = escape_html(detail)
    )
}
