//! The single-page upload form.

use axum::{response::Html, routing::get, Router};

use crate::server::GatewayState;

/// Returns a router that serves the form at `/`.
pub fn ui_router() -> Router<GatewayState> {
    Router::new().route("/", get(|| async { Html(INDEX_HTML) }))
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<title>Classroom Whiteboard to Structured Notes</title>
<style>
body { font-family: system-ui, sans-serif; max-width: 800px; margin: 2rem auto; padding: 0 1rem; color: #1f2937; }
label { display: block; font-weight: 600; margin: 1rem 0 0.25rem; }
button { margin-top: 1rem; padding: 0.5rem 1.25rem; font-size: 1rem; cursor: pointer; }
#notes { background: #f3f4f6; border-radius: 8px; padding: 0.75rem 1rem; min-height: 4rem; white-space: pre-wrap; overflow-x: auto; }
#status { width: 100%; padding: 0.4rem; box-sizing: border-box; }
</style>
</head>
<body>
<h1>Classroom Whiteboard &rarr; Structured Notes</h1>
<p>Upload a photo of a lecture whiteboard. The board is analyzed by a vision
model and turned into structured study notes and flashcards.</p>

<form id="upload-form">
  <label for="image">Whiteboard photo</label>
  <input id="image" name="image" type="file" accept="image/*">
  <button type="submit">Analyze whiteboard</button>
</form>

<label for="notes">Structured notes</label>
<pre id="notes"></pre>

<label for="status">Status</label>
<input id="status" type="text" readonly>

<script>
document.getElementById("upload-form").addEventListener("submit", async (event) => {
  event.preventDefault();
  const form = new FormData(event.target);
  const notes = document.getElementById("notes");
  const status = document.getElementById("status");
  notes.textContent = "";
  status.value = "Analyzing...";
  try {
    const response = await fetch("/api/analyze", { method: "POST", body: form });
    const body = await response.json();
    if (response.ok) {
      notes.textContent = JSON.stringify(body.result, null, 2);
    }
    status.value = body.status;
  } catch (err) {
    status.value = "Analysis failed: " + err;
  }
});
</script>
</body>
</html>
"#;
