//! Submissions transcript

use jiff::Timestamp;
use jiff::fmt::strtime;

use crate::{contact::ContactSubmission, projection};

/// A downloadable plain-text file, handed to the shell to save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptFile {
    /// Date-stamped file name, e.g. `contact-submissions-2025-06-07.txt`
    pub filename: String,

    /// Plain-text file body
    pub content: String,
}

/// Render the submission log collected so far into a transcript file.
///
/// Returns `None` when nothing has been submitted yet.
#[must_use]
pub fn render(submissions: &[ContactSubmission], now: Timestamp) -> Option<TranscriptFile> {
    if submissions.is_empty() {
        return None;
    }

    let mut content = String::new();
    content.push_str("Stock Insight - Contact Form Submissions\n");
    content.push_str(&"=".repeat(50));
    content.push_str("\n\n");

    for (index, submission) in submissions.iter().enumerate() {
        content.push_str(&format!("Submission #{}\n", index + 1));
        content.push_str(&"-".repeat(30));
        content.push('\n');
        content.push_str(&format!(
            "Date & Time: {}\n",
            projection::format_ist(submission.submitted_at)
        ));
        content.push_str(&format!("Name: {}\n", submission.name));
        content.push_str(&format!("Email: {}\n", submission.email));
        content.push_str(&format!(
            "Mobile: {}\n",
            submission.mobile.as_deref().unwrap_or("-")
        ));
        content.push_str(&format!("Message: {}\n", submission.message));
        content.push('\n');
    }

    Some(TranscriptFile {
        filename: filename(now),
        content,
    })
}

fn filename(now: Timestamp) -> String {
    let zoned = projection::ist_zoned(now);
    let date = strtime::format("%Y-%m-%d", &zoned).unwrap_or_else(|_| zoned.date().to_string());

    format!("contact-submissions-{date}.txt")
}
