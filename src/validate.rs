// Boundary checks for user-entered drafts, mirroring the server's rules.
// A draft that fails here is never sent.

use crate::error::Error;
use crate::models::{AnnouncementDraft, QuizDraft};

pub fn announcement(draft: &AnnouncementDraft) -> Result<(), Error> {
    let mut problems = Vec::new();
    min_len(&mut problems, "Title", &draft.title, 3);
    min_len(&mut problems, "Author", &draft.author, 3);
    min_len(&mut problems, "Course", &draft.course, 2);
    min_len(&mut problems, "Content", &draft.content, 10);
    finish(problems)
}

pub fn quiz(draft: &QuizDraft) -> Result<(), Error> {
    let mut problems = Vec::new();
    min_len(&mut problems, "Title", &draft.title, 3);
    min_len(&mut problems, "Course", &draft.course, 2);
    min_len(&mut problems, "Topic", &draft.topic, 3);
    min_len(&mut problems, "Contact", &draft.contact, 3);
    finish(problems)
}

fn min_len(problems: &mut Vec<String>, field: &str, value: &str, min: usize) {
    if value.chars().count() < min {
        problems.push(format!("{field} must be at least {min} characters"));
    }
}

fn finish(problems: Vec<String>) -> Result<(), Error> {
    if problems.is_empty() {
        Ok(())
    } else {
        Err(Error::Validation(problems))
    }
}
