//! FAQ data model.

use serde::{Deserialize, Serialize};

/// One canned question/category/answer record in the knowledge base.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqEntry {
    pub question: String,
    pub category: String,
    pub answer: String,
}

impl FaqEntry {
    pub fn new(
        question: impl Into<String>,
        category: impl Into<String>,
        answer: impl Into<String>,
    ) -> Self {
        Self {
            question: question.into(),
            category: category.into(),
            answer: answer.into(),
        }
    }

    /// Render the entry as the user-facing chatbot reply: `"[<category>] <answer>"`.
    pub fn formatted_answer(&self) -> String {
        format!("[{}] {}", self.category, self.answer)
    }
}
