use serde::{Deserialize, Serialize};

use crate::validation::{ValidationErrors, Validator};

const MAX_TAGS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub author_id: String,
    pub author_name: String,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub answer_count: u32,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub id: String,
    pub question_id: String,
    pub author_id: String,
    pub author_name: String,
    pub content: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionInput {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl QuestionInput {
    /// Trim tags, drop empty ones and duplicates, keep first-seen order.
    pub fn normalized(mut self) -> Self {
        let mut seen = Vec::with_capacity(self.tags.len());
        for tag in self.tags.drain(..) {
            let tag = tag.trim().trim_start_matches('#').to_lowercase();
            if !tag.is_empty() && !seen.contains(&tag) {
                seen.push(tag);
            }
        }
        self.tags = seen;
        self
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        v.required("title", &self.title).required("content", &self.content);
        if self.tags.len() > MAX_TAGS {
            v.reject("tags", format!("at most {MAX_TAGS} tags are allowed"));
        }
        v.finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerInput {
    pub content: String,
}

impl AnswerInput {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        v.required("content", &self.content);
        v.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_are_normalized() {
        let input = QuestionInput {
            title: "Kedim yemek yemiyor".to_string(),
            content: "İki gündür...".to_string(),
            tags: vec![" Kedi ".into(), "#beslenme".into(), "kedi".into(), "".into()],
        }
        .normalized();
        assert_eq!(input.tags, vec!["kedi".to_string(), "beslenme".to_string()]);
    }
}
