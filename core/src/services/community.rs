use crate::client::ApiClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::mapper::{self, BackendAnswer, BackendQuestion};
use crate::services::{list_or_empty, one_or_none};
use crate::types::{Answer, AnswerInput, Question, QuestionInput};

const QUESTIONS: &str = "/community/questions";

/// Community Q&A.
#[derive(Debug, Clone, Copy)]
pub struct CommunityService<'a> {
    api: &'a ApiClient,
}

impl<'a> CommunityService<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    pub fn build_list_questions(&self) -> HttpRequest {
        self.api.build_get(QUESTIONS)
    }

    /// Filtered by tag on the server when `tag` is non-blank.
    pub fn build_list_questions_tagged(&self, tag: &str) -> HttpRequest {
        self.api.build_get_with_query(QUESTIONS, &[("tag", tag)])
    }

    pub fn parse_list_questions(&self, response: HttpResponse) -> Vec<Question> {
        let result = self
            .api
            .parse_payload(response)
            .and_then(mapper::records::<BackendQuestion, Question>);
        list_or_empty(QUESTIONS, result)
    }

    pub fn build_get_question(&self, id: &str) -> HttpRequest {
        self.api.build_get(&format!("{QUESTIONS}/{id}"))
    }

    pub fn parse_get_question(&self, response: HttpResponse) -> Option<Question> {
        let result = self
            .api
            .parse_payload(response)
            .and_then(mapper::record::<BackendQuestion, Question>);
        one_or_none("/community/questions/{id}", result)
    }

    /// Tags are normalized before validation.
    pub fn build_create_question(&self, input: &QuestionInput) -> Result<HttpRequest, ApiError> {
        let input = input.clone().normalized();
        input.validate()?;
        self.api.build_post(QUESTIONS, &input)
    }

    pub fn parse_create_question(&self, response: HttpResponse) -> Result<Question, ApiError> {
        mapper::record::<BackendQuestion, Question>(self.api.parse_payload(response)?)
    }

    pub fn build_delete_question(&self, id: &str) -> HttpRequest {
        self.api.build_delete(&format!("{QUESTIONS}/{id}"))
    }

    pub fn parse_delete_question(&self, response: HttpResponse) -> Result<(), ApiError> {
        self.api.parse_payload(response).map(|_| ())
    }

    pub fn build_list_answers(&self, question_id: &str) -> HttpRequest {
        self.api.build_get(&format!("{QUESTIONS}/{question_id}/answers"))
    }

    pub fn parse_list_answers(&self, question_id: &str, response: HttpResponse) -> Vec<Answer> {
        let result = self
            .api
            .parse_payload(response)
            .and_then(|payload| mapper::answers(question_id, payload));
        list_or_empty("/community/questions/{id}/answers", result)
    }

    pub fn build_create_answer(&self, question_id: &str, input: &AnswerInput) -> Result<HttpRequest, ApiError> {
        input.validate()?;
        self.api.build_post(&format!("{QUESTIONS}/{question_id}/answers"), input)
    }

    pub fn parse_create_answer(&self, question_id: &str, response: HttpResponse) -> Result<Answer, ApiError> {
        let payload = self.api.parse_payload(response)?;
        let backend: BackendAnswer =
            serde_json::from_value(payload).map_err(|e| ApiError::Deserialization(e.to_string()))?;
        Ok(mapper::answer(question_id, backend))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ApiClient {
        ApiClient::with_base_url("http://localhost:3000")
    }

    #[test]
    fn create_question_sends_normalized_tags() {
        let input = QuestionInput {
            title: "Mama önerisi".to_string(),
            content: "Yavru kedi için?".to_string(),
            tags: vec!["#Kedi".to_string(), "kedi".to_string()],
        };
        let req = client().community().build_create_question(&input).unwrap();
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["tags"], serde_json::json!(["kedi"]));
    }

    #[test]
    fn empty_answer_is_blocked() {
        let err = client()
            .community()
            .build_create_answer("q1", &AnswerInput { content: "\n".to_string() })
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn answers_take_question_id_from_path() {
        let body = r#"[{"_id":"a1","content":"Veterinere götürün","authorName":"Ece"}]"#;
        let answers = client()
            .community()
            .parse_list_answers("q7", HttpResponse::new(200, body));
        assert_eq!(answers[0].question_id, "q7");
        assert_eq!(answers[0].author_name, "Ece");
    }

    #[test]
    fn tagged_listing_uses_query() {
        let req = client().community().build_list_questions_tagged("kedi");
        assert_eq!(req.url, "http://localhost:3000/community/questions?tag=kedi");
    }
}
