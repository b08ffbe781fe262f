use crate::client::ApiClient;
use crate::http::{HttpRequest, HttpResponse};
use crate::mapper;
use crate::services::list_or_empty;
use crate::types::{DirectoryEntry, DirectoryKind};

/// Veterinary clinics and pet shops. Read-only.
#[derive(Debug, Clone, Copy)]
pub struct DirectoryService<'a> {
    api: &'a ApiClient,
}

impl<'a> DirectoryService<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    pub fn build_list(&self, kind: DirectoryKind, city: Option<&str>) -> HttpRequest {
        let path = format!("/directory/{}", kind.segment());
        self.api
            .build_get_with_query(&path, &[("city", city.unwrap_or_default())])
    }

    /// Sorted by rating, best first; unrated entries last.
    pub fn parse_list(&self, kind: DirectoryKind, response: HttpResponse) -> Vec<DirectoryEntry> {
        let result = self
            .api
            .parse_payload(response)
            .and_then(|payload| mapper::directory_entries(kind, payload));
        let mut entries = list_or_empty(kind.segment(), result);
        entries.sort_by(|a, b| {
            let a = a.rating.unwrap_or(-1.0);
            let b = b.rating.unwrap_or(-1.0);
            b.total_cmp(&a)
        });
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ApiClient {
        ApiClient::with_base_url("http://localhost:3000")
    }

    #[test]
    fn city_filter_is_optional() {
        let all = client().directory().build_list(DirectoryKind::Petshop, None);
        assert_eq!(all.url, "http://localhost:3000/directory/petshops");
        let izmir = client()
            .directory()
            .build_list(DirectoryKind::Veterinarian, Some("İzmir"));
        assert_eq!(izmir.url, "http://localhost:3000/directory/veterinarians?city=%C4%B0zmir");
    }

    #[test]
    fn sorted_by_rating() {
        let body = r#"[
            {"_id":"1","name":"A","rating":3.5},
            {"_id":"2","name":"B"},
            {"_id":"3","name":"C","rating":4.9}
        ]"#;
        let entries = client()
            .directory()
            .parse_list(DirectoryKind::Veterinarian, HttpResponse::new(200, body));
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["C", "A", "B"]);
        assert_eq!(entries[0].kind, DirectoryKind::Veterinarian);
    }
}
