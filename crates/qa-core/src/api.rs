//! Request payloads and response envelopes at the service boundary
//!
//! Every operation returns an [`ApiResponse`]; errors never escape as
//! `Err`. Payload field names follow the legacy HTTP API.

use crate::error::{ErrorKind, QaError, Result};
use crate::service::CommentService;
use crate::tree::CommentNode;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Payload for adding a comment or reply
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddCommentRequest {
    #[serde(default)]
    pub expert: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    /// Parent comment id, `"-1"` for a top-level comment
    #[serde(default)]
    pub parent_id: Option<String>,
}

impl AddCommentRequest {
    pub fn new(expert: Option<&str>, author: &str, text: &str, parent_id: &str) -> Self {
        Self {
            expert: expert.map(String::from),
            author: Some(author.to_string()),
            text: Some(text.to_string()),
            parent_id: Some(parent_id.to_string()),
        }
    }
}

/// Payload for editing a comment
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCommentRequest {
    #[serde(default)]
    pub update_id: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

/// Payload for like and dislike
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VoteRequest {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
}

/// Payload for deleting a comment
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeleteCommentRequest {
    #[serde(default)]
    pub id: Option<String>,
}

/// Failure details
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub message: String,
    pub kind: ErrorKind,
}

impl From<&QaError> for ApiError {
    fn from(err: &QaError) -> Self {
        Self {
            message: err.to_string(),
            kind: err.kind(),
        }
    }
}

/// `{success, data?, error?}` envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}

impl<T> ApiResponse<T> {
    /// Success carrying `data`
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Success with no payload
    pub fn empty() -> Self {
        Self {
            success: true,
            data: None,
            error: None,
        }
    }

    /// Failure built from an error
    pub fn failure(err: &QaError) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ApiError::from(err)),
        }
    }

    /// Error kind of a failed response
    pub fn error_kind(&self) -> Option<ErrorKind> {
        self.error.as_ref().map(|e| e.kind)
    }
}

fn respond<T>(operation: &str, result: Result<T>) -> ApiResponse<T> {
    match result {
        Ok(data) => ApiResponse::ok(data),
        Err(err) => {
            warn!("{} failed: {}", operation, err);
            ApiResponse::failure(&err)
        }
    }
}

fn respond_empty<T>(operation: &str, result: Result<T>) -> ApiResponse<()> {
    match result {
        Ok(_) => ApiResponse::empty(),
        Err(err) => {
            warn!("{} failed: {}", operation, err);
            ApiResponse::failure(&err)
        }
    }
}

/// Envelope-returning front of [`CommentService`]
pub struct CommentApi {
    service: CommentService,
}

impl CommentApi {
    pub fn new(service: CommentService) -> Self {
        Self { service }
    }

    /// Get the wrapped service
    pub fn service(&self) -> &CommentService {
        &self.service
    }

    pub fn add_comment(&self, req: &AddCommentRequest) -> ApiResponse<()> {
        respond_empty("addComment", self.service.add_comment(req))
    }

    pub fn update_comment(&self, req: &UpdateCommentRequest) -> ApiResponse<()> {
        respond_empty("updateComment", self.service.update_comment(req))
    }

    pub fn like_comment(&self, req: &VoteRequest) -> ApiResponse<()> {
        respond_empty("likeComment", self.service.like_comment(req))
    }

    pub fn dislike_comment(&self, req: &VoteRequest) -> ApiResponse<()> {
        respond_empty("dislikeComment", self.service.dislike_comment(req))
    }

    pub fn delete_comment(&self, req: &DeleteCommentRequest) -> ApiResponse<()> {
        respond_empty("deleteComment", self.service.delete_comment(req))
    }

    pub fn get_comments(&self, expert_slug: &str) -> ApiResponse<Vec<CommentNode>> {
        respond("getComments", self.service.get_comments(expert_slug))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{MemoryProfiles, Profile};
    use crate::store::memory::MemoryCommentStore;
    use crate::store::CommentStore;
    use serde_json::json;

    fn api() -> CommentApi {
        let profiles: MemoryProfiles = [Profile::new("u1").with_name("Ada").with_image("ada.png")]
            .into_iter()
            .collect();
        CommentApi::new(CommentService::new(MemoryCommentStore::new(), profiles))
    }

    #[test]
    fn test_add_success_has_no_payload() {
        let api = api();
        let req: AddCommentRequest =
            serde_json::from_value(json!({"expert": "e1", "author": "u1", "text": "hi", "parentId": "-1"}))
                .unwrap();

        let resp = api.add_comment(&req);
        assert_eq!(serde_json::to_value(&resp).unwrap(), json!({"success": true}));
    }

    #[test]
    fn test_validation_failure_envelope() {
        let api = api();
        let req: AddCommentRequest =
            serde_json::from_value(json!({"expert": "e1", "text": "hi", "parentId": "-1"})).unwrap();

        let resp = api.add_comment(&req);
        assert!(!resp.success);
        assert_eq!(resp.error_kind(), Some(ErrorKind::ValidationError));

        let value = serde_json::to_value(&resp).unwrap();
        assert_eq!(value["error"]["kind"], "ValidationError");
        assert!(value["error"]["message"].as_str().unwrap().contains("author"));
        assert!(value.get("data").is_none());
    }

    #[test]
    fn test_not_found_envelope() {
        let api = api();
        let req: VoteRequest = serde_json::from_value(json!({"id": "c1", "author": "u2"})).unwrap();
        let resp = api.like_comment(&req);
        assert_eq!(resp.error_kind(), Some(ErrorKind::NotFound));
    }

    #[test]
    fn test_update_payload_field_names() {
        let req: UpdateCommentRequest =
            serde_json::from_value(json!({"updateId": "abc", "text": "new"})).unwrap();
        assert_eq!(req.update_id.as_deref(), Some("abc"));
    }

    #[test]
    fn test_get_comments_envelope() {
        let api = api();
        api.add_comment(&AddCommentRequest::new(Some("e1"), "u1", "hi", "-1"));

        let value = serde_json::to_value(api.get_comments("e1")).unwrap();
        assert_eq!(value["success"], true);
        let node = &value["data"][0];
        assert_eq!(node["text"], "hi");
        assert_eq!(node["authorId"], "u1");
        assert_eq!(node["authorName"], "Ada");
        assert_eq!(node["profileImage"], "ada.png");
        assert_eq!(node["answers"], json!([]));
    }

    #[test]
    fn test_like_twice_through_envelope() {
        let api = api();
        let id = api
            .service()
            .add_comment(&AddCommentRequest::new(Some("e1"), "u1", "hi", "-1"))
            .unwrap();
        let req = VoteRequest {
            id: Some(id.to_string()),
            author: Some("u2".to_string()),
        };

        assert!(api.like_comment(&req).success);
        let voters = serde_json::to_value(api.service().store().find_by_id(&id).unwrap().voters).unwrap();
        assert_eq!(voters, json!([{"slug": "u2"}]));

        assert!(api.like_comment(&req).success);
        let voters = serde_json::to_value(api.service().store().find_by_id(&id).unwrap().voters).unwrap();
        assert_eq!(voters, json!([]));
    }

    #[test]
    fn test_storage_fault_envelope() {
        let err = QaError::Storage("disk full".to_string());
        let resp: ApiResponse<()> = ApiResponse::failure(&err);
        assert_eq!(resp.error_kind(), Some(ErrorKind::StorageError));
        assert!(resp.error.unwrap().message.contains("disk full"));
    }
}
