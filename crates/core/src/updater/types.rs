use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A requested edit as submitted by the UI. Fields are optional so that
/// incomplete items can be reported instead of rejecting the whole request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VideoEdit {
    #[serde(default)]
    pub video_id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl VideoEdit {
    /// Read an edit from arbitrary JSON. String fields are kept; anything
    /// else (missing, null, numbers, a non-object item) counts as absent, so a
    /// malformed item fails on its own instead of rejecting its batch.
    pub fn from_value(value: &Value) -> Self {
        let text = |key: &str| value.get(key).and_then(Value::as_str).map(String::from);
        Self {
            video_id: text("video_id"),
            title: text("title"),
            description: text("description"),
        }
    }

    /// `(video_id, title, description)` when the id is non-empty and both
    /// text fields are present. Empty text is allowed.
    pub fn validated(&self) -> Option<(&str, &str, &str)> {
        let video_id = self.video_id.as_deref().filter(|id| !id.is_empty())?;
        Some((video_id, self.title.as_deref()?, self.description.as_deref()?))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchSuccess {
    pub video_id: String,
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchFailure {
    pub video_id: Option<String>,
    pub error: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchResults {
    pub successful: Vec<BatchSuccess>,
    pub failed: Vec<BatchFailure>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
}

/// Outcome of a batch; `success` is true when at least one edit went through.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub success: bool,
    pub results: BatchResults,
    pub summary: BatchSummary,
}

impl BatchReport {
    pub fn new(total: usize, results: BatchResults) -> Self {
        let summary = BatchSummary {
            total,
            successful: results.successful.len(),
            failed: results.failed.len(),
        };
        Self {
            success: summary.successful > 0,
            results,
            summary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validated_requires_presence_not_content() {
        let edit: VideoEdit =
            serde_json::from_str(r#"{"video_id": "v1", "title": "", "description": ""}"#).unwrap();
        assert_eq!(edit.validated(), Some(("v1", "", "")));

        let missing: VideoEdit =
            serde_json::from_str(r#"{"video_id": "v1", "description": "d"}"#).unwrap();
        assert_eq!(missing.validated(), None);

        let null_title: VideoEdit =
            serde_json::from_str(r#"{"video_id": "v1", "title": null, "description": "d"}"#)
                .unwrap();
        assert_eq!(null_title.validated(), None);

        let empty_id: VideoEdit =
            serde_json::from_str(r#"{"video_id": "", "title": "t", "description": "d"}"#).unwrap();
        assert_eq!(empty_id.validated(), None);
    }

    #[test]
    fn test_from_value_is_lenient() {
        let edit = VideoEdit::from_value(&serde_json::json!({
            "video_id": "v1",
            "title": 5,
            "description": "d"
        }));
        assert_eq!(edit.video_id.as_deref(), Some("v1"));
        assert!(edit.title.is_none());
        assert_eq!(edit.validated(), None);

        let edit = VideoEdit::from_value(&serde_json::json!("not an object"));
        assert!(edit.video_id.is_none());

        let edit = VideoEdit::from_value(&serde_json::json!({
            "video_id": "v2",
            "title": "",
            "description": ""
        }));
        assert_eq!(edit.validated(), Some(("v2", "", "")));
    }

    #[test]
    fn test_report_serialization_shape() {
        let report = BatchReport::new(
            2,
            BatchResults {
                successful: vec![BatchSuccess {
                    video_id: "v2".to_string(),
                    title: "T".to_string(),
                }],
                failed: vec![BatchFailure {
                    video_id: None,
                    error: "Missing required fields".to_string(),
                }],
            },
        );
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["summary"]["total"], 2);
        assert_eq!(value["results"]["successful"][0]["video_id"], "v2");
        assert!(value["results"]["failed"][0]["video_id"].is_null());
    }
}
