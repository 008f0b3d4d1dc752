use serde::{Deserialize, Serialize};

/// Form body of `POST /analyze`. The url is optional so a missing field can
/// be answered with the proper error message instead of a rejection.
#[derive(Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub url: Option<String>,
}

/// Wire shape of every analyze response, tagged on `status`.
#[derive(Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum AnalysisResponse {
    Success { data: serde_json::Value },
    Error { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_response_is_tagged() {
        let response = AnalysisResponse::Success {
            data: json!({"word_count": 120}),
        };
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["status"], "success");
        assert_eq!(value["data"]["word_count"], 120);
    }

    #[test]
    fn error_response_carries_message() {
        let response = AnalysisResponse::Error {
            message: "Invalid URL".to_string(),
        };
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["status"], "error");
        assert_eq!(value["message"], "Invalid URL");
    }
}
