#[derive(serde::Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

#[derive(serde::Serialize, serde::Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(serde::Serialize, serde::Deserialize)]
pub struct Part {
    #[serde(default)]
    pub text: String,
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
    #[serde(default)]
    pub error: Option<ApiError>,
}

#[derive(serde::Deserialize)]
pub struct Candidate {
    pub content: Option<Content>,
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    pub block_reason: Option<String>,
}

#[derive(serde::Deserialize)]
pub struct ApiError {
    pub message: String,
}
