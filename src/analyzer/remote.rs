use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};

use super::Analyzer;
use crate::config::Config;
use crate::error::{AppError, AppResult, GENERIC_ERROR_MESSAGE};
use crate::models::{AnalysisResult, AnalyzeResponse, HealthResponse};
use crate::selection::SelectedImage;

/// Multipart field the backend reads the photo from
const IMAGE_FIELD: &str = "image";

/// Client for the nutrition backend's `/analyze` endpoint
#[derive(Clone, Debug)]
pub struct RemoteAnalyzer {
    client: Client,
    config: Config,
}

impl RemoteAnalyzer {
    pub fn new(config: Config) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| AppError::Network(e.to_string()))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl Analyzer for RemoteAnalyzer {
    async fn analyze(&self, image: &SelectedImage) -> AppResult<AnalysisResult> {
        let part = Part::bytes(image.bytes.clone())
            .file_name(image.file_name.clone())
            .mime_str(&image.content_type)
            .map_err(|e| AppError::FileProcessing(e.to_string()))?;
        let form = Form::new().part(IMAGE_FIELD, part);

        let url = self.config.endpoint("analyze");
        log::info!(
            "Submitting {} ({} bytes, {}) to {}",
            image.file_name,
            image.bytes.len(),
            image.content_type,
            url
        );

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| AppError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::Network(e.to_string()))?;
        log::debug!("Analyze response {}: {}", status, body);

        interpret_response(status, &body)
    }

    async fn health(&self) -> AppResult<()> {
        let response = self
            .client
            .get(self.config.endpoint("health"))
            .send()
            .await
            .map_err(|e| AppError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AppError::Api(format!("health check returned {}", response.status())));
        }

        let health: HealthResponse = response
            .json()
            .await
            .map_err(|e| AppError::BadResponse(e.to_string()))?;

        if health.status != "ok" {
            return Err(AppError::Api(
                health.message.unwrap_or_else(|| health.status.clone()),
            ));
        }

        Ok(())
    }
}

/// Turn a raw `/analyze` reply into a result or the error the user should see.
///
/// Non-2xx replies and `success: false` bodies carry the server's `message`
/// (or `error`) text when present. A 2xx body that is not the expected JSON is
/// a [`AppError::BadResponse`].
pub fn interpret_response(status: StatusCode, body: &str) -> AppResult<AnalysisResult> {
    if !status.is_success() {
        let message = serde_json::from_str::<AnalyzeResponse>(body)
            .ok()
            .and_then(|response| response.server_message())
            .unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string());
        log::warn!("Analysis endpoint returned {}: {}", status, message);
        return Err(AppError::Api(message));
    }

    let response: AnalyzeResponse =
        serde_json::from_str(body).map_err(|e| AppError::BadResponse(e.to_string()))?;

    if !response.success {
        let message = response
            .server_message()
            .unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string());
        return Err(AppError::Api(message));
    }

    response
        .data
        .ok_or_else(|| AppError::BadResponse("success without data".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_body_yields_payload() {
        let body = r#"{"success": true, "data": {"product_name": "Salad", "calories": 180, "proteins": 5, "fats": 14, "carbs": 9}}"#;
        let result = interpret_response(StatusCode::OK, body).unwrap();
        assert_eq!(result.product_name.as_deref(), Some("Salad"));
        assert_eq!(result.calories, Some(180.0));
    }

    #[test]
    fn server_error_uses_message() {
        let result = interpret_response(StatusCode::INTERNAL_SERVER_ERROR, r#"{"message": "server error"}"#);
        match result {
            Err(AppError::Api(message)) => assert_eq!(message, "server error"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn server_error_falls_back_to_error_field() {
        let body = r#"{"error": "Файл не выбран"}"#;
        let error = interpret_response(StatusCode::BAD_REQUEST, body).unwrap_err();
        assert_eq!(error.user_message(), "Файл не выбран");
    }

    #[test]
    fn server_error_with_html_body_uses_generic_text() {
        let error = interpret_response(StatusCode::BAD_GATEWAY, "<html>502</html>").unwrap_err();
        assert_eq!(error.user_message(), GENERIC_ERROR_MESSAGE);
    }

    #[test]
    fn unsuccessful_body_without_message_uses_generic_text() {
        let error = interpret_response(StatusCode::OK, r#"{"success": false}"#).unwrap_err();
        assert_eq!(error.user_message(), GENERIC_ERROR_MESSAGE);
    }

    #[test]
    fn malformed_body_is_a_bad_response() {
        let error = interpret_response(StatusCode::OK, "not json").unwrap_err();
        assert!(matches!(error, AppError::BadResponse(_)));
        assert_eq!(error.user_message(), GENERIC_ERROR_MESSAGE);

        let error = interpret_response(StatusCode::OK, r#"{"success": true}"#).unwrap_err();
        assert!(matches!(error, AppError::BadResponse(_)));
    }
}
