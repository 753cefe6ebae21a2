//! Error types shared by selection, analysis and rendering.

use thiserror::Error;

/// Generic text shown when a failure carries nothing better to say
pub const GENERIC_ERROR_MESSAGE: &str = "Не удалось проанализировать фото. Попробуйте ещё раз.";

/// Application-level errors
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Unsupported file type: {content_type}")]
    InvalidFileType { content_type: String },

    #[error("No image selected")]
    NoSelection,

    #[error("An analysis is already running")]
    Busy,

    #[error("Network error: {0}")]
    Network(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("Bad response: {0}")]
    BadResponse(String),

    #[error("File processing error: {0}")]
    FileProcessing(String),
}

impl AppError {
    /// Text for the blocking notice shown to the user.
    ///
    /// Server-reported failures pass their own text through; transport and
    /// decoding failures only expose the generic fallback, their detail goes
    /// to the log.
    pub fn user_message(&self) -> String {
        match self {
            AppError::InvalidFileType { .. } => {
                "Пожалуйста, выберите изображение (JPG, PNG, WebP и т.п.)".to_string()
            }
            AppError::NoSelection => "Сначала выберите фото блюда".to_string(),
            AppError::Busy => "Анализ уже выполняется".to_string(),
            AppError::Api(message) if !message.trim().is_empty() => message.clone(),
            AppError::FileProcessing(message) => format!("Не удалось прочитать файл: {message}"),
            AppError::Api(_) | AppError::Network(_) | AppError::BadResponse(_) => {
                GENERIC_ERROR_MESSAGE.to_string()
            }
        }
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_errors_surface_server_text() {
        let error = AppError::Api("server error".to_string());
        assert_eq!(error.user_message(), "server error");
    }

    #[test]
    fn blank_api_text_falls_back() {
        let error = AppError::Api("   ".to_string());
        assert_eq!(error.user_message(), GENERIC_ERROR_MESSAGE);
    }

    #[test]
    fn transport_details_stay_out_of_the_notice() {
        let error = AppError::Network("connection refused (os error 111)".to_string());
        assert_eq!(error.user_message(), GENERIC_ERROR_MESSAGE);
        assert!(error.to_string().contains("connection refused"));
    }
}
