use thiserror::Error;

#[derive(Debug, Error)]
/// Ошибки клиентской библиотеки `feed-client`.
pub enum FeedClientError {
    /// Ошибка HTTP-транспорта (`reqwest`).
    #[cfg(feature = "http")]
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Сервер ответил не-2xx статусом; `message` взят из тела ответа.
    #[error("api error {status}: {message}")]
    Api {
        /// HTTP-статус ответа.
        status: u16,
        /// Сообщение сервера (или описание статуса, если тело не разобрано).
        message: String,
    },

    /// Запрошенный ресурс не найден.
    #[error("not found: {0}")]
    NotFound(String),

    /// Строка не является корректной датой.
    #[error("invalid date string provided: {0:?}")]
    InvalidDate(String),

    /// Некорректный запрос (не прошёл клиентскую валидацию).
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// Результат операций `feed-client`.
pub type FeedClientResult<T> = Result<T, FeedClientError>;

impl FeedClientError {
    /// Строит ошибку по HTTP-статусу и (опционально) сообщению из тела ответа.
    pub fn from_http_status(status: u16, message: Option<String>) -> Self {
        let message = message
            .filter(|message| !message.trim().is_empty())
            .unwrap_or_else(|| format!("http status {status}"));

        match status {
            404 => Self::NotFound(message),
            _ => Self::Api { status, message },
        }
    }

    /// Сообщение, пригодное для показа пользователю.
    pub fn user_message(&self) -> String {
        match self {
            Self::Api { message, .. } | Self::NotFound(message) => message.clone(),
            other => other.to_string(),
        }
    }
}

impl From<validator::ValidationErrors> for FeedClientError {
    fn from(value: validator::ValidationErrors) -> Self {
        Self::InvalidRequest(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_http_status_keeps_server_message() {
        let err = FeedClientError::from_http_status(400, Some("Invalid limit".to_string()));
        match err {
            FeedClientError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Invalid limit");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn from_http_status_falls_back_to_status_text() {
        let err = FeedClientError::from_http_status(502, Some("   ".to_string()));
        assert_eq!(err.user_message(), "http status 502");
    }

    #[test]
    fn from_http_status_maps_404_to_not_found() {
        let err = FeedClientError::from_http_status(404, None);
        assert!(matches!(err, FeedClientError::NotFound(_)));
    }
}
