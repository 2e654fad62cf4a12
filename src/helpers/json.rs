use actix_web::error::InternalError;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub(crate) struct JsonErrorResponse {
    pub(crate) status: String,
    pub(crate) code: u16,
    pub(crate) message: String,
}

impl JsonErrorResponse {
    fn new(code: StatusCode, message: &str, fallback: &str) -> Self {
        let message = if !message.trim().is_empty() {
            message.to_string()
        } else {
            fallback.to_string()
        };

        JsonErrorResponse {
            status: "Error".to_string(),
            code: code.as_u16(),
            message,
        }
    }

    fn into_error(self) -> actix_web::Error {
        let code = StatusCode::from_u16(self.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let message = self.message.clone();
        InternalError::from_response(message, HttpResponse::build(code).json(self)).into()
    }

    pub(crate) fn bad_request(message: &str) -> actix_web::Error {
        Self::new(StatusCode::BAD_REQUEST, message, "Validation error").into_error()
    }

    pub(crate) fn internal_server_error(message: &str) -> actix_web::Error {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message, "Internal error").into_error()
    }
}
