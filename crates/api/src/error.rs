use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use hotelease_core::{BookingError, ValidationError};
use hotelease_frontdesk::DeskError;
use serde_json::json;
use tracing::warn;

pub(crate) fn validation_response(error: &ValidationError) -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({
            "error": error.code(),
            "title": error.title(),
            "message": error.to_string(),
            "fields": error.fields(),
        })),
    )
        .into_response()
}

pub(crate) fn not_found(code: &str, message: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": code,
            "message": message,
        })),
    )
        .into_response()
}

pub(crate) fn desk_error_response(error: DeskError) -> Response {
    match error {
        DeskError::HotelNotFound { .. } => not_found("hotel_not_found", &error.to_string()),
        DeskError::DraftNotFound(_) => not_found("booking_not_found", &error.to_string()),
        DeskError::ChatNotFound(_) => not_found("chat_not_found", &error.to_string()),
        DeskError::Invalid(invalid) | DeskError::Booking(BookingError::Invalid(invalid)) => {
            validation_response(&invalid)
        }
        DeskError::Booking(BookingError::AuthenticationRequired {
            login_path,
            redirect,
        }) => (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "authentication_required",
                "title": "Authentication required",
                "message": "Please log in or sign up to continue with your booking.",
                "redirect_to": login_path,
                "return_to": redirect,
            })),
        )
            .into_response(),
        DeskError::Booking(BookingError::InvalidTransition { step, action }) => (
            StatusCode::CONFLICT,
            Json(json!({
                "error": "invalid_transition",
                "message": format!("cannot {action} while the booking is at {step}"),
                "step": step,
            })),
        )
            .into_response(),
        DeskError::Unavailable { message, source } => {
            warn!(error = %source, "front desk operation failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "error": "unavailable",
                    "title": "Error",
                    "message": message,
                })),
            )
                .into_response()
        }
    }
}
