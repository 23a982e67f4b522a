use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Attendance service domain error variants.
///
/// Display strings are the client-facing Spanish messages; invalid-code and
/// not-found cases are deliberately vague (anti-enumeration).
#[derive(Debug, thiserror::Error)]
pub enum AttendanceServiceError {
    #[error("El RUT es requerido.")]
    MissingRut,
    #[error("El RUT y el código son requeridos.")]
    MissingCredentials,
    #[error("Código inválido o expirado.")]
    InvalidLoginCode,
    #[error("Visita no encontrada.")]
    VisitNotFound,
    #[error("ID de visita inválido.")]
    InvalidVisitId,
    #[error("Las coordenadas (lat, lng) son requeridas.")]
    MissingCoordinates,
    #[error("Fecha inválida.")]
    InvalidDate,
    #[error("Error al procesar la solicitud.")]
    Internal(#[from] anyhow::Error),
}

impl AttendanceServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingRut => "MISSING_RUT",
            Self::MissingCredentials => "MISSING_CREDENTIALS",
            Self::InvalidLoginCode => "INVALID_LOGIN_CODE",
            Self::VisitNotFound => "VISIT_NOT_FOUND",
            Self::InvalidVisitId => "INVALID_VISIT_ID",
            Self::MissingCoordinates => "MISSING_COORDINATES",
            Self::InvalidDate => "INVALID_DATE",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for AttendanceServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::MissingRut
            | Self::MissingCredentials
            | Self::InvalidVisitId
            | Self::MissingCoordinates
            | Self::InvalidDate => StatusCode::BAD_REQUEST,
            Self::InvalidLoginCode => StatusCode::UNAUTHORIZED,
            Self::VisitNotFound => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Only 500s carry an anyhow chain worth logging; TraceLayer already
        // records method/uri/status for every request.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "ok": false,
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
