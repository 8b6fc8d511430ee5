use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::Deserialize;
use shared::errors::{ErrorCode, ServiceError};
use shared::{BearerToken, UserId};

/// Caller identity taken from an already-verified bearer token.
///
/// Signature and audience checks happen at the gateway; here only the
/// `sub` claim is read so the stores can be keyed by user.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub token: BearerToken,
}

#[derive(Debug, Deserialize)]
struct Claims {
    sub: String,
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = ServiceError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or_else(|| ServiceError::unauthorized(ErrorCode::NoTokenProvided))?;

        let header = header
            .to_str()
            .map_err(|_| ServiceError::unauthorized(ErrorCode::InvalidToken))?;

        let subject = subject_from_header(header).ok_or_else(|| {
            tracing::debug!("Rejected malformed bearer token");
            ServiceError::unauthorized(ErrorCode::InvalidToken)
        })?;

        Ok(Self {
            user_id: UserId::from_subject(&subject),
            token: BearerToken::new(header),
        })
    }
}

fn subject_from_header(header: &str) -> Option<String> {
    let (scheme, token) = header.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let mut segments = token.trim().split('.');
    let (_header, payload, _signature) = (segments.next()?, segments.next()?, segments.next()?);
    if segments.next().is_some() {
        return None;
    }

    let payload = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .ok()?;
    let claims: Claims = serde_json::from_slice(&payload).ok()?;

    if claims.sub.is_empty() {
        return None;
    }

    Some(claims.sub)
}
