//! Admin gate for back-office endpoints. The service does not manage
//! credentials: it only checks that requests carry the externally-issued
//! bearer token configured via `ADMIN_API_TOKEN`.

use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{web, FromRequest, HttpRequest};
use std::future::{ready, Ready};

use crate::errors::AppError;

/// The shared admin bearer token, injected as app data at server build time.
#[derive(Clone)]
pub struct AdminToken(pub String);

/// Extractor proving the request was made by an admin. Add it to a handler
/// signature to gate the endpoint.
pub struct AdminUser;

impl FromRequest for AdminUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let expected = req.app_data::<web::Data<AdminToken>>();
        let presented = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "));

        let authorized = matches!(
            (expected, presented),
            (Some(expected), Some(presented)) if !expected.0.is_empty() && presented == expected.0
        );

        ready(if authorized {
            Ok(AdminUser)
        } else {
            Err(AppError::Unauthorized)
        })
    }
}

#[cfg(test)]
mod tests {
    use actix_web::test::TestRequest;

    use super::*;

    fn request(header_value: Option<&str>) -> HttpRequest {
        let mut req = TestRequest::default().app_data(web::Data::new(AdminToken("sekrit".to_string())));
        if let Some(value) = header_value {
            req = req.insert_header((header::AUTHORIZATION, value));
        }
        req.to_http_request()
    }

    #[actix_web::test]
    async fn valid_token_is_accepted() {
        let req = request(Some("Bearer sekrit"));
        assert!(AdminUser::from_request(&req, &mut Payload::None).await.is_ok());
    }

    #[actix_web::test]
    async fn wrong_token_is_rejected() {
        let req = request(Some("Bearer nope"));
        assert!(AdminUser::from_request(&req, &mut Payload::None).await.is_err());
    }

    #[actix_web::test]
    async fn missing_header_is_rejected() {
        let req = request(None);
        assert!(AdminUser::from_request(&req, &mut Payload::None).await.is_err());
    }

    #[actix_web::test]
    async fn empty_configured_token_rejects_everything() {
        let req = TestRequest::default()
            .app_data(web::Data::new(AdminToken(String::new())))
            .insert_header((header::AUTHORIZATION, "Bearer "))
            .to_http_request();
        assert!(AdminUser::from_request(&req, &mut Payload::None).await.is_err());
    }
}
