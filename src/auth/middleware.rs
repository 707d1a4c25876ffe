use std::rc::Rc;

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    web, Error, HttpMessage,
};
use futures::future::{ready, LocalBoxFuture, Ready};

use crate::auth::identity::IdentityResolver;
use crate::auth::token::TokenKind;
use crate::error::AppError;

/// Bearer-token middleware for protected scopes.
///
/// Pulls the `Authorization: Bearer <token>` header, resolves it to a user via
/// [`IdentityResolver`] (signature, expiry, token type, subject lookup), and
/// stores the resolved `User` in request extensions for the `CurrentUser`
/// extractor. Paths under the exempt prefixes stay reachable without a token;
/// the prefixes are supplied at construction, so the middleware carries no
/// assumption about where the scope is mounted.
pub struct AuthMiddleware {
    exempt_prefixes: Rc<Vec<String>>,
}

impl AuthMiddleware {
    /// Creates the middleware with the request-path prefixes that skip
    /// authentication, written as the client sends them (mount point
    /// included), e.g. `/api/v1/auth/` for the login and signup routes.
    pub fn exempting(prefixes: &[&str]) -> Self {
        Self {
            exempt_prefixes: Rc::new(prefixes.iter().map(|p| p.to_string()).collect()),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
            exempt_prefixes: Rc::clone(&self.exempt_prefixes),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    // Rc because identity resolution awaits a storage lookup, so the inner
    // service must move into the response future.
    service: Rc<S>,
    exempt_prefixes: Rc<Vec<String>>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // Signup and login must be reachable without a token.
        if self
            .exempt_prefixes
            .iter()
            .any(|prefix| req.path().starts_with(prefix.as_str()))
        {
            let fut = self.service.call(req);
            return Box::pin(fut);
        }

        let service = Rc::clone(&self.service);
        Box::pin(async move {
            let token = req
                .headers()
                .get("Authorization")
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.strip_prefix("Bearer "))
                .map(str::to_owned)
                .ok_or_else(|| AppError::Unauthorized("Missing bearer token".into()))?;

            let resolver = req
                .app_data::<web::Data<IdentityResolver>>()
                .cloned()
                .ok_or_else(|| {
                    AppError::InternalServerError("Identity resolver is not configured".into())
                })?;

            let user = resolver.resolve(&token, TokenKind::Access).await?;
            req.extensions_mut().insert(user);

            service.call(req).await
        })
    }
}
