//! Axum integration utilities.
//!
//! The identity provider runs earlier in the stack and inserts an
//! [`Identity`] into request extensions; [`AuthorizeLayer`] then gates the
//! route on a [`Requirement`].

use std::future::poll_fn;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use crate::engine::Engine;
use crate::identity::Identity;
use crate::permission::Permission;
use crate::role::Role;

use ::axum::body::Body;
use ::axum::http::{Request, StatusCode};
use ::axum::response::{IntoResponse, Response};
use ::tower::{Layer, Service};

/// What a guarded route demands from the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// Caller must hold the permission.
    Permission(Permission),
    /// Caller's role must reach the level of the role.
    RoleLevel(Role),
}

impl Requirement {
    fn is_met(self, engine: &Engine, identity: &Identity) -> bool {
        match self {
            Requirement::Permission(permission) => engine.can(Some(identity), permission),
            Requirement::RoleLevel(role) => engine.has_role_level(Some(identity), role),
        }
    }
}

/// Middleware layer that authorizes a request using [`Engine`].
#[derive(Debug, Clone)]
pub struct AuthorizeLayer {
    engine: Arc<Engine>,
    requirement: Requirement,
}

impl AuthorizeLayer {
    /// Creates a new authorization layer.
    pub fn new(engine: Arc<Engine>, requirement: Requirement) -> Self {
        Self {
            engine,
            requirement,
        }
    }

    /// Layer requiring a permission.
    pub fn permission(engine: Arc<Engine>, permission: Permission) -> Self {
        Self::new(engine, Requirement::Permission(permission))
    }

    /// Layer requiring a minimum role level.
    pub fn role_level(engine: Arc<Engine>, role: Role) -> Self {
        Self::new(engine, Requirement::RoleLevel(role))
    }
}

impl<Inner> Layer<Inner> for AuthorizeLayer {
    type Service = AuthorizeService<Inner>;

    fn layer(&self, inner: Inner) -> Self::Service {
        AuthorizeService {
            inner,
            engine: self.engine.clone(),
            requirement: self.requirement,
        }
    }
}

/// Middleware service that enforces a [`Requirement`].
#[derive(Debug, Clone)]
pub struct AuthorizeService<Inner> {
    inner: Inner,
    engine: Arc<Engine>,
    requirement: Requirement,
}

impl<Inner> Service<Request<Body>> for AuthorizeService<Inner>
where
    Inner: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    Inner::Future: Send + 'static,
{
    type Response = Response;
    type Error = Inner::Error;
    type Future = Pin<Box<dyn std::future::Future<Output = Result<Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let mut inner = self.inner.clone();
        let engine = self.engine.clone();
        let requirement = self.requirement;

        Box::pin(async move {
            match req.extensions().get::<Identity>() {
                None => {
                    tracing::debug!(?requirement, "rejecting request without identity");
                    return Ok((StatusCode::UNAUTHORIZED, "missing identity").into_response());
                }
                Some(identity) if !requirement.is_met(&engine, identity) => {
                    tracing::debug!(user = %identity.id, ?requirement, "rejecting request");
                    return Ok((StatusCode::FORBIDDEN, "forbidden").into_response());
                }
                Some(_) => {}
            }

            poll_fn(|cx| inner.poll_ready(cx)).await?;
            inner.call(req).await
        })
    }
}
