//! Bearer-token extractors backed by the application's `AuthGuard`.
//!
//! `Principal` only authenticates. `Authorized<S>` also requires the scope
//! named by `S`.

use std::marker::PhantomData;
use std::ops::Deref;

use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{web, FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::auth::{AuthError, AuthGuard, Principal};
use crate::error::AppError;
use crate::logging::security;
use crate::state::app_state::AppState;

/// A scope that a handler demands through `Authorized<S>`.
pub trait ScopeRequirement {
    const SCOPE: &'static str;
}

/// Requires the `write` scope.
#[derive(Debug)]
pub struct WriteScope;

impl ScopeRequirement for WriteScope {
    const SCOPE: &'static str = "write";
}

/// An authenticated principal holding the scope `S` (or `admin`).
#[derive(Debug)]
pub struct Authorized<S: ScopeRequirement> {
    pub principal: Principal,
    _scope: PhantomData<S>,
}

impl<S: ScopeRequirement> Authorized<S> {
    pub fn into_inner(self) -> Principal {
        self.principal
    }
}

impl<S: ScopeRequirement> Deref for Authorized<S> {
    type Target = Principal;

    fn deref(&self) -> &Self::Target {
        &self.principal
    }
}

fn guard(req: &HttpRequest) -> Result<&AuthGuard, AppError> {
    req.app_data::<web::Data<AppState>>()
        .map(|state| &state.guard)
        .ok_or_else(|| AppError::internal("AppState not configured"))
}

fn reject(req: &HttpRequest, err: AuthError) -> AppError {
    let err = AppError::from(err);
    security::auth_rejected(err.code(), req.path());
    err
}

fn authenticate(req: &HttpRequest) -> Result<Principal, AppError> {
    // A non-UTF-8 header is treated like a missing one.
    let authorization = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    guard(req)?
        .authenticate(authorization)
        .map_err(|e| reject(req, e))
}

impl FromRequest for Principal {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

impl<S: ScopeRequirement> FromRequest for Authorized<S> {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result = authenticate(req).and_then(|principal| {
            AuthGuard::authorize(principal, S::SCOPE)
                .map(|principal| Authorized {
                    principal,
                    _scope: PhantomData,
                })
                .map_err(|e| reject(req, e))
        });
        ready(result)
    }
}
