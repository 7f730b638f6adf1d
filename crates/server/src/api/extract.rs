//! 请求提取器：当前用户、JSON 请求体与分页参数。

use std::sync::Arc;

use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::{header::AUTHORIZATION, request::Parts},
};
use lms_api_types::ListQuery;
use lms_core::domain::{Actor, PageRequest};
use serde::de::DeserializeOwned;

use super::error::ApiError;
use super::state::AppState;
use crate::service::ServiceError;

/// 请求的调用者。未携带 `Authorization` 头时为匿名。
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser(pub Option<Actor>);

impl CurrentUser {
    pub fn actor(&self) -> Option<&Actor> {
        self.0.as_ref()
    }
}

impl FromRequestParts<Arc<AppState>> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let Some(header) = parts.headers.get(AUTHORIZATION) else {
            return Ok(Self(None));
        };

        let value = header
            .to_str()
            .map_err(|_| ApiError::unauthorized("malformed authorization header"))?;
        let token = value
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| ApiError::unauthorized("expected a bearer token"))?;

        let actor = state.accounts.authenticate(token)?;
        Ok(Self(Some(actor)))
    }
}

/// JSON 请求体，解析失败时返回统一的错误格式。
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

/// 列表查询参数。
pub struct ListParams(pub ListQuery);

impl<S> FromRequestParts<S> for ListParams
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<ListQuery>::from_request_parts(parts, state).await?;
        Ok(Self(query))
    }
}

impl ListParams {
    /// 按服务端分页限制解析页码与每页数量。
    pub fn page(&self, state: &AppState) -> Result<PageRequest, ApiError> {
        PageRequest::new(self.0.page, self.0.limit, state.page_settings)
            .map_err(|e| ServiceError::from(e).into())
    }
}
