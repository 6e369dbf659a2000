//! 地理位置访问闸门
//!
//! 每个受保护请求：探测公网 IP → 解析国家 → 放行或返回 401。
//! 决策完成之前不会调用下游 handler。

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::header::ContentType,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use std::sync::Arc;
use tracing::{error, info, trace};

use crate::errors::Result;
use crate::services::{GeoAccessResolver, GeoDecision, PublicIpSource};

/// 拒绝访问时的响应正文
pub fn denial_message(country: &str) -> String {
    format!("Your location {} cannot access our service", country)
}

/// Access gate middleware factory
#[derive(Clone)]
pub struct AccessGate {
    ip_source: Arc<dyn PublicIpSource>,
    resolver: GeoAccessResolver,
}

impl AccessGate {
    pub fn new(ip_source: Arc<dyn PublicIpSource>, resolver: GeoAccessResolver) -> Self {
        Self {
            ip_source,
            resolver,
        }
    }

    /// 探测公网 IP 并给出访问决策
    pub async fn evaluate(&self) -> Result<GeoDecision> {
        let ip = self.ip_source.discover().await?;
        trace!("Access gate discovered public IP {}", ip);
        self.resolver.resolve_access(&ip).await
    }
}

impl<S, B> Transform<S, ServiceRequest> for AccessGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AccessGateMiddleware<S>;
    type Future = Ready<std::result::Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AccessGateMiddleware {
            service: Rc::new(service),
            gate: self.clone(),
        }))
    }
}

pub struct AccessGateMiddleware<S> {
    service: Rc<S>,
    gate: AccessGate,
}

impl<S, B> AccessGateMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    /// Handle requests from a country outside the allow-list
    fn handle_denied(
        req: ServiceRequest,
        decision: &GeoDecision,
    ) -> ServiceResponse<EitherBody<B>> {
        info!(
            "Access denied for {} - country \"{}\" is not allowed",
            req.path(),
            decision.country
        );
        req.into_response(
            HttpResponse::Unauthorized()
                .insert_header(ContentType::plaintext())
                .body(denial_message(&decision.country))
                .map_into_right_body(),
        )
    }
}

impl<S, B> Service<ServiceRequest> for AccessGateMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, std::result::Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<std::result::Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let gate = self.gate.clone();

        Box::pin(async move {
            match gate.evaluate().await {
                Ok(decision) if decision.can_access => {
                    trace!("Access granted for country \"{}\"", decision.country);
                    // 决策放入 request extensions，handler 可按需读取
                    req.extensions_mut().insert(decision);
                    let response = srv.call(req).await?.map_into_left_body();
                    Ok(response)
                }
                Ok(decision) => Ok(Self::handle_denied(req, &decision)),
                Err(e) => {
                    error!("Access gate failed for {}: {}", req.path(), e);
                    Ok(req.error_response(e).map_into_right_body())
                }
            }
        })
    }
}
