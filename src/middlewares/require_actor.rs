/*!
 * 操作者识别中间件
 *
 * 上游网关完成身份认证后，通过请求头传入操作者与机构：
 *
 * - `X-Actor-Id`: 操作者账号 ID
 * - `X-Org-Id`: 所属机构 ID
 *
 * 中间件校验账号确实属于该机构，并把 `ActorContext` 放入请求扩展：
 *
 * ```rust,ignore
 * async fn handler(req: HttpRequest) -> Result<HttpResponse> {
 *     let Some(actor) = RequireActor::extract_actor(&req) else {
 *         return Ok(HttpResponse::Unauthorized().finish());
 *     };
 *     // actor.actor_id, actor.org_id, actor.roles
 * }
 * ```
 */

use super::create_error_response;
use crate::models::ErrorCode;
use crate::storage::Storage;
use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::{rc::Rc, sync::Arc};
use tracing::{debug, error, info};

pub const ACTOR_ID_HEADER: &str = "X-Actor-Id";
pub const ORG_ID_HEADER: &str = "X-Org-Id";

/// 当前请求的操作者
#[derive(Debug, Clone, PartialEq)]
pub struct ActorContext {
    pub actor_id: i64,
    pub org_id: i64,
    pub roles: Vec<String>,
}

#[derive(Clone)]
pub struct RequireActor;

fn header_id(req: &ServiceRequest, name: &str) -> Result<i64, String> {
    req.headers()
        .get(name)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| format!("Missing {name} header"))?
        .trim()
        .parse::<i64>()
        .map_err(|_| format!("Invalid {name} header"))
}

enum ActorFailure {
    Unauthorized(String),
    Internal(String),
}

async fn resolve_actor(req: &ServiceRequest) -> Result<ActorContext, ActorFailure> {
    let actor_id = header_id(req, ACTOR_ID_HEADER).map_err(ActorFailure::Unauthorized)?;
    let org_id = header_id(req, ORG_ID_HEADER).map_err(ActorFailure::Unauthorized)?;

    let storage = req
        .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
        .map(|data| data.get_ref().clone())
        .ok_or_else(|| ActorFailure::Internal("Storage not found in app data".to_string()))?;

    let account = storage
        .get_account(org_id, actor_id)
        .await
        .map_err(|e| ActorFailure::Internal(format!("Failed to load actor: {e}")))?
        .ok_or_else(|| {
            ActorFailure::Unauthorized(format!("Account {actor_id} not found in org {org_id}"))
        })?;

    Ok(ActorContext {
        actor_id: account.id,
        org_id: account.org_id,
        roles: account.roles,
    })
}

impl<S, B> Transform<S, ServiceRequest> for RequireActor
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireActorMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireActorMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireActorMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireActorMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        Box::pin(async move {
            // 处理 OPTIONS 请求
            if req.method() == actix_web::http::Method::OPTIONS {
                return Ok(req.into_response(
                    create_error_response(StatusCode::NO_CONTENT, ErrorCode::Success, "")
                        .map_into_right_body(),
                ));
            }

            match resolve_actor(&req).await {
                Ok(actor) => {
                    debug!(
                        "Actor {} resolved for org {}",
                        actor.actor_id, actor.org_id
                    );
                    req.extensions_mut().insert(actor);
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Err(ActorFailure::Unauthorized(err)) => {
                    info!("Actor check failed for request to {}: {}", req.path(), err);
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::UNAUTHORIZED,
                            ErrorCode::Unauthorized,
                            &format!("Unauthorized: {err}"),
                        )
                        .map_into_right_body(),
                    ))
                }
                Err(ActorFailure::Internal(err)) => {
                    error!("Actor check error for request to {}: {}", req.path(), err);
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::INTERNAL_SERVER_ERROR,
                            ErrorCode::InternalServerError,
                            "Internal server error while resolving actor",
                        )
                        .map_into_right_body(),
                    ))
                }
            }
        })
    }
}

// 辅助函数：从请求中提取操作者信息
impl RequireActor {
    /// 从请求扩展中提取操作者
    /// 此函数应该在应用了RequireActor中间件的路由处理程序中使用
    pub fn extract_actor(req: &actix_web::HttpRequest) -> Option<ActorContext> {
        req.extensions().get::<ActorContext>().cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::directory::entities::Account;
    use crate::storage::memory_storage::MemoryStorage;
    use actix_web::{App, HttpRequest, HttpResponse, test, web};

    async fn whoami(req: HttpRequest) -> HttpResponse {
        match RequireActor::extract_actor(&req) {
            Some(actor) => HttpResponse::Ok().body(format!("{}@{}", actor.actor_id, actor.org_id)),
            None => HttpResponse::InternalServerError().finish(),
        }
    }

    fn storage() -> Arc<dyn Storage> {
        let storage = MemoryStorage::new();
        storage.insert_account(Account {
            id: 7,
            org_id: 1,
            display_name: "Grace".to_string(),
            roles: vec!["admin".to_string()],
        });
        Arc::new(storage)
    }

    #[actix_web::test]
    async fn test_known_actor_passes() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(storage()))
                .service(web::scope("/api").wrap(RequireActor).route("/me", web::get().to(whoami))),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/me")
            .insert_header((ACTOR_ID_HEADER, "7"))
            .insert_header((ORG_ID_HEADER, "1"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = test::read_body(resp).await;
        assert_eq!(body, "7@1");
    }

    #[actix_web::test]
    async fn test_missing_or_foreign_actor_is_rejected() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(storage()))
                .service(web::scope("/api").wrap(RequireActor).route("/me", web::get().to(whoami))),
        )
        .await;

        let missing = test::TestRequest::get().uri("/api/me").to_request();
        assert_eq!(
            test::call_service(&app, missing).await.status(),
            StatusCode::UNAUTHORIZED
        );

        let foreign = test::TestRequest::get()
            .uri("/api/me")
            .insert_header((ACTOR_ID_HEADER, "7"))
            .insert_header((ORG_ID_HEADER, "2"))
            .to_request();
        assert_eq!(
            test::call_service(&app, foreign).await.status(),
            StatusCode::UNAUTHORIZED
        );
    }
}
