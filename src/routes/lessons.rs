use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use super::{error_response, missing_actor_response};
use crate::middlewares::{self, RequireActor};
use crate::models::ApiResponse;
use crate::models::lessons::requests::{CreateLessonInput, UpdateLessonInput};
use crate::services::LessonService;

// 创建课次
pub async fn create_lesson(
    req: HttpRequest,
    service: web::Data<LessonService>,
    body: web::Json<CreateLessonInput>,
) -> ActixResult<HttpResponse> {
    let Some(actor) = RequireActor::extract_actor(&req) else {
        return Ok(missing_actor_response());
    };

    match service
        .create_lesson(actor.actor_id, actor.org_id, body.into_inner())
        .await
    {
        Ok(lesson) => Ok(HttpResponse::Created()
            .json(ApiResponse::success(lesson, "Lesson created successfully"))),
        Err(e) => Ok(error_response(&e)),
    }
}

// 修改课次
pub async fn update_lesson(
    req: HttpRequest,
    service: web::Data<LessonService>,
    path: web::Path<i64>,
    body: web::Json<UpdateLessonInput>,
) -> ActixResult<HttpResponse> {
    let Some(actor) = RequireActor::extract_actor(&req) else {
        return Ok(missing_actor_response());
    };

    match service
        .update_lesson(
            actor.actor_id,
            actor.org_id,
            path.into_inner(),
            body.into_inner(),
        )
        .await
    {
        Ok(lesson) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(lesson, "Lesson updated successfully")))
        }
        Err(e) => Ok(error_response(&e)),
    }
}

// 配置路由
pub fn configure_lessons_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/lessons")
            .wrap(middlewares::RequireActor)
            // 创建课次 - 课程讲师或比讲师更资深的角色（业务层校验）
            .service(web::resource("").route(web::post().to(create_lesson)))
            .service(web::resource("/{lesson_id}").route(web::put().to(update_lesson))),
    );
}
