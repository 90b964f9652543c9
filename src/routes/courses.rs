use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use super::{error_response, missing_actor_response};
use crate::middlewares::{self, RequireActor};
use crate::models::ApiResponse;
use crate::models::courses::requests::{CloneCourseInput, CreateCourseInput};
use crate::models::lessons::requests::GenerateLessonsInput;
use crate::services::{CourseService, LessonService};

// 创建课程
pub async fn create_course(
    req: HttpRequest,
    service: web::Data<CourseService>,
    body: web::Json<CreateCourseInput>,
) -> ActixResult<HttpResponse> {
    let Some(actor) = RequireActor::extract_actor(&req) else {
        return Ok(missing_actor_response());
    };

    match service
        .create_course(actor.actor_id, actor.org_id, body.into_inner())
        .await
    {
        Ok(course) => Ok(HttpResponse::Created()
            .json(ApiResponse::success(course, "Course created successfully"))),
        Err(e) => Ok(error_response(&e)),
    }
}

// 复制课程
pub async fn clone_course(
    req: HttpRequest,
    service: web::Data<CourseService>,
    body: web::Json<CloneCourseInput>,
) -> ActixResult<HttpResponse> {
    let Some(actor) = RequireActor::extract_actor(&req) else {
        return Ok(missing_actor_response());
    };

    match service
        .clone_course(actor.actor_id, actor.org_id, body.into_inner())
        .await
    {
        Ok(course) => Ok(HttpResponse::Created()
            .json(ApiResponse::success(course, "Course cloned successfully"))),
        Err(e) => Ok(error_response(&e)),
    }
}

// 按每周课表生成课次
pub async fn generate_lessons(
    req: HttpRequest,
    service: web::Data<LessonService>,
    path: web::Path<i64>,
    body: web::Json<GenerateLessonsInput>,
) -> ActixResult<HttpResponse> {
    let Some(actor) = RequireActor::extract_actor(&req) else {
        return Ok(missing_actor_response());
    };

    match service
        .generate_lessons(
            actor.actor_id,
            actor.org_id,
            path.into_inner(),
            body.into_inner(),
        )
        .await
    {
        Ok(generated) => Ok(HttpResponse::Created()
            .json(ApiResponse::success(generated, "Lessons generated successfully"))),
        Err(e) => Ok(error_response(&e)),
    }
}

// 配置路由
pub fn configure_courses_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/courses")
            .wrap(middlewares::RequireActor)
            // 创建课程 - 需要 course.create 权限（业务层校验）
            .service(web::resource("").route(web::post().to(create_course)))
            // 复制课程 - 需要 course.clone 权限且能管理源课程
            .service(web::resource("/clone").route(web::post().to(clone_course)))
            .service(
                web::resource("/{course_id}/lessons/generate")
                    .route(web::post().to(generate_lessons)),
            ),
    );
}
