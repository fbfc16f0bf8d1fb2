use crate::models::*;
use crate::services::DrawService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/draws",
    tag = "draw",
    responses(
        (status = 200, description = "获取活动列表成功", body = [DrawResponse])
    )
)]
/// 活动列表（公开，营销页/倒计时用）
pub async fn list_draws(service: web::Data<DrawService>) -> Result<HttpResponse> {
    match service.list_draws().await {
        Ok(list) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": list }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/draws/{id}",
    tag = "draw",
    params(
        ("id" = i64, Path, description = "活动ID")
    ),
    responses(
        (status = 200, description = "获取活动成功", body = DrawResponse),
        (status = 404, description = "活动不存在")
    )
)]
/// 单个活动（公开）
pub async fn get_draw(
    service: web::Data<DrawService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match service.get_draw(path.into_inner()).await {
        Ok(draw) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": draw }))),
        Err(e) => Ok(e.error_response()),
    }
}

/// 路由配置（公开部分）
pub fn draw_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/draws")
            .route("", web::get().to(list_draws))
            .route("/{id}", web::get().to(get_draw))
            .route("/{id}/tickets", web::post().to(super::ticket::book_ticket)),
    );
}
