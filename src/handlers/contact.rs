use crate::models::*;
use crate::services::ContactService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    post,
    path = "/contact",
    tag = "contact",
    request_body = ContactRequest,
    responses(
        (status = 200, description = "留言已保存"),
        (status = 400, description = "请求参数错误")
    )
)]
/// 联系表单提交（公开）
pub async fn save_contact(
    service: web::Data<ContactService>,
    request: web::Json<ContactRequest>,
) -> Result<HttpResponse> {
    match service.save_contact(request.into_inner()).await {
        Ok(saved) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": saved }))),
        Err(e) => Ok(e.error_response()),
    }
}

/// 路由配置
pub fn contact_config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/contact").route("", web::post().to(save_contact)));
}
