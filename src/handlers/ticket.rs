use crate::models::*;
use crate::services::TicketService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    post,
    path = "/draws/{id}/tickets",
    tag = "ticket",
    params(
        ("id" = i64, Path, description = "活动ID")
    ),
    request_body = BookTicketRequest,
    responses(
        (status = 200, description = "订票成功", body = BookTicketResponse),
        (status = 400, description = "购票人字段缺失或无效"),
        (status = 404, description = "活动不存在"),
        (status = 409, description = "号池已售罄"),
        (status = 503, description = "并发冲突，请重试")
    )
)]
/// 订票（公开）:
/// 1. 校验购票人字段
/// 2. 事务内分配唯一号码（随机探测 + 顺序扫描兜底）
/// 3. 返回票ID与展示票号，供前端展示/生成 PDF
pub async fn book_ticket(
    service: web::Data<TicketService>,
    path: web::Path<i64>,
    request: web::Json<BookTicketRequest>,
) -> Result<HttpResponse> {
    match service.book_ticket(path.into_inner(), &request).await {
        Ok(result) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": result }))),
        Err(e) => Ok(e.error_response()),
    }
}

// 订票路由挂在公开的 /draws 作用域下，由 draw_config 注册
