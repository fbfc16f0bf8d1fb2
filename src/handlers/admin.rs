use crate::middlewares::CurrentAdmin;
use crate::models::*;
use crate::services::{ContactService, DrawService, TicketService};
use actix_web::{HttpMessage, HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;

/// 从请求扩展中获取操作者身份（中间件在鉴权后注入）
fn operator_email(req: &HttpRequest) -> String {
    req.extensions()
        .get::<CurrentAdmin>()
        .map(|admin| admin.email.clone())
        .unwrap_or_else(|| "unknown".to_string())
}

#[utoipa::path(
    post,
    path = "/admin/draws",
    tag = "admin",
    request_body = CreateDrawRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "创建活动成功", body = DrawResponse),
        (status = 400, description = "请求参数错误"),
        (status = 403, description = "无管理权限")
    )
)]
/// 创建活动
pub async fn create_draw(
    service: web::Data<DrawService>,
    request: web::Json<CreateDrawRequest>,
) -> Result<HttpResponse> {
    match service.create_draw(request.into_inner()).await {
        Ok(draw) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": draw }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/admin/draws/{id}",
    tag = "admin",
    params(
        ("id" = i64, Path, description = "活动ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "活动及其全部票已删除"),
        (status = 404, description = "活动不存在"),
        (status = 403, description = "无管理权限")
    )
)]
/// 整体删除活动（级联删除该期全部票）
pub async fn delete_draw(
    service: web::Data<DrawService>,
    path: web::Path<i64>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let draw_id = path.into_inner();
    log::info!("Admin {} deleting draw {draw_id}", operator_email(&req));
    match service.delete_draw(draw_id).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({ "success": true }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/admin/draws/{id}/winner",
    tag = "admin",
    params(
        ("id" = i64, Path, description = "活动ID")
    ),
    request_body = MarkWinnerRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "开奖成功"),
        (status = 400, description = "活动已关闭或票不属于该活动"),
        (status = 404, description = "活动或票不存在"),
        (status = 403, description = "无管理权限")
    )
)]
/// 开奖：指定中奖票并关闭活动
pub async fn mark_winner(
    service: web::Data<DrawService>,
    path: web::Path<i64>,
    request: web::Json<MarkWinnerRequest>,
) -> Result<HttpResponse> {
    match service
        .mark_winner(path.into_inner(), request.ticket_id)
        .await
    {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({ "success": true }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/admin/draws/{id}/tickets",
    tag = "admin",
    params(
        ("id" = i64, Path, description = "活动ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "获取票列表成功", body = [TicketResponse]),
        (status = 403, description = "无管理权限")
    )
)]
/// 某期全部票（先订在前）
pub async fn list_draw_tickets(
    service: web::Data<TicketService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match service.list_tickets(path.into_inner()).await {
        Ok(list) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": list }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/admin/draws/{id}/tickets/export",
    tag = "admin",
    params(
        ("id" = i64, Path, description = "活动ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "CSV 导出", body = String, content_type = "text/csv"),
        (status = 403, description = "无管理权限")
    )
)]
/// 某期全部票导出 CSV
pub async fn export_draw_tickets(
    service: web::Data<TicketService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let draw_id = path.into_inner();
    match service.export_tickets_csv(draw_id).await {
        Ok(csv) => Ok(HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .insert_header((
                "Content-Disposition",
                format!("attachment; filename=\"draw-{draw_id}-tickets.csv\""),
            ))
            .body(csv)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/admin/tickets",
    tag = "admin",
    params(
        ("page" = Option<u32>, Query, description = "页码 (默认1)"),
        ("per_page" = Option<u32>, Query, description = "每页数量 (默认20)")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "获取全部票成功"),
        (status = 403, description = "无管理权限")
    )
)]
/// 全部票（跨活动，新订在前，分页）
pub async fn list_all_tickets(
    service: web::Data<TicketService>,
    query: web::Query<TicketQuery>,
) -> Result<HttpResponse> {
    match service.list_all_tickets(&query.into_inner()).await {
        Ok(page) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": page }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/admin/tickets/{id}",
    tag = "admin",
    params(
        ("id" = i64, Path, description = "票ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "票已删除，号码已释放"),
        (status = 404, description = "票不存在"),
        (status = 403, description = "无管理权限")
    )
)]
/// 删票：同一事务内删除票、释放号码并回退已售计数
pub async fn delete_ticket(
    service: web::Data<TicketService>,
    path: web::Path<i64>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let ticket_id = path.into_inner();
    log::info!("Admin {} deleting ticket {ticket_id}", operator_email(&req));
    match service.delete_ticket(ticket_id).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({ "success": true }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/admin/contacts",
    tag = "admin",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "获取留言列表成功", body = [ContactResponse]),
        (status = 403, description = "无管理权限")
    )
)]
/// 联系表单留言列表
pub async fn list_contacts(service: web::Data<ContactService>) -> Result<HttpResponse> {
    match service.list_contacts().await {
        Ok(list) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": list }))),
        Err(e) => Ok(e.error_response()),
    }
}

/// 路由配置（/api/v1/admin，鉴权中间件强制 is_admin）
pub fn admin_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .route("/draws", web::post().to(create_draw))
            .route("/draws/{id}", web::delete().to(delete_draw))
            .route("/draws/{id}/winner", web::post().to(mark_winner))
            .route("/draws/{id}/tickets", web::get().to(list_draw_tickets))
            .route(
                "/draws/{id}/tickets/export",
                web::get().to(export_draw_tickets),
            )
            .route("/tickets", web::get().to(list_all_tickets))
            .route("/tickets/{id}", web::delete().to(delete_ticket))
            .route("/contacts", web::get().to(list_contacts)),
    );
}
