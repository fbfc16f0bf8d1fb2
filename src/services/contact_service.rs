use crate::entities::contact_entity as contacts;
use crate::error::{AppError, AppResult};
use crate::models::{ContactRequest, ContactResponse};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Order, QueryOrder, Set};

#[derive(Clone)]
pub struct ContactService {
    pool: DatabaseConnection,
}

impl ContactService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 保存联系表单留言
    pub async fn save_contact(&self, request: ContactRequest) -> AppResult<ContactResponse> {
        if request.name.trim().is_empty() {
            return Err(AppError::ValidationError("Name is required".to_string()));
        }
        if request.email.trim().is_empty() || !request.email.contains('@') {
            return Err(AppError::ValidationError(
                "A valid email is required".to_string(),
            ));
        }
        if request.message.trim().is_empty() {
            return Err(AppError::ValidationError("Message is required".to_string()));
        }

        let saved = contacts::ActiveModel {
            name: Set(request.name.trim().to_string()),
            email: Set(request.email.trim().to_string()),
            phone: Set(request
                .phone
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)),
            message: Set(request.message.trim().to_string()),
            created_at: Set(Some(Utc::now())),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        Ok(saved.into())
    }

    /// 留言列表（管理端，新留言在前）
    pub async fn list_contacts(&self) -> AppResult<Vec<ContactResponse>> {
        let list = contacts::Entity::find()
            .order_by(contacts::Column::CreatedAt, Order::Desc)
            .all(&self.pool)
            .await?;

        Ok(list.into_iter().map(Into::into).collect())
    }
}
