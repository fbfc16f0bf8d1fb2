use crate::entities::admin_user_entity as admin_users;
use crate::error::{AppError, AppResult};
use crate::models::{AuthResponse, LoginRequest};
use crate::utils::{JwtService, verify_password};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

#[derive(Clone)]
pub struct AuthService {
    pool: DatabaseConnection,
    jwt_service: JwtService,
}

impl AuthService {
    pub fn new(pool: DatabaseConnection, jwt_service: JwtService) -> Self {
        Self { pool, jwt_service }
    }

    /// 管理端登录：邮箱 + 密码换取令牌对
    pub async fn login(&self, request: LoginRequest) -> AppResult<AuthResponse> {
        let email = request.email.trim().to_lowercase();

        let user = admin_users::Entity::find()
            .filter(admin_users::Column::Email.eq(&email))
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::AuthError("Invalid email or password".to_string()))?;

        if !verify_password(&request.password, &user.password_hash)? {
            return Err(AppError::AuthError("Invalid email or password".to_string()));
        }

        log::info!("Admin login: {} (is_admin={})", user.email, user.is_admin);
        self.issue_tokens(user)
    }

    /// 刷新令牌：重新读取账号，授权标记以当前库中值为准
    pub async fn refresh(&self, refresh_token: &str) -> AppResult<AuthResponse> {
        let claims = self.jwt_service.verify_refresh_token(refresh_token)?;

        let user_id: i64 = claims
            .sub
            .parse()
            .map_err(|_| AppError::AuthError("Invalid token subject".to_string()))?;

        let user = admin_users::Entity::find_by_id(user_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::AuthError("Account no longer exists".to_string()))?;

        self.issue_tokens(user)
    }

    fn issue_tokens(&self, user: admin_users::Model) -> AppResult<AuthResponse> {
        let access_token =
            self.jwt_service
                .generate_access_token(user.id, &user.email, user.is_admin)?;
        let refresh_token =
            self.jwt_service
                .generate_refresh_token(user.id, &user.email, user.is_admin)?;

        Ok(AuthResponse {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in: self.jwt_service.get_access_token_expires_in(),
            user: user.into(),
        })
    }
}
