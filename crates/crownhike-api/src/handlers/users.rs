//! 账号相关的 HTTP 处理器
//!
//! 注册、登录、资料查询与修改、修改密码、注销账号

use axum::{
    Extension, Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use tracing::{info, warn};
use validator::Validate;

use crownhike_core::{CoreError, NewUser, ProfileUpdate, UserProfile};

use crate::dto::{
    ChangePasswordRequest, DataResponse, LoginRequest, LoginResponse, LoginUser,
    MessageResponse, OkResponse, RegisterRequest, RegisterResponse, UpdateProfileRequest,
};
use crate::error::{ApiError, Result};
use crate::middleware::AuthUser;
use crate::state::AppState;

/// 注册
///
/// POST /users/register
pub async fn register(
    State(state): State<AppState>,
    payload: std::result::Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<RegisterResponse>)> {
    let Json(req) = payload?;
    req.validate()?;

    let user = NewUser {
        username: req.username.trim().to_string(),
        email: req.email.trim().to_string(),
        password_hash: state.password_hasher.hash(&req.password).await?,
    };
    let user_id = state.user_repo.create_user(&user).await?;

    info!(user_id, "User registered");
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse { ok: true, user_id }),
    ))
}

/// 登录
///
/// POST /users/login
///
/// 邮箱不存在与密码错误返回相同的错误，避免泄露账号是否存在
pub async fn login(
    State(state): State<AppState>,
    payload: std::result::Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>> {
    let Json(req) = payload?;
    req.validate()?;

    let user = state
        .user_repo
        .find_credentials_by_email(req.email.trim())
        .await?
        .ok_or(ApiError::InvalidCredentials)?;

    if !state
        .password_hasher
        .verify(&req.password, &user.password_hash)
        .await?
    {
        warn!(user_id = user.id, "Login failed: wrong password");
        return Err(ApiError::InvalidCredentials);
    }

    let (token, _) = state.jwt_manager.generate_token(user.id, &user.email)?;

    info!(user_id = user.id, "User logged in");
    Ok(Json(LoginResponse {
        ok: true,
        user: LoginUser {
            id: user.id,
            username: user.username,
            email: user.email,
        },
        token,
        expires_in: state.jwt_manager.expires_in_secs(),
    }))
}

/// 当前用户资料
///
/// GET /users/me
pub async fn get_me(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<DataResponse<UserProfile>>> {
    let profile = state
        .user_repo
        .get_profile(user.id)
        .await?
        .ok_or(CoreError::UserNotFound(user.id))?;

    Ok(Json(DataResponse::new(profile)))
}

/// 更新资料（用户名、是否允许共享位置）
///
/// PUT /users/me
pub async fn update_me(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: std::result::Result<Option<Json<UpdateProfileRequest>>, JsonRejection>,
) -> Result<Json<OkResponse>> {
    let update = ProfileUpdate::from(payload?.map(|Json(req)| req).unwrap_or_default());
    if update.is_empty() {
        return Err(ApiError::Validation("No updatable fields".to_string()));
    }

    if !state.user_repo.update_profile(user.id, &update).await? {
        return Err(CoreError::UserNotFound(user.id).into());
    }

    Ok(Json(OkResponse::new()))
}

/// 修改密码
///
/// PUT /users/password
pub async fn change_password(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: std::result::Result<Json<ChangePasswordRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>> {
    let Json(req) = payload?;
    req.validate()?;

    let credentials = state
        .user_repo
        .find_credentials_by_id(user.id)
        .await?
        .ok_or(CoreError::UserNotFound(user.id))?;

    if !state
        .password_hasher
        .verify(&req.old_password, &credentials.password_hash)
        .await?
    {
        return Err(ApiError::InvalidOldPassword);
    }

    let new_hash = state.password_hasher.hash(&req.new_password).await?;
    state.user_repo.update_password(user.id, &new_hash).await?;

    info!(user_id = user.id, "Password updated");
    Ok(Json(MessageResponse::new("Password updated")))
}

/// 注销账号，同一事务中删除全部关联数据
///
/// DELETE /users/me
pub async fn delete_me(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<MessageResponse>> {
    if !state.user_repo.delete_user(user.id).await? {
        return Err(CoreError::UserNotFound(user.id).into());
    }

    info!(user_id = user.id, "Account deleted");
    Ok(Json(MessageResponse::new("Account deleted")))
}
