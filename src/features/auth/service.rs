/// 認証サービス
///
/// バックエンドのパスワード認証APIをラップし、結果を統一された
/// 成功/失敗エンベロープ（`AuthOutcome`）に分類する。
/// 生の例外は呼び出し側に伝播させない。
use crate::features::auth::middleware::RESET_PASSWORD_CONFIRM_PATH;
use crate::features::auth::models::{
    get_error_field, get_error_message, AuthFailure, AuthOutcome, AuthUser, LoginFormData,
    ResetPasswordFormData, Session, SignupFormData,
};
use crate::shared::api_client::{AuthCallError, BackendClient, SessionMode};
use crate::shared::errors::{AppError, AppResult};
use log::{error, info, warn};
use reqwest::StatusCode;
use std::sync::Arc;

/// 認証サービス
#[derive(Clone)]
pub struct AuthService {
    /// バックエンドクライアント
    client: Arc<BackendClient>,
}

impl AuthService {
    /// 新しいAuthServiceを作成する
    ///
    /// # 引数
    /// * `client` - バックエンドクライアント
    pub fn new(client: Arc<BackendClient>) -> Self {
        Self { client }
    }

    /// メールアドレスとパスワードでサインインする
    ///
    /// # 引数
    /// * `data` - ログインフォームのデータ
    ///
    /// # 戻り値
    /// 成功時はセッション、失敗時はフィールド帰属つきのエラー
    pub async fn sign_in(&self, data: &LoginFormData) -> AuthOutcome<Session> {
        data.validate()?;

        let body = serde_json::json!({
            "email": data.email,
            "password": data.password,
        });

        let result = self
            .client
            .auth_post::<Session>("/auth/v1/token", &[("grant_type", "password")], &body, None)
            .await;

        match result {
            Ok(session) => {
                // 対話型コンテキストではセッションをハンドルに保持する
                if self.client.mode() == SessionMode::Interactive {
                    self.client.store_session_token(&session.access_token);
                }
                info!("サインインに成功しました: user_id={}", session.user.id);
                Ok(session)
            }
            Err(e) => Err(Self::classify_failure(e, "サインイン")),
        }
    }

    /// 新規ユーザーを登録する
    ///
    /// メール確認が有効なバックエンドではセッションなしでユーザーのみ
    /// 返ることがあるため、どちらのレスポンス形状も受け付ける。
    ///
    /// # 引数
    /// * `data` - サインアップフォームのデータ
    pub async fn sign_up(&self, data: &SignupFormData) -> AuthOutcome<AuthUser> {
        data.validate()?;

        let body = serde_json::json!({
            "email": data.email,
            "password": data.password,
            "data": {
                "full_name": data.full_name.clone().unwrap_or_default(),
            },
        });

        let result = self
            .client
            .auth_post::<serde_json::Value>("/auth/v1/signup", &[], &body, None)
            .await;

        match result {
            Ok(payload) => {
                if payload.get("access_token").is_some() {
                    // セッション込みのレスポンス
                    let session: Session =
                        serde_json::from_value(payload).map_err(|e| {
                            error!("サインアップレスポンスの解析に失敗しました: {e}");
                            AuthFailure::unexpected()
                        })?;
                    if self.client.mode() == SessionMode::Interactive {
                        self.client.store_session_token(&session.access_token);
                    }
                    info!("サインアップに成功しました: user_id={}", session.user.id);
                    Ok(session.user)
                } else {
                    // メール確認待ちのためユーザーのみのレスポンス
                    let user: AuthUser = serde_json::from_value(payload).map_err(|e| {
                        error!("サインアップレスポンスの解析に失敗しました: {e}");
                        AuthFailure::unexpected()
                    })?;
                    info!("サインアップに成功しました（確認待ち）: user_id={}", user.id);
                    Ok(user)
                }
            }
            Err(e) => Err(Self::classify_failure(e, "サインアップ")),
        }
    }

    /// サインアウトする
    ///
    /// セッションを保持していない場合は何もせず成功として扱う。
    pub async fn sign_out(&self) -> AuthOutcome<()> {
        let Some(token) = self.client.session_token() else {
            return Ok(());
        };

        let result = self
            .client
            .auth_post_empty("/auth/v1/logout", &[], &serde_json::json!({}), Some(&token))
            .await;

        match result {
            Ok(()) => {
                self.client.clear_session_token();
                info!("サインアウトしました");
                Ok(())
            }
            Err(AuthCallError::Upstream { status, message }) => {
                warn!("サインアウトに失敗しました: status={status}, message={message}");
                Err(AuthFailure::form_level("ログアウトに失敗しました"))
            }
            Err(AuthCallError::Unexpected(e)) => {
                error!("サインアウトで予期しないエラー: {e}");
                Err(AuthFailure::unexpected())
            }
        }
    }

    /// パスワードリセットメールを送信する
    ///
    /// サイトURLが設定されている場合、メール内リンクのリダイレクト先に
    /// パスワード再設定ページを指定する。
    ///
    /// # 引数
    /// * `data` - パスワードリセットフォームのデータ
    pub async fn reset_password(&self, data: &ResetPasswordFormData) -> AuthOutcome<()> {
        data.validate()?;

        let redirect_to = self
            .client
            .config()
            .site_url
            .as_ref()
            .map(|site| format!("{site}{RESET_PASSWORD_CONFIRM_PATH}"));

        let query: Vec<(&str, &str)> = match &redirect_to {
            Some(url) => vec![("redirect_to", url.as_str())],
            None => Vec::new(),
        };

        let body = serde_json::json!({ "email": data.email });

        let result = self
            .client
            .auth_post_empty("/auth/v1/recover", &query, &body, None)
            .await;

        match result {
            Ok(()) => {
                info!("パスワードリセットメールを送信しました");
                Ok(())
            }
            Err(AuthCallError::Upstream { message, .. }) => {
                warn!("パスワードリセットに失敗しました: message={message}");
                // リセット操作はフィールド帰属を行わずフォーム全体のエラーとする
                Err(AuthFailure::form_level(get_error_message(&message)))
            }
            Err(AuthCallError::Unexpected(e)) => {
                error!("パスワードリセットで予期しないエラー: {e}");
                Err(AuthFailure::unexpected())
            }
        }
    }

    /// 現在のユーザー情報を取得する
    ///
    /// # 戻り値
    /// セッションがない場合・トークンが無効な場合はOk(None)
    pub async fn get_current_user(&self) -> AppResult<Option<AuthUser>> {
        let Some(token) = self.client.session_token() else {
            return Ok(None);
        };
        self.get_user_for_token(&token).await
    }

    /// 指定されたアクセストークンのユーザー情報を取得する（サーバーサイド用）
    ///
    /// # 引数
    /// * `access_token` - 受信リクエストから取り出したアクセストークン
    ///
    /// # 戻り値
    /// トークンが無効な場合はOk(None)
    pub async fn get_user_for_token(&self, access_token: &str) -> AppResult<Option<AuthUser>> {
        let result = self
            .client
            .auth_get::<AuthUser>("/auth/v1/user", access_token)
            .await;

        match result {
            Ok(user) => Ok(Some(user)),
            Err(AuthCallError::Upstream { status, message })
                if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN =>
            {
                log::debug!("無効なトークンでユーザー取得: {message}");
                Ok(None)
            }
            Err(AuthCallError::Upstream { status, message }) => {
                error!("ユーザー取得エラー: status={status}, message={message}");
                Err(AppError::Backend(message))
            }
            Err(AuthCallError::Unexpected(e)) => {
                error!("ユーザー取得で予期しないエラー: {e}");
                Err(e)
            }
        }
    }

    /// セッションが存在するかどうかを判定する
    pub fn has_session(&self) -> bool {
        self.client.has_session()
    }

    /// 保持しているアクセストークンを取得する
    pub fn session_token(&self) -> Option<String> {
        self.client.session_token()
    }

    /// 認証エンドポイントの失敗をユーザー向けエラーに分類する
    fn classify_failure(error: AuthCallError, operation: &str) -> AuthFailure {
        match error {
            AuthCallError::Upstream { status, message } => {
                warn!("{operation}に失敗しました: status={status}, message={message}");
                AuthFailure {
                    message: get_error_message(&message),
                    field: get_error_field(&message),
                }
            }
            AuthCallError::Unexpected(e) => {
                error!("{operation}で予期しないエラー: {e}");
                AuthFailure::unexpected()
            }
        }
    }
}
