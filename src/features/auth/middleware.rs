/// リクエストガード
///
/// 受信リクエストごとに1回、ハンドラー実行前に同期的に評価される。
/// セッションの有無とパスの組み合わせから、リダイレクトか通過かを決める。
use crate::features::auth::service::AuthService;
use crate::shared::errors::AppResult;

/// ログインページのパス
pub const LOGIN_PATH: &str = "/auth/login";

/// ダッシュボードのパス
pub const DASHBOARD_PATH: &str = "/dashboard";

/// サインアップページのパス
pub const SIGNUP_PATH: &str = "/auth/signup";

/// パスワードリセットページのパス
pub const RESET_PASSWORD_PATH: &str = "/auth/reset-password";

/// パスワード再設定確認ページのパス
pub const RESET_PASSWORD_CONFIRM_PATH: &str = "/auth/reset-password/confirm";

/// 認証が必要なパスのプレフィックス一覧
pub const PROTECTED_PREFIXES: &[&str] = &["/dashboard", "/logs", "/profile"];

/// ガードの判定結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// 未認証で保護ページにアクセス → ログインページへリダイレクト
    RedirectToLogin,
    /// 認証済みでログインページにアクセス → ダッシュボードへリダイレクト
    RedirectToDashboard,
    /// そのまま通過
    PassThrough,
}

impl GuardDecision {
    /// リダイレクト先のパスを取得する（通過の場合はNone）
    pub fn redirect_target(self) -> Option<&'static str> {
        match self {
            GuardDecision::RedirectToLogin => Some(LOGIN_PATH),
            GuardDecision::RedirectToDashboard => Some(DASHBOARD_PATH),
            GuardDecision::PassThrough => None,
        }
    }
}

/// リクエストパスが保護対象かどうかを判定する
///
/// # 引数
/// * `path` - リクエストパス
pub fn is_protected_path(path: &str) -> bool {
    PROTECTED_PREFIXES
        .iter()
        .any(|prefix| path.starts_with(prefix))
}

/// リクエストを評価してガードの判定を返す
///
/// # 引数
/// * `path` - リクエストパス
/// * `session_present` - セッションが存在するかどうか
pub fn evaluate_request(path: &str, session_present: bool) -> GuardDecision {
    if is_protected_path(path) && !session_present {
        return GuardDecision::RedirectToLogin;
    }

    if path == LOGIN_PATH && session_present {
        return GuardDecision::RedirectToDashboard;
    }

    GuardDecision::PassThrough
}

/// 受信リクエストのトークンからセッションの有無を解決して評価する
///
/// # 引数
/// * `auth_service` - 認証サービス
/// * `path` - リクエストパス
/// * `access_token` - リクエストから取り出したアクセストークン
pub async fn guard_request(
    auth_service: &AuthService,
    path: &str,
    access_token: Option<&str>,
) -> AppResult<GuardDecision> {
    let session_present = match access_token {
        Some(token) => auth_service.get_user_for_token(token).await?.is_some(),
        None => false,
    };

    let decision = evaluate_request(path, session_present);
    log::debug!("リクエストガード判定: path={path}, session={session_present}, decision={decision:?}");

    Ok(decision)
}

/// リクエストヘッダーから認証トークンを抽出する
///
/// # 引数
/// * `authorization_header` - Authorizationヘッダーの値
pub fn extract_bearer_token(authorization_header: Option<&str>) -> Option<&str> {
    authorization_header
        .and_then(|header| header.strip_prefix("Bearer "))
        .map(|token| token.trim())
        .filter(|token| !token.is_empty())
}
