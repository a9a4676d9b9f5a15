/// 認証機能モジュール
///
/// このモジュールは認証に関連するすべての機能を提供します：
/// - メールアドレスとパスワードによるサインイン・サインアップ
/// - パスワードリセットメールの送信
/// - セッションの取得と破棄
/// - 保護ページへのアクセス判定（リクエストガード）
// サブモジュールの宣言
pub mod middleware;
pub mod models;
pub mod service;

// 公開インターフェース：外部から使用可能な型と関数をエクスポート

// モデル
pub use models::{
    AuthFailure, AuthField, AuthOutcome, AuthUser, LoginFormData, ResetPasswordFormData, Session,
    SignupFormData,
};

// サービス
pub use service::AuthService;

// リクエストガード
pub use middleware::{evaluate_request, guard_request, GuardDecision};
