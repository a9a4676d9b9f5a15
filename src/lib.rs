//! 運転日報アプリケーションのデータアクセス層
//!
//! ホスト型バックエンド（パスワード認証 + テーブルAPI）を利用する
//! 運転日報・経費・車両・売上管理アプリのクライアントライブラリ。
//! フロントエンドはこのクレートを経由してバックエンドと通信する。
//!
//! # 構成
//! - `features::auth` - サインイン・サインアップ・リクエストガード
//! - `features::daily_logs` - 運転日報の記録と集計
//! - `features::expenses` - 経費の詳細管理
//! - `features::vehicles` - 車両とメンテナンス予定の管理
//! - `features::revenues` - 委託先別の売上管理
//! - `features::profiles` - ユーザープロフィール
//! - `shared` - バックエンドクライアント、設定、エラー型

pub mod features;
pub mod shared;

// よく使う型の再エクスポート
pub use features::auth::{AuthFailure, AuthOutcome, AuthService, GuardDecision, Session};
pub use shared::api_client::{BackendClient, SessionMode};
pub use shared::config::environment::BackendConfig;
pub use shared::errors::{AppError, AppResult};

use log::info;
use shared::config::environment::{initialize_logging_system, load_environment_variables};

/// ライブラリの実行基盤を初期化する
///
/// # 処理内容
/// 1. 環境変数の読み込み（開発環境では.envファイルを使用）
/// 2. ログシステムの初期化
///
/// アプリケーションの起動時に一度だけ呼び出すこと。
pub fn initialize() {
    load_environment_variables();
    initialize_logging_system();
    info!("運転日報データアクセス層を初期化しました");
}
