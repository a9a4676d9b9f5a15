/// バックエンドAPIクライアント
pub mod api_client;

/// 共有設定管理
pub mod config;

/// 共有エラー型とエラーハンドリング
pub mod errors;

/// テスト用スタブバックエンド
#[cfg(test)]
pub mod test_backend;

// 便利な再エクスポート
pub use api_client::{BackendClient, OrderDirection, QueryBuilder, SessionMode};
pub use config::{
    get_environment, initialize_logging_system, load_environment_variables, BackendConfig,
    Environment, EnvironmentConfig,
};
pub use errors::{AppError, AppResult, ErrorSeverity};
