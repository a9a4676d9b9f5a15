/// 機能別モジュール
///
/// アプリケーションの機能を機能別に整理したモジュール群を提供します。
/// 各機能モジュールは、その機能に関連するコード（モデル、リポジトリ、サービス）
/// を含む自己完結型のユニットです。
// 機能モジュールの宣言
pub mod auth;
pub mod daily_logs;
pub mod expenses;
pub mod profiles;
pub mod revenues;
pub mod vehicles;
