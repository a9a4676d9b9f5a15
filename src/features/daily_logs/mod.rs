/// 日報機能モジュール
///
/// このモジュールは運転日報に関連するすべての機能を提供します：
/// - 日報の作成、読み取り、更新
/// - 期間指定での日報取得
/// - 走行距離の整合性バリデーション
/// - 経費合計付きの日報取得（集計プロジェクション）
// サブモジュールの宣言
pub mod models;
pub mod repository;

// 公開インターフェース：外部から使用可能な型と関数をエクスポート

// モデル
pub use models::{DailyLog, DailyLogInsert, DailyLogUpdate, DailyLogWithTotal};

// リポジトリ
pub use repository::DailyLogRepository;
