/// 売上機能モジュール
///
/// 委託先別の売上管理と支払い状況の追跡を提供します。
// サブモジュールの宣言
pub mod models;
pub mod repository;

// 公開インターフェース：外部から使用可能な型と関数をエクスポート
pub use models::{PaymentStatus, Revenue, RevenueInsert, RevenueUpdate};
pub use repository::RevenueRepository;
