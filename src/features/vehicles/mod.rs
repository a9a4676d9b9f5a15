/// 車両機能モジュール
///
/// 使用車両の登録・更新と一覧取得、メンテナンス予定の管理を提供します。
// サブモジュールの宣言
pub mod models;
pub mod repository;

// 公開インターフェース：外部から使用可能な型と関数をエクスポート
pub use models::{FuelType, Vehicle, VehicleInsert, VehicleUpdate};
pub use repository::VehicleRepository;
