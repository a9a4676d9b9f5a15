/// プロフィール機能モジュール
///
/// ユーザープロフィール（usersテーブル）の取得と更新を提供します。
// サブモジュールの宣言
pub mod models;
pub mod repository;

// 公開インターフェース：外部から使用可能な型と関数をエクスポート
pub use models::{Profile, ProfileInsert, ProfileUpdate};
pub use repository::ProfileRepository;
