/// 経費機能モジュール
///
/// このモジュールは経費管理に関連するすべての機能を提供します：
/// - 経費の作成、読み取り、更新
/// - 期間指定での経費取得
/// - カテゴリー列挙型と表示用ラベル
// サブモジュールの宣言
pub mod models;
pub mod repository;

// 公開インターフェース：外部から使用可能な型と関数をエクスポート

// モデル
pub use models::{Expense, ExpenseCategory, ExpenseInsert, ExpenseUpdate};

// リポジトリ
pub use repository::ExpenseRepository;
