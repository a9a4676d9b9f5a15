use serde::{Deserialize, Serialize};

/// 経費カテゴリー
///
/// バックエンドの列挙型と同じ値のみを受け付ける。
/// 未知の文字列はデシリアライズ時に拒否される。
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    Fuel,
    Maintenance,
    Insurance,
    Parking,
    Toll,
    Meal,
    Other,
}

impl ExpenseCategory {
    /// 全カテゴリーの一覧（セレクトボックス用）
    pub const ALL: [ExpenseCategory; 7] = [
        ExpenseCategory::Fuel,
        ExpenseCategory::Maintenance,
        ExpenseCategory::Insurance,
        ExpenseCategory::Parking,
        ExpenseCategory::Toll,
        ExpenseCategory::Meal,
        ExpenseCategory::Other,
    ];

    /// 表示用の日本語ラベルを取得する
    pub fn label(&self) -> &'static str {
        match self {
            ExpenseCategory::Fuel => "燃料費",
            ExpenseCategory::Maintenance => "メンテナンス",
            ExpenseCategory::Insurance => "保険",
            ExpenseCategory::Parking => "駐車場代",
            ExpenseCategory::Toll => "通行料",
            ExpenseCategory::Meal => "食事代",
            ExpenseCategory::Other => "その他",
        }
    }
}

/// 経費データモデル（expensesテーブルの行）
///
/// 日報の主要経費とは別に、領収書付きの詳細な経費を管理する。
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Expense {
    pub id: String,
    pub user_id: String,
    /// 関連する日報のID（任意）
    pub daily_log_id: Option<String>,
    pub amount: f64,
    pub category: ExpenseCategory,
    /// 発生日（YYYY-MM-DD）
    pub date: String,
    pub description: Option<String>,
    pub receipt_url: Option<String>,
    /// 事業経費フラグ
    pub is_business_expense: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// 経費作成用の形状
#[derive(Debug, Serialize, Deserialize)]
pub struct ExpenseInsert {
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_log_id: Option<String>,
    pub amount: f64,
    pub category: ExpenseCategory,
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_business_expense: Option<bool>,
}

/// 経費更新用の形状（Noneのフィールドは変更しない）
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ExpenseUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_log_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<ExpenseCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_business_expense: Option<bool>,
}
