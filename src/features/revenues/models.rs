use serde::{Deserialize, Serialize};

/// 支払い状況
///
/// バックエンドの列挙型と同じ値のみを受け付ける。
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Overdue,
}

impl PaymentStatus {
    /// 全支払い状況の一覧（セレクトボックス用）
    pub const ALL: [PaymentStatus; 3] =
        [PaymentStatus::Pending, PaymentStatus::Paid, PaymentStatus::Overdue];

    /// 表示用の日本語ラベルを取得する
    pub fn label(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "未払い",
            PaymentStatus::Paid => "支払済み",
            PaymentStatus::Overdue => "延滞",
        }
    }
}

/// 売上データモデル（revenuesテーブルの行）
///
/// 委託先別の売上と請求書・支払い状況を管理する。
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Revenue {
    pub id: String,
    pub user_id: String,
    pub amount: f64,
    /// 委託先名
    pub client_name: String,
    /// 売上種別
    pub revenue_type: String,
    /// 売上日（YYYY-MM-DD）
    pub date: String,
    pub description: Option<String>,
    /// 請求書番号
    pub invoice_number: Option<String>,
    pub payment_status: PaymentStatus,
    pub created_at: String,
    pub updated_at: String,
}

/// 売上作成用の形状
///
/// `payment_status`を省略した場合はサーバー側の既定値（未払い）になる。
#[derive(Debug, Serialize, Deserialize)]
pub struct RevenueInsert {
    pub user_id: String,
    pub amount: f64,
    pub client_name: String,
    pub revenue_type: String,
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<PaymentStatus>,
}

/// 売上更新用の形状（Noneのフィールドは変更しない）
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct RevenueUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revenue_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<PaymentStatus>,
}
