use serde::{Deserialize, Serialize};

/// 走行距離の整合性判定に使う許容誤差（km単位の記録に対して十分小さい値）
const DISTANCE_TOLERANCE: f64 = 1e-6;

/// 日報データモデル（daily_logsテーブルの行）
///
/// 日々の運転記録。走行距離、就業時間、配達件数、その日の主要経費を持つ。
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DailyLog {
    pub id: String,
    pub user_id: String,
    /// 記録日（YYYY-MM-DD）
    pub date: String,
    // 走行距離関連
    pub start_distance: Option<f64>,
    pub end_distance: Option<f64>,
    pub total_distance: Option<f64>,
    // 業務記録関連
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub work_hours: Option<f64>,
    /// 配達件数
    pub delivery: Option<i64>,
    // その日の主要経費関連
    pub fuel_cost: Option<f64>,
    pub toll_cost: Option<f64>,
    pub parking_cost: Option<f64>,
    pub other_expenses: Option<f64>,
    pub notes: Option<String>,
    // システムフィールド
    pub created_at: String,
    pub updated_at: String,
}

/// 日報作成用の形状
#[derive(Debug, Serialize, Deserialize)]
pub struct DailyLogInsert {
    pub user_id: String,
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_distance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_distance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_distance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_hours: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fuel_cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub toll_cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parking_cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_expenses: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl DailyLogInsert {
    /// 新しい日報作成データを作成する（必須フィールドのみ）
    pub fn new(user_id: &str, date: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            date: date.to_string(),
            start_distance: None,
            end_distance: None,
            total_distance: None,
            start_time: None,
            end_time: None,
            work_hours: None,
            delivery: None,
            fuel_cost: None,
            toll_cost: None,
            parking_cost: None,
            other_expenses: None,
            notes: None,
        }
    }

    /// 走行距離の整合性を確認する
    ///
    /// 開始・終了・総走行距離の3つが揃っている場合のみ
    /// `total_distance == end_distance - start_distance` を検査する。
    /// 揃っていない場合は整合しているとみなす。
    pub fn distance_is_consistent(&self) -> bool {
        match (self.start_distance, self.end_distance, self.total_distance) {
            (Some(start), Some(end), Some(total)) => {
                (end - start - total).abs() < DISTANCE_TOLERANCE
            }
            _ => true,
        }
    }
}

/// 日報更新用の形状（Noneのフィールドは変更しない）
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct DailyLogUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_distance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_distance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_distance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_hours: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fuel_cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub toll_cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parking_cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_expenses: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl DailyLogUpdate {
    /// 更新後の走行距離の整合性を確認する
    ///
    /// 3つの距離フィールドすべてがこの更新に含まれている場合のみ検査する。
    /// 一部のみの更新は既存行との突き合わせが必要になるため、ここでは
    /// 判定せず整合しているとみなす。
    pub fn distance_is_consistent(&self) -> bool {
        match (self.start_distance, self.end_distance, self.total_distance) {
            (Some(start), Some(end), Some(total)) => {
                (end - start - total).abs() < DISTANCE_TOLERANCE
            }
            _ => true,
        }
    }
}

/// 経費合計付きの日報（集計プロジェクション行）
///
/// `total_expenses`はサーバー側で
/// `fuel_cost + toll_cost + parking_cost + other_expenses`として計算される。
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DailyLogWithTotal {
    #[serde(flatten)]
    pub log: DailyLog,
    pub total_expenses: Option<f64>,
}
