use serde::{Deserialize, Serialize};

/// 燃料の種類
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FuelType {
    Gasoline,
    Diesel,
    Hybrid,
    Electric,
}

impl FuelType {
    /// 全燃料種別の一覧（セレクトボックス用）
    pub const ALL: [FuelType; 4] = [
        FuelType::Gasoline,
        FuelType::Diesel,
        FuelType::Hybrid,
        FuelType::Electric,
    ];

    /// 表示用の日本語ラベルを取得する
    pub fn label(&self) -> &'static str {
        match self {
            FuelType::Gasoline => "ガソリン",
            FuelType::Diesel => "軽油",
            FuelType::Hybrid => "ハイブリッド",
            FuelType::Electric => "電気",
        }
    }
}

/// 車両データモデル（vehiclesテーブルの行）
///
/// 使用車両の識別情報とメンテナンス予定を管理する。
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Vehicle {
    pub id: String,
    pub user_id: String,
    /// 車両名
    pub name: String,
    /// ナンバープレート
    pub license_plate: String,
    pub fuel_type: Option<FuelType>,
    pub next_license_renewal_date: Option<String>,
    // オイル交換関連
    pub oil_change_date: Option<String>,
    pub element_change_date: Option<String>,
    pub next_oil_change_date: Option<String>,
    pub next_element_change_date: Option<String>,
    pub oil_change_mileage: Option<f64>,
    pub element_change_mileage: Option<f64>,
    // 車検
    pub next_inspection_date: Option<String>,
    // メンテナンス関連
    pub maintenance_date: Option<String>,
    /// 使用中フラグ
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// 車両作成用の形状
#[derive(Debug, Serialize, Deserialize)]
pub struct VehicleInsert {
    pub user_id: String,
    pub name: String,
    pub license_plate: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fuel_type: Option<FuelType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_license_renewal_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oil_change_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub element_change_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_oil_change_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_element_change_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oil_change_mileage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub element_change_mileage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_inspection_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maintenance_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl VehicleInsert {
    /// 新しい車両作成データを作成する（必須フィールドのみ）
    pub fn new(user_id: &str, name: &str, license_plate: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            name: name.to_string(),
            license_plate: license_plate.to_string(),
            fuel_type: None,
            next_license_renewal_date: None,
            oil_change_date: None,
            element_change_date: None,
            next_oil_change_date: None,
            next_element_change_date: None,
            oil_change_mileage: None,
            element_change_mileage: None,
            next_inspection_date: None,
            maintenance_date: None,
            is_active: None,
        }
    }
}

/// 車両更新用の形状（Noneのフィールドは変更しない）
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct VehicleUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_plate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fuel_type: Option<FuelType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_license_renewal_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oil_change_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub element_change_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_oil_change_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_element_change_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oil_change_mileage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub element_change_mileage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_inspection_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maintenance_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}
