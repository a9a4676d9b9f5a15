/// 車両のデータアクセス層
use crate::features::vehicles::models::{Vehicle, VehicleInsert, VehicleUpdate};
use crate::shared::api_client::{BackendClient, OrderDirection};
use crate::shared::errors::{AppError, AppResult};
use log::{debug, error};
use std::sync::Arc;

/// 車両リポジトリ
pub struct VehicleRepository {
    client: Arc<BackendClient>,
}

impl VehicleRepository {
    pub fn new(client: Arc<BackendClient>) -> Self {
        Self { client }
    }

    /// ユーザーの車両一覧を取得する（登録日時の降順）
    pub async fn get_vehicles(&self, user_id: &str) -> AppResult<Vec<Vehicle>> {
        debug!("車両一覧を取得します: user_id={user_id}");

        self.client
            .from("vehicles")
            .eq("user_id", user_id)
            .order("created_at", OrderDirection::Descending)
            .fetch::<Vehicle>()
            .await
            .map_err(|e| {
                error!("車両一覧の取得に失敗しました: {e}");
                e
            })
    }

    /// 車両を登録する
    ///
    /// # 戻り値
    /// サーバーが採番した車両（id・作成日時・更新日時を含む）
    pub async fn create_vehicle(&self, vehicle: &VehicleInsert) -> AppResult<Vehicle> {
        if vehicle.name.trim().is_empty() {
            return Err(AppError::validation("車両名を入力してください"));
        }
        if vehicle.license_plate.trim().is_empty() {
            return Err(AppError::validation("ナンバープレートを入力してください"));
        }

        debug!("車両を登録します: user_id={}, name={}", vehicle.user_id, vehicle.name);

        self.client
            .from("vehicles")
            .insert::<_, Vehicle>(vehicle)
            .await
            .map_err(|e| {
                error!("車両の登録に失敗しました: {e}");
                e
            })
    }

    /// 車両を部分更新する
    pub async fn update_vehicle(&self, id: &str, patch: &VehicleUpdate) -> AppResult<Vehicle> {
        debug!("車両を更新します: id={id}");

        self.client
            .from("vehicles")
            .eq("id", id)
            .update::<_, Vehicle>(patch)
            .await
            .map_err(|e| {
                error!("車両の更新に失敗しました: {e}");
                e
            })
    }
}
