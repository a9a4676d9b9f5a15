/// 売上のデータアクセス層
use crate::features::revenues::models::{Revenue, RevenueInsert, RevenueUpdate};
use crate::shared::api_client::{BackendClient, OrderDirection};
use crate::shared::errors::{AppError, AppResult};
use chrono::NaiveDate;
use log::{debug, error};
use std::sync::Arc;

/// 売上リポジトリ
pub struct RevenueRepository {
    client: Arc<BackendClient>,
}

impl RevenueRepository {
    pub fn new(client: Arc<BackendClient>) -> Self {
        Self { client }
    }

    /// ユーザーの売上一覧を取得する（売上日の降順）
    ///
    /// # 引数
    /// * `user_id` - ユーザーID
    /// * `limit` - 取得件数の上限（Noneの場合は全件）
    pub async fn get_revenues(&self, user_id: &str, limit: Option<u32>) -> AppResult<Vec<Revenue>> {
        debug!("売上一覧を取得します: user_id={user_id}, limit={limit:?}");

        let mut query = self
            .client
            .from("revenues")
            .eq("user_id", user_id)
            .order("date", OrderDirection::Descending);

        if let Some(limit) = limit {
            query = query.limit(limit);
        }

        query.fetch::<Revenue>().await.map_err(|e| {
            error!("売上一覧の取得に失敗しました: {e}");
            e
        })
    }

    /// 期間を指定して売上を取得する（売上日の降順）
    pub async fn get_revenues_by_date_range(
        &self,
        user_id: &str,
        start_date: &str,
        end_date: &str,
    ) -> AppResult<Vec<Revenue>> {
        for (label, value) in [("開始日", start_date), ("終了日", end_date)] {
            if NaiveDate::parse_from_str(value, "%Y-%m-%d").is_err() {
                return Err(AppError::validation(format!(
                    "{label}の形式が正しくありません: {value}"
                )));
            }
        }

        debug!("期間指定で売上を取得します: user_id={user_id}, {start_date} 〜 {end_date}");

        self.client
            .from("revenues")
            .eq("user_id", user_id)
            .gte("date", start_date)
            .lte("date", end_date)
            .order("date", OrderDirection::Descending)
            .fetch::<Revenue>()
            .await
            .map_err(|e| {
                error!("期間指定の売上取得に失敗しました: {e}");
                e
            })
    }

    /// 売上を作成する
    ///
    /// # 戻り値
    /// サーバーが採番した売上（id・作成日時・更新日時を含む）
    pub async fn create_revenue(&self, revenue: &RevenueInsert) -> AppResult<Revenue> {
        if revenue.amount < 0.0 {
            return Err(AppError::validation("金額は0以上で入力してください"));
        }
        if revenue.client_name.trim().is_empty() {
            return Err(AppError::validation("委託先名を入力してください"));
        }

        debug!(
            "売上を作成します: user_id={}, client={}",
            revenue.user_id, revenue.client_name
        );

        self.client
            .from("revenues")
            .insert::<_, Revenue>(revenue)
            .await
            .map_err(|e| {
                error!("売上の作成に失敗しました: {e}");
                e
            })
    }

    /// 売上を部分更新する
    pub async fn update_revenue(&self, id: &str, patch: &RevenueUpdate) -> AppResult<Revenue> {
        if let Some(amount) = patch.amount {
            if amount < 0.0 {
                return Err(AppError::validation("金額は0以上で入力してください"));
            }
        }

        debug!("売上を更新します: id={id}");

        self.client
            .from("revenues")
            .eq("id", id)
            .update::<_, Revenue>(patch)
            .await
            .map_err(|e| {
                error!("売上の更新に失敗しました: {e}");
                e
            })
    }
}
