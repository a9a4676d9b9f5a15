/// 日報のデータアクセス層
///
/// daily_logsテーブルへのクエリをまとめる。取得系は常に記録日の降順で返す。
use crate::features::daily_logs::models::{
    DailyLog, DailyLogInsert, DailyLogUpdate, DailyLogWithTotal,
};
use crate::shared::api_client::{BackendClient, OrderDirection};
use crate::shared::errors::{AppError, AppResult};
use chrono::NaiveDate;
use log::{debug, error};
use std::sync::Arc;

/// 経費合計プロジェクションのカラム指定
const WITH_TOTAL_SELECT: &str = "*,total_expenses:fuel_cost+toll_cost+parking_cost+other_expenses";

/// 記録日の形式（YYYY-MM-DD）を検証する
fn validate_date(label: &str, value: &str) -> AppResult<()> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|_| ())
        .map_err(|_| AppError::validation(format!("{label}の形式が正しくありません: {value}")))
}

/// 日報リポジトリ
pub struct DailyLogRepository {
    client: Arc<BackendClient>,
}

impl DailyLogRepository {
    pub fn new(client: Arc<BackendClient>) -> Self {
        Self { client }
    }

    /// ユーザーの日報一覧を取得する（記録日の降順）
    ///
    /// # 引数
    /// * `user_id` - ユーザーID
    /// * `limit` - 取得件数の上限（Noneの場合は全件）
    pub async fn get_daily_logs(
        &self,
        user_id: &str,
        limit: Option<u32>,
    ) -> AppResult<Vec<DailyLog>> {
        debug!("日報一覧を取得します: user_id={user_id}, limit={limit:?}");

        let mut query = self
            .client
            .from("daily_logs")
            .eq("user_id", user_id)
            .order("date", OrderDirection::Descending);

        if let Some(limit) = limit {
            query = query.limit(limit);
        }

        query.fetch::<DailyLog>().await.map_err(|e| {
            error!("日報一覧の取得に失敗しました: {e}");
            e
        })
    }

    /// 期間を指定して日報を取得する（記録日の降順）
    ///
    /// # 引数
    /// * `user_id` - ユーザーID
    /// * `start_date` - 開始日（YYYY-MM-DD、この日を含む）
    /// * `end_date` - 終了日（YYYY-MM-DD、この日を含む）
    pub async fn get_daily_logs_by_date_range(
        &self,
        user_id: &str,
        start_date: &str,
        end_date: &str,
    ) -> AppResult<Vec<DailyLog>> {
        validate_date("開始日", start_date)?;
        validate_date("終了日", end_date)?;

        debug!("期間指定で日報を取得します: user_id={user_id}, {start_date} 〜 {end_date}");

        self.client
            .from("daily_logs")
            .eq("user_id", user_id)
            .gte("date", start_date)
            .lte("date", end_date)
            .order("date", OrderDirection::Descending)
            .fetch::<DailyLog>()
            .await
            .map_err(|e| {
                error!("期間指定の日報取得に失敗しました: {e}");
                e
            })
    }

    /// 日報を作成する
    ///
    /// 走行距離の3項目が揃っている場合は整合性をローカルで検証し、
    /// 不整合なら通信せずにバリデーションエラーを返す。
    ///
    /// # 引数
    /// * `log` - 作成する日報
    ///
    /// # 戻り値
    /// サーバーが採番した日報（id・作成日時・更新日時を含む）
    pub async fn create_daily_log(&self, log: &DailyLogInsert) -> AppResult<DailyLog> {
        if !log.distance_is_consistent() {
            return Err(AppError::validation(
                "総走行距離が開始・終了の走行距離と一致しません",
            ));
        }

        validate_date("記録日", &log.date)?;
        debug!("日報を作成します: user_id={}, date={}", log.user_id, log.date);

        self.client
            .from("daily_logs")
            .insert::<_, DailyLog>(log)
            .await
            .map_err(|e| {
                error!("日報の作成に失敗しました: {e}");
                e
            })
    }

    /// 日報を部分更新する
    ///
    /// # 引数
    /// * `id` - 日報ID
    /// * `patch` - 更新内容（Noneのフィールドは変更しない）
    pub async fn update_daily_log(&self, id: &str, patch: &DailyLogUpdate) -> AppResult<DailyLog> {
        if !patch.distance_is_consistent() {
            return Err(AppError::validation(
                "総走行距離が開始・終了の走行距離と一致しません",
            ));
        }

        if let Some(date) = &patch.date {
            validate_date("記録日", date)?;
        }

        debug!("日報を更新します: id={id}");

        self.client
            .from("daily_logs")
            .eq("id", id)
            .update::<_, DailyLog>(patch)
            .await
            .map_err(|e| {
                error!("日報の更新に失敗しました: {e}");
                e
            })
    }

    /// 経費合計付きの日報一覧を取得する（記録日の降順）
    ///
    /// 合計はサーバー側で燃料費・通行料・駐車場代・その他経費から計算される。
    pub async fn get_daily_logs_with_total(
        &self,
        user_id: &str,
    ) -> AppResult<Vec<DailyLogWithTotal>> {
        debug!("経費合計付きの日報一覧を取得します: user_id={user_id}");

        self.client
            .from("daily_logs")
            .select(WITH_TOTAL_SELECT)
            .eq("user_id", user_id)
            .order("date", OrderDirection::Descending)
            .fetch::<DailyLogWithTotal>()
            .await
            .map_err(|e| {
                error!("経費合計付き日報の取得に失敗しました: {e}");
                e
            })
    }
}
