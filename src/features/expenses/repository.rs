/// 経費のデータアクセス層
use crate::features::expenses::models::{Expense, ExpenseInsert, ExpenseUpdate};
use crate::shared::api_client::{BackendClient, OrderDirection};
use crate::shared::errors::{AppError, AppResult};
use chrono::NaiveDate;
use log::{debug, error};
use std::sync::Arc;

/// 経費リポジトリ
pub struct ExpenseRepository {
    client: Arc<BackendClient>,
}

impl ExpenseRepository {
    pub fn new(client: Arc<BackendClient>) -> Self {
        Self { client }
    }

    /// ユーザーの経費一覧を取得する（発生日の降順）
    ///
    /// # 引数
    /// * `user_id` - ユーザーID
    /// * `limit` - 取得件数の上限（Noneの場合は全件）
    pub async fn get_expenses(&self, user_id: &str, limit: Option<u32>) -> AppResult<Vec<Expense>> {
        debug!("経費一覧を取得します: user_id={user_id}, limit={limit:?}");

        let mut query = self
            .client
            .from("expenses")
            .eq("user_id", user_id)
            .order("date", OrderDirection::Descending);

        if let Some(limit) = limit {
            query = query.limit(limit);
        }

        query.fetch::<Expense>().await.map_err(|e| {
            error!("経費一覧の取得に失敗しました: {e}");
            e
        })
    }

    /// 期間を指定して経費を取得する（発生日の降順）
    pub async fn get_expenses_by_date_range(
        &self,
        user_id: &str,
        start_date: &str,
        end_date: &str,
    ) -> AppResult<Vec<Expense>> {
        for (label, value) in [("開始日", start_date), ("終了日", end_date)] {
            if NaiveDate::parse_from_str(value, "%Y-%m-%d").is_err() {
                return Err(AppError::validation(format!(
                    "{label}の形式が正しくありません: {value}"
                )));
            }
        }

        debug!("期間指定で経費を取得します: user_id={user_id}, {start_date} 〜 {end_date}");

        self.client
            .from("expenses")
            .eq("user_id", user_id)
            .gte("date", start_date)
            .lte("date", end_date)
            .order("date", OrderDirection::Descending)
            .fetch::<Expense>()
            .await
            .map_err(|e| {
                error!("期間指定の経費取得に失敗しました: {e}");
                e
            })
    }

    /// 経費を作成する
    ///
    /// # 戻り値
    /// サーバーが採番した経費（id・作成日時・更新日時を含む）
    pub async fn create_expense(&self, expense: &ExpenseInsert) -> AppResult<Expense> {
        if expense.amount < 0.0 {
            return Err(AppError::validation("金額は0以上で入力してください"));
        }

        debug!(
            "経費を作成します: user_id={}, category={:?}",
            expense.user_id, expense.category
        );

        self.client
            .from("expenses")
            .insert::<_, Expense>(expense)
            .await
            .map_err(|e| {
                error!("経費の作成に失敗しました: {e}");
                e
            })
    }

    /// 経費を部分更新する
    pub async fn update_expense(&self, id: &str, patch: &ExpenseUpdate) -> AppResult<Expense> {
        if let Some(amount) = patch.amount {
            if amount < 0.0 {
                return Err(AppError::validation("金額は0以上で入力してください"));
            }
        }

        debug!("経費を更新します: id={id}");

        self.client
            .from("expenses")
            .eq("id", id)
            .update::<_, Expense>(patch)
            .await
            .map_err(|e| {
                error!("経費の更新に失敗しました: {e}");
                e
            })
    }
}
