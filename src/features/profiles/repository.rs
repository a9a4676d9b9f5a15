/// プロフィールのデータアクセス層
///
/// usersテーブルへのクエリをまとめる。失敗はログに記録した上で
/// `AppResult`のエラーとして呼び出し側に返す。
use crate::features::profiles::models::{Profile, ProfileInsert, ProfileUpdate};
use crate::shared::api_client::BackendClient;
use crate::shared::errors::AppResult;
use log::{debug, error};
use std::sync::Arc;

/// プロフィールリポジトリ
pub struct ProfileRepository {
    client: Arc<BackendClient>,
}

impl ProfileRepository {
    pub fn new(client: Arc<BackendClient>) -> Self {
        Self { client }
    }

    /// ユーザーのプロフィールを取得する
    ///
    /// # 引数
    /// * `user_id` - ユーザーID
    ///
    /// # 戻り値
    /// プロフィール（存在しない場合はNone）
    pub async fn get_profile(&self, user_id: &str) -> AppResult<Option<Profile>> {
        debug!("プロフィールを取得します: user_id={user_id}");

        self.client
            .from("users")
            .eq("id", user_id)
            .fetch_one::<Profile>()
            .await
            .map_err(|e| {
                error!("プロフィールの取得に失敗しました: {e}");
                e
            })
    }

    /// プロフィールを作成する
    ///
    /// # 引数
    /// * `profile` - 作成するプロフィール（IDは認証ユーザーのIDと同一）
    pub async fn create_profile(&self, profile: &ProfileInsert) -> AppResult<Profile> {
        debug!("プロフィールを作成します: id={}", profile.id);

        self.client
            .from("users")
            .insert::<_, Profile>(profile)
            .await
            .map_err(|e| {
                error!("プロフィールの作成に失敗しました: {e}");
                e
            })
    }

    /// プロフィールを部分更新する
    ///
    /// # 引数
    /// * `user_id` - ユーザーID
    /// * `patch` - 更新内容（Noneのフィールドは変更しない）
    ///
    /// # 戻り値
    /// 更新後のプロフィール
    pub async fn update_profile(&self, user_id: &str, patch: &ProfileUpdate) -> AppResult<Profile> {
        debug!("プロフィールを更新します: user_id={user_id}");

        self.client
            .from("users")
            .eq("id", user_id)
            .update::<_, Profile>(patch)
            .await
            .map_err(|e| {
                error!("プロフィールの更新に失敗しました: {e}");
                e
            })
    }
}
