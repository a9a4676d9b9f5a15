/// 汎用バックエンドクライアント
///
/// ホスト型バックエンド（パスワード認証 + テーブルAPI）との通信を行うクライアント。
/// 認証エンドポイントとテーブルクエリの両方をここに集約し、
/// 各featureのサービス・リポジトリから利用する。
use crate::shared::config::environment::BackendConfig;
use crate::shared::errors::{AppError, AppResult};
use log::{debug, error, warn};
use reqwest::{Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// クライアントの実行コンテキスト
///
/// - `Interactive`: アプリケーション生存期間で1つ。サインインで得た
///   セッションをハンドル内に保持し、以降の呼び出しに自動で付与する。
/// - `ServerRequest`: リクエストごとに1つ。セッションは保持せず、
///   生成時に受け取ったリクエスト由来のトークンのみを使用する。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMode {
    /// 対話型（ブラウザ相当）コンテキスト
    Interactive,
    /// サーバーサイドのリクエスト単位コンテキスト
    ServerRequest,
}

/// 認証エンドポイント呼び出しの失敗
#[derive(Debug)]
pub enum AuthCallError {
    /// バックエンドがエラーレスポンスを返した（生のメッセージを保持）
    Upstream {
        /// HTTPステータス
        status: StatusCode,
        /// バックエンドのエラーメッセージ（未加工）
        message: String,
    },
    /// 通信・解析などの予期しない失敗
    Unexpected(AppError),
}

/// 認証エンドポイントのエラーレスポンス
///
/// バックエンドのバージョンによりフィールド名が揺れるため、
/// 候補をすべて受けて最初に見つかったものを採用する。
#[derive(Debug, Deserialize)]
struct AuthErrorBody {
    error_description: Option<String>,
    msg: Option<String>,
    message: Option<String>,
    error: Option<String>,
}

impl AuthErrorBody {
    fn into_message(self) -> Option<String> {
        self.error_description
            .or(self.msg)
            .or(self.message)
            .or(self.error)
    }
}

/// テーブルAPIのエラーレスポンス
#[derive(Debug, Deserialize)]
struct RestErrorBody {
    message: Option<String>,
    code: Option<String>,
}

/// バックエンドサービスへのハンドル
///
/// グローバルなシングルトンではなく、呼び出し側が明示的に生成して
/// 引き回す。サーバーサイドではリクエストごとに生成すること。
pub struct BackendClient {
    http: Client,
    config: BackendConfig,
    mode: SessionMode,
    access_token: Mutex<Option<String>>,
}

impl BackendClient {
    /// 対話型コンテキストのクライアントを作成する
    ///
    /// # 引数
    /// * `config` - バックエンド接続設定
    pub fn new_interactive(config: BackendConfig) -> AppResult<Self> {
        Self::build(config, SessionMode::Interactive, None)
    }

    /// サーバーサイドのリクエスト単位クライアントを作成する
    ///
    /// # 引数
    /// * `config` - バックエンド接続設定
    /// * `access_token` - 受信リクエストから取り出したアクセストークン
    pub fn new_for_request(config: BackendConfig, access_token: Option<String>) -> AppResult<Self> {
        Self::build(config, SessionMode::ServerRequest, access_token)
    }

    fn build(
        config: BackendConfig,
        mode: SessionMode,
        access_token: Option<String>,
    ) -> AppResult<Self> {
        config.validate()?;

        // リトライ・タイムアウトは行わない。失敗はそのまま呼び出し側に返す。
        let http = Client::builder()
            .build()
            .map_err(|e| AppError::configuration(format!("HTTPクライアント初期化失敗: {e}")))?;

        debug!("BackendClientを作成しました: mode={mode:?}");

        Ok(Self {
            http,
            config,
            mode,
            access_token: Mutex::new(access_token),
        })
    }

    /// 実行コンテキストを取得する
    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    /// バックエンド接続設定を取得する
    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    /// サインインで得たアクセストークンを保持する
    ///
    /// サーバーサイドのクライアントはリクエストを跨いでセッションを
    /// 保持してはならないため、何もせず警告のみ出す。
    pub fn store_session_token(&self, token: &str) {
        match self.mode {
            SessionMode::Interactive => {
                let mut guard = self.access_token.lock().unwrap();
                *guard = Some(token.to_string());
                debug!("セッショントークンを保持しました");
            }
            SessionMode::ServerRequest => {
                warn!("サーバーサイドクライアントはセッションを保持しません");
            }
        }
    }

    /// 保持しているアクセストークンを破棄する
    pub fn clear_session_token(&self) {
        let mut guard = self.access_token.lock().unwrap();
        *guard = None;
    }

    /// 保持しているアクセストークンを取得する
    pub fn session_token(&self) -> Option<String> {
        self.access_token.lock().unwrap().clone()
    }

    /// セッションが存在するかどうかを判定する
    pub fn has_session(&self) -> bool {
        self.access_token.lock().unwrap().is_some()
    }

    /// Authorizationヘッダーに使用するトークンを決定する
    ///
    /// セッションがない場合は公開APIキーをそのまま使用する。
    fn bearer_token(&self) -> String {
        self.session_token()
            .unwrap_or_else(|| self.config.anon_key.clone())
    }

    // ------------------------------------------------------------------
    // 認証エンドポイント
    // ------------------------------------------------------------------

    /// 認証エンドポイントにPOSTリクエストを送信し、レスポンスを解析する
    ///
    /// # 引数
    /// * `path` - エンドポイントのパス（例: `/auth/v1/signup`）
    /// * `query` - クエリパラメータ
    /// * `body` - リクエストボディ
    /// * `bearer` - 明示的に付与するアクセストークン（省略時は保持中のものを使用）
    pub async fn auth_post<T>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        body: &serde_json::Value,
        bearer: Option<&str>,
    ) -> Result<T, AuthCallError>
    where
        T: DeserializeOwned,
    {
        let response = self.send_auth_post(path, query, body, bearer).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| AuthCallError::Unexpected(AppError::Network(format!(
                "認証レスポンスの解析に失敗しました: {e}"
            ))))
    }

    /// 認証エンドポイントにPOSTリクエストを送信する（レスポンスボディ不要版）
    pub async fn auth_post_empty(
        &self,
        path: &str,
        query: &[(&str, &str)],
        body: &serde_json::Value,
        bearer: Option<&str>,
    ) -> Result<(), AuthCallError> {
        self.send_auth_post(path, query, body, bearer).await?;
        Ok(())
    }

    async fn send_auth_post(
        &self,
        path: &str,
        query: &[(&str, &str)],
        body: &serde_json::Value,
        bearer: Option<&str>,
    ) -> Result<Response, AuthCallError> {
        let url = format!("{}{path}", self.config.base_url);
        debug!("認証リクエスト送信: POST {path}");

        let token = bearer
            .map(ToString::to_string)
            .unwrap_or_else(|| self.bearer_token());

        let response = self
            .http
            .post(&url)
            .query(query)
            .header("apikey", &self.config.anon_key)
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .map_err(|e| AuthCallError::Unexpected(AppError::Network(e.to_string())))?;

        if response.status().is_success() {
            Ok(response)
        } else {
            Err(Self::auth_error_from_response(response).await)
        }
    }

    /// 認証エンドポイントにGETリクエストを送信し、レスポンスを解析する
    ///
    /// # 引数
    /// * `path` - エンドポイントのパス（例: `/auth/v1/user`）
    /// * `bearer` - アクセストークン
    pub async fn auth_get<T>(&self, path: &str, bearer: &str) -> Result<T, AuthCallError>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}{path}", self.config.base_url);
        debug!("認証リクエスト送信: GET {path}");

        let response = self
            .http
            .get(&url)
            .header("apikey", &self.config.anon_key)
            .bearer_auth(bearer)
            .send()
            .await
            .map_err(|e| AuthCallError::Unexpected(AppError::Network(e.to_string())))?;

        if response.status().is_success() {
            response.json::<T>().await.map_err(|e| {
                AuthCallError::Unexpected(AppError::Network(format!(
                    "認証レスポンスの解析に失敗しました: {e}"
                )))
            })
        } else {
            Err(Self::auth_error_from_response(response).await)
        }
    }

    /// 認証エラーレスポンスから生のエラーメッセージを取り出す
    async fn auth_error_from_response(response: Response) -> AuthCallError {
        let status = response.status();
        let text = response.text().await.unwrap_or_default();

        let message = serde_json::from_str::<AuthErrorBody>(&text)
            .ok()
            .and_then(AuthErrorBody::into_message)
            .unwrap_or(text);

        debug!("認証エンドポイントがエラーを返しました: status={status}, message={message}");

        AuthCallError::Upstream { status, message }
    }

    // ------------------------------------------------------------------
    // テーブルクエリ
    // ------------------------------------------------------------------

    /// 指定テーブルへのクエリビルダーを作成する
    ///
    /// # 引数
    /// * `table` - テーブル名
    pub fn from(&self, table: &str) -> QueryBuilder<'_> {
        QueryBuilder {
            client: self,
            table: table.to_string(),
            select: "*".to_string(),
            filters: Vec::new(),
            order: None,
            limit: None,
        }
    }

    /// テーブルAPIにリクエストを送信する
    async fn rest_request(
        &self,
        method: Method,
        table: &str,
        query: &[(String, String)],
        body: Option<&serde_json::Value>,
        prefer_representation: bool,
    ) -> AppResult<Response> {
        let url = format!("{}/rest/v1/{table}", self.config.base_url);
        debug!("テーブルリクエスト送信: {method} {table}");

        let mut request = self
            .http
            .request(method, &url)
            .query(query)
            .header("apikey", &self.config.anon_key)
            .bearer_auth(self.bearer_token());

        if prefer_representation {
            request = request.header("Prefer", "return=representation");
        }

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;

        if response.status().is_success() {
            Ok(response)
        } else {
            Err(Self::rest_error_from_response(response).await)
        }
    }

    /// テーブルAPIのエラーレスポンスをAppErrorに変換する
    async fn rest_error_from_response(response: Response) -> AppError {
        let status = response.status();
        let text = response.text().await.unwrap_or_default();

        let message = match serde_json::from_str::<RestErrorBody>(&text) {
            Ok(body) => {
                let message = body.message.unwrap_or_else(|| text.clone());
                match body.code {
                    Some(code) => format!("{code}: {message}"),
                    None => message,
                }
            }
            Err(_) => text,
        };

        error!("テーブルAPIがエラーを返しました: status={status}, message={message}");

        AppError::Backend(message)
    }
}

/// 並び順の方向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderDirection {
    /// 昇順
    Ascending,
    /// 降順
    Descending,
}

impl OrderDirection {
    fn suffix(self) -> &'static str {
        match self {
            OrderDirection::Ascending => "asc",
            OrderDirection::Descending => "desc",
        }
    }
}

/// テーブルクエリビルダー
///
/// フィルター・並び順・件数制限を組み立ててからリクエストを発行する。
/// 生成されるクエリ文字列は`query_pairs`で確認できる。
pub struct QueryBuilder<'a> {
    client: &'a BackendClient,
    table: String,
    select: String,
    filters: Vec<(String, String)>,
    order: Option<(String, OrderDirection)>,
    limit: Option<u32>,
}

impl QueryBuilder<'_> {
    /// 取得するカラムを指定する（デフォルトは`*`）
    pub fn select(mut self, columns: &str) -> Self {
        self.select = columns.to_string();
        self
    }

    /// 等値フィルターを追加する
    pub fn eq(mut self, column: &str, value: &str) -> Self {
        self.filters.push((column.to_string(), format!("eq.{value}")));
        self
    }

    /// 「以上」フィルターを追加する
    pub fn gte(mut self, column: &str, value: &str) -> Self {
        self.filters
            .push((column.to_string(), format!("gte.{value}")));
        self
    }

    /// 「以下」フィルターを追加する
    pub fn lte(mut self, column: &str, value: &str) -> Self {
        self.filters
            .push((column.to_string(), format!("lte.{value}")));
        self
    }

    /// 並び順を指定する
    pub fn order(mut self, column: &str, direction: OrderDirection) -> Self {
        self.order = Some((column.to_string(), direction));
        self
    }

    /// 取得件数の上限を指定する
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// 送信されるクエリパラメータの組を取得する
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![("select".to_string(), self.select.clone())];

        for (column, condition) in &self.filters {
            pairs.push((column.clone(), condition.clone()));
        }

        if let Some((column, direction)) = &self.order {
            pairs.push(("order".to_string(), format!("{column}.{}", direction.suffix())));
        }

        if let Some(limit) = self.limit {
            pairs.push(("limit".to_string(), limit.to_string()));
        }

        pairs
    }

    /// 行の一覧を取得する
    pub async fn fetch<T>(self) -> AppResult<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let pairs = self.query_pairs();
        let response = self
            .client
            .rest_request(Method::GET, &self.table, &pairs, None, false)
            .await?;

        response
            .json::<Vec<T>>()
            .await
            .map_err(|e| AppError::Network(format!("行データの解析に失敗しました: {e}")))
    }

    /// 先頭の1行を取得する（該当なしの場合はNone）
    pub async fn fetch_one<T>(self) -> AppResult<Option<T>>
    where
        T: DeserializeOwned,
    {
        let rows = self.fetch::<T>().await?;
        Ok(rows.into_iter().next())
    }

    /// 1行を挿入し、サーバーが採番した行を返す
    ///
    /// # 引数
    /// * `row` - 挿入する行（Insert形状）
    pub async fn insert<B, T>(self, row: &B) -> AppResult<T>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let body = serde_json::to_value(row)?;
        let pairs = self.query_pairs();
        let response = self
            .client
            .rest_request(Method::POST, &self.table, &pairs, Some(&body), true)
            .await?;

        let mut rows = response
            .json::<Vec<T>>()
            .await
            .map_err(|e| AppError::Network(format!("挿入結果の解析に失敗しました: {e}")))?;

        if rows.is_empty() {
            return Err(AppError::backend("挿入結果が返されませんでした"));
        }
        Ok(rows.remove(0))
    }

    /// フィルターに一致する行を部分更新し、更新後の行を返す
    ///
    /// # 引数
    /// * `patch` - 更新する行（Update形状、Noneのフィールドは変更しない）
    pub async fn update<B, T>(self, patch: &B) -> AppResult<T>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let body = serde_json::to_value(patch)?;
        let pairs = self.query_pairs();
        let response = self
            .client
            .rest_request(Method::PATCH, &self.table, &pairs, Some(&body), true)
            .await?;

        let mut rows = response
            .json::<Vec<T>>()
            .await
            .map_err(|e| AppError::Network(format!("更新結果の解析に失敗しました: {e}")))?;

        if rows.is_empty() {
            return Err(AppError::not_found("更新対象の行"));
        }
        Ok(rows.remove(0))
    }
}
