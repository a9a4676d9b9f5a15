/// テスト用スタブバックエンド
///
/// パスワード認証とテーブルAPIの最小限の振る舞いをローカルで再現する。
/// 実際のバックエンドと同じワイヤ形状（クエリパラメータ・レスポンスJSON）を
/// 返すことで、クライアント側のコードをそのままテストできる。
use crate::shared::config::environment::BackendConfig;
use http_body_util::BodyExt;
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// スタブバックエンドの内部状態
struct StubState {
    /// 受信したリクエストの総数
    request_count: AtomicUsize,
    /// 登録済みユーザー（メールアドレス -> (パスワード, ユーザーID)）
    users: Mutex<HashMap<String, (String, String)>>,
    /// 発行済みトークン（トークン -> メールアドレス）
    tokens: Mutex<HashMap<String, String>>,
    /// テーブルごとの行データ
    tables: Mutex<HashMap<String, Vec<Value>>>,
    /// 採番カウンター
    next_id: AtomicUsize,
}

/// テスト用スタブバックエンド
pub struct StubBackend {
    addr: SocketAddr,
    state: Arc<StubState>,
}

impl StubBackend {
    /// スタブバックエンドを起動する
    ///
    /// 初期状態で `driver@example.com` / `secret123` のユーザーが
    /// 登録されている。
    pub async fn start() -> Self {
        let mut users = HashMap::new();
        users.insert(
            "driver@example.com".to_string(),
            ("secret123".to_string(), "user-driver".to_string()),
        );

        let state = Arc::new(StubState {
            request_count: AtomicUsize::new(0),
            users: Mutex::new(users),
            tokens: Mutex::new(HashMap::new()),
            tables: Mutex::new(HashMap::new()),
            next_id: AtomicUsize::new(1),
        });

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("スタブバックエンドのポート確保に失敗");
        let addr = listener.local_addr().expect("ローカルアドレス取得に失敗");

        let accept_state = Arc::clone(&state);
        tokio::spawn(async move {
            loop {
                let Ok((stream, _)) = listener.accept().await else {
                    break;
                };
                let conn_state = Arc::clone(&accept_state);
                tokio::spawn(async move {
                    let io = TokioIo::new(stream);
                    let service = service_fn(move |req| {
                        let state = Arc::clone(&conn_state);
                        async move { handle_request(req, state).await }
                    });
                    let _ = http1::Builder::new().serve_connection(io, service).await;
                });
            }
        });

        Self { addr, state }
    }

    /// このスタブを指すバックエンド設定を取得する
    pub fn config(&self) -> BackendConfig {
        BackendConfig {
            base_url: format!("http://{}", self.addr),
            anon_key: "stub_anon_key".to_string(),
            site_url: Some("http://localhost:3000".to_string()),
        }
    }

    /// 受信したリクエストの総数を取得する
    pub fn request_count(&self) -> usize {
        self.state.request_count.load(Ordering::SeqCst)
    }

    /// テーブルに行を直接投入する（フィクスチャ用）
    ///
    /// `id`/`created_at`/`updated_at`が含まれていない場合は補完する。
    pub fn seed_row(&self, table: &str, mut row: Value) {
        if let Some(object) = row.as_object_mut() {
            let n = self.state.next_id.fetch_add(1, Ordering::SeqCst);
            object
                .entry("id")
                .or_insert_with(|| json!(format!("row-{n}")));
            let now = chrono::Utc::now().to_rfc3339();
            object.entry("created_at").or_insert_with(|| json!(now));
            object.entry("updated_at").or_insert_with(|| json!(now));
        }
        let mut tables = self.state.tables.lock().unwrap();
        tables.entry(table.to_string()).or_default().push(row);
    }

    /// テーブルの現在の行数を取得する
    pub fn row_count(&self, table: &str) -> usize {
        let tables = self.state.tables.lock().unwrap();
        tables.get(table).map(Vec::len).unwrap_or(0)
    }
}

async fn handle_request(
    req: Request<Incoming>,
    state: Arc<StubState>,
) -> Result<Response<String>, Infallible> {
    state.request_count.fetch_add(1, Ordering::SeqCst);

    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let query_pairs: Vec<(String, String)> = req
        .uri()
        .query()
        .map(|q| {
            url::form_urlencoded::parse(q.as_bytes())
                .into_owned()
                .collect()
        })
        .unwrap_or_default();
    let bearer = bearer_token(&req);

    let body_bytes = req
        .into_body()
        .collect()
        .await
        .map(|collected| collected.to_bytes())
        .unwrap_or_default();
    let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

    let response = match (method, path.as_str()) {
        (Method::POST, "/auth/v1/token") => handle_token(&state, &body),
        (Method::POST, "/auth/v1/signup") => handle_signup(&state, &body),
        (Method::POST, "/auth/v1/logout") => handle_logout(&state, bearer.as_deref()),
        (Method::POST, "/auth/v1/recover") => json_response(StatusCode::OK, json!({})),
        (Method::GET, "/auth/v1/user") => handle_get_user(&state, bearer.as_deref()),
        (method, path) if path.starts_with("/rest/v1/") => {
            let table = path.trim_start_matches("/rest/v1/").to_string();
            match method {
                Method::GET => handle_select(&state, &table, &query_pairs),
                Method::POST => handle_insert(&state, &table, body),
                Method::PATCH => handle_update(&state, &table, &query_pairs, &body),
                _ => json_response(
                    StatusCode::METHOD_NOT_ALLOWED,
                    json!({"message": "method not allowed"}),
                ),
            }
        }
        _ => json_response(StatusCode::NOT_FOUND, json!({"message": "not found"})),
    };

    Ok(response)
}

fn bearer_token(req: &Request<Incoming>) -> Option<String> {
    req.headers()
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(ToString::to_string)
}

fn json_response(status: StatusCode, body: Value) -> Response<String> {
    Response::builder()
        .status(status)
        .header("content-type", "application/json")
        .body(body.to_string())
        .expect("レスポンス構築に失敗")
}

fn session_json(state: &StubState, email: &str, user_id: &str) -> Value {
    let n = state.next_id.fetch_add(1, Ordering::SeqCst);
    let token = format!("stub-token-{n}");
    state
        .tokens
        .lock()
        .unwrap()
        .insert(token.clone(), email.to_string());

    json!({
        "access_token": token,
        "token_type": "bearer",
        "expires_in": 3600,
        "refresh_token": format!("stub-refresh-{n}"),
        "user": {
            "id": user_id,
            "email": email,
            "user_metadata": {}
        }
    })
}

fn handle_token(state: &StubState, body: &Value) -> Response<String> {
    let email = body["email"].as_str().unwrap_or_default().to_string();
    let password = body["password"].as_str().unwrap_or_default();

    let user = {
        let users = state.users.lock().unwrap();
        users.get(&email).cloned()
    };

    match user {
        Some((expected, user_id)) if expected == password => {
            json_response(StatusCode::OK, session_json(state, &email, &user_id))
        }
        _ => json_response(
            StatusCode::BAD_REQUEST,
            json!({"error_description": "Invalid login credentials"}),
        ),
    }
}

fn handle_signup(state: &StubState, body: &Value) -> Response<String> {
    let email = body["email"].as_str().unwrap_or_default().to_string();
    let password = body["password"].as_str().unwrap_or_default().to_string();

    let mut users = state.users.lock().unwrap();
    if users.contains_key(&email) {
        return json_response(
            StatusCode::BAD_REQUEST,
            json!({"msg": "User already registered"}),
        );
    }

    let n = state.next_id.fetch_add(1, Ordering::SeqCst);
    let user_id = format!("user-{n}");
    users.insert(email.clone(), (password, user_id.clone()));
    drop(users);

    json_response(StatusCode::OK, session_json(state, &email, &user_id))
}

fn handle_logout(state: &StubState, bearer: Option<&str>) -> Response<String> {
    if let Some(token) = bearer {
        state.tokens.lock().unwrap().remove(token);
    }
    json_response(StatusCode::NO_CONTENT, json!({}))
}

fn handle_get_user(state: &StubState, bearer: Option<&str>) -> Response<String> {
    let email = bearer.and_then(|token| state.tokens.lock().unwrap().get(token).cloned());

    match email {
        Some(email) => {
            let users = state.users.lock().unwrap();
            let user_id = users
                .get(&email)
                .map(|(_, id)| id.clone())
                .unwrap_or_default();
            json_response(
                StatusCode::OK,
                json!({
                    "id": user_id,
                    "email": email,
                    "user_metadata": {}
                }),
            )
        }
        None => json_response(StatusCode::UNAUTHORIZED, json!({"msg": "invalid JWT"})),
    }
}

/// 行の値をフィルター比較用の文字列に変換する
fn value_as_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn row_matches(row: &Value, filters: &[(String, String)]) -> bool {
    filters.iter().all(|(column, condition)| {
        let actual = row.get(column).map(value_as_string).unwrap_or_default();
        if let Some(expected) = condition.strip_prefix("eq.") {
            actual == expected
        } else if let Some(expected) = condition.strip_prefix("gte.") {
            actual.as_str() >= expected
        } else if let Some(expected) = condition.strip_prefix("lte.") {
            actual.as_str() <= expected
        } else {
            true
        }
    })
}

/// クエリパラメータをフィルター・並び順・件数制限に分解する
fn parse_query(
    query_pairs: &[(String, String)],
) -> (Vec<(String, String)>, Option<(String, bool)>, Option<usize>) {
    let mut filters = Vec::new();
    let mut order = None;
    let mut limit = None;

    for (key, value) in query_pairs {
        match key.as_str() {
            "select" => {}
            "order" => {
                let descending = value.ends_with(".desc");
                let column = value
                    .trim_end_matches(".desc")
                    .trim_end_matches(".asc")
                    .to_string();
                order = Some((column, descending));
            }
            "limit" => limit = value.parse().ok(),
            _ => filters.push((key.clone(), value.clone())),
        }
    }

    (filters, order, limit)
}

fn handle_select(
    state: &StubState,
    table: &str,
    query_pairs: &[(String, String)],
) -> Response<String> {
    let (filters, order, limit) = parse_query(query_pairs);

    let tables = state.tables.lock().unwrap();
    let mut rows: Vec<Value> = tables
        .get(table)
        .map(|rows| {
            rows.iter()
                .filter(|row| row_matches(row, &filters))
                .cloned()
                .collect()
        })
        .unwrap_or_default();
    drop(tables);

    if let Some((column, descending)) = order {
        rows.sort_by(|a, b| {
            let left = a.get(&column).map(value_as_string).unwrap_or_default();
            let right = b.get(&column).map(value_as_string).unwrap_or_default();
            if descending {
                right.cmp(&left)
            } else {
                left.cmp(&right)
            }
        });
    }

    if let Some(limit) = limit {
        rows.truncate(limit);
    }

    json_response(StatusCode::OK, Value::Array(rows))
}

fn handle_insert(state: &StubState, table: &str, body: Value) -> Response<String> {
    let Value::Object(mut object) = body else {
        return json_response(
            StatusCode::BAD_REQUEST,
            json!({"message": "invalid body", "code": "PGRST102"}),
        );
    };

    // 必須のownership/dateフィールドはリモートスキーマが強制する
    if !object.contains_key("user_id") {
        return json_response(
            StatusCode::BAD_REQUEST,
            json!({
                "message": "null value in column \"user_id\" violates not-null constraint",
                "code": "23502"
            }),
        );
    }

    let n = state.next_id.fetch_add(1, Ordering::SeqCst);
    let now = chrono::Utc::now().to_rfc3339();
    object.insert("id".to_string(), json!(format!("row-{n}")));
    object.insert("created_at".to_string(), json!(now));
    object.insert("updated_at".to_string(), json!(now));

    let row = Value::Object(object);
    let mut tables = state.tables.lock().unwrap();
    tables
        .entry(table.to_string())
        .or_default()
        .push(row.clone());

    json_response(StatusCode::CREATED, Value::Array(vec![row]))
}

fn handle_update(
    state: &StubState,
    table: &str,
    query_pairs: &[(String, String)],
    patch: &Value,
) -> Response<String> {
    let (filters, _, _) = parse_query(query_pairs);
    let Some(patch_object) = patch.as_object() else {
        return json_response(
            StatusCode::BAD_REQUEST,
            json!({"message": "invalid body", "code": "PGRST102"}),
        );
    };

    let mut tables = state.tables.lock().unwrap();
    let mut updated = Vec::new();

    if let Some(rows) = tables.get_mut(table) {
        for row in rows.iter_mut() {
            if !row_matches(row, &filters) {
                continue;
            }
            if let Some(object) = row.as_object_mut() {
                for (key, value) in patch_object {
                    object.insert(key.clone(), value.clone());
                }
                object.insert(
                    "updated_at".to_string(),
                    json!(chrono::Utc::now().to_rfc3339()),
                );
            }
            updated.push(row.clone());
        }
    }

    json_response(StatusCode::OK, Value::Array(updated))
}
