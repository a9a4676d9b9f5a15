use serde::{Deserialize, Serialize};

/// 予期しない失敗時にユーザーへ返す固定メッセージ
pub const UNEXPECTED_ERROR_MESSAGE: &str = "予期しないエラーが発生しました";

/// ログインフォームのデータ
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginFormData {
    /// メールアドレス
    pub email: String,
    /// パスワード
    pub password: String,
}

/// サインアップフォームのデータ
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupFormData {
    /// メールアドレス
    pub email: String,
    /// パスワード
    pub password: String,
    /// パスワード確認用
    pub confirm_password: String,
    /// フルネーム（オプション）
    pub full_name: Option<String>,
}

/// パスワードリセットフォームのデータ
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetPasswordFormData {
    /// メールアドレス
    pub email: String,
}

/// エラーを帰属させるフォームフィールド
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthField {
    /// メールアドレス欄
    Email,
    /// パスワード欄
    Password,
}

/// 認証操作の失敗情報
///
/// `field`が指定されている場合は該当フォーム入力の横に、
/// 指定されていない場合はフォーム全体のエラーとして表示する想定。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthFailure {
    /// ユーザー向けエラーメッセージ
    pub message: String,
    /// エラーが帰属するフィールド（オプション）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<AuthField>,
}

impl AuthFailure {
    /// フォーム全体のエラーを作成する
    pub fn form_level<S: Into<String>>(message: S) -> Self {
        Self {
            message: message.into(),
            field: None,
        }
    }

    /// 特定フィールドのエラーを作成する
    pub fn for_field<S: Into<String>>(message: S, field: AuthField) -> Self {
        Self {
            message: message.into(),
            field: Some(field),
        }
    }

    /// 予期しない失敗を表すエラーを作成する
    pub fn unexpected() -> Self {
        Self::form_level(UNEXPECTED_ERROR_MESSAGE)
    }
}

/// 認証操作の結果型
///
/// すべての認証操作はこの1つの失敗エンベロープを共有する。
/// 例外は呼び出し側に伝播せず、必ずこの型のErrとして返る。
pub type AuthOutcome<T> = Result<T, AuthFailure>;

/// 認証済みユーザー情報
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    /// ユーザーID
    pub id: String,
    /// メールアドレス
    pub email: String,
    /// ユーザーメタデータ（サインアップ時に設定したフルネームなど）
    #[serde(default)]
    pub user_metadata: UserMetadata,
}

/// サインアップ時に付与するユーザーメタデータ
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserMetadata {
    /// フルネーム
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

/// 認証セッション情報
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// アクセストークン
    pub access_token: String,
    /// トークンタイプ（通常は"bearer"）
    pub token_type: String,
    /// トークンの有効期限（秒）
    pub expires_in: u64,
    /// リフレッシュトークン
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// ユーザー情報
    pub user: AuthUser,
}

/// 既知のバックエンドエラーメッセージと日本語メッセージの対応表
const ERROR_MESSAGE_MAP: [(&str, &str); 7] = [
    (
        "Invalid login credentials",
        "メールアドレスまたはパスワードが正しくありません",
    ),
    ("Email not confirmed", "メールアドレスが確認されていません"),
    (
        "User already registered",
        "このメールアドレスは既に登録されています",
    ),
    (
        "Password should be at least 6 characters",
        "パスワードは6文字以上で入力してください",
    ),
    ("Invalid email", "メールアドレスの形式が正しくありません"),
    ("Signup is disabled", "新規登録は現在無効になっています"),
    (
        "Email rate limit exceeded",
        "メール送信の制限に達しました。しばらく待ってから再試行してください",
    ),
];

/// バックエンドのエラーメッセージを日本語化する
///
/// 対応表にないメッセージはそのまま返す（未知の文言を黙って
/// 固定メッセージに潰さないためのフォールバック方針）。
///
/// # 引数
/// * `error_message` - バックエンドが返した生のエラーメッセージ
pub fn get_error_message(error_message: &str) -> String {
    ERROR_MESSAGE_MAP
        .iter()
        .find(|(upstream, _)| *upstream == error_message)
        .map(|(_, localized)| localized.to_string())
        .unwrap_or_else(|| error_message.to_string())
}

/// エラーが帰属するフォームフィールドを特定する
///
/// バックエンドのメッセージ本文から"email"/"password"を
/// 大文字小文字を無視して探す。両方を含む場合はemailを優先する。
///
/// # 引数
/// * `error_message` - バックエンドが返した生のエラーメッセージ
pub fn get_error_field(error_message: &str) -> Option<AuthField> {
    let lowered = error_message.to_lowercase();
    if lowered.contains("email") {
        return Some(AuthField::Email);
    }
    if lowered.contains("password") {
        return Some(AuthField::Password);
    }
    None
}

impl LoginFormData {
    /// ローカルバリデーション（リモート呼び出し前に実行）
    pub fn validate(&self) -> Result<(), AuthFailure> {
        validate_email(&self.email)?;
        if self.password.is_empty() {
            return Err(AuthFailure::for_field(
                "パスワードを入力してください",
                AuthField::Password,
            ));
        }
        Ok(())
    }
}

impl SignupFormData {
    /// ローカルバリデーション（リモート呼び出し前に実行）
    pub fn validate(&self) -> Result<(), AuthFailure> {
        validate_email(&self.email)?;
        if self.password.chars().count() < 6 {
            return Err(AuthFailure::for_field(
                "パスワードは6文字以上で入力してください",
                AuthField::Password,
            ));
        }
        if self.password != self.confirm_password {
            return Err(AuthFailure::for_field(
                "パスワードが一致しません",
                AuthField::Password,
            ));
        }
        Ok(())
    }
}

impl ResetPasswordFormData {
    /// ローカルバリデーション（リモート呼び出し前に実行）
    pub fn validate(&self) -> Result<(), AuthFailure> {
        validate_email(&self.email)
    }
}

/// メールアドレスの形式を検証する
fn validate_email(email: &str) -> Result<(), AuthFailure> {
    if email.is_empty() {
        return Err(AuthFailure::for_field(
            "メールアドレスを入力してください",
            AuthField::Email,
        ));
    }
    if !email.contains('@') {
        return Err(AuthFailure::for_field(
            "メールアドレスの形式が正しくありません",
            AuthField::Email,
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    #[test]
    fn test_get_error_message_known_strings() {
        // 対応表にあるメッセージは正確に日本語化される
        assert_eq!(
            get_error_message("Invalid login credentials"),
            "メールアドレスまたはパスワードが正しくありません"
        );
        assert_eq!(
            get_error_message("Email not confirmed"),
            "メールアドレスが確認されていません"
        );
        assert_eq!(
            get_error_message("User already registered"),
            "このメールアドレスは既に登録されています"
        );
        assert_eq!(
            get_error_message("Password should be at least 6 characters"),
            "パスワードは6文字以上で入力してください"
        );
        assert_eq!(
            get_error_message("Invalid email"),
            "メールアドレスの形式が正しくありません"
        );
        assert_eq!(
            get_error_message("Signup is disabled"),
            "新規登録は現在無効になっています"
        );
        assert_eq!(
            get_error_message("Email rate limit exceeded"),
            "メール送信の制限に達しました。しばらく待ってから再試行してください"
        );
    }

    #[test]
    fn test_get_error_message_unknown_passes_through() {
        // 対応表にないメッセージはそのまま返る
        assert_eq!(
            get_error_message("Something else went wrong"),
            "Something else went wrong"
        );
        assert_eq!(get_error_message(""), "");
    }

    #[quickcheck]
    fn prop_unmapped_messages_are_identity(message: String) -> bool {
        // 対応表にない任意の文字列は変更されずに返る
        let mapped = ERROR_MESSAGE_MAP
            .iter()
            .any(|(upstream, _)| *upstream == message);
        mapped || get_error_message(&message) == message
    }

    #[test]
    fn test_get_error_field_email() {
        assert_eq!(get_error_field("Invalid email"), Some(AuthField::Email));
        assert_eq!(
            get_error_field("EMAIL rate limit exceeded"),
            Some(AuthField::Email)
        );
        assert_eq!(
            get_error_field("unknown Email problem"),
            Some(AuthField::Email)
        );
    }

    #[test]
    fn test_get_error_field_password() {
        assert_eq!(
            get_error_field("Password should be at least 6 characters"),
            Some(AuthField::Password)
        );
        assert_eq!(
            get_error_field("weak password"),
            Some(AuthField::Password)
        );
    }

    #[test]
    fn test_get_error_field_none() {
        assert_eq!(get_error_field("Signup is disabled"), None);
        // 生メッセージがemail/passwordを含まない限り帰属しない
        assert_eq!(get_error_field("User already registered"), None);
        assert_eq!(get_error_field(""), None);
    }

    #[test]
    fn test_get_error_field_email_takes_precedence() {
        // emailとpasswordの両方を含む場合はemailが優先される
        assert_eq!(
            get_error_field("email or password is wrong"),
            Some(AuthField::Email)
        );
    }

    #[quickcheck]
    fn prop_field_attribution_is_case_insensitive(message: String) -> bool {
        get_error_field(&message) == get_error_field(&message.to_ascii_uppercase())
    }

    #[test]
    fn test_login_form_validation() {
        let valid = LoginFormData {
            email: "driver@example.com".to_string(),
            password: "secret123".to_string(),
        };
        assert!(valid.validate().is_ok());

        // メールアドレスが空
        let no_email = LoginFormData {
            email: String::new(),
            password: "secret123".to_string(),
        };
        assert_eq!(
            no_email.validate().unwrap_err().field,
            Some(AuthField::Email)
        );

        // パスワードが空
        let no_password = LoginFormData {
            email: "driver@example.com".to_string(),
            password: String::new(),
        };
        assert_eq!(
            no_password.validate().unwrap_err().field,
            Some(AuthField::Password)
        );
    }

    #[test]
    fn test_signup_form_validation() {
        let valid = SignupFormData {
            email: "driver@example.com".to_string(),
            password: "secret123".to_string(),
            confirm_password: "secret123".to_string(),
            full_name: Some("山田太郎".to_string()),
        };
        assert!(valid.validate().is_ok());

        // パスワードが短い
        let short_password = SignupFormData {
            password: "abc".to_string(),
            confirm_password: "abc".to_string(),
            ..valid.clone()
        };
        let failure = short_password.validate().unwrap_err();
        assert_eq!(failure.field, Some(AuthField::Password));
        assert_eq!(failure.message, "パスワードは6文字以上で入力してください");

        // パスワード不一致
        let mismatch = SignupFormData {
            confirm_password: "different".to_string(),
            ..valid
        };
        assert_eq!(
            mismatch.validate().unwrap_err().message,
            "パスワードが一致しません"
        );
    }

    #[test]
    fn test_reset_password_form_validation() {
        let valid = ResetPasswordFormData {
            email: "driver@example.com".to_string(),
        };
        assert!(valid.validate().is_ok());

        let invalid = ResetPasswordFormData {
            email: "not-an-email".to_string(),
        };
        assert_eq!(
            invalid.validate().unwrap_err().field,
            Some(AuthField::Email)
        );
    }

    #[test]
    fn test_session_deserialization() {
        let json = r#"{
            "access_token": "token-abc",
            "token_type": "bearer",
            "expires_in": 3600,
            "refresh_token": "refresh-xyz",
            "user": {
                "id": "user-1",
                "email": "driver@example.com",
                "user_metadata": { "full_name": "山田太郎" }
            }
        }"#;

        let session: Session = serde_json::from_str(json).unwrap();
        assert_eq!(session.access_token, "token-abc");
        assert_eq!(session.expires_in, 3600);
        assert_eq!(session.user.id, "user-1");
        assert_eq!(
            session.user.user_metadata.full_name,
            Some("山田太郎".to_string())
        );
    }

    #[test]
    fn test_auth_failure_serialization_skips_missing_field() {
        let failure = AuthFailure::form_level("エラー");
        let json = serde_json::to_string(&failure).unwrap();
        assert!(!json.contains("field"));

        let failure = AuthFailure::for_field("エラー", AuthField::Email);
        let json = serde_json::to_string(&failure).unwrap();
        assert!(json.contains("\"field\":\"email\""));
    }
}
