/// コンタクトメッセージのドメインモデル
///
/// フォーム送信1件を表現する。全フィールドが非空であることを
/// 構築時に保証する。
use serde::Serialize;
use thiserror::Error;

/// コンタクトメッセージのバリデーションエラー
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// 必須フィールド（name, email, message）のいずれかが欠落または空
    #[error("missing required fields")]
    MissingFields,
}

/// 受理済みのコンタクトメッセージ
///
/// `email`はストアのパーティションキーとして使用される。
/// フォーマットや一意性の検証は行わない（同一emailの再送信は
/// 既存レコードを上書きする）。
///
/// 保存時タイムスタンプはサーバー側で書き込み時に付与されるため、
/// このドメイン型には含まれない。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContactMessage {
    /// 送信者のメールアドレス（パーティションキー）
    pub email: String,
    /// 送信者名
    pub name: String,
    /// メッセージ本文
    pub message: String,
}

impl ContactMessage {
    /// 新しいContactMessageを作成
    ///
    /// # 引数
    /// * `name` - 送信者名（フォームに存在しない場合はNone）
    /// * `email` - 送信者のメールアドレス
    /// * `message` - メッセージ本文
    ///
    /// # 戻り値
    /// * 全フィールドが存在し非空の場合は`Ok(ContactMessage)`
    /// * いずれかが欠落または空の場合は`Err(ValidationError::MissingFields)`
    pub fn new(
        name: Option<String>,
        email: Option<String>,
        message: Option<String>,
    ) -> Result<Self, ValidationError> {
        let name = Self::require(name)?;
        let email = Self::require(email)?;
        let message = Self::require(message)?;

        Ok(Self {
            email,
            name,
            message,
        })
    }

    /// フィールドが存在し非空であることを検証
    fn require(field: Option<String>) -> Result<String, ValidationError> {
        match field {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(ValidationError::MissingFields),
        }
    }
}
