/// コンタクトフォームパーサー
///
/// リクエスト本文のJSONをパースし、検証済みのContactMessageに変換する
use serde_json::{Map, Value};
use thiserror::Error;

use crate::domain::{ContactMessage, ValidationError};

/// フォームパースエラー
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ParseError {
    /// JSONパースに失敗（内部エラーとして扱う）
    #[error("failed to parse JSON body")]
    InvalidJson,

    /// 本文がJSONオブジェクトでない（内部エラーとして扱う）
    #[error("body must be a JSON object")]
    NotObject,

    /// 必須フィールドが欠落または空（クライアントエラーとして扱う）
    #[error("missing required fields")]
    MissingFields,
}

impl From<ValidationError> for ParseError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::MissingFields => ParseError::MissingFields,
        }
    }
}

/// コンタクトフォームパーサー
pub struct FormParser;

impl FormParser {
    /// リクエスト本文をパースしてContactMessageに変換
    ///
    /// 空の本文は空のJSONオブジェクトとして扱う。
    /// フィールドが存在しない、null、文字列でない、または空文字列の
    /// 場合は欠落として扱う。
    ///
    /// # 引数
    /// * `body` - パースするJSON文字列
    ///
    /// # 戻り値
    /// * `Ok(ContactMessage)` - パース・検証成功時
    /// * `Err(ParseError)` - パース・検証失敗時
    ///
    /// # 例
    /// ```
    /// use contact_api::application::FormParser;
    ///
    /// let body = r#"{"name":"Alice","email":"alice@example.com","message":"Hi"}"#;
    /// assert!(FormParser::parse(body).is_ok());
    /// ```
    pub fn parse(body: &str) -> Result<ContactMessage, ParseError> {
        // 空の本文は空オブジェクトとして扱う
        let value: Value = if body.is_empty() {
            Value::Object(Map::new())
        } else {
            serde_json::from_str(body).map_err(|_| ParseError::InvalidJson)?
        };

        // オブジェクトであることを検証
        let form = value.as_object().ok_or(ParseError::NotObject)?;

        let name = Self::extract_field(form, "name");
        let email = Self::extract_field(form, "email");
        let message = Self::extract_field(form, "message");

        let contact_message = ContactMessage::new(name, email, message)?;

        Ok(contact_message)
    }

    /// フォームから文字列フィールドを抽出
    ///
    /// 存在しない、または文字列でない値はNoneを返す。
    fn extract_field(form: &Map<String, Value>, key: &str) -> Option<String> {
        form.get(key).and_then(|v| v.as_str()).map(String::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== 正常系テスト ====================

    /// 全フィールドが揃った本文をパースできる
    #[test]
    fn test_parse_valid_body() {
        let body = r#"{"name":"Alice","email":"alice@example.com","message":"Hello!"}"#;

        let result = FormParser::parse(body);

        assert!(result.is_ok());
        let message = result.unwrap();
        assert_eq!(message.name, "Alice");
        assert_eq!(message.email, "alice@example.com");
        assert_eq!(message.message, "Hello!");
    }

    /// 未知のフィールドは無視される
    #[test]
    fn test_parse_ignores_extra_fields() {
        let body = r#"{
            "name": "Alice",
            "email": "alice@example.com",
            "message": "Hello!",
            "phone": "000-0000-0000"
        }"#;

        let result = FormParser::parse(body);

        assert!(result.is_ok());
    }

    /// マルチバイト文字を含む本文をパースできる
    #[test]
    fn test_parse_multibyte_content() {
        let body = r#"{"name":"山田","email":"yamada@example.com","message":"お問い合わせです"}"#;

        let result = FormParser::parse(body);

        assert!(result.is_ok());
        let message = result.unwrap();
        assert_eq!(message.name, "山田");
        assert_eq!(message.message, "お問い合わせです");
    }

    // ==================== 欠落フィールドテスト ====================

    /// 空の本文はMissingFields
    #[test]
    fn test_parse_empty_body() {
        let result = FormParser::parse("");

        assert_eq!(result.unwrap_err(), ParseError::MissingFields);
    }

    /// 空オブジェクトはMissingFields
    #[test]
    fn test_parse_empty_object() {
        let result = FormParser::parse("{}");

        assert_eq!(result.unwrap_err(), ParseError::MissingFields);
    }

    /// フィールドが1つ欠けている場合はMissingFields
    #[test]
    fn test_parse_missing_one_field() {
        let body = r#"{"name":"Alice","email":"alice@example.com"}"#;

        let result = FormParser::parse(body);

        assert_eq!(result.unwrap_err(), ParseError::MissingFields);
    }

    /// nullのフィールドは欠落として扱われる
    #[test]
    fn test_parse_null_field() {
        let body = r#"{"name":null,"email":"alice@example.com","message":"Hello!"}"#;

        let result = FormParser::parse(body);

        assert_eq!(result.unwrap_err(), ParseError::MissingFields);
    }

    /// 文字列でないフィールドは欠落として扱われる
    #[test]
    fn test_parse_non_string_field() {
        let body = r#"{"name":123,"email":"alice@example.com","message":"Hello!"}"#;

        let result = FormParser::parse(body);

        assert_eq!(result.unwrap_err(), ParseError::MissingFields);
    }

    /// 空文字列のフィールドは欠落として扱われる
    #[test]
    fn test_parse_empty_string_field() {
        let body = r#"{"name":"Alice","email":"","message":"Hello!"}"#;

        let result = FormParser::parse(body);

        assert_eq!(result.unwrap_err(), ParseError::MissingFields);
    }

    // ==================== 不正な本文テスト ====================

    /// 壊れたJSONはInvalidJson
    #[test]
    fn test_parse_malformed_json() {
        let result = FormParser::parse("{not json");

        assert_eq!(result.unwrap_err(), ParseError::InvalidJson);
    }

    /// JSON配列の本文はNotObject
    #[test]
    fn test_parse_array_body() {
        let result = FormParser::parse(r#"["name","email","message"]"#);

        assert_eq!(result.unwrap_err(), ParseError::NotObject);
    }

    /// JSON文字列の本文はNotObject
    #[test]
    fn test_parse_string_body() {
        let result = FormParser::parse(r#""hello""#);

        assert_eq!(result.unwrap_err(), ParseError::NotObject);
    }

    // ==================== エラー型テスト ====================

    #[test]
    fn test_parse_error_display() {
        assert_eq!(
            ParseError::InvalidJson.to_string(),
            "failed to parse JSON body"
        );
        assert_eq!(
            ParseError::NotObject.to_string(),
            "body must be a JSON object"
        );
        assert_eq!(
            ParseError::MissingFields.to_string(),
            "missing required fields"
        );
    }

    #[test]
    fn test_parse_error_from_validation_error() {
        let err: ParseError = crate::domain::ValidationError::MissingFields.into();
        assert_eq!(err, ParseError::MissingFields);
    }
}
