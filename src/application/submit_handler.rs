// コンタクトフォーム送信ハンドラー
//
// リクエスト本文をパース・検証し、メッセージリポジトリに保存して
// CORSヘッダー付きのJSONレスポンスを構築する。

use lambda_http::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
    CONTENT_TYPE, HeaderMap, HeaderValue,
};
use lambda_http::{Body, Request, Response};
use serde_json::json;
use tracing::{error, info};

use crate::application::{FormParser, ParseError};
use crate::infrastructure::MessageRepository;

/// コンタクトフォーム送信を処理するハンドラー
///
/// リクエスト本文からコンタクトメッセージを抽出し、
/// MessageRepositoryを使用して永続化する。
/// メソッドの分岐（OPTIONSプリフライト）はエントリポイント側で行い、
/// このハンドラーは送信リクエストのみを処理する。
pub struct SubmitHandler<MR>
where
    MR: MessageRepository,
{
    /// メッセージリポジトリ
    message_repo: MR,
}

impl<MR> SubmitHandler<MR>
where
    MR: MessageRepository,
{
    /// 新しいSubmitHandlerを作成
    pub fn new(message_repo: MR) -> Self {
        Self { message_repo }
    }

    /// コンタクトフォーム送信リクエストを処理
    ///
    /// # 処理フロー
    /// 1. リクエスト本文を取得（空の本文は空オブジェクトとして扱う）
    /// 2. 本文をパースしてContactMessageを構築
    /// 3. MessageRepositoryに保存（同一emailは上書き）
    /// 4. 結果に応じたJSONレスポンスを構築
    ///
    /// # エラーマッピング
    /// * 必須フィールド欠落 → 400（書き込みなし、ログ不要）
    /// * パース失敗・保存失敗 → 500（エラーログ1行）
    ///
    /// エラーは呼び出し元に伝播せず、必ずレスポンスに変換される。
    pub async fn handle(&self, request: &Request) -> Response<Body> {
        let body = match request.body() {
            Body::Empty => "",
            Body::Text(text) => text.as_str(),
            Body::Binary(bytes) => match std::str::from_utf8(bytes) {
                Ok(text) => text,
                Err(err) => {
                    error!(error = %err, "リクエスト本文が不正なUTF-8");
                    return internal_error_response();
                }
            },
            _ => "",
        };

        match FormParser::parse(body) {
            Ok(message) => match self.message_repo.save(&message).await {
                Ok(()) => {
                    info!(email = %message.email, "メッセージ保存完了");
                    success_response()
                }
                Err(err) => {
                    error!(error = %err, "メッセージ保存エラー");
                    internal_error_response()
                }
            },
            // 必須フィールド欠落はクライアントエラーとして即座に返却
            Err(ParseError::MissingFields) => missing_fields_response(),
            Err(err) => {
                error!(error = %err, "リクエスト本文のパース失敗");
                internal_error_response()
            }
        }
    }
}

/// 全レスポンス共通のヘッダーを生成
///
/// ブラウザからのクロスオリジン送信を許可するため、
/// エラーレスポンスを含む全レスポンスに以下を付与する:
/// - Content-Type: application/json
/// - Access-Control-Allow-Origin: *
/// - Access-Control-Allow-Methods: POST,OPTIONS
/// - Access-Control-Allow-Headers: Content-Type,X-Amz-Date,Authorization,X-Api-Key,X-Amz-Security-Token
pub fn cors_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();

    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));

    headers.insert(
        ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("POST,OPTIONS"),
    );

    headers.insert(
        ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(
            "Content-Type,X-Amz-Date,Authorization,X-Api-Key,X-Amz-Security-Token",
        ),
    );

    headers
}

/// CORSプリフライトリクエストへの応答
///
/// 本文の内容にかかわらず200で応答する。ストアへのアクセスは行わない。
pub fn preflight_response() -> Response<Body> {
    json_response(200, json!({"message": "CORS preflight passed"}).to_string())
}

/// 内部エラーレスポンス（500）
///
/// パース失敗・保存失敗・設定読み込み失敗はすべてこの
/// 汎用レスポンスに集約される。
pub fn internal_error_response() -> Response<Body> {
    json_response(500, json!({"error": "Internal Server Error"}).to_string())
}

/// 保存成功レスポンス（200）
fn success_response() -> Response<Body> {
    json_response(200, json!({"message": "Message saved successfully"}).to_string())
}

/// 必須フィールド欠落レスポンス（400）
fn missing_fields_response() -> Response<Body> {
    json_response(400, json!({"error": "Missing fields"}).to_string())
}

/// CORSヘッダー付きのJSONレスポンスを構築
fn json_response(status: u16, body: String) -> Response<Body> {
    let mut response = Response::builder()
        .status(status)
        .body(Body::Text(body))
        .expect("レスポンスの構築に失敗");

    // ヘッダーを設定
    *response.headers_mut() = cors_headers();

    response
}
