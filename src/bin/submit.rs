/// コンタクトフォーム送信HTTP Lambdaエントリポイント
///
/// API Gateway経由のフォーム送信リクエストを処理し、
/// コンタクトメッセージをDynamoDBに保存する。
/// OPTIONSプリフライトには設定読み込みやストアアクセスなしで応答する。
use contact_api::application::{SubmitHandler, internal_error_response, preflight_response};
use contact_api::infrastructure::{DynamoDbConfig, DynamoDbConfigError, DynamoMessageRepository, init_logging};
use lambda_http::http::Method;
use lambda_http::http::header::USER_AGENT;
use lambda_http::{Body, Error, Request, Response, run, service_fn};
use tokio::sync::OnceCell;
use tracing::{error, info};

/// DynamoDbConfigの静的インスタンス
///
/// Lambda warm start時にクライアントを再利用するため、
/// 一度読み込んだ設定を静的に保持する。
static DYNAMODB_CONFIG: OnceCell<DynamoDbConfig> = OnceCell::const_new();

/// DynamoDbConfigを取得（初期化されていなければ環境から読み込み）
async fn get_config() -> Result<&'static DynamoDbConfig, DynamoDbConfigError> {
    DYNAMODB_CONFIG
        .get_or_try_init(|| async { DynamoDbConfig::from_env().await })
        .await
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    // 構造化ログを初期化
    init_logging();

    info!("コンタクトフォームLambda関数を初期化");

    // Lambda関数を実行
    run(service_fn(handler)).await
}

/// HTTPリクエストハンドラー
///
/// # 処理フロー
/// 1. アクセスログを出力
/// 2. OPTIONSの場合はプリフライト応答を即座に返却
/// 3. DynamoDB設定を取得（warm start時はキャッシュを再利用）
/// 4. SubmitHandlerに送信処理を委譲
///
/// エラーはすべてレスポンスに変換され、`Err`を返すことはない。
async fn handler(request: Request) -> Result<Response<Body>, Error> {
    // アクセスログ情報を取得
    let user_agent = request
        .headers()
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");

    let body_log = match request.body() {
        Body::Text(text) => text.as_str(),
        Body::Empty => "(empty)",
        _ => "(binary)",
    };

    // アクセスログ出力
    info!(
        method = %request.method(),
        user_agent = user_agent,
        body = body_log,
        "コンタクトフォームリクエスト受信"
    );

    // CORSプリフライトには設定読み込みなしで応答
    if request.method() == Method::OPTIONS {
        return Ok(preflight_response());
    }

    // DynamoDB設定を取得
    let config = match get_config().await {
        Ok(config) => config,
        Err(err) => {
            error!(error = %err, "DynamoDB設定読み込み失敗");
            return Ok(internal_error_response());
        }
    };

    // MessageRepositoryを作成して送信を処理
    let message_repo = DynamoMessageRepository::new(
        config.client().clone(),
        config.messages_table().to_string(),
    );
    let submit_handler = SubmitHandler::new(message_repo);

    Ok(submit_handler.handle(&request).await)
}
