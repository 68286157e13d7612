/// DynamoDBでコンタクトメッセージを管理するためのメッセージリポジトリ
use async_trait::async_trait;
use aws_sdk_dynamodb::Client as DynamoDbClient;
use aws_sdk_dynamodb::types::AttributeValue;
use chrono::{SecondsFormat, Utc};
use thiserror::Error;

use crate::domain::ContactMessage;

/// リポジトリ操作のエラー型
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RepositoryError {
    /// DynamoDBへの書き込みに失敗
    #[error("Write error: {0}")]
    WriteError(String),
}

/// コンタクトメッセージ永続化用トレイト
///
/// このトレイトはメッセージ永続化機能を抽象化し、
/// 異なる実装を可能にします（実際のDynamoDB、テスト用モック）。
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// メッセージを保存
    ///
    /// 保存時タイムスタンプはこの操作の中で付与される。
    /// 同一emailの既存レコードは無条件に上書きされる。
    ///
    /// # 引数
    /// * `message` - 保存するコンタクトメッセージ
    ///
    /// # 戻り値
    /// * 成功時は`Ok(())`
    /// * 失敗時は`Err(RepositoryError)`
    async fn save(&self, message: &ContactMessage) -> Result<(), RepositoryError>;
}

/// MessageRepositoryのDynamoDB実装
///
/// この構造体はDynamoDBを使用してコンタクトメッセージを
/// 永続的に保存するMessageRepositoryトレイトを実装します。
#[derive(Debug, Clone)]
pub struct DynamoMessageRepository {
    /// DynamoDBクライアント
    client: DynamoDbClient,
    /// メッセージテーブル名
    table_name: String,
}

impl DynamoMessageRepository {
    /// 新しいDynamoMessageRepositoryを作成
    ///
    /// # 引数
    /// * `client` - DynamoDBクライアント
    /// * `table_name` - メッセージテーブルの名前
    pub fn new(client: DynamoDbClient, table_name: String) -> Self {
        Self { client, table_name }
    }

    /// 書き込み時タイムスタンプをISO-8601（UTC、マイクロ秒精度）で生成
    fn current_timestamp() -> String {
        Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
    }
}

#[async_trait]
impl MessageRepository for DynamoMessageRepository {
    async fn save(&self, message: &ContactMessage) -> Result<(), RepositoryError> {
        let timestamp = Self::current_timestamp();

        tracing::debug!(
            email = %message.email,
            table = %self.table_name,
            "put_item実行"
        );

        // 条件式なしのput_item（同一emailのレコードは上書き）
        self.client
            .put_item()
            .table_name(&self.table_name)
            .item("email", AttributeValue::S(message.email.clone()))
            .item("name", AttributeValue::S(message.name.clone()))
            .item("message", AttributeValue::S(message.message.clone()))
            .item("timestamp", AttributeValue::S(timestamp))
            .send()
            .await
            .map_err(|e| RepositoryError::WriteError(e.to_string()))?;

        Ok(())
    }
}
