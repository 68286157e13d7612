// アプリケーション層モジュール
pub mod form_parser;
pub mod submit_handler;

// 再エクスポート
pub use form_parser::{FormParser, ParseError};
pub use submit_handler::{SubmitHandler, cors_headers, internal_error_response, preflight_response};
