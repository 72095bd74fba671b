use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("追加コンテキストファイルが見つかりません: {0}")]
    ExtraContextNotFound(PathBuf),

    #[error("コンテキストファイルのパースに失敗しました: {path}\n理由: {message}")]
    ContextParse { path: PathBuf, message: String },

    #[error("コンテキストファイルはJSONオブジェクトである必要があります: {0}")]
    NotAnObject(PathBuf),

    #[error("コンテキストキーが見つかりません: {0}")]
    MissingKey(String),

    #[error("リソース設定が見つかりません: {kind} '{id}'")]
    ResourceNotFound { kind: String, id: String },

    #[error("リソース設定が不正です: {kind} '{id}'\n理由: {message}")]
    InvalidResource {
        kind: String,
        id: String,
        message: String,
    },

    #[error("IO エラー: {path}\n理由: {message}")]
    Io { path: PathBuf, message: String },
}

pub type Result<T> = std::result::Result<T, ConfigError>;
