//! ステージ別レイヤードコンテキスト
//!
//! ベースコンテキスト → 追加コンテキスト → ステージコンテキストの順に
//! JSONファイルをマージして、スタック構築に渡す設定を組み立てます。
//!
//! マージ規則:
//! - 追加コンテキスト: トップレベルキー単位で常に上書き (後勝ち)
//! - ステージコンテキスト: 両者が配列以外のオブジェクトの場合のみ
//!   浅いマージ (ステージ側優先)、それ以外はキー単位で置き換え

pub mod error;

pub use error::*;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

/// ベースコンテキストのファイル名
pub const BASE_CONTEXT_FILE: &str = "skystack.json";

/// ステージコンテキストのデフォルトディレクトリ名
pub const DEFAULT_STAGE_CONTEXT_PATH: &str = "stages";

/// ステージコンテキストを読み込まない開発用デフォルトステージ
pub const DEFAULT_STAGE: &str = "dev";

const STAGE_KEY: &str = "stage";
const EXTRA_CONTEXTS_KEY: &str = "extraContexts";
const STAGE_CONTEXT_PATH_KEY: &str = "stageContextPath";

/// マージ済みコンテキスト
///
/// [`ContextBuilder::build`] で一度だけ構築され、以降は読み取り専用。
/// マネージャーはここから自分のリソース設定を取り出します。
#[derive(Debug, Clone, Default)]
pub struct Context {
    values: Map<String, Value>,
}

impl Context {
    /// キーに対応する値を取得
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// キーに対応する文字列値を取得
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(Value::as_str)
    }

    /// 必須の文字列値を取得
    pub fn require_str(&self, key: &str) -> Result<String> {
        self.get_str(key)
            .map(str::to_string)
            .ok_or_else(|| ConfigError::MissingKey(key.to_string()))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.values.keys()
    }

    /// リソース設定配列から id が一致するエントリを取り出す
    ///
    /// `kind` はトップレベルキー (`certificates`, `buckets` など)。
    /// 配列自体が無い場合・一致するエントリが無い場合は
    /// [`ConfigError::ResourceNotFound`]、エントリの形が合わない場合は
    /// [`ConfigError::InvalidResource`] を返します。
    pub fn resource<T: DeserializeOwned>(&self, kind: &str, id: &str) -> Result<T> {
        let entry = self
            .values
            .get(kind)
            .and_then(Value::as_array)
            .and_then(|entries| {
                entries
                    .iter()
                    .find(|entry| entry.get("id").and_then(Value::as_str) == Some(id))
            })
            .ok_or_else(|| ConfigError::ResourceNotFound {
                kind: kind.to_string(),
                id: id.to_string(),
            })?;

        serde_json::from_value(entry.clone()).map_err(|e| ConfigError::InvalidResource {
            kind: kind.to_string(),
            id: id.to_string(),
            message: e.to_string(),
        })
    }

    /// リソース設定配列の id 一覧
    pub fn resource_ids(&self, kind: &str) -> Vec<&str> {
        self.values
            .get(kind)
            .and_then(Value::as_array)
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(|entry| entry.get("id").and_then(Value::as_str))
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// コンテキストビルダー
///
/// プロジェクトルートとベースコンテキストを受け取り、
/// 追加コンテキスト・ステージコンテキストを順にマージします。
#[derive(Debug)]
pub struct ContextBuilder {
    project_root: PathBuf,
    base: Map<String, Value>,
}

impl ContextBuilder {
    /// コードで組み立てたベースコンテキストから開始
    pub fn new(project_root: impl AsRef<Path>, base: Map<String, Value>) -> Self {
        Self {
            project_root: project_root.as_ref().to_path_buf(),
            base,
        }
    }

    /// プロジェクトルートの skystack.json をベースコンテキストとして読み込む
    pub fn from_file(project_root: impl AsRef<Path>) -> Result<Self> {
        let project_root = project_root.as_ref().to_path_buf();
        let base = read_json_object(&project_root.join(BASE_CONTEXT_FILE))?;
        Ok(Self { project_root, base })
    }

    /// マージパイプラインを実行して最終コンテキストを返す
    ///
    /// 1. 追加コンテキストの適用 (extraContexts、ファイル必須)
    /// 2. ステージコンテキストの適用 (stages/{stage}.json、任意)
    #[instrument(skip(self), fields(project_root = %self.project_root.display()))]
    pub fn build(self) -> Result<Context> {
        let mut values = self.base;

        apply_extra_contexts(&mut values, &self.project_root)?;
        apply_stage_context(&mut values, &self.project_root)?;

        info!(keys = values.len(), "Context assembled");
        Ok(Context { values })
    }
}

/// JSONファイルをトップレベルオブジェクトとして読み込む
fn read_json_object(path: &Path) -> Result<Map<String, Value>> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let value: Value = serde_json::from_str(&content).map_err(|e| ConfigError::ContextParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    match value {
        Value::Object(map) => Ok(map),
        _ => Err(ConfigError::NotAnObject(path.to_path_buf())),
    }
}

/// extraContexts に列挙されたファイルを順に適用
///
/// 各ファイルはプロジェクトルートからの相対パス。存在しない場合は
/// 即エラー。トップレベルキー単位で常に上書きし、ネスト構造の
/// マージはこの段階では行いません。
fn apply_extra_contexts(values: &mut Map<String, Value>, project_root: &Path) -> Result<()> {
    let paths: Vec<String> = match values.get(EXTRA_CONTEXTS_KEY) {
        Some(Value::Array(entries)) => entries
            .iter()
            .filter_map(|entry| entry.as_str().map(str::to_string))
            .collect(),
        _ => return Ok(()),
    };

    for relative in paths {
        let path = project_root.join(&relative);
        if !path.exists() {
            return Err(ConfigError::ExtraContextNotFound(path));
        }

        debug!(file = %path.display(), "Applying extra context");
        let overlay = read_json_object(&path)?;
        for (key, value) in overlay {
            values.insert(key, value);
        }
    }

    Ok(())
}

/// {stageContextPath}/{stage}.json を適用
///
/// 開発用デフォルトステージ (`dev`) の場合はファイルを読まずに
/// 早期リターン。ファイルが無い場合は警告ログのみでスキップします。
fn apply_stage_context(values: &mut Map<String, Value>, project_root: &Path) -> Result<()> {
    let stage = values
        .get(STAGE_KEY)
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_STAGE)
        .to_string();

    if stage == DEFAULT_STAGE {
        debug!(stage = %stage, "Development stage, skipping stage context");
        return Ok(());
    }

    let stage_dir = values
        .get(STAGE_CONTEXT_PATH_KEY)
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_STAGE_CONTEXT_PATH);
    let path = project_root.join(stage_dir).join(format!("{stage}.json"));

    if !path.exists() {
        warn!(file = %path.display(), "Stage context file not found, using defaults");
        return Ok(());
    }

    debug!(file = %path.display(), "Applying stage context");
    let overlay = read_json_object(&path)?;
    for (key, incoming) in overlay {
        let merged = match (values.get(&key), incoming) {
            // 両者が配列以外のオブジェクトの場合のみ浅いマージ (ステージ側優先)
            (Some(Value::Object(existing)), Value::Object(overrides)) => {
                let mut merged = existing.clone();
                for (sub_key, sub_value) in overrides {
                    merged.insert(sub_key, sub_value);
                }
                Value::Object(merged)
            }
            // 配列を含むその他の値はキー単位で置き換え
            (_, incoming) => incoming,
        };
        values.insert(key, merged);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;
    use std::fs;

    fn base_map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("base must be an object"),
        }
    }

    #[test]
    fn test_base_only() {
        let temp_dir = tempfile::tempdir().unwrap();
        let base = base_map(json!({
            "name": "site",
            "stage": "dev",
            "region": "ap-northeast-1"
        }));

        let context = ContextBuilder::new(temp_dir.path(), base).build().unwrap();

        assert_eq!(context.get_str("name"), Some("site"));
        assert_eq!(context.get_str("region"), Some("ap-northeast-1"));
    }

    #[test]
    fn test_extra_contexts_last_wins() {
        let temp_dir = tempfile::tempdir().unwrap();

        fs::write(
            temp_dir.path().join("first.json"),
            r#"{ "domainName": "first.example.com", "region": "us-east-1" }"#,
        )
        .unwrap();
        fs::write(
            temp_dir.path().join("second.json"),
            r#"{ "domainName": "second.example.com" }"#,
        )
        .unwrap();

        let base = base_map(json!({
            "stage": "dev",
            "region": "ap-northeast-1",
            "extraContexts": ["first.json", "second.json"]
        }));

        let context = ContextBuilder::new(temp_dir.path(), base).build().unwrap();

        // 後のファイルが同一キーを上書きする
        assert_eq!(context.get_str("domainName"), Some("second.example.com"));
        // ベースの値もファイルで上書きされる
        assert_eq!(context.get_str("region"), Some("us-east-1"));
    }

    #[test]
    fn test_extra_context_missing_is_fatal() {
        let temp_dir = tempfile::tempdir().unwrap();
        let base = base_map(json!({
            "stage": "dev",
            "extraContexts": ["missing.json"]
        }));

        let result = ContextBuilder::new(temp_dir.path(), base).build();

        match result {
            Err(ConfigError::ExtraContextNotFound(path)) => {
                assert!(path.ends_with("missing.json"));
            }
            other => panic!("Expected ExtraContextNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_extra_context_overwrites_whole_key() {
        let temp_dir = tempfile::tempdir().unwrap();

        fs::write(
            temp_dir.path().join("extra.json"),
            r#"{ "tags": { "team": "platform" } }"#,
        )
        .unwrap();

        let base = base_map(json!({
            "stage": "dev",
            "tags": { "owner": "mito", "team": "web" },
            "extraContexts": ["extra.json"]
        }));

        let context = ContextBuilder::new(temp_dir.path(), base).build().unwrap();

        // 追加コンテキストはネストをマージせず丸ごと置き換える
        assert_eq!(context.get("tags"), Some(&json!({ "team": "platform" })));
    }

    #[test]
    fn test_stage_context_shallow_merges_objects() {
        let temp_dir = tempfile::tempdir().unwrap();

        fs::create_dir_all(temp_dir.path().join("stages")).unwrap();
        fs::write(
            temp_dir.path().join("stages/test.json"),
            r#"{ "siteConfig": { "logLevel": "warn", "replicas": 2 } }"#,
        )
        .unwrap();

        let base = base_map(json!({
            "stage": "test",
            "siteConfig": { "logLevel": "debug", "timeout": 30 }
        }));

        let context = ContextBuilder::new(temp_dir.path(), base).build().unwrap();

        // 両オブジェクトのキーの和集合、衝突はステージ側優先
        assert_eq!(
            context.get("siteConfig"),
            Some(&json!({ "logLevel": "warn", "timeout": 30, "replicas": 2 }))
        );
    }

    #[test]
    fn test_stage_context_replaces_arrays() {
        let temp_dir = tempfile::tempdir().unwrap();

        fs::create_dir_all(temp_dir.path().join("stages")).unwrap();
        fs::write(
            temp_dir.path().join("stages/test.json"),
            r#"{ "origins": ["c.example.com"] }"#,
        )
        .unwrap();

        let base = base_map(json!({
            "stage": "test",
            "origins": ["a.example.com", "b.example.com"]
        }));

        let context = ContextBuilder::new(temp_dir.path(), base).build().unwrap();

        // 配列は連結せず丸ごと置き換え
        assert_eq!(context.get("origins"), Some(&json!(["c.example.com"])));
    }

    #[test]
    fn test_stage_context_missing_is_skipped() {
        let temp_dir = tempfile::tempdir().unwrap();
        let base = base_map(json!({
            "stage": "uat",
            "domainName": "example.com"
        }));

        // stages/uat.json が無くてもエラーにならない
        let context = ContextBuilder::new(temp_dir.path(), base).build().unwrap();
        assert_eq!(context.get_str("domainName"), Some("example.com"));
    }

    #[test]
    fn test_dev_stage_skips_stage_context() {
        let temp_dir = tempfile::tempdir().unwrap();

        fs::create_dir_all(temp_dir.path().join("stages")).unwrap();
        fs::write(
            temp_dir.path().join("stages/dev.json"),
            r#"{ "domainName": "dev.example.com" }"#,
        )
        .unwrap();

        let base = base_map(json!({
            "stage": "dev",
            "domainName": "example.com"
        }));

        // dev はファイルがあっても読みに行かない
        let context = ContextBuilder::new(temp_dir.path(), base).build().unwrap();
        assert_eq!(context.get_str("domainName"), Some("example.com"));
    }

    #[test]
    fn test_stage_context_path_override() {
        let temp_dir = tempfile::tempdir().unwrap();

        fs::create_dir_all(temp_dir.path().join("env")).unwrap();
        fs::write(
            temp_dir.path().join("env/prod.json"),
            r#"{ "region": "us-west-2" }"#,
        )
        .unwrap();

        let base = base_map(json!({
            "stage": "prod",
            "stageContextPath": "env",
            "region": "ap-northeast-1"
        }));

        let context = ContextBuilder::new(temp_dir.path(), base).build().unwrap();
        assert_eq!(context.get_str("region"), Some("us-west-2"));
    }

    #[test]
    fn test_malformed_json_is_fatal() {
        let temp_dir = tempfile::tempdir().unwrap();

        fs::write(temp_dir.path().join("broken.json"), "{ not json").unwrap();

        let base = base_map(json!({
            "stage": "dev",
            "extraContexts": ["broken.json"]
        }));

        let result = ContextBuilder::new(temp_dir.path(), base).build();

        match result {
            Err(ConfigError::ContextParse { path, .. }) => {
                assert!(path.ends_with("broken.json"));
            }
            other => panic!("Expected ContextParse, got {other:?}"),
        }
    }

    #[test]
    fn test_from_file() {
        let temp_dir = tempfile::tempdir().unwrap();

        fs::write(
            temp_dir.path().join(BASE_CONTEXT_FILE),
            r#"{ "name": "site", "stage": "dev", "region": "ap-northeast-1" }"#,
        )
        .unwrap();

        let context = ContextBuilder::from_file(temp_dir.path())
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(context.get_str("name"), Some("site"));
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct CertEntry {
        id: String,
        domain_name: String,
    }

    #[test]
    fn test_resource_lookup() {
        let temp_dir = tempfile::tempdir().unwrap();
        let base = base_map(json!({
            "stage": "dev",
            "certificates": [
                { "id": "site", "domainName": "site.example.com" },
                { "id": "api", "domainName": "api.example.com" }
            ]
        }));

        let context = ContextBuilder::new(temp_dir.path(), base).build().unwrap();

        let cert: CertEntry = context.resource("certificates", "api").unwrap();
        assert_eq!(cert.id, "api");
        assert_eq!(cert.domain_name, "api.example.com");

        assert_eq!(context.resource_ids("certificates"), vec!["site", "api"]);
    }

    #[test]
    fn test_resource_not_found() {
        let temp_dir = tempfile::tempdir().unwrap();
        let base = base_map(json!({
            "stage": "dev",
            "certificates": [{ "id": "site", "domainName": "site.example.com" }]
        }));

        let context = ContextBuilder::new(temp_dir.path(), base).build().unwrap();

        match context.resource::<CertEntry>("certificates", "unknown") {
            Err(ConfigError::ResourceNotFound { kind, id }) => {
                assert_eq!(kind, "certificates");
                assert_eq!(id, "unknown");
            }
            other => panic!("Expected ResourceNotFound, got {other:?}"),
        }

        // 配列キー自体が無い場合も同じエラー
        assert!(matches!(
            context.resource::<CertEntry>("buckets", "site"),
            Err(ConfigError::ResourceNotFound { .. })
        ));
    }

    #[test]
    fn test_resource_invalid_shape() {
        let temp_dir = tempfile::tempdir().unwrap();
        let base = base_map(json!({
            "stage": "dev",
            "certificates": [{ "id": "site" }]
        }));

        let context = ContextBuilder::new(temp_dir.path(), base).build().unwrap();

        assert!(matches!(
            context.resource::<CertEntry>("certificates", "site"),
            Err(ConfigError::InvalidResource { .. })
        ));
    }
}
