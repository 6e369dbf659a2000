//! 词典查询客户端
//!
//! 代理 RapidAPI WordsAPI：`GET {api_url}/{word}`，携带 `X-RapidAPI-Key`
//! 与 `X-RapidAPI-Host` 请求头，只保留释义、词性、同义词三个字段。

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};
use ureq::Agent;

use super::http_client::run_blocking;
use crate::config::DictionaryConfig;
use crate::errors::{Result, WordgateError};

const RAPIDAPI_KEY_HEADER: &str = "X-RapidAPI-Key";
const RAPIDAPI_HOST_HEADER: &str = "X-RapidAPI-Host";

/// 单条词典释义（不落库，每次请求重新生成）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DictionaryEntry {
    pub definition: String,
    pub part_of_speech: String,
    pub synonyms: Vec<String>,
}

/// WordsAPI 原始响应（只声明用得到的字段，其余字段忽略）
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WordsApiResponse {
    #[serde(default)]
    pub results: Option<Vec<WordsApiResult>>,
}

/// WordsAPI 单条结果
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordsApiResult {
    #[serde(default)]
    pub definition: Option<String>,
    #[serde(default)]
    pub part_of_speech: Option<String>,
    #[serde(default)]
    pub synonyms: Option<Vec<String>>,
}

impl From<WordsApiResult> for DictionaryEntry {
    fn from(result: WordsApiResult) -> Self {
        Self {
            definition: result.definition.unwrap_or_default(),
            part_of_speech: result.part_of_speech.unwrap_or_default(),
            synonyms: result.synonyms.unwrap_or_default(),
        }
    }
}

/// 词典数据源 trait
#[async_trait]
pub trait DictionarySource: Send + Sync {
    /// 获取单词的原始查询结果
    async fn fetch_word(&self, word: &str) -> Result<WordsApiResponse>;

    /// 获取数据源名称（用于日志）
    fn name(&self) -> &'static str;
}

/// 基于 RapidAPI 的 HTTP 数据源
pub struct WordsApiSource {
    agent: Agent,
    config: DictionaryConfig,
}

impl WordsApiSource {
    pub fn new(agent: Agent, config: &DictionaryConfig) -> Self {
        Self {
            agent,
            config: config.clone(),
        }
    }

    /// 拼接请求地址，单词作为路径段进行编码
    pub fn word_url(api_url: &str, word: &str) -> String {
        format!(
            "{}/{}",
            api_url.trim_end_matches('/'),
            urlencoding::encode(word)
        )
    }

    fn fetch_sync(agent: Agent, config: DictionaryConfig, word: String) -> Result<WordsApiResponse> {
        if config.api_url.trim().is_empty() {
            return Err(WordgateError::lookup("dictionary API URL is not configured"));
        }

        let url = Self::word_url(&config.api_url, &word);
        let resp = agent
            .get(&url)
            .header(RAPIDAPI_KEY_HEADER, &config.api_key)
            .header(RAPIDAPI_HOST_HEADER, &config.api_host)
            .call()
            .map_err(|e| {
                warn!("Dictionary API request to \"{}\" failed: {}", url, e);
                WordgateError::lookup(e.to_string())
            })?;

        resp.into_body()
            .read_json::<WordsApiResponse>()
            .map_err(|e| {
                warn!("Dictionary API response from \"{}\" parse failed: {}", url, e);
                WordgateError::lookup(e.to_string())
            })
    }
}

#[async_trait]
impl DictionarySource for WordsApiSource {
    async fn fetch_word(&self, word: &str) -> Result<WordsApiResponse> {
        let agent = self.agent.clone();
        let config = self.config.clone();
        let word = word.to_string();

        run_blocking(
            move || Self::fetch_sync(agent, config, word),
            WordgateError::Lookup,
        )
        .await
    }

    fn name(&self) -> &'static str {
        "WordsAPI"
    }
}

/// 词典客户端
#[derive(Clone)]
pub struct DictionaryClient {
    source: Arc<dyn DictionarySource>,
}

impl DictionaryClient {
    pub fn new(source: Arc<dyn DictionarySource>) -> Self {
        Self { source }
    }

    /// 查询单词
    ///
    /// - 有结果：`Some(entries)`，条数与上游结果一致
    /// - 无结果（`results` 为空或缺失）：`None`
    pub async fn lookup_word(&self, word: &str) -> Result<Option<Vec<DictionaryEntry>>> {
        trace!("Looking up \"{}\" via {}", word, self.source.name());

        let response = self.source.fetch_word(word).await?;
        let entries = Self::normalize(response);

        match &entries {
            Some(list) => debug!("Dictionary lookup for \"{}\": {} results", word, list.len()),
            None => debug!("Dictionary lookup for \"{}\": no results", word),
        }

        Ok(entries)
    }

    fn normalize(response: WordsApiResponse) -> Option<Vec<DictionaryEntry>> {
        response
            .results
            .filter(|results| !results.is_empty())
            .map(|results| results.into_iter().map(DictionaryEntry::from).collect())
    }

    pub fn source_name(&self) -> &'static str {
        self.source.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StaticSource(serde_json::Value);

    #[async_trait]
    impl DictionarySource for StaticSource {
        async fn fetch_word(&self, _word: &str) -> Result<WordsApiResponse> {
            Ok(serde_json::from_value(self.0.clone())?)
        }

        fn name(&self) -> &'static str {
            "Static"
        }
    }

    fn client(body: serde_json::Value) -> DictionaryClient {
        DictionaryClient::new(Arc::new(StaticSource(body)))
    }

    #[tokio::test]
    async fn test_lookup_maps_only_three_fields() {
        let body = serde_json::json!({
            "word": "serendipity",
            "results": [
                {
                    "definition": "good luck in making unexpected and fortunate discoveries",
                    "partOfSpeech": "noun",
                    "synonyms": ["fluke", "luck"],
                    "typeOf": ["good luck", "fortune"]
                },
                {
                    "definition": "an aptitude for finding pleasant things",
                    "partOfSpeech": "noun"
                }
            ],
            "pronunciation": { "all": "ˌsɛrənˈdɪpɪti" }
        });

        let entries = client(body).lookup_word("serendipity").await.unwrap().unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].part_of_speech, "noun");
        assert_eq!(entries[0].synonyms, vec!["fluke", "luck"]);
        assert!(entries[1].synonyms.is_empty());

        let json = serde_json::to_value(&entries[0]).unwrap();
        let keys: Vec<&String> = json.as_object().unwrap().keys().collect();
        assert_eq!(keys.len(), 3);
        assert!(json.get("partOfSpeech").is_some());
        assert!(json.get("typeOf").is_none());
    }

    #[tokio::test]
    async fn test_lookup_returns_none_for_empty_results() {
        let result = client(serde_json::json!({ "word": "qwzx", "results": [] }))
            .lookup_word("qwzx")
            .await
            .unwrap();
        assert!(result.is_none());

        let result = client(serde_json::json!({ "word": "qwzx" }))
            .lookup_word("qwzx")
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_null_part_of_speech_becomes_empty() {
        let body = serde_json::json!({
            "results": [{ "definition": "a thing", "partOfSpeech": null, "synonyms": null }]
        });

        let entries = client(body).lookup_word("thing").await.unwrap().unwrap();
        assert_eq!(entries[0].part_of_speech, "");
        assert!(entries[0].synonyms.is_empty());
    }

    #[tokio::test]
    async fn test_unexpected_shape_is_an_error() {
        let result = client(serde_json::json!({ "results": "nope" }))
            .lookup_word("word")
            .await;
        assert!(result.is_err());
    }

    #[test]
    fn test_word_url_encodes_path_segment() {
        assert_eq!(
            WordsApiSource::word_url("https://wordsapiv1.p.rapidapi.com/words/", "ice cream"),
            "https://wordsapiv1.p.rapidapi.com/words/ice%20cream"
        );
    }

    #[tokio::test]
    async fn test_unconfigured_url_fails_at_request_time() {
        let source = WordsApiSource::new(
            crate::services::http_client::build_agent(&Default::default()),
            &DictionaryConfig::default(),
        );

        let result = source.fetch_word("hello").await;
        assert!(matches!(result, Err(WordgateError::Lookup(msg)) if msg.contains("not configured")));
    }
}
