//! 词典查询端点
//!
//! `/search?word=` 与 `/get-favorite/{word}` 都是对词典 API 的实时代理，
//! 两者都挂在访问闸门之后。

use actix_web::{HttpResponse, web};
use serde::Deserialize;
use tracing::{debug, error, trace};

use crate::errors::WordgateError;
use crate::services::DictionaryClient;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub word: Option<String>,
}

pub struct WordService;

impl WordService {
    /// GET /search?word={word}
    pub async fn search(
        query: web::Query<SearchQuery>,
        dictionary: web::Data<DictionaryClient>,
    ) -> Result<HttpResponse, WordgateError> {
        trace!("Received search request: {:?}", query.word);
        Self::lookup(&dictionary, query.word.as_deref()).await
    }

    /// GET /get-favorite/{word}
    ///
    /// 与 `/search` 行为一致，只是单词来自路径。
    pub async fn get_favorite(
        path: web::Path<String>,
        dictionary: web::Data<DictionaryClient>,
    ) -> Result<HttpResponse, WordgateError> {
        let word = path.into_inner();
        trace!("Received get-favorite request: {}", word);
        Self::lookup(&dictionary, Some(&word)).await
    }

    /// 空白单词直接拒绝；非空单词原样传给上游
    async fn lookup(
        dictionary: &DictionaryClient,
        word: Option<&str>,
    ) -> Result<HttpResponse, WordgateError> {
        let word = word
            .filter(|w| !w.trim().is_empty())
            .ok_or_else(|| WordgateError::validation("Word is required"))?;

        match dictionary.lookup_word(word).await {
            Ok(Some(entries)) => Ok(HttpResponse::Ok().json(entries)),
            Ok(None) => {
                debug!("No dictionary result for \"{}\"", word);
                Err(WordgateError::not_found("No result found"))
            }
            Err(e) => {
                error!(
                    "Dictionary lookup for \"{}\" via {} failed: {}",
                    word,
                    dictionary.source_name(),
                    e
                );
                Err(e)
            }
        }
    }
}
