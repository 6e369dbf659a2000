//! 收藏单词端点（不经过访问闸门）

use actix_web::{HttpResponse, web};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, trace};

use crate::errors::WordgateError;
use crate::storage::SeaOrmStorage;

/// POST /add-favorite 请求体
///
/// 请求体缺失或不是合法 JSON 时按缺少 `word` 处理。
#[derive(Debug, Default, Deserialize)]
pub struct AddFavoriteRequest {
    #[serde(default)]
    pub word: Option<String>,
}

pub struct FavoriteService;

impl FavoriteService {
    /// POST /add-favorite
    pub async fn add_favorite(
        body: Option<web::Json<AddFavoriteRequest>>,
        storage: web::Data<Arc<SeaOrmStorage>>,
    ) -> Result<HttpResponse, WordgateError> {
        let word = body.and_then(|b| b.into_inner().word);
        trace!("Received add-favorite request: {:?}", word);

        let favorite = storage
            .add_favorite(word.as_deref())
            .await
            .inspect_err(|e| log_storage_error("add-favorite", e))?;

        Ok(HttpResponse::Ok().json(favorite))
    }

    /// GET /get-favorites
    pub async fn get_favorites(
        storage: web::Data<Arc<SeaOrmStorage>>,
    ) -> Result<HttpResponse, WordgateError> {
        let favorites = storage
            .list_favorites()
            .await
            .inspect_err(|e| log_storage_error("get-favorites", e))?;

        Ok(HttpResponse::Ok().json(favorites))
    }

    /// DELETE /remove-favorite/{id}
    ///
    /// 返回被删除的记录；id 不存在时返回 `null`。
    pub async fn remove_favorite(
        path: web::Path<String>,
        storage: web::Data<Arc<SeaOrmStorage>>,
    ) -> Result<HttpResponse, WordgateError> {
        let id = path.into_inner();
        trace!("Received remove-favorite request: {}", id);

        let removed = storage
            .remove_favorite(Some(&id))
            .await
            .inspect_err(|e| log_storage_error("remove-favorite", e))?;

        Ok(HttpResponse::Ok().json(removed))
    }
}

fn log_storage_error(operation: &str, err: &WordgateError) {
    if err.http_status().is_server_error() {
        error!("{} failed: {}", operation, err);
    } else {
        trace!("{} rejected: {}", operation, err);
    }
}
