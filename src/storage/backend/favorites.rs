//! Favorite word operations for SeaOrmStorage
//!
//! 单条记录的增删查，每个操作都是独立的语句，不使用事务。

use sea_orm::{EntityTrait, QueryOrder};
use tracing::{debug, info};

use super::SeaOrmStorage;
use super::converters::{favorite_to_active_model, model_to_favorite};
use crate::errors::{Result, WordgateError};
use crate::storage::FavoriteWord;
use crate::storage::models::normalize_id;

use migration::entities::favorite_word;

impl SeaOrmStorage {
    /// 新增收藏，返回带 id 和时间戳的记录
    ///
    /// 返回值从数据库读回，时间戳精度与之后 `list_favorites` 返回的一致
    /// （MySQL 精确到秒，PostgreSQL 精确到微秒）。
    pub async fn add_favorite(&self, word: Option<&str>) -> Result<FavoriteWord> {
        let favorite = FavoriteWord::new(word)?;

        favorite_word::Entity::insert(favorite_to_active_model(&favorite))
            .exec(&self.db)
            .await
            .map_err(|e| {
                WordgateError::database_operation(format!("Failed to save favorite: {}", e))
            })?;

        let stored = favorite_word::Entity::find_by_id(favorite.id.clone())
            .one(&self.db)
            .await
            .map_err(|e| {
                WordgateError::database_operation(format!("Failed to reload favorite: {}", e))
            })?
            .map(model_to_favorite)
            .ok_or_else(|| {
                WordgateError::database_operation(format!(
                    "Favorite {} missing right after insert",
                    favorite.id
                ))
            })?;

        info!("Favorite word added: {} ({})", stored.word, stored.id);
        Ok(stored)
    }

    /// 列出所有收藏，按创建时间升序
    pub async fn list_favorites(&self) -> Result<Vec<FavoriteWord>> {
        let models = favorite_word::Entity::find()
            .order_by_asc(favorite_word::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| {
                WordgateError::database_operation(format!("Failed to load favorites: {}", e))
            })?;

        debug!("Loaded {} favorite words", models.len());
        Ok(models.into_iter().map(model_to_favorite).collect())
    }

    /// 按 id 删除收藏
    ///
    /// 返回被删除的记录；id 不存在时返回 `None`（不是错误）。
    pub async fn remove_favorite(&self, id: Option<&str>) -> Result<Option<FavoriteWord>> {
        let id = normalize_id(id)?;

        let Some(model) = favorite_word::Entity::find_by_id(id.clone())
            .one(&self.db)
            .await
            .map_err(|e| {
                WordgateError::database_operation(format!("Failed to find favorite: {}", e))
            })?
        else {
            debug!("Favorite word not found for removal: {}", id);
            return Ok(None);
        };

        let result = favorite_word::Entity::delete_by_id(id.clone())
            .exec(&self.db)
            .await
            .map_err(|e| {
                WordgateError::database_operation(format!("Failed to delete favorite: {}", e))
            })?;

        // 查询与删除之间被并发删除
        if result.rows_affected == 0 {
            return Ok(None);
        }

        info!("Favorite word removed: {}", id);
        Ok(Some(model_to_favorite(model)))
    }
}
