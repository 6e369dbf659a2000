use crate::storage::FavoriteWord;
use migration::entities::favorite_word;

/// 将 Sea-ORM Model 转换为 FavoriteWord
pub fn model_to_favorite(model: favorite_word::Model) -> FavoriteWord {
    FavoriteWord {
        id: model.id,
        word: model.word,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

/// 将 FavoriteWord 转换为 ActiveModel（仅用于插入，记录创建后不再修改）
pub fn favorite_to_active_model(favorite: &FavoriteWord) -> favorite_word::ActiveModel {
    use sea_orm::ActiveValue::Set;

    favorite_word::ActiveModel {
        id: Set(favorite.id.clone()),
        word: Set(favorite.word.clone()),
        created_at: Set(favorite.created_at),
        updated_at: Set(favorite.updated_at),
    }
}
