pub mod favorites;
pub mod words;

use actix_web::web;

use crate::api::middleware::AccessGate;

pub use favorites::{AddFavoriteRequest, FavoriteService};
pub use words::{SearchQuery, WordService};

/// 全部路由
///
/// 词典查询两条路由挂访问闸门，收藏相关路由不挂。
/// `{param:.*}` 允许空段，空的单词/ID 交给 handler 返回 400。
pub fn api_routes(gate: AccessGate) -> actix_web::Scope {
    web::scope("")
        .route(
            "/search",
            web::get().to(WordService::search).wrap(gate.clone()),
        )
        .route(
            "/get-favorite/{word:.*}",
            web::get().to(WordService::get_favorite).wrap(gate),
        )
        .route("/add-favorite", web::post().to(FavoriteService::add_favorite))
        .route("/get-favorites", web::get().to(FavoriteService::get_favorites))
        .route(
            "/remove-favorite/{id:.*}",
            web::delete().to(FavoriteService::remove_favorite),
        )
}
