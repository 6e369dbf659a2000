pub mod favorite_word;

pub use favorite_word::Entity as FavoriteWordEntity;
