pub mod keywords;
pub mod menu;
pub mod models;
pub mod replies;

pub use keywords::{contains_any, scan_dishes, DishRule, TopicRule};
pub use menu::normalize_dish_name;
pub use models::*;
