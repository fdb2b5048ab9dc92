mod diary;
mod dog;
mod food_log;
pub mod row;
mod weight_log;

pub use diary::{Diary, NewDiary};
pub use dog::{Dog, DogInsert, DogRow, DogUpdate, NewDog};
pub use food_log::{FoodLog, NewFoodLog};
pub use weight_log::{NewWeightLog, WeightLog};
