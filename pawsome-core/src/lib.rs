//! Pawsome Growth Core Library
//!
//! Records, remote backend client and the session-scoped store behind the
//! dog health log.

pub mod age;
pub mod backend;
pub mod models;
pub mod store;
pub mod view;

pub use age::{age_today, calculate_age, Age};
pub use backend::{
    AuthError, Backend, BackendConfig, BackendError, HealthRecords, ImageFile, Session,
    SignUpOutcome, UploadError, User, AUTH_FAILED_MESSAGE, IMAGE_BUCKET,
};
pub use models::{
    Diary, Dog, DogUpdate, FoodLog, NewDiary, NewDog, NewFoodLog, NewWeightLog, WeightLog,
};
pub use store::HealthStore;

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
