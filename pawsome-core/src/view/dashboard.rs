//! Home screen summary for the active dog.

use chrono::NaiveDate;
use serde::Serialize;

use super::calendar::{activity_dates, ActivityCalendar};
use crate::age::calculate_age;
use crate::backend::HealthRecords;
use crate::models::{Diary, Dog};
use crate::store::HealthStore;

/// How many diaries the home screen lists.
pub const RECENT_DIARY_COUNT: usize = 3;

/// Shown in place of a missing measurement.
pub const NO_VALUE: &str = "--";

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub dog: Option<Dog>,
    pub age: Option<String>,
    pub latest_weight: Option<f64>,
    pub latest_food: Option<f64>,
    pub recent_diaries: Vec<Diary>,
    pub calendar: ActivityCalendar,
}

impl Dashboard {
    pub fn build<B: HealthRecords>(store: &HealthStore<B>, today: NaiveDate) -> Self {
        let dog = store.active_dog().cloned();
        let age = dog
            .as_ref()
            .and_then(|d| d.birthday)
            .map(|birthday| calculate_age(birthday, today));

        let weight_logs = store.weight_logs();
        let food_logs = store.food_logs();

        let logged = activity_dates(
            weight_logs
                .iter()
                .map(|l| &l.date)
                .chain(food_logs.iter().map(|l| &l.date)),
        );

        Self {
            dog,
            age,
            latest_weight: weight_logs.last().map(|l| l.weight),
            latest_food: food_logs.last().map(|l| l.amount),
            recent_diaries: store
                .diaries()
                .into_iter()
                .take(RECENT_DIARY_COUNT)
                .cloned()
                .collect(),
            calendar: ActivityCalendar::for_month(today, &logged),
        }
    }

    pub fn weight_label(&self) -> String {
        self.latest_weight
            .map(|w| w.to_string())
            .unwrap_or_else(|| NO_VALUE.to_string())
    }

    pub fn food_label(&self) -> String {
        self.latest_food
            .map(|a| a.to_string())
            .unwrap_or_else(|| NO_VALUE.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{Session, User};
    use crate::models::{FoodLog, WeightLog};
    use crate::store::fake::FakeBackend;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn session() -> Session {
        Session {
            access_token: "jwt".into(),
            refresh_token: "refresh".into(),
            expires_at: i64::MAX,
            user: User {
                id: "user-1".into(),
                email: None,
            },
        }
    }

    fn diary(id: &str, day: u32) -> Diary {
        Diary {
            id: id.into(),
            dog_id: "dog-1".into(),
            date: date(2023, 10, day),
            title: format!("日記 {}", day),
            content: String::new(),
        }
    }

    #[tokio::test]
    async fn test_dashboard_for_active_dog() {
        let backend = FakeBackend::default();
        *backend.dogs.borrow_mut() = vec![Dog {
            id: "dog-1".into(),
            name: "Mochi".into(),
            breed: "Shiba Inu".into(),
            image: String::new(),
            birthday: Some(date(2021, 8, 15)),
            owner_id: Some("user-1".into()),
        }];
        *backend.weight_logs.borrow_mut() = vec![
            WeightLog {
                id: "w1".into(),
                dog_id: "dog-1".into(),
                date: date(2023, 10, 1),
                weight: 8.5,
            },
            WeightLog {
                id: "w2".into(),
                dog_id: "dog-1".into(),
                date: date(2023, 10, 8),
                weight: 8.6,
            },
        ];
        *backend.food_logs.borrow_mut() = vec![FoodLog {
            id: "f1".into(),
            dog_id: "dog-1".into(),
            date: date(2023, 10, 8),
            amount: 120.0,
            memo: String::new(),
        }];
        *backend.diaries.borrow_mut() = vec![
            diary("d4", 20),
            diary("d3", 15),
            diary("d2", 10),
            diary("d1", 5),
        ];

        let mut store = HealthStore::new(backend);
        store.set_session(Some(session())).await;
        let dashboard = Dashboard::build(&store, date(2023, 10, 29));

        assert_eq!(dashboard.dog.as_ref().unwrap().name, "Mochi");
        assert_eq!(dashboard.age.as_deref(), Some("2歳2ヶ月"));
        assert_eq!(dashboard.weight_label(), "8.6");
        assert_eq!(dashboard.food_label(), "120");
        let ids: Vec<&str> = dashboard.recent_diaries.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["d4", "d3", "d2"]);
        assert_eq!(dashboard.calendar.logged_day_count(), 2);

        let json = serde_json::to_value(&dashboard).unwrap();
        let calendar = &json["calendar"];
        assert_eq!(calendar["year"], 2023);
        assert_eq!(calendar["month"], 10);
        assert_eq!(calendar["leading_blanks"], 0);
        let days = calendar["days"].as_array().unwrap();
        assert_eq!(days.len(), 31);
        assert_eq!(days[7]["date"], "2023-10-08");
        assert_eq!(days[7]["has_log"], true);
        assert_eq!(days[28]["is_today"], true);
    }

    #[tokio::test]
    async fn test_dashboard_without_dogs() {
        let mut store = HealthStore::new(FakeBackend::default());
        store.set_session(Some(session())).await;
        let dashboard = Dashboard::build(&store, date(2023, 10, 29));

        assert!(dashboard.dog.is_none());
        assert!(dashboard.age.is_none());
        assert_eq!(dashboard.weight_label(), NO_VALUE);
        assert_eq!(dashboard.food_label(), NO_VALUE);
        assert!(dashboard.recent_diaries.is_empty());
    }
}
