//! Data derived from the store for display: the home summary, the activity
//! calendar, chart series and the input forms.

mod calendar;
mod chart;
mod dashboard;
mod forms;

pub use calendar::{activity_dates, ActivityCalendar, CalendarDay, WEEKDAY_LABELS};
pub use chart::{ChartKind, ChartPoint, ChartSeries, CHART_WINDOW};
pub use dashboard::{Dashboard, NO_VALUE, RECENT_DIARY_COUNT};
pub use forms::{
    placeholder_image_url, DiaryForm, DogForm, DogSubmission, ImageChoice, LogEntry, LogForm,
    LogKind,
};
