use serde::Serialize;

use crate::dashboard_client::models::Period;

#[derive(Serialize)]
pub struct PeriodQuery {
    pub period: Period,
}

#[derive(Serialize)]
pub struct HistoryQuery {
    pub period: Period,
    pub limit: u32,
}

#[derive(Serialize)]
pub struct LeaderboardQuery {
    pub period: Period,
    pub limit: u32,
}
