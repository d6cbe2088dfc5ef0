use crate::core::session::{LookupSession, Notice, Phase};
use crate::domain::model::{CalendarDate, HoroscopeReading};

pub const RESULT_TITLE_SUFFIX: &str = "오늘의 운세";

pub fn render_date(date: &CalendarDate) -> String {
    format!("{}년 {}월 {}일", date.year(), date.month(), date.day())
}

pub fn render_reading(reading: &HoroscopeReading) -> String {
    format!("{} {}\n\n{}", reading.sign, RESULT_TITLE_SUFFIX, reading.text)
}

pub fn render_notice(notice: &Notice) -> String {
    format!("❌ {}", notice.message)
}

/// One screen of the session, as the terminal shows it.
pub fn render_session(session: &LookupSession) -> String {
    match session.phase() {
        Phase::Idle => format!("생년월일: {}", render_date(&session.selected())),
        Phase::Loading => format!("{} 운세를 불러오는 중...", render_date(&session.selected())),
        Phase::Result => session
            .displayed()
            .map(render_reading)
            .unwrap_or_default(),
    }
}
