//! State owned by the rendering surface for one birthday picker.
//!
//! `Idle -> Loading -> Result`, and back to `Idle` on retry. Each lookup is
//! stamped with a monotonically increasing token; a completion carrying any
//! token other than the latest issued one is dropped.

use crate::core::fetcher::HoroscopeFetcher;
use crate::core::zodiac;
use crate::domain::model::{CalendarDate, HoroscopeReading, ZodiacSign};
use crate::domain::ports::HoroscopeSource;
use crate::utils::error::{ErrorCategory, HoroscopeError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Result,
}

/// Handed out by [`LookupSession::begin_lookup`] and returned with the outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupTicket {
    pub token: RequestToken,
    pub date: CalendarDate,
}

/// A blocking, user-visible failure message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub detail: String,
    pub category: ErrorCategory,
}

impl From<&HoroscopeError> for Notice {
    fn from(err: &HoroscopeError) -> Self {
        Self {
            message: err.user_friendly_message(),
            detail: err.to_string(),
            category: err.category(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    Applied,
    Stale,
    Failed(Notice),
}

#[derive(Debug, Clone)]
pub struct LookupSession {
    selected: CalendarDate,
    zodiac: Option<ZodiacSign>,
    displayed: Option<HoroscopeReading>,
    notice: Option<Notice>,
    issued: u64,
    pending: Option<RequestToken>,
}

impl Default for LookupSession {
    fn default() -> Self {
        Self::new(CalendarDate::today())
    }
}

impl LookupSession {
    pub fn new(selected: CalendarDate) -> Self {
        Self {
            selected,
            zodiac: None,
            displayed: None,
            notice: None,
            issued: 0,
            pending: None,
        }
    }

    pub fn phase(&self) -> Phase {
        if self.pending.is_some() {
            Phase::Loading
        } else if self.displayed.is_some() {
            Phase::Result
        } else {
            Phase::Idle
        }
    }

    pub fn selected(&self) -> CalendarDate {
        self.selected
    }

    pub fn zodiac(&self) -> Option<ZodiacSign> {
        self.zodiac
    }

    pub fn displayed(&self) -> Option<&HoroscopeReading> {
        self.displayed.as_ref()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn select_date(&mut self, date: CalendarDate) {
        self.selected = date;
    }

    pub fn select_year(&mut self, year: i32) -> Result<()> {
        self.selected = self.selected.with_year(year)?;
        Ok(())
    }

    pub fn select_month(&mut self, month: u32) -> Result<()> {
        self.selected = self.selected.with_month(month)?;
        Ok(())
    }

    pub fn select_day(&mut self, day: u32) -> Result<()> {
        self.selected = self.selected.with_day(day)?;
        Ok(())
    }

    /// Issues a new token for the selected date. Any older pending ticket
    /// becomes stale.
    pub fn begin_lookup(&mut self) -> LookupTicket {
        self.issued += 1;
        let token = RequestToken(self.issued);
        self.pending = Some(token);
        self.notice = None;
        self.zodiac = Some(zodiac::resolve(self.selected.month(), self.selected.day()));

        tracing::debug!("Lookup {:?} started for {}", token, self.selected);
        LookupTicket {
            token,
            date: self.selected,
        }
    }

    pub fn complete_lookup(
        &mut self,
        ticket: LookupTicket,
        result: Result<HoroscopeReading>,
    ) -> Completion {
        if self.pending != Some(ticket.token) {
            tracing::debug!("Discarding stale lookup {:?}", ticket.token);
            return Completion::Stale;
        }
        self.pending = None;

        match result {
            Ok(reading) => {
                self.zodiac = Some(reading.sign);
                self.displayed = Some(reading);
                Completion::Applied
            }
            Err(e) => {
                tracing::error!(
                    "Horoscope lookup failed: {} (Category: {:?})",
                    e,
                    e.category()
                );
                // 保留先前顯示的結果
                self.zodiac = self.displayed.as_ref().map(|r| r.sign);
                let notice = Notice::from(&e);
                self.notice = Some(notice.clone());
                Completion::Failed(notice)
            }
        }
    }

    pub async fn lookup<S: HoroscopeSource>(&mut self, fetcher: &HoroscopeFetcher<S>) -> Completion {
        let ticket = self.begin_lookup();
        let result = fetcher.fetch_horoscope(&ticket.date).await;
        self.complete_lookup(ticket, result)
    }

    /// Clears the result and zodiac and returns to the picker. The selected
    /// date is kept; an in-flight lookup will be discarded when it lands.
    pub fn retry(&mut self) {
        self.displayed = None;
        self.zodiac = None;
        self.notice = None;
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(sign: ZodiacSign, text: &str) -> HoroscopeReading {
        HoroscopeReading {
            sign,
            bucket: "2025-09-28".to_string(),
            text: text.to_string(),
        }
    }

    fn network_error() -> HoroscopeError {
        HoroscopeError::IoError(std::io::Error::new(
            std::io::ErrorKind::ConnectionReset,
            "connection reset",
        ))
    }

    #[test]
    fn test_happy_path_then_retry() {
        let mut session = LookupSession::new(CalendarDate::new(2025, 3, 21).unwrap());
        assert_eq!(session.phase(), Phase::Idle);

        let ticket = session.begin_lookup();
        assert_eq!(session.phase(), Phase::Loading);
        assert_eq!(session.zodiac(), Some(ZodiacSign::Aries));

        let outcome = session.complete_lookup(ticket, Ok(reading(ZodiacSign::Aries, "Great day")));
        assert_eq!(outcome, Completion::Applied);
        assert_eq!(session.phase(), Phase::Result);
        assert_eq!(session.displayed().unwrap().text, "Great day");

        session.retry();
        assert_eq!(session.phase(), Phase::Idle);
        assert!(session.displayed().is_none());
        assert!(session.zodiac().is_none());
        assert_eq!(session.selected(), CalendarDate::new(2025, 3, 21).unwrap());
    }

    #[test]
    fn test_failure_keeps_displayed_result() {
        let mut session = LookupSession::new(CalendarDate::new(2025, 3, 21).unwrap());
        let first = session.begin_lookup();
        session.complete_lookup(first, Ok(reading(ZodiacSign::Aries, "Great day")));

        session.select_date(CalendarDate::new(2025, 12, 25).unwrap());
        let second = session.begin_lookup();
        assert_eq!(session.zodiac(), Some(ZodiacSign::Capricorn));

        let outcome = session.complete_lookup(second, Err(network_error()));
        match outcome {
            Completion::Failed(notice) => {
                assert_eq!(notice.message, "운세 데이터를 불러오는데 실패했습니다.");
            }
            other => panic!("expected failure, got {:?}", other),
        }
        assert_eq!(session.phase(), Phase::Result);
        assert_eq!(session.displayed().unwrap().text, "Great day");
        assert_eq!(session.zodiac(), Some(ZodiacSign::Aries));
        assert!(session.notice().is_some());
    }

    #[test]
    fn test_failure_from_idle_stays_idle() {
        let mut session = LookupSession::new(CalendarDate::new(2025, 6, 1).unwrap());
        let ticket = session.begin_lookup();
        session.complete_lookup(ticket, Err(network_error()));

        assert_eq!(session.phase(), Phase::Idle);
        assert!(session.displayed().is_none());
        assert!(session.zodiac().is_none());
    }

    #[test]
    fn test_older_response_is_discarded() {
        let mut session = LookupSession::new(CalendarDate::new(2025, 1, 1).unwrap());
        let older = session.begin_lookup();
        session.select_date(CalendarDate::new(2025, 8, 1).unwrap());
        let newer = session.begin_lookup();
        assert!(newer.token > older.token);

        let outcome = session.complete_lookup(newer, Ok(reading(ZodiacSign::Leo, "newer")));
        assert_eq!(outcome, Completion::Applied);

        let outcome = session.complete_lookup(older, Ok(reading(ZodiacSign::Capricorn, "older")));
        assert_eq!(outcome, Completion::Stale);
        assert_eq!(session.displayed().unwrap().text, "newer");
    }

    #[test]
    fn test_retry_invalidates_in_flight_lookup() {
        let mut session = LookupSession::new(CalendarDate::new(2025, 1, 1).unwrap());
        let ticket = session.begin_lookup();
        session.retry();

        let outcome = session.complete_lookup(ticket, Ok(reading(ZodiacSign::Capricorn, "late")));
        assert_eq!(outcome, Completion::Stale);
        assert_eq!(session.phase(), Phase::Idle);
    }

    struct OfflineSource;

    #[async_trait::async_trait]
    impl HoroscopeSource for OfflineSource {
        async fn fetch_document(&self) -> Result<String> {
            Err(network_error())
        }

        fn describe(&self) -> String {
            "offline".to_string()
        }
    }

    #[test]
    fn test_lookup_drives_fetcher_and_reports_failure() {
        let fetcher = HoroscopeFetcher::new(OfflineSource);
        let mut session = LookupSession::new(CalendarDate::new(2025, 9, 27).unwrap());

        let outcome = tokio_test::block_on(session.lookup(&fetcher));

        assert!(matches!(outcome, Completion::Failed(ref n) if n.category == ErrorCategory::Fetch));
        assert_eq!(session.phase(), Phase::Idle);
        assert_eq!(session.notice().map(|n| n.category), Some(ErrorCategory::Fetch));
    }

    #[test]
    fn test_partial_selection_clamps_day() {
        let mut session = LookupSession::new(CalendarDate::new(2024, 3, 31).unwrap());
        session.select_month(2).unwrap();
        assert_eq!(session.selected(), CalendarDate::new(2024, 2, 29).unwrap());
        session.select_year(2025).unwrap();
        assert_eq!(session.selected(), CalendarDate::new(2025, 2, 28).unwrap());
        assert!(session.select_day(30).is_err());
        assert!(session.select_month(13).is_err());
    }

    #[test]
    fn test_select_year_out_of_calendar_keeps_selection() {
        let mut session = LookupSession::new(CalendarDate::new(2025, 12, 1).unwrap());
        assert!(session.select_year(i32::MAX).is_err());
        assert_eq!(session.selected(), CalendarDate::new(2025, 12, 1).unwrap());
    }
}
