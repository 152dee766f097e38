use chrono::NaiveDate;
use tracing::{error, info, warn};

use super::{DateRange, PaymentSummary};
use crate::backend::{KotQuery, KotSource};

pub const LOAD_ERROR_MESSAGE: &str = "Error loading collection data";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    Loading,
    Ready,
}

/// Where the view reports progress and failures.
pub trait Surface {
    fn show_loading(&self) {}

    /// Blocking, user-facing notification.
    fn alert(&self, message: &str);
}

/// Collection report bound to a date range. Every change of either boundary
/// reloads the tickets and rebuilds the summary from scratch.
pub struct CollectionView {
    source: Box<dyn KotSource>,
    surface: Box<dyn Surface>,
    range: DateRange,
    state: ViewState,
    summary: PaymentSummary,
    last_error: Option<String>,
}

impl CollectionView {
    /// Create the view and run the initial load.
    pub fn open(source: Box<dyn KotSource>, surface: Box<dyn Surface>, range: DateRange) -> Self {
        let mut view = Self {
            source,
            surface,
            range,
            state: ViewState::Loading,
            summary: PaymentSummary::default(),
            last_error: None,
        };
        view.refresh();
        view
    }

    pub fn set_start_date(&mut self, start: NaiveDate) {
        if self.range.start != start {
            self.range.start = start;
            self.refresh();
        }
    }

    pub fn set_end_date(&mut self, end: NaiveDate) {
        if self.range.end != end {
            self.range.end = end;
            self.refresh();
        }
    }

    /// Query the current range and replace the summary. On failure the
    /// previous summary stays and the surface is alerted. Either way the view
    /// ends up Ready.
    pub fn refresh(&mut self) {
        self.state = ViewState::Loading;
        self.surface.show_loading();

        if self.range.is_inverted() {
            warn!(start = %self.range.start, end = %self.range.end, "start date is after end date");
        }

        let query = KotQuery::for_range(&self.range);
        match self.source.fetch_kots(&query) {
            Ok(records) => {
                self.summary = PaymentSummary::from_records(&records);
                self.last_error = None;
                info!(
                    start = %self.range.start,
                    end = %self.range.end,
                    tickets = self.summary.tickets,
                    grand_total = self.summary.grand_total(),
                    "collection summary rebuilt"
                );
            }
            Err(e) => {
                error!("Error loading collection data: {e}");
                self.last_error = Some(e.to_string());
                self.surface.alert(LOAD_ERROR_MESSAGE);
            }
        }

        self.state = ViewState::Ready;
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == ViewState::Loading
    }

    pub fn range(&self) -> DateRange {
        self.range
    }

    pub fn summary(&self) -> &PaymentSummary {
        &self.summary
    }

    /// Message of the most recent failed load, cleared by a successful one.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{PosError, Result};
    use crate::model::{KotItem, KotRecord, PaymentMethod};
    use std::cell::RefCell;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<String>>>;

    struct ScriptedSource {
        log: Log,
        fail: Rc<RefCell<bool>>,
        records: Vec<KotRecord>,
    }

    impl KotSource for ScriptedSource {
        fn fetch_kots(&self, query: &KotQuery) -> Result<Vec<KotRecord>> {
            self.log.borrow_mut().push(format!(
                "fetch {}..{}",
                query.created_from.date(),
                query.created_to.date()
            ));
            if *self.fail.borrow() {
                return Err(PosError::CollectionUnavailable("backend down".into()));
            }
            Ok(self.records.clone())
        }
    }

    struct RecordingSurface {
        log: Log,
    }

    impl Surface for RecordingSurface {
        fn show_loading(&self) {
            self.log.borrow_mut().push("loading".into());
        }

        fn alert(&self, message: &str) {
            self.log.borrow_mut().push(format!("alert {message}"));
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
    }

    fn cash_ticket(amount: f64) -> KotRecord {
        KotRecord {
            payment_method: PaymentMethod::Cash,
            kot_items: Some(vec![KotItem {
                quantity: Some(1.0),
                unit_price: Some(amount),
            }]),
            ..Default::default()
        }
    }

    fn view(fail: bool) -> (CollectionView, Log, Rc<RefCell<bool>>) {
        let log: Log = Rc::default();
        let fail = Rc::new(RefCell::new(fail));
        let source = ScriptedSource {
            log: log.clone(),
            fail: fail.clone(),
            records: vec![cash_ticket(120.0), cash_ticket(80.0)],
        };
        let surface = RecordingSurface { log: log.clone() };
        let view = CollectionView::open(
            Box::new(source),
            Box::new(surface),
            DateRange::new(day(19), day(19)),
        );
        (view, log, fail)
    }

    #[test]
    fn open_loads_once_and_ends_ready() {
        let (view, log, _) = view(false);
        assert_eq!(*log.borrow(), vec!["loading", "fetch 2026-10-19..2026-10-19"]);
        assert_eq!(view.state(), ViewState::Ready);
        assert_eq!(view.summary().cash_total(), 200.0);
        assert!(view.last_error().is_none());
    }

    #[test]
    fn each_boundary_change_triggers_one_fetch() {
        let (mut view, log, _) = view(false);
        log.borrow_mut().clear();

        view.set_start_date(day(1));
        view.set_end_date(day(20));
        let fetches: Vec<String> = log
            .borrow()
            .iter()
            .filter(|l| l.starts_with("fetch"))
            .cloned()
            .collect();
        assert_eq!(
            fetches,
            vec!["fetch 2026-10-01..2026-10-19", "fetch 2026-10-01..2026-10-20"]
        );
        assert!(!view.is_loading());
    }

    #[test]
    fn unchanged_boundary_does_not_reload() {
        let (mut view, log, _) = view(false);
        log.borrow_mut().clear();

        view.set_start_date(day(19));
        view.set_end_date(day(19));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn failure_alerts_keeps_summary_and_clears_loading() {
        let (mut view, log, fail) = view(false);
        *fail.borrow_mut() = true;
        log.borrow_mut().clear();

        view.set_end_date(day(21));

        assert_eq!(
            *log.borrow(),
            vec![
                "loading".to_string(),
                "fetch 2026-10-19..2026-10-21".to_string(),
                format!("alert {LOAD_ERROR_MESSAGE}"),
            ]
        );
        assert_eq!(view.state(), ViewState::Ready);
        assert_eq!(view.summary().cash_total(), 200.0);
        assert!(view.last_error().unwrap().contains("backend down"));

        *fail.borrow_mut() = false;
        view.refresh();
        assert!(view.last_error().is_none());
    }

    #[test]
    fn failed_initial_load_leaves_zero_summary() {
        let (view, _, _) = view(true);
        assert_eq!(view.state(), ViewState::Ready);
        assert_eq!(view.summary().grand_total(), 0.0);
        assert!(view.last_error().is_some());
    }
}
