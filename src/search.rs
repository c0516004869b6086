//! Live table search
//!
//! Filtering is a pure function over row texts; rendering the result is left
//! to a [`TableView`].

use crate::consts::cli_consts::search::DEFAULT_ROW_SELECTOR;
use crate::debounce::Debouncer;
use crate::scheduler::Scheduler;
use log::debug;
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use std::time::Duration;

/// Result of splitting rows by a predicate. Both sides hold indices into the input, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition {
    pub visible: Vec<usize>,
    pub hidden: Vec<usize>,
}

pub fn filter_rows<T>(rows: &[T], predicate: impl Fn(&T) -> bool) -> Partition {
    let mut partition = Partition::default();
    for (index, row) in rows.iter().enumerate() {
        if predicate(row) {
            partition.visible.push(index);
        } else {
            partition.hidden.push(index);
        }
    }
    partition
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RowState {
    pub visible: bool,
    pub highlighted: bool,
}

/// The "N of M" indicator next to a search box.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ResultsCounter {
    Hidden,
    Shown { visible: usize, total: usize },
}

impl Display for ResultsCounter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ResultsCounter::Hidden => Ok(()),
            ResultsCounter::Shown { visible, total } => write!(f, "{} of {}", visible, total),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    pub term: String,
    pub rows: Vec<RowState>,
    pub counter: ResultsCounter,
}

impl SearchOutcome {
    pub fn visible_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, state)| state.visible)
            .map(|(index, _)| index)
    }
}

/// Computes row visibility for a search term. Matching is case-insensitive substring.
pub fn search_rows(term: &str, row_texts: &[String]) -> SearchOutcome {
    let term = term.to_lowercase();
    let partition = filter_rows(row_texts, |text| text.to_lowercase().contains(&term));

    let mut rows = vec![
        RowState {
            visible: false,
            highlighted: false,
        };
        row_texts.len()
    ];
    for &index in &partition.visible {
        rows[index] = RowState {
            visible: true,
            highlighted: !term.is_empty(),
        };
    }

    let counter = if term.is_empty() {
        ResultsCounter::Hidden
    } else {
        ResultsCounter::Shown {
            visible: partition.visible.len(),
            total: row_texts.len(),
        }
    };

    SearchOutcome {
        term,
        rows,
        counter,
    }
}

/// A value typed into a search input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchEvent {
    pub value: String,
    /// Row selector named by the input; the default rows are used when absent.
    pub target: Option<String>,
}

impl SearchEvent {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            target: None,
        }
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }
}

/// Table the search reads rows from and renders results into.
pub trait TableView: Send + Sync {
    /// Text content of every row matched by `selector`.
    fn row_texts(&self, selector: &str) -> Vec<String>;

    /// Applies visibility, highlight and counter state to the rows matched by `selector`.
    fn render(&self, selector: &str, outcome: &SearchOutcome);
}

pub struct SearchFilter {
    table: Arc<dyn TableView>,
}

impl SearchFilter {
    pub fn new(table: Arc<dyn TableView>) -> Self {
        Self { table }
    }

    pub fn handle_search(&self, event: &SearchEvent) -> SearchOutcome {
        let selector = event.target.as_deref().unwrap_or(DEFAULT_ROW_SELECTOR);
        let row_texts = self.table.row_texts(selector);
        let outcome = search_rows(&event.value, &row_texts);
        debug!(
            "Search {:?} on {}: {} of {} rows visible",
            outcome.term,
            selector,
            outcome.visible_indices().count(),
            row_texts.len()
        );
        self.table.render(selector, &outcome);
        outcome
    }

    /// Wraps [`SearchFilter::handle_search`] in a debouncer for one search input.
    pub fn bind(
        self: Arc<Self>,
        scheduler: Arc<dyn Scheduler>,
        wait: Duration,
    ) -> Debouncer<SearchEvent> {
        Debouncer::new(scheduler, wait, move |event: SearchEvent| {
            self.handle_search(&event);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::ManualScheduler;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeTable {
        rows: HashMap<String, Vec<String>>,
        rendered: Mutex<Vec<(String, SearchOutcome)>>,
    }

    impl FakeTable {
        fn with_rows(selector: &str, rows: &[&str]) -> Self {
            let mut table = Self::default();
            table.rows.insert(
                selector.to_string(),
                rows.iter().map(|row| row.to_string()).collect(),
            );
            table
        }
    }

    impl TableView for FakeTable {
        fn row_texts(&self, selector: &str) -> Vec<String> {
            self.rows.get(selector).cloned().unwrap_or_default()
        }

        fn render(&self, selector: &str, outcome: &SearchOutcome) {
            self.rendered
                .lock()
                .unwrap()
                .push((selector.to_string(), outcome.clone()));
        }
    }

    fn rows(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|text| text.to_string()).collect()
    }

    #[test]
    fn test_filter_rows_partitions_in_order() {
        let values = [3, 8, 1, 9, 4];
        let partition = filter_rows(&values, |v| *v > 3);
        assert_eq!(partition.visible, vec![1, 3, 4]);
        assert_eq!(partition.hidden, vec![0, 2]);
    }

    #[test]
    fn test_term_matches_case_insensitively() {
        let outcome = search_rows("level3", &rows(&["Alice:Level3", "Bob:Level1"]));

        assert_eq!(
            outcome.rows,
            vec![
                RowState {
                    visible: true,
                    highlighted: true
                },
                RowState {
                    visible: false,
                    highlighted: false
                },
            ]
        );
        assert_eq!(outcome.counter.to_string(), "1 of 2");
    }

    #[test]
    fn test_empty_term_shows_all_without_highlight() {
        let outcome = search_rows("", &rows(&["Alice:Level3", "Bob:Level1"]));

        assert!(outcome.rows.iter().all(|row| row.visible && !row.highlighted));
        assert_eq!(outcome.counter, ResultsCounter::Hidden);
        assert_eq!(outcome.counter.to_string(), "");
    }

    #[test]
    fn test_uppercase_term_is_lowercased() {
        let outcome = search_rows("BOB", &rows(&["Alice:Level3", "Bob:Level1"]));
        assert_eq!(outcome.term, "bob");
        assert_eq!(outcome.visible_indices().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn test_handle_search_uses_default_selector_and_renders() {
        let table = Arc::new(FakeTable::with_rows(
            DEFAULT_ROW_SELECTOR,
            &["Alice:Level3", "Bob:Level1"],
        ));
        let filter = SearchFilter::new(table.clone());

        let outcome = filter.handle_search(&SearchEvent::new("level1"));

        assert_eq!(outcome.visible_indices().collect::<Vec<_>>(), vec![1]);
        let rendered = table.rendered.lock().unwrap();
        assert_eq!(rendered.len(), 1);
        assert_eq!(rendered[0].0, DEFAULT_ROW_SELECTOR);
    }

    #[test]
    fn test_handle_search_honours_input_target() {
        let table = Arc::new(FakeTable::with_rows("#users tr", &["ali", "sara", "alireza"]));
        let filter = SearchFilter::new(table);

        let outcome = filter.handle_search(&SearchEvent::new("ali").with_target("#users tr"));
        assert_eq!(outcome.counter, ResultsCounter::Shown { visible: 2, total: 3 });

        // Unknown selector matches no rows
        let outcome = filter.handle_search(&SearchEvent::new("ali"));
        assert_eq!(outcome.counter, ResultsCounter::Shown { visible: 0, total: 0 });
    }

    #[tokio::test]
    async fn test_bound_input_applies_only_the_settled_term() {
        let table = Arc::new(FakeTable::with_rows(
            DEFAULT_ROW_SELECTOR,
            &["Alice:Level3", "Bob:Level1"],
        ));
        let filter = Arc::new(SearchFilter::new(table.clone()));
        let scheduler = Arc::new(ManualScheduler::new());
        let input = filter.clone().bind(scheduler.clone(), Duration::from_millis(300));

        for value in ["l", "le", "lev", "level1"] {
            input.call(SearchEvent::new(value));
            scheduler.advance(Duration::from_millis(100)).await;
        }
        scheduler.advance(Duration::from_millis(300)).await;

        let rendered = table.rendered.lock().unwrap();
        assert_eq!(rendered.len(), 1);
        assert_eq!(rendered[0].1.term, "level1");
    }
}
