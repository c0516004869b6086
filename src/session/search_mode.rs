//! Search mode execution
//!
//! Filters the rows of a dataset, either once for a given term or live for
//! every line typed on stdin.

use super::messages::print_event;
use crate::boundary;
use crate::consts::cli_consts::EVENT_QUEUE_SIZE;
use crate::consts::cli_consts::search::DEFAULT_ROW_SELECTOR;
use crate::events::{Event, EventSender};
use crate::export::Record;
use crate::export::csv::field_text;
use crate::scheduler::TokioScheduler;
use crate::search::{SearchEvent, SearchFilter, SearchOutcome, TableView};
use std::error::Error;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

/// Text a row is matched against: its cell values separated by spaces.
pub fn row_text(record: &Record) -> String {
    record
        .values()
        .map(|value| field_text(value).into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Prints the visible rows of a dataset after every search.
///
/// The default selector matches whole rows; any other selector names the one
/// column to match against.
pub struct PrintedTable {
    records: Vec<Record>,
    rows: Vec<String>,
}

impl PrintedTable {
    pub fn new(dataset: &[Record]) -> Self {
        Self {
            records: dataset.to_vec(),
            rows: dataset.iter().map(row_text).collect(),
        }
    }

    fn lines(&self, outcome: &SearchOutcome) -> Vec<String> {
        let mut lines: Vec<String> = outcome
            .rows
            .iter()
            .zip(&self.rows)
            .filter(|(state, _)| state.visible)
            .map(|(state, text)| {
                let marker = if state.highlighted { '*' } else { ' ' };
                format!("{} {}", marker, text)
            })
            .collect();
        let counter = outcome.counter.to_string();
        if !counter.is_empty() {
            lines.push(counter);
        }
        lines
    }
}

impl TableView for PrintedTable {
    fn row_texts(&self, selector: &str) -> Vec<String> {
        if selector == DEFAULT_ROW_SELECTOR {
            return self.rows.clone();
        }
        self.records
            .iter()
            .map(|record| {
                record
                    .get(selector)
                    .map(|value| field_text(value).into_owned())
                    .unwrap_or_default()
            })
            .collect()
    }

    fn render(&self, _selector: &str, outcome: &SearchOutcome) {
        for line in self.lines(outcome) {
            println!("{}", line);
        }
    }
}

fn search_event(term: String, column: Option<&str>) -> SearchEvent {
    match column {
        Some(column) => SearchEvent::new(term).with_target(column),
        None => SearchEvent::new(term),
    }
}

/// Searches `dataset` for `term`, or for each stdin line when no term is given.
///
/// With `column`, only that field of each record is matched.
pub async fn run_search_mode(
    dataset: &[Record],
    term: Option<String>,
    column: Option<String>,
    debounce: Duration,
) -> Result<(), Box<dyn Error>> {
    let filter = Arc::new(SearchFilter::new(Arc::new(PrintedTable::new(dataset))));
    let column = column.as_deref();

    if let Some(term) = term {
        filter.handle_search(&search_event(term, column));
        return Ok(());
    }

    let (event_sender, mut event_receiver) = mpsc::channel::<Event>(EVENT_QUEUE_SIZE);
    boundary::install(EventSender::new(event_sender));

    let input = filter.clone().bind(Arc::new(TokioScheduler::new()), debounce);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut last_term = None;
    loop {
        tokio::select! {
            line = lines.next_line() => match line? {
                Some(line) => {
                    input.call(search_event(line.clone(), column));
                    last_term = Some(line);
                }
                None => break,
            },
            Some(event) = event_receiver.recv() => {
                print_event(&event);
            }
        }
    }

    // End of input applies the last term right away
    input.cancel();
    if let Some(term) = last_term {
        filter.handle_search(&search_event(term, column));
    }
    while let Ok(event) = event_receiver.try_recv() {
        print_event(&event);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::search_rows;
    use serde_json::json;

    fn users() -> Vec<Record> {
        serde_json::from_value(json!([
            {"user_id": 1, "username": "Alice", "level": "Level3"},
            {"user_id": 2, "username": "Bob", "level": "Level1"}
        ]))
        .unwrap()
    }

    #[test]
    fn test_row_text_joins_cells_in_order() {
        let users = users();
        assert_eq!(row_text(&users[0]), "1 Alice Level3");
    }

    #[test]
    fn test_printed_lines_mark_matches_and_count() {
        let users = users();
        let table = PrintedTable::new(&users);
        let outcome = search_rows("level3", &table.row_texts("tbody tr"));

        assert_eq!(table.lines(&outcome), vec!["* 1 Alice Level3", "1 of 2"]);
    }

    #[test]
    fn test_empty_term_prints_everything_without_counter() {
        let users = users();
        let table = PrintedTable::new(&users);
        let outcome = search_rows("", &table.row_texts("tbody tr"));

        assert_eq!(
            table.lines(&outcome),
            vec!["  1 Alice Level3", "  2 Bob Level1"]
        );
    }

    #[test]
    fn test_column_selector_matches_one_field() {
        let users = users();
        let filter = SearchFilter::new(Arc::new(PrintedTable::new(&users)));

        // "1" appears in Bob's level and in Alice's id
        let outcome = filter.handle_search(&search_event("1".to_string(), None));
        assert_eq!(outcome.visible_indices().collect::<Vec<_>>(), vec![0, 1]);

        let outcome = filter.handle_search(&search_event("1".to_string(), Some("level")));
        assert_eq!(outcome.visible_indices().collect::<Vec<_>>(), vec![1]);

        // An unknown column matches nothing
        let outcome = filter.handle_search(&search_event("1".to_string(), Some("email")));
        assert_eq!(outcome.visible_indices().count(), 0);
    }
}
