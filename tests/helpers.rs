#![allow(dead_code)]

use parsegate::{Failure, ParserEngine, Reporter};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub source: String,
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl Report {
    pub fn new(source: &str, message: &str, line: usize, column: usize) -> Self {
        Self {
            source: source.to_string(),
            message: message.to_string(),
            line,
            column,
        }
    }
}

/// Every report made by reporters handed out from `factory`.
#[derive(Debug, Clone, Default)]
pub struct Reports(Rc<RefCell<Vec<Report>>>);

impl Reports {
    pub fn factory(&self) -> impl Fn(&str) -> RecordingReporter {
        let reports = self.clone();

        move |source: &str| RecordingReporter {
            source: source.to_string(),
            reports: reports.clone(),
        }
    }

    pub fn all(&self) -> Vec<Report> {
        self.0.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub struct RecordingReporter {
    source: String,
    reports: Reports,
}

impl Reporter for RecordingReporter {
    fn report_error(&mut self, message: &str, line: usize, column: usize) {
        self.reports
            .0
            .borrow_mut()
            .push(Report::new(&self.source, message, line, column));
    }
}

/// A parser engine scripted by a closure.
pub struct FnEngine<F> {
    parse: F,
    seen: RefCell<Vec<String>>,
}

impl<F> FnEngine<F> {
    pub fn new(parse: F) -> Self {
        Self {
            parse,
            seen: RefCell::new(vec![]),
        }
    }

    pub fn seen(&self) -> Vec<String> {
        self.seen.borrow().clone()
    }
}

impl<F, T, E> ParserEngine for FnEngine<F>
where
    F: Fn(&str) -> Result<T, E>,
    E: Failure,
{
    type Tree = T;
    type Error = E;

    fn parse(&self, source: &str) -> Result<T, E> {
        self.seen.borrow_mut().push(source.to_string());
        (self.parse)(source)
    }
}
