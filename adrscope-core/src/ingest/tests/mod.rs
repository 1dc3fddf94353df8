mod scanner_tests;

pub(super) use crate::ingest::fixtures as lines;
