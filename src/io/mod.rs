//! Reading label sequences from disk

mod labels;

pub use labels::{parse_labels, read_labels, LabelData};
