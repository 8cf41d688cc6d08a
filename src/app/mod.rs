mod root;

pub use root::{listen, render, run_app, summary_table};
