mod deriver;

pub use deriver::{derive, percent_changes, rolling_mean_std};
