//! Debugging feature flags.

pub struct LogFlags {
    /// Activate trace_time macro (scope-level timing of recomputes)
    pub log_performance: bool,

    /// Log every applied selection event and the payloads it republishes
    pub log_selection: bool,

    /// Log per-resource details while fetching the remote data package
    pub log_fetch: bool,
}

pub const DF: LogFlags = LogFlags {
    log_performance: false,
    log_selection: true,
    log_fetch: false,
};

pub const LOG_PERFORMANCE: bool = DF.log_performance;
