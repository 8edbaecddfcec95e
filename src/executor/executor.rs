//! Analytics executor
//!
//! Runs one engine component per call against a caller-owned collection.
//! Every call is a pure function of its inputs: the executor only adds a
//! structured log line and bumps counters. Logger and configuration are
//! injected by the host; nothing here is global.

use std::collections::BTreeMap;
use std::io::Write;
use std::time::Instant;

use super::filters::RecordFilter;
use super::grouper::{GroupKey, Grouper};
use super::outliers::{AnomalyReport, OutlierDetector};
use super::sorter::QuickSorter;
use super::stats::FieldStats;
use super::topk::TopKSelector;
use crate::config::EngineConfig;
use crate::errors::EngineResult;
use crate::observability::{EngineMetrics, Logger, Operation};
use crate::query::{Criterion, FilterSpec};
use crate::record::Record;

/// Entry point for hosts: owns configuration, logger and counters
#[derive(Debug)]
pub struct AnalyticsExecutor {
    config: EngineConfig,
    logger: Logger,
    metrics: EngineMetrics,
}

impl AnalyticsExecutor {
    /// Creates an executor after validating the configuration
    pub fn new(config: EngineConfig, logger: Logger) -> EngineResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            logger,
            metrics: EngineMetrics::new(),
        })
    }

    /// Creates an executor logging to `writer` at the configured level
    pub fn with_writer<W: Write + Send + 'static>(
        config: EngineConfig,
        writer: W,
    ) -> EngineResult<Self> {
        let logger = Logger::with_writer(writer, config.log_level);
        Self::new(config, logger)
    }

    /// Creates an executor with default configuration
    pub fn with_logger(logger: Logger) -> Self {
        Self {
            config: EngineConfig::default(),
            logger,
            metrics: EngineMetrics::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn metrics(&self) -> &EngineMetrics {
        &self.metrics
    }

    /// Sorts by an ordered list of criteria
    pub fn sort(&self, records: &[Record], criteria: &[Criterion]) -> EngineResult<Vec<Record>> {
        let detail = criteria
            .iter()
            .map(|c| format!("{}:{}", c.field, c.order.as_str()))
            .collect::<Vec<_>>()
            .join(",");

        self.run(Operation::Sort, records.len(), &detail, Vec::len, || {
            QuickSorter::sort(records, criteria)
        })
    }

    /// Keeps records matching every spec
    pub fn filter(&self, records: &[Record], specs: &[FilterSpec]) -> EngineResult<Vec<Record>> {
        let detail = specs
            .iter()
            .map(|s| s.field.as_str())
            .collect::<Vec<_>>()
            .join(",");

        self.run(Operation::Filter, records.len(), &detail, Vec::len, || {
            RecordFilter::filter(records, specs)
        })
    }

    /// Partitions by the raw value of `field`
    pub fn group_by_field(
        &self,
        records: &[Record],
        field: &str,
    ) -> EngineResult<BTreeMap<GroupKey, Vec<Record>>> {
        self.run(Operation::GroupByField, records.len(), field, grouped_len, || {
            Grouper::group_by_field(records, field)
        })
    }

    /// Partitions by hour-of-day window of the configured timestamp field
    pub fn group_by_time_window(
        &self,
        records: &[Record],
        window_hours: Option<u32>,
    ) -> EngineResult<BTreeMap<String, Vec<Record>>> {
        let hours = window_hours.unwrap_or(self.config.default_window_hours);
        let field = self.config.timestamp_field.as_str();
        let detail = format!("{}/{}h", field, hours);

        self.run(Operation::GroupByTimeWindow, records.len(), &detail, grouped_len, || {
            Grouper::group_by_time_window(records, field, hours)
        })
    }

    /// Flags z-score outliers of `field`
    pub fn detect_outliers(
        &self,
        records: &[Record],
        field: &str,
        threshold: Option<f64>,
    ) -> EngineResult<Vec<Record>> {
        let threshold = threshold.unwrap_or(self.config.default_zscore_threshold);
        let detail = format!("{}>{}", field, threshold);

        let anomalies = self.run(Operation::DetectOutliers, records.len(), &detail, Vec::len, || {
            OutlierDetector::detect(records, field, threshold)
        })?;
        self.metrics.add_anomalies(anomalies.len());
        Ok(anomalies)
    }

    /// Flags outliers and keeps at most `limit` of them
    pub fn anomaly_report(
        &self,
        records: &[Record],
        field: &str,
        threshold: Option<f64>,
        limit: usize,
    ) -> EngineResult<AnomalyReport> {
        let threshold = threshold.unwrap_or(self.config.default_zscore_threshold);
        let detail = format!("{}>{}", field, threshold);

        let report = self.run(
            Operation::DetectOutliers,
            records.len(),
            &detail,
            |r: &AnomalyReport| r.anomalies.len(),
            || AnomalyReport::build(records, field, threshold, limit),
        )?;
        self.metrics.add_anomalies(report.total_anomalies);
        Ok(report)
    }

    /// Selects the `k` best records by one criterion
    pub fn select_top_k(
        &self,
        records: &[Record],
        k: usize,
        criterion: &Criterion,
    ) -> EngineResult<Vec<Record>> {
        let detail = format!("{}:{}@{}", criterion.field, criterion.order.as_str(), k);

        self.run(Operation::SelectTopK, records.len(), &detail, Vec::len, || {
            TopKSelector::select(records, k, criterion)
        })
    }

    /// Population statistics of a numeric field; not counted as an operation
    pub fn field_stats(&self, records: &[Record], field: &str) -> EngineResult<Option<FieldStats>> {
        FieldStats::from_records(records, field)
    }

    fn run<T>(
        &self,
        op: Operation,
        input: usize,
        detail: &str,
        output_len: impl Fn(&T) -> usize,
        task: impl FnOnce() -> EngineResult<T>,
    ) -> EngineResult<T> {
        let started = Instant::now();
        let result = task();
        let elapsed_us = started.elapsed().as_micros().to_string();
        let input_str = input.to_string();

        match &result {
            Ok(output) => {
                let output = output_len(output);
                let output_str = output.to_string();
                self.metrics.record_success(op, input, output);
                self.logger.info(
                    &format!("{}_COMPLETE", op.as_str()),
                    &[
                        ("detail", detail),
                        ("elapsed_us", elapsed_us.as_str()),
                        ("input", input_str.as_str()),
                        ("op", op.as_str()),
                        ("output", output_str.as_str()),
                    ],
                );
            }
            Err(err) => {
                let message = err.to_string();
                self.metrics.record_failure(op, input);
                self.logger.error(
                    &format!("{}_FAILED", op.as_str()),
                    &[
                        ("code", err.code()),
                        ("detail", detail),
                        ("elapsed_us", elapsed_us.as_str()),
                        ("error", message.as_str()),
                        ("input", input_str.as_str()),
                        ("op", op.as_str()),
                    ],
                );
            }
        }
        result
    }
}

fn grouped_len<K>(groups: &BTreeMap<K, Vec<Record>>) -> usize {
    groups.values().map(Vec::len).sum()
}
