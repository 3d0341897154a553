// src/common/labels.rs

use chrono::{Datelike, Days, Months, NaiveDate};

use crate::common::period::{Period, RangeSelector};

// Unidade do eixo X dos gráficos
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    Day,
    Month,
}

impl From<RangeSelector> for Granularity {
    fn from(range: RangeSelector) -> Self {
        match range {
            RangeSelector::LastSevenDays | RangeSelector::MonthToDate => Granularity::Day,
            RangeSelector::YearToDate => Granularity::Month,
        }
    }
}

impl Granularity {
    // Argumento do date_trunc no Postgres
    pub fn sql_unit(self) -> &'static str {
        match self {
            Granularity::Day => "day",
            Granularity::Month => "month",
        }
    }

    /// Início do bucket que contém `date`.
    pub fn bucket_of(self, date: NaiveDate) -> NaiveDate {
        match self {
            Granularity::Day => date,
            Granularity::Month => date - Days::new(u64::from(date.day0())),
        }
    }

    /// `DD/MM` para dias, `MM/YYYY` para meses.
    pub fn label(self, bucket: NaiveDate) -> String {
        match self {
            Granularity::Day => bucket.format("%d/%m").to_string(),
            Granularity::Month => bucket.format("%m/%Y").to_string(),
        }
    }
}

/// Buckets ordenados que cobrem o período inteiro (inclusive nas pontas).
pub fn chart_buckets(period: &Period, granularity: Granularity) -> Vec<NaiveDate> {
    match granularity {
        Granularity::Day => period.days().collect(),
        Granularity::Month => {
            let mut buckets = Vec::new();
            let mut month = granularity.bucket_of(period.first_day);
            while month <= period.last_day {
                buckets.push(month);
                month = month + Months::new(1);
            }
            buckets
        }
    }
}

pub fn generate_chart_labels(period: &Period, range: RangeSelector) -> Vec<String> {
    let granularity = Granularity::from(range);
    chart_buckets(period, granularity)
        .into_iter()
        .map(|bucket| granularity.label(bucket))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::period::current_period;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn seven_daily_labels_across_month_boundary() {
        let period = current_period(RangeSelector::LastSevenDays, date(2025, 8, 3));
        let labels = generate_chart_labels(&period, RangeSelector::LastSevenDays);

        assert_eq!(
            labels,
            vec!["28/07", "29/07", "30/07", "31/07", "01/08", "02/08", "03/08"]
        );
    }

    #[test]
    fn daily_buckets_step_one_day() {
        let period = current_period(RangeSelector::LastSevenDays, date(2026, 1, 2));
        let buckets = chart_buckets(&period, Granularity::Day);

        assert_eq!(buckets.len(), 7);
        for pair in buckets.windows(2) {
            assert_eq!(pair[1], pair[0] + Days::new(1));
        }
    }

    #[test]
    fn month_to_date_has_one_label_per_elapsed_day() {
        let period = current_period(RangeSelector::MonthToDate, date(2025, 2, 28));
        let labels = generate_chart_labels(&period, RangeSelector::MonthToDate);

        assert_eq!(labels.len(), 28);
        assert_eq!(labels.first().map(String::as_str), Some("01/02"));
        assert_eq!(labels.last().map(String::as_str), Some("28/02"));
    }

    #[test]
    fn year_to_date_has_one_label_per_month() {
        let period = current_period(RangeSelector::YearToDate, date(2025, 7, 27));
        let labels = generate_chart_labels(&period, RangeSelector::YearToDate);

        assert_eq!(
            labels,
            vec!["01/2025", "02/2025", "03/2025", "04/2025", "05/2025", "06/2025", "07/2025"]
        );
    }

    #[test]
    fn january_first_yields_single_month() {
        let period = current_period(RangeSelector::YearToDate, date(2025, 1, 1));
        assert_eq!(generate_chart_labels(&period, RangeSelector::YearToDate), vec!["01/2025"]);
    }

    #[test]
    fn month_bucket_is_first_of_month() {
        assert_eq!(Granularity::Month.bucket_of(date(2025, 7, 27)), date(2025, 7, 1));
        assert_eq!(Granularity::Day.bucket_of(date(2025, 7, 27)), date(2025, 7, 27));
    }
}
