// src/common/period.rs

use std::str::FromStr;

use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Utc};
use chrono_tz::Tz;

use crate::common::error::AppError;

// Janela de relatório escolhida pelo cliente (?range=)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RangeSelector {
    #[default]
    LastSevenDays, // "7"
    YearToDate,    // "01"
    MonthToDate,   // "02"
}

impl RangeSelector {
    pub fn code(self) -> &'static str {
        match self {
            RangeSelector::LastSevenDays => "7",
            RangeSelector::YearToDate => "01",
            RangeSelector::MonthToDate => "02",
        }
    }

    /// Parâmetro ausente ou vazio vira "últimos 7 dias"; qualquer outro valor
    /// desconhecido é erro.
    pub fn from_query(raw: Option<&str>) -> Result<Self, AppError> {
        match raw.map(str::trim) {
            None | Some("") => Ok(Self::default()),
            Some(value) => value.parse(),
        }
    }
}

impl FromStr for RangeSelector {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "7" => Ok(RangeSelector::LastSevenDays),
            "01" => Ok(RangeSelector::YearToDate),
            "02" => Ok(RangeSelector::MonthToDate),
            other => Err(AppError::InvalidRange(other.to_string())),
        }
    }
}

// Período em dias inteiros do fuso do negócio, [first_day, last_day] inclusivo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    pub first_day: NaiveDate,
    pub last_day: NaiveDate,
}

impl Period {
    pub fn new(first_day: NaiveDate, last_day: NaiveDate) -> Self {
        debug_assert!(first_day <= last_day, "period start after end");
        Self { first_day, last_day }
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.first_day
            .iter_days()
            .take_while(move |day| *day <= self.last_day)
    }

    /// Instantes UTC para as consultas: `start <= created_at < end`.
    pub fn bounds(&self, tz: &Tz) -> (DateTime<Utc>, DateTime<Utc>) {
        let end_day = self.last_day + Days::new(1);
        (start_of_day(self.first_day, tz), start_of_day(end_day, tz))
    }
}

// "Hoje" no fuso do negócio
pub fn business_today(tz: &Tz) -> NaiveDate {
    Utc::now().with_timezone(tz).date_naive()
}

/// Meia-noite local -> UTC. Se a meia-noite cair num buraco de horário de verão,
/// usa o primeiro instante válido depois dela.
pub fn start_of_day(date: NaiveDate, tz: &Tz) -> DateTime<Utc> {
    local_to_utc(date.and_time(NaiveTime::MIN), tz)
}

// Horário de parede do negócio -> UTC (mesma regra de buraco de DST)
pub fn local_to_utc(local: NaiveDateTime, tz: &Tz) -> DateTime<Utc> {
    local
        .and_local_timezone(*tz)
        .earliest()
        .or_else(|| (local + TimeDelta::hours(1)).and_local_timezone(*tz).earliest())
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| local.and_utc())
}

pub fn current_period(range: RangeSelector, today: NaiveDate) -> Period {
    match range {
        RangeSelector::LastSevenDays => Period::new(today - Days::new(6), today),
        RangeSelector::MonthToDate => {
            Period::new(today - Days::new(u64::from(today.day0())), today)
        }
        RangeSelector::YearToDate => {
            Period::new(today - Days::new(u64::from(today.ordinal0())), today)
        }
    }
}

/// Período anterior usado nas comparações do resumo.
///
/// - 7 dias: recua uma semana a partir do início e pega a semana ISO
///   (segunda a domingo) que contém essa data.
/// - mês até hoje: mesmo número de dias a partir do dia 1 do mês anterior.
/// - ano até hoje: mesmo número de dias (ordinal) a partir de 1º de janeiro
///   do ano anterior.
///
/// Mês e ano são limitados ao fim do mês/ano anterior, então nunca sobrepõem
/// o período atual (31/03 compara com 01/02..28/02).
pub fn previous_period(range: RangeSelector, current: &Period) -> Period {
    match range {
        RangeSelector::LastSevenDays => {
            let reference = current.first_day - Days::new(7);
            let monday =
                reference - Days::new(u64::from(reference.weekday().num_days_from_monday()));
            Period::new(monday, monday + Days::new(6))
        }
        RangeSelector::MonthToDate => {
            let prev_month_end = current.first_day - Days::new(1);
            let prev_start = prev_month_end - Days::new(u64::from(prev_month_end.day0()));
            let covered = u64::from(current.last_day.day0());
            Period::new(prev_start, (prev_start + Days::new(covered)).min(prev_month_end))
        }
        RangeSelector::YearToDate => {
            let prev_year_end = current.first_day - Days::new(1);
            let prev_start = prev_year_end - Days::new(u64::from(prev_year_end.ordinal0()));
            let covered = u64::from(current.last_day.ordinal0());
            Period::new(prev_start, (prev_start + Days::new(covered)).min(prev_year_end))
        }
    }
}
