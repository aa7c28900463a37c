//! Tick-list parsing and yearly climbing statistics.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use crate::domain::Units;

#[derive(thiserror::Error, Debug)]
pub enum TickError {
    #[error("failed to read the tick export")]
    Csv(#[from] csv::Error),

    #[error("tick for {route:?} has an invalid date {date:?}")]
    Date {
        route: String,
        date: String,
        #[source]
        source: chrono::ParseError,
    },
}

#[derive(serde::Deserialize)]
struct TickRecord {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Route")]
    route: String,
    #[serde(rename = "Pitches", default, deserialize_with = "csv::invalid_option")]
    pitches: Option<u32>,
    #[serde(rename = "Rating", default)]
    rating: String,
    #[serde(rename = "Route Type", default)]
    route_type: String,
    #[serde(rename = "Length", default, deserialize_with = "csv::invalid_option")]
    length: Option<u32>,
    #[serde(rename = "Rating Code", default, deserialize_with = "csv::invalid_option")]
    rating_code: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tick {
    pub date: NaiveDate,
    pub route: String,
    pub pitches: Option<u32>,
    /// Grade as the export prints it, e.g. `5.10a` or `V8`.
    pub rating: String,
    /// First segment of the export's route type, e.g. `Trad` for
    /// `Trad, Alpine`.
    pub route_type: String,
    pub length: Option<u32>,
    pub rating_code: Option<u32>,
}

impl Tick {
    pub fn is_boulder(&self) -> bool {
        self.route_type == "Boulder"
    }

    /// Height in feet, falling back to a per-type estimate when the export
    /// has no length.
    pub fn height(&self) -> u64 {
        match self.length {
            Some(length) => u64::from(length),
            None => default_height(&self.route_type),
        }
    }
}

fn default_height(route_type: &str) -> u64 {
    match route_type {
        "Aid" => 75,
        "Boulder" => 8,
        "Ice" => 100,
        "Mixed" => 100,
        "Snow" => 200,
        "Sport" => 75,
        "TR" => 50,
        "Trad" => 150,
        _ => 0,
    }
}

impl TryFrom<TickRecord> for Tick {
    type Error = TickError;

    fn try_from(record: TickRecord) -> Result<Self, Self::Error> {
        let date = NaiveDate::parse_from_str(record.date.trim(), "%Y-%m-%d")
            .map_err(|source| TickError::Date {
                route: record.route.clone(),
                date: record.date.clone(),
                source,
            })?;
        let route_type = record
            .route_type
            .split(',')
            .next()
            .unwrap_or_default()
            .trim()
            .to_string();

        Ok(Tick {
            date,
            route: record.route,
            pitches: record.pitches,
            rating: record.rating.trim().to_string(),
            route_type,
            length: record.length,
            rating_code: record.rating_code,
        })
    }
}

/// Parses a Mountain Project tick export. The header row is required and
/// columns are matched by name.
pub fn parse_tick_export(csv_data: &str) -> Result<Vec<Tick>, TickError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(csv_data.as_bytes());

    reader
        .deserialize::<TickRecord>()
        .map(|record| Tick::try_from(record?))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct YearStats {
    /// Always in feet; convert with [`Units::convert_feet`].
    pub height: u64,
    pub routes: u64,
    pub pitches: u64,
    pub problems: u64,
}

/// A grade and the numeric code Mountain Project sorts it by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grade {
    pub code: u32,
    pub rating: String,
}

/// Grades of one route type ticked in one year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradeYear {
    /// Each grade ticked with its tick count, easiest first.
    pub counts: Vec<(Grade, u64)>,
    /// Ties go to the easier grade.
    pub most_ticked: Grade,
    /// The ticked grade closest to the median code.
    pub median: Grade,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickSummary {
    pub units: Units,
    pub years: BTreeMap<i32, YearStats>,
    pub total_pitches: u64,
    /// Route type, then year. Types with no graded ticks are left out.
    pub grades: BTreeMap<String, BTreeMap<i32, GradeYear>>,
}

impl TickSummary {
    pub fn from_ticks(ticks: &[Tick], units: Units) -> TickSummary {
        let mut years: BTreeMap<i32, YearStats> = BTreeMap::new();
        let mut total_pitches = 0;
        let mut ratings: BTreeMap<u32, &str> = BTreeMap::new();
        let mut codes: BTreeMap<&str, BTreeMap<i32, Vec<u32>>> = BTreeMap::new();

        for tick in ticks {
            let stats = years.entry(tick.date.year()).or_default();
            let pitches = u64::from(tick.pitches.unwrap_or(0));

            stats.height += tick.height();
            if tick.is_boulder() {
                stats.problems += pitches;
            } else {
                stats.routes += 1;
                stats.pitches += pitches;
            }
            total_pitches += pitches;

            if let Some(code) = tick.rating_code {
                ratings.entry(code).or_insert(&tick.rating);
                codes
                    .entry(&tick.route_type)
                    .or_default()
                    .entry(tick.date.year())
                    .or_default()
                    .push(code);
            }
        }

        let grades = codes
            .into_iter()
            .map(|(route_type, by_year)| {
                let by_year: BTreeMap<i32, GradeYear> = by_year
                    .into_iter()
                    .map(|(year, codes)| (year, grade_year(codes, &ratings)))
                    .collect();
                (route_type.to_string(), by_year)
            })
            .collect();

        TickSummary {
            units,
            years,
            total_pitches,
            grades,
        }
    }

    /// Height of one year in the summary's units.
    pub fn height_in_units(&self, stats: &YearStats) -> u64 {
        self.units.convert_feet(stats.height)
    }

    /// Total height in the summary's units. Converted from the feet total
    /// rather than summed from converted years.
    pub fn total_height(&self) -> u64 {
        let feet = self.years.values().map(|s| s.height).sum();
        self.units.convert_feet(feet)
    }
}

fn grade_year(mut codes: Vec<u32>, ratings: &BTreeMap<u32, &str>) -> GradeYear {
    codes.sort_unstable();

    let mut counts: Vec<(u32, u64)> = Vec::new();
    for &code in &codes {
        match counts.last_mut() {
            Some((last, n)) if *last == code => *n += 1,
            _ => counts.push((code, 1)),
        }
    }

    // min_by_key keeps the first of equal keys, i.e. the lowest code
    let most_ticked = counts
        .iter()
        .min_by_key(|(_, n)| std::cmp::Reverse(*n))
        .map_or(0, |(code, _)| *code);

    // doubled so an even-length median stays an integer
    let mid = codes.len() / 2;
    let doubled_median = if codes.len() % 2 == 0 {
        i64::from(codes[mid - 1]) + i64::from(codes[mid])
    } else {
        2 * i64::from(codes[mid])
    };
    let median = counts
        .iter()
        .min_by_key(|(code, _)| (2 * i64::from(*code) - doubled_median).abs())
        .map_or(0, |(code, _)| *code);

    let grade = |code: u32| Grade {
        code,
        rating: ratings.get(&code).copied().unwrap_or_default().to_string(),
    };

    GradeYear {
        counts: counts.iter().map(|&(code, n)| (grade(code), n)).collect(),
        most_ticked: grade(most_ticked),
        median: grade(median),
    }
}

/// Formats `n` with comma thousands separators.
pub fn thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
