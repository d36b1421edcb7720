use std::collections::BTreeSet;

use crate::config::FacetAlphabet;
use crate::types::{FacetRows, LastParticipation, ParticipantRecord, RatingSnapshot};

/// Builds the immutable snapshot from ranked records
pub fn assemble(records: Vec<ParticipantRecord>, alphabet: &FacetAlphabet) -> RatingSnapshot {
    let latest = latest_date(&records);
    let facets = FacetRows::split(facet_letters(&records, alphabet));
    RatingSnapshot::new(records, latest, facets)
}

pub fn latest_date(records: &[ParticipantRecord]) -> LastParticipation {
    records
        .iter()
        .filter_map(|r| r.last_participation.date())
        .max()
        .into()
}

/// Uppercased first letter of the first name token, e.g. the surname
pub fn facet_letter(name: &str, alphabet: &FacetAlphabet) -> Option<char> {
    let first = name.split_whitespace().next()?.chars().next()?;
    let upper = first.to_uppercase().next()?;
    alphabet.contains(upper).then_some(upper)
}

/// Distinct facet letters in code point order
pub fn facet_letters(records: &[ParticipantRecord], alphabet: &FacetAlphabet) -> Vec<char> {
    records
        .iter()
        .filter_map(|r| facet_letter(&r.name, alphabet))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DateSource;
    use chrono::NaiveDate;

    fn record(name: &str, last: LastParticipation) -> ParticipantRecord {
        ParticipantRecord {
            name: name.to_string(),
            rating: "1000".to_string(),
            rating_delta: "+0".to_string(),
            date_token: None,
            date_source: DateSource::Missing,
            last_participation: last,
            city: "-".to_string(),
            rank: 1,
        }
    }

    #[test]
    fn test_facet_letter() {
        let alphabet = FacetAlphabet::default();
        assert_eq!(facet_letter("иванов Иван", &alphabet), Some('И'));
        assert_eq!(facet_letter("  Яковлев", &alphabet), Some('Я'));
        assert_eq!(facet_letter("Smith John", &alphabet), None);
        assert_eq!(facet_letter("1Иванов", &alphabet), None);
        assert_eq!(facet_letter("Ёлкин", &alphabet), None);
        assert_eq!(facet_letter("", &alphabet), None);
    }

    #[test]
    fn test_facets_sorted_distinct_and_split() {
        let records = vec![
            record("Петров П", LastParticipation::Unknown),
            record("Абрамов А", LastParticipation::Unknown),
            record("Павлов П", LastParticipation::Unknown),
            record("Воронин В", LastParticipation::Unknown),
            record("Smith J", LastParticipation::Unknown),
        ];
        let snapshot = assemble(records, &FacetAlphabet::default());
        assert_eq!(snapshot.facets().first_row(), &['А']);
        assert_eq!(snapshot.facets().second_row(), &['В', 'П']);
    }

    #[test]
    fn test_latest_date() {
        let d1 = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
        let d2 = NaiveDate::from_ymd_opt(2025, 2, 2).unwrap();
        let records = vec![
            record("a", LastParticipation::Known(d1)),
            record("b", LastParticipation::Known(d2)),
        ];
        assert_eq!(latest_date(&records), LastParticipation::Known(d2));
    }

    #[test]
    fn test_empty_snapshot() {
        let snapshot = assemble(Vec::new(), &FacetAlphabet::default());
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.latest_date(), LastParticipation::Unknown);
        assert!(snapshot.facets().is_empty());
    }

    #[test]
    fn test_latin_alphabet() {
        let alphabet = FacetAlphabet { first: 'A', last: 'Z' };
        let records = vec![record("smith j", LastParticipation::Unknown)];
        assert_eq!(facet_letters(&records, &alphabet), vec!['S']);
    }
}
