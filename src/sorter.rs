use crate::types::ParticipantRecord;

/// Orders records by last participation, most recent first, and numbers them.
///
/// The sort is stable: records with the same date keep their extraction order.
pub fn rank_records(mut records: Vec<ParticipantRecord>) -> Vec<ParticipantRecord> {
    sort_records(&mut records);
    assign_ranks(&mut records);
    records
}

pub fn sort_records(records: &mut [ParticipantRecord]) {
    records.sort_by(|a, b| b.last_participation.cmp(&a.last_participation));
}

/// Rank is the 1-based position in the slice
pub fn assign_ranks(records: &mut [ParticipantRecord]) {
    for (rank, record) in (1u32..).zip(records.iter_mut()) {
        record.rank = rank;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DateSource, LastParticipation};
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
            rank: 99,
        }
    }

    fn known(y: i32, m: u32, d: u32) -> LastParticipation {
        LastParticipation::Known(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    #[test]
    fn test_most_recent_first() {
        let ranked = rank_records(vec![
            record("old", known(2025, 1, 1)),
            record("new", known(2025, 2, 1)),
            record("mid", known(2025, 1, 15)),
        ]);
        let names: Vec<_> = ranked.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["new", "mid", "old"]);
        let ranks: Vec<_> = ranked.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
    }

    #[test]
    fn test_equal_dates_keep_input_order() {
        let ranked = rank_records(vec![
            record("first", known(2025, 1, 1)),
            record("second", known(2025, 1, 1)),
            record("newest", known(2025, 1, 2)),
            record("third", known(2025, 1, 1)),
        ]);
        let names: Vec<_> = ranked.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["newest", "first", "second", "third"]);
    }

    #[test]
    fn test_unknown_sorts_last() {
        let ranked = rank_records(vec![
            record("unknown", LastParticipation::Unknown),
            record("known", known(2020, 1, 1)),
        ]);
        assert_eq!(ranked[0].name, "known");
        assert_eq!(ranked[1].rank, 2);
    }

    #[test]
    fn test_empty() {
        assert!(rank_records(Vec::new()).is_empty());
    }
}
