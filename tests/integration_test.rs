//! Integration tests for the rating pipeline
//! Runs fixture HTML through row parsing, the pipeline and the renderer

use chrono::NaiveDate;
use club_rating::config::{PipelineConfig, RenderOptions, RowSelectors};
use club_rating::filter::RecencyFilter;
use club_rating::normalize::DateNormalizer;
use club_rating::render::render_html;
use club_rating::scrapers::RowParser;
use club_rating::{LastParticipation, Pipeline, RawRow};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn pipeline() -> Pipeline {
    Pipeline::new(PipelineConfig::default()).expect("default config is valid")
}

/// Three rows: tooltip date, sixth-cell date, city only
const SCENARIO_PAGE: &str = r#"
<html><body><table>
  <tr class="stat">
    <td>1</td>
    <td><div class="podrstat">Турниров: 40<br>Дата последнего участия - 10.01.2025</div></td>
    <td><span class="statname">Абрамов Андрей</span></td>
    <td>1710</td>
    <td>+15</td>
  </tr>
  <tr class="stat">
    <td>2</td>
    <td></td>
    <td><span class="statname">Борисов Борис</span></td>
    <td>1650</td>
    <td>-4</td>
    <td>02.02.2025</td>
  </tr>
  <tr class="stat">
    <td>3</td>
    <td></td>
    <td>Власов Виктор</td>
    <td>1600</td>
    <td>+0</td>
    <td></td>
    <td></td>
    <td>Псков</td>
  </tr>
</table></body></html>
"#;

#[test]
fn test_end_to_end_scenario() {
    let rows = RowParser::new(&RowSelectors::default())
        .unwrap()
        .parse(SCENARIO_PAGE)
        .unwrap();
    assert_eq!(rows.len(), 3);

    let out = pipeline().run(&rows, date(2025, 2, 15));
    let snapshot = &out.snapshot;

    assert_eq!(snapshot.len(), 2);
    assert_eq!(snapshot.records()[0].name, "Борисов Борис");
    assert_eq!(snapshot.records()[0].rank, 1);
    assert_eq!(snapshot.records()[1].name, "Абрамов Андрей");
    assert_eq!(snapshot.records()[1].rank, 2);
    assert_eq!(snapshot.latest_date(), LastParticipation::Known(date(2025, 2, 2)));
    assert_eq!(out.report.unknown_dates, 1);

    assert_eq!(snapshot.facets().first_row(), &['А']);
    assert_eq!(snapshot.facets().second_row(), &['Б']);

    let html = render_html(snapshot, &RenderOptions::default());
    assert!(html.contains("Борисов Борис"));
    assert!(!html.contains("Власов"));
}

fn synthetic_rows(count: usize) -> Vec<RawRow> {
    let surnames = ["Алексеев", "Белов", "Волков", "Гусев", "Егоров", "Жуков", "Зайцев"];
    (0..count)
        .map(|i| {
            let day = (i % 28) + 1;
            let month = (i % 4) + 1;
            let date = if i % 9 == 0 {
                "-".to_string()
            } else {
                format!("{:02}.{:02}.2025", day, month)
            };
            RawRow::from_texts([
                i.to_string(),
                String::new(),
                format!("{} {}", surnames[i % surnames.len()], i),
                "1500".to_string(),
                "+1".to_string(),
                date,
            ])
        })
        .collect()
}

#[test]
fn test_runs_are_deterministic() {
    let rows = synthetic_rows(200);
    let today = date(2025, 4, 10);
    let a = pipeline().run(&rows, today);
    let b = pipeline().run(&rows, today);
    assert_eq!(a.snapshot, b.snapshot);
    assert_eq!(
        serde_json::to_string(&a.snapshot).unwrap(),
        serde_json::to_string(&b.snapshot).unwrap()
    );
}

#[test]
fn test_ranks_are_contiguous() {
    let out = pipeline().run(&synthetic_rows(300), date(2025, 4, 10));
    assert!(!out.snapshot.is_empty());
    let ranks: Vec<u32> = out.snapshot.records().iter().map(|r| r.rank).collect();
    let expected: Vec<u32> = (1..=out.snapshot.len() as u32).collect();
    assert_eq!(ranks, expected);
}

#[test]
fn test_recency_invariant() {
    let rows = synthetic_rows(300);
    let today = date(2025, 4, 10);
    let config = PipelineConfig {
        recency_window_days: 60,
        ..Default::default()
    };
    let out = Pipeline::new(config).unwrap().run(&rows, today);
    let filter = RecencyFilter::new(today, 60);

    for record in out.snapshot.records() {
        assert!(filter.is_recent(record.last_participation));
    }

    // Everything else was unknown or older than the cutoff
    let normalizer = DateNormalizer::new(&Default::default()).unwrap();
    let kept: std::collections::HashSet<_> =
        out.snapshot.records().iter().map(|r| r.name.clone()).collect();
    for row in &rows {
        let name = row.cell_text(2).unwrap();
        if kept.contains(name) {
            continue;
        }
        let parsed = normalizer.parse(row.cell_text(5).unwrap());
        assert!(!filter.is_recent(parsed), "{} should have been kept", name);
    }
    assert_eq!(out.report.records_kept + out.report.unknown_dates + out.report.stale_dropped, 300);
}

#[test]
fn test_equal_dates_keep_extraction_order() {
    let rows: Vec<RawRow> = (0..6)
        .map(|i| {
            let date = if i == 3 { "05.02.2025" } else { "01.02.2025" };
            let name = format!("Игрок {}", i);
            RawRow::from_texts(["", "", name.as_str(), "1", "+1", date])
        })
        .collect();
    let out = pipeline().run(&rows, date(2025, 2, 15));
    let names: Vec<_> = out.snapshot.records().iter().map(|r| r.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["Игрок 3", "Игрок 0", "Игрок 1", "Игрок 2", "Игрок 4", "Игрок 5"]
    );
}

#[test]
fn test_row_cap_is_reported() {
    let rows = synthetic_rows(1500);
    let out = pipeline().run(&rows, date(2025, 4, 10));
    assert!(out.report.truncated);
    assert_eq!(out.report.rows_seen, 1500);
    assert_eq!(out.report.rows_processed, 1000);
    assert_eq!(out.report.records_extracted, 1000);
    assert!(out
        .snapshot
        .records()
        .iter()
        .all(|r| r.name.rsplit(' ').next().unwrap().parse::<usize>().unwrap() < 1000));
}

#[test]
fn test_page_without_rows_aborts() {
    let parser = RowParser::new(&RowSelectors::default()).unwrap();
    assert!(parser.parse("<html><body>Сайт на обслуживании</body></html>").is_err());
}
