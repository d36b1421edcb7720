//! HTML rendering of a rating snapshot.
//!
//! The output depends only on the snapshot and the options, so two runs over
//! the same snapshot produce byte-identical documents.

use std::fmt::Write;

use crate::config::RenderOptions;
use crate::types::{DeltaTrend, RatingSnapshot};

/// Letter button value that shows every row
pub const ALL_LETTERS: &str = "все";

const STYLE: &str = r#"
        body { font-family: Arial, sans-serif; margin: 20px; }
        table { border-collapse: collapse; width: 100%; }
        th, td { padding: 6px 10px; border: 1px solid #ccc; }
        th { background: #f0f0f0; }
        h1 { text-align: center; margin-bottom: 10px; font-size: 1.5em; }
        .centered { text-align: center; }
        .filters { margin-bottom: 20px; }
        .filter-row { margin: 6px 0; }
        .alffilter, .filter-btn { display: inline-block; padding: 4px 8px; margin: 2px; border: 1px solid #999; border-radius: 4px; cursor: pointer; }
        .alffilter:hover, .filter-btn:hover { background: #e0e0e0; }
"#;

const SCRIPT: &str = r##"
        document.addEventListener("DOMContentLoaded", function () {
            const alffilters = document.querySelectorAll(".alffilter");
            const datefilters = document.querySelectorAll(".filter-btn");
            const rows = document.querySelectorAll("#myTable tbody tr");
            alffilters.forEach(filter => {
                filter.addEventListener("click", function () {
                    const letter = this.getAttribute("data-letter");
                    rows.forEach(row => {
                        const nameCell = row.querySelector("td:nth-child(2)");
                        if (!nameCell) return;
                        const surname = nameCell.textContent.trim().split(" ")[0];
                        const firstLetter = surname ? surname.charAt(0).toUpperCase() : '';
                        row.style.display = (letter === "все" || firstLetter === letter) ? "" : "none";
                    });
                });
            });
            datefilters.forEach(filter => {
                filter.addEventListener("click", function () {
                    const targetDate = this.getAttribute("data-date");
                    rows.forEach(row => {
                        const dateCell = row.querySelector("td.last-activity");
                        if (!dateCell) return;
                        const rowDate = dateCell.textContent.trim();
                        row.style.display = (targetDate === "all" || rowDate === targetDate) ? "" : "none";
                    });
                });
            });
        });
"##;

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn rating_style(trend: DeltaTrend) -> &'static str {
    match trend {
        DeltaTrend::Up => r#" style="color: darkgreen; font-weight: bold;""#,
        DeltaTrend::Down => r#" style="color: red; font-weight: bold;""#,
        DeltaTrend::Flat => "",
    }
}

/// Page `<h1>`, a link back to the club site when `banner_href` is set
fn banner(options: &RenderOptions) -> String {
    if options.banner.is_empty() {
        return String::new();
    }
    let text = escape_html(&options.banner);
    let inner = if options.banner_href.is_empty() {
        text
    } else {
        format!(
            r#"<a href="{}" target="_parent">{}</a>"#,
            escape_html(&options.banner_href),
            text
        )
    };
    format!("<h1>{}</h1>\n    ", inner)
}

fn letter_buttons(out: &mut String, letters: &[char]) {
    for letter in letters {
        let _ = write!(
            out,
            r#"<span class="alffilter" data-letter="{0}">{0}</span>"#,
            escape_html(&letter.to_string())
        );
    }
}

pub fn render_html(snapshot: &RatingSnapshot, options: &RenderOptions) -> String {
    let mut out = String::with_capacity(4096 + snapshot.len() * 256);
    let latest = escape_html(&snapshot.latest_date().to_string());

    // Writing into a String never fails
    let _ = write!(
        out,
        r#"<!DOCTYPE html>
<html lang="ru">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>{STYLE}    </style>
</head>
<body>
    {banner}<h3>{heading}</h3>
    <div class="filters">
        <h4>Алфавитный фильтр:</h4>
        <div class="filter-row">
            <span class="alffilter" data-letter="{ALL_LETTERS}">ВСЕ</span>
            "#,
        title = escape_html(&options.title),
        banner = banner(options),
        heading = escape_html(&options.heading),
    );
    letter_buttons(&mut out, snapshot.facets().first_row());
    out.push_str(
        r#"
        </div>
        <div class="filter-row">
            "#,
    );
    letter_buttons(&mut out, snapshot.facets().second_row());
    let _ = write!(
        out,
        r#"
        </div>
        <h4 style="margin-top: 20px;">Фильтр по последнему турниру:</h4>
        <div class="filter-row">
            <span class="filter-btn" data-date="{latest}">Последний турнир: {latest}</span>
        </div>
    </div>
    <table id="myTable" border="1">
        <thead>
            <tr>
                <th class="centered">№</th>
                <th>Имя</th>
                <th class="centered">Рейтинг</th>
                <th class="centered">Δ</th>
                <th>Последнее участие</th>
                <th>Город</th>
            </tr>
        </thead>
        <tbody>
"#
    );

    for record in snapshot.records() {
        let _ = write!(
            out,
            r#"            <tr>
                <td class="centered">{rank}</td>
                <td>{name}</td>
                <td class="centered"{style}>{rating}</td>
                <td class="centered">{delta}</td>
                <td class="last-activity">{date}</td>
                <td>{city}</td>
            </tr>
"#,
            rank = record.rank,
            name = escape_html(&record.name),
            style = rating_style(record.trend()),
            rating = escape_html(&record.rating),
            delta = escape_html(&record.rating_delta),
            date = record.last_participation,
            city = escape_html(&record.city),
        );
    }

    let _ = write!(
        out,
        r#"        </tbody>
    </table>
    <script>{SCRIPT}    </script>
</body>
</html>
"#
    );
    out
}
