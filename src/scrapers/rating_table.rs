use scraper::{ElementRef, Html, Selector};

use crate::config::RowSelectors;
use crate::errors::PipelineError;
use crate::types::{RawCell, RawRow};

/// Cuts a rating page into [`RawRow`]s
#[derive(Debug)]
pub struct RowParser {
    row_selector: String,
    row: Selector,
    cell: Selector,
    name: Selector,
    detail: Selector,
}

fn parse_selector(selector: &str) -> Result<Selector, PipelineError> {
    Selector::parse(selector).map_err(|e| PipelineError::InvalidSelector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}

/// Each text node trimmed with inner runs of whitespace collapsed, then glued
/// together without a separator, so `02.02.<b>2025</b>` reads as one date
fn element_text(element: &ElementRef) -> String {
    element
        .text()
        .map(|node| node.split_whitespace().collect::<Vec<_>>().join(" "))
        .collect()
}

impl RowParser {
    pub fn new(selectors: &RowSelectors) -> Result<Self, PipelineError> {
        Ok(RowParser {
            row_selector: selectors.row.clone(),
            row: parse_selector(&selectors.row)?,
            cell: parse_selector(&selectors.cell)?,
            name: parse_selector(&selectors.name)?,
            detail: parse_selector(&selectors.detail)?,
        })
    }

    /// A page without a single rating row means the page itself is wrong,
    /// so that is an error rather than an empty table.
    pub fn parse(&self, html: &str) -> Result<Vec<RawRow>, PipelineError> {
        let document = Html::parse_document(html);
        let rows: Vec<RawRow> = document
            .select(&self.row)
            .map(|row| self.parse_row(&row))
            .collect();

        if rows.is_empty() {
            return Err(PipelineError::NoRows {
                selector: self.row_selector.clone(),
            });
        }
        Ok(rows)
    }

    fn parse_row(&self, row: &ElementRef) -> RawRow {
        RawRow::new(row.select(&self.cell).map(|cell| self.parse_cell(&cell)).collect())
    }

    fn parse_cell(&self, cell: &ElementRef) -> RawCell {
        let name = cell.select(&self.name).next().map(|e| element_text(&e));
        let detail = cell.select(&self.detail).next().map(|e| element_text(&e));
        RawCell {
            text: element_text(cell),
            name,
            detail,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body><table>
          <tr><th>№</th><th>Игрок</th></tr>
          <tr class="stat">
            <td>1</td>
            <td><span>i</span><div class="podrstat">Турниров: 5<br>Дата последнего участия - 10.01.2025</div></td>
            <td><a class="statname">Иванов   Иван</a> <small>КМС</small></td>
            <td>1650</td>
            <td>+12</td>
          </tr>
          <tr class="stat">
            <td>2</td><td></td><td>Петров Пётр</td><td>1600</td><td>-3</td>
            <td>02.02.2025</td><td></td><td>Тверь</td>
          </tr>
        </table></body></html>
    "#;

    #[test]
    fn test_parse_rows_and_cells() {
        let parser = RowParser::new(&RowSelectors::default()).unwrap();
        let rows = parser.parse(PAGE).unwrap();
        assert_eq!(rows.len(), 2);

        let first = &rows[0];
        assert_eq!(first.len(), 5);
        assert_eq!(first.cells[2].name.as_deref(), Some("Иванов Иван"));
        assert_eq!(first.cells[2].text, "Иванов ИванКМС");
        assert_eq!(
            first.cells[1].detail.as_deref(),
            Some("Турниров: 5Дата последнего участия - 10.01.2025")
        );
        assert_eq!(first.cell_text(4), Some("+12"));

        let second = &rows[1];
        assert_eq!(second.len(), 8);
        assert_eq!(second.cells[2].name, None);
        assert_eq!(second.cell_text(5), Some("02.02.2025"));
        assert_eq!(second.cell_text(7), Some("Тверь"));
    }

    #[test]
    fn test_cell_split_across_elements_reads_as_one_token() {
        let page = r#"<table><tr class="stat">
            <td>1</td><td></td><td>Петров Пётр</td><td>1600</td><td>-3</td>
            <td> 02.02.<b>2025</b> </td>
        </tr></table>"#;
        let parser = RowParser::new(&RowSelectors::default()).unwrap();
        let rows = parser.parse(page).unwrap();
        assert_eq!(rows[0].cell_text(5), Some("02.02.2025"));
    }

    #[test]
    fn test_no_rows_is_error() {
        let parser = RowParser::new(&RowSelectors::default()).unwrap();
        let err = parser.parse("<html><body><p>maintenance</p></body></html>").unwrap_err();
        assert!(matches!(err, PipelineError::NoRows { .. }));
    }

    #[test]
    fn test_bad_selector_is_error() {
        let selectors = RowSelectors {
            row: "tr[".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            RowParser::new(&selectors),
            Err(PipelineError::InvalidSelector { .. })
        ));
    }
}
