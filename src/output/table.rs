use super::TabWriter;
use crate::error::{Error, Result};
use std::fmt::{self, Display, Write as _};
use std::io::Write;

/// One placeholder per column, each followed by a tab, ending in a newline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowTemplate {
    columns: usize,
}

impl RowTemplate {
    pub fn new(columns: usize) -> Self {
        Self { columns }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Fills the template, rejecting rows with the wrong number of values.
    ///
    /// ```
    /// use asynq_inspector::output::RowTemplate;
    ///
    /// let template = RowTemplate::new(2);
    /// assert_eq!(template.fill(&[&"x", &42]).unwrap(), "x\t42\t\n");
    /// assert!(template.fill(&[&"x"]).is_err());
    /// ```
    pub fn fill(&self, values: &[&dyn Display]) -> Result<String> {
        if values.len() != self.columns {
            return Err(Error::Output(format!(
                "row has {} values but the table has {} columns",
                values.len(),
                self.columns
            )));
        }

        let mut line = String::new();
        for value in values {
            write!(line, "{}\t", value).map_err(|e: fmt::Error| Error::Output(e.to_string()))?;
        }
        line.push('\n');
        Ok(line)
    }
}

/// Row sink handed to the row emitter of [`TableRenderer::render`].
pub struct TableRows<'a> {
    out: &'a mut dyn Write,
    template: RowTemplate,
    written: usize,
}

impl TableRows<'_> {
    /// Writes one data row.
    pub fn write_row(&mut self, values: &[&dyn Display]) -> Result<()> {
        let line = self.template.fill(values)?;
        self.out.write_all(line.as_bytes())?;
        self.written += 1;
        Ok(())
    }

    /// Number of data rows written so far.
    pub fn written(&self) -> usize {
        self.written
    }
}

/// Prints a header, a dashed separator and caller supplied rows as an
/// aligned table.
///
/// # Example
///
/// ```
/// use asynq_inspector::output::TableRenderer;
///
/// let users = [("alice", 24), ("bob", 42)];
/// let mut out = Vec::new();
/// TableRenderer::new(["Name", "Age"])
///     .render(&mut out, |rows| {
///         for (name, age) in &users {
///             rows.write_row(&[name, age])?;
///         }
///         Ok(())
///     })
///     .unwrap();
///
/// assert_eq!(
///     String::from_utf8(out).unwrap(),
///     "Name   Age  \n----   ---  \nalice  24   \nbob    42   \n"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct TableRenderer {
    columns: Vec<String>,
    template: RowTemplate,
}

impl TableRenderer {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        let template = RowTemplate::new(columns.len());
        Self { columns, template }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn template(&self) -> RowTemplate {
        self.template
    }

    /// Writes the table to `out`.
    ///
    /// Nothing reaches `out` unless the emitter succeeds; column widths are
    /// only known once every row has been seen.
    pub fn render<W, F>(&self, out: W, emit_rows: F) -> Result<()>
    where
        W: Write,
        F: FnOnce(&mut TableRows<'_>) -> Result<()>,
    {
        let mut tw = TabWriter::new(out);

        let headers: Vec<&dyn Display> = self.columns.iter().map(|c| c as &dyn Display).collect();
        tw.write_all(self.template.fill(&headers)?.as_bytes())?;

        let dashes: Vec<String> = self
            .columns
            .iter()
            .map(|c| "-".repeat(c.chars().count()))
            .collect();
        let separators: Vec<&dyn Display> = dashes.iter().map(|d| d as &dyn Display).collect();
        tw.write_all(self.template.fill(&separators)?.as_bytes())?;

        let mut rows = TableRows {
            out: &mut tw,
            template: self.template,
            written: 0,
        };
        emit_rows(&mut rows)?;
        tracing::trace!(rows = rows.written(), "Rendered table rows");

        tw.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(columns: &[&str], data: &[Vec<&str>]) -> Result<String> {
        let mut out = Vec::new();
        TableRenderer::new(columns.iter().copied()).render(&mut out, |rows| {
            for row in data {
                let values: Vec<&dyn Display> = row.iter().map(|v| v as &dyn Display).collect();
                rows.write_row(&values)?;
            }
            Ok(())
        })?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_template_has_one_cell_per_column() {
        let template = RowTemplate::new(2);
        let line = template.fill(&[&"x", &"yy"]).unwrap();

        assert_eq!(line, "x\tyy\t\n");
        assert_eq!(line.trim_end_matches('\n').split_terminator('\t').count(), 2);
    }

    #[test]
    fn test_header_separator_and_row() {
        let out = render(&["A", "BB"], &[vec!["x", "yy"]]).unwrap();
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines, vec!["A  BB  ", "-  --  ", "x  yy  "]);
    }

    #[test]
    fn test_header_only_when_no_rows() {
        let out = render(&["Host", "PID"], &[]).unwrap();
        assert_eq!(out, "Host  PID  \n----  ---  \n");
    }

    #[test]
    fn test_wide_cells_widen_column() {
        let out = render(&["A", "B"], &[vec!["wide-value", "1"], vec!["s", "2"]]).unwrap();
        assert_eq!(
            out,
            "A           B  \n-           -  \nwide-value  1  \ns           2  \n"
        );
    }

    #[test]
    fn test_row_with_wrong_width_fails_without_output() {
        let mut out = Vec::new();
        let result = TableRenderer::new(["A", "B"]).render(&mut out, |rows| {
            rows.write_row(&[&"only-one"])
        });

        assert!(matches!(result, Err(Error::Output(_))));
        assert!(out.is_empty());
    }
}
