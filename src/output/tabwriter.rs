use std::io::{self, Write};

/// Aligns tab-separated text into columns padded with spaces.
///
/// Text is buffered until [`flush`](Write::flush). Every cell terminated by a
/// tab is padded to the width of the widest cell in its column block plus
/// `padding`; text after the last tab of a line is written unchanged. A column
/// block is a run of consecutive lines that all have a cell in that column,
/// so a line without tabs resets the alignment of the lines after it.
///
/// # Example
///
/// ```
/// use asynq_inspector::output::TabWriter;
/// use std::io::Write;
///
/// let mut tw = TabWriter::new(Vec::new());
/// write!(tw, "a\tbbb\t\nccc\td\t\n").unwrap();
/// let out = String::from_utf8(tw.into_inner().unwrap()).unwrap();
/// assert_eq!(out, "a    bbb  \nccc  d    \n");
/// ```
pub struct TabWriter<W: Write> {
    inner: W,
    min_width: usize,
    padding: usize,
    buf: Vec<u8>,
}

impl<W: Write> TabWriter<W> {
    /// Creates a writer with no minimum cell width and two spaces of padding.
    pub fn new(inner: W) -> Self {
        Self::with_layout(inner, 0, 2)
    }

    /// Creates a writer with an explicit minimum cell width and padding.
    pub fn with_layout(inner: W, min_width: usize, padding: usize) -> Self {
        Self {
            inner,
            min_width,
            padding,
            buf: Vec::new(),
        }
    }

    /// Flushes buffered text and returns the underlying writer.
    pub fn into_inner(mut self) -> io::Result<W> {
        self.flush()?;
        Ok(self.inner)
    }
}

impl<W: Write> Write for TabWriter<W> {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        let text = std::str::from_utf8(&self.buf)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        let aligned = Layout::new(text, self.min_width, self.padding).render();
        self.inner.write_all(aligned.as_bytes())?;
        self.buf.clear();
        self.inner.flush()
    }
}

struct Line<'a> {
    /// Tab-terminated cells followed by the trailing text
    cells: Vec<&'a str>,
    newline: bool,
}

impl Line<'_> {
    fn terminated_cells(&self) -> usize {
        self.cells.len() - 1
    }
}

struct Layout<'a> {
    lines: Vec<Line<'a>>,
    widths: Vec<usize>,
    min_width: usize,
    padding: usize,
}

impl<'a> Layout<'a> {
    fn new(text: &'a str, min_width: usize, padding: usize) -> Self {
        let mut lines = Vec::new();
        let mut rest = text;
        while !rest.is_empty() {
            let (content, newline, next) = match rest.find('\n') {
                Some(i) => (&rest[..i], true, &rest[i + 1..]),
                None => (rest, false, ""),
            };
            lines.push(Line {
                cells: content.split('\t').collect(),
                newline,
            });
            rest = next;
        }
        Self {
            lines,
            widths: Vec::new(),
            min_width,
            padding,
        }
    }

    fn render(mut self) -> String {
        let mut out = String::new();
        let count = self.lines.len();
        self.format(&mut out, 0, count);
        out
    }

    /// Computes widths for the column at depth `widths.len()` block by block,
    /// recursing into each block for the columns to its right.
    fn format(&mut self, out: &mut String, first: usize, end: usize) {
        let column = self.widths.len();
        let mut start = first;
        let mut this = first;

        while this < end {
            if column >= self.lines[this].terminated_cells() {
                this += 1;
                continue;
            }

            self.write_lines(out, start, this);
            start = this;

            let mut width = self.min_width;
            while this < end && column < self.lines[this].terminated_cells() {
                width = width.max(cell_width(self.lines[this].cells[column]) + self.padding);
                this += 1;
            }

            self.widths.push(width);
            self.format(out, start, this);
            self.widths.pop();
            start = this;
        }

        self.write_lines(out, start, end);
    }

    fn write_lines(&self, out: &mut String, start: usize, end: usize) {
        for line in &self.lines[start..end] {
            for (j, cell) in line.cells.iter().enumerate() {
                out.push_str(cell);
                if let Some(&width) = self.widths.get(j) {
                    let pad = width.saturating_sub(cell_width(cell));
                    out.extend(std::iter::repeat_n(' ', pad));
                }
            }
            if line.newline {
                out.push('\n');
            }
        }
    }
}

fn cell_width(cell: &str) -> usize {
    cell.chars().count()
}
