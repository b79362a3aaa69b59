//! Output formats and box-drawn tables.

use clap::ValueEnum;
use serde::Serialize;

use crate::Result;

/// How command results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
}

/// Prints `value` as pretty JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Fixed-width table with box-drawing borders.
#[derive(Debug, Clone, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Appends a row; missing cells render empty, extra cells are dropped.
    pub fn row<I, S>(&mut self, cells: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut cells: Vec<String> = cells.into_iter().map(Into::into).collect();
        cells.resize(self.headers.len(), String::new());
        self.rows.push(cells);
        self
    }

    pub fn render(&self) -> String {
        let placeholder: Vec<String> = std::iter::once("(no data)".to_string())
            .chain(std::iter::repeat(String::new()))
            .take(self.headers.len())
            .collect();
        let rows: &[Vec<String>] = if self.rows.is_empty() {
            std::slice::from_ref(&placeholder)
        } else {
            &self.rows
        };

        let widths: Vec<usize> = (0..self.headers.len())
            .map(|c| {
                rows.iter()
                    .filter_map(|r| r.get(c))
                    .map(|cell| cell.chars().count())
                    .chain(std::iter::once(self.headers[c].chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let border = |left: &str, mid: &str, right: &str| {
            let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
            format!("{}{}{}\n", left, segments.join(mid), right)
        };
        let line = |cells: &[String]| {
            let padded: Vec<String> = cells
                .iter()
                .zip(&widths)
                .map(|(cell, w)| format!(" {:<width$} ", cell, width = *w))
                .collect();
            format!("│{}│\n", padded.join("│"))
        };

        let mut out = border("┌", "┬", "┐");
        out.push_str(&line(&self.headers));
        out.push_str(&border("├", "┼", "┤"));
        for row in rows {
            out.push_str(&line(row));
        }
        out.push_str(&border("└", "┴", "┘"));
        out
    }

    pub fn print(&self) {
        print!("{}", self.render());
    }
}

/// Formats a price-like number with four decimals.
pub fn fmt4(value: f64) -> String {
    format!("{:.4}", value)
}
