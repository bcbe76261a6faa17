// optipix/src/core/report.rs
use super::output::Destination;
use super::resolver::ScaleRule;
use super::Dimensions;
use crate::utils::humanize;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

const PADDING: usize = 4;

/// Before/after summary of one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub before: Dimensions,
    pub after: Dimensions,
    pub input_size: u64,
    pub output_size: u64,
}

impl Report {
    /// `100 - out/in * 100`. Negative when the output grew.
    pub fn size_reduction(&self) -> f64 {
        100.0 - (self.output_size as f64 / self.input_size as f64 * 100.0)
    }

    fn rows(&self) -> Vec<Vec<String>> {
        let arrow = " -> ".to_string();
        vec![
            vec![
                "File Name".to_string(),
                self.input_path.display().to_string(),
                arrow.clone(),
                self.output_path.display().to_string(),
            ],
            vec![
                "File Dimensions".to_string(),
                self.before.to_string(),
                arrow.clone(),
                self.after.to_string(),
            ],
            vec![
                "File Size".to_string(),
                humanize(self.input_size),
                arrow,
                humanize(self.output_size),
            ],
            vec![
                "Size Reduction".to_string(),
                format!("{:.1}%", self.size_reduction()),
            ],
        ]
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&align_columns(&self.rows()))
    }
}

/// Left-aligns cells into columns separated by at least `PADDING` spaces.
/// The last cell of each row is free text and does not widen its column.
fn align_columns(rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = Vec::new();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(row.len().saturating_sub(1)) {
            let width = cell.chars().count();
            match widths.get_mut(i) {
                Some(w) => *w = (*w).max(width),
                None => widths.push(width),
            }
        }
    }

    let lines: Vec<String> = rows
        .iter()
        .map(|row| {
            let mut line = String::new();
            for (i, cell) in row.iter().enumerate() {
                if i + 1 < row.len() {
                    line.push_str(&format!("{:<width$}", cell, width = widths[i] + PADDING));
                } else {
                    line.push_str(cell);
                }
            }
            line
        })
        .collect();

    lines.join("\n")
}

/// Informational lines printed ahead of the table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Notices {
    pub dry_run: bool,
    pub duration: Option<Duration>,
    pub rule: Option<ScaleRule>,
    pub destination: Option<Destination>,
}

impl Notices {
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::new();

        if self.dry_run {
            lines.push("**Displaying results only**".to_string());
        }
        if self.destination == Some(Destination::Replaced) {
            lines.push("output file exists; replacing due to -f.".to_string());
        }
        if let Some(duration) = self.duration {
            lines.push(format!("duration: {:.2} s", duration.as_secs_f64()));
        }
        match self.rule {
            Some(ScaleRule::MaxLongest(px)) => {
                lines.push(format!("Resizing to longest dimension of {} px", px))
            }
            Some(ScaleRule::MinShortest(px)) => {
                lines.push(format!("Resizing shortest dimension to {} px", px))
            }
            _ => {}
        }

        lines
    }
}
