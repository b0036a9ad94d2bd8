//! Output renderers: YAML, pretty JSON, or an aligned text table.

use std::io::{self, Write};

use repoflow_api_models::{Record, Renderable, Shape};

use crate::client::CliResult;
use crate::error::RenderError;

/// Printed instead of a table when there are no rows.
pub(crate) const NO_DATA: &str = "No data available.";
/// Spaces between table columns, in addition to the widest cell.
const COLUMN_GAP: usize = 3;

/// Output mode selected with `--output`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum OutputFormat {
    #[default]
    Text,
    Yaml,
    Json,
}

impl OutputFormat {
    /// Map the flag value to a mode. Only the exact strings `yaml` and
    /// `json` select those modes; anything else renders as text.
    pub(crate) fn from_flag(value: &str) -> Self {
        match value {
            "yaml" => Self::Yaml,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }

    pub(crate) const fn is_text(self) -> bool {
        matches!(self, Self::Text)
    }
}

/// Render `value` to standard output.
pub(crate) fn emit<T: Renderable + ?Sized>(value: &T, format: OutputFormat) -> CliResult<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    render(value, format, &mut handle)?;
    Ok(())
}

/// Render `value` in the requested format.
pub(crate) fn render<T, W>(value: &T, format: OutputFormat, out: &mut W) -> Result<(), RenderError>
where
    T: Renderable + ?Sized,
    W: Write,
{
    match format {
        OutputFormat::Yaml => {
            let text =
                serde_yaml::to_string(value).map_err(|err| RenderError::Serialization {
                    format: "yaml",
                    detail: err.to_string(),
                })?;
            write!(out, "---\n{text}")?;
        }
        OutputFormat::Json => {
            let text =
                serde_json::to_string_pretty(value).map_err(|err| RenderError::Serialization {
                    format: "json",
                    detail: err.to_string(),
                })?;
            writeln!(out, "{text}")?;
        }
        OutputFormat::Text => render_table(value.shape(), out)?,
    }
    Ok(())
}

fn render_table<W: Write>(shape: Shape<'_>, out: &mut W) -> Result<(), RenderError> {
    let records: Vec<&dyn Record> = match shape {
        Shape::Record(record) => vec![record],
        Shape::Records(records) => records,
        Shape::Opaque(kind) => return Err(RenderError::Format { kind }),
    };

    let Some(first) = records.first() else {
        writeln!(out, "{NO_DATA}")?;
        return Ok(());
    };

    let headers: Vec<String> = first
        .fields()
        .into_iter()
        .map(|(name, _)| name.to_uppercase())
        .collect();
    let rule: Vec<String> = headers
        .iter()
        .map(|header| "-".repeat(header.chars().count()))
        .collect();

    let mut rows = vec![headers, rule];
    rows.extend(records.iter().map(|record| {
        record
            .fields()
            .into_iter()
            .map(|(_, value)| value)
            .collect::<Vec<_>>()
    }));

    out.write_all(align_columns(&rows).as_bytes())?;
    Ok(())
}

/// Pad every cell but the last in each row to its column width plus the gap.
fn align_columns(rows: &[Vec<String>]) -> String {
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    let mut widths = vec![0_usize; columns];
    for row in rows {
        let padded = row.len().saturating_sub(1);
        for (index, cell) in row.iter().take(padded).enumerate() {
            widths[index] = widths[index].max(cell.chars().count());
        }
    }

    let mut text = String::new();
    for row in rows {
        let last = row.len().saturating_sub(1);
        for (index, cell) in row.iter().enumerate() {
            text.push_str(cell);
            if index < last {
                let pad = widths[index] + COLUMN_GAP - cell.chars().count();
                text.extend(std::iter::repeat_n(' ', pad));
            }
        }
        text.push('\n');
    }
    text
}
