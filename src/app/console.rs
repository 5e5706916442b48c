use std::io::Write;

use crossterm::{
    queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
};

/// A run of text with an optional color, the unit every printed line is
/// built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Segment {
    pub text: String,
    pub color: Option<Color>,
    pub bold: bool,
}

impl Segment {
    pub(crate) fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: None,
            bold: false,
        }
    }

    pub(crate) fn colored(text: impl Into<String>, color: Color) -> Self {
        Self {
            text: text.into(),
            color: Some(color),
            bold: false,
        }
    }

    pub(crate) fn heading(text: impl Into<String>, color: Color) -> Self {
        Self {
            text: text.into(),
            color: Some(color),
            bold: true,
        }
    }
}

pub(crate) type Line = Vec<Segment>;

/// Flattens a line to plain text.
pub(crate) fn line_text(line: &[Segment]) -> String {
    line.iter().map(|segment| segment.text.as_str()).collect()
}

pub(crate) fn write_segments<W: Write>(
    out: &mut W,
    line: &[Segment],
    no_color: bool,
) -> std::io::Result<()> {
    for segment in line {
        if no_color {
            queue!(out, Print(&segment.text))?;
            continue;
        }
        if segment.bold {
            queue!(out, SetAttribute(Attribute::Bold))?;
        }
        if let Some(color) = segment.color {
            queue!(out, SetForegroundColor(color))?;
        }
        queue!(out, Print(&segment.text))?;
        if segment.color.is_some() || segment.bold {
            queue!(out, ResetColor, SetAttribute(Attribute::Reset))?;
        }
    }
    Ok(())
}

/// Prints whole lines to stdout.
pub(crate) fn print_lines(lines: &[Line], no_color: bool) -> std::io::Result<()> {
    let mut out = std::io::stdout().lock();
    for line in lines {
        write_segments(&mut out, line, no_color)?;
        queue!(out, Print("\n"))?;
    }
    out.flush()
}
