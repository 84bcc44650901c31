use crate::model::Contributor;
use crate::rank::{ChartData, Ranked};
use console::{style, Color};
use std::io::{self, Write};

pub const BAR_WIDTH: usize = 50;
const BAR_CHAR: &str = "█";
const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const PALETTE: [Color; 10] = [
    Color::Red,
    Color::Green,
    Color::Yellow,
    Color::Blue,
    Color::Magenta,
    Color::Cyan,
    Color::Color256(9),
    Color::Color256(10),
    Color::Color256(11),
    Color::Color256(12),
];

/// Write one numbered, colored bar per row. `annotate` supplies the text
/// after each bar.
pub fn write_bars<W, T, F>(out: &mut W, chart: &ChartData<T>, annotate: F) -> io::Result<()>
where
    W: Write,
    T: Ranked,
    F: Fn(&T) -> String,
{
    for (i, row) in chart.rows.iter().enumerate() {
        let bar = BAR_CHAR.repeat(chart.bar_length(row.metric(), BAR_WIDTH));
        writeln!(
            out,
            "{:>2}. {:<width$} | {} {}",
            i + 1,
            row.label(),
            style(bar).fg(PALETTE[i % PALETTE.len()]),
            annotate(row),
            width = chart.max_label_len
        )?;
    }
    Ok(())
}

pub fn write_contributor_chart<W: Write>(out: &mut W, chart: &ChartData<Contributor>) -> io::Result<()> {
    writeln!(out, "{}", style("Contributors by commits").bold())?;
    writeln!(out, "{}", "─".repeat(BAR_WIDTH))?;
    write_bars(out, chart, |c| {
        format!("({} commits, {:.2}%)", c.commits, chart.share(c.commits))
    })
}

pub fn write_file_chart<W: Write, T: Ranked>(out: &mut W, chart: &ChartData<T>, top: usize) -> io::Result<()> {
    writeln!(out, "{}", style(format!("File Change Frequency Chart (Top {top}):")).bold())?;
    writeln!(out, "{}", "─".repeat(BAR_WIDTH))?;
    write_bars(out, chart, |f| format!("({})", f.metric()))
}

pub fn write_contributor_details<W: Write>(
    out: &mut W,
    contributor: &Contributor,
    show_lines: bool,
) -> io::Result<()> {
    writeln!(out, "\nDetails for {}:", style(&contributor.name).bold())?;
    writeln!(out, "Total Commits: {}", style(contributor.commits).cyan())?;
    writeln!(out, "First Commit: {}", contributor.first_commit.format(DATE_FORMAT))?;
    writeln!(out, "Latest Commit: {}", contributor.latest_commit.format(DATE_FORMAT))?;
    if show_lines {
        writeln!(out, "Lines Added: {}", style(contributor.lines_added).green())?;
        writeln!(out, "Lines Removed: {}", style(contributor.lines_removed).red())?;
        writeln!(out, "Net Lines: {}", contributor.net_lines())?;
    }
    Ok(())
}
