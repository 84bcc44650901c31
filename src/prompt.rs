use crate::chart::write_contributor_details;
use crate::model::Contributor;
use crate::rank::ChartData;
use std::io::{self, BufRead, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptInput {
    Quit,
    Select(usize),
    Invalid,
}

pub fn parse_input(line: &str) -> PromptInput {
    let line = line.trim();
    if line == "q" {
        return PromptInput::Quit;
    }
    match line.parse::<usize>() {
        Ok(index) => PromptInput::Select(index),
        Err(_) => PromptInput::Invalid,
    }
}

/// Read selections from `input` until `q` or end of input, printing the
/// details of each chosen contributor.
pub fn run<R: BufRead, W: Write>(
    input: R,
    out: &mut W,
    chart: &ChartData<Contributor>,
    show_lines: bool,
) -> io::Result<()> {
    writeln!(out, "\nEnter the number of a contributor to see more details, or 'q' to quit:")?;
    out.flush()?;

    for line in input.lines() {
        let selected = match parse_input(&line?) {
            PromptInput::Quit => break,
            PromptInput::Select(index) => chart.select(index),
            PromptInput::Invalid => None,
        };

        match selected {
            Some(contributor) => {
                write_contributor_details(out, contributor, show_lines)?;
                writeln!(out, "\nEnter another number or 'q' to quit:")?;
            }
            None => writeln!(
                out,
                "Invalid input. Please enter a number between 1 and {}",
                chart.len()
            )?,
        }
        out.flush()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn chart() -> ChartData<Contributor> {
        let at = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let rows = ["Ada", "Grace"]
            .iter()
            .map(|name| Contributor {
                name: name.to_string(),
                commits: 1,
                first_commit: at,
                latest_commit: at,
                lines_added: 0,
                lines_removed: 0,
            })
            .collect();
        ChartData::new(rows, 0, None)
    }

    #[test]
    fn parse_input_variants() {
        assert_eq!(parse_input("q\n"), PromptInput::Quit);
        assert_eq!(parse_input(" 2 "), PromptInput::Select(2));
        assert_eq!(parse_input("two"), PromptInput::Invalid);
        assert_eq!(parse_input("-1"), PromptInput::Invalid);
    }

    #[test]
    fn prompt_reprompts_on_bad_input_and_stops_at_q() {
        let input = "0\nabc\n2\nq\n1\n";
        let mut out = Vec::new();
        run(input.as_bytes(), &mut out, &chart(), false).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(text.matches("Please enter a number between 1 and 2").count(), 2);
        assert!(text.contains("Grace"));
        assert!(!text.contains("Details for Ada"));
    }
}
