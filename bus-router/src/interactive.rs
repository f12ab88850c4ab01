//! Terminal prompt loop.
//!
//! Reads a start and a goal stop per round, prints the itinerary, and asks
//! whether to go again. Generic over the reader and writer so it can be
//! driven from tests.

use std::io::{self, BufRead, Write};

use tracing::debug;

use crate::graph::TransitGraph;
use crate::planner::{Planner, RouteRequest, SearchConfig, SearchError};
use crate::report::render_report;
use crate::stops::StopNames;

/// Read one line with the trailing newline stripped. `None` at end of input.
fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    text: &str,
) -> io::Result<Option<String>> {
    write!(output, "{text}")?;
    output.flush()?;
    read_line(input)
}

/// Whether the user wants another round. Blank lines are skipped; anything
/// other than an answer starting with `y` ends the session.
fn again<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> io::Result<bool> {
    write!(output, "\nAgain? (y/n): ")?;
    output.flush()?;
    loop {
        match read_line(input)? {
            None => return Ok(false),
            Some(answer) => match answer.trim().chars().next() {
                None => continue,
                Some(c) => return Ok(c.eq_ignore_ascii_case(&'y')),
            },
        }
    }
}

/// Run the prompt loop until the user declines another round or input ends.
pub fn run_interactive<R: BufRead, W: Write>(
    graph: &TransitGraph,
    names: &StopNames,
    config: &SearchConfig,
    mut input: R,
    mut output: W,
) -> io::Result<()> {
    let planner = Planner::new(graph, config);

    loop {
        writeln!(output, "\n--- Bus Route Finder ---")?;

        let Some(start) = prompt(&mut input, &mut output, "Enter START stop: ")? else {
            break;
        };
        let Some(start) = names.resolve(&start) else {
            writeln!(output, "Stop not found!")?;
            continue;
        };

        let Some(goal) = prompt(&mut input, &mut output, "Enter END stop: ")? else {
            break;
        };
        let Some(goal) = names.resolve(&goal) else {
            writeln!(output, "Stop not found!")?;
            continue;
        };

        if start == goal {
            writeln!(output, "Same stop!")?;
            continue;
        }

        debug!(
            start = graph.stop_name(start),
            goal = graph.stop_name(goal),
            "interactive query"
        );

        match planner.find_route(&RouteRequest::new(start, goal)) {
            Ok(result) => {
                let text = render_report(graph, &result.report).map_err(io::Error::other)?;
                writeln!(output, "\n{text}")?;
            }
            Err(SearchError::NotFound) => writeln!(output, "\nNo route found!")?,
            Err(e) => writeln!(output, "\nSearch failed: {e}")?,
        }

        if !again(&mut input, &mut output)? {
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphBuilder;
    use std::io::Cursor;

    fn graph() -> TransitGraph {
        let mut b = GraphBuilder::new();
        let a = b.add_stop("Andheri Station (E)", 19.1197, 72.8468).unwrap();
        let m = b.add_stop("Marol Naka", 19.1087, 72.8790).unwrap();
        let p = b.add_stop("Powai Lake", 19.1273, 72.9050).unwrap();
        b.add_stop("Aarey Colony", 19.1550, 72.8800).unwrap();
        b.add_route("332", vec![(1, a), (2, m), (3, p)]).unwrap();
        b.build()
    }

    fn session(script: &str) -> String {
        let g = graph();
        let names = StopNames::new(&g);
        let mut out = Vec::new();
        run_interactive(
            &g,
            &names,
            &SearchConfig::default(),
            Cursor::new(script.to_string()),
            &mut out,
        )
        .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn finds_route_and_stops_on_no() {
        let out = session("andheri\npowai\nn\n");
        assert!(out.contains("Enter START stop: "));
        assert!(out.contains("Enter END stop: "));
        assert!(out.contains("=== ROUTE FOUND ==="), "{out}");
        assert!(out.contains("LEG 1  BUS 332"));
        assert!(out.contains("  - Marol Naka"));
        assert_eq!(out.matches("Enter START stop:").count(), 1);
    }

    #[test]
    fn unknown_stop_reprompts() {
        let out = session("Colaba\nandheri\npowai\nn\n");
        assert!(out.contains("Stop not found!"));
        assert_eq!(out.matches("Enter START stop:").count(), 2);
        assert!(out.contains("=== ROUTE FOUND ==="));
    }

    #[test]
    fn same_stop_rejected() {
        let out = session("Marol Naka\nmarol\n");
        assert!(out.contains("Same stop!"));
        assert!(!out.contains("ROUTE FOUND"));
    }

    #[test]
    fn unreachable_goal_reports_no_route() {
        let out = session("andheri\naarey\n\nY\nmarol\npowai\nno\n");
        assert!(out.contains("No route found!"), "{out}");
        assert_eq!(out.matches("Again? (y/n):").count(), 2);
        assert!(out.contains("=== ROUTE FOUND ==="));
    }

    #[test]
    fn ends_quietly_at_end_of_input() {
        let out = session("andheri\n");
        assert!(out.contains("Enter END stop: "));
        assert!(!out.contains("Again?"));
    }
}
