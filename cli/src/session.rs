use anyhow::Result;
use searchlite_core::{
    build_query_vector, retrieve, Analyzer, DocId, Feedback, InvertedIndex, Retrieval,
};
use std::io::{BufRead, Write};

/// Interactive query session over a built index.
///
/// Reads one query per round; an empty line (or EOF) ends the session
/// normally. With feedback enabled, each result page is followed by a
/// judgment prompt; an empty judgment line moves on to the next query.
pub struct Session<'a> {
    index: &'a InvertedIndex,
    analyzer: Analyzer,
    feedback: Option<Feedback>,
    page: usize,
}

impl<'a> Session<'a> {
    pub fn new(
        index: &'a InvertedIndex,
        analyzer: Analyzer,
        feedback: Option<Feedback>,
        page: usize,
    ) -> Self {
        Self {
            index,
            analyzer,
            feedback,
            page,
        }
    }

    pub fn run(&self, input: &mut dyn BufRead, output: &mut dyn Write) -> Result<()> {
        writeln!(output, "Ready for queries. An empty query ends the session.")?;
        loop {
            write!(output, "\nEnter query: ")?;
            output.flush()?;
            let Some(line) = read_line(input)? else { break };
            let query = line.trim();
            if query.is_empty() {
                break;
            }

            let (_, mut qvec) = build_query_vector(query, self.analyzer);
            loop {
                let results = retrieve(self.index, &qvec)?;
                print_results(output, &results, self.page)?;
                let Some(fb) = self.feedback else { break };
                if results.is_empty() {
                    break;
                }
                write!(
                    output,
                    "Feedback (+rank relevant, -rank not, empty to finish): "
                )?;
                output.flush()?;
                let Some(line) = read_line(input)? else { break };
                let line = line.trim();
                if line.is_empty() {
                    break;
                }
                let shown = results.len().min(self.page);
                match parse_judgments(line, shown) {
                    Ok((relevant, nonrelevant)) => {
                        let relevant: Vec<DocId> =
                            relevant.iter().map(|&r| results[r].doc).collect();
                        let nonrelevant: Vec<DocId> =
                            nonrelevant.iter().map(|&r| results[r].doc).collect();
                        qvec = fb.apply(self.index, &qvec, &relevant, &nonrelevant)?;
                    }
                    Err(msg) => writeln!(output, "{msg}")?,
                }
            }
        }
        writeln!(output, "Session ended.")?;
        Ok(())
    }
}

fn read_line(input: &mut dyn BufRead) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

pub fn print_results(
    output: &mut dyn Write,
    results: &[Retrieval],
    limit: usize,
) -> Result<()> {
    if results.is_empty() {
        writeln!(output, "No matching documents.")?;
        return Ok(());
    }
    writeln!(output, "{} matching documents:", results.len())?;
    for (rank, r) in results.iter().take(limit).enumerate() {
        writeln!(output, "{:3}. {}  ({:.4})", rank + 1, r.name, r.score)?;
    }
    Ok(())
}

/// Parse a judgment line like "+1 -3 +2" into zero-based ranks.
pub fn parse_judgments(
    line: &str,
    shown: usize,
) -> std::result::Result<(Vec<usize>, Vec<usize>), String> {
    let mut relevant = Vec::new();
    let mut nonrelevant = Vec::new();
    for token in line.split_whitespace() {
        let parsed = token
            .strip_prefix('+')
            .map(|d| (true, d))
            .or_else(|| token.strip_prefix('-').map(|d| (false, d)));
        let Some((is_relevant, digits)) = parsed else {
            return Err(format!("bad judgment '{token}': expected +rank or -rank"));
        };
        let rank: usize = digits
            .parse()
            .map_err(|_| format!("bad judgment '{token}': expected +rank or -rank"))?;
        if rank == 0 || rank > shown {
            return Err(format!("rank {rank} is not on the shown page (1..{shown})"));
        }
        if is_relevant {
            relevant.push(rank - 1);
        } else {
            nonrelevant.push(rank - 1);
        }
    }
    Ok((relevant, nonrelevant))
}
