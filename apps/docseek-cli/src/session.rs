use std::io::{BufRead, Write};

use tracing::warn;

use docseek_core::traits::{DocumentLookup, RankedSearch};
use docseek_core::types::SearchOutcome;
use docseek_core::walker::CorpusWalker;

use crate::presenter::present;

pub const PROMPT: &str = "Enter keywords/phrase to search or \"q\" to quit: ";

pub fn is_quit(line: &str) -> bool {
    line.eq_ignore_ascii_case("q")
}

/// Interactive read-eval loop. Returns the number of queries executed.
///
/// Ends on `q`/`Q` or end of input. Only a failing engine or a broken stream
/// aborts the loop; undecodable bytes in a line are replaced, not rejected.
pub fn run_session<E, R, W>(engine: &E, kinds: &CorpusWalker, mut input: R, mut output: W) -> anyhow::Result<usize>
where
    E: RankedSearch + DocumentLookup,
    R: BufRead,
    W: Write,
{
    let mut executed = 0;
    loop {
        writeln!(output, "{}", PROMPT)?;
        output.flush()?;

        let mut raw = Vec::new();
        if input.read_until(b'\n', &mut raw)? == 0 {
            break;
        }
        let line = String::from_utf8_lossy(&raw);
        let query = line.strip_suffix('\n').map(|l| l.strip_suffix('\r').unwrap_or(l)).unwrap_or(&*line);
        if is_quit(query) {
            break;
        }

        let report = match engine.search(query)? {
            SearchOutcome::Ranked { results, total_hits } => present(&results, Some(total_hits), query, engine, kinds),
            SearchOutcome::Rejected { reason } => {
                warn!(query, "No Results Found: {}", reason);
                present(&[], None, query, engine, kinds)
            }
        };
        executed += 1;
        write!(output, "{}", report)?;
    }
    Ok(executed)
}
