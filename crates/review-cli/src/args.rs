//! Command line parsing.

use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Analyze {
        username: String,
        out: Option<PathBuf>,
        games: Option<usize>,
        /// Print the fetched games with their indices instead of analyzing.
        list: bool,
        select: Option<Vec<usize>>,
    },
    Review {
        report: PathBuf,
    },
}

pub const USAGE: &str = "\
Usage:
  review-cli analyze <username> [--out <file>] [--games <n> | --select <i,j,..>]
  review-cli analyze <username> --list
  review-cli review <report.json>";

pub fn parse_args(args: &[String]) -> Result<Command, String> {
    let mut iter = args.iter();
    match iter.next().map(String::as_str) {
        Some("analyze") => {
            let mut username = None;
            let mut out = None;
            let mut games = None;
            let mut list = false;
            let mut select = None;
            while let Some(arg) = iter.next() {
                match arg.as_str() {
                    "--out" => {
                        let path = iter.next().ok_or("--out needs a file")?;
                        out = Some(PathBuf::from(path));
                    }
                    "--games" => {
                        let n = iter.next().ok_or("--games needs a number")?;
                        let n: usize = n.parse().map_err(|_| format!("invalid game count '{n}'"))?;
                        games = Some(n);
                    }
                    "--list" => list = true,
                    "--select" => {
                        let raw = iter.next().ok_or("--select needs game indices, e.g. 0,2,5")?;
                        select = Some(parse_indices(raw)?);
                    }
                    other if username.is_none() && !other.starts_with("--") => {
                        username = Some(other.to_string());
                    }
                    other => return Err(format!("unexpected argument '{other}'")),
                }
            }
            let username = username.ok_or("analyze needs a username")?;
            if games.is_some() && select.is_some() {
                return Err("use either --games or --select".to_string());
            }
            Ok(Command::Analyze { username, out, games, list, select })
        }
        Some("review") => {
            let report = iter.next().ok_or("review needs a report file")?;
            if let Some(extra) = iter.next() {
                return Err(format!("unexpected argument '{extra}'"));
            }
            Ok(Command::Review { report: PathBuf::from(report) })
        }
        Some(other) => Err(format!("unknown command '{other}'")),
        None => Err("missing command".to_string()),
    }
}

fn parse_indices(raw: &str) -> Result<Vec<usize>, String> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| part.parse().map_err(|_| format!("invalid game index '{part}'")))
        .collect()
}
