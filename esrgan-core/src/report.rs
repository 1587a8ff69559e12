use std::fmt;
use std::path::PathBuf;

use crate::filename::ParseError;

/// One recoverable reason a set or file was left out of the job list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Skip {
    /// A selected set directory is missing on disk.
    MissingSet { set: u16 },
    /// A direct child of a set directory does not follow the naming
    /// convention.
    BadFilename {
        set: u16,
        name: String,
        reason: ParseError,
    },
    /// Two selected sources mapped to one destination; both jobs are kept
    /// and the later one overwrites.
    Collision {
        dest: PathBuf,
        first: PathBuf,
        second: PathBuf,
    },
}

impl fmt::Display for Skip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Skip::MissingSet { set } => write!(f, "set {set:03}: directory missing"),
            Skip::BadFilename { set, name, reason } => {
                write!(f, "set {set:03}: {name:?} skipped: {reason}")
            }
            Skip::Collision {
                dest,
                first,
                second,
            } => write!(
                f,
                "collision on {}: {} overwrites the output of {}",
                dest.display(),
                second.display(),
                first.display()
            ),
        }
    }
}

/// Accumulated outcome of one enumeration pass, returned alongside the
/// job list so the caller can report without aborting the run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Sets whose directory was enumerated, ascending.
    pub sets_processed: Vec<u16>,
    pub skips: Vec<Skip>,
}

impl RunReport {
    pub fn is_clean(&self) -> bool {
        self.skips.is_empty()
    }

    pub fn summary(&self) -> String {
        format!(
            "{} sets processed, {} skipped",
            self.sets_processed.len(),
            self.skips.len()
        )
    }
}
