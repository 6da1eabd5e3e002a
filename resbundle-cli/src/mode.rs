/// The two operations of the tool; exactly one runs per invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Extract,
    Split,
}

pub const BOTH_MODES_MESSAGE: &str = "You can specify either --split or --extract.";
pub const NO_MODE_MESSAGE: &str = "Please specify either --split or --extract.";

impl Mode {
    pub fn from_flags(extract: bool, split: bool) -> Result<Self, &'static str> {
        match (extract, split) {
            (true, true) => Err(BOTH_MODES_MESSAGE),
            (true, false) => Ok(Mode::Extract),
            (false, true) => Ok(Mode::Split),
            (false, false) => Err(NO_MODE_MESSAGE),
        }
    }
}
