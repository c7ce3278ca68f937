use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListOrder {
    /// Children in tree order.
    Insertion,
    Ascending,
    Descending,
    /// Only children with a non-zero play rate.
    Played,
}

impl ListOrder {
    fn parse(param: Option<&str>) -> Result<Self, CommandError> {
        match param {
            None => Ok(Self::Insertion),
            Some("asc") => Ok(Self::Ascending),
            Some("desc") => Ok(Self::Descending),
            Some("played") => Ok(Self::Played),
            Some(other) => Err(CommandError::InvalidListOrder(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List(ListOrder),
    /// `/`-separated moves, `..` and `~`.
    ChangeDir(String),
    /// The raw time-control argument, resolved against the session default.
    Stats(Option<String>),
    SetTimeControl(u32),
    Tree,
    Help,
    TimeControls,
}

impl Command {
    /// Parses one input line. The keyword is everything up to the first run
    /// of whitespace; the rest, trimmed, is the parameter. A blank line is
    /// `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (keyword, param) = match line.split_once(char::is_whitespace) {
            Some((keyword, rest)) => (keyword, Some(rest.trim()).filter(|p| !p.is_empty())),
            None => (line, None),
        };

        let command = match keyword {
            "ls" => Self::List(ListOrder::parse(param)?),
            "cd" => Self::ChangeDir(param.unwrap_or("~").to_string()),
            "stats" | "info" => Self::Stats(param.map(str::to_string)),
            "settc" => Self::SetTimeControl(parse_time_control(param).ok_or_else(|| {
                CommandError::InvalidTimeControl(param.map(str::to_string))
            })?),
            "tree" => Self::Tree,
            "help" => Self::Help,
            "timecontrols" => Self::TimeControls,
            other => return Err(CommandError::NotFound(other.to_string())),
        };
        Ok(Some(command))
    }
}

/// A positive number of seconds.
pub(crate) fn parse_time_control(param: Option<&str>) -> Option<u32> {
    param?.parse::<u32>().ok().filter(|&tc| tc > 0)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    NotFound(String),
    InvalidListOrder(String),
    InvalidTimeControl(Option<String>),
    /// `stats` had neither a usable argument nor a session default.
    NoTimeControl(Option<String>),
    Navigation(String),
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(keyword) => write!(f, "command not found: {}", keyword),
            Self::InvalidListOrder(param) => write!(
                f,
                "ls: Expected no parameter or one of ['asc', 'desc', 'played'], got {}",
                param
            ),
            Self::InvalidTimeControl(param) => write!(
                f,
                "settc: Expected positive int, got {}",
                param.as_deref().unwrap_or("nothing")
            ),
            Self::NoTimeControl(None) => write!(
                f,
                "stats: No time control set. Pass one or use settc (tc) first"
            ),
            Self::NoTimeControl(Some(param)) => write!(
                f,
                "stats: Expected positive int or no parameter, got {}",
                param
            ),
            Self::Navigation(path) => write!(f, "cd: Could not navigate path {}", path),
        }
    }
}

impl Error for CommandError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Command {
        Command::parse(line).unwrap().unwrap()
    }

    #[test]
    fn test_blank_line_is_noop() {
        assert_eq!(Command::parse(""), Ok(None));
        assert_eq!(Command::parse("   \t "), Ok(None));
    }

    #[test]
    fn test_keyword_and_parameter_split() {
        assert_eq!(parse("cd e4/e5"), Command::ChangeDir("e4/e5".to_string()));
        assert_eq!(parse("  cd   e4  "), Command::ChangeDir("e4".to_string()));
        assert_eq!(parse("cd"), Command::ChangeDir("~".to_string()));
        assert_eq!(parse("stats 180"), Command::Stats(Some("180".to_string())));
        assert_eq!(parse("info"), Command::Stats(None));
    }

    #[test]
    fn test_list_orders() {
        assert_eq!(parse("ls"), Command::List(ListOrder::Insertion));
        assert_eq!(parse("ls asc"), Command::List(ListOrder::Ascending));
        assert_eq!(parse("ls desc"), Command::List(ListOrder::Descending));
        assert_eq!(parse("ls played"), Command::List(ListOrder::Played));
        assert_eq!(
            Command::parse("ls sideways"),
            Err(CommandError::InvalidListOrder("sideways".to_string()))
        );
    }

    #[test]
    fn test_settc_requires_positive_int() {
        assert_eq!(parse("settc 600"), Command::SetTimeControl(600));
        assert_eq!(
            Command::parse("settc"),
            Err(CommandError::InvalidTimeControl(None))
        );
        assert_eq!(
            Command::parse("settc 0"),
            Err(CommandError::InvalidTimeControl(Some("0".to_string())))
        );
        assert_eq!(
            Command::parse("settc -60"),
            Err(CommandError::InvalidTimeControl(Some("-60".to_string())))
        );
        assert_eq!(
            Command::parse("settc blitz"),
            Err(CommandError::InvalidTimeControl(Some("blitz".to_string())))
        );
    }

    #[test]
    fn test_unknown_keyword() {
        let err = Command::parse("find e4").unwrap_err();
        assert_eq!(err, CommandError::NotFound("find".to_string()));
        assert_eq!(err.to_string(), "command not found: find");
    }

    #[test]
    fn test_keywords_are_case_sensitive() {
        assert_eq!(
            Command::parse("LS"),
            Err(CommandError::NotFound("LS".to_string()))
        );
    }
}
