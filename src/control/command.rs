//! Control command grammar
//!
//! Commands arrive as short opaque tokens and are relayed verbatim; nothing
//! here executes them. Parsing happens once at the transport boundary so
//! the rest of the server can log and reason about a typed value instead of
//! re-inspecting prefixes.

/// Prefix marking a value-set token; the payload follows the prefix
pub const VALUE_PREFIX: &str = "!S";

/// Movement direction carried by a single-letter token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Back,
    Left,
    Right,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Direction::Forward => "forward",
            Direction::Back => "back",
            Direction::Left => "left",
            Direction::Right => "right",
        };
        write!(f, "{}", name)
    }
}

/// A parsed control token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Movement command (`f`, `b`, `l`, `r`)
    Move(Direction),
    /// Value-set command (`!S<payload>`)
    SetValue(String),
    /// Anything else; relayed untouched
    Unknown(String),
}

impl Command {
    /// Parse one token
    ///
    /// Unrecognized tokens are not an error: they still get relayed, they
    /// just carry no meaning for this server.
    pub fn parse(token: &str) -> Self {
        if let Some(payload) = token.strip_prefix(VALUE_PREFIX) {
            return Command::SetValue(payload.to_string());
        }

        match token {
            "f" => Command::Move(Direction::Forward),
            "b" => Command::Move(Direction::Back),
            "l" => Command::Move(Direction::Left),
            "r" => Command::Move(Direction::Right),
            other => Command::Unknown(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_moves() {
        assert_eq!(Command::parse("f"), Command::Move(Direction::Forward));
        assert_eq!(Command::parse("b"), Command::Move(Direction::Back));
        assert_eq!(Command::parse("l"), Command::Move(Direction::Left));
        assert_eq!(Command::parse("r"), Command::Move(Direction::Right));
    }

    #[test]
    fn test_parse_set_value() {
        assert_eq!(
            Command::parse("!S42"),
            Command::SetValue("42".to_string())
        );
        assert_eq!(Command::parse("!S"), Command::SetValue(String::new()));
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(Command::parse("x"), Command::Unknown("x".to_string()));
        // Tokens are case-sensitive
        assert_eq!(Command::parse("F"), Command::Unknown("F".to_string()));
        assert_eq!(Command::parse(""), Command::Unknown(String::new()));
    }

    #[test]
    fn test_direction_display() {
        assert_eq!(Direction::Forward.to_string(), "forward");
        assert_eq!(Direction::Right.to_string(), "right");
    }
}
