#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Search(String),
    User(u64),
    Followers(u64),
    Following(u64),
    Refresh,
    Help,
    Quit,
}

pub fn parse_command(input: &str) -> Option<Command> {
    let input = input.strip_prefix(':').unwrap_or(input).trim();

    if input.is_empty() {
        return None;
    }

    let (cmd, args) = match input.split_once(char::is_whitespace) {
        Some((cmd, args)) => (cmd, args.trim()),
        None => (input, ""),
    };

    match cmd {
        "search" | "s" if !args.is_empty() => Some(Command::Search(args.to_owned())),
        "user" | "u" => parse_id(args).map(Command::User),
        "followers" => parse_id(args).map(Command::Followers),
        "following" => parse_id(args).map(Command::Following),
        "refresh" | "r" => Some(Command::Refresh),
        "help" | "h" => Some(Command::Help),
        "quit" | "q" => Some(Command::Quit),
        _ => None,
    }
}

/// GitHub account IDs are positive integers.
fn parse_id(args: &str) -> Option<u64> {
    args.parse().ok().filter(|id| *id > 0)
}
