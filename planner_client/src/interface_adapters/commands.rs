use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

pub const HELP: &str = "\
Commands:
  open <path>                           go to /, /login, /signup, /planner, /hotels, /dashboard
  login <email> <password>              sign in
  signup <email> <password>             create an account
  logout                                sign out
  plan <city> | <interests> | <days>    generate an itinerary (interests comma separated)
  save                                  save the generated itinerary
  hotels                                find hotels in the planned city
  search <city>                         search hotels
  stay <check-in> <check-out> [guests]  set booking dates (YYYY-MM-DD)
  book <hotel-id>                       book a listed hotel
  view <id>                             open a saved itinerary
  close                                 close the itinerary detail
  delete <id>                           delete a saved itinerary
  book-hotels <id>                      find hotels for a saved itinerary
  help                                  show this help
  quit                                  exit";

/// One line of terminal input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Open(String),
    Login { email: String, password: String },
    Signup { email: String, password: String },
    Logout,
    Plan { city: String, interests: String, days: u32 },
    Save,
    Hotels,
    Search(String),
    Stay {
        check_in: NaiveDate,
        check_out: NaiveDate,
        guests: u32,
    },
    Book(String),
    View(String),
    Close,
    Delete(String),
    BookHotels(String),
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    Empty,
    Unknown(String),
    Usage(&'static str),
    BadDate(String),
    BadNumber(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Empty => write!(f, "empty command"),
            ParseError::Unknown(name) => write!(f, "unknown command '{name}', try 'help'"),
            ParseError::Usage(usage) => write!(f, "usage: {usage}"),
            ParseError::BadDate(value) => write!(f, "invalid date '{value}', expected YYYY-MM-DD"),
            ParseError::BadNumber(value) => write!(f, "invalid number '{value}'"),
        }
    }
}

impl std::error::Error for ParseError {}

fn one_arg(
    rest: &str,
    usage: &'static str,
    build: fn(String) -> Command,
) -> Result<Command, ParseError> {
    let arg = rest.trim();
    if arg.is_empty() {
        return Err(ParseError::Usage(usage));
    }
    Ok(build(arg.to_string()))
}

fn credentials(rest: &str, usage: &'static str) -> Result<(String, String), ParseError> {
    let mut parts = rest.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(email), Some(password), None) => Ok((email.to_string(), password.to_string())),
        _ => Err(ParseError::Usage(usage)),
    }
}

fn number(value: &str) -> Result<u32, ParseError> {
    value
        .trim()
        .parse()
        .map_err(|_| ParseError::BadNumber(value.trim().to_string()))
}

fn date(value: &str) -> Result<NaiveDate, ParseError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| ParseError::BadDate(value.to_string()))
}

// `plan Paris | food, art | 3`; days default to 1 when omitted.
fn plan(rest: &str) -> Result<Command, ParseError> {
    const USAGE: &str = "plan <city> | <interests> | <days>";
    let fields: Vec<&str> = rest.split('|').map(str::trim).collect();
    let (city, interests, days) = match fields.as_slice() {
        [city, interests] => (*city, *interests, 1),
        [city, interests, days] => (*city, *interests, number(days)?),
        _ => return Err(ParseError::Usage(USAGE)),
    };
    Ok(Command::Plan {
        city: city.to_string(),
        interests: interests.to_string(),
        days,
    })
}

fn stay(rest: &str) -> Result<Command, ParseError> {
    const USAGE: &str = "stay <check-in> <check-out> [guests]";
    let parts: Vec<&str> = rest.split_whitespace().collect();
    let (check_in, check_out, guests) = match parts.as_slice() {
        [check_in, check_out] => (date(check_in)?, date(check_out)?, 1),
        [check_in, check_out, guests] => (date(check_in)?, date(check_out)?, number(guests)?),
        _ => return Err(ParseError::Usage(USAGE)),
    };
    Ok(Command::Stay {
        check_in,
        check_out,
        guests,
    })
}

impl FromStr for Command {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        if line.is_empty() {
            return Err(ParseError::Empty);
        }
        let (name, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));

        match name.to_ascii_lowercase().as_str() {
            "open" => one_arg(rest, "open <path>", Command::Open),
            "login" => {
                let (email, password) = credentials(rest, "login <email> <password>")?;
                Ok(Command::Login { email, password })
            }
            "signup" => {
                let (email, password) = credentials(rest, "signup <email> <password>")?;
                Ok(Command::Signup { email, password })
            }
            "logout" => Ok(Command::Logout),
            "plan" => plan(rest),
            "save" => Ok(Command::Save),
            "hotels" => Ok(Command::Hotels),
            "search" => one_arg(rest, "search <city>", Command::Search),
            "stay" => stay(rest),
            "book" => one_arg(rest, "book <hotel-id>", Command::Book),
            "view" => one_arg(rest, "view <id>", Command::View),
            "close" => Ok(Command::Close),
            "delete" => one_arg(rest, "delete <id>", Command::Delete),
            "book-hotels" => one_arg(rest, "book-hotels <id>", Command::BookHotels),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(ParseError::Unknown(other.to_string())),
        }
    }
}
