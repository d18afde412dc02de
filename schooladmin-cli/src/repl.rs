//! Line-based driver for a list page.

use std::io;

use schooladmin_lib::page::ListPage;
use schooladmin_lib::page::ListRecord;
use schooladmin_lib::page::Update;
use schooladmin_lib::view::Breakpoint;
use tokio::io::AsyncBufReadExt;
use tokio::io::BufReader;

use crate::render;

pub const HELP: &str = "\
commands:
  search <text>   filter by text once typing pauses
  find <text>     filter by text now
  class <id|->    filter by class, '-' for all classes
  classes         list class ids
  sort <field>    sort by field, again to flip direction
  header <n>      click column header n
  page <n>        go to page n
  next | prev     step through pages
  refresh         fetch the current page again
  url             print the page URL
  quit";

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Search(String),
    Find(String),
    Class(String),
    Classes,
    Sort(String),
    Header(usize),
    Page(u32),
    Next,
    Prev,
    Refresh,
    Url,
    Help,
    Quit,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command '{0}', try 'help'")]
    Unknown(String),

    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),

    #[error("'{0}' is not a number")]
    NotANumber(String),
}

impl Command {
    /// Parses one input line. Blank lines are `None`.
    pub fn parse(line: &str) -> Option<Result<Self, CommandError>> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        let (name, arg) = match line.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (line, ""),
        };

        let command = match name {
            // An empty search clears the filter
            "search" => Ok(Self::Search(arg.to_string())),
            "find" => Ok(Self::Find(arg.to_string())),
            "class" => match arg {
                "" => Err(CommandError::MissingArgument("class")),
                "-" => Ok(Self::Class(String::new())),
                id => Ok(Self::Class(id.to_string())),
            },
            "classes" => Ok(Self::Classes),
            "sort" if arg.is_empty() => Err(CommandError::MissingArgument("sort")),
            "sort" => Ok(Self::Sort(arg.to_string())),
            "header" => number(arg, "header").map(Self::Header),
            "page" => number(arg, "page").map(Self::Page),
            "next" | "n" => Ok(Self::Next),
            "prev" | "p" => Ok(Self::Prev),
            "refresh" | "r" => Ok(Self::Refresh),
            "url" => Ok(Self::Url),
            "help" | "?" => Ok(Self::Help),
            "quit" | "q" | "exit" => Ok(Self::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        };
        Some(command)
    }
}

fn number<T: std::str::FromStr>(arg: &str, name: &'static str) -> Result<T, CommandError> {
    if arg.is_empty() {
        return Err(CommandError::MissingArgument(name));
    }
    arg.parse().map_err(|_| CommandError::NotANumber(arg.to_string()))
}

enum Wake {
    Line(Option<String>),
    Update(Update),
}

/// Mounts `page` and serves commands from stdin until `quit` or EOF.
pub async fn run<R: ListRecord>(mut page: ListPage<R>, screen: Breakpoint) -> io::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    page.mount();
    println!("{}", render::page(&page, screen));

    loop {
        let wake = tokio::select! {
            line = lines.next_line() => Wake::Line(line?),
            update = page.next_update() => Wake::Update(update),
        };

        match wake {
            Wake::Line(None) => break,
            Wake::Line(Some(line)) => match Command::parse(&line) {
                None => {}
                Some(Ok(Command::Quit)) => break,
                Some(Ok(command)) => execute(&mut page, command),
                Some(Err(e)) => println!("{}", e),
            },
            Wake::Update(Update::Closed) => break,
            Wake::Update(update) => {
                log::debug!("{} page update: {:?}", page.title(), update);
                println!("{}", render::page(&page, screen));
            }
        }
    }

    Ok(())
}

fn execute<R: ListRecord>(page: &mut ListPage<R>, command: Command) {
    match command {
        Command::Search(text) => {
            page.set_search(text);
            println!("search: {:?}", page.search_input());
        }
        Command::Find(text) => {
            page.set_search(text);
            page.settle_search();
        }
        Command::Class(id) => page.select_class(&id),
        Command::Classes => {
            for option in page.class_options() {
                let marker = if option.selected { "*" } else { " " };
                let value = if option.value.is_empty() { "-" } else { option.value.as_str() };
                println!("{} {:<12} {}", marker, value, option.label);
            }
        }
        Command::Sort(field) => page.sort_by(&field),
        Command::Header(index) => {
            if !page.click_header(index) {
                println!("column {} is not sortable", index);
            }
        }
        Command::Page(n) => page.go_to_page(n),
        Command::Next => {
            if !page.next_page() {
                println!("already on the last page");
            }
        }
        Command::Prev => {
            if !page.prev_page() {
                println!("already on the first page");
            }
        }
        Command::Refresh => page.refresh(),
        Command::Url => println!("{}", page.url()),
        Command::Help => println!("{}", HELP),
        Command::Quit => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Result<Command, CommandError> {
        Command::parse(line).unwrap()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse("search  ann lee "), Ok(Command::Search("ann lee".to_string())));
        assert_eq!(parse("search"), Ok(Command::Search(String::new())));
        assert_eq!(parse("class 5"), Ok(Command::Class("5".to_string())));
        assert_eq!(parse("class -"), Ok(Command::Class(String::new())));
        assert_eq!(parse("sort phone"), Ok(Command::Sort("phone".to_string())));
        assert_eq!(parse("page 3"), Ok(Command::Page(3)));
        assert_eq!(parse("header 0"), Ok(Command::Header(0)));
        assert_eq!(parse("n"), Ok(Command::Next));
        assert_eq!(parse("q"), Ok(Command::Quit));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Command::parse("   "), None);
        assert_eq!(parse("page"), Err(CommandError::MissingArgument("page")));
        assert_eq!(parse("page two"), Err(CommandError::NotANumber("two".to_string())));
        assert_eq!(parse("class"), Err(CommandError::MissingArgument("class")));
        assert_eq!(parse("sort"), Err(CommandError::MissingArgument("sort")));
        assert_eq!(parse("delete 5"), Err(CommandError::Unknown("delete".to_string())));
    }
}
