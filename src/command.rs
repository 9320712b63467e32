//! Line commands for the interactive session.

use crate::app::Browser;
use crate::drawer::{Clock, CloseReason};
use crate::state::Tab;
use std::str::FromStr;

pub const HELP: &str = "\
commands:
  tab <browse|search|special>   switch tab
  term <text>                   set the ingredient term
  search [text]                 run the search now
  cat <name> / area <name>      pick a category or area
  filter-cat <q> / filter-area <q>
  expand-cat / expand-area      toggle the full chip list
  open <id>                     open a recipe
  close                         close the recipe drawer
  roll                          new random recipe
  help / quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Tab(Tab),
    Term(String),
    Search(Option<String>),
    Category(String),
    Area(String),
    FilterCategories(String),
    FilterAreas(String),
    ExpandCategories,
    ExpandAreas,
    Open(String),
    Close,
    Roll,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        let required = |what: &str| -> Result<String, String> {
            if rest.is_empty() {
                Err(format!("'{}' needs {}", word, what))
            } else {
                Ok(rest.to_string())
            }
        };

        match word {
            "tab" => Ok(Command::Tab(required("a tab name")?.parse()?)),
            "term" => Ok(Command::Term(rest.to_string())),
            "search" => Ok(Command::Search((!rest.is_empty()).then(|| rest.to_string()))),
            "cat" => Ok(Command::Category(required("a category")?)),
            "area" => Ok(Command::Area(required("an area")?)),
            "filter-cat" => Ok(Command::FilterCategories(rest.to_string())),
            "filter-area" => Ok(Command::FilterAreas(rest.to_string())),
            "expand-cat" => Ok(Command::ExpandCategories),
            "expand-area" => Ok(Command::ExpandAreas),
            "open" => Ok(Command::Open(required("a recipe id")?)),
            "close" | "esc" => Ok(Command::Close),
            "roll" => Ok(Command::Roll),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            "" => Err("empty command".to_string()),
            other => Err(format!("unknown command '{}'", other)),
        }
    }
}

impl Command {
    /// Apply to the session. `Help` and `Quit` are handled by the caller.
    pub fn apply<C: Clock>(self, browser: &mut Browser<C>) {
        match self {
            Command::Tab(tab) => browser.set_tab(tab),
            Command::Term(term) => browser.edit(|s| s.set_term(term)),
            Command::Search(term) => {
                if let Some(term) = term {
                    browser.edit(|s| s.set_term(term));
                }
                browser.search_now();
            }
            Command::Category(name) => browser.edit(|s| s.select_category(name)),
            Command::Area(name) => browser.edit(|s| s.select_area(name)),
            Command::FilterCategories(q) => browser.edit(|s| s.set_category_query(q)),
            Command::FilterAreas(q) => browser.edit(|s| s.set_area_query(q)),
            Command::ExpandCategories => browser.edit(|s| s.toggle_category_expanded()),
            Command::ExpandAreas => browser.edit(|s| s.toggle_area_expanded()),
            Command::Open(id) => browser.select_meal(id),
            Command::Close => {
                browser.request_close(CloseReason::Escape);
            }
            Command::Roll => browser.roll_special(),
            Command::Help | Command::Quit => {}
        }
    }
}
