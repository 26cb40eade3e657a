//! Maps terminal input lines to controller messages.
//!
//! Plain text is an explicit search submission. Lines starting with `:` are
//! commands, see [`HELP`].
use catalog_core::{
    CategoryId, CategoryOption, Msg, PricingTier, RatingThreshold, SearchMode,
};

pub const HELP: &str = "\
Type a search term and press Enter to search.
  :type <text>     edit the term without updating the shareable link
  :cat <n|id>      toggle a category (number from the list, id, slug or name)
  :price <tier>    toggle a pricing tier (free, freemium, paid, subscription,
                   usage_based, contact, open_source)
  :rating <2|3|4>  toggle the minimum rating
  :mode <mode>     toggle the search mode (keyword, semantic, hybrid)
  :clear           clear category, pricing and rating filters
  :more            load the next page
  :link            show the shareable link
  :help            show this help
  :quit            exit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Dispatch(Msg),
    ShowLink,
    Help,
    Quit,
    Invalid(String),
}

pub fn parse_command(line: &str, categories: &[CategoryOption]) -> Command {
    let line = line.trim();
    let Some(rest) = line.strip_prefix(':') else {
        if line.is_empty() {
            return Command::Dispatch(Msg::NoOp);
        }
        return Command::Dispatch(Msg::QuerySubmitted(line.to_string()));
    };

    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };

    match name {
        "type" => Command::Dispatch(Msg::QueryChanged(arg.to_string())),
        "cat" | "category" => resolve_category(arg, categories)
            .map(|id| Command::Dispatch(Msg::CategorySelected(id)))
            .unwrap_or_else(|| Command::Invalid(format!("unknown category {arg:?}"))),
        "price" | "pricing" => match arg.parse::<PricingTier>() {
            Ok(tier) => Command::Dispatch(Msg::PricingTierToggled(tier)),
            Err(err) => Command::Invalid(err.to_string()),
        },
        "rating" => match arg.parse::<RatingThreshold>() {
            Ok(threshold) => Command::Dispatch(Msg::MinRatingSelected(threshold)),
            Err(err) => Command::Invalid(err.to_string()),
        },
        "mode" => match arg.parse::<SearchMode>() {
            Ok(mode) => Command::Dispatch(Msg::SearchModeSelected(mode)),
            Err(err) => Command::Invalid(err.to_string()),
        },
        "clear" => Command::Dispatch(Msg::FiltersCleared),
        "more" => Command::Dispatch(Msg::LoadMoreClicked),
        "link" => Command::ShowLink,
        "help" | "h" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        other => Command::Invalid(format!("unknown command :{other} (try :help)")),
    }
}

/// Accepts a 1-based position in the rendered list, an id, a slug or a name.
/// Only when no category list is loaded is a raw id passed through unchecked.
fn resolve_category(arg: &str, categories: &[CategoryOption]) -> Option<CategoryId> {
    if arg.is_empty() {
        return None;
    }
    if categories.is_empty() {
        return CategoryId::new(arg).ok();
    }
    if let Ok(position) = arg.parse::<usize>() {
        if let Some(option) = position.checked_sub(1).and_then(|idx| categories.get(idx)) {
            return Some(option.id.clone());
        }
    }
    categories
        .iter()
        .find(|option| {
            option.id.as_str() == arg
                || option.slug.eq_ignore_ascii_case(arg)
                || option.name.eq_ignore_ascii_case(arg)
        })
        .map(|option| option.id.clone())
}
