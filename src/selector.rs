//! Searchable dependent selector: a dropdown whose option list is fetched from
//! a listing endpoint (optionally scoped by a parent id) and filtered locally.

mod cascade;
mod option;
mod source;
mod state;

pub use self::cascade::{Cascade, CascadeMode, CascadeTicket};
pub use self::option::{SelectOption, filter_options};
pub use self::source::{
    OptionSource, category_option, section_option, vocabulary_option, word_option,
};
pub use self::state::{FetchTicket, Selector, SelectorConfig, SelectorRow};

pub const NO_RESULTS: &str = "No results found";
pub const LOADING: &str = "Loading...";
