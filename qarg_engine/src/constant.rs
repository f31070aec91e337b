pub(crate) const HELP_NAME: &str = "help";
pub(crate) const HELP_SHORT: char = 'h';
pub(crate) const HELP_MESSAGE: &str = "Show this help message and exit.";
// Every token after this one is left unmatched.
pub(crate) const TERMINATOR: &str = "--";
