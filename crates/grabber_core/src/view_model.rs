use crate::Console;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub url: String,
    pub destination: String,
    pub console: Console,
    pub dirty: bool,
}
