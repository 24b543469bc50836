use crate::results::SearchResult;

pub trait Plugin: Send + Sync {
    /// Return results for the query string
    fn search(&self, query: &str) -> Vec<SearchResult>;
    /// Run the chosen result
    fn execute(&self, id: &str, payload: &str);
    /// Name of the plugin
    fn name(&self) -> &str;
    fn description(&self) -> &str;
}
