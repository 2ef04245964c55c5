use crate::error::CliError;
use engine_processing::pushdown::explain::Explain;
use serde_json::json;

pub const NO_FILTER: &str = "(no filter pushed down)";

pub fn render_filter(filter: Option<&str>, as_json: bool) -> Result<String, CliError> {
    if as_json {
        return Ok(serde_json::to_string_pretty(&json!({ "filter": filter }))?);
    }
    Ok(filter.unwrap_or(NO_FILTER).to_string())
}

pub fn render_explain(explain: &Explain, as_json: bool) -> Result<String, CliError> {
    if as_json {
        let stages = json!({
            "parsed": explain.parsed,
            "pruned": explain.pruned,
            "rewritten": explain.rewritten,
            "filter": explain.filter,
        });
        return Ok(serde_json::to_string_pretty(&stages)?);
    }
    Ok(explain.to_string())
}
