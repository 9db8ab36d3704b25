use serde::Serialize;

/// Outcome of routing a request to a simulated tool.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ToolRoute {
    /// The tool call that would be issued, if any.
    pub tool: Option<&'static str>,
    pub thought: &'static str,
    pub result: &'static str,
}

impl ToolRoute {
    #[must_use]
    pub fn uses_tool(&self) -> bool {
        self.tool.is_some()
    }
}

/// Keyword intent router. Rules are checked in order; the first rule with
/// any matching keyword wins.
const RULES: [(&[&str], &str, &str); 3] = [
    (&["weather"], "get_weather('London')", "Temp: 15°C, Rain: None"),
    (&["email"], "send_email('Admin')", "Email sent successfully."),
    (&["db", "user"], "query_db('SELECT *')", "User found: ID 101"),
];

/// Decide which tool, if any, answers `input`.
#[must_use]
pub fn route(input: &str) -> ToolRoute {
    let lower = input.to_lowercase();
    RULES
        .iter()
        .find(|(keywords, _, _)| keywords.iter().any(|k| lower.contains(k)))
        .map_or(
            ToolRoute {
                tool: None,
                thought: "No tool needed.",
                result: "I don't understand.",
            },
            |&(_, tool, result)| ToolRoute {
                tool: Some(tool),
                thought: "Identified tool needed.",
                result,
            },
        )
}
