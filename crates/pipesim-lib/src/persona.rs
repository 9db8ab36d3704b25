//! System prompts steering a canned chat model.

use serde::Serialize;

/// Reply when no prompt keyword applies.
pub const DEFAULT_REPLY: &str = "I can help.";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Persona {
    #[default]
    Assistant,
    Pirate,
    Robot,
    Therapy,
}

impl Persona {
    #[must_use]
    pub const fn system_prompt(self) -> &'static str {
        match self {
            Self::Assistant => "You are a helpful assistant.",
            Self::Pirate => "You are a pirate. Arrr!",
            Self::Robot => "Output only JSON.",
            Self::Therapy => "I am here to listen. How does that feel?",
        }
    }
}

impl std::str::FromStr for Persona {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "assistant" => Ok(Self::Assistant),
            "pirate" => Ok(Self::Pirate),
            "robot" => Ok(Self::Robot),
            "therapy" => Ok(Self::Therapy),
            other => anyhow::bail!("unknown persona: {other}"),
        }
    }
}

/// Reply to `input` under `system_prompt`.
///
/// Keywords are checked case-sensitively in the order `pirate`, `JSON`,
/// `listen`; a later match replaces an earlier one.
#[must_use]
pub fn respond(system_prompt: &str, input: &str) -> String {
    let mut reply = DEFAULT_REPLY.to_string();
    if system_prompt.contains("pirate") {
        reply = "Aye matey! That be a fine thing to say.".to_string();
    }
    if system_prompt.contains("JSON") {
        let quoted = serde_json::Value::from(input);
        reply = format!(r#"{{"user_input": {quoted}, "status": "received"}}"#);
    }
    if system_prompt.contains("listen") {
        reply = "I hear you. Tell me more about why you said that.".to_string();
    }
    reply
}
