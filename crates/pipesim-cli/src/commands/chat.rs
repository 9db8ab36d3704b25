use std::io::Write;

use serde::Serialize;

use pipesim_lib::output::{ConsoleOutput, write_json};
use pipesim_lib::persona::{Persona, respond};

use super::Format;

#[derive(Serialize)]
struct ChatReport<'a> {
    system_prompt: &'a str,
    user: &'a str,
    reply: String,
}

/// Run the `pipesim chat` command. `system` replaces the persona's prompt.
pub fn run_chat<OUT, ERR>(
    message: &str,
    persona: Persona,
    system: Option<&str>,
    format: Format,
    output: &mut dyn ConsoleOutput<OUT, ERR>,
) -> anyhow::Result<()>
where
    OUT: Write,
    ERR: Write,
{
    let system_prompt = system.unwrap_or(persona.system_prompt());
    let report = ChatReport {
        system_prompt,
        user: message,
        reply: respond(system_prompt, message),
    };

    match format {
        Format::Json => write_json(output.stdout(), &report)?,
        Format::Text => {
            let out = output.stdout();
            writeln!(out, "system: {}", report.system_prompt)?;
            writeln!(out, "user: {}", report.user)?;
            writeln!(out, "assistant: {}", report.reply)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::test_util::run_cli;

    #[test]
    fn try_run_chat_default_persona() {
        let (stdout, _) = run_cli(&["pipesim", "chat", "hello"]).unwrap();
        assert_eq!(
            stdout,
            "system: You are a helpful assistant.\nuser: hello\nassistant: I can help.\n"
        );
    }

    #[test]
    fn try_run_chat_robot() {
        let (stdout, _) = run_cli(&["pipesim", "chat", "-p", "robot", "status?"]).unwrap();
        assert_eq!(
            stdout,
            "system: Output only JSON.\n\
             user: status?\n\
             assistant: {\"user_input\": \"status?\", \"status\": \"received\"}\n"
        );
    }

    #[test]
    fn try_run_chat_custom_system_prompt() {
        let (stdout, _) = run_cli(&[
            "pipesim",
            "--json",
            "chat",
            "--persona",
            "pirate",
            "--system",
            "Just listen.",
            "I had a long day",
        ])
        .unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
        assert_eq!(parsed["system_prompt"], "Just listen.");
        assert_eq!(
            parsed["reply"],
            "I hear you. Tell me more about why you said that."
        );
    }

    #[test]
    fn try_run_chat_rejects_unknown_persona() {
        assert!(run_cli(&["pipesim", "chat", "-p", "captain", "hi"]).is_err());
    }
}
