//! API credential prompt (first run and "Update API Configuration")

use crate::console::input::ConsoleInput;
use colored::Colorize;
use mock_exam_application::InteractionError;
use std::sync::Arc;

/// Values entered by the user. Blank base URL or model means "keep the
/// shown default".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialInput {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
}

pub struct CredentialPrompt {
    input: Arc<ConsoleInput>,
}

impl CredentialPrompt {
    pub fn new(input: Arc<ConsoleInput>) -> Self {
        Self { input }
    }

    /// Ask for API key, base URL and model. The key is required.
    pub fn run(
        &self,
        default_base_url: &str,
        default_model: &str,
    ) -> Result<CredentialInput, InteractionError> {
        println!();
        println!("{}", "API Configuration".cyan().bold());
        let api_key = self.input.read_until(
            "API Key>",
            "An API key is required.",
            |s| (!s.is_empty()).then(|| s.to_string()),
        )?;
        let base_url = self
            .input
            .read_line(&format!("Base URL [{}]>", default_base_url))?;
        let model = self
            .input
            .read_line(&format!("Model [{}]>", default_model))?;

        Ok(CredentialInput {
            api_key,
            base_url: or_default(base_url, default_base_url),
            model: or_default(model, default_model),
        })
    }
}

fn or_default(value: String, default: &str) -> String {
    if value.is_empty() {
        default.to_string()
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_blank_fields_take_defaults() {
        let prompt = CredentialPrompt::new(Arc::new(ConsoleInput::from_reader(Cursor::new(
            "\nsk-123\n\ndeepseek-chat\n",
        ))));
        let input = prompt
            .run("https://api.openai.com/v1", "gpt-4o-mini")
            .unwrap();
        assert_eq!(
            input,
            CredentialInput {
                api_key: "sk-123".to_string(),
                base_url: "https://api.openai.com/v1".to_string(),
                model: "deepseek-chat".to_string(),
            }
        );
    }
}
