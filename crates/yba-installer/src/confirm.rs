use std::io::{BufRead, Write};

use crate::error::{InstallerError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DefaultAnswer {
    #[default]
    None,
    Yes,
    No,
}

impl DefaultAnswer {
    fn selector(self) -> &'static str {
        match self {
            Self::None => "[yes/no]",
            Self::Yes => "[YES/no]",
            Self::No => "[yes/NO]",
        }
    }

    fn answer(self) -> Option<bool> {
        match self {
            Self::None => None,
            Self::Yes => Some(true),
            Self::No => Some(false),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConfirmPolicy {
    pub skip_confirmation: bool,
}

impl ConfirmPolicy {
    pub fn interactive() -> Self {
        Self {
            skip_confirmation: false,
        }
    }

    pub fn skip() -> Self {
        Self {
            skip_confirmation: true,
        }
    }
}

pub fn user_confirm<R: BufRead, W: Write>(
    policy: ConfirmPolicy,
    prompt: &str,
    default: DefaultAnswer,
    input: &mut R,
    output: &mut W,
) -> Result<bool> {
    if policy.skip_confirmation {
        return Ok(true);
    }

    let mut prompt = prompt.to_string();
    if !prompt.ends_with(' ') {
        prompt.push(' ');
    }

    loop {
        write!(output, "{prompt}{}: ", default.selector()).map_err(prompt_error)?;
        output.flush().map_err(prompt_error)?;

        let mut line = String::new();
        let read = input.read_line(&mut line).map_err(prompt_error)?;
        if read == 0 {
            return Err(InstallerError::Prompt(
                "input closed before an answer was given".to_string(),
            ));
        }

        match line.trim().to_lowercase().as_str() {
            "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            "" => {
                if let Some(answer) = default.answer() {
                    return Ok(answer);
                }
            }
            _ => {}
        }
        writeln!(output, "please enter 'yes' or 'no'").map_err(prompt_error)?;
    }
}

fn prompt_error(err: std::io::Error) -> InstallerError {
    InstallerError::Prompt(err.to_string())
}
