//! Text and JSON rendering of the controller state.

use crate::core::controller::{ViewState, LOADING_MESSAGE};
use crate::config::toml_config::OUTPUT_FORMATS;
use crate::utils::error::{CatRosterError, Result};

pub const OTHER_HEADING: &str = "Cats with male owners";
pub const FEMALE_HEADING: &str = "Cats with female owners";
pub const ERROR_HEADING: &str = "Error occurred while retrieving API data:";

fn render_list(out: &mut String, heading: &str, items: &[String]) {
    out.push_str(heading);
    out.push('\n');
    for item in items {
        out.push_str("  • ");
        out.push_str(item);
        out.push('\n');
    }
}

pub fn render_text(state: &ViewState) -> String {
    match state {
        ViewState::Loading => format!("{}\n", LOADING_MESSAGE),
        ViewState::Error { message } => format!("{}\n{}\n", ERROR_HEADING, message),
        ViewState::Ready { roster } => {
            let mut out = String::new();
            render_list(&mut out, OTHER_HEADING, &roster.other);
            out.push('\n');
            render_list(&mut out, FEMALE_HEADING, &roster.female_owned);
            out
        }
    }
}

pub fn render_json(state: &ViewState) -> Result<String> {
    Ok(serde_json::to_string_pretty(state)?)
}

pub fn render(state: &ViewState, format: &str) -> Result<String> {
    match format {
        "text" => Ok(render_text(state)),
        "json" => render_json(state),
        other => Err(CatRosterError::InvalidConfigValueError {
            field: "format".to_string(),
            value: other.to_string(),
            reason: format!("Unsupported format. Valid formats: {}", OUTPUT_FORMATS.join(", ")),
        }),
    }
}
