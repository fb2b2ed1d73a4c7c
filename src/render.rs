//! TUI rendering traits for slotbook types.
//!
//! Extension traits that add colored terminal rendering to slotbook-core
//! types using owo_colors.

use owo_colors::OwoColorize;
use slotbook_core::contact::{ContactField, ContactInfo};
use slotbook_core::questionnaire::Questionnaire;
use slotbook_core::slot::TimeSlot;
use slotbook_core::time_zone::TimeZoneEntry;
use slotbook_core::wizard::{Confirmation, Step, StepErrors, WARNING_TEXT};

use crate::utils::tui::progress_bar;

const PROGRESS_WIDTH: usize = 20;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Step {
    fn render(&self) -> String {
        format!("{} {}", format!("[{}/4]", self.number()).dimmed(), self.title().bold())
    }
}

/// The blocking warning shown when the first step's guard fails.
impl Render for StepErrors {
    fn render(&self) -> String {
        let mut lines = vec![format!("{}", "Warning".red().bold()), format!("  {}", WARNING_TEXT)];
        for message in self.messages() {
            lines.push(format!("  {}", message.red()));
        }
        lines.join("\n")
    }
}

impl Render for TimeZoneEntry {
    fn render(&self) -> String {
        format!("{} {}", self.region, self.utc_offset.dimmed())
    }
}

impl Render for TimeSlot {
    fn render(&self) -> String {
        format!("{:>8}  {}", self.to_string(), self.time().format("%H:%M").dimmed())
    }
}

/// Progress line and prompt for the current question.
impl Render for Questionnaire {
    fn render(&self) -> String {
        let question = self.current();
        format!(
            "{}\n{} {}",
            progress_bar(self.progress(), PROGRESS_WIDTH).cyan(),
            format!("Q{}/{}", self.index() + 1, self.question_count()).dimmed(),
            question.prompt.trim().bold()
        )
    }
}

impl Render for Confirmation {
    fn render(&self) -> String {
        [
            format!("{}", "We just scheduled a demo with you!".green().bold()),
            "A calendar invitation for your upcoming session has been sent to your email.".to_string(),
            format!("  Date  {}", self.date.bold()),
            format!("  Time  {}", self.slot.bold()),
        ]
        .join("\n")
    }
}

/// One line per contact field with an error flag: `label: help`.
pub fn render_field_errors(contact: &ContactInfo) -> Vec<String> {
    ContactField::ALL
        .iter()
        .filter_map(|field| {
            let state = contact.field(*field);
            state.error.then(|| {
                let help = if state.help.is_empty() { "required" } else { state.help.as_str() };
                format!("  {}: {}", field.label(), help.red())
            })
        })
        .collect()
}
