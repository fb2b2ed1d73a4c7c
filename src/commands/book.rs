use anyhow::{Context, Result};
use chrono::{DateTime, Local, NaiveDate, Utc};
use clap::{Args, ValueEnum};
use dialoguer::{Confirm, Input, Select};
use owo_colors::OwoColorize;
use slotbook_core::booking::{MeetingClient, MeetingService};
use slotbook_core::config::Settings;
use slotbook_core::contact::ContactField;
use slotbook_core::slot::SLOTS;
use slotbook_core::time_zone::{self, TimeZoneEntry, TIME_ZONES};
use slotbook_core::wizard::{Consent, Step, SubmitOutcome, Wizard, CONSENT_QUESTION};

use crate::render::{render_field_errors, Render};
use crate::utils::tui::create_spinner;

#[derive(Args, Debug, Default)]
pub struct BookArgs {
    /// Meeting date: YYYY-MM-DD, or something like "tomorrow" or "next friday"
    #[arg(short, long)]
    pub date: Option<String>,

    /// Start time, one of the listed slots (e.g. "10:30 AM")
    #[arg(short, long)]
    pub slot: Option<String>,

    /// Time zone region (e.g. "Asia/Kolkata"), see `slotbook zones`
    #[arg(short = 'z', long)]
    pub zone: Option<String>,

    #[arg(short, long)]
    pub email: Option<String>,

    #[arg(short, long)]
    pub name: Option<String>,

    /// 10-digit contact number
    #[arg(short, long)]
    pub contact: Option<String>,

    /// Any experience with handling Financial Operations on Cloud?
    #[arg(long, value_enum)]
    pub cloud_experience: Option<YesNo>,

    /// Booking service base URL (overrides the config file)
    #[arg(long)]
    pub base_url: Option<String>,

    /// Print the booking request instead of sending it
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum YesNo {
    Yes,
    No,
}

impl From<YesNo> for Consent {
    fn from(value: YesNo) -> Self {
        match value {
            YesNo::Yes => Consent::Yes,
            YesNo::No => Consent::No,
        }
    }
}

/// Everything needed to book without prompting.
#[derive(Debug)]
struct Scripted {
    date: NaiveDate,
    slot: String,
    zone: &'static TimeZoneEntry,
    email: String,
    name: String,
    contact: String,
    consent: Option<Consent>,
}

impl BookArgs {
    fn contact_value(&self, field: ContactField) -> Option<&str> {
        match field {
            ContactField::Email => self.email.as_deref(),
            ContactField::Name => self.name.as_deref(),
            ContactField::Contact => self.contact.as_deref(),
        }
    }

    /// `Some` when every answer was given on the command line.
    fn scripted(&self) -> Result<Option<Scripted>> {
        let (Some(date), Some(slot), Some(zone), Some(email), Some(name), Some(contact)) = (
            &self.date,
            &self.slot,
            &self.zone,
            &self.email,
            &self.name,
            &self.contact,
        ) else {
            return Ok(None);
        };

        Ok(Some(Scripted {
            date: parse_date(date)?,
            slot: slot.clone(),
            zone: catalog_zone(zone)?,
            email: email.clone(),
            name: name.clone(),
            contact: contact.clone(),
            consent: self.cloud_experience.map(Consent::from),
        }))
    }
}

enum Flow {
    Continue,
    Done,
}

pub async fn run(args: BookArgs) -> Result<()> {
    let settings = with_overrides(Settings::load()?, &args);
    let client = MeetingClient::new(&settings)?;
    tracing::debug!(url = client.url(), "booking endpoint");

    match args.scripted()? {
        Some(answers) => {
            let today = Local::now().date_naive();
            let wizard = prefill(&answers, today, Utc::now())?;
            run_scripted(wizard, &client, args.dry_run).await
        }
        None => run_interactive(&args, &client).await,
    }
}

/// Command-line flags win over the config file and environment.
fn with_overrides(mut settings: Settings, args: &BookArgs) -> Settings {
    if let Some(url) = &args.base_url {
        settings.base_url = url.clone();
    }
    settings
}

// --- Non-interactive ---

/// Walk a fresh wizard up to the "Submit" button using `answers`.
fn prefill(answers: &Scripted, today: NaiveDate, now: DateTime<Utc>) -> Result<Wizard> {
    let mut wizard = Wizard::new();
    wizard.select_date(answers.date, today)?;
    wizard.select_slot(&answers.slot).with_context(|| {
        format!("Choose one of: {}", SLOTS.join(", "))
    })?;
    wizard.select_time_zone(answers.zone);

    if !wizard.next_from_schedule(now) {
        anyhow::bail!("{}", wizard.errors().messages().join(" "));
    }

    wizard.set_contact_field(ContactField::Email, answers.email.as_str());
    wizard.set_contact_field(ContactField::Name, answers.name.as_str());
    wizard.set_contact_field(ContactField::Contact, answers.contact.as_str());
    if let Some(consent) = answers.consent {
        wizard.set_consent(consent);
    }
    wizard.forward();

    while wizard.question_next() {}
    Ok(wizard)
}

async fn run_scripted<S: MeetingService>(mut wizard: Wizard, service: &S, dry_run: bool) -> Result<()> {
    if dry_run {
        return print_request(&mut wizard);
    }

    match submit(&mut wizard, service).await? {
        SubmitOutcome::Booked => {
            if let Some(confirmation) = wizard.confirmation() {
                println!("{}", confirmation.render());
            }
            Ok(())
        }
        SubmitOutcome::Failed => {
            let message = wizard.booking().error.clone().unwrap_or_default();
            anyhow::bail!(message)
        }
        SubmitOutcome::Blocked(_) => anyhow::bail!(blocked_message(&wizard)),
    }
}

// --- Interactive ---

async fn run_interactive<S: MeetingService>(args: &BookArgs, service: &S) -> Result<()> {
    let mut wizard = Wizard::new();

    loop {
        println!();
        println!("{}", wizard.step().render());

        match wizard.step() {
            Step::Schedule => schedule_screen(&mut wizard, args)?,
            Step::Details => details_screen(&mut wizard, args)?,
            Step::Questionnaire => {
                if let Flow::Done = questionnaire_screen(&mut wizard, service, args.dry_run).await? {
                    return Ok(());
                }
            }
            Step::Confirmation => {
                if let Some(confirmation) = wizard.confirmation() {
                    println!("{}", confirmation.render());
                }
                return Ok(());
            }
        }
    }
}

fn schedule_screen(wizard: &mut Wizard, args: &BookArgs) -> Result<()> {
    let today = Local::now().date_naive();

    let date = prompt_with_retry("  Date", args.date.as_deref(), |input| {
        let date = parse_date(input)?;
        if date < today {
            anyhow::bail!("Pick today or a later date");
        }
        Ok(date)
    })?;
    wizard.select_date(date, today)?;

    let default_slot = args
        .slot
        .as_deref()
        .and_then(|s| SLOTS.iter().position(|l| *l == s))
        .unwrap_or(0);
    let slot = Select::new()
        .with_prompt("  Available slots")
        .items(&SLOTS)
        .default(default_slot)
        .interact()?;
    wizard.select_slot(SLOTS[slot])?;

    if wizard.time_zone().active().is_none() {
        if let Some(entry) = args.zone.as_deref().and_then(time_zone::find) {
            wizard.select_time_zone(entry);
        }
    }
    choose_time_zone(wizard)?;

    if !wizard.next_from_schedule(Utc::now()) {
        println!();
        println!("{}", wizard.errors().render());
        Confirm::new()
            .with_prompt("  OK")
            .default(true)
            .show_default(false)
            .interact()?;
        wizard.dismiss_error();
    }

    Ok(())
}

/// Open the time zone list unless a zone is already set and the user keeps it.
fn choose_time_zone(wizard: &mut Wizard) -> Result<()> {
    let current = wizard.time_zone().active().map(str::to_string);

    if let Some(region) = &current {
        let change = Confirm::new()
            .with_prompt(format!("  Time zone is {}. Change it?", region))
            .default(false)
            .interact()?;
        if !change {
            return Ok(());
        }
    }

    wizard.toggle_time_zones();
    let items: Vec<String> = TIME_ZONES.iter().map(|z| z.label()).collect();
    let default = current
        .as_deref()
        .and_then(|r| TIME_ZONES.iter().position(|z| z.region == r))
        .unwrap_or(0);
    let selection = Select::new()
        .with_prompt("  Time zone")
        .items(&items)
        .default(default)
        .max_length(12)
        .interact()?;
    wizard.select_time_zone(&TIME_ZONES[selection]);

    Ok(())
}

fn details_screen(wizard: &mut Wizard, args: &BookArgs) -> Result<()> {
    for field in ContactField::ALL {
        let current = wizard.contact().field(field).value.clone();
        let initial = if current.is_empty() {
            args.contact_value(field).unwrap_or_default().to_string()
        } else {
            current
        };

        let value: String = Input::new()
            .with_prompt(format!("  {}", field.label()))
            .with_initial_text(initial)
            .allow_empty(true)
            .interact_text()?;
        wizard.set_contact_field(field, value);

        let state = wizard.contact().field(field);
        if state.error {
            eprintln!("    {}", state.help.red());
        }
    }

    let default_consent = match wizard.consent().or(args.cloud_experience.map(Consent::from)) {
        Some(Consent::No) => 1,
        _ => 0,
    };
    let consent = Select::new()
        .with_prompt(format!("  {}", CONSENT_QUESTION))
        .items(&["Yes", "No"])
        .default(default_consent)
        .interact()?;
    wizard.set_consent(if consent == 0 { Consent::Yes } else { Consent::No });

    let action = Select::new()
        .items(&["Next", "Back", "Change time zone"])
        .default(0)
        .interact()?;
    match action {
        0 => {
            wizard.forward();
        }
        1 => {
            wizard.back();
        }
        _ => choose_time_zone(wizard)?,
    }

    Ok(())
}

async fn questionnaire_screen<S: MeetingService>(
    wizard: &mut Wizard,
    service: &S,
    dry_run: bool,
) -> Result<Flow> {
    let mut cursor = 0;

    while wizard.step() == Step::Questionnaire {
        let questionnaire = wizard.questionnaire();
        let question = questionnaire.current();
        println!("{}", questionnaire.render());

        let mut items: Vec<String> = question
            .options
            .iter()
            .map(|option| {
                let mark = if questionnaire.is_selected(question.id, option) { "x" } else { " " };
                format!("[{}] {}", mark, option.trim())
            })
            .collect();
        let is_last = questionnaire.is_last();
        items.push(if is_last { "Submit".to_string() } else { "Next".to_string() });
        items.push("Back".to_string());

        let choice = Select::new()
            .items(&items)
            .default(cursor.min(items.len() - 1))
            .interact()?;

        let option_count = question.options.len();
        if choice < option_count {
            wizard.toggle_answer(question.id, question.options[choice]);
            cursor = choice;
            continue;
        }

        cursor = 0;
        if choice > option_count {
            wizard.back();
        } else if !is_last {
            wizard.question_next();
        } else if dry_run {
            print_request(wizard)?;
            return Ok(Flow::Done);
        } else {
            match submit(wizard, service).await? {
                SubmitOutcome::Booked => {}
                SubmitOutcome::Failed => {
                    let message = wizard.booking().error.clone().unwrap_or_default();
                    eprintln!("  {}", message.red());
                }
                SubmitOutcome::Blocked(_) => eprintln!("{}", blocked_message(wizard)),
            }
        }
    }

    Ok(Flow::Continue)
}

// --- Shared ---

async fn submit<S: MeetingService>(wizard: &mut Wizard, service: &S) -> Result<SubmitOutcome> {
    let spinner = create_spinner("  Scheduling your demo...".to_string());
    let outcome = wizard.submit(service).await;
    spinner.finish_and_clear();
    Ok(outcome?)
}

fn print_request(wizard: &mut Wizard) -> Result<()> {
    let preview = dry_run_preview(wizard)?;
    println!("{}", serde_json::to_string_pretty(&preview)?);
    Ok(())
}

/// The request body that would be sent, next to the questionnaire answers.
fn dry_run_preview(wizard: &mut Wizard) -> Result<serde_json::Value> {
    let Some(request) = wizard.build_request()? else {
        anyhow::bail!(blocked_message(wizard));
    };
    Ok(serde_json::json!({
        "request": request,
        "answers": wizard.questionnaire().responses(),
    }))
}

fn blocked_message(wizard: &Wizard) -> String {
    let mut lines = vec!["Please fix the following before submitting:".to_string()];
    lines.extend(render_field_errors(wizard.contact()));
    if let Some(error) = &wizard.booking().error {
        lines.push(format!("  {}", error.red()));
    }
    lines.join("\n")
}

/// Prompt the user with retry on parse errors.
fn prompt_with_retry<T, F>(prompt: &str, initial: Option<&str>, parse: F) -> Result<T>
where
    F: Fn(&str) -> Result<T>,
{
    loop {
        let input: String = Input::new()
            .with_prompt(prompt)
            .with_initial_text(initial.unwrap_or_default())
            .interact_text()?;
        match parse(&input) {
            Ok(result) => return Ok(result),
            Err(e) => {
                eprintln!("  {}", e.to_string().red());
            }
        }
    }
}

/// Parse YYYY-MM-DD, falling back to natural language ("tomorrow").
fn parse_date(input: &str) -> Result<NaiveDate> {
    let trimmed = input.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }

    let dt = fuzzydate::parse(trimmed)
        .map_err(|_| anyhow::anyhow!("Could not parse date: \"{}\"", input))?;
    Ok(dt.date())
}

/// Only zones from the catalog can be booked.
fn catalog_zone(region: &str) -> Result<&'static TimeZoneEntry> {
    time_zone::find(region).ok_or_else(|| {
        anyhow::anyhow!(
            "Time zone '{}' is not offered. Run `slotbook zones` to see the list.",
            region
        )
    })
}
